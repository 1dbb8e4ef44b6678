/*!

Validating that every route between every pair of LID-bearing ports
actually completes.

*/

use crate::error::{Error, Result};
use crate::fabric::{Fabric, Lid, NodeType, PortId};
use crate::walker::walk_route_port;

/// A route that failed to complete: `Err(Error::NotDone)` (dead end, loop,
/// or wrong destination) from the walker. Unavailable LFTs abort the whole
/// validation run instead of being reported per-pair; see
/// [`validate_all_routes`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FailedRoute
{
	pub port1: PortId,
	pub port2: PortId,
	pub dlid: Lid,
	pub is_base_lid: bool,
}

/// One hop of a failed route's detail trace, reported only when the caller
/// asks for hop detail via `detail_callback`. `None` closes out the path
/// (matches the validator's own end-of-path marker).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteHop
{
	Hop{ entry: Option<PortId>, exit: Option<PortId> },
	EndOfPath,
}

/// Validates all LMC-expanded routes from `port1` to `port2`, returning
/// `(total_paths, bad_paths)`. `on_failure` is called once per failed
/// route; `on_hop`, if given, additionally replays the failed route hop by
/// hop (terminated by [`RouteHop::EndOfPath`]) for diagnostic detail.
pub fn validate_routes(fabric: &Fabric, port1: PortId, port2: PortId, max_hops: usize, mut on_failure: impl FnMut(FailedRoute), mut on_hop: Option<impl FnMut(RouteHop)>) -> Result<(u64, u64)>
{
	let dlid_base = fabric.port(port2).ok_or(Error::InvalidParameter)?.base_lid;
	let mask = fabric.port(port2).ok_or(Error::InvalidParameter)?.lid_mask();

	let mut total_paths = 0u64;
	let mut bad_paths = 0u64;

	for offset in 0..=mask
	{
		let is_base_lid = offset == 0;
		let dlid = dlid_base | offset;
		let result = walk_route_port(fabric, port1, dlid, max_hops, &mut |_, _| Ok(()));
		total_paths += 1;
		match result
		{
			Ok(()) => {}
			Err(Error::Unavailable) => return Err(Error::Unavailable),
			Err(_) =>
			{
				bad_paths += 1;
				on_failure(FailedRoute{ port1, port2, dlid, is_base_lid });
				if let Some(on_hop) = on_hop.as_mut()
				{
					let _ = walk_route_port(fabric, port1, dlid, max_hops, &mut |entry, exit| { on_hop(RouteHop::Hop{ entry, exit }); Ok(()) });
					on_hop(RouteHop::EndOfPath);
				}
			}
		}
	}
	Ok((total_paths, bad_paths))
}

fn is_lid_bearing(fabric: &Fabric, port: PortId) -> bool
{
	fabric.node(port.node).node_type != NodeType::Switch || port.port == 0
}

/// Validates routes between every pair of LID-bearing ports in the fabric
/// (host interfaces, plus switch port 0), skipping only exact loopback
/// (`port1 == port2`) pairs. Returns `(total_paths, bad_paths)` summed over
/// every pair; aborts immediately on `Err(Error::Unavailable)`.
pub fn validate_all_routes(fabric: &Fabric, max_hops: usize, mut on_failure: impl FnMut(FailedRoute), mut on_hop: Option<impl FnMut(RouteHop)>) -> Result<(u64, u64)>
{
	let lid_ports: Vec<PortId> = fabric.nodes()
		.flat_map(|(index, node)| node.ports_iter().map(move |p| PortId::new(index, p.port_num)))
		.filter(|&port| is_lid_bearing(fabric, port))
		.collect();

	let mut total_paths = 0u64;
	let mut bad_paths = 0u64;
	for &port1 in &lid_ports
	{
		for &port2 in &lid_ports
		{
			if port1 == port2
			{
				continue;
			}
			let (paths, bad) = validate_routes(fabric, port1, port2, max_hops, &mut on_failure, on_hop.as_mut())?;
			total_paths += paths;
			bad_paths += bad;
		}
	}
	Ok((total_paths, bad_paths))
}
