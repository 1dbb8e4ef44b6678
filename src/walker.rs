/*!

The route-walking state machine, the pivot every other analysis module is
built on top of.

*/

use crate::error::{Error, Result};
use crate::fabric::{lft, Fabric, Lid, NodeType, PortId};

/// One callback invocation along a route: `(entry_port, exit_port)`, with
/// exactly one device addressed per call. See [`walk_route_port`] for the
/// full convention.
pub type RouteCallback<'a> = dyn FnMut(Option<PortId>, Option<PortId>) -> Result<()> + 'a;

/// Walks the route that a packet addressed to `dlid` would take starting
/// from `start_port`, invoking `callback(entry_port, exit_port)` once per
/// device visited.
///
/// Callback convention:
/// - originating host interface: `(None, Some(start_port))`,
/// - each switch hop: `(Some(entry), Some(exit))`, both ports on the same
///   node; one of them is port 0 when the switch is the first or last
///   device on the route,
/// - terminal host interface: `(Some(last_hop_port), None)`.
///
/// Returns `Err(Error::Unavailable)` if any traversed switch has no linear
/// forwarding table, `Err(Error::NotDone)` on a dead end, loop, over-length
/// path, or wrong-endpoint arrival, or the first error the callback itself
/// returns (propagated verbatim, halting the walk immediately).
pub fn walk_route_port(fabric: &Fabric, start_port: PortId, dlid: Lid, max_hops: usize, callback: &mut RouteCallback) -> Result<()>
{
	let mut current = start_port;

	if fabric.node(current.node).node_type != NodeType::Switch
	{
		// first device in route
		callback(None, Some(current))?;
		current = fabric.neighbor(current).ok_or(Error::NotDone)?;
	}

	// 1st loop iteration we can start at port 0 of a switch. If we arrive at
	// port 0 of a switch on any later iteration, it must be our destination.
	let mut hops: Vec<PortId> = Vec::new();
	let mut first_iteration = true;
	while fabric.node(current.node).node_type == NodeType::Switch && (first_iteration || current.port != 0)
	{
		first_iteration = false;

		if hops.len() >= max_hops
		{
			return Err(Error::NotDone);
		}
		if hops.contains(&current)
		{
			return Err(Error::NotDone);
		}
		hops.push(current);

		if fabric.node(current.node).switch_data.is_none()
		{
			return Err(Error::Unavailable);
		}

		let exit = lft::lookup_lft(fabric, current.node, dlid).ok_or(Error::NotDone)?;

		callback(Some(current), Some(exit))?;

		current = if fabric.node(exit.node).node_type == NodeType::Switch && exit.port == 0
		{
			exit
		}
		else
		{
			fabric.neighbor(exit).ok_or(Error::NotDone)?
		};
	}

	// at destination of dlid: HI, or port 0 of a switch
	let dest = fabric.port(current).ok_or(Error::NotDone)?;
	if !dest.covers_lid(dlid)
	{
		return Err(Error::NotDone);
	}

	if fabric.node(current.node).node_type != NodeType::Switch
	{
		// last device in route
		callback(Some(current), None)?;
	}

	Ok(())
}

/// Walks the route from `slid` to `dlid`, first resolving `slid` to its
/// owning port. `Err(Error::NotFound)` if no port in the fabric answers to
/// `slid`.
pub fn walk_route(fabric: &Fabric, slid: Lid, dlid: Lid, max_hops: usize, callback: &mut RouteCallback) -> Result<()>
{
	let start = fabric.find_lid(slid).ok_or(Error::NotFound(slid))?;
	walk_route_port(fabric, start, dlid, max_hops, callback)
}
