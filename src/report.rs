/*!

Reporting routes that cross a particular port of interest.

*/

use crate::analysis::{is_uplink, AnalysisTable};
use crate::error::{Error, Result};
use crate::fabric::{Fabric, Lid, PortId};
use crate::walker::walk_route_port;

/// One reported crossing of the port of interest by a route from `port1` to
/// `port2`. `is_base_lid` is true only for the DLID offset 0 (the
/// destination's base LID). `forward` means: in fat-tree mode, the crossing
/// is an uplink; otherwise, the port of interest was the *exit* port of its
/// hop (as opposed to the entry port).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteCrossing
{
	pub port1: PortId,
	pub port2: PortId,
	pub dlid: Lid,
	pub is_base_lid: bool,
	pub forward: bool,
}

fn report_callback(fabric: &Fabric, table: &AnalysisTable, out: &mut Vec<RouteCrossing>, report_port: PortId, port1: PortId, port2: PortId, dlid: Lid, is_base_lid: bool, fat_tree: bool, entry: Option<PortId>, exit: Option<PortId>) -> Result<()>
{
	if fat_tree
	{
		if exit == Some(report_port)
		{
			let forward = is_uplink(fabric, table, report_port);
			out.push(RouteCrossing{ port1, port2, dlid, is_base_lid, forward });
		}
		return Ok(());
	}

	if entry == Some(report_port)
	{
		out.push(RouteCrossing{ port1, port2, dlid, is_base_lid, forward: true });
	}
	if exit == Some(report_port)
	{
		out.push(RouteCrossing{ port1, port2, dlid, is_base_lid, forward: false });
	}
	Ok(())
}

/// Reports every crossing of `report_port` by a route from `port1` to
/// `port2`, across all LMC-expanded DLID offsets. Bad (incomplete) paths
/// are not reported; callers are expected to have already run
/// [`crate::tabulate::tabulate_routes`] to surface those.
pub fn report_routes(fabric: &Fabric, table: &AnalysisTable, port1: PortId, port2: PortId, report_port: PortId, fat_tree: bool, max_hops: usize) -> Result<Vec<RouteCrossing>>
{
	let port2_data = fabric.port(port2).ok_or(Error::InvalidParameter)?;
	let dlid_base = port2_data.base_lid;
	let mask = port2_data.lid_mask();

	let mut out = Vec::new();
	for offset in 0..=mask
	{
		let is_base_lid = offset == 0;
		let dlid = dlid_base | offset;
		let result = walk_route_port(fabric, port1, dlid, max_hops, &mut |entry, exit| report_callback(fabric, table, &mut out, report_port, port1, port2, dlid, is_base_lid, fat_tree, entry, exit));
		match result
		{
			Ok(()) => {}
			Err(Error::Unavailable) => return Err(Error::Unavailable),
			Err(_) => {}
		}
	}
	Ok(out)
}

/// Reports every crossing of `report_port` across all distinct
/// host-interface pairs (same-node pairs included; only exact loopback is
/// skipped).
pub fn report_ca_routes(fabric: &Fabric, table: &AnalysisTable, report_port: PortId, fat_tree: bool, max_hops: usize) -> Result<Vec<RouteCrossing>>
{
	let mut out = Vec::new();
	let host_ports: Vec<PortId> = fabric.host_interfaces()
		.flat_map(|(index, node)| node.ports_iter().map(move |p| PortId::new(index, p.port_num)))
		.collect();

	for &port1 in &host_ports
	{
		for &port2 in &host_ports
		{
			if port1 == port2
			{
				continue;
			}
			out.extend(report_routes(fabric, table, port1, port2, report_port, fat_tree, max_hops)?);
		}
	}
	Ok(out)
}
