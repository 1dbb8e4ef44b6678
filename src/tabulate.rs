/*!

Tabulating route counters across all host-interface pairs.

*/

use crate::analysis::{is_uplink, AnalysisTable};
use crate::error::{Error, Result};
use crate::fabric::{Fabric, PortId};
use crate::walker::walk_route_port;

fn tabulate_callback(fabric: &Fabric, table: &mut AnalysisTable, entry: Option<PortId>, exit: Option<PortId>, is_base_lid: bool, fat_tree: bool) -> Result<()>
{
	if fat_tree
	{
		if let Some(exit) = exit
		{
			let uplink = is_uplink(fabric, table, exit);
			let counters = table.fat_tree_route_counters_mut(exit);
			if uplink
			{
				counters.uplink_all_paths += 1;
				if is_base_lid
				{
					counters.uplink_base_paths += 1;
				}
			}
			else
			{
				counters.downlink_all_paths += 1;
				if is_base_lid
				{
					counters.downlink_base_paths += 1;
				}
			}
		}
		return Ok(());
	}

	if let Some(entry) = entry
	{
		table.route_counters_mut(entry).recv_all_paths += 1;
		if is_base_lid
		{
			table.route_counters_mut(entry).recv_base_paths += 1;
		}
	}
	if let Some(exit) = exit
	{
		table.route_counters_mut(exit).xmit_all_paths += 1;
		if is_base_lid
		{
			table.route_counters_mut(exit).xmit_base_paths += 1;
		}
	}
	Ok(())
}

/// Tabulates every path (one per LMC-expanded DLID) from `port1` to
/// `port2`, returning `(total_paths, bad_paths)`. `Err(Error::Unavailable)`
/// aborts immediately, without finishing the remaining offsets, mirroring
/// the original's "a missing LFT makes the whole fabric snapshot
/// untrustworthy" stance.
pub fn tabulate_routes(fabric: &Fabric, table: &mut AnalysisTable, port1: PortId, port2: PortId, fat_tree: bool, max_hops: usize) -> Result<(u64, u64)>
{
	let port2_data = fabric.port(port2).ok_or(Error::InvalidParameter)?;
	let dlid_base = port2_data.base_lid;
	let mask = port2_data.lid_mask();

	let mut total_paths = 0u64;
	let mut bad_paths = 0u64;

	for offset in 0..=mask
	{
		let is_base_lid = offset == 0;
		let result = walk_route_port(fabric, port1, dlid_base | offset, max_hops, &mut |entry, exit| tabulate_callback(fabric, table, entry, exit, is_base_lid, fat_tree));
		match result
		{
			Ok(()) => {}
			Err(Error::Unavailable) => return Err(Error::Unavailable),
			Err(_) => bad_paths += 1,
		}
		total_paths += 1;
	}
	Ok((total_paths, bad_paths))
}

/// Tabulates all routes between distinct host-interface ports (same-node
/// pairs are included; only exact loopback, `port1 == port2`, is skipped),
/// returning `(total_paths, bad_paths)` summed over every pair. Clears
/// `table` first, and runs [`crate::tier::determine_switch_tiers`] when
/// `fat_tree` is set.
pub fn tabulate_ca_routes(fabric: &Fabric, table: &mut AnalysisTable, fat_tree: bool, max_hops: usize) -> Result<(u64, u64)>
{
	table.clear();
	if fat_tree
	{
		crate::tier::determine_switch_tiers(fabric, table);
	}

	let mut total_paths = 0u64;
	let mut bad_paths = 0u64;

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
			let (paths, bad) = tabulate_routes(fabric, table, port1, port2, fat_tree, max_hops)?;
			total_paths += paths;
			bad_paths += bad;
		}
	}
	Ok((total_paths, bad_paths))
}
