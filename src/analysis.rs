/*!

The analysis side-table: per-port route-tabulation counters and per-node
fat-tree tiers, held apart from [`crate::fabric::Fabric`] so the fabric
snapshot itself stays immutable.

*/

use std::collections::HashMap;

use crate::fabric::{Fabric, NodeType, PortId};

/// Generic (non-fat-tree) route counters for one port.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RouteCounters
{
	pub recv_all_paths: u64,
	pub recv_base_paths: u64,
	pub xmit_all_paths: u64,
	pub xmit_base_paths: u64,
}

/// Fat-tree route counters for one port.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FatTreeRouteCounters
{
	pub uplink_all_paths: u64,
	pub uplink_base_paths: u64,
	pub downlink_all_paths: u64,
	pub downlink_base_paths: u64,
}

/// Per-port and per-node state accumulated across a tabulation pass. Keyed
/// by [`PortId`] and node index rather than stored on `Port`/`Node`
/// themselves, so a `Fabric` can be tabulated repeatedly, or concurrently
/// under different configurations, without interior mutability anywhere in
/// the snapshot.
#[derive(Clone, Debug, Default)]
pub struct AnalysisTable
{
	routes: HashMap<PortId, RouteCounters>,
	fat_tree_routes: HashMap<PortId, FatTreeRouteCounters>,
	tiers: HashMap<usize, u32>,
}

impl AnalysisTable
{
	pub fn new() -> AnalysisTable
	{
		AnalysisTable::default()
	}

	/// Drops all accumulated counters and tiers, as if freshly constructed.
	pub fn clear(&mut self)
	{
		self.routes.clear();
		self.fat_tree_routes.clear();
		self.tiers.clear();
	}

	pub fn route_counters(&self, port: PortId) -> RouteCounters
	{
		self.routes.get(&port).copied().unwrap_or_default()
	}

	pub fn fat_tree_route_counters(&self, port: PortId) -> FatTreeRouteCounters
	{
		self.fat_tree_routes.get(&port).copied().unwrap_or_default()
	}

	pub(crate) fn route_counters_mut(&mut self, port: PortId) -> &mut RouteCounters
	{
		self.routes.entry(port).or_default()
	}

	pub(crate) fn fat_tree_route_counters_mut(&mut self, port: PortId) -> &mut FatTreeRouteCounters
	{
		self.fat_tree_routes.entry(port).or_default()
	}

	/// The fat-tree tier assigned to a node, or `None` if it hasn't been
	/// reached by [`crate::tier::determine_switch_tiers`] (unconnected, or
	/// not a switch).
	pub fn tier(&self, node: usize) -> Option<u32>
	{
		self.tiers.get(&node).copied()
	}

	pub(crate) fn set_tier(&mut self, node: usize, tier: u32)
	{
		self.tiers.insert(node, tier);
	}

	pub(crate) fn has_tier(&self, node: usize) -> bool
	{
		self.tiers.contains_key(&node)
	}
}

/// Whether `exit_port`'s hop should be counted as an uplink (towards the
/// spine, i.e. a higher tier) or a downlink, per the fat-tree tabulation
/// convention: a port whose neighbor is unreached or at the same-or-lower
/// tier counts as a downlink.
pub(crate) fn is_uplink(fabric: &Fabric, table: &AnalysisTable, exit_port: PortId) -> bool
{
	let Some(port) = fabric.port(exit_port) else { return false };
	let Some(neighbor) = port.neighbor else { return false };
	if fabric.node(neighbor.node).node_type != NodeType::Switch
	{
		return false;
	}
	let this_tier = table.tier(exit_port.node).unwrap_or(0);
	let neighbor_tier = table.tier(neighbor.node).unwrap_or(0);
	this_tier < neighbor_tier
}
