/*!

Fat-tree tier classification.

Assigns each switch a tier by breadth-first fixed point: switches directly
connected to a host interface are tier 1; a switch connected to a tier *N*
switch (and not yet assigned) becomes tier *N+1*. Host interfaces themselves
are never assigned a tier. Switches unreachable from any host interface
(disconnected, or only reachable through other untiered switches) are left
unassigned.

*/

use crate::analysis::AnalysisTable;
use crate::fabric::{Fabric, NodeType};

/// Computes fat-tree tiers for every switch in `fabric`, recording them into
/// `table`. Safe to call more than once; each call starts from whatever
/// tiers are already set (call [`AnalysisTable::clear`] first for a clean
/// re-run).
pub fn determine_switch_tiers(fabric: &Fabric, table: &mut AnalysisTable)
{
	for (_, node) in fabric.host_interfaces()
	{
		for port in node.ports_iter()
		{
			if let Some(neighbor) = port.neighbor
			{
				if fabric.node(neighbor.node).node_type == NodeType::Switch
				{
					table.set_tier(neighbor.node, 1);
				}
			}
		}
	}

	let mut tier = 2;
	loop
	{
		let mut found = false;
		for (switch_index, node) in fabric.switches()
		{
			if table.tier(switch_index) != Some(tier - 1)
			{
				continue;
			}
			for port in node.ports_iter()
			{
				if let Some(neighbor) = port.neighbor
				{
					if fabric.node(neighbor.node).node_type == NodeType::Switch && !table.has_tier(neighbor.node)
					{
						table.set_tier(neighbor.node, tier);
						found = true;
					}
				}
			}
		}
		if !found
		{
			break;
		}
		tier += 1;
	}
}
