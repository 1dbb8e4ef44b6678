/*!

Fabric-snapshot fixtures shared by the unit tests colocated with each
module. The integration tests under `tests/` build their own copies of
these directly against the public `Fabric` API (see `tests/common/mod.rs`),
since they sit in a separate crate and cannot reach `#[cfg(test)]` items
here.

*/
#![cfg(test)]

use super::{Fabric, NodeType, Port, PortId, PortState, SwitchData};

/// HI₁(port 1, LID 1) <-> HI₂(port 1, LID 2), directly linked.
pub fn two_hosts_direct() -> Fabric
{
	let mut fabric = Fabric::new();
	let hi1 = fabric.add_node(1, NodeType::HostInterface, "HI1");
	let hi2 = fabric.add_node(2, NodeType::HostInterface, "HI2");
	fabric.add_port(hi1, Port{ port_num: 1, port_guid: 101, subnet_prefix: 0, base_lid: 1, lmc: 0, state: PortState::Active, neighbor: None });
	fabric.add_port(hi2, Port{ port_num: 1, port_guid: 201, subnet_prefix: 0, base_lid: 2, lmc: 0, state: PortState::Active, neighbor: None });
	fabric.link(PortId::new(hi1, 1), PortId::new(hi2, 1));
	fabric
}

/// HI₁(LID 1) <-> SW.p1, SW.p2 <-> HI₂(LID 2); SW.LFT[2]=2, LFT[1]=1.
pub fn host_switch_host() -> Fabric
{
	host_switch_host_with_lft(vec![0, 1, 2])
}

/// Same topology as [`host_switch_host`] but DLID 2 has no route.
pub fn host_switch_host_dead_lft() -> Fabric
{
	host_switch_host_with_lft(vec![0, 1, super::LFT_NO_ROUTE])
}

fn host_switch_host_with_lft(lft: Vec<u8>) -> Fabric
{
	let mut fabric = Fabric::new();
	let hi1 = fabric.add_node(1, NodeType::HostInterface, "HI1");
	let sw = fabric.add_node(2, NodeType::Switch, "SW");
	let hi2 = fabric.add_node(3, NodeType::HostInterface, "HI2");

	fabric.add_port(hi1, Port{ port_num: 1, port_guid: 101, subnet_prefix: 0, base_lid: 1, lmc: 0, state: PortState::Active, neighbor: None });
	fabric.add_port(sw, Port{ port_num: 0, port_guid: 200, subnet_prefix: 0, base_lid: 0, lmc: 0, state: PortState::Active, neighbor: None });
	fabric.add_port(sw, Port{ port_num: 1, port_guid: 201, subnet_prefix: 0, base_lid: 0, lmc: 0, state: PortState::Active, neighbor: None });
	fabric.add_port(sw, Port{ port_num: 2, port_guid: 202, subnet_prefix: 0, base_lid: 0, lmc: 0, state: PortState::Active, neighbor: None });
	fabric.add_port(hi2, Port{ port_num: 1, port_guid: 301, subnet_prefix: 0, base_lid: 2, lmc: 0, state: PortState::Active, neighbor: None });

	fabric.link(PortId::new(hi1, 1), PortId::new(sw, 1));
	fabric.link(PortId::new(sw, 2), PortId::new(hi2, 1));
	fabric.set_switch_data(sw, SwitchData::new(lft));
	fabric
}

/// HI₁(LID 1) -> SW_A -> SW_B -> SW_A -> ... a route to DLID 10 that loops
/// forever between two switches that each forward DLID 10 back to the other.
pub fn two_switch_loop() -> Fabric
{
	let mut fabric = Fabric::new();
	let hi1 = fabric.add_node(1, NodeType::HostInterface, "HI1");
	let sw_a = fabric.add_node(2, NodeType::Switch, "SW_A");
	let sw_b = fabric.add_node(3, NodeType::Switch, "SW_B");

	fabric.add_port(hi1, Port{ port_num: 1, port_guid: 101, subnet_prefix: 0, base_lid: 1, lmc: 0, state: PortState::Active, neighbor: None });

	fabric.add_port(sw_a, Port{ port_num: 0, port_guid: 200, subnet_prefix: 0, base_lid: 0, lmc: 0, state: PortState::Active, neighbor: None });
	fabric.add_port(sw_a, Port{ port_num: 1, port_guid: 201, subnet_prefix: 0, base_lid: 0, lmc: 0, state: PortState::Active, neighbor: None });
	fabric.add_port(sw_a, Port{ port_num: 2, port_guid: 202, subnet_prefix: 0, base_lid: 0, lmc: 0, state: PortState::Active, neighbor: None });

	fabric.add_port(sw_b, Port{ port_num: 0, port_guid: 300, subnet_prefix: 0, base_lid: 0, lmc: 0, state: PortState::Active, neighbor: None });
	fabric.add_port(sw_b, Port{ port_num: 1, port_guid: 301, subnet_prefix: 0, base_lid: 0, lmc: 0, state: PortState::Active, neighbor: None });

	fabric.link(PortId::new(hi1, 1), PortId::new(sw_a, 1));
	fabric.link(PortId::new(sw_a, 2), PortId::new(sw_b, 1));

	// DLID 10 bounces back and forth between the two switches forever.
	let mut lft_a = vec![0u8; 11];
	lft_a[10] = 2; // SW_A forwards DLID 10 out port 2, toward SW_B
	fabric.set_switch_data(sw_a, SwitchData::new(lft_a));

	let mut lft_b = vec![0u8; 11];
	lft_b[10] = 1; // SW_B forwards DLID 10 back out port 1, toward SW_A
	fabric.set_switch_data(sw_b, SwitchData::new(lft_b));

	fabric
}

/// HI₁(LID 1) <-> SW.p1, SW.p2 <-> HI₂(base LID 2, LMC 1: covers 2 and 3).
pub fn host_switch_host_lmc1() -> Fabric
{
	let mut fabric = Fabric::new();
	let hi1 = fabric.add_node(1, NodeType::HostInterface, "HI1");
	let sw = fabric.add_node(2, NodeType::Switch, "SW");
	let hi2 = fabric.add_node(3, NodeType::HostInterface, "HI2");

	fabric.add_port(hi1, Port{ port_num: 1, port_guid: 101, subnet_prefix: 0, base_lid: 1, lmc: 0, state: PortState::Active, neighbor: None });
	fabric.add_port(sw, Port{ port_num: 0, port_guid: 200, subnet_prefix: 0, base_lid: 0, lmc: 0, state: PortState::Active, neighbor: None });
	fabric.add_port(sw, Port{ port_num: 1, port_guid: 201, subnet_prefix: 0, base_lid: 0, lmc: 0, state: PortState::Active, neighbor: None });
	fabric.add_port(sw, Port{ port_num: 2, port_guid: 202, subnet_prefix: 0, base_lid: 0, lmc: 0, state: PortState::Active, neighbor: None });
	fabric.add_port(hi2, Port{ port_num: 1, port_guid: 301, subnet_prefix: 0, base_lid: 2, lmc: 1, state: PortState::Active, neighbor: None });

	fabric.link(PortId::new(hi1, 1), PortId::new(sw, 1));
	fabric.link(PortId::new(sw, 2), PortId::new(hi2, 1));
	fabric.set_switch_data(sw, SwitchData::new(vec![0, 1, 2, 2]));
	fabric
}
