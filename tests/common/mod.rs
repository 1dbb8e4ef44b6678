//! Fabric-snapshot fixtures shared by the black-box integration tests.
//!
//! These build the same handful of topologies the unit tests colocated
//! with each module use (see `src/fabric/test_support.rs`), but through
//! the crate's public API only, since integration tests live in a
//! separate crate and cannot reach `#[cfg(test)]` items in the library.

use fabric_route_analysis::fabric::{Fabric, NodeType, Port, PortId, PortState, SwitchData};

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

/// HI₁(LID 1) <-> SW.p1, SW.p2 <-> HI₂(LID 2); SW.LFT[2]=2, LFT[1]=1.
pub fn host_switch_host() -> Fabric
{
	host_switch_host_with_lft(vec![0, 1, 2])
}

/// Same topology as [`host_switch_host`] but DLID 2 has no forwarding entry.
pub fn host_switch_host_dead_lft() -> Fabric
{
	host_switch_host_with_lft(vec![0, 1, fabric_route_analysis::fabric::LFT_NO_ROUTE])
}

/// HI₁(LID 1) <-> SW.p1, SW.p2 <-> HI₂(base LID 2, LMC 1: covers LIDs 2-3).
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

	let mut lft_a = vec![0u8; 11];
	lft_a[10] = 2; // SW_A forwards DLID 10 out port 2, toward SW_B
	fabric.set_switch_data(sw_a, SwitchData::new(lft_a));

	let mut lft_b = vec![0u8; 11];
	lft_b[10] = 1; // SW_B forwards DLID 10 back out port 1, toward SW_A
	fabric.set_switch_data(sw_b, SwitchData::new(lft_b));

	fabric
}

/// Four switches in a ring, each with one host interface attached, each
/// forwarding every non-local DLID straight around the ring, so every
/// cross-ring route's intra-switch hop is the same `in_port -> out_port`
/// pair, and the whole ring forms exactly one credit cycle.
pub fn four_switch_ring() -> Fabric
{
	let mut fabric = Fabric::new();
	let mut hosts = Vec::new();
	let mut switches = Vec::new();
	for i in 0..4
	{
		let hi = fabric.add_node(100 + i as u64, NodeType::HostInterface, format!("HI{i}"));
		fabric.add_port(hi, Port{ port_num: 1, port_guid: 1000 + i as u64, subnet_prefix: 0, base_lid: 1 + i as u16, lmc: 0, state: PortState::Active, neighbor: None });
		hosts.push(hi);

		let sw = fabric.add_node(200 + i as u64, NodeType::Switch, format!("SW{i}"));
		fabric.add_port(sw, Port{ port_num: 0, port_guid: 2000 + i as u64, subnet_prefix: 0, base_lid: 0, lmc: 0, state: PortState::Active, neighbor: None });
		fabric.add_port(sw, Port{ port_num: 1, port_guid: 2100 + i as u64, subnet_prefix: 0, base_lid: 0, lmc: 0, state: PortState::Active, neighbor: None }); // toward the host
		fabric.add_port(sw, Port{ port_num: 2, port_guid: 2200 + i as u64, subnet_prefix: 0, base_lid: 0, lmc: 0, state: PortState::Active, neighbor: None }); // toward the previous switch
		fabric.add_port(sw, Port{ port_num: 3, port_guid: 2300 + i as u64, subnet_prefix: 0, base_lid: 0, lmc: 0, state: PortState::Active, neighbor: None }); // toward the next switch
		switches.push(sw);

		fabric.link(PortId::new(hi, 1), PortId::new(sw, 1));
	}
	for i in 0..4
	{
		let next = (i + 1) % 4;
		fabric.link(PortId::new(switches[i], 3), PortId::new(switches[next], 2));
	}

	for (i, &sw) in switches.iter().enumerate()
	{
		let local_lid = 1 + i as u16;
		let mut lft = vec![3u8; 8];
		lft[local_lid as usize] = 1;
		fabric.set_switch_data(sw, SwitchData::new(lft));
	}
	fabric
}

/// A two-tier fat tree: two leaf switches each homing two hosts, joined by
/// one spine switch. Leaf switch port 1-2 go to hosts, port 3 goes to the
/// spine; hosts are assigned LIDs 1-4 in leaf/host order.
pub fn small_fat_tree() -> Fabric
{
	let mut fabric = Fabric::new();
	let spine = fabric.add_node(900, NodeType::Switch, "SPINE");
	fabric.add_port(spine, Port{ port_num: 0, port_guid: 9000, subnet_prefix: 0, base_lid: 0, lmc: 0, state: PortState::Active, neighbor: None });
	fabric.add_port(spine, Port{ port_num: 1, port_guid: 9001, subnet_prefix: 0, base_lid: 0, lmc: 0, state: PortState::Active, neighbor: None });
	fabric.add_port(spine, Port{ port_num: 2, port_guid: 9002, subnet_prefix: 0, base_lid: 0, lmc: 0, state: PortState::Active, neighbor: None });

	const TOTAL_HOSTS: u16 = 4;
	let mut host_lid = 1u16;
	let mut leaf_local_lids = Vec::new(); // leaf index -> (lid, port) pairs homed there
	for leaf_index in 0..2u64
	{
		let leaf = fabric.add_node(800 + leaf_index, NodeType::Switch, format!("LEAF{leaf_index}"));
		fabric.add_port(leaf, Port{ port_num: 0, port_guid: 8000 + leaf_index, subnet_prefix: 0, base_lid: 0, lmc: 0, state: PortState::Active, neighbor: None });
		let mut local = Vec::new();
		for host_index in 0..2u64
		{
			let hi = fabric.add_node(700 + host_lid as u64, NodeType::HostInterface, format!("HI{leaf_index}_{host_index}"));
			fabric.add_port(hi, Port{ port_num: 1, port_guid: 7000 + host_lid as u64, subnet_prefix: 0, base_lid: host_lid, lmc: 0, state: PortState::Active, neighbor: None });
			let leaf_port = 1 + host_index as u8;
			fabric.add_port(leaf, Port{ port_num: leaf_port, port_guid: 8100 + leaf_index * 10 + host_index, subnet_prefix: 0, base_lid: 0, lmc: 0, state: PortState::Active, neighbor: None });
			fabric.link(PortId::new(hi, 1), PortId::new(leaf, leaf_port));
			local.push((host_lid, leaf_port));
			host_lid += 1;
		}
		fabric.add_port(leaf, Port{ port_num: 3, port_guid: 8200 + leaf_index, subnet_prefix: 0, base_lid: 0, lmc: 0, state: PortState::Active, neighbor: None });
		fabric.link(PortId::new(leaf, 3), PortId::new(spine, 1 + leaf_index as u8));
		leaf_local_lids.push((leaf, local));
	}
	assert_eq!(host_lid, TOTAL_HOSTS + 1);

	for (leaf, local) in &leaf_local_lids
	{
		let mut leaf_lft = vec![3u8; (TOTAL_HOSTS + 1) as usize]; // default: up to the spine
		for &(lid, port) in local
		{
			leaf_lft[lid as usize] = port;
		}
		fabric.set_switch_data(*leaf, SwitchData::new(leaf_lft));
	}

	let mut spine_lft = vec![0u8; (TOTAL_HOSTS + 1) as usize];
	for lid in 1..=TOTAL_HOSTS
	{
		spine_lft[lid as usize] = if lid <= 2 { 1 } else { 2 };
	}
	fabric.set_switch_data(spine, SwitchData::new(spine_lft));

	fabric
}
