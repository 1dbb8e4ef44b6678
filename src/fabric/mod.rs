/*!

The fabric snapshot: nodes, ports, links, and per-switch linear forwarding
tables. This module is the read view and data model the rest of the crate
operates over.

A `Fabric` is plain, immutable data once built: neighbor links are stored as
[`PortId`] handles (node index + port number) rather than pointers, the same
way the topology this crate was adapted from addresses routers by index
instead of by reference. Per-port and per-node analysis results (tabulation
counters, fat-tree tiers) are *not* stored here; see
[`crate::analysis::AnalysisTable`]. This keeps the snapshot read-only and
shareable across independent, possibly concurrent, analyses.

*/

pub mod lft;
#[cfg(test)]
pub mod test_support;

use std::collections::BTreeMap;

/// A 64-bit globally unique identifier, shared by nodes and ports.
pub type Guid = u64;

/// A 16-bit Local IDentifier.
pub type Lid = u16;

/// What kind of device a [`Node`] is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeType
{
	/// A Host (Fabric/Channel) Interface: an end-node port.
	HostInterface,
	/// A switch, carrying a linear forwarding table.
	Switch,
}

/// Port state, ordered so that `state >= Initialize` is the "viable hop"
/// check the walker and the LFT lookup both rely on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PortState
{
	Down,
	Init,
	Armed,
	Active,
}

impl PortState
{
	/// Only ports whose state has reached `Init` or later are viable hops.
	pub fn is_initialized(self) -> bool
	{
		self >= PortState::Init
	}
}

/// A handle to one port: which node owns it, and its local port number.
/// Port 0 on a switch is the virtual management port; physical ports start
/// at 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PortId
{
	pub node: usize,
	pub port: u8,
}

impl PortId
{
	pub fn new(node: usize, port: u8) -> PortId
	{
		PortId{ node, port }
	}
}

/// A switch's linear forwarding table: for each DLID in `[1, linear_fdb_size)`
/// the exit port number, or `0xFF` meaning "no route".
#[derive(Clone, Debug)]
pub struct SwitchData
{
	pub linear_fdb_size: u32,
	lft: Vec<u8>,
}

/// Sentinel LFT byte meaning "no route programmed for this DLID".
pub const LFT_NO_ROUTE: u8 = 0xFF;

impl SwitchData
{
	/// Builds a switch's forwarding table from one exit-port byte per DLID.
	/// `lft[0]` is unused (DLID 0 never routes) but kept so indices line up
	/// directly with DLIDs.
	pub fn new(lft: Vec<u8>) -> SwitchData
	{
		SwitchData{ linear_fdb_size: lft.len() as u32, lft }
	}

	/// Raw table lookup: the exit port number programmed for `dlid`, or
	/// `None` if `dlid` is out of the table's range or the entry is
	/// `LFT_NO_ROUTE`. Does not check port viability; see
	/// [`lft::lookup_lft`] for the full rule including port state/neighbor
	/// checks.
	pub fn route(&self, dlid: Lid) -> Option<u8>
	{
		if dlid == 0 || (dlid as u32) >= self.linear_fdb_size
		{
			return None;
		}
		let exit = self.lft[dlid as usize];
		if exit == LFT_NO_ROUTE
		{
			None
		}
		else
		{
			Some(exit)
		}
	}
}

/// One port on a [`Node`]: its addressing, link-control state, and (if any)
/// the far end of the physical link it terminates.
#[derive(Clone, Debug)]
pub struct Port
{
	pub port_num: u8,
	pub port_guid: Guid,
	pub subnet_prefix: u64,
	pub base_lid: Lid,
	/// LID Mask Control, 0-7: this port answers to the `2^lmc` consecutive
	/// LIDs starting at `base_lid`.
	pub lmc: u8,
	pub state: PortState,
	/// The port at the far end of this link, if any. Switch port 0 never
	/// has one; every other viable hop must.
	pub neighbor: Option<PortId>,
}

impl Port
{
	/// The highest LID this port answers to, inclusive.
	pub fn lid_mask(&self) -> Lid
	{
		(1u16 << self.lmc) - 1
	}

	/// Whether `dlid` falls in this port's LMC-expanded LID range.
	pub fn covers_lid(&self, dlid: Lid) -> bool
	{
		self.base_lid != 0 && dlid >= self.base_lid && dlid <= (self.base_lid | self.lid_mask())
	}
}

/// A fabric device: either a host interface or a switch.
#[derive(Clone, Debug)]
pub struct Node
{
	pub guid: Guid,
	pub node_type: NodeType,
	pub description: String,
	ports: BTreeMap<u8, Port>,
	pub switch_data: Option<SwitchData>,
}

impl Node
{
	pub fn port(&self, port_num: u8) -> Option<&Port>
	{
		self.ports.get(&port_num)
	}

	pub fn ports_iter(&self) -> impl Iterator<Item = &Port>
	{
		self.ports.values()
	}

	pub fn port_count(&self) -> usize
	{
		self.ports.len()
	}
}

/// A complete fabric snapshot: every node, its ports, and the links between
/// them. Built once by an external collaborator (the subnet-administration
/// query client or a snapshot-file reader, both out of scope here) and held
/// read-only for the lifetime of any analysis.
#[derive(Clone, Debug, Default)]
pub struct Fabric
{
	nodes: Vec<Node>,
}

impl Fabric
{
	pub fn new() -> Fabric
	{
		Fabric{ nodes: Vec::new() }
	}

	/// Appends a new node, returning its index for use in `PortId`s.
	pub fn add_node(&mut self, guid: Guid, node_type: NodeType, description: impl Into<String>) -> usize
	{
		self.nodes.push(Node{
			guid,
			node_type,
			description: description.into(),
			ports: BTreeMap::new(),
			switch_data: None,
		});
		self.nodes.len() - 1
	}

	/// Adds (or replaces) a port on an already-added node.
	pub fn add_port(&mut self, node: usize, port: Port)
	{
		self.nodes[node].ports.insert(port.port_num, port);
	}

	/// Installs the linear forwarding table for a switch node.
	pub fn set_switch_data(&mut self, node: usize, switch_data: SwitchData)
	{
		self.nodes[node].switch_data = Some(switch_data);
	}

	/// Links two ports as each other's neighbor. Idempotent; pass the same
	/// pair twice and the second call just re-sets the same links.
	pub fn link(&mut self, a: PortId, b: PortId)
	{
		if let Some(port) = self.nodes[a.node].ports.get_mut(&a.port)
		{
			port.neighbor = Some(b);
		}
		if let Some(port) = self.nodes[b.node].ports.get_mut(&b.port)
		{
			port.neighbor = Some(a);
		}
	}

	pub fn node(&self, index: usize) -> &Node
	{
		&self.nodes[index]
	}

	/// Linear scan for the node owning `guid`. Used by the credit-loop
	/// detector to recover a [`PortId`]'s node index from a
	/// [`crate::trace::TraceRecord`]'s GUID, which is all a trace record
	/// carries. Fabric snapshots are analyzed, not queried at wire speed, so
	/// this need not be indexed.
	pub fn find_node_by_guid(&self, guid: Guid) -> Option<usize>
	{
		self.nodes.iter().position(|n| n.guid == guid)
	}

	pub fn node_count(&self) -> usize
	{
		self.nodes.len()
	}

	pub fn nodes(&self) -> impl Iterator<Item = (usize, &Node)>
	{
		self.nodes.iter().enumerate()
	}

	pub fn host_interfaces(&self) -> impl Iterator<Item = (usize, &Node)>
	{
		self.nodes().filter(|(_, n)| n.node_type == NodeType::HostInterface)
	}

	pub fn switches(&self) -> impl Iterator<Item = (usize, &Node)>
	{
		self.nodes().filter(|(_, n)| n.node_type == NodeType::Switch)
	}

	pub fn port(&self, id: PortId) -> Option<&Port>
	{
		self.nodes.get(id.node)?.port(id.port)
	}

	pub fn find_node_port(&self, node: usize, port_num: u8) -> Option<PortId>
	{
		self.nodes.get(node)?.port(port_num)?;
		Some(PortId::new(node, port_num))
	}

	/// The far end of a link, if the port exists and has a neighbor.
	pub fn neighbor(&self, id: PortId) -> Option<PortId>
	{
		self.port(id)?.neighbor
	}

	/// Finds the port whose LMC-expanded LID range contains `lid`. Host
	/// interface ports and switch port 0 are the only ports that carry a
	/// LID; a linear scan is sufficient here since fabric snapshots are
	/// analyzed, not queried at wire speed.
	pub fn find_lid(&self, lid: Lid) -> Option<PortId>
	{
		if lid == 0
		{
			return None;
		}
		for (node_index, node) in self.nodes()
		{
			for port in node.ports_iter()
			{
				if port.covers_lid(lid)
				{
					return Some(PortId::new(node_index, port.port_num));
				}
			}
		}
		None
	}
}
