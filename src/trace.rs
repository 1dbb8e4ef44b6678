/*!

Building a structured trace, one [`TraceRecord`] per device visited, from a
route walk.

*/

use crate::error::{Error, Result};
use crate::fabric::{Fabric, Guid, Lid, NodeType, PortId};
use crate::walker::{walk_route, walk_route_port};

/// One device's worth of a traced route, in the same shape an `STL_TRACE_RECORD`
/// from the subnet manager would take.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraceRecord
{
	pub node_type: NodeType,
	pub node_guid: Guid,
	/// System image (chassis) GUID of the traversed node.
	pub chassis_guid: Guid,
	/// Entry port's GUID, or 0 if this record has no entry port (the
	/// originating host interface).
	pub entry_port_id: Guid,
	/// Exit port's GUID, or 0 if this record has no exit port (the
	/// terminal host interface).
	pub exit_port_id: Guid,
	/// Entry port number, or 0 if there is no entry port.
	pub entry_port: u8,
	/// Exit port number, or 0 if there is no exit port.
	pub exit_port: u8,
}

fn push_record(records: &mut Vec<TraceRecord>, fabric: &Fabric, entry: Option<PortId>, exit: Option<PortId>) -> Result<()>
{
	let node_index = entry.or(exit).expect("callback invoked with both ports empty").node;
	let node = fabric.node(node_index);

	records.try_reserve(1).map_err(|_| Error::InsufficientMemory)?;
	records.push(TraceRecord{
		node_type: node.node_type,
		node_guid: node.guid,
		chassis_guid: node.guid,
		entry_port_id: entry.and_then(|p| fabric.port(p)).map_or(0, |p| p.port_guid),
		exit_port_id: exit.and_then(|p| fabric.port(p)).map_or(0, |p| p.port_guid),
		entry_port: entry.map_or(0, |p| p.port),
		exit_port: exit.map_or(0, |p| p.port),
	});
	Ok(())
}

/// Generates the trace for the route from `start_port` to `dlid`.
pub fn gen_trace_route_port(fabric: &Fabric, start_port: PortId, dlid: Lid, max_hops: usize) -> Result<Vec<TraceRecord>>
{
	let mut records = Vec::new();
	walk_route_port(fabric, start_port, dlid, max_hops, &mut |entry, exit| push_record(&mut records, fabric, entry, exit))?;
	Ok(records)
}

/// Generates the trace for the route from `slid` to `dlid`.
pub fn gen_trace_route(fabric: &Fabric, slid: Lid, dlid: Lid, max_hops: usize) -> Result<Vec<TraceRecord>>
{
	let mut records = Vec::new();
	walk_route(fabric, slid, dlid, max_hops, &mut |entry, exit| push_record(&mut records, fabric, entry, exit))?;
	Ok(records)
}
