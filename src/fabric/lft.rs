/*!

Resolving `(switch, dlid) -> exit port` through a switch's linear
forwarding table, with the port-viability checks the route walker relies on
so it never has to re-derive them.

*/

use super::{Fabric, Lid, PortId};

/// Looks up the port a switch would use to forward `dlid`, applying every
/// viability rule: the DLID must be in range and not marked "no route", the
/// looked-up port must exist and be initialized, and (unless it is port 0)
/// it must have a neighbor.
///
/// Returns `None` for any of:
/// - `dlid` is zero or the switch has no forwarding table entry for it,
/// - the LFT entry is the `0xFF` "no route" sentinel,
/// - the named port does not exist on the switch,
/// - the named port is not initialized,
/// - the named port is non-zero and has no neighbor.
///
/// Analysis targets data-path viability only: VL15 management traffic can
/// route through an `Init` port, but that is not a route worth reporting
/// here.
pub fn lookup_lft(fabric: &Fabric, node: usize, dlid: Lid) -> Option<PortId>
{
	let switch = fabric.node(node);
	let switch_data = switch.switch_data.as_ref()?;
	let port_num = switch_data.route(dlid)?;
	let port = switch.port(port_num)?;
	if !port.state.is_initialized()
	{
		return None;
	}
	if port_num != 0 && port.neighbor.is_none()
	{
		return None;
	}
	Some(PortId::new(node, port_num))
}
