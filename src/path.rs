/*!

Enumerating plausible LMC-expanded path records between two ports.

We don't know the subnet manager's path-selection policy, so, following the
same convention the route-walking logic assumes elsewhere, we just guess
`0-0, 1-1, ...`, corresponding to the "minimal" path-selection convention.
This is good enough for route analysis: only the DLID actually matters for
walking a route, and the SLID only selects which port we start from (which
this module does not even need, since the caller already has both ports in
hand).

*/

use crate::error::{Error, Result};
use crate::fabric::{Fabric, Guid, Lid, Port, PortId};

/// A synthesized path record between two ports. Fields other than the GIDs
/// and LIDs are sentinel zero values meaning "unknown"; this is not meant
/// to be placed on the wire, only consumed by the analysis core itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PathRecord
{
	pub sgid_prefix: u64,
	pub sgid_guid: Guid,
	pub dgid_prefix: u64,
	pub dgid_guid: Guid,
	pub slid: Lid,
	pub dlid: Lid,
}

fn make_path(p1: &Port, p2: &Port, slid: Lid, dlid: Lid) -> PathRecord
{
	PathRecord{
		sgid_prefix: p1.subnet_prefix,
		sgid_guid: p1.port_guid,
		dgid_prefix: p2.subnet_prefix,
		dgid_guid: p2.port_guid,
		slid,
		dlid,
	}
}

/// Enumerates path records from `port1` to `port2`. With LMC *L* on
/// `port1`, enumerates `2^L` pairs `(slid_base | i, dlid_base | i)` for
/// `i` in `[0, 2^L)`. Both offset masks come from `port1`'s own LMC, even
/// though `port2` may have a different LMC; this is intentional (see
/// DESIGN.md). Returns an empty vector, not an error, if either base LID is
/// zero (typically a non-port-0 switch port with no LID of its own).
pub fn gen_paths(fabric: &Fabric, port1: PortId, port2: PortId) -> Result<Vec<PathRecord>>
{
	let p1 = fabric.port(port1).ok_or(Error::InvalidParameter)?;
	let p2 = fabric.port(port2).ok_or(Error::InvalidParameter)?;

	if p1.base_lid == 0 || p2.base_lid == 0
	{
		return Ok(Vec::new());
	}

	let mask = p1.lid_mask();
	let mut records = Vec::new();
	records.try_reserve(mask as usize + 1).map_err(|_| Error::InsufficientMemory)?;
	for offset in 0..=mask
	{
		records.push(make_path(p1, p2, p1.base_lid | offset, p2.base_lid | offset));
	}
	Ok(records)
}
