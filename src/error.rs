/*!

The closed error taxonomy shared by every fallible operation in the analysis
core. There is no `Success` variant: a function that can fail returns
`Result<T, Error>` and success is simply `Ok`.

*/

use thiserror::Error;

/// Every way a route walk, an aggregation pass, or the credit-loop detector
/// can fail to produce a sound answer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error
{
	/// `walk_route` could not find a port holding the requested source LID.
	#[error("no port found for source LID {0}")]
	NotFound(u16),

	/// The route is a dead end, contains a loop, exceeds the hop bound, or
	/// arrives at the wrong destination port.
	#[error("route could not be completed (dead end, loop, or wrong destination)")]
	NotDone,

	/// Some switch traversed along the route has no linear forwarding table
	/// in the snapshot; the analysis would be unsound to continue.
	#[error("a linear forwarding table is unavailable along the path")]
	Unavailable,

	/// The caller passed a port that must be a host interface but is not
	/// (typically a non-zero switch port).
	#[error("operation requires a host interface port")]
	InvalidParameter,

	/// A trace or path buffer could not grow to hold another record.
	#[error("allocation failed while building trace/path records")]
	InsufficientMemory,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
