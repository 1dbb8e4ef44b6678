/*!

A minimal injectable clock and progress sink.

A global, lock-guarded time source is a concession to a specific runtime
that doesn't belong in a reusable contract. The contract here is just
"monotonic microseconds"; callers that need their own synchronization
around a shared clock are free to add it behind the trait.

*/

use std::time::Instant;

/// Source of monotonic microsecond timestamps, injected so the credit-loop
/// detector's elapsed-time instrumentation does not depend on a concrete
/// clock implementation.
pub trait Clock
{
	/// Current time in microseconds since some unspecified epoch. Only
	/// differences between two calls are meaningful.
	fn now_micros(&self) -> u64;
}

/// Default `Clock` backed by `std::time::Instant`.
#[derive(Debug)]
pub struct SystemClock
{
	origin: Instant,
}

impl SystemClock
{
	pub fn new() -> SystemClock
	{
		SystemClock{ origin: Instant::now() }
	}
}

impl Default for SystemClock
{
	fn default() -> Self
	{
		SystemClock::new()
	}
}

impl Clock for SystemClock
{
	fn now_micros(&self) -> u64
	{
		self.origin.elapsed().as_micros() as u64
	}
}

/// Sink for the periodic "Processed X of Y Nodes..." progress reports the
/// credit-loop detector emits at low verbosity. The default implementation
/// just logs through the `log` facade; callers wanting a terminal progress
/// bar or a UI hook can supply their own.
pub trait ProgressSink
{
	fn report(&mut self, processed: usize, total: usize);
}

/// `ProgressSink` that logs through the `log` crate at `info` level.
#[derive(Debug, Default)]
pub struct LoggingProgressSink;

impl ProgressSink for LoggingProgressSink
{
	fn report(&mut self, processed: usize, total: usize)
	{
		log::info!("Processed {:6} of {:6} Nodes...", processed, total);
	}
}

/// Renders a `now_micros()` difference the way the credit-loop detector's
/// verbose build/validation markers want it: seconds with millisecond
/// precision for anything over a second, plain microseconds below that.
pub fn format_elapsed(micros: u64) -> String
{
	let duration = chrono::Duration::microseconds(micros as i64);
	if duration >= chrono::Duration::seconds(1)
	{
		format!("{:.3}s", duration.num_milliseconds() as f64 / 1000.0)
	}
	else
	{
		format!("{}us", micros)
	}
}
