/*!

Analysis configuration.

There is no file-backed configuration grammar here. Unlike the simulator
this crate was adapted from, there is no experiment-definition front-end in
scope. What the analysis core still needs is a small set of knobs: whether to
run in fat-tree mode, how many hops to allow before giving up on a route, how
often the credit-loop detector should report progress, and how chatty its
instrumentation should be. `AnalysisConfig` carries exactly those, built with
the same plain-struct-plus-method idiom used for builder arguments elsewhere
in this crate.

*/

/// The hop bound a route walk will tolerate before failing with
/// [`crate::error::Error::NotDone`].
pub const DEFAULT_MAX_HOPS: usize = 64;

/// Default cadence, in host-interface ports processed, for the credit-loop
/// detector's low-verbosity progress reports.
pub const DEFAULT_PROGRESS_FREQUENCY: usize = 1000;

/// How chatty the credit-loop detector's instrumentation should be.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity
{
	/// No progress output at all.
	Quiet,
	/// Periodic "Processed X of Y Nodes..." progress reports only.
	Normal,
	/// Start/end markers with elapsed microseconds around the build and the
	/// overall validation, plus per-device build markers.
	Detailed,
}

impl Default for Verbosity
{
	fn default() -> Self
	{
		Verbosity::Normal
	}
}

/// Options controlling a single analysis run.
#[derive(Clone, Debug)]
pub struct AnalysisConfig
{
	/// Whether up/down-link tabulation and reporting should classify hops by
	/// fat-tree tier instead of plain receive/transmit counters.
	pub fat_tree: bool,
	/// Hop bound for a single route walk.
	pub max_hops: usize,
	/// Progress cadence for the credit-loop detector, in HI ports processed.
	pub progress_frequency: usize,
	/// Instrumentation verbosity.
	pub verbosity: Verbosity,
}

impl Default for AnalysisConfig
{
	fn default() -> Self
	{
		AnalysisConfig{
			fat_tree: false,
			max_hops: DEFAULT_MAX_HOPS,
			progress_frequency: DEFAULT_PROGRESS_FREQUENCY,
			verbosity: Verbosity::default(),
		}
	}
}

impl AnalysisConfig
{
	pub fn new() -> AnalysisConfig
	{
		AnalysisConfig::default()
	}

	pub fn fat_tree(mut self, fat_tree: bool) -> Self
	{
		self.fat_tree = fat_tree;
		self
	}

	pub fn max_hops(mut self, max_hops: usize) -> Self
	{
		self.max_hops = max_hops;
		self
	}

	pub fn progress_frequency(mut self, progress_frequency: usize) -> Self
	{
		self.progress_frequency = progress_frequency;
		self
	}

	pub fn verbosity(mut self, verbosity: Verbosity) -> Self
	{
		self.verbosity = verbosity;
		self
	}
}
