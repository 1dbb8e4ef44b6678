/*!

The credit-loop detector, the deepest module in the crate.

Where the tabulator, reporter, and validator all express themselves as
[`crate::walker::walk_route_port`] callbacks, this detector bypasses the
walker's callback API once it has what it needs. It consumes
[`crate::path::gen_paths`] and [`crate::trace::gen_trace_route_port`] to
build its own transient channel-dependency graph, then runs four phases over
it: build, prune, split, and a hand-rolled Dijkstra cycle extraction.

The graph's vertices are directed physical channels, `(from_port, to_port)`
pairs spanning one link crossing, rather than whole devices or bare ports.
A dependency edge connects one channel to the next channel a route took
immediately afterward, which is exactly the classic channel-dependency-graph
formulation used to reason about credit/flow-control deadlock: a cycle in
this graph is a closed chain of "received here, forwarded there" decisions
that can never drain. Reporting a cycle's edges back out as
`(switch, in_port, out_port)` triples is then direct, since each edge's two
channel endpoints meet at exactly one device.

Modeling vertices as bare ports instead, with both directions of every
observed hop added as edges, was considered and rejected: a physical link is
genuinely bidirectional and deserves two distinct channel vertices, but an
intra-switch hop is not, and auto-adding its reverse manufactures a
two-vertex "cycle" out of any switch carrying any traffic at all.

*/

pub mod dijkstra;
pub mod split;

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};

use crate::clock::{Clock, ProgressSink};
use crate::config::{AnalysisConfig, Verbosity};
use crate::error::{Error, Result};
use crate::fabric::{Fabric, Guid, Lid, NodeType, PortId};
use crate::path::gen_paths;
use crate::trace::{gen_trace_route_port, TraceRecord};

/// Which (SLID, DLID) path produced an observed use of a dependency edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PathTag
{
	pub slid: Lid,
	pub dlid: Lid,
}

/// A directed physical channel: a route crosses link `from -> to`. This is
/// the dependency graph's vertex type. The two directions of one physical
/// link are two distinct channels; only the directions actually used by
/// some route ever become vertices.
pub type Channel = (PortId, PortId);

/// One directed edge of the channel-dependency graph: a route arrived on
/// `source`'s channel and was immediately forwarded out on `target`'s
/// channel. The two channels necessarily meet at one device, giving the
/// edge's reported `(switch, in_port, out_port)` triple; see
/// [`Cycle::from_channel_path`].
#[derive(Clone, Debug, Default)]
struct DependencyEdge
{
	paths: Vec<PathTag>,
}

/// The transient channel-dependency graph: built in Phase 1, pruned in
/// Phase 2, and split into weakly connected components in Phase 3. Owned
/// entirely by one [`validate_credit_loops`] call and dropped at the end of
/// it, along with any Dijkstra scratch: ordinary Rust ownership, no arena
/// or manual free path required.
pub struct DependencyGraph
{
	graph: DiGraph<Channel, DependencyEdge>,
	index: HashMap<Channel, NodeIndex>,
}

impl DependencyGraph
{
	fn new() -> DependencyGraph
	{
		DependencyGraph{ graph: DiGraph::new(), index: HashMap::new() }
	}

	fn ensure_node(&mut self, channel: Channel) -> NodeIndex
	{
		if let Some(&idx) = self.index.get(&channel)
		{
			return idx;
		}
		let idx = self.graph.add_node(channel);
		self.index.insert(channel, idx);
		idx
	}

	fn add_edge(&mut self, from: Channel, to: Channel, tag: PathTag)
	{
		let a = self.ensure_node(from);
		let b = self.ensure_node(to);
		if let Some(e) = self.graph.find_edge(a, b)
		{
			self.graph[e].paths.push(tag);
		}
		else
		{
			self.graph.add_edge(a, b, DependencyEdge{ paths: vec![tag] });
		}
	}

	pub fn node_count(&self) -> usize
	{
		self.graph.node_count()
	}

	pub fn edge_count(&self) -> usize
	{
		self.graph.edge_count()
	}

	/// Phase 2: iteratively removes any node whose in-degree or out-degree
	/// is zero, to a fixed point. A cycle cannot pass through such a node,
	/// so this shrinks the graph before Phase 4's all-pairs work. Pruning
	/// an already-pruned graph is a no-op.
	pub fn prune(&mut self)
	{
		loop
		{
			let mut changed = false;
			self.graph.retain_nodes(|g, idx| {
				let keep = g.neighbors_directed(idx, petgraph::Direction::Incoming).next().is_some()
					&& g.neighbors_directed(idx, petgraph::Direction::Outgoing).next().is_some();
				if !keep
				{
					changed = true;
				}
				keep
			});
			if !changed
			{
				break;
			}
		}
		self.index = self.graph.node_indices().map(|i| (self.graph[i], i)).collect();
	}
}

/// Normalized shape of a trace against the two host-interface endpoints it
/// should start and end on. The subnet manager this crate's trace format is
/// modeled on sometimes omits the originating or terminating hop; this
/// crate generates its own traces via [`crate::trace::gen_trace_route_port`]
/// and so never actually produces `MissingHead`/`MissingTail`; they are
/// kept for interface fidelity with that SM-ingestion scenario, and the
/// `Full` branch is the only one ever reached in practice here.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TraceShape
{
	Full,
	MissingHead,
	MissingTail,
}

fn classify_trace_shape(trace: &[TraceRecord]) -> Option<TraceShape>
{
	let first = trace.first()?;
	let last = trace.last()?;
	Some(match (first.node_type == NodeType::HostInterface, last.node_type == NodeType::HostInterface)
	{
		(true, true) => TraceShape::Full,
		(false, _) => TraceShape::MissingHead,
		(_, false) => TraceShape::MissingTail,
	})
}

/// Reconstructs the full, flattened sequence of ports a route's trace
/// visited, from `port1`'s exit through every intermediate entry/exit pair
/// to the destination's entry. `None` if any record's node GUID cannot be
/// resolved back to a fabric node index.
fn port_sequence(fabric: &Fabric, trace: &[TraceRecord]) -> Option<Vec<PortId>>
{
	let last_index = trace.len().checked_sub(1)?;
	let mut ports = Vec::with_capacity(trace.len() * 2);
	for (i, record) in trace.iter().enumerate()
	{
		let node = fabric.find_node_by_guid(record.node_guid)?;
		if i > 0
		{
			ports.push(PortId::new(node, record.entry_port));
		}
		if i < last_index
		{
			ports.push(PortId::new(node, record.exit_port));
		}
	}
	Some(ports)
}

/// A single registered route: the (SLID, DLID) pair and the first port the
/// packet departed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteRecord
{
	pub slid: Lid,
	pub dlid: Lid,
	pub first_hop_port: PortId,
}

/// Registers one trace into the graph/devices/routes tables. Returns
/// `false` (and registers nothing) for any structural inconsistency: an
/// empty trace, an unrecoverable `MissingHead`/`MissingTail` shape, or a
/// record whose node GUID isn't in the fabric. The caller counts that as a
/// bad path.
fn register_trace(graph: &mut DependencyGraph, devices: &mut HashMap<Guid, Lid>, routes: &mut Vec<RouteRecord>, fabric: &Fabric, slid: Lid, dlid: Lid, trace: &[TraceRecord]) -> bool
{
	let Some(shape) = classify_trace_shape(trace) else { return false };
	if shape != TraceShape::Full
	{
		// This crate's own trace builder always starts and ends on a host
		// interface for a successful walk; a non-Full shape here can only
		// mean the walk itself produced something unexpected. Treat as a
		// bad path rather than guessing at a repair.
		return false;
	}

	let Some(ports) = port_sequence(fabric, trace) else { return false };
	if ports.len() < 2
	{
		return false;
	}

	let last = trace.len() - 1;
	for (i, record) in trace.iter().enumerate()
	{
		let lid = if i == 0 { slid } else if i == last { dlid } else { 0 };
		devices.entry(record.node_guid).or_insert(lid);
	}

	// `ports` alternates link crossings and intra-switch hops: [exit0,
	// entry1, exit1, entry2, exit2, ..., entryLast]. Its length is always
	// even (checked above), so non-overlapping pairs are exactly the
	// channels this route crossed, in order.
	let channels: Vec<Channel> = ports.chunks(2).map(|w| (w[0], w[1])).collect();
	for pair in channels.windows(2)
	{
		graph.add_edge(pair[0], pair[1], PathTag{ slid, dlid });
	}

	routes.push(RouteRecord{ slid, dlid, first_hop_port: ports[0] });
	true
}

/// Which stage of the dependency graph a [`GraphSummary`] describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GraphStage
{
	Full,
	Pruned,
	Component(usize),
}

/// Node/edge counts for the dependency graph at one build stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GraphSummary
{
	pub nodes: usize,
	pub edges: usize,
}

/// Size of the registered routes table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RouteTableSummary
{
	pub route_count: usize,
}

/// Fabric-wide summary emitted once validation completes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FabricSummary
{
	pub total_paths: u64,
	pub bad_paths: u64,
	pub device_count: usize,
	pub connection_count: usize,
	pub route_count: usize,
	pub cycle_count: usize,
}

/// One `(switch, in_port, out_port)` triple: a channel-dependency edge
/// within a single switch, contributed by one hop of a reported [`Cycle`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CycleEdge
{
	pub node: usize,
	pub node_guid: Guid,
	pub in_port: u8,
	pub out_port: u8,
}

/// A detected credit cycle: the sequence of channel-dependency edges a
/// packet's credit accounting would have to traverse and never escape.
/// Physical-link edges between switches are implicit in the wraparound from
/// one triple's `out_port` to the next triple's `in_port` and are not
/// themselves reported.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cycle
{
	pub edges: Vec<CycleEdge>,
}

impl Cycle
{
	/// Builds a reported cycle from the raw channel-vertex cycle Phase 4
	/// found. `channels` holds each distinct channel visited, in order; the
	/// dependency edge from the last channel back to the first closes the
	/// cycle. Every edge's two channel endpoints meet at exactly one
	/// device, so every edge becomes exactly one reported triple.
	fn from_channel_path(fabric: &Fabric, channels: &[Channel]) -> Cycle
	{
		let n = channels.len();
		let mut edges = Vec::new();
		for i in 0..n
		{
			let from = channels[i];
			let to = channels[(i + 1) % n];
			let node = from.1.node;
			debug_assert_eq!(node, to.0.node, "consecutive channels in a cycle must meet at one device");
			edges.push(CycleEdge{
				node,
				node_guid: fabric.node(node).guid,
				in_port: from.1.port,
				out_port: to.0.port,
			});
		}
		Cycle{ edges }
	}
}

/// Progress and result hooks for a credit-loop validation run, modeled as a
/// trait with no-op defaults rather than a set of function pointers plus a
/// `void*` context. Callers implement only the hooks they care about.
pub trait CreditLoopObserver
{
	/// One route (all its LMC-expanded DLID offsets collapsed to the pair)
	/// that failed to build cleanly into the dependency graph.
	fn on_bad_route(&mut self, _port1: PortId, _port2: PortId) {}
	/// Emitted once, after everything else, with the run's totals.
	fn on_fabric_summary(&mut self, _summary: &FabricSummary) {}
	/// Emitted once per graph stage: full, pruned, and once per split
	/// component.
	fn on_graph_summary(&mut self, _stage: GraphStage, _summary: &GraphSummary) {}
	/// Emitted once, after Phase 1, with the size of the routes table.
	fn on_route_summary(&mut self, _summary: &RouteTableSummary) {}
	/// Emitted once per detected cycle, with its edge count.
	fn on_link_summary(&mut self, _cycle_index: usize, _edge_count: usize) {}
	/// Emitted once per edge of a detected cycle, in cycle order.
	fn on_link_step_summary(&mut self, _cycle_index: usize, _step: usize, _edge: &CycleEdge) {}
	/// Emitted once per detected cycle, with the full edge list.
	fn on_path_summary(&mut self, _cycle_index: usize, _cycle: &Cycle) {}
}

/// A [`CreditLoopObserver`] that does nothing; the default for callers who
/// only want the returned [`CreditLoopReport`].
#[derive(Debug, Default)]
pub struct NullObserver;

impl CreditLoopObserver for NullObserver {}

/// The final outcome of a credit-loop validation run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CreditLoopReport
{
	pub total_paths: u64,
	pub bad_paths: u64,
	pub cycles: Vec<Cycle>,
}

impl CreditLoopReport
{
	/// Whether the fabric is free of credit loops. An explicit check rather
	/// than callers inferring it from an empty vector.
	pub fn is_deadlock_free(&self) -> bool
	{
		self.cycles.is_empty()
	}
}

struct BuildOutput
{
	graph: DependencyGraph,
	devices: HashMap<Guid, Lid>,
	routes: Vec<RouteRecord>,
	total_paths: u64,
	bad_paths: u64,
}

/// Phase 1: builds the channel-dependency graph over every host-interface
/// pair's LMC-expanded paths.
fn build_route_graph(fabric: &Fabric, config: &AnalysisConfig, clock: &dyn Clock, progress: &mut dyn ProgressSink, observer: &mut dyn CreditLoopObserver) -> Result<BuildOutput>
{
	let build_start = (config.verbosity == Verbosity::Detailed).then(|| clock.now_micros());
	if let Some(t0) = build_start
	{
		log::info!("credit-loop graph build starting at {}us", t0);
	}

	let mut graph = DependencyGraph::new();
	let mut devices = HashMap::new();
	let mut routes = Vec::new();
	let mut total_paths = 0u64;
	let mut bad_paths = 0u64;

	let host_ports: Vec<PortId> = fabric.host_interfaces()
		.flat_map(|(index, node)| node.ports_iter().map(move |p| PortId::new(index, p.port_num)))
		.collect();

	for (processed, &port1) in host_ports.iter().enumerate()
	{
		if config.verbosity == Verbosity::Normal && config.progress_frequency > 0 && processed % config.progress_frequency == 0
		{
			progress.report(processed, host_ports.len());
		}

		for &port2 in &host_ports
		{
			if port1 == port2
			{
				continue;
			}
			let paths = gen_paths(fabric, port1, port2)?;
			for path in paths
			{
				total_paths += 1;
				match gen_trace_route_port(fabric, port1, path.dlid, config.max_hops)
				{
					Ok(trace) =>
					{
						if !register_trace(&mut graph, &mut devices, &mut routes, fabric, path.slid, path.dlid, &trace)
						{
							bad_paths += 1;
							observer.on_bad_route(port1, port2);
						}
					}
					Err(Error::Unavailable) => return Err(Error::Unavailable),
					Err(_) =>
					{
						bad_paths += 1;
						observer.on_bad_route(port1, port2);
					}
				}
			}
		}
	}

	observer.on_graph_summary(GraphStage::Full, &GraphSummary{ nodes: graph.node_count(), edges: graph.edge_count() });
	observer.on_route_summary(&RouteTableSummary{ route_count: routes.len() });

	if let Some(t0) = build_start
	{
		let t1 = clock.now_micros();
		log::info!("credit-loop graph build finished in {}", crate::clock::format_elapsed(t1.saturating_sub(t0)));
	}

	Ok(BuildOutput{ graph, devices, routes, total_paths, bad_paths })
}

/// Runs all four phases of credit-loop detection over `fabric`:
/// building the channel-dependency graph, pruning it, splitting it into
/// weakly connected components, and extracting cycles from each component
/// via Dijkstra. `viewpoint_guid` identifies the local endpoint the caller
/// is analyzing from; this build phase enumerates every host-interface pair
/// regardless of viewpoint, so it is not otherwise special-cased.
///
/// Returns `Err(Error::Unavailable)` if any route hits a switch with no
/// LFT, or `Err(Error::NotDone)` if the graph ends up with no devices,
/// routes, or connections at all ("insufficient data" to say anything about
/// deadlock freedom).
pub fn validate_credit_loops(fabric: &Fabric, viewpoint_guid: Guid, config: &AnalysisConfig, clock: &dyn Clock, progress: &mut dyn ProgressSink, observer: &mut dyn CreditLoopObserver) -> Result<CreditLoopReport>
{
	log::debug!("validating credit loops from viewpoint GUID {:#x}", viewpoint_guid);
	let overall_start = (config.verbosity == Verbosity::Detailed).then(|| clock.now_micros());

	let mut build = build_route_graph(fabric, config, clock, progress, observer)?;

	if build.devices.is_empty() || build.routes.is_empty() || build.graph.edge_count() == 0
	{
		return Err(Error::NotDone);
	}

	build.graph.prune();
	observer.on_graph_summary(GraphStage::Pruned, &GraphSummary{ nodes: build.graph.node_count(), edges: build.graph.edge_count() });

	let mut cycles = Vec::new();
	for (component_index, component) in split::weakly_connected_components(&build.graph).into_iter().enumerate()
	{
		observer.on_graph_summary(GraphStage::Component(component_index), &GraphSummary{
			nodes: component.len(),
			edges: split::component_edge_count(&build.graph, &component),
		});

		for cycle_channels in dijkstra::find_cycles(&build.graph, &component)
		{
			let cycle = Cycle::from_channel_path(fabric, &cycle_channels);
			let index = cycles.len();
			observer.on_link_summary(index, cycle.edges.len());
			for (step, edge) in cycle.edges.iter().enumerate()
			{
				observer.on_link_step_summary(index, step, edge);
			}
			observer.on_path_summary(index, &cycle);
			cycles.push(cycle);
		}
	}

	observer.on_fabric_summary(&FabricSummary{
		total_paths: build.total_paths,
		bad_paths: build.bad_paths,
		device_count: build.devices.len(),
		connection_count: build.graph.edge_count(),
		route_count: build.routes.len(),
		cycle_count: cycles.len(),
	});

	if let Some(t0) = overall_start
	{
		let t1 = clock.now_micros();
		log::info!("credit-loop validation finished in {}", crate::clock::format_elapsed(t1.saturating_sub(t0)));
	}

	Ok(CreditLoopReport{ total_paths: build.total_paths, bad_paths: build.bad_paths, cycles })
}
