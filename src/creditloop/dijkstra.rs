/*!

Phase 4: finds every simple cycle within one weakly connected component of
the dependency graph.

For each edge `source -> target` in the component, a hand-rolled Dijkstra
pass (unit edge weights, since every dependency edge costs one hop) looks
for the shortest way back from `target` to `source`. If one exists, that
path plus the edge closes a cycle. The same physical cycle is typically
found once per edge that lies on it (a 4-cycle is found via all 4 of its
edges), so results are deduplicated by rotating each cycle's vertex list to
a canonical starting point before
being returned.

*/

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use petgraph::Direction;

use super::{Channel, DependencyGraph};

#[derive(Clone, Copy, Eq, PartialEq)]
struct HeapEntry
{
	cost: usize,
	node: NodeIndex,
}

impl Ord for HeapEntry
{
	fn cmp(&self, other: &Self) -> Ordering
	{
		// Reversed so `BinaryHeap`, a max-heap, pops the smallest cost
		// first. Ties broken on node index for a deterministic order.
		other.cost.cmp(&self.cost).then_with(|| other.node.index().cmp(&self.node.index()))
	}
}

impl PartialOrd for HeapEntry
{
	fn partial_cmp(&self, other: &Self) -> Option<Ordering>
	{
		Some(self.cmp(other))
	}
}

/// Dijkstra from `source`, restricted to `allowed` nodes, returning each
/// reached node's predecessor on the shortest path from `source`.
fn shortest_paths(graph: &DependencyGraph, source: NodeIndex, allowed: &HashSet<NodeIndex>) -> HashMap<NodeIndex, NodeIndex>
{
	let mut dist: HashMap<NodeIndex, usize> = HashMap::new();
	let mut prev: HashMap<NodeIndex, NodeIndex> = HashMap::new();
	let mut heap = BinaryHeap::new();

	dist.insert(source, 0);
	heap.push(HeapEntry{ cost: 0, node: source });

	while let Some(HeapEntry{ cost, node }) = heap.pop()
	{
		if cost > *dist.get(&node).unwrap_or(&usize::MAX)
		{
			continue;
		}
		for edge in graph.graph.edges_directed(node, Direction::Outgoing)
		{
			let next = edge.target();
			if !allowed.contains(&next)
			{
				continue;
			}
			let next_cost = cost + 1;
			if next_cost < *dist.get(&next).unwrap_or(&usize::MAX)
			{
				dist.insert(next, next_cost);
				prev.insert(next, node);
				heap.push(HeapEntry{ cost: next_cost, node: next });
			}
		}
	}
	prev
}

/// Rotates a cycle's node-index sequence so it starts at its smallest
/// index, giving the same canonical form regardless of which of its edges
/// first discovered it.
fn canonicalize(path: &[NodeIndex]) -> Vec<usize>
{
	let raw: Vec<usize> = path.iter().map(|n| n.index()).collect();
	let min_pos = raw.iter().enumerate().min_by_key(|&(_, v)| *v).map(|(i, _)| i).unwrap_or(0);
	raw[min_pos..].iter().chain(raw[..min_pos].iter()).copied().collect()
}

/// Finds every distinct simple cycle within `component`, returning each as
/// its ordered sequence of channels (wraparound from the last entry back
/// to the first is implicit, exactly as consumed by
/// [`super::Cycle::from_channel_path`]).
pub fn find_cycles(graph: &DependencyGraph, component: &[NodeIndex]) -> Vec<Vec<Channel>>
{
	let allowed: HashSet<NodeIndex> = component.iter().copied().collect();
	let mut seen = HashSet::new();
	let mut cycles = Vec::new();

	for &source in component
	{
		for edge in graph.graph.edges_directed(source, Direction::Outgoing)
		{
			let target = edge.target();
			if !allowed.contains(&target)
			{
				continue;
			}

			let path = if target == source
			{
				vec![source]
			}
			else
			{
				let prev = shortest_paths(graph, target, &allowed);
				if !prev.contains_key(&source)
				{
					continue;
				}
				let mut rev = vec![source];
				let mut cur = source;
				while cur != target
				{
					cur = prev[&cur];
					rev.push(cur);
				}
				rev.reverse();
				let mut path = vec![source];
				path.extend_from_slice(&rev);
				path.pop();
				path
			};

			if seen.insert(canonicalize(&path))
			{
				cycles.push(path.into_iter().map(|idx| graph.graph[idx]).collect());
			}
		}
	}
	cycles
}
