/*!

Phase 3: splits the pruned dependency graph into its weakly connected
components, so Phase 4 searches for cycles independently within each one
instead of over the whole graph at once. No cycle can span two components:
there is no edge, in either direction, connecting them.

*/

use std::collections::{HashMap, HashSet};

use petgraph::graph::NodeIndex;
use petgraph::unionfind::UnionFind;

use super::DependencyGraph;

/// Splits `graph` into its weakly connected components: groups of node
/// indices reachable from one another when edge direction is ignored. Uses
/// `petgraph`'s own disjoint-set forest rather than a hand-rolled one,
/// since `petgraph` is already a dependency for the graph itself.
pub fn weakly_connected_components(graph: &DependencyGraph) -> Vec<Vec<NodeIndex>>
{
	let nodes: Vec<NodeIndex> = graph.graph.node_indices().collect();
	let mut position = HashMap::new();
	for (i, &n) in nodes.iter().enumerate()
	{
		position.insert(n, i);
	}

	let mut uf = UnionFind::new(nodes.len());
	for edge in graph.graph.raw_edges()
	{
		let a = position[&edge.source()];
		let b = position[&edge.target()];
		uf.union(a, b);
	}

	let mut groups: HashMap<usize, Vec<NodeIndex>> = HashMap::new();
	for (i, &n) in nodes.iter().enumerate()
	{
		let root = uf.find(i);
		groups.entry(root).or_default().push(n);
	}
	groups.into_values().collect()
}

/// Number of dependency edges with both endpoints inside `component`.
/// Reported alongside each component's node count in a [`super::GraphSummary`].
pub fn component_edge_count(graph: &DependencyGraph, component: &[NodeIndex]) -> usize
{
	let members: HashSet<NodeIndex> = component.iter().copied().collect();
	graph.graph.raw_edges().iter()
		.filter(|e| members.contains(&e.source()) && members.contains(&e.target()))
		.count()
}
