// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dotlight-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dotlight and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::model::{GraphElement, GraphSnapshot, HighlightResult, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Walk {
    Upstream,
    Downstream,
}

/// Read-only adjacency over one rendered graph.
///
/// Built once per successful render and never mutated afterwards; a re-render builds a new view.
/// Only edges whose identity splits into `source->target` with both ends being known nodes take
/// part in traversal. Every edge stays visible through [`AdjacencyView::all_edges`].
#[derive(Debug, Clone, Default)]
pub struct AdjacencyView {
    nodes: Vec<GraphElement>,
    edges: Vec<GraphElement>,
    index: BTreeMap<NodeId, usize>,
    // Per node index: (neighbor node index, edge index).
    outgoing: Vec<Vec<(usize, usize)>>,
    incoming: Vec<Vec<(usize, usize)>>,
    traversable: Vec<bool>,
    legend: HighlightResult,
}

impl AdjacencyView {
    pub fn new(snapshot: GraphSnapshot) -> Self {
        let GraphSnapshot { nodes, edges } = snapshot;

        let mut index: BTreeMap<NodeId, usize> = BTreeMap::new();
        for (idx, node) in nodes.iter().enumerate() {
            let Ok(node_id) = NodeId::new(node.identity()) else {
                continue;
            };
            index.entry(node_id).or_insert(idx);
        }

        let mut outgoing = vec![Vec::new(); nodes.len()];
        let mut incoming = vec![Vec::new(); nodes.len()];
        let mut traversable = vec![false; edges.len()];

        for (edge_idx, edge) in edges.iter().enumerate() {
            let Some((source, target)) = edge.endpoints() else {
                continue;
            };
            let (Some(&from), Some(&to)) = (index.get(source), index.get(target)) else {
                continue;
            };
            outgoing[from].push((to, edge_idx));
            incoming[to].push((from, edge_idx));
            traversable[edge_idx] = true;
        }

        let mut legend = HighlightResult::default();
        for element in nodes.iter().chain(edges.iter()) {
            if element.is_legend() {
                legend.insert(element.clone());
            }
        }

        Self {
            nodes,
            edges,
            index,
            outgoing,
            incoming,
            traversable,
            legend,
        }
    }

    pub fn all_nodes(&self) -> &[GraphElement] {
        &self.nodes
    }

    pub fn all_edges(&self) -> &[GraphElement] {
        &self.edges
    }

    pub fn node_by_identity(&self, identity: &str) -> Option<&GraphElement> {
        self.index.get(identity).map(|idx| &self.nodes[*idx])
    }

    /// All edges rendered with `identity` (parallel edges share one).
    pub fn edges_by_identity(&self, identity: &str) -> Vec<&GraphElement> {
        self.edges.iter().filter(|edge| edge.identity() == identity).collect()
    }

    pub fn contains(&self, element: &GraphElement) -> bool {
        if element.is_node() {
            return self
                .index
                .get(element.identity())
                .is_some_and(|idx| &self.nodes[*idx] == element);
        }
        self.edges.get(element.ordinal()).is_some_and(|edge| edge == element)
    }

    pub fn is_traversable(&self, edge: &GraphElement) -> bool {
        edge.is_edge()
            && self.traversable.get(edge.ordinal()).copied().unwrap_or(false)
            && self.contains(edge)
    }

    /// Legend nodes and edges (identity prefixed with `legend_`).
    pub fn legend(&self) -> &HighlightResult {
        &self.legend
    }

    /// Nodes with a directed path ending at `node`; direct predecessors only when not transitive.
    pub fn upstream_of(&self, node: &str, transitive: bool) -> BTreeSet<GraphElement> {
        self.walk(node, Walk::Upstream, transitive).0
    }

    /// Nodes reachable from `node`; direct successors only when not transitive.
    pub fn downstream_of(&self, node: &str, transitive: bool) -> BTreeSet<GraphElement> {
        self.walk(node, Walk::Downstream, transitive).0
    }

    /// Traversable edges walked by [`AdjacencyView::upstream_of`].
    pub fn upstream_edges_of(&self, node: &str, transitive: bool) -> BTreeSet<GraphElement> {
        self.walk(node, Walk::Upstream, transitive).1
    }

    /// Traversable edges walked by [`AdjacencyView::downstream_of`].
    pub fn downstream_edges_of(&self, node: &str, transitive: bool) -> BTreeSet<GraphElement> {
        self.walk(node, Walk::Downstream, transitive).1
    }

    /// Upstream nodes and walked edges in one traversal.
    pub fn upstream_closure(&self, node: &str) -> HighlightResult {
        self.closure(node, Walk::Upstream)
    }

    /// Downstream nodes and walked edges in one traversal.
    pub fn downstream_closure(&self, node: &str) -> HighlightResult {
        self.closure(node, Walk::Downstream)
    }

    fn closure(&self, node: &str, walk: Walk) -> HighlightResult {
        let (nodes, edges) = self.walk(node, walk, true);
        HighlightResult { nodes, edges }
    }

    fn walk(
        &self,
        node: &str,
        walk: Walk,
        transitive: bool,
    ) -> (BTreeSet<GraphElement>, BTreeSet<GraphElement>) {
        let Some(&start) = self.index.get(node) else {
            return (BTreeSet::new(), BTreeSet::new());
        };

        let adjacency = match walk {
            Walk::Upstream => &self.incoming,
            Walk::Downstream => &self.outgoing,
        };

        // The start node is only part of the result when a cycle leads back to it.
        let mut visited: BTreeSet<usize> = BTreeSet::new();
        let mut walked: BTreeSet<usize> = BTreeSet::new();
        let mut queue: VecDeque<usize> = VecDeque::new();
        queue.push_back(start);

        while let Some(node_idx) = queue.pop_front() {
            for &(next_idx, edge_idx) in &adjacency[node_idx] {
                walked.insert(edge_idx);
                if visited.insert(next_idx) && transitive {
                    queue.push_back(next_idx);
                }
            }
        }

        let nodes = visited.into_iter().map(|idx| self.nodes[idx].clone()).collect();
        let edges = walked.into_iter().map(|idx| self.edges[idx].clone()).collect();
        (nodes, edges)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::AdjacencyView;
    use crate::model::fixtures;
    use crate::model::GraphElement;

    fn ids(values: &BTreeSet<GraphElement>) -> Vec<&str> {
        values.iter().map(GraphElement::identity).collect()
    }

    #[test]
    fn one_hop_queries_return_direct_neighbors() {
        let view = fixtures::diamond_view();
        assert_eq!(ids(&view.downstream_of("a", false)), vec!["b", "c"]);
        assert_eq!(ids(&view.upstream_of("d", false)), vec!["b", "c"]);
        assert!(view.upstream_of("a", false).is_empty());
    }

    #[test]
    fn transitive_queries_follow_paths() {
        let view = fixtures::diamond_view();
        assert_eq!(ids(&view.downstream_of("a", true)), vec!["b", "c", "d", "e"]);
        assert_eq!(ids(&view.upstream_of("e", true)), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn start_node_is_only_included_through_a_cycle() {
        let view = fixtures::cycle_view();
        assert_eq!(ids(&view.downstream_of("a", true)), vec!["a", "b", "c"]);

        let view = fixtures::diamond_view();
        assert!(!view.downstream_of("a", true).iter().any(|n| n.identity() == "a"));
    }

    #[test]
    fn transitive_downstream_is_the_closure_of_one_hop_expansion() {
        let view = fixtures::diamond_view();
        for node in view.all_nodes() {
            let mut closure: BTreeSet<GraphElement> = BTreeSet::new();
            let mut frontier = view.downstream_of(node.identity(), false);
            while !frontier.is_empty() {
                let mut next = BTreeSet::new();
                for element in &frontier {
                    if closure.insert(element.clone()) {
                        next.extend(view.downstream_of(element.identity(), false));
                    }
                }
                frontier = next;
            }
            assert_eq!(view.downstream_of(node.identity(), true), closure, "from {node}");
        }
    }

    #[test]
    fn walked_edges_cover_the_traversed_paths() {
        let view = fixtures::diamond_view();
        assert_eq!(ids(&view.upstream_edges_of("d", true)), vec!["a->b", "a->c", "b->d", "c->d"]);
        assert_eq!(ids(&view.downstream_edges_of("d", false)), vec!["d->e"]);
    }

    #[test]
    fn malformed_edges_are_not_traversed_but_still_listed() {
        let view = fixtures::malformed_edges_view();
        assert!(view.downstream_of("a", true).is_empty());
        assert_eq!(view.all_edges().len(), 3);
        assert!(view.all_edges().iter().all(|edge| !view.is_traversable(edge)));
    }

    #[test]
    fn unknown_nodes_have_no_neighbors() {
        let view = fixtures::diamond_view();
        assert!(view.node_by_identity("zz").is_none());
        assert!(view.downstream_of("zz", true).is_empty());
    }

    #[test]
    fn legend_collects_prefixed_nodes_and_edges() {
        let view = fixtures::legend_view();
        assert_eq!(view.legend().node_identities(), vec!["legend_in", "legend_out"]);
        assert_eq!(view.legend().edge_identities(), vec!["legend_in->legend_out"]);
    }

    #[test]
    fn contains_checks_identity_and_render_position() {
        let view = fixtures::diamond_view();
        let edge = view.all_edges()[0].clone();
        assert!(view.contains(&edge));
        assert!(!view.contains(&GraphElement::edge(edge.identity(), "", 99)));
        assert!(!view.contains(&GraphElement::node("a", "other label", 0)));
    }

    #[test]
    fn from_snapshot_is_empty_for_default() {
        let view = AdjacencyView::default();
        assert!(view.all_nodes().is_empty());
        assert!(view.legend().is_empty());
    }
}
