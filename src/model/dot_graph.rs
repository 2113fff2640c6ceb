// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dotlight-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dotlight and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use super::element::{GraphElement, GraphSnapshot};
use super::ids::NodeId;

pub type Attributes = BTreeMap<String, String>;

/// A parsed DOT document.
///
/// Nodes keep first-mention order, edges keep statement order, which is the order Graphviz emits
/// them into the rendered output.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DotGraph {
    directed: bool,
    strict: bool,
    name: Option<String>,
    graph_attrs: Attributes,
    nodes: Vec<DotNode>,
    node_index: BTreeMap<NodeId, usize>,
    edges: Vec<DotEdge>,
}

impl DotGraph {
    pub fn new(directed: bool) -> Self {
        Self {
            directed,
            ..Self::default()
        }
    }

    pub fn directed(&self) -> bool {
        self.directed
    }

    pub fn strict(&self) -> bool {
        self.strict
    }

    pub fn set_strict(&mut self, strict: bool) {
        self.strict = strict;
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name<T: Into<String>>(&mut self, name: Option<T>) {
        self.name = name.map(Into::into);
    }

    pub fn graph_attrs(&self) -> &Attributes {
        &self.graph_attrs
    }

    pub fn graph_attrs_mut(&mut self) -> &mut Attributes {
        &mut self.graph_attrs
    }

    pub fn nodes(&self) -> &[DotNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[DotEdge] {
        &self.edges
    }

    pub fn node(&self, id: &str) -> Option<&DotNode> {
        self.node_index.get(id).map(|idx| &self.nodes[*idx])
    }

    /// Returns the node with `id`, creating it with `defaults` on first mention.
    ///
    /// Attributes given on later mentions override earlier ones, as in Graphviz.
    pub fn ensure_node(&mut self, id: NodeId, defaults: &Attributes) -> &mut DotNode {
        let idx = match self.node_index.get(id.as_str()) {
            Some(idx) => *idx,
            None => {
                let idx = self.nodes.len();
                self.nodes.push(DotNode::new(id.clone(), defaults.clone()));
                self.node_index.insert(id, idx);
                idx
            }
        };
        &mut self.nodes[idx]
    }

    /// Appends `edge`. Strict graphs keep one edge per endpoint pair (unordered when
    /// undirected) and merge later attributes into it.
    pub fn push_edge(&mut self, edge: DotEdge) {
        if self.strict {
            let directed = self.directed;
            let existing = self.edges.iter_mut().find(|known| {
                (known.tail == edge.tail && known.head == edge.head)
                    || (!directed && known.tail == edge.head && known.head == edge.tail)
            });
            if let Some(existing) = existing {
                existing.attrs.extend(edge.attrs);
                return;
            }
        }
        self.edges.push(edge);
    }

    /// The edge connector used in rendered edge identities.
    pub fn edge_op(&self) -> &'static str {
        if self.directed {
            "->"
        } else {
            "--"
        }
    }

    /// Node elements in render order.
    pub fn node_elements(&self) -> Vec<GraphElement> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(ordinal, node)| GraphElement::node(node.id(), node.display_label(), ordinal))
            .collect()
    }

    /// Edge elements in render order, identified as `tail->head` (`tail--head` when undirected).
    pub fn edge_elements(&self) -> Vec<GraphElement> {
        let op = self.edge_op();
        self.edges
            .iter()
            .enumerate()
            .map(|(ordinal, edge)| {
                let identity = format!("{}{op}{}", edge.tail(), edge.head());
                GraphElement::edge(identity, edge.label().unwrap_or_default(), ordinal)
            })
            .collect()
    }

    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot::new(self.node_elements(), self.edge_elements())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotNode {
    id: NodeId,
    attrs: Attributes,
}

impl DotNode {
    pub fn new(id: NodeId, attrs: Attributes) -> Self {
        Self { id, attrs }
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn attrs(&self) -> &Attributes {
        &self.attrs
    }

    pub fn attrs_mut(&mut self) -> &mut Attributes {
        &mut self.attrs
    }

    pub fn label(&self) -> Option<&str> {
        self.attrs.get("label").map(String::as_str)
    }

    /// The text Graphviz draws for this node: its `label` with `\N` expanded, or its name.
    pub fn display_label(&self) -> String {
        match self.label() {
            Some(label) => label.replace("\\N", self.id.as_str()),
            None => self.id.as_str().to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotEdge {
    tail: NodeId,
    head: NodeId,
    attrs: Attributes,
}

impl DotEdge {
    pub fn new(tail: NodeId, head: NodeId, attrs: Attributes) -> Self {
        Self { tail, head, attrs }
    }

    pub fn tail(&self) -> &NodeId {
        &self.tail
    }

    pub fn head(&self) -> &NodeId {
        &self.head
    }

    pub fn attrs(&self) -> &Attributes {
        &self.attrs
    }

    pub fn label(&self) -> Option<&str> {
        self.attrs.get("label").map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::{Attributes, DotEdge, DotGraph};
    use crate::model::NodeId;

    fn nid(value: &str) -> NodeId {
        NodeId::new(value).expect("node id")
    }

    #[test]
    fn ensure_node_keeps_first_mention_order() {
        let mut graph = DotGraph::new(true);
        graph.ensure_node(nid("b"), &Attributes::new());
        graph.ensure_node(nid("a"), &Attributes::new());
        graph.ensure_node(nid("b"), &Attributes::new());

        let ids = graph.nodes().iter().map(|node| node.id().as_str()).collect::<Vec<_>>();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn display_label_expands_node_name_escape() {
        let mut graph = DotGraph::new(true);
        let node = graph.ensure_node(nid("db"), &Attributes::new());
        assert_eq!(node.display_label(), "db");

        node.attrs_mut().insert("label".to_owned(), "\\N (primary)".to_owned());
        assert_eq!(node.display_label(), "db (primary)");
    }

    #[test]
    fn strict_graphs_merge_repeated_edges() {
        let label = |value: &str| Attributes::from([("label".to_owned(), value.to_owned())]);

        let mut strict = DotGraph::new(false);
        strict.set_strict(true);
        strict.push_edge(DotEdge::new(nid("a"), nid("b"), label("first")));
        strict.push_edge(DotEdge::new(nid("b"), nid("a"), label("second")));
        strict.push_edge(DotEdge::new(nid("a"), nid("c"), Attributes::new()));
        assert_eq!(strict.edges().len(), 2);
        assert_eq!(strict.edges()[0].label(), Some("second"));

        let mut plain = DotGraph::new(true);
        plain.push_edge(DotEdge::new(nid("a"), nid("b"), label("first")));
        plain.push_edge(DotEdge::new(nid("a"), nid("b"), label("second")));
        assert_eq!(plain.edges().len(), 2);
    }

    #[test]
    fn edge_elements_use_the_graph_connector() {
        let mut directed = DotGraph::new(true);
        directed.push_edge(DotEdge::new(nid("a"), nid("b"), Attributes::new()));
        assert_eq!(directed.edge_elements()[0].identity(), "a->b");

        let mut undirected = DotGraph::new(false);
        undirected.push_edge(DotEdge::new(nid("a"), nid("b"), Attributes::new()));
        assert_eq!(undirected.edge_elements()[0].identity(), "a--b");
        assert_eq!(undirected.edge_elements()[0].endpoints(), None);
    }
}
