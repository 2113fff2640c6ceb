// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dotlight-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dotlight and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeSet;
use std::fmt;

use memchr::memmem;
use smol_str::SmolStr;

/// Identity prefix that marks an element as part of the graph legend.
pub const LEGEND_PREFIX: &str = "legend_";

/// Separator between source and target in a directed edge identity.
pub const EDGE_ARROW: &str = "->";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementKind {
    Node,
    Edge,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Node => f.write_str("node"),
            Self::Edge => f.write_str("edge"),
        }
    }
}

/// A node or an edge of a rendered graph.
///
/// `ordinal` is the element's position in render order among elements of the same kind. It keeps
/// parallel edges (same `a->b` identity) distinct inside sets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GraphElement {
    kind: ElementKind,
    identity: SmolStr,
    ordinal: usize,
    label: String,
}

impl GraphElement {
    pub fn node(identity: impl AsRef<str>, label: impl Into<String>, ordinal: usize) -> Self {
        Self {
            kind: ElementKind::Node,
            identity: SmolStr::new(identity),
            ordinal,
            label: label.into(),
        }
    }

    pub fn edge(identity: impl AsRef<str>, label: impl Into<String>, ordinal: usize) -> Self {
        Self {
            kind: ElementKind::Edge,
            identity: SmolStr::new(identity),
            ordinal,
            label: label.into(),
        }
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn is_node(&self) -> bool {
        self.kind == ElementKind::Node
    }

    pub fn is_edge(&self) -> bool {
        self.kind == ElementKind::Edge
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_legend(&self) -> bool {
        self.identity.starts_with(LEGEND_PREFIX)
    }

    /// Source/target node ids of an edge, or `None` for nodes and malformed edge identities.
    pub fn endpoints(&self) -> Option<(&str, &str)> {
        if !self.is_edge() {
            return None;
        }
        split_edge_identity(&self.identity)
    }
}

impl fmt::Display for GraphElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.identity)
    }
}

/// Splits `source->target` into its two parts.
///
/// Identities that do not split into exactly two non-empty parts are not traversable.
pub fn split_edge_identity(identity: &str) -> Option<(&str, &str)> {
    let finder = memmem::Finder::new(EDGE_ARROW);
    let mut hits = finder.find_iter(identity.as_bytes());
    let at = hits.next()?;
    if hits.next().is_some() {
        return None;
    }

    let source = &identity[..at];
    let target = &identity[at + EDGE_ARROW.len()..];
    if source.is_empty() || target.is_empty() {
        return None;
    }
    Some((source, target))
}

/// Partition of highlighted elements handed to the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HighlightResult {
    pub nodes: BTreeSet<GraphElement>,
    pub edges: BTreeSet<GraphElement>,
}

impl HighlightResult {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len() + self.edges.len()
    }

    /// Adds an element to the set matching its kind.
    pub fn insert(&mut self, element: GraphElement) -> bool {
        match element.kind() {
            ElementKind::Node => self.nodes.insert(element),
            ElementKind::Edge => self.edges.insert(element),
        }
    }

    pub fn extend(&mut self, other: HighlightResult) {
        self.nodes.extend(other.nodes);
        self.edges.extend(other.edges);
    }

    pub fn contains(&self, element: &GraphElement) -> bool {
        match element.kind() {
            ElementKind::Node => self.nodes.contains(element),
            ElementKind::Edge => self.edges.contains(element),
        }
    }

    pub fn node_identities(&self) -> Vec<&str> {
        self.nodes.iter().map(GraphElement::identity).collect()
    }

    pub fn edge_identities(&self) -> Vec<&str> {
        self.edges.iter().map(GraphElement::identity).collect()
    }
}

/// Elements of one rendered graph, in render order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GraphSnapshot {
    pub nodes: Vec<GraphElement>,
    pub edges: Vec<GraphElement>,
}

impl GraphSnapshot {
    pub fn new(nodes: Vec<GraphElement>, edges: Vec<GraphElement>) -> Self {
        Self { nodes, edges }
    }
}
