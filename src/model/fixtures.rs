// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dotlight-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dotlight and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::element::{GraphElement, GraphSnapshot};
use crate::format::parse_dot;
use crate::query::AdjacencyView;

fn snapshot(nodes: &[(&str, &str)], edges: &[(&str, &str)]) -> GraphSnapshot {
    let nodes = nodes
        .iter()
        .enumerate()
        .map(|(idx, (id, label))| GraphElement::node(id, *label, idx))
        .collect();
    let edges = edges
        .iter()
        .enumerate()
        .map(|(idx, (id, label))| GraphElement::edge(id, *label, idx))
        .collect();
    GraphSnapshot::new(nodes, edges)
}

/// `a -> b -> c` with a legend pair.
pub(crate) const CHAIN_WITH_LEGEND_DOT: &str = r#"digraph {
    A [label="Alpha"];
    B [label="Beta"];
    C [label="Gamma"];
    A -> B [label="feeds"];
    B -> C;
    subgraph cluster_legend {
        legend_in [label="input"];
        legend_out [label="output"];
        legend_in -> legend_out;
    }
}"#;

pub(crate) fn chain_with_legend_view() -> AdjacencyView {
    let graph = parse_dot(CHAIN_WITH_LEGEND_DOT).expect("fixture parses");
    AdjacencyView::new(graph.snapshot())
}

/// `a -> {b, c} -> d -> e`.
pub(crate) fn diamond_view() -> AdjacencyView {
    AdjacencyView::new(snapshot(
        &[("a", "A"), ("b", "B"), ("c", "C"), ("d", "D"), ("e", "E")],
        &[("a->b", ""), ("a->c", ""), ("b->d", ""), ("c->d", ""), ("d->e", "")],
    ))
}

/// `a -> b -> c -> a`.
pub(crate) fn cycle_view() -> AdjacencyView {
    AdjacencyView::new(snapshot(
        &[("a", "A"), ("b", "B"), ("c", "C")],
        &[("a->b", ""), ("b->c", ""), ("c->a", "")],
    ))
}

pub(crate) fn malformed_edges_view() -> AdjacencyView {
    AdjacencyView::new(snapshot(
        &[("a", "A"), ("b", "B")],
        &[("a--b", "plain"), ("a->b->a", "double"), ("a->zz", "dangling")],
    ))
}

pub(crate) fn legend_view() -> AdjacencyView {
    AdjacencyView::new(snapshot(
        &[("legend_in", "in"), ("x", "X"), ("legend_out", "out"), ("y", "Y")],
        &[("legend_in->legend_out", ""), ("x->y", "")],
    ))
}

/// Labels chosen for search tests.
pub(crate) fn search_view() -> AdjacencyView {
    AdjacencyView::new(snapshot(
        &[
            ("fooNode", "FooBar"),
            ("bar", "bar"),
            ("a", " a "),
            ("unlabeled", ""),
            ("legend_key", "Foo legend"),
        ],
        &[
            ("fooNode->bar", "Foo edge"),
            ("bar->a", ""),
            ("a->unlabeled", "calls"),
        ],
    ))
}
