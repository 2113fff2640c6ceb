// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dotlight-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dotlight and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use std::fmt::Write as _;

use dotlight::format::parse_dot;
use dotlight::model::HighlightResult;
use dotlight::query::AdjacencyView;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DagParams {
    pub layers: usize,
    pub nodes_per_layer: usize,
    pub fanout: usize,
    pub cross_edges_per_node: usize,
    pub label_len: usize,
    pub legend_nodes: usize,
}

impl DagParams {
    pub const fn new(
        layers: usize,
        nodes_per_layer: usize,
        fanout: usize,
        cross_edges_per_node: usize,
        label_len: usize,
        legend_nodes: usize,
    ) -> Self {
        Self {
            layers,
            nodes_per_layer,
            fanout,
            cross_edges_per_node,
            label_len,
            legend_nodes,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    Small,
    MediumDense,
    LargeLongLabels,
}

impl Case {
    pub const ALL: [Case; 3] = [Self::Small, Self::MediumDense, Self::LargeLongLabels];

    pub const fn id(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::MediumDense => "medium_dense",
            Self::LargeLongLabels => "large_long_labels",
        }
    }

    pub const fn params(self) -> DagParams {
        match self {
            Self::Small => DagParams::new(6, 10, 2, 0, 12, 2),
            Self::MediumDense => DagParams::new(12, 20, 4, 1, 12, 4),
            Self::LargeLongLabels => DagParams::new(24, 35, 4, 2, 64, 6),
        }
    }
}

pub fn node_name(layer: usize, idx: usize) -> String {
    format!("l{layer:02}_n{idx:04}")
}

fn label(base: &str, target_len: usize) -> String {
    let mut out = String::with_capacity(target_len.max(base.len()));
    out.push_str(base);
    while out.len() < target_len {
        out.push('x');
    }
    out
}

/// Layered DAG as DOT source, with a legend chain in its own cluster.
pub fn dag_source(params: DagParams) -> String {
    assert!(params.layers >= 2, "layers must be >= 2");
    assert!(params.nodes_per_layer >= 1, "nodes_per_layer must be >= 1");
    assert!(params.fanout >= 1, "fanout must be >= 1");

    let mut out = String::from("digraph bench {\n    node [shape=box];\n");
    for layer in 0..params.layers {
        for idx in 0..params.nodes_per_layer {
            let name = node_name(layer, idx);
            let text = label(&format!("Node_{name}"), params.label_len);
            let _ = writeln!(out, "    {name} [label=\"{text}\"];");
        }
    }

    let fanout = params.fanout.min(params.nodes_per_layer);
    let mut next_edge = 0usize;
    for layer in 0..params.layers - 1 {
        for idx in 0..params.nodes_per_layer {
            let from = node_name(layer, idx);
            for k in 0..fanout {
                let to = node_name(layer + 1, (idx + k) % params.nodes_per_layer);
                let _ = writeln!(out, "    {from} -> {to} [label=\"e{next_edge}\"];");
                next_edge += 1;
            }

            if layer + 2 >= params.layers {
                continue;
            }
            let max_target_layers = params.layers - (layer + 2);
            for k in 0..params.cross_edges_per_node {
                let target_layer = layer + 2 + (k % max_target_layers);
                let to_idx = (idx + 1 + k.saturating_mul(3)) % params.nodes_per_layer;
                let to = node_name(target_layer, to_idx);
                let _ = writeln!(out, "    {from} -> {to};");
                next_edge += 1;
            }
        }
    }

    out.push_str("    subgraph cluster_legend {\n");
    for idx in 0..params.legend_nodes {
        let _ = writeln!(out, "        legend_{idx} [label=\"legend {idx}\"];");
        if idx > 0 {
            let _ = writeln!(out, "        legend_{} -> legend_{idx};", idx - 1);
        }
    }
    out.push_str("    }\n}\n");
    out
}

pub fn fixture_source(case: Case) -> String {
    dag_source(case.params())
}

pub fn fixture_view(case: Case) -> AdjacencyView {
    let graph = parse_dot(&fixture_source(case)).expect("fixture parses");
    AdjacencyView::new(graph.snapshot())
}

/// A node in the middle layer, so both traversal directions have work to do.
pub fn middle_node(case: Case) -> String {
    let params = case.params();
    node_name(params.layers / 2, params.nodes_per_layer / 2)
}

pub fn checksum_highlight(result: &HighlightResult) -> u64 {
    let mut acc = 0u64;
    for element in result.nodes.iter().chain(result.edges.iter()) {
        acc = acc.wrapping_mul(131).wrapping_add(element.identity().len() as u64);
        acc = acc.wrapping_mul(131).wrapping_add(element.ordinal() as u64);
    }
    acc
}
