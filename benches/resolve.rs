// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dotlight-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dotlight and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeSet;

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use dotlight::format::parse_dot;
use dotlight::highlight::resolve;
use dotlight::model::GraphSnapshot;
use dotlight::query::AdjacencyView;
use dotlight::selection::{Direction, SelectionState};

mod fixtures;
mod profiler;

// Benchmark identity (keep stable):
// - Group names in this file: `dot.parse`, `adjacency.build`, `resolve.select`
// - Case IDs (the string after the `/`) must remain stable so results stay comparable.
fn benches_resolve(c: &mut Criterion) {
    {
        let mut group = c.benchmark_group("dot.parse");

        for case in fixtures::Case::ALL {
            let source = fixtures::fixture_source(case);
            group.throughput(Throughput::Bytes(source.len() as u64));
            group.bench_function(case.id(), move |b| {
                b.iter(|| {
                    let graph = parse_dot(black_box(&source)).expect("parse");
                    black_box(graph.nodes().len().wrapping_add(graph.edges().len()))
                })
            });
        }

        group.finish();
    }

    {
        let mut group = c.benchmark_group("adjacency.build");

        for case in fixtures::Case::ALL {
            let snapshot: GraphSnapshot =
                parse_dot(&fixtures::fixture_source(case)).expect("parse").snapshot();
            group.throughput(Throughput::Elements(snapshot.edges.len() as u64));
            group.bench_function(case.id(), move |b| {
                b.iter(|| {
                    let view = AdjacencyView::new(black_box(snapshot.clone()));
                    black_box(view.legend().len())
                })
            });
        }

        group.finish();
    }

    {
        let mut group = c.benchmark_group("resolve.select");

        for case in fixtures::Case::ALL {
            let view = fixtures::fixture_view(case);
            let middle = view
                .node_by_identity(&fixtures::middle_node(case))
                .expect("middle node")
                .clone();

            for direction in [Direction::Upstream, Direction::Bidirectional] {
                let mut selection = SelectionState::default();
                selection.replace_selection(BTreeSet::from([middle.clone()]), direction);
                let mut first = view.all_nodes()[0].clone();
                if first == middle {
                    first = view.all_nodes()[1].clone();
                }
                selection.add_selection(BTreeSet::from([first]), Direction::Downstream);

                group.throughput(Throughput::Elements(view.all_edges().len() as u64));
                let view = view.clone();
                group.bench_function(format!("{}_{direction}", case.id()), move |b| {
                    b.iter(|| {
                        let result = resolve(black_box(&selection), black_box(&view));
                        black_box(fixtures::checksum_highlight(&result))
                    })
                });
            }
        }

        group.finish();
    }
}

criterion_group! {
    name = benches;
    config = profiler::criterion();
    targets = benches_resolve
}
criterion_main!(benches);
