// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dotlight-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dotlight and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use dotlight::highlight::with_legend;
use dotlight::query::{search, SearchMode, SearchSpec};

mod fixtures;
mod profiler;

// Benchmark identity (keep stable):
// - Group names in this file: `search.exact`, `search.included`, `search.regex`
// - Case IDs must remain stable across refactors.
fn benches_search(c: &mut Criterion) {
    for (group_name, spec, query) in [
        ("search.exact", SearchSpec::new(SearchMode::Exact, true), "e42"),
        ("search.included", SearchSpec::new(SearchMode::Included, false), "n0007"),
        ("search.regex", SearchSpec::new(SearchMode::Regex, false), r"^node_l0[0-3]_n00[0-9]{2}"),
    ] {
        let mut group = c.benchmark_group(group_name);

        for case in fixtures::Case::ALL {
            let view = fixtures::fixture_view(case);
            let candidates = view.all_nodes().len() * 2 + view.all_edges().len();
            group.throughput(Throughput::Elements(candidates as u64));
            group.bench_function(case.id(), move |b| {
                b.iter(|| {
                    let found = search(black_box(&view), black_box(&spec), black_box(query))
                        .expect("search");
                    let result = with_legend(found, &view);
                    black_box(fixtures::checksum_highlight(&result))
                })
            });
        }

        group.finish();
    }
}

criterion_group! {
    name = benches;
    config = profiler::criterion();
    targets = benches_search
}
criterion_main!(benches);
