// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dotlight-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dotlight and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Expansion of selection entries into the highlighted subset of a graph.

use crate::model::HighlightResult;
use crate::query::AdjacencyView;
use crate::selection::{SelectionEntry, SelectionState};

/// Expands one entry along its direction.
///
/// Base elements are always part of the expansion. A selected edge contributes its source
/// (upstream) or target (downstream) node together with that node's closure; a selected node
/// contributes its closure. Walked edges are included alongside the nodes. Elements that are not
/// part of `view` (e.g. selected before a re-render removed them) are skipped.
pub fn expand_entry(view: &AdjacencyView, entry: &SelectionEntry) -> HighlightResult {
    let direction = entry.direction();
    let mut result = HighlightResult::default();

    for element in entry.elements() {
        if !view.contains(element) {
            continue;
        }
        result.insert(element.clone());

        if element.is_node() {
            if direction.includes_upstream() {
                result.extend(view.upstream_closure(element.identity()));
            }
            if direction.includes_downstream() {
                result.extend(view.downstream_closure(element.identity()));
            }
            continue;
        }

        // Malformed edge identities are leaves.
        let Some((source, target)) = element.endpoints() else {
            continue;
        };
        if direction.includes_upstream() {
            if let Some(node) = view.node_by_identity(source) {
                result.insert(node.clone());
                result.extend(view.upstream_closure(source));
            }
        }
        if direction.includes_downstream() {
            if let Some(node) = view.node_by_identity(target) {
                result.insert(node.clone());
                result.extend(view.downstream_closure(target));
            }
        }
    }

    result
}

/// Unions the expansion of every entry and adds the legend.
pub fn resolve(selection: &SelectionState, view: &AdjacencyView) -> HighlightResult {
    let mut result = HighlightResult::default();
    for entry in selection.entries() {
        result.extend(expand_entry(view, entry));
    }
    with_legend(result, view)
}

/// Adds every legend node and edge of `view` to `result`.
pub fn with_legend(mut result: HighlightResult, view: &AdjacencyView) -> HighlightResult {
    result.extend(view.legend().clone());
    result
}
