// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dotlight-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dotlight and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! A parsed DOT document ([`DotGraph`]) and the rendered elements ([`GraphElement`]) that
//! selection, search and highlighting operate on.

pub mod dot_graph;
pub mod element;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod ids;

pub use dot_graph::{Attributes, DotEdge, DotGraph, DotNode};
pub use element::{
    split_edge_identity, ElementKind, GraphElement, GraphSnapshot, HighlightResult, EDGE_ARROW,
    LEGEND_PREFIX,
};
pub use ids::{Id, IdError, NodeId};
