// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dotlight-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dotlight and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Read-only queries over a rendered graph.
//!
//! Adjacency traversal powers selection expansion; the matcher powers text search.

pub mod adjacency;
pub mod search;

pub use adjacency::AdjacencyView;
pub use search::{search, Matcher, ParseSearchModeError, SearchError, SearchMode, SearchSpec};
