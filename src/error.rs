// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dotlight-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dotlight and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::query::SearchError;
use crate::render::JobTicket;

/// Reasons a graph instance rejects a command or fails.
///
/// Edges with malformed identities are not an error: they are silently left out of traversal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ControllerError {
    /// The host element or the engine did not show up in time. Fatal to the instance.
    #[error("timed out waiting for {waiting_for} after {attempts} attempts")]
    InitializationTimeout {
        waiting_for: &'static str,
        attempts: u32,
    },
    #[error(transparent)]
    InvalidSearchPattern(#[from] SearchError),
    #[error("render {ticket} failed: {reason}")]
    RenderEngineFailure { ticket: JobTicket, reason: String },
    #[error("unknown graph element: {identity:?}")]
    UnknownElement { identity: String },
    #[error("select needs at least one element")]
    EmptySelection,
    #[error("graph is not rendered yet")]
    NotReady,
    #[error("graph instance is disposed")]
    Disposed,
}

impl ControllerError {
    /// Whether the instance is unusable after this error.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::InitializationTimeout { .. } | Self::Disposed)
    }
}
