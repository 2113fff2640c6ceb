// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dotlight-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dotlight and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! JSON messages exchanged with the host.
//!
//! The host sends one [`HostMessage`] per line; each processed message is answered with a
//! [`Snapshot`] of the instance.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::config::{ConfigChange, ConfigError, ConfigKey};
use crate::controller::{Command, InstanceState};
use crate::model::HighlightResult;
use crate::query::SearchMode;
use crate::selection::Direction;

#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("invalid host message: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum HostMessage {
    /// Resets zoom, highlight and selection.
    ResetZoom,
    Search {
        query: String,
    },
    /// Selects nodes or edges by identity (`source->target` for edges).
    Select {
        ids: Vec<String>,
        #[serde(default)]
        additive: bool,
    },
    /// Same as pressing Escape.
    Clear,
    Set {
        key: ConfigKey,
        value: serde_json::Value,
    },
}

impl HostMessage {
    pub fn parse(line: &str) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_str(line)?)
    }

    pub fn into_command(self) -> Result<Command, ProtocolError> {
        Ok(match self {
            Self::ResetZoom => Command::ResetZoom,
            Self::Search { query } => Command::Search { query },
            Self::Select { ids, additive } => Command::Select {
                identities: ids,
                additive,
            },
            Self::Clear => Command::ClearSelection,
            Self::Set { key, value } => Command::from(ConfigChange::from_key_value(key, value)?),
        })
    }
}

/// JSON schema of [`HostMessage`], pretty printed.
pub fn host_message_schema() -> Result<String, serde_json::Error> {
    let schema = schemars::schema_for!(HostMessage);
    serde_json::to_string_pretty(&schema)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct HighlightSnapshot {
    pub nodes: Vec<String>,
    pub edges: Vec<String>,
}

impl From<&HighlightResult> for HighlightSnapshot {
    fn from(result: &HighlightResult) -> Self {
        Self {
            nodes: result.node_identities().into_iter().map(str::to_owned).collect(),
            edges: result.edge_identities().into_iter().map(str::to_owned).collect(),
        }
    }
}

/// Observable state of one graph instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Snapshot {
    pub state: InstanceState,
    /// Number of selection entries.
    pub selection: usize,
    pub direction: Direction,
    pub search_type: SearchMode,
    pub case_sensitive: bool,
    pub highlight: Option<HighlightSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub render_error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Snapshot {
    pub fn to_json_line(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
