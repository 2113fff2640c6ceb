// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dotlight-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dotlight and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Host configuration of one graph instance.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::query::{SearchMode, SearchSpec};
use crate::render::ViewOptions;
use crate::selection::Direction;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown config key: {0:?}")]
    UnknownKey(String),
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: ConfigKey, message: String },
}

/// Values the host can set. Missing keys take the widget defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct WidgetConfig {
    pub search_type: SearchMode,
    pub case_sensitive: bool,
    pub selected_direction: Direction,
    pub enable_zoom: bool,
    pub freeze_scroll: bool,
    pub dot_source: String,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            search_type: SearchMode::Included,
            case_sensitive: false,
            selected_direction: Direction::Bidirectional,
            enable_zoom: true,
            freeze_scroll: false,
            dot_source: String::new(),
        }
    }
}

impl WidgetConfig {
    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn apply(&mut self, change: ConfigChange) {
        match change {
            ConfigChange::SearchType(mode) => self.search_type = mode,
            ConfigChange::CaseSensitive(value) => self.case_sensitive = value,
            ConfigChange::SelectedDirection(direction) => self.selected_direction = direction,
            ConfigChange::EnableZoom(value) => self.enable_zoom = value,
            ConfigChange::FreezeScroll(value) => self.freeze_scroll = value,
            ConfigChange::DotSource(source) => self.dot_source = source,
        }
    }

    pub fn search_spec(&self) -> SearchSpec {
        SearchSpec::new(self.search_type, self.case_sensitive)
    }

    pub fn view_options(&self) -> ViewOptions {
        ViewOptions::new(self.enable_zoom, self.freeze_scroll)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ConfigKey {
    SearchType,
    CaseSensitive,
    SelectedDirection,
    EnableZoom,
    FreezeScroll,
    DotSource,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 6] = [
        Self::SearchType,
        Self::CaseSensitive,
        Self::SelectedDirection,
        Self::EnableZoom,
        Self::FreezeScroll,
        Self::DotSource,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::SearchType => "search_type",
            Self::CaseSensitive => "case_sensitive",
            Self::SelectedDirection => "selected_direction",
            Self::EnableZoom => "enable_zoom",
            Self::FreezeScroll => "freeze_scroll",
            Self::DotSource => "dot_source",
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownKey(s.to_owned()))
    }
}

/// A single configuration change notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigChange {
    SearchType(SearchMode),
    CaseSensitive(bool),
    SelectedDirection(Direction),
    EnableZoom(bool),
    FreezeScroll(bool),
    DotSource(String),
}

impl ConfigChange {
    /// Decodes a host `set` request.
    pub fn from_key_value(key: ConfigKey, value: serde_json::Value) -> Result<Self, ConfigError> {
        fn decode<T: serde::de::DeserializeOwned>(
            key: ConfigKey,
            value: serde_json::Value,
        ) -> Result<T, ConfigError> {
            serde_json::from_value(value).map_err(|err| ConfigError::InvalidValue {
                key,
                message: err.to_string(),
            })
        }

        Ok(match key {
            ConfigKey::SearchType => Self::SearchType(decode(key, value)?),
            ConfigKey::CaseSensitive => Self::CaseSensitive(decode(key, value)?),
            ConfigKey::SelectedDirection => Self::SelectedDirection(decode(key, value)?),
            ConfigKey::EnableZoom => Self::EnableZoom(decode(key, value)?),
            ConfigKey::FreezeScroll => Self::FreezeScroll(decode(key, value)?),
            ConfigKey::DotSource => Self::DotSource(decode(key, value)?),
        })
    }

    pub fn key(&self) -> ConfigKey {
        match self {
            Self::SearchType(_) => ConfigKey::SearchType,
            Self::CaseSensitive(_) => ConfigKey::CaseSensitive,
            Self::SelectedDirection(_) => ConfigKey::SelectedDirection,
            Self::EnableZoom(_) => ConfigKey::EnableZoom,
            Self::FreezeScroll(_) => ConfigKey::FreezeScroll,
            Self::DotSource(_) => ConfigKey::DotSource,
        }
    }
}
