// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dotlight-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dotlight and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Multi-selection state of one graph instance.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::model::GraphElement;

/// Traversal mode applied to a selection.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Single,
    Upstream,
    Downstream,
    #[default]
    Bidirectional,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Upstream => "upstream",
            Self::Downstream => "downstream",
            Self::Bidirectional => "bidirectional",
        }
    }

    pub fn includes_upstream(self) -> bool {
        matches!(self, Self::Upstream | Self::Bidirectional)
    }

    pub fn includes_downstream(self) -> bool {
        matches!(self, Self::Downstream | Self::Bidirectional)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown direction: {0:?} (expected single/upstream/downstream/bidirectional)")]
pub struct ParseDirectionError(String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single" => Ok(Self::Single),
            "upstream" => Ok(Self::Upstream),
            "downstream" => Ok(Self::Downstream),
            "bidirectional" => Ok(Self::Bidirectional),
            _ => Err(ParseDirectionError(s.to_owned())),
        }
    }
}

/// Base elements plus the direction that was configured when they were selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionEntry {
    elements: BTreeSet<GraphElement>,
    direction: Direction,
}

impl SelectionEntry {
    pub fn new(elements: BTreeSet<GraphElement>, direction: Direction) -> Self {
        Self {
            elements,
            direction,
        }
    }

    pub fn elements(&self) -> &BTreeSet<GraphElement> {
        &self.elements
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }
}

/// Ordered selection entries. `rev` changes on every effective mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    rev: u64,
    entries: Vec<SelectionEntry>,
}

impl SelectionState {
    pub fn rev(&self) -> u64 {
        self.rev
    }

    pub fn entries(&self) -> &[SelectionEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Plain click: the state becomes exactly one entry.
    pub fn replace_selection(&mut self, elements: BTreeSet<GraphElement>, direction: Direction) {
        self.entries.clear();
        self.entries.push(SelectionEntry::new(elements, direction));
        self.bump();
    }

    /// Modifier click: appends an entry and keeps the previous ones.
    pub fn add_selection(&mut self, elements: BTreeSet<GraphElement>, direction: Direction) {
        self.entries.push(SelectionEntry::new(elements, direction));
        self.bump();
    }

    pub fn clear(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        self.entries.clear();
        self.bump();
    }

    /// Maps every base element through `lookup`, dropping entries left with no elements.
    ///
    /// Used after a re-render, when the same identities come back with new ordinals or labels.
    pub fn rebind<F>(&mut self, mut lookup: F)
    where
        F: FnMut(&GraphElement) -> Vec<GraphElement>,
    {
        let mut changed = false;
        for entry in &mut self.entries {
            let rebound: BTreeSet<GraphElement> =
                entry.elements.iter().flat_map(&mut lookup).collect();
            if rebound != entry.elements {
                entry.elements = rebound;
                changed = true;
            }
        }
        let before = self.entries.len();
        self.entries.retain(|entry| !entry.elements.is_empty());
        if changed || self.entries.len() != before {
            self.bump();
        }
    }

    fn bump(&mut self) {
        self.rev = self.rev.wrapping_add(1);
    }
}
