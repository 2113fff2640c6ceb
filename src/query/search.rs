// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dotlight-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dotlight and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

use regex::{Regex, RegexBuilder};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::adjacency::AdjacencyView;
use crate::model::HighlightResult;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    /// Trimmed equality.
    Exact,
    /// Substring containment.
    #[default]
    Included,
    /// Regular expression over the trimmed candidate.
    Regex,
}

impl SearchMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Included => "included",
            Self::Regex => "regex",
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown search type: {0:?} (expected exact/included/regex)")]
pub struct ParseSearchModeError(String);

impl FromStr for SearchMode {
    type Err = ParseSearchModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exact" => Ok(Self::Exact),
            "included" => Ok(Self::Included),
            "regex" => Ok(Self::Regex),
            _ => Err(ParseSearchModeError(s.to_owned())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("invalid search pattern {pattern:?}: {message}")]
    InvalidPattern { pattern: String, message: String },
}

/// What to match and how. Rebuilt whenever the host changes `search_type`/`case_sensitive`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchSpec {
    pub mode: SearchMode,
    pub case_sensitive: bool,
    pub match_node_name: bool,
    pub match_node_label: bool,
    pub match_edge_label: bool,
}

impl Default for SearchSpec {
    fn default() -> Self {
        Self::new(SearchMode::default(), false)
    }
}

impl SearchSpec {
    /// A spec matching node names, node labels and edge labels.
    pub fn new(mode: SearchMode, case_sensitive: bool) -> Self {
        Self {
            mode,
            case_sensitive,
            match_node_name: true,
            match_node_label: true,
            match_edge_label: true,
        }
    }

    /// Compiles `query` into a predicate. Only `regex` mode can fail.
    pub fn matcher(&self, query: &str) -> Result<Matcher, SearchError> {
        let matcher = match self.mode {
            SearchMode::Exact => Matcher::Exact {
                query: query.trim().to_owned(),
            },
            SearchMode::Included => Matcher::Included {
                needle: if self.case_sensitive {
                    query.to_owned()
                } else {
                    query.to_lowercase()
                },
                case_sensitive: self.case_sensitive,
            },
            SearchMode::Regex => {
                let regex = RegexBuilder::new(query)
                    .case_insensitive(!self.case_sensitive)
                    .build()
                    .map_err(|err| SearchError::InvalidPattern {
                        pattern: query.to_owned(),
                        message: err.to_string(),
                    })?;
                Matcher::Regex(regex)
            }
        };
        Ok(matcher)
    }
}

#[derive(Debug, Clone)]
pub enum Matcher {
    Exact { query: String },
    Included { needle: String, case_sensitive: bool },
    Regex(Regex),
}

impl Matcher {
    pub fn is_match(&self, candidate: &str) -> bool {
        match self {
            Self::Exact { query } => candidate.trim() == query,
            Self::Included {
                needle,
                case_sensitive: true,
            } => candidate.contains(needle.as_str()),
            Self::Included {
                needle,
                case_sensitive: false,
            } => candidate.to_lowercase().contains(needle.as_str()),
            Self::Regex(regex) => regex.is_match(candidate.trim()),
        }
    }
}

/// Matches `query` against edge labels and node names/labels.
///
/// Empty labels never match. The result does not include legend elements.
pub fn search(
    view: &AdjacencyView,
    spec: &SearchSpec,
    query: &str,
) -> Result<HighlightResult, SearchError> {
    let matcher = spec.matcher(query)?;
    let mut result = HighlightResult::default();

    if spec.match_edge_label {
        for edge in view.all_edges() {
            if !edge.label().is_empty() && matcher.is_match(edge.label()) {
                result.edges.insert(edge.clone());
            }
        }
    }

    if spec.match_node_name || spec.match_node_label {
        for node in view.all_nodes() {
            let by_name = spec.match_node_name && matcher.is_match(node.identity());
            let by_label = spec.match_node_label
                && !node.label().is_empty()
                && matcher.is_match(node.label());
            if by_name || by_label {
                result.nodes.insert(node.clone());
            }
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{search, SearchError, SearchMode, SearchSpec};
    use crate::model::fixtures;

    #[rstest]
    #[case(SearchMode::Included, false, "foo", "FooBar", true)]
    #[case(SearchMode::Included, true, "foo", "FooBar", false)]
    #[case(SearchMode::Included, true, "Foo", "FooBar", true)]
    #[case(SearchMode::Included, false, "", "anything", true)]
    #[case(SearchMode::Exact, false, " a ", "a", true)]
    #[case(SearchMode::Exact, false, "a", "  a\t", true)]
    #[case(SearchMode::Exact, false, "A", "a", false)]
    #[case(SearchMode::Exact, false, "a b", "a  b", false)]
    #[case(SearchMode::Regex, false, "^foo", "  FooBar", true)]
    #[case(SearchMode::Regex, true, "^foo", "FooBar", false)]
    #[case(SearchMode::Regex, true, "Bar$", "FooBar ", true)]
    fn predicate_follows_mode(
        #[case] mode: SearchMode,
        #[case] case_sensitive: bool,
        #[case] query: &str,
        #[case] candidate: &str,
        #[case] expected: bool,
    ) {
        let matcher = SearchSpec::new(mode, case_sensitive).matcher(query).expect("matcher");
        assert_eq!(matcher.is_match(candidate), expected);
    }

    #[test]
    fn invalid_regex_is_reported() {
        let spec = SearchSpec::new(SearchMode::Regex, false);
        let err = spec.matcher("(").expect_err("invalid pattern");
        let SearchError::InvalidPattern { pattern, .. } = err;
        assert_eq!(pattern, "(");
    }

    #[test]
    fn search_matches_node_names_labels_and_edge_labels() {
        let view = fixtures::search_view();
        let result = search(&view, &SearchSpec::default(), "foo").expect("search");
        assert_eq!(result.node_identities(), vec!["fooNode", "legend_key"]);
        assert_eq!(result.edge_identities(), vec!["fooNode->bar"]);
    }

    #[test]
    fn search_respects_match_flags() {
        let view = fixtures::search_view();
        let spec = SearchSpec {
            match_node_label: false,
            match_edge_label: false,
            ..SearchSpec::default()
        };
        let result = search(&view, &spec, "foo").expect("search");
        assert_eq!(result.node_identities(), vec!["fooNode"]);
        assert!(result.edges.is_empty());

        let spec = SearchSpec {
            match_node_name: false,
            match_node_label: false,
            ..SearchSpec::default()
        };
        let result = search(&view, &spec, "calls").expect("search");
        assert!(result.nodes.is_empty());
        assert_eq!(result.edge_identities(), vec!["a->unlabeled"]);
    }

    #[test]
    fn empty_labels_never_match() {
        let view = fixtures::search_view();
        let spec = SearchSpec::new(SearchMode::Regex, false);
        let result = search(&view, &spec, "").expect("search");
        // Every node matches by name; only labeled edges match.
        assert_eq!(result.nodes.len(), view.all_nodes().len());
        assert_eq!(result.edge_identities(), vec!["a->unlabeled", "fooNode->bar"]);
    }

    #[test]
    fn exact_mode_trims_node_labels() {
        let view = fixtures::search_view();
        let spec = SearchSpec::new(SearchMode::Exact, false);
        let result = search(&view, &spec, "a").expect("search");
        assert_eq!(result.node_identities(), vec!["a"]);
    }

    #[test]
    fn search_mode_parses_host_values() {
        assert_eq!("regex".parse::<SearchMode>(), Ok(SearchMode::Regex));
        assert!("fuzzy".parse::<SearchMode>().is_err());
        assert_eq!(SearchMode::Exact.to_string(), "exact");
    }
}
