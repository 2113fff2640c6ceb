// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dotlight-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dotlight and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Reader for the subset of the Graphviz DOT language used by widget sources.
//!
//! Supported: `strict`, `graph`/`digraph` headers, node/edge/attribute statements, `ID = ID`
//! assignments, nested (anonymous) subgraphs including subgraphs as edge endpoints, ports
//! (parsed and dropped), quoted strings with `+` concatenation, HTML strings, and `//`, `/* */`
//! and `#` comments. In `strict` graphs repeated edges between the same endpoints are merged.

use std::fmt;
use std::iter::Peekable;
use std::str::CharIndices;

use crate::model::{Attributes, DotEdge, DotGraph, NodeId};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DotParseError {
    #[error("expected 'graph' or 'digraph' header")]
    MissingHeader,
    #[error("unexpected character on line {line_no}: '{ch}'")]
    UnexpectedChar { line_no: usize, ch: char },
    #[error("unterminated quoted string starting on line {line_no}")]
    UnterminatedString { line_no: usize },
    #[error("unterminated HTML string starting on line {line_no}")]
    UnterminatedHtml { line_no: usize },
    #[error("unterminated comment starting on line {line_no}")]
    UnterminatedComment { line_no: usize },
    #[error("unexpected {found} on line {line_no} (expected {expected})")]
    UnexpectedToken {
        line_no: usize,
        found: String,
        expected: &'static str,
    },
    #[error("unexpected end of input (expected {expected})")]
    UnexpectedEof { expected: &'static str },
    #[error("edge operator '{op}' on line {line_no} does not match the graph kind")]
    MismatchedEdgeOp { line_no: usize, op: &'static str },
    #[error("empty node id on line {line_no}")]
    EmptyNodeId { line_no: usize },
    #[error("unexpected content after the graph body on line {line_no}")]
    TrailingContent { line_no: usize },
    #[error("subgraphs nested deeper than {MAX_NESTING} levels on line {line_no}")]
    NestingTooDeep { line_no: usize },
}

/// Deepest subgraph/block nesting accepted; the parser recurses once per level.
pub const MAX_NESTING: usize = 128;

#[derive(Debug, Clone, PartialEq, Eq)]
enum TokenKind {
    Id { value: String, quoted: bool },
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Semi,
    Comma,
    Equals,
    Colon,
    Plus,
    EdgeOp { directed: bool },
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id { value, .. } => write!(f, "id '{value}'"),
            Self::LBrace => f.write_str("'{'"),
            Self::RBrace => f.write_str("'}'"),
            Self::LBracket => f.write_str("'['"),
            Self::RBracket => f.write_str("']'"),
            Self::Semi => f.write_str("';'"),
            Self::Comma => f.write_str("','"),
            Self::Equals => f.write_str("'='"),
            Self::Colon => f.write_str("':'"),
            Self::Plus => f.write_str("'+'"),
            Self::EdgeOp { directed: true } => f.write_str("'->'"),
            Self::EdgeOp { directed: false } => f.write_str("'--'"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Token {
    kind: TokenKind,
    line_no: usize,
}

impl Token {
    fn is_keyword(&self, keyword: &str) -> bool {
        matches!(
            &self.kind,
            TokenKind::Id { value, quoted: false } if value.eq_ignore_ascii_case(keyword)
        )
    }
}

fn is_id_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_' || !ch.is_ascii()
}

fn is_id_char(ch: char) -> bool {
    is_id_start(ch) || ch.is_ascii_digit()
}

struct Lexer<'a> {
    src: &'a str,
    chars: Peekable<CharIndices<'a>>,
    line_no: usize,
    at_line_start: bool,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            chars: src.char_indices().peekable(),
            line_no: 1,
            at_line_start: true,
            tokens: Vec::new(),
        }
    }

    fn bump(&mut self) -> Option<(usize, char)> {
        let next = self.chars.next();
        if let Some((_, '\n')) = next {
            self.line_no += 1;
            self.at_line_start = true;
        }
        next
    }

    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, ch)| *ch)
    }

    fn peek_second(&self) -> Option<char> {
        let mut ahead = self.chars.clone();
        ahead.next();
        ahead.next().map(|(_, ch)| ch)
    }

    fn push(&mut self, kind: TokenKind, line_no: usize) {
        self.tokens.push(Token { kind, line_no });
        self.at_line_start = false;
    }

    fn run(mut self) -> Result<Vec<Token>, DotParseError> {
        while let Some(ch) = self.peek_char() {
            if ch.is_whitespace() {
                self.bump();
                continue;
            }

            let line_no = self.line_no;
            match ch {
                '#' if self.at_line_start => self.skip_line(),
                '/' if self.peek_second() == Some('/') => self.skip_line(),
                '/' if self.peek_second() == Some('*') => self.skip_block_comment()?,
                '"' => {
                    let value = self.quoted()?;
                    self.push(TokenKind::Id { value, quoted: true }, line_no);
                }
                '<' => {
                    let value = self.html()?;
                    self.push(TokenKind::Id { value, quoted: true }, line_no);
                }
                '-' if self.peek_second() == Some('>') => {
                    self.bump();
                    self.bump();
                    self.push(TokenKind::EdgeOp { directed: true }, line_no);
                }
                '-' if self.peek_second() == Some('-') => {
                    self.bump();
                    self.bump();
                    self.push(TokenKind::EdgeOp { directed: false }, line_no);
                }
                '-' | '.' | '0'..='9' => {
                    let value = self.numeral();
                    if value == "-" || value == "." || value == "-." {
                        return Err(DotParseError::UnexpectedChar { line_no, ch });
                    }
                    self.push(TokenKind::Id { value, quoted: false }, line_no);
                }
                _ if is_id_start(ch) => {
                    let value = self.bare_id();
                    self.push(TokenKind::Id { value, quoted: false }, line_no);
                }
                _ => {
                    let kind = match ch {
                        '{' => TokenKind::LBrace,
                        '}' => TokenKind::RBrace,
                        '[' => TokenKind::LBracket,
                        ']' => TokenKind::RBracket,
                        ';' => TokenKind::Semi,
                        ',' => TokenKind::Comma,
                        '=' => TokenKind::Equals,
                        ':' => TokenKind::Colon,
                        '+' => TokenKind::Plus,
                        _ => return Err(DotParseError::UnexpectedChar { line_no, ch }),
                    };
                    self.bump();
                    self.push(kind, line_no);
                }
            }
        }
        Ok(self.tokens)
    }

    fn skip_line(&mut self) {
        while let Some((_, ch)) = self.bump() {
            if ch == '\n' {
                break;
            }
        }
    }

    fn skip_block_comment(&mut self) -> Result<(), DotParseError> {
        let line_no = self.line_no;
        self.bump();
        self.bump();
        let mut prev = '\0';
        while let Some((_, ch)) = self.bump() {
            if prev == '*' && ch == '/' {
                return Ok(());
            }
            prev = ch;
        }
        Err(DotParseError::UnterminatedComment { line_no })
    }

    fn quoted(&mut self) -> Result<String, DotParseError> {
        let line_no = self.line_no;
        self.bump();
        let mut out = String::new();
        while let Some((_, ch)) = self.bump() {
            match ch {
                '"' => return Ok(out),
                '\\' => match self.peek_char() {
                    Some('"') => {
                        self.bump();
                        out.push('"');
                    }
                    // Escaped newline continues the string on the next line.
                    Some('\n') => {
                        self.bump();
                    }
                    // Other escapes (`\N`, `\n`, `\l`, ...) are Graphviz label escapes: keep them.
                    _ => out.push('\\'),
                },
                _ => out.push(ch),
            }
        }
        Err(DotParseError::UnterminatedString { line_no })
    }

    fn html(&mut self) -> Result<String, DotParseError> {
        let line_no = self.line_no;
        self.bump();
        let mut depth = 1usize;
        let mut out = String::new();
        while let Some((_, ch)) = self.bump() {
            match ch {
                '<' => depth += 1,
                '>' => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(out);
                    }
                }
                _ => {}
            }
            out.push(ch);
        }
        Err(DotParseError::UnterminatedHtml { line_no })
    }

    fn numeral(&mut self) -> String {
        let start = self.chars.peek().map(|(idx, _)| *idx).unwrap_or(self.src.len());
        let mut end = start;
        let mut seen_dot = false;
        let mut first = true;
        while let Some((idx, ch)) = self.chars.peek().copied() {
            let accept = match ch {
                '-' => first,
                '.' if !seen_dot => {
                    seen_dot = true;
                    true
                }
                '0'..='9' => true,
                _ => false,
            };
            if !accept {
                break;
            }
            first = false;
            end = idx + ch.len_utf8();
            self.bump();
        }
        self.src[start..end].to_owned()
    }

    fn bare_id(&mut self) -> String {
        let mut out = String::new();
        while let Some(ch) = self.peek_char() {
            if !is_id_char(ch) {
                break;
            }
            out.push(ch);
            self.bump();
        }
        out
    }
}

#[derive(Debug, Clone, Default)]
struct Scope {
    node_defaults: Attributes,
    edge_defaults: Attributes,
}

enum Endpoint {
    Node { id: String, line_no: usize },
    Group(Vec<NodeId>),
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_kind(&self) -> Option<&TokenKind> {
        self.peek().map(|token| &token.kind)
    }

    fn next(&mut self, expected: &'static str) -> Result<Token, DotParseError> {
        let token = self
            .tokens
            .get(self.pos)
            .cloned()
            .ok_or(DotParseError::UnexpectedEof { expected })?;
        self.pos += 1;
        Ok(token)
    }

    fn expect(&mut self, kind: TokenKind, expected: &'static str) -> Result<(), DotParseError> {
        let token = self.next(expected)?;
        if token.kind != kind {
            return Err(unexpected(&token, expected));
        }
        Ok(())
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.peek_kind() == Some(kind) {
            self.pos += 1;
            return true;
        }
        false
    }

    fn parse_graph(&mut self) -> Result<DotGraph, DotParseError> {
        let mut header = self.next("graph header").map_err(|_| DotParseError::MissingHeader)?;
        let strict = header.is_keyword("strict");
        if strict {
            header = self.next("graph header").map_err(|_| DotParseError::MissingHeader)?;
        }

        let directed = if header.is_keyword("digraph") {
            true
        } else if header.is_keyword("graph") {
            false
        } else {
            return Err(DotParseError::MissingHeader);
        };

        let mut graph = DotGraph::new(directed);
        graph.set_strict(strict);

        if matches!(self.peek_kind(), Some(TokenKind::Id { .. })) {
            let (name, _) = self.parse_id("graph name")?;
            graph.set_name(Some(name));
        }

        self.expect(TokenKind::LBrace, "'{'")?;
        let mut scope = Scope::default();
        self.parse_stmt_list(&mut graph, &mut scope, 0)?;

        if let Some(token) = self.peek() {
            return Err(DotParseError::TrailingContent {
                line_no: token.line_no,
            });
        }
        Ok(graph)
    }

    /// Parses statements up to and including the closing `}` and returns the nodes mentioned.
    fn parse_stmt_list(
        &mut self,
        graph: &mut DotGraph,
        scope: &mut Scope,
        depth: usize,
    ) -> Result<Vec<NodeId>, DotParseError> {
        let mut members = Vec::new();
        loop {
            match self.peek_kind() {
                None => return Err(DotParseError::UnexpectedEof { expected: "'}'" }),
                Some(TokenKind::RBrace) => {
                    self.pos += 1;
                    return Ok(members);
                }
                Some(TokenKind::Semi) => self.pos += 1,
                Some(_) => self.parse_stmt(graph, scope, depth, &mut members)?,
            }
        }
    }

    fn parse_stmt(
        &mut self,
        graph: &mut DotGraph,
        scope: &mut Scope,
        depth: usize,
        members: &mut Vec<NodeId>,
    ) -> Result<(), DotParseError> {
        let Some(token) = self.peek().cloned() else {
            return Err(DotParseError::UnexpectedEof {
                expected: "statement",
            });
        };

        for keyword in ["graph", "node", "edge"] {
            if token.is_keyword(keyword) {
                self.pos += 1;
                let attrs = self.parse_attr_lists()?;
                match keyword {
                    "graph" if depth == 0 => graph.graph_attrs_mut().extend(attrs),
                    "graph" => {}
                    "node" => scope.node_defaults.extend(attrs),
                    _ => scope.edge_defaults.extend(attrs),
                }
                return Ok(());
            }
        }

        let first = self.parse_endpoint(graph, scope, depth, members)?;

        if matches!(self.peek_kind(), Some(TokenKind::EdgeOp { .. })) {
            return self.parse_edge_chain(graph, scope, depth, first, members);
        }

        match first {
            Endpoint::Node { id, line_no } => {
                if self.eat(&TokenKind::Equals) {
                    let (value, _) = self.parse_id("attribute value")?;
                    if depth == 0 {
                        graph.graph_attrs_mut().insert(id, value);
                    }
                    return Ok(());
                }

                let node_id = node_id(&id, line_no)?;
                let attrs = self.parse_attr_lists()?;
                graph.ensure_node(node_id.clone(), &scope.node_defaults).attrs_mut().extend(attrs);
                members.push(node_id);
                Ok(())
            }
            Endpoint::Group(_) => Ok(()),
        }
    }

    fn parse_edge_chain(
        &mut self,
        graph: &mut DotGraph,
        scope: &mut Scope,
        depth: usize,
        first: Endpoint,
        members: &mut Vec<NodeId>,
    ) -> Result<(), DotParseError> {
        let mut resolved = vec![resolve_endpoint(graph, scope, first, members)?];
        while let Some(TokenKind::EdgeOp { directed }) = self.peek_kind().cloned() {
            let token = self.next("edge operator")?;
            if directed != graph.directed() {
                return Err(DotParseError::MismatchedEdgeOp {
                    line_no: token.line_no,
                    op: if directed { "->" } else { "--" },
                });
            }
            let endpoint = self.parse_endpoint(graph, scope, depth, members)?;
            resolved.push(resolve_endpoint(graph, scope, endpoint, members)?);
        }

        let mut attrs = scope.edge_defaults.clone();
        attrs.extend(self.parse_attr_lists()?);

        for pair in resolved.windows(2) {
            for tail in &pair[0] {
                for head in &pair[1] {
                    graph.push_edge(DotEdge::new(tail.clone(), head.clone(), attrs.clone()));
                }
            }
        }
        Ok(())
    }

    fn parse_endpoint(
        &mut self,
        graph: &mut DotGraph,
        scope: &Scope,
        depth: usize,
        members: &mut Vec<NodeId>,
    ) -> Result<Endpoint, DotParseError> {
        let Some(token) = self.peek().cloned() else {
            return Err(DotParseError::UnexpectedEof {
                expected: "node id or subgraph",
            });
        };

        if token.is_keyword("subgraph") || token.kind == TokenKind::LBrace {
            if token.is_keyword("subgraph") {
                self.pos += 1;
                if matches!(self.peek_kind(), Some(TokenKind::Id { .. })) {
                    self.parse_id("subgraph name")?;
                }
            }
            if depth >= MAX_NESTING {
                return Err(DotParseError::NestingTooDeep {
                    line_no: token.line_no,
                });
            }
            self.expect(TokenKind::LBrace, "'{'")?;
            let mut inner = scope.clone();
            let ids = self.parse_stmt_list(graph, &mut inner, depth + 1)?;
            members.extend(ids.iter().cloned());
            return Ok(Endpoint::Group(ids));
        }

        let (id, line_no) = self.parse_id("node id")?;
        if self.eat(&TokenKind::Colon) {
            self.parse_id("port")?;
            if self.eat(&TokenKind::Colon) {
                self.parse_id("compass point")?;
            }
        }
        Ok(Endpoint::Node { id, line_no })
    }

    fn parse_id(&mut self, expected: &'static str) -> Result<(String, usize), DotParseError> {
        let token = self.next(expected)?;
        let TokenKind::Id { value, quoted } = token.kind else {
            return Err(unexpected(&token, expected));
        };

        let mut value = value;
        if quoted {
            while self.eat(&TokenKind::Plus) {
                let next = self.next("quoted string")?;
                match next.kind {
                    TokenKind::Id {
                        value: tail,
                        quoted: true,
                    } => value.push_str(&tail),
                    _ => return Err(unexpected(&next, "quoted string")),
                }
            }
        }
        Ok((value, token.line_no))
    }

    fn parse_attr_lists(&mut self) -> Result<Attributes, DotParseError> {
        let mut attrs = Attributes::new();
        while self.eat(&TokenKind::LBracket) {
            loop {
                if self.eat(&TokenKind::RBracket) {
                    break;
                }
                let (key, _) = self.parse_id("attribute name")?;
                self.expect(TokenKind::Equals, "'='")?;
                let (value, _) = self.parse_id("attribute value")?;
                attrs.insert(key, value);
                if !self.eat(&TokenKind::Comma) {
                    self.eat(&TokenKind::Semi);
                }
            }
        }
        Ok(attrs)
    }
}

fn unexpected(token: &Token, expected: &'static str) -> DotParseError {
    DotParseError::UnexpectedToken {
        line_no: token.line_no,
        found: token.kind.to_string(),
        expected,
    }
}

/// Creates the nodes behind an edge endpoint in the order they are mentioned.
fn resolve_endpoint(
    graph: &mut DotGraph,
    scope: &Scope,
    endpoint: Endpoint,
    members: &mut Vec<NodeId>,
) -> Result<Vec<NodeId>, DotParseError> {
    match endpoint {
        Endpoint::Node { id, line_no } => {
            let node_id = node_id(&id, line_no)?;
            graph.ensure_node(node_id.clone(), &scope.node_defaults);
            members.push(node_id.clone());
            Ok(vec![node_id])
        }
        Endpoint::Group(ids) => Ok(ids),
    }
}

fn node_id(id: &str, line_no: usize) -> Result<NodeId, DotParseError> {
    NodeId::new(id).map_err(|_| DotParseError::EmptyNodeId { line_no })
}

/// Parses DOT source into a [`DotGraph`].
pub fn parse_dot(input: &str) -> Result<DotGraph, DotParseError> {
    let tokens = Lexer::new(input).run()?;
    let mut parser = Parser { tokens, pos: 0 };
    parser.parse_graph()
}
