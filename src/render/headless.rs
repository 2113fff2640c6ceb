// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dotlight-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dotlight and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! In-process rendering layer without a layout engine.
//!
//! "Rendering" parses the DOT source into a [`GraphSnapshot`](crate::model::GraphSnapshot). The
//! engine keeps what a drawing engine would show (view options, emphasis, z-order, zoom resets)
//! so hosts and tests can observe it.

use tokio::sync::mpsc;
use tracing::debug;

use super::{JobTicket, RenderCompletion, RenderEngine, RenderJob, RenderOutcome, ViewOptions};
use crate::format::parse_dot;
use crate::model::{GraphElement, HighlightResult};

/// Parses `source` and returns the elements a render of it would draw.
pub fn render_source(source: &str) -> RenderOutcome {
    match parse_dot(source) {
        Ok(graph) => RenderOutcome::Rendered(graph.snapshot()),
        Err(err) => RenderOutcome::Failed {
            reason: err.to_string(),
        },
    }
}

/// Posts completions as `M` to the owning controller's mailbox.
///
/// `start_render` spawns onto the current tokio runtime.
#[derive(Debug)]
pub struct HeadlessEngine<M> {
    mailbox: mpsc::UnboundedSender<M>,
    options: Option<ViewOptions>,
    highlight: Option<HighlightResult>,
    front: Vec<GraphElement>,
    zoom_resets: usize,
    started: Vec<JobTicket>,
}

impl<M> HeadlessEngine<M> {
    pub fn new(mailbox: mpsc::UnboundedSender<M>) -> Self {
        Self {
            mailbox,
            options: None,
            highlight: None,
            front: Vec::new(),
            zoom_resets: 0,
            started: Vec::new(),
        }
    }

    pub fn options(&self) -> Option<&ViewOptions> {
        self.options.as_ref()
    }

    pub fn current_highlight(&self) -> Option<&HighlightResult> {
        self.highlight.as_ref()
    }

    /// Elements raised by `bring_to_front`, the topmost last.
    pub fn front(&self) -> &[GraphElement] {
        &self.front
    }

    pub fn zoom_resets(&self) -> usize {
        self.zoom_resets
    }

    /// Tickets in the order their renders were started.
    pub fn started(&self) -> &[JobTicket] {
        &self.started
    }
}

impl<M> RenderEngine for HeadlessEngine<M>
where
    M: From<RenderCompletion> + Send + 'static,
{
    fn is_ready(&self) -> bool {
        !self.mailbox.is_closed()
    }

    fn configure(&mut self, options: &ViewOptions) {
        self.options = Some(*options);
    }

    fn start_render(&mut self, ticket: JobTicket, job: RenderJob) {
        self.options = Some(job.options);
        self.started.push(ticket);
        // A new drawing has no emphasis and natural z-order.
        self.highlight = None;
        self.front.clear();

        let mailbox = self.mailbox.clone();
        tokio::spawn(async move {
            let outcome = render_source(&job.source);
            if mailbox.send(M::from(RenderCompletion { ticket, outcome })).is_err() {
                debug!(%ticket, "mailbox closed before render completed");
            }
        });
    }

    fn highlight(&mut self, highlight: Option<&HighlightResult>) {
        self.highlight = highlight.cloned();
    }

    fn bring_to_front(&mut self, elements: &[GraphElement]) {
        self.front.retain(|element| !elements.contains(element));
        self.front.extend(elements.iter().cloned());
    }

    fn reset_zoom(&mut self) {
        self.zoom_resets += 1;
    }
}
