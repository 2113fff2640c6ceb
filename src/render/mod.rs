// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dotlight-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dotlight and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The rendering layer seam.
//!
//! A [`RenderEngine`] lays out and draws a graph; the crate only drives it. Renders are started
//! one at a time through the [`RenderQueue`] and report back with a [`RenderCompletion`] that the
//! engine posts to the owning controller's mailbox.

use std::fmt;

use crate::model::{GraphElement, GraphSnapshot, HighlightResult};

pub mod headless;
pub mod queue;

pub use headless::HeadlessEngine;
pub use queue::{RenderHandle, RenderQueue, RenderQueueError, RenderReport, StartedJob};

/// Layout engine requested from the rendering layer.
pub const LAYOUT_ENGINE: &str = "dot";

/// Engine configuration applied before every render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewOptions {
    pub engine: &'static str,
    pub fade: bool,
    pub tween_paths: bool,
    pub tween_shapes: bool,
    pub zoom: bool,
    pub zoom_scale_extent: (f64, f64),
    pub freeze_scroll: bool,
}

impl ViewOptions {
    /// Transitions are always off; disabling zoom pins the scale extent to `(1, 1)`.
    pub fn new(zoom: bool, freeze_scroll: bool) -> Self {
        let zoom_scale_extent = if zoom { (0.0, f64::INFINITY) } else { (1.0, 1.0) };
        Self {
            engine: LAYOUT_ENGINE,
            fade: false,
            tween_paths: false,
            tween_shapes: false,
            zoom,
            zoom_scale_extent,
            freeze_scroll,
        }
    }
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self::new(true, false)
    }
}

/// A source plus the view options it should be rendered with.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderJob {
    pub source: String,
    pub options: ViewOptions,
}

impl RenderJob {
    pub fn new(source: impl Into<String>, options: ViewOptions) -> Self {
        Self {
            source: source.into(),
            options,
        }
    }
}

/// Submission-ordered identifier of a render job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JobTicket(u64);

impl JobTicket {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for JobTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "job#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    Rendered(GraphSnapshot),
    Failed { reason: String },
}

impl RenderOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Rendered(_))
    }
}

/// The "render complete" signal of one job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderCompletion {
    pub ticket: JobTicket,
    pub outcome: RenderOutcome,
}

/// Rendering collaborator driven by a graph controller.
pub trait RenderEngine {
    /// Whether the engine finished its own setup and can accept renders.
    fn is_ready(&self) -> bool;

    fn configure(&mut self, options: &ViewOptions);

    /// Starts rendering `job`. The engine must eventually report a [`RenderCompletion`] carrying
    /// `ticket`, whether the render succeeds or not.
    fn start_render(&mut self, ticket: JobTicket, job: RenderJob);

    /// Emphasizes `highlight`; `None` removes any emphasis.
    fn highlight(&mut self, highlight: Option<&HighlightResult>);

    /// Moves `elements` above everything else, in order.
    fn bring_to_front(&mut self, elements: &[GraphElement]);

    fn reset_zoom(&mut self);
}
