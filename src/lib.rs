// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dotlight-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dotlight and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Dotlight — selection expansion and search highlighting for rendered DOT graphs.
//!
//! The core is pure: [`query`] answers adjacency and text queries over a rendered graph,
//! [`selection`] accumulates what the user picked and [`highlight`] expands it. A
//! [`controller::GraphController`] ties these to a [`render::RenderEngine`] and serializes
//! re-renders through a FIFO queue.

pub mod config;
pub mod controller;
pub mod error;
pub mod format;
pub mod highlight;
pub mod model;
pub mod protocol;
pub mod query;
pub mod render;
pub mod selection;

pub use config::{ConfigChange, ConfigError, ConfigKey, WidgetConfig};
pub use controller::{Command, GraphController, HostSurface, InstanceState, Mail, RetryPolicy};
pub use error::ControllerError;
