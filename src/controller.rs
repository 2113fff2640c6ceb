// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dotlight-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dotlight and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! One interactive graph instance.
//!
//! A [`GraphController`] owns the configuration, selection, current adjacency view and render
//! queue of a single graph. All mutation happens through [`GraphController::handle`], usually
//! driven by [`GraphController::run`] consuming a mailbox of [`Mail`] on one task.

use std::collections::{BTreeSet, VecDeque};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info, warn};

use crate::config::{ConfigChange, WidgetConfig};
use crate::error::ControllerError;
use crate::highlight;
use crate::model::{GraphElement, HighlightResult};
use crate::protocol::{HighlightSnapshot, Snapshot};
use crate::query::{self, AdjacencyView, SearchMode, SearchSpec};
use crate::render::{
    JobTicket, RenderCompletion, RenderEngine, RenderHandle, RenderJob, RenderOutcome,
    RenderQueue, StartedJob,
};
use crate::selection::{Direction, SelectionState};


/// Host-side surface the graph is mounted into.
pub trait HostSurface {
    fn element_exists(&self, element_id: &str) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum InstanceState {
    Uninitialized,
    Initializing,
    Ready,
    Rendering,
    Disposed,
}

impl InstanceState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::Initializing => "initializing",
            Self::Ready => "ready",
            Self::Rendering => "rendering",
            Self::Disposed => "disposed",
        }
    }
}

impl fmt::Display for InstanceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed-count, fixed-delay polling used while waiting for the host and the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 50,
            delay: Duration::from_millis(100),
        }
    }
}

impl RetryPolicy {
    /// Polls `probe` up to `attempts` times, sleeping `delay` after each miss.
    pub async fn wait_until(&self, mut probe: impl FnMut() -> bool) -> bool {
        for attempt in 1..=self.attempts {
            if probe() {
                return true;
            }
            if attempt < self.attempts {
                tokio::time::sleep(self.delay).await;
            }
        }
        false
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Select {
        identities: Vec<String>,
        additive: bool,
    },
    Search {
        query: String,
    },
    ResetZoom,
    /// Escape.
    ClearSelection,
    DirectionChanged(Direction),
    SearchTypeChanged(SearchMode),
    CaseSensitivityChanged(bool),
    ZoomChanged(bool),
    FreezeScrollChanged(bool),
    SourceChanged(String),
    RenderComplete {
        ticket: JobTicket,
        outcome: RenderOutcome,
    },
    Dispose,
}

impl From<ConfigChange> for Command {
    fn from(change: ConfigChange) -> Self {
        match change {
            ConfigChange::SearchType(mode) => Self::SearchTypeChanged(mode),
            ConfigChange::CaseSensitive(value) => Self::CaseSensitivityChanged(value),
            ConfigChange::SelectedDirection(direction) => Self::DirectionChanged(direction),
            ConfigChange::EnableZoom(value) => Self::ZoomChanged(value),
            ConfigChange::FreezeScroll(value) => Self::FreezeScrollChanged(value),
            ConfigChange::DotSource(source) => Self::SourceChanged(source),
        }
    }
}

impl From<RenderCompletion> for Command {
    fn from(completion: RenderCompletion) -> Self {
        Self::RenderComplete {
            ticket: completion.ticket,
            outcome: completion.outcome,
        }
    }
}

/// A command on its way to the controller.
///
/// Requests carry a reply channel and wait until no render is in flight, so the snapshot they
/// receive reflects every source change sent before them.
#[derive(Debug)]
pub struct Mail {
    command: Command,
    reply: Option<oneshot::Sender<Snapshot>>,
}

impl Mail {
    pub fn new(command: Command) -> Self {
        Self {
            command,
            reply: None,
        }
    }

    pub fn request(command: Command) -> (Self, oneshot::Receiver<Snapshot>) {
        let (tx, rx) = oneshot::channel();
        let mail = Self {
            command,
            reply: Some(tx),
        };
        (mail, rx)
    }

    pub fn command(&self) -> &Command {
        &self.command
    }

    fn settles(&self) -> bool {
        self.reply.is_some()
    }
}

impl From<Command> for Mail {
    fn from(command: Command) -> Self {
        Self::new(command)
    }
}

impl From<RenderCompletion> for Mail {
    fn from(completion: RenderCompletion) -> Self {
        Self::new(Command::from(completion))
    }
}

#[derive(Debug)]
pub struct GraphController<E> {
    element_id: String,
    state: InstanceState,
    config: WidgetConfig,
    search_spec: SearchSpec,
    selection: SelectionState,
    view: Option<Arc<AdjacencyView>>,
    highlight: Option<HighlightResult>,
    render_error: Option<String>,
    queue: RenderQueue,
    engine: E,
}

impl<E: RenderEngine> GraphController<E> {
    pub fn new(element_id: impl Into<String>, config: WidgetConfig, engine: E) -> Self {
        let search_spec = config.search_spec();
        Self {
            element_id: element_id.into(),
            state: InstanceState::Uninitialized,
            config,
            search_spec,
            selection: SelectionState::default(),
            view: None,
            highlight: None,
            render_error: None,
            queue: RenderQueue::new(),
            engine,
        }
    }

    pub fn element_id(&self) -> &str {
        &self.element_id
    }

    pub fn state(&self) -> InstanceState {
        self.state
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn search_spec(&self) -> &SearchSpec {
        &self.search_spec
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// The graph of the last successful render.
    pub fn view(&self) -> Option<&AdjacencyView> {
        self.view.as_deref()
    }

    pub fn highlight(&self) -> Option<&HighlightResult> {
        self.highlight.as_ref()
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn is_rendering(&self) -> bool {
        self.queue.in_flight().is_some()
    }

    /// Waits for the host element and the engine, then queues the configured source.
    ///
    /// Either wait running out disposes the instance.
    pub async fn initialize(
        &mut self,
        host: &impl HostSurface,
        policy: RetryPolicy,
    ) -> Result<(), ControllerError> {
        match self.state {
            InstanceState::Uninitialized => {}
            InstanceState::Disposed => return Err(ControllerError::Disposed),
            _ => return Ok(()),
        }
        self.state = InstanceState::Initializing;
        debug!(element = %self.element_id, "waiting for host element");

        let element_id = self.element_id.clone();
        if !policy.wait_until(|| host.element_exists(&element_id)).await {
            return Err(self.fail_initialization("host element", policy));
        }

        self.engine.configure(&self.config.view_options());
        debug!(element = %self.element_id, "waiting for render engine");
        let engine = &self.engine;
        if !policy.wait_until(|| engine.is_ready()).await {
            return Err(self.fail_initialization("render engine", policy));
        }

        self.state = InstanceState::Ready;
        info!(element = %self.element_id, "graph instance ready");

        // Jobs queued before initialization already carry the latest source.
        if self.queue.is_idle() && !self.config.dot_source.is_empty() {
            self.submit_render()?;
        }
        if let Some(started) = self.queue.open() {
            self.start(started);
        }
        self.sync_state();
        Ok(())
    }

    fn fail_initialization(&mut self, waiting_for: &'static str, policy: RetryPolicy) -> ControllerError {
        let err = ControllerError::InitializationTimeout {
            waiting_for,
            attempts: policy.attempts,
        };
        error!(element = %self.element_id, error = %err, "graph initialization failed");
        self.dispose();
        err
    }

    /// Queues a render of the current source and view options.
    pub fn submit_render(&mut self) -> Result<RenderHandle, ControllerError> {
        let job = RenderJob::new(self.config.dot_source.clone(), self.config.view_options());
        let (handle, started) = self.queue.submit(job).map_err(|_| ControllerError::Disposed)?;
        debug!(ticket = %handle.ticket(), pending = self.queue.pending_len(), "render queued");
        if let Some(started) = started {
            self.start(started);
        }
        self.sync_state();
        Ok(handle)
    }

    pub fn handle(&mut self, command: Command) -> Result<(), ControllerError> {
        if self.state == InstanceState::Disposed {
            return match command {
                Command::Dispose => Ok(()),
                _ => Err(ControllerError::Disposed),
            };
        }

        match command {
            Command::Select {
                identities,
                additive,
            } => self.select(&identities, additive),
            Command::Search { query } => self.search(&query),
            Command::ResetZoom => {
                self.reset_graph();
                Ok(())
            }
            Command::ClearSelection => {
                self.clear_highlight();
                Ok(())
            }
            Command::DirectionChanged(direction) => {
                self.config.apply(ConfigChange::SelectedDirection(direction));
                self.reset_graph();
                Ok(())
            }
            Command::SearchTypeChanged(mode) => {
                self.config.apply(ConfigChange::SearchType(mode));
                self.search_spec = self.config.search_spec();
                Ok(())
            }
            Command::CaseSensitivityChanged(value) => {
                self.config.apply(ConfigChange::CaseSensitive(value));
                self.search_spec = self.config.search_spec();
                Ok(())
            }
            Command::ZoomChanged(value) => {
                self.config.apply(ConfigChange::EnableZoom(value));
                self.submit_render().map(drop)
            }
            Command::FreezeScrollChanged(value) => {
                self.config.apply(ConfigChange::FreezeScroll(value));
                self.engine.configure(&self.config.view_options());
                Ok(())
            }
            Command::SourceChanged(source) => {
                self.config.apply(ConfigChange::DotSource(source));
                self.submit_render().map(drop)
            }
            Command::RenderComplete { ticket, outcome } => self.render_complete(ticket, outcome),
            Command::Dispose => {
                self.dispose();
                Ok(())
            }
        }
    }

    pub fn snapshot(&self, error: Option<&ControllerError>) -> Snapshot {
        Snapshot {
            state: self.state,
            selection: self.selection.len(),
            direction: self.config.selected_direction,
            search_type: self.config.search_type,
            case_sensitive: self.config.case_sensitive,
            highlight: self.highlight.as_ref().map(HighlightSnapshot::from),
            render_error: self.render_error.clone(),
            error: error.map(ToString::to_string),
        }
    }

    /// Processes mail until `Dispose` or until every sender is gone.
    pub async fn run(&mut self, mailbox: &mut mpsc::UnboundedReceiver<Mail>) {
        let mut deferred: VecDeque<Mail> = VecDeque::new();

        'mailbox: while let Some(mail) = mailbox.recv().await {
            if mail.settles() && (self.is_rendering() || !deferred.is_empty()) {
                deferred.push_back(mail);
                continue;
            }
            if self.deliver(mail) {
                break;
            }
            while !self.is_rendering() {
                let Some(mail) = deferred.pop_front() else {
                    break;
                };
                if self.deliver(mail) {
                    break 'mailbox;
                }
            }
        }

        for mail in deferred {
            self.deliver(mail);
        }
        debug!(element = %self.element_id, state = %self.state, "mailbox loop finished");
    }

    /// Handles one mail and answers its request. Returns whether the instance was disposed.
    fn deliver(&mut self, mail: Mail) -> bool {
        let Mail { command, reply } = mail;
        let disposing = command == Command::Dispose;

        let result = self.handle(command);
        if let Err(err) = &result {
            match err {
                ControllerError::RenderEngineFailure { .. } => {
                    error!(element = %self.element_id, error = %err, "render failed, keeping previous graph")
                }
                _ => warn!(element = %self.element_id, error = %err, "command rejected"),
            }
        }
        if let Some(reply) = reply {
            let _ = reply.send(self.snapshot(result.as_ref().err()));
        }
        disposing
    }

    fn current_view(&self) -> Result<Arc<AdjacencyView>, ControllerError> {
        self.view.clone().ok_or(ControllerError::NotReady)
    }

    fn select(&mut self, identities: &[String], additive: bool) -> Result<(), ControllerError> {
        let view = self.current_view()?;
        if identities.is_empty() {
            return Err(ControllerError::EmptySelection);
        }

        let mut elements: BTreeSet<GraphElement> = BTreeSet::new();
        for identity in identities {
            if let Some(node) = view.node_by_identity(identity) {
                elements.insert(node.clone());
                continue;
            }
            let edges = view.edges_by_identity(identity);
            if edges.is_empty() {
                return Err(ControllerError::UnknownElement {
                    identity: identity.clone(),
                });
            }
            elements.extend(edges.into_iter().cloned());
        }

        let direction = self.config.selected_direction;
        if additive {
            self.selection.add_selection(elements, direction);
        } else {
            self.selection.replace_selection(elements, direction);
        }
        debug!(entries = self.selection.len(), %direction, "selection updated");

        let result = highlight::resolve(&self.selection, &view);
        self.apply(result);
        Ok(())
    }

    fn search(&mut self, query: &str) -> Result<(), ControllerError> {
        let view = self.current_view()?;
        let found = query::search(&view, &self.search_spec, query)?;
        debug!(query, nodes = found.nodes.len(), edges = found.edges.len(), "search matched");
        self.apply(highlight::with_legend(found, &view));
        Ok(())
    }

    /// Highlights `result` and raises it, nodes first.
    fn apply(&mut self, result: HighlightResult) {
        self.engine.highlight(Some(&result));
        let nodes: Vec<GraphElement> = result.nodes.iter().cloned().collect();
        let edges: Vec<GraphElement> = result.edges.iter().cloned().collect();
        self.engine.bring_to_front(&nodes);
        self.engine.bring_to_front(&edges);
        self.highlight = Some(result);
    }

    fn clear_highlight(&mut self) {
        self.selection.clear();
        self.highlight = None;
        self.engine.highlight(None);
    }

    fn reset_graph(&mut self) {
        self.engine.reset_zoom();
        self.clear_highlight();
    }

    fn render_complete(
        &mut self,
        ticket: JobTicket,
        outcome: RenderOutcome,
    ) -> Result<(), ControllerError> {
        let next = match self.queue.complete(ticket, outcome.is_success()) {
            Ok(next) => next,
            Err(err) => {
                warn!(%ticket, error = %err, "ignoring render completion");
                return Ok(());
            }
        };

        let result = match outcome {
            RenderOutcome::Rendered(snapshot) => {
                let view = AdjacencyView::new(snapshot);
                info!(
                    %ticket,
                    nodes = view.all_nodes().len(),
                    edges = view.all_edges().len(),
                    "graph rendered"
                );
                self.view = Some(Arc::new(view));
                self.render_error = None;
                self.reapply_selection();
                Ok(())
            }
            RenderOutcome::Failed { reason } => {
                self.render_error = Some(reason.clone());
                self.restore_highlight();
                Err(ControllerError::RenderEngineFailure { ticket, reason })
            }
        };

        if let Some(started) = next {
            self.start(started);
        }
        self.sync_state();
        result
    }

    fn reapply_selection(&mut self) {
        let Some(view) = self.view.clone() else {
            return;
        };
        self.selection.rebind(|element| {
            if element.is_node() {
                view.node_by_identity(element.identity()).cloned().into_iter().collect()
            } else {
                view.edges_by_identity(element.identity()).into_iter().cloned().collect()
            }
        });
        if self.selection.is_empty() {
            self.highlight = None;
            self.engine.highlight(None);
            return;
        }
        let result = highlight::resolve(&self.selection, &view);
        self.apply(result);
    }

    /// The engine drops emphasis when a render starts; a failed render keeps the last graph.
    fn restore_highlight(&mut self) {
        match self.highlight.take() {
            Some(result) => self.apply(result),
            None => self.engine.highlight(None),
        }
    }

    fn start(&mut self, started: StartedJob) {
        let StartedJob { ticket, job } = started;
        debug!(%ticket, bytes = job.source.len(), "render started");
        self.engine.configure(&job.options);
        self.engine.start_render(ticket, job);
    }

    fn dispose(&mut self) {
        self.queue.dispose();
        self.selection.clear();
        self.highlight = None;
        self.view = None;
        self.state = InstanceState::Disposed;
        info!(element = %self.element_id, "graph instance disposed");
    }

    fn sync_state(&mut self) {
        if matches!(self.state, InstanceState::Ready | InstanceState::Rendering) {
            self.state = if self.is_rendering() {
                InstanceState::Rendering
            } else {
                InstanceState::Ready
            };
        }
    }
}
