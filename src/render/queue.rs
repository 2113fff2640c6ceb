// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dotlight-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dotlight and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! FIFO serialization of render jobs.
//!
//! The queue never talks to an engine itself. Every mutating call hands back the job that should
//! start next (if any) so the owner starts it on the engine; the owner feeds the engine's
//! completion signal back through [`RenderQueue::complete`].

use std::collections::VecDeque;

use tokio::sync::oneshot;

use super::{JobTicket, RenderJob};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderQueueError {
    #[error("render queue is disposed")]
    Disposed,
    #[error("completion for {ticket} does not match the job in flight")]
    UnexpectedCompletion { ticket: JobTicket },
}

/// How a job finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderReport {
    pub ticket: JobTicket,
    pub succeeded: bool,
}

type Done = oneshot::Sender<Result<RenderReport, RenderQueueError>>;

/// Resolves once the job it was issued for completes.
#[derive(Debug)]
pub struct RenderHandle {
    ticket: JobTicket,
    rx: oneshot::Receiver<Result<RenderReport, RenderQueueError>>,
}

impl RenderHandle {
    pub fn ticket(&self) -> JobTicket {
        self.ticket
    }

    pub async fn wait(self) -> Result<RenderReport, RenderQueueError> {
        match self.rx.await {
            Ok(result) => result,
            Err(_) => Err(RenderQueueError::Disposed),
        }
    }

    /// Non-blocking poll; `None` while the job is still queued or rendering.
    pub fn try_result(&mut self) -> Option<Result<RenderReport, RenderQueueError>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(oneshot::error::TryRecvError::Empty) => None,
            Err(oneshot::error::TryRecvError::Closed) => Some(Err(RenderQueueError::Disposed)),
        }
    }
}

/// A job the owner must now start on the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct StartedJob {
    pub ticket: JobTicket,
    pub job: RenderJob,
}

#[derive(Debug)]
struct Pending {
    ticket: JobTicket,
    job: RenderJob,
    done: Done,
}

#[derive(Debug)]
struct InFlight {
    ticket: JobTicket,
    done: Done,
}

/// At most one job in flight; the rest wait in submission order.
///
/// A new queue is closed: jobs accumulate until [`RenderQueue::open`] is called once the engine is
/// ready.
#[derive(Debug)]
pub struct RenderQueue {
    next_ticket: u64,
    open: bool,
    disposed: bool,
    in_flight: Option<InFlight>,
    pending: VecDeque<Pending>,
}

impl Default for RenderQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderQueue {
    pub fn new() -> Self {
        Self {
            next_ticket: 1,
            open: false,
            disposed: false,
            in_flight: None,
            pending: VecDeque::new(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn in_flight(&self) -> Option<JobTicket> {
        self.in_flight.as_ref().map(|in_flight| in_flight.ticket)
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_idle(&self) -> bool {
        self.in_flight.is_none() && self.pending.is_empty()
    }

    pub fn submit(
        &mut self,
        job: RenderJob,
    ) -> Result<(RenderHandle, Option<StartedJob>), RenderQueueError> {
        if self.disposed {
            return Err(RenderQueueError::Disposed);
        }

        let ticket = JobTicket::new(self.next_ticket);
        self.next_ticket += 1;

        let (done, rx) = oneshot::channel();
        self.pending.push_back(Pending { ticket, job, done });
        Ok((RenderHandle { ticket, rx }, self.start_next()))
    }

    /// Lets jobs start. Returns the first one when something was queued while closed.
    pub fn open(&mut self) -> Option<StartedJob> {
        if self.disposed {
            return None;
        }
        self.open = true;
        self.start_next()
    }

    /// Records the completion of the job in flight and returns the next job to start.
    ///
    /// Success and failure advance the queue alike. A ticket that is not in flight is rejected
    /// and leaves the queue untouched.
    pub fn complete(
        &mut self,
        ticket: JobTicket,
        succeeded: bool,
    ) -> Result<Option<StartedJob>, RenderQueueError> {
        if self.disposed {
            return Err(RenderQueueError::Disposed);
        }

        match self.in_flight.take() {
            Some(in_flight) if in_flight.ticket == ticket => {
                let _ = in_flight.done.send(Ok(RenderReport { ticket, succeeded }));
                Ok(self.start_next())
            }
            other => {
                self.in_flight = other;
                Err(RenderQueueError::UnexpectedCompletion { ticket })
            }
        }
    }

    /// Closes the queue for good. Every unfinished handle resolves with `Disposed`.
    pub fn dispose(&mut self) {
        self.disposed = true;
        self.open = false;
        if let Some(in_flight) = self.in_flight.take() {
            let _ = in_flight.done.send(Err(RenderQueueError::Disposed));
        }
        for pending in self.pending.drain(..) {
            let _ = pending.done.send(Err(RenderQueueError::Disposed));
        }
    }

    fn start_next(&mut self) -> Option<StartedJob> {
        if !self.open || self.in_flight.is_some() {
            return None;
        }
        let Pending { ticket, job, done } = self.pending.pop_front()?;
        self.in_flight = Some(InFlight { ticket, done });
        Some(StartedJob { ticket, job })
    }
}
