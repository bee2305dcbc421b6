// SPDX-License-Identifier: MIT
// Copyright (c) 2026 EDA Task Runner Contributors

//! Status sink event types (spec.md §6).
//!
//! Events are the only channel through which the engine talks to external
//! observers (a GUI table, a log line, a test harness collecting results).
//! Emission must never block and must never drop events — callers use an
//! unbounded channel (spec §5).

use crate::identity::Identity;
use crate::status::Status;
use crate::task::{JobTag, Runtime};
use serde::{Deserialize, Serialize};

/// Color hint for `message()` events, matching the original tool's GUI
/// severity coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageColor {
    Black,
    Orange,
    Red,
}

/// One of the four event shapes a status sink consumes, plus `done()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    Start { identity: Identity, state: Status },
    Finish { identity: Identity, result: Status },
    SetJob { identity: Identity, job: Option<JobTag> },
    SetRuntime { identity: Identity, runtime: Runtime },
    Message { text: String, color: MessageColor },
    /// Emitted once per orchestration (a BUILD/RUN/CHECK/SUMMARY/RELEASE
    /// invocation over the whole selected task set) when every task has
    /// reached a terminal status.
    Done,
}

/// Thin, cloneable handle over an unbounded event channel.
///
/// `emit` never blocks; a full send error (receiver dropped) is swallowed —
/// by the time anyone would observe it, there is nothing left to observe it
/// with.
#[derive(Clone)]
pub struct StatusSink {
    tx: tokio::sync::mpsc::UnboundedSender<Event>,
}

impl StatusSink {
    pub fn new(tx: tokio::sync::mpsc::UnboundedSender<Event>) -> Self {
        Self { tx }
    }

    fn emit(&self, event: Event) {
        let _ = self.tx.send(event);
    }

    pub fn start(&self, identity: &Identity, state: Status) {
        self.emit(Event::Start { identity: identity.clone(), state });
    }

    pub fn finish(&self, identity: &Identity, result: Status) {
        self.emit(Event::Finish { identity: identity.clone(), result });
    }

    pub fn set_job(&self, identity: &Identity, job: Option<JobTag>) {
        self.emit(Event::SetJob { identity: identity.clone(), job });
    }

    pub fn set_runtime(&self, identity: &Identity, runtime: Runtime) {
        self.emit(Event::SetRuntime { identity: identity.clone(), runtime });
    }

    pub fn message(&self, text: impl Into<String>, color: MessageColor) {
        self.emit(Event::Message { text: text.into(), color });
    }

    pub fn done(&self) {
        self.emit(Event::Done);
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
