// SPDX-License-Identifier: MIT
// Copyright (c) 2026 EDA Task Runner Contributors

//! Renders the [`eda_core::StatusSink`] event stream to a colored terminal
//! (spec.md §6's "Status sink" interface is the GUI table in the original
//! tool; this is the CLI's stand-in renderer).

use crate::color::{message_color, paint, status_color};
use eda_core::{Event, MessageColor};
use tokio::sync::mpsc::UnboundedReceiver;

/// Drain `rx` until the orchestration's `Event::Done`, printing one line per
/// start/finish/message event. Returns once `Done` is observed or the sender
/// side is dropped.
pub async fn render(mut rx: UnboundedReceiver<Event>) {
    while let Some(event) = rx.recv().await {
        match event {
            Event::Start { identity, state } => {
                let line = format!("{identity}  {state}");
                println!("{}", paint(status_color(&state), &line));
            }
            Event::Finish { identity, result } => {
                let line = format!("{identity}  {result}");
                println!("{}", paint(status_color(&result), &line));
                tracing::info!(%identity, result = %result, "task finished");
            }
            Event::SetJob { identity, job } => {
                if let Some(job) = job {
                    tracing::debug!(%identity, job = %job, "job assigned");
                }
            }
            Event::SetRuntime { identity, runtime } => {
                tracing::debug!(%identity, runtime = %runtime, "runtime updated");
            }
            Event::Message { text, color } => {
                println!("{}", paint(message_color(color), &text));
                if matches!(color, MessageColor::Red) {
                    tracing::warn!("{text}");
                }
            }
            Event::Done => break,
        }
    }
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod tests;
