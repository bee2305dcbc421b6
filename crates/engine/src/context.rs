// SPDX-License-Identifier: MIT
// Copyright (c) 2026 EDA Task Runner Contributors

//! Shared dependencies threaded through every level of the scheduler.

use eda_adapters::{BatchAdapter, ProcessRunner};
use eda_core::{ConfigStore, Intervals, StatusSink};
use std::sync::Arc;

/// Everything an executor needs besides the identity it is acting on.
///
/// Cloning is cheap — every field is an `Arc` or a `Copy` value — so each
/// level of the fan-out hands a fresh clone down to its children instead of
/// threading lifetimes through `tokio::spawn`.
#[derive(Clone)]
pub struct Context {
    pub config: Arc<dyn ConfigStore>,
    pub process: Arc<dyn ProcessRunner>,
    pub batch: Arc<dyn BatchAdapter>,
    pub sink: StatusSink,
    pub intervals: Intervals,
    /// Gates the stdout+stderr debug dump (spec §4.1 "Observable side
    /// effects").
    pub debug: bool,
}
