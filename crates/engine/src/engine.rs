// SPDX-License-Identifier: MIT
// Copyright (c) 2026 EDA Task Runner Contributors

//! `Engine` — the facade that wires a [`ConfigStore`], the adapters, and a
//! [`StatusSink`] to the scheduling hierarchy (spec.md §2 control flow).

use crate::context::Context;
use crate::{action_executor, fanout, kill};
use eda_adapters::{BatchAdapter, ProcessRunner};
use eda_core::{ConfigStore, Intervals, Stage, StatusSink, TaskRecord};
use std::sync::Arc;

/// Entry point for one invocation: BUILD/RUN/CHECK/SUMMARY/RELEASE over a
/// selected task set, or a kill request.
pub struct Engine {
    ctx: Context,
}

impl Engine {
    pub fn new(
        config: Arc<dyn ConfigStore>,
        process: Arc<dyn ProcessRunner>,
        batch: Arc<dyn BatchAdapter>,
        sink: StatusSink,
    ) -> Self {
        Self { ctx: Context { config, process, batch, sink, intervals: Intervals::default(), debug: false } }
    }

    pub fn with_intervals(mut self, intervals: Intervals) -> Self {
        self.ctx.intervals = intervals;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.ctx.debug = debug;
        self
    }

    /// BUILD / CHECK / SUMMARY / RELEASE: a flat fan-out over `tasks`,
    /// invoking the Action Executor concurrently (spec §2 control flow,
    /// second sentence).
    pub async fn run_stage(&self, stage: Stage, tasks: &[Arc<TaskRecord>]) {
        debug_assert!(!matches!(stage, Stage::Run), "use Engine::run for the RUN stage");
        let ctx = &self.ctx;
        let futures = tasks.iter().map(|task| {
            let identity = task.identity.clone();
            async move {
                action_executor::execute(ctx, stage, &identity).await;
            }
        });
        futures::future::join_all(futures).await;
        ctx.sink.done();
    }

    /// RUN: Block-Version Fan-out → Flow Scheduler → Group Scheduler → Run
    /// Executor (spec §2 control flow, first sentence).
    pub async fn run(&self, tasks: &[Arc<TaskRecord>], ignore_fail: bool) {
        fanout::run_block_versions(&self.ctx, tasks, ignore_fail).await;
        self.ctx.sink.done();
    }

    /// Kill every `Running` task in `tasks` (spec §4.6).
    pub async fn kill(&self, tasks: &[Arc<TaskRecord>]) {
        kill::kill_selected(&self.ctx, tasks).await;
        self.ctx.sink.done();
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
