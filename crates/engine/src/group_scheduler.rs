// SPDX-License-Identifier: MIT
// Copyright (c) 2026 EDA Task Runner Contributors

//! Group Scheduler (spec.md §4.3): tasks sharing one
//! `(Block,Version,Flow,Vendor,Branch)` group, run serial or parallel.

use crate::context::Context;
use crate::run_executor::run_one;
use eda_core::{ConfigStore, RunType, Status, TaskRecord};
use std::sync::Arc;

/// Run every task in `tasks` (already filtered to one group) under
/// `run_type`, honoring `ignore_fail` for serial gating (spec §4.3).
pub async fn run_group(ctx: &Context, tasks: &[Arc<TaskRecord>], run_type: RunType, ignore_fail: bool) {
    match run_type {
        RunType::Parallel => run_parallel(ctx, tasks).await,
        RunType::Serial => run_serial(ctx, tasks, ignore_fail).await,
    }
}

async fn run_parallel(ctx: &Context, tasks: &[Arc<TaskRecord>]) {
    let futures = tasks.iter().filter(|t| !is_in_flight(&t.status())).map(|task| {
        let identity = task.identity.clone();
        async move { run_one(ctx, &identity).await }
    });
    futures::future::join_all(futures).await;
}

async fn run_serial(ctx: &Context, tasks: &[Arc<TaskRecord>], ignore_fail: bool) {
    let mut iter = tasks.iter();
    let Some(first) = iter.next() else { return };

    if is_in_flight(&first.status()) {
        wait_until_settled(ctx, first).await;
    } else {
        run_one(ctx, &first.identity).await;
    }

    let mut predecessor = first;
    for task in iter {
        let predecessor_status = predecessor.status();
        if predecessor_status.is_run_passed() || ignore_fail {
            run_one(ctx, &task.identity).await;
        } else if predecessor_status.is_unexpected() {
            ctx.sink.start(&task.identity, Status::Cancelled);
            task.set_status(Status::Cancelled);
            ctx.sink.finish(&task.identity, Status::Cancelled);
        } else if predecessor_status.is_run_undefined() {
            // Ambiguity preserved per spec §9 / DESIGN.md: neither run nor
            // cancelled — the predecessor's "run undefined" propagates.
            let status = predecessor_status;
            task.set_status(status.clone());
            ctx.sink.finish(&task.identity, status);
        }
        predecessor = task;
    }
}

fn is_in_flight(status: &Status) -> bool {
    matches!(status, Status::Running | Status::Killing)
}

async fn wait_until_settled(ctx: &Context, task: &Arc<TaskRecord>) {
    while is_in_flight(&task.status()) {
        tokio::time::sleep(ctx.intervals.serial_wait_poll).await;
    }
}

/// Resolve the `RUN_TYPE` for one group and run it — the entry point Flow
/// Scheduler calls for each flow's groups within a bundle.
pub async fn run_group_for(ctx: &Context, tasks: &[Arc<TaskRecord>], ignore_fail: bool) {
    let Some(first) = tasks.first() else { return };
    let run_type = ctx.config.run_type(&first.identity.group_key());
    run_group(ctx, tasks, run_type, ignore_fail).await;
}

#[cfg(test)]
#[path = "group_scheduler_tests.rs"]
mod tests;
