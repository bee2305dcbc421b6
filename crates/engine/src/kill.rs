// SPDX-License-Identifier: MIT
// Copyright (c) 2026 EDA Task Runner Contributors

//! Kill Orchestrator (spec.md §4.6): translates user-initiated cancellation
//! into batch-kill or local-tree-kill, plus the bookkeeping each needs.

use crate::context::Context;
use eda_core::{Identity, JobTag, MessageColor, Status, TaskRecord};
use std::sync::Arc;

/// Kill every task in `tasks` whose current status is `Running`. Tasks in
/// any other state are left alone (spec §4.6 closing line).
pub async fn kill_selected(ctx: &Context, tasks: &[Arc<TaskRecord>]) {
    let futures = tasks
        .iter()
        .filter(|t| t.status() == Status::Running)
        .map(|task| kill_one(ctx, task));
    futures::future::join_all(futures).await;
}

async fn kill_one(ctx: &Context, task: &Arc<TaskRecord>) {
    let identity: &Identity = &task.identity;
    ctx.sink.start(identity, Status::Killing);
    task.set_status(Status::Killing);

    match task.job() {
        Some(JobTag::Batch(job_id)) => {
            // The Run Executor's reconciliation step (spec §4.2 step 8)
            // observes `Killing` after the process exits and confirms via
            // the batch adapter — this call only requests teardown.
            if let Err(e) = ctx.batch.kill(&job_id).await {
                ctx.sink.message(
                    format!("*Warning*: batch kill failed for {identity}: {e}"),
                    MessageColor::Red,
                );
            }
        }
        Some(JobTag::Local(pid_str)) => {
            // Local tree-kill is immediate: there is no external scheduler
            // to confirm with, so this path finalizes the task itself.
            if let Ok(pid) = pid_str.parse::<u32>() {
                if let Err(e) = ctx.process.kill_tree(pid).await {
                    ctx.sink.message(
                        format!("*Warning*: tree-kill failed for {identity}: {e}"),
                        MessageColor::Red,
                    );
                }
            }
            task.set_status(Status::Killed);
            ctx.sink.finish(identity, Status::Killed);
        }
        None => {
            // Running with no job tag yet — the spawn raced the kill
            // request. Leave the Killing status for reconciliation.
        }
    }
}

#[cfg(test)]
#[path = "kill_tests.rs"]
mod tests;
