// SPDX-License-Identifier: MIT
// Copyright (c) 2026 EDA Task Runner Contributors

//! Block-Version Fan-out (spec.md §4.5): one independent Flow Scheduler
//! worker per distinct `(Block, Version)` pair in the selection.

use crate::context::Context;
use crate::flow_scheduler;
use eda_core::TaskRecord;
use std::sync::Arc;

/// Run the Flow Scheduler concurrently for every distinct `(Block,
/// Version)` pair present in `tasks`, waiting for all of them to finish.
///
/// No ordering is guaranteed across pipelines (spec §5).
pub async fn run_block_versions(ctx: &Context, tasks: &[Arc<TaskRecord>], ignore_fail: bool) {
    let mut handles = Vec::new();
    for (block, version) in distinct_block_versions(tasks) {
        let ctx = ctx.clone();
        let pair_tasks: Vec<Arc<TaskRecord>> = tasks
            .iter()
            .filter(|t| t.identity.block == block && t.identity.version == version)
            .cloned()
            .collect();
        let bundles = ctx.config.run_order(&block, &version);
        handles.push(tokio::spawn(async move {
            flow_scheduler::run_flows(&ctx, &pair_tasks, &bundles, ignore_fail).await;
        }));
    }
    for handle in handles {
        let _ = handle.await;
    }
}

fn distinct_block_versions(tasks: &[Arc<TaskRecord>]) -> Vec<(String, String)> {
    let mut seen = Vec::new();
    for t in tasks {
        let key = (t.identity.block.clone(), t.identity.version.clone());
        if !seen.contains(&key) {
            seen.push(key);
        }
    }
    seen
}

#[cfg(test)]
#[path = "fanout_tests.rs"]
mod tests;
