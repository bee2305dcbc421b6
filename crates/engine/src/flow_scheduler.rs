// SPDX-License-Identifier: MIT
// Copyright (c) 2026 EDA Task Runner Contributors

//! Flow Scheduler (spec.md §4.4): runs flow bundles in declared order, with
//! a barrier between bundles and cancellation propagated downstream when an
//! upstream bundle produced an unexpected result.

use crate::context::Context;
use crate::group_scheduler;
use eda_core::{FlowBundle, GroupKey, Status, TaskRecord};
use std::sync::Arc;

/// Run every bundle in `bundles`, in order, over `tasks` (already filtered
/// to one `(Block, Version)` pipeline).
pub async fn run_flows(ctx: &Context, tasks: &[Arc<TaskRecord>], bundles: &[FlowBundle], ignore_fail: bool) {
    let mut previous_bundle: Vec<Arc<TaskRecord>> = Vec::new();

    for bundle in bundles {
        let bundle_tasks: Vec<Arc<TaskRecord>> =
            tasks.iter().filter(|t| bundle.contains(&t.identity.flow)).cloned().collect();

        let upstream_failed = !previous_bundle.is_empty()
            && previous_bundle.iter().any(|t| t.status().is_unexpected());

        if upstream_failed && !ignore_fail {
            for task in &bundle_tasks {
                ctx.sink.start(&task.identity, Status::Cancelled);
                task.set_status(Status::Cancelled);
                ctx.sink.finish(&task.identity, Status::Cancelled);
            }
        } else {
            run_bundle(ctx, &bundle_tasks, ignore_fail).await;
        }

        previous_bundle = bundle_tasks;
    }
}

/// Within one bundle: flows run in parallel, and within a flow, groups run
/// in parallel (the serial/parallel distinction applies only inside a
/// single group — spec §4.4 closing paragraph).
async fn run_bundle(ctx: &Context, bundle_tasks: &[Arc<TaskRecord>], ignore_fail: bool) {
    let groups = partition_by_group(bundle_tasks);
    let futures = groups.into_iter().map(|group_tasks| async move {
        group_scheduler::run_group_for(ctx, &group_tasks, ignore_fail).await;
    });
    futures::future::join_all(futures).await;
}

/// Partition tasks by `(Block,Version,Flow,Vendor,Branch)`, preserving
/// first-seen group order (stable for deterministic test assertions).
fn partition_by_group(tasks: &[Arc<TaskRecord>]) -> Vec<Vec<Arc<TaskRecord>>> {
    let mut order: Vec<GroupKey> = Vec::new();
    let mut buckets: Vec<Vec<Arc<TaskRecord>>> = Vec::new();
    for task in tasks {
        let key = task.identity.group_key();
        match order.iter().position(|k| *k == key) {
            Some(idx) => buckets[idx].push(task.clone()),
            None => {
                order.push(key);
                buckets.push(vec![task.clone()]);
            }
        }
    }
    buckets
}

#[cfg(test)]
#[path = "flow_scheduler_tests.rs"]
mod tests;
