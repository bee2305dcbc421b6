// SPDX-License-Identifier: MIT
// Copyright (c) 2026 EDA Task Runner Contributors

use super::*;
use eda_adapters::test_support::{FakeBatchAdapter, FakeProcessRunner, ScriptedProcess};
use eda_core::test_support::InMemoryConfigStore;
use eda_core::{ActionRecord, Identity, Intervals, Outcome, RunType, Stage};
use std::collections::HashMap;

fn ctx(process: Arc<FakeProcessRunner>, config: Arc<InMemoryConfigStore>) -> Context {
    let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
    Context {
        config,
        process,
        batch: Arc::new(FakeBatchAdapter::new("", [])),
        sink: eda_core::StatusSink::new(tx),
        intervals: Intervals::fast_for_tests(),
        debug: false,
    }
}

fn task(store: &mut InMemoryConfigStore, flow: &str, task_name: &str, command: &str) -> Arc<TaskRecord> {
    let identity = Identity::new("b1", "v1", flow, "vendorA", "br1", task_name);
    let mut actions = HashMap::new();
    actions.insert(Stage::Run, ActionRecord { command: Some(command.into()), ..Default::default() });
    store.add_task(identity, actions)
}

#[tokio::test]
async fn flow_bundle_barrier_cancels_downstream_on_upstream_failure() {
    // Scenario S2.
    let mut store = InMemoryConfigStore::new();
    let syn = task(&mut store, "syn", "t", "false");
    let pnr = task(&mut store, "pnr", "t", "true");
    let sta = task(&mut store, "sta", "t", "true");
    for group in [&syn, &pnr, &sta] {
        store.set_run_type(&group.identity.group_key(), RunType::Parallel);
    }
    let process = Arc::new(FakeProcessRunner::new());
    process.push(ScriptedProcess::failure(1));
    let tasks = vec![syn.clone(), pnr.clone(), sta.clone()];
    let bundles = vec![vec!["syn".to_string()], vec!["pnr".to_string(), "sta".to_string()]];
    let context = ctx(process.clone(), Arc::new(store));

    run_flows(&context, &tasks, &bundles, false).await;

    assert_eq!(syn.status(), Status::Stage(Stage::Run, Outcome::Failed));
    assert_eq!(pnr.status(), Status::Cancelled);
    assert_eq!(sta.status(), Status::Cancelled);
    assert_eq!(process.spawned_commands.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn ignore_fail_runs_the_next_bundle_despite_an_upstream_failure() {
    let mut store = InMemoryConfigStore::new();
    let syn = task(&mut store, "syn", "t", "false");
    let pnr = task(&mut store, "pnr", "t", "true");
    for group in [&syn, &pnr] {
        store.set_run_type(&group.identity.group_key(), RunType::Parallel);
    }
    let process = Arc::new(FakeProcessRunner::new());
    process.push(ScriptedProcess::failure(1));
    process.push(ScriptedProcess::success(Vec::<String>::new()));
    let tasks = vec![syn.clone(), pnr.clone()];
    let bundles = vec![vec!["syn".to_string()], vec!["pnr".to_string()]];
    let context = ctx(process.clone(), Arc::new(store));

    run_flows(&context, &tasks, &bundles, true).await;

    assert_eq!(syn.status(), Status::Stage(Stage::Run, Outcome::Failed));
    assert_eq!(pnr.status(), Status::Stage(Stage::Run, Outcome::Passed));
}

#[tokio::test]
async fn a_passing_bundle_lets_the_next_bundle_run() {
    let mut store = InMemoryConfigStore::new();
    let syn = task(&mut store, "syn", "t", "true");
    let pnr = task(&mut store, "pnr", "t", "true");
    for group in [&syn, &pnr] {
        store.set_run_type(&group.identity.group_key(), RunType::Parallel);
    }
    let process = Arc::new(FakeProcessRunner::new());
    process.push(ScriptedProcess::success(Vec::<String>::new()));
    process.push(ScriptedProcess::success(Vec::<String>::new()));
    let tasks = vec![syn.clone(), pnr.clone()];
    let bundles = vec![vec!["syn".to_string()], vec!["pnr".to_string()]];
    let context = ctx(process.clone(), Arc::new(store));

    run_flows(&context, &tasks, &bundles, false).await;

    assert_eq!(syn.status(), Status::Stage(Stage::Run, Outcome::Passed));
    assert_eq!(pnr.status(), Status::Stage(Stage::Run, Outcome::Passed));
}

#[test]
fn partition_by_group_preserves_first_seen_order() {
    let mut store = InMemoryConfigStore::new();
    let a1 = task(&mut store, "syn", "a1", "true");
    let b1 = task(&mut store, "pnr", "b1", "true");
    let a2 = task(&mut store, "syn", "a2", "true");
    let groups = partition_by_group(&[a1.clone(), b1.clone(), a2.clone()]);
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].len(), 2);
    assert_eq!(groups[1].len(), 1);
}
