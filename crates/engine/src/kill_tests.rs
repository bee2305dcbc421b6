// SPDX-License-Identifier: MIT
// Copyright (c) 2026 EDA Task Runner Contributors

use super::*;
use eda_adapters::test_support::{FakeBatchAdapter, FakeProcessRunner};
use eda_core::test_support::InMemoryConfigStore;
use eda_core::{Identity, Intervals};
use std::collections::HashMap;

fn ctx(process: Arc<FakeProcessRunner>, batch: Arc<FakeBatchAdapter>) -> Context {
    let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
    Context {
        config: Arc::new(InMemoryConfigStore::new()),
        process,
        batch,
        sink: eda_core::StatusSink::new(tx),
        intervals: Intervals::fast_for_tests(),
        debug: false,
    }
}

#[tokio::test]
async fn local_job_is_killed_and_finalized_immediately() {
    let mut store = InMemoryConfigStore::new();
    let task = store.add_task(Identity::new("b", "v", "f", "ven", "br", "t"), HashMap::new());
    task.set_status(Status::Running);
    task.set_job(JobTag::Local("4242".to_string()));
    let process = Arc::new(FakeProcessRunner::new());
    let context = ctx(process.clone(), Arc::new(FakeBatchAdapter::new("", [])));

    kill_selected(&context, &[task.clone()]).await;

    assert_eq!(task.status(), Status::Killed);
    assert_eq!(process.killed_pids.lock().unwrap().as_slice(), [4242]);
}

#[tokio::test]
async fn batch_job_is_sent_a_kill_request_but_left_in_killing() {
    let mut store = InMemoryConfigStore::new();
    let task = store.add_task(Identity::new("b", "v", "f", "ven", "br", "t"), HashMap::new());
    task.set_status(Status::Running);
    task.set_job(JobTag::Batch("999".to_string()));
    let batch = Arc::new(FakeBatchAdapter::new("", []));
    let context = ctx(Arc::new(FakeProcessRunner::new()), batch.clone());

    kill_selected(&context, &[task.clone()]).await;

    assert_eq!(task.status(), Status::Killing);
    assert_eq!(batch.killed.lock().unwrap().as_slice(), ["999"]);
}

#[tokio::test]
async fn non_running_tasks_are_left_alone() {
    let mut store = InMemoryConfigStore::new();
    let task = store.add_task(Identity::new("b", "v", "f", "ven", "br", "t"), HashMap::new());
    task.set_status(Status::Stage(eda_core::Stage::Run, eda_core::Outcome::Passed));
    let process = Arc::new(FakeProcessRunner::new());
    let context = ctx(process.clone(), Arc::new(FakeBatchAdapter::new("", [])));

    kill_selected(&context, &[task.clone()]).await;

    assert_eq!(task.status(), Status::Stage(eda_core::Stage::Run, eda_core::Outcome::Passed));
    assert!(process.killed_pids.lock().unwrap().is_empty());
}
