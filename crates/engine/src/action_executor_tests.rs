// SPDX-License-Identifier: MIT
// Copyright (c) 2026 EDA Task Runner Contributors

use super::*;
use crate::context::Context;
use eda_adapters::test_support::{FakeBatchAdapter, FakeProcessRunner, ScriptedProcess};
use eda_core::test_support::InMemoryConfigStore;
use eda_core::{ActionRecord, Event, Intervals};
use std::collections::HashMap;
use std::sync::Arc;

fn ctx(process: Arc<FakeProcessRunner>, config: Arc<InMemoryConfigStore>) -> (Context, tokio::sync::mpsc::UnboundedReceiver<Event>) {
    let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
    let context = Context {
        config,
        process,
        batch: Arc::new(FakeBatchAdapter::new("", [])),
        sink: eda_core::StatusSink::new(tx),
        intervals: Intervals::fast_for_tests(),
        debug: false,
    };
    (context, rx)
}

#[tokio::test]
async fn undefined_stage_spawns_nothing() {
    let mut store = InMemoryConfigStore::new();
    let identity = Identity::new("b", "v", "f", "ven", "br", "t");
    store.add_task(identity.clone(), HashMap::new());
    let process = Arc::new(FakeProcessRunner::new());
    let (ctx, _rx) = ctx(process.clone(), Arc::new(store));

    let status = execute(&ctx, Stage::Check, &identity).await;
    assert_eq!(status, Status::Stage(Stage::Check, Outcome::Undefined));
    assert!(process.spawned_commands.lock().unwrap().is_empty());
}

#[tokio::test]
async fn passing_stage_runs_command_and_reports_passed() {
    let mut store = InMemoryConfigStore::new();
    let identity = Identity::new("b", "v", "f", "ven", "br", "t");
    let mut actions = HashMap::new();
    actions.insert(Stage::Build, ActionRecord { command: Some("make build".into()), ..Default::default() });
    store.add_task(identity.clone(), actions);
    let process = Arc::new(FakeProcessRunner::new());
    process.push(ScriptedProcess::success(Vec::<String>::new()));
    let (ctx, mut rx) = ctx(process.clone(), Arc::new(store));

    let status = execute(&ctx, Stage::Build, &identity).await;
    assert_eq!(status, Status::Stage(Stage::Build, Outcome::Passed));
    assert_eq!(process.spawned_commands.lock().unwrap().as_slice(), ["make build"]);

    let mut events = Vec::new();
    while let Ok(e) = rx.try_recv() {
        events.push(e);
    }
    assert!(matches!(&events[0], Event::Start { state, .. } if *state == Status::Building));
    assert!(matches!(events.last(), Some(Event::Finish { result, .. }) if *result == Status::Stage(Stage::Build, Outcome::Passed)));
}

#[tokio::test]
async fn failing_exit_code_reports_failed() {
    let mut store = InMemoryConfigStore::new();
    let identity = Identity::new("b", "v", "f", "ven", "br", "t");
    let mut actions = HashMap::new();
    actions.insert(Stage::Check, ActionRecord { command: Some("false".into()), ..Default::default() });
    store.add_task(identity.clone(), actions);
    let process = Arc::new(FakeProcessRunner::new());
    process.push(ScriptedProcess::failure(1));
    let (ctx, _rx) = ctx(process.clone(), Arc::new(store));

    let status = execute(&ctx, Stage::Check, &identity).await;
    assert_eq!(status, Status::Stage(Stage::Check, Outcome::Failed));
}

#[tokio::test]
async fn missing_path_still_runs_with_a_warning() {
    let mut store = InMemoryConfigStore::new();
    let identity = Identity::new("b", "v", "f", "ven", "br", "t");
    let mut actions = HashMap::new();
    actions.insert(
        Stage::Summary,
        ActionRecord {
            command: Some("report".into()),
            path: Some("/no/such/path/for/eda-engine-tests".into()),
            ..Default::default()
        },
    );
    store.add_task(identity.clone(), actions);
    let process = Arc::new(FakeProcessRunner::new());
    process.push(ScriptedProcess::success(Vec::<String>::new()));
    let (ctx, mut rx) = ctx(process.clone(), Arc::new(store));

    let status = execute(&ctx, Stage::Summary, &identity).await;
    assert_eq!(status, Status::Stage(Stage::Summary, Outcome::Passed));
    assert_eq!(process.spawned_commands.lock().unwrap().as_slice(), ["report"]);

    let mut saw_warning = false;
    while let Ok(e) = rx.try_recv() {
        if matches!(e, Event::Message { color: eda_core::MessageColor::Orange, .. }) {
            saw_warning = true;
        }
    }
    assert!(saw_warning);
}
