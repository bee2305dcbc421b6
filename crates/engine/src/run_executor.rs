// SPDX-License-Identifier: MIT
// Copyright (c) 2026 EDA Task Runner Contributors

//! Run Executor (spec.md §4.2): the RUN stage.
//!
//! Unlike the other four stages, RUN additionally handles `RUN_METHOD`
//! prefixing, batch-vs-local job tagging, runtime reporting, and
//! cooperative-kill reconciliation.

use crate::command::with_cd_prefix;
use crate::context::Context;
use crate::run_method;
use crate::vars::identity_env;
use eda_core::{Identity, JobTag, MessageColor, Outcome, Runtime, Stage, Status, TaskRecord};
use std::sync::Arc;

/// Run the RUN stage for `identity` to completion, including kill
/// reconciliation (spec §4.2 step 8).
pub async fn run_one(ctx: &Context, identity: &Identity) -> Status {
    let Some(task) = ctx.config.lookup(identity) else {
        let result = Status::Stage(Stage::Run, Outcome::Undefined);
        ctx.sink.finish(identity, result.clone());
        return result;
    };

    let action = task.action(Stage::Run).cloned();
    let Some(action) = action.filter(|a| a.is_defined()) else {
        let result = Status::Stage(Stage::Run, Outcome::Undefined);
        task.set_status(result.clone());
        ctx.sink.finish(identity, result.clone());
        return result;
    };

    ctx.sink.start(identity, Status::Running);
    task.set_status(Status::Running);

    let env = identity_env(identity);
    let raw_command = action.command.as_deref().unwrap_or_default();
    let method = action.run_method.as_deref().unwrap_or_default();
    let final_command = run_method::normalize(raw_command, method);
    let command = with_cd_prefix(&final_command, action.path.as_deref(), &ctx.sink);

    ctx.sink.message(
        format!("*Info*: running `{command}` under `{method}` for {identity}"),
        MessageColor::Black,
    );

    let exit_code = if run_method::is_bsub(method) {
        match run_batch(ctx, &task, identity, &command, &env).await {
            Ok(code) => code,
            Err(e) => {
                tracing::warn!(task = %identity.task, error = %e, "batch run failed to spawn");
                ctx.sink.message(format!("*Warning*: run failed to spawn: {e}"), MessageColor::Red);
                return finalize_spawn_failure(ctx, &task, identity);
            }
        }
    } else {
        match run_local(ctx, &task, &command, &env).await {
            Ok(code) => code,
            Err(e) => {
                tracing::warn!(task = %identity.task, error = %e, "local run failed to spawn");
                ctx.sink.message(format!("*Warning*: run failed to spawn: {e}"), MessageColor::Red);
                return finalize_spawn_failure(ctx, &task, identity);
            }
        }
    };

    reconcile(ctx, &task, identity, exit_code).await
}

/// Batch path (spec §4.2 step 6): submit, tag the job, wait for `RUN`,
/// then wait out the process.
async fn run_batch(
    ctx: &Context,
    task: &Arc<TaskRecord>,
    identity: &Identity,
    command: &str,
    env: &[(String, String)],
) -> Result<i32, eda_adapters::ProcessError> {
    let mut handle = ctx.process.spawn(command, None, env).await?;
    let first_line = handle.read_first_stdout_line().await?.unwrap_or_default();

    let job_id = match ctx.batch.submit_job_id(&first_line) {
        Ok(id) => id,
        Err(e) => {
            ctx.sink.message(
                format!("*Warning*: could not parse LSF job id from `{first_line}`: {e}"),
                MessageColor::Orange,
            );
            String::new()
        }
    };
    let job = JobTag::Batch(job_id.clone());
    task.set_job(job.clone());
    ctx.sink.set_job(identity, Some(job));
    task.set_runtime(Runtime::Pending);
    ctx.sink.set_runtime(identity, Runtime::Pending);

    wait_for_job_start(ctx, &job_id).await;
    task.set_runtime(Runtime::Elapsed("00:00:00".to_string()));
    ctx.sink.set_runtime(identity, Runtime::Elapsed("00:00:00".to_string()));

    let output = handle.communicate().await?;
    if ctx.debug {
        tracing::debug!(task = %identity.task, stdout = %output.stdout, stderr = %output.stderr, "captured run output");
    }
    Ok(output.exit_code)
}

async fn wait_for_job_start(ctx: &Context, job_id: &str) {
    if job_id.is_empty() {
        return;
    }
    let deadline = ctx.intervals.job_start_deadline.map(|d| tokio::time::Instant::now() + d);
    loop {
        match ctx.batch.query(job_id).await {
            Ok(eda_adapters::JobState::Run) => return,
            Ok(_) | Err(_) => {}
        }
        if let Some(deadline) = deadline {
            if tokio::time::Instant::now() >= deadline {
                ctx.sink.message(
                    format!("*Warning*: job {job_id} did not reach RUN before the configured deadline"),
                    MessageColor::Orange,
                );
                return;
            }
        }
        tokio::time::sleep(ctx.intervals.job_start_poll).await;
    }
}

/// Local path (spec §4.2 step 7): tag with the pid, wait out the process.
async fn run_local(
    ctx: &Context,
    task: &Arc<TaskRecord>,
    command: &str,
    env: &[(String, String)],
) -> Result<i32, eda_adapters::ProcessError> {
    let identity = &task.identity;
    let handle = ctx.process.spawn(command, None, env).await?;
    let pid = handle.pid().unwrap_or(0);
    let job = JobTag::Local(pid.to_string());
    task.set_job(job.clone());
    ctx.sink.set_job(identity, Some(job));
    task.set_runtime(Runtime::Elapsed("00:00:00".to_string()));
    ctx.sink.set_runtime(identity, Runtime::Elapsed("00:00:00".to_string()));

    let output = handle.communicate().await?;
    if ctx.debug {
        tracing::debug!(task = %identity.task, stdout = %output.stdout, stderr = %output.stderr, "captured run output");
    }
    Ok(output.exit_code)
}

/// Kill reconciliation (spec §4.2 step 8).
///
/// Re-reads `Status` at the moment the process exited:
/// - `Killing` → confirm via the batch adapter (accepting any terminal
///   state, not just `EXIT` — Design Notes §9's fix for the original's
///   `DONE`-racing-a-kill hang) and report `killed`.
/// - `Killed` already → the Kill Orchestrator's local-kill path already
///   wrote the terminal status and emitted `finish` (spec §4.6); do not
///   emit a second one (Testable Property 1: exactly one `finish`).
/// - otherwise → ordinary `"run passed"`/`"run failed"`.
async fn reconcile(ctx: &Context, task: &Arc<TaskRecord>, identity: &Identity, exit_code: i32) -> Status {
    match task.status() {
        Status::Killing => {
            let job_id = task.job().map(|j| j.raw().to_string()).unwrap_or_default();
            wait_for_kill_confirmation(ctx, &job_id).await;
            ctx.sink.message(format!("*Info*: job killed for {identity}"), MessageColor::Black);
            let status = Status::Killed;
            task.set_status(status.clone());
            ctx.sink.finish(identity, status.clone());
            status
        }
        Status::Killed => {
            // Already finalized and reported by the Kill Orchestrator.
            Status::Killed
        }
        _ => {
            ctx.sink.message(format!("*Info*: job done for {identity}"), MessageColor::Black);
            let outcome = if exit_code == 0 { Outcome::Passed } else { Outcome::Failed };
            let status = Status::Stage(Stage::Run, outcome);
            task.set_status(status.clone());
            ctx.sink.finish(identity, status.clone());
            status
        }
    }
}

async fn wait_for_kill_confirmation(ctx: &Context, job_id: &str) {
    if job_id.is_empty() {
        return;
    }
    loop {
        match ctx.batch.query(job_id).await {
            Ok(state) if state.is_terminal() => return,
            _ => {}
        }
        tokio::time::sleep(ctx.intervals.kill_poll).await;
    }
}

/// A spawn-time failure (before any kill could have been requested) always
/// reports `"run failed"` and still goes through the single-finish path.
fn finalize_spawn_failure(ctx: &Context, task: &Arc<TaskRecord>, identity: &Identity) -> Status {
    let status = Status::Stage(Stage::Run, Outcome::Failed);
    task.set_status(status.clone());
    ctx.sink.finish(identity, status.clone());
    status
}

#[cfg(test)]
#[path = "run_executor_tests.rs"]
mod tests;
