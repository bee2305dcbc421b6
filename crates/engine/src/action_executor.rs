// SPDX-License-Identifier: MIT
// Copyright (c) 2026 EDA Task Runner Contributors

//! Action Executor (spec.md §4.1): BUILD / CHECK / SUMMARY / RELEASE.
//!
//! All four non-RUN stages share this one function, parameterized over
//! [`Stage`] — the original tool has four nearly-identical handlers; the
//! rewrite keeps one.

use crate::command::with_cd_prefix;
use crate::context::Context;
use crate::vars::identity_env;
use eda_adapters::ProcessOutput;
use eda_core::{Identity, MessageColor, Outcome, Stage, Status};

/// Run one BUILD/CHECK/SUMMARY/RELEASE stage for `identity` to completion.
///
/// Always ends by writing a terminal `Status` to the task record and
/// emitting exactly one `start` (if the stage is defined) and one `finish`
/// event — no error from the process layer escapes this function (spec
/// §7).
pub async fn execute(ctx: &Context, stage: Stage, identity: &Identity) -> Status {
    debug_assert!(!matches!(stage, Stage::Run), "run uses run_executor::run_one instead");

    let Some(task) = ctx.config.lookup(identity) else {
        let result = Status::Stage(stage, Outcome::Undefined);
        ctx.sink.finish(identity, result.clone());
        return result;
    };

    let action = task.action(stage).cloned();
    let Some(action) = action.filter(|a| a.is_defined()) else {
        let result = Status::Stage(stage, Outcome::Undefined);
        task.set_status(result.clone());
        ctx.sink.finish(identity, result.clone());
        return result;
    };

    ctx.sink.start(identity, Status::active(stage));
    task.set_status(Status::active(stage));

    let env = identity_env(identity);
    let raw_command = action.command.as_deref().unwrap_or_default();
    let command = with_cd_prefix(raw_command, action.path.as_deref(), &ctx.sink);

    let outcome = match run_to_completion(ctx, &command, &env).await {
        Ok(output) => {
            if ctx.debug {
                tracing::debug!(
                    block = %identity.block, task = %identity.task, stage = stage.name(),
                    stdout = %output.stdout, stderr = %output.stderr, exit_code = output.exit_code,
                    "captured stage output",
                );
            }
            if output.exit_code == 0 { Outcome::Passed } else { Outcome::Failed }
        }
        Err(e) => {
            tracing::warn!(block = %identity.block, task = %identity.task, stage = stage.name(), error = %e, "spawn failed");
            ctx.sink.message(
                format!("*Warning*: {} failed to spawn: {e}", stage.name()),
                MessageColor::Red,
            );
            Outcome::Failed
        }
    };

    let status = Status::Stage(stage, outcome);
    task.set_status(status.clone());
    ctx.sink.finish(identity, status.clone());
    status
}

async fn run_to_completion(
    ctx: &Context,
    command: &str,
    env: &[(String, String)],
) -> Result<ProcessOutput, eda_adapters::ProcessError> {
    let handle = ctx.process.spawn(command, None, env).await?;
    handle.communicate().await
}

#[cfg(test)]
#[path = "action_executor_tests.rs"]
mod tests;
