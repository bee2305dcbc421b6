// SPDX-License-Identifier: MIT
// Copyright (c) 2026 EDA Task Runner Contributors

//! Engine-level errors.
//!
//! Per spec §7's propagation policy, none of these ever escape an
//! executor's public entry point — every adapter failure is caught inside
//! `action_executor`/`run_executor` and turned into a terminal status plus
//! a `message()` event instead of a propagated `Result::Err`. This type
//! exists for the narrow internal call sites (the `?` operator inside an
//! executor body) and for the Kill Orchestrator, whose caller is the CLI
//! rather than another scheduler level.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("process runner error: {0}")]
    Process(#[from] eda_adapters::ProcessError),
    #[error("batch adapter error: {0}")]
    Batch(#[from] eda_adapters::BatchError),
    #[error("task not found: {0}")]
    UnknownTask(String),
}
