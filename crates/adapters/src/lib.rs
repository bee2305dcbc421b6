// SPDX-License-Identifier: MIT
// Copyright (c) 2026 EDA Task Runner Contributors

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! eda-adapters: the Process Runner and Batch Adapter — the two points
//! where the engine touches the outside world (local shell commands and
//! the LSF batch scheduler).

pub mod batch;
pub mod lsf_parse;
pub mod process;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use batch::{BatchAdapter, BatchError, JobState, LsfBatchAdapter};
pub use process::{ProcessError, ProcessHandle, ProcessOutput, ProcessRunner, TokioProcessRunner};
