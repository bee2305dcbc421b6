// SPDX-License-Identifier: MIT
// Copyright (c) 2026 EDA Task Runner Contributors

//! Configurable poll intervals (spec.md §5, Design Notes §9).
//!
//! The original tool hard-codes 1s/3s/5s sleeps. We keep the same defaults
//! but make every one of them overridable so tests don't have to wait on
//! wall-clock time, and so a deployment can bound the otherwise-unbounded
//! LSF job-start wait.

use std::time::Duration;

/// Poll cadence used throughout the Run Executor and Group Scheduler.
#[derive(Debug, Clone, Copy)]
pub struct Intervals {
    /// How often to poll the batch adapter while waiting for a submitted
    /// job to reach `RUN` (spec §4.2 step 6). Default 1s.
    pub job_start_poll: Duration,
    /// How often to poll the batch adapter while waiting for a killed job
    /// to reach a terminal state (spec §4.2 step 8). Default 3s.
    pub kill_poll: Duration,
    /// How often a serial group re-checks a `running`/`killing` first task
    /// before giving up and running it (spec §4.3). Default 5s.
    pub serial_wait_poll: Duration,
    /// Optional bound on the total time spent waiting for a submitted job
    /// to reach `RUN`. `None` means unbounded, matching the original tool
    /// (spec §9 flags this as a likely production hazard).
    pub job_start_deadline: Option<Duration>,
}

impl Default for Intervals {
    fn default() -> Self {
        Self {
            job_start_poll: Duration::from_secs(1),
            kill_poll: Duration::from_secs(3),
            serial_wait_poll: Duration::from_secs(5),
            job_start_deadline: None,
        }
    }
}

impl Intervals {
    /// Intervals scaled down for fast, deterministic tests.
    pub fn fast_for_tests() -> Self {
        Self {
            job_start_poll: Duration::from_millis(2),
            kill_poll: Duration::from_millis(2),
            serial_wait_poll: Duration::from_millis(2),
            job_start_deadline: Some(Duration::from_millis(200)),
        }
    }
}

#[cfg(test)]
#[path = "intervals_tests.rs"]
mod tests;
