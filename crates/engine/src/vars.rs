// SPDX-License-Identifier: MIT
// Copyright (c) 2026 EDA Task Runner Contributors

//! Per-invocation identity environment (spec.md §4.1 step 1, §5, Design
//! Notes §9).
//!
//! The original tool sets `BLOCK`/`VERSION`/.../`TASK` on the process-wide
//! environment before launching each child — a race when tasks run in
//! parallel. This builds the same six variables as an isolated list handed
//! to [`eda_adapters::ProcessRunner::spawn`] instead, never touching this
//! process's own environment table.

use eda_core::Identity;

/// Build the `BLOCK, VERSION, FLOW, VENDOR, BRANCH, TASK` env pairs for one
/// identity, in the order the original tool exported them.
pub fn identity_env(identity: &Identity) -> Vec<(String, String)> {
    vec![
        ("BLOCK".to_string(), identity.block.clone()),
        ("VERSION".to_string(), identity.version.clone()),
        ("FLOW".to_string(), identity.flow.clone()),
        ("VENDOR".to_string(), identity.vendor.clone()),
        ("BRANCH".to_string(), identity.branch.clone()),
        ("TASK".to_string(), identity.task.clone()),
    ]
}

#[cfg(test)]
#[path = "vars_tests.rs"]
mod tests;
