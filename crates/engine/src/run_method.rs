// SPDX-License-Identifier: MIT
// Copyright (c) 2026 EDA Task Runner Contributors

//! RUN_METHOD normalization (spec.md §4.2 step 4).

/// `true` when `method` (trimmed) starts with `bsub`.
pub fn is_bsub(method: &str) -> bool {
    method.trim_start().starts_with("bsub")
}

/// `true` when `method`, ignoring case and surrounding whitespace, is
/// exactly `"local"` or empty.
fn is_local_or_empty(method: &str) -> bool {
    let trimmed = method.trim();
    trimmed.is_empty() || trimmed.eq_ignore_ascii_case("local")
}

/// Build the final shell command from a task's `COMMAND` and `RUN_METHOD`.
///
/// - `bsub` without `-I`: append ` -I ` so the job streams output
///   (spec §4.2 step 4, first bullet).
/// - empty / `local` (case-insensitive): the raw command, unprefixed.
/// - anything else: `<method> "<command>"`.
pub fn normalize(command: &str, method: &str) -> String {
    if is_bsub(method) {
        let method = if method.contains("-I") {
            method.trim_end().to_string()
        } else {
            format!("{} -I", method.trim_end())
        };
        return format!("{method} \"{command}\"");
    }
    if is_local_or_empty(method) {
        return command.to_string();
    }
    format!("{method} \"{command}\"")
}

#[cfg(test)]
#[path = "run_method_tests.rs"]
mod tests;
