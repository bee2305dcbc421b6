// SPDX-License-Identifier: MIT
// Copyright (c) 2026 EDA Task Runner Contributors

//! `cd <PATH>` prefixing shared by the Action Executor (spec §4.1 step 4)
//! and the Run Executor (spec §4.2 step 5).

use eda_core::{MessageColor, StatusSink};
use std::path::Path;

/// Prefix `command` with `cd <PATH>; ` when `path` exists on disk.
///
/// - `path` unset: run as-is, emit a warning.
/// - `path` set but missing from disk: run as-is, emit a warning.
/// - `path` set and present: prefix with `cd <PATH>; `.
pub fn with_cd_prefix(command: &str, path: Option<&Path>, sink: &StatusSink) -> String {
    match path {
        None => {
            sink.message(
                format!("*Warning*: no PATH set for command `{command}`; running without cd"),
                MessageColor::Orange,
            );
            command.to_string()
        }
        Some(p) if !p.exists() => {
            sink.message(
                format!("*Warning*: PATH `{}` does not exist; running without cd", p.display()),
                MessageColor::Orange,
            );
            command.to_string()
        }
        Some(p) => format!("cd {}; {}", p.display(), command),
    }
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
