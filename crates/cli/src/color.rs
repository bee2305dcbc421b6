// SPDX-License-Identifier: MIT
// Copyright (c) 2026 EDA Task Runner Contributors

//! Terminal color helpers (teacher pattern: `oj::color` — ANSI-256 codes,
//! `NO_COLOR`/TTY-gated).

use std::io::IsTerminal;

pub mod codes {
    /// Passed / done: green.
    pub const GOOD: u8 = 34;
    /// Failed: red.
    pub const BAD: u8 = 160;
    /// Killing / killed / cancelled: amber.
    pub const WARN: u8 = 178;
    /// In-flight gerund states: steel blue.
    pub const ACTIVE: u8 = 74;
    /// Informational `message()` text: light grey.
    pub const INFO: u8 = 250;
}

/// Priority: `NO_COLOR=1` disables, `COLOR=1` forces, else a TTY check.
pub fn should_colorize() -> bool {
    if std::env::var("NO_COLOR").is_ok_and(|v| v == "1") {
        return false;
    }
    if std::env::var("COLOR").is_ok_and(|v| v == "1") {
        return true;
    }
    std::io::stdout().is_terminal()
}

fn fg256(code: u8) -> String {
    format!("\x1b[38;5;{code}m")
}

const RESET: &str = "\x1b[0m";

/// Colorize `text` with ANSI-256 `code`, or return it unchanged when color
/// output is disabled.
pub fn paint(code: u8, text: &str) -> String {
    if should_colorize() {
        format!("{}{}{}", fg256(code), text, RESET)
    } else {
        text.to_string()
    }
}

/// Color for a terminal [`eda_core::Status`], by outcome/state family.
pub fn status_color(status: &eda_core::Status) -> u8 {
    use eda_core::{Outcome, Status};
    match status {
        Status::Stage(_, Outcome::Passed) => codes::GOOD,
        Status::Stage(_, Outcome::Failed) => codes::BAD,
        Status::Stage(_, Outcome::Undefined) => codes::INFO,
        Status::Killed | Status::Killing | Status::Cancelled => codes::WARN,
        Status::Queued => codes::INFO,
        Status::Building | Status::Running | Status::Checking | Status::Summarizing | Status::Releasing => {
            codes::ACTIVE
        }
    }
}

/// Color for a `message()` event's severity hint.
pub fn message_color(color: eda_core::MessageColor) -> u8 {
    use eda_core::MessageColor;
    match color {
        MessageColor::Black => codes::INFO,
        MessageColor::Orange => codes::WARN,
        MessageColor::Red => codes::BAD,
    }
}

#[cfg(test)]
#[path = "color_tests.rs"]
mod tests;
