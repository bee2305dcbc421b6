// SPDX-License-Identifier: MIT
// Copyright (c) 2026 EDA Task Runner Contributors

//! Parsing for LSF's textual CLI output (Design Notes §9: kept separate and
//! separately testable since the wire format is otherwise implicit).

use crate::batch::JobState;
use regex::Regex;
use std::sync::OnceLock;

fn job_id_pattern() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"Job <(\d+)>").ok()).as_ref()
}

/// Extract the job-id from the first line of a `bsub -I` submission, e.g.
/// `"Job <12345> is submitted to queue <normal>."`.
pub fn parse_job_id(first_line: &str) -> Option<String> {
    job_id_pattern()?.captures(first_line).map(|c| c[1].to_string())
}

fn stat_pattern() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b(PEND|RUN|DONE|EXIT|PSUSP|USUSP|SSUSP|UNKWN)\b").ok()).as_ref()
}

/// Parse a `bjobs <job_id>` listing, returning the state of the row whose
/// first column matches `job_id`. Returns `None` if the job does not
/// appear at all (e.g. it has aged out of LSF's history).
pub fn parse_job_state(output: &str, job_id: &str) -> Option<JobState> {
    let row = output
        .lines()
        .find(|line| line.split_whitespace().next() == Some(job_id))?;
    let stat = stat_pattern()?.find(row)?.as_str();
    Some(match stat {
        "PEND" => JobState::Pend,
        "RUN" => JobState::Run,
        "DONE" => JobState::Done,
        "EXIT" => JobState::Exit,
        _ => JobState::Unknown,
    })
}

#[cfg(test)]
#[path = "lsf_parse_tests.rs"]
mod tests;
