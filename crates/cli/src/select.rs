// SPDX-License-Identifier: MIT
// Copyright (c) 2026 EDA Task Runner Contributors

//! Task selection by `Block`/`Version`/`Flow`/`Vendor`/`Branch`/`Task`
//! glob filters (SPEC_FULL.md §2's `ifp` surface).
//!
//! Each filter defaults to `*` (match everything). `*` and `?` behave as
//! in shell globbing; the rest of the pattern is matched literally.

use eda_core::TaskRecord;
use regex::Regex;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("invalid filter pattern {pattern:?}: {source}")]
pub struct FilterError {
    pattern: String,
    #[source]
    source: regex::Error,
}

/// One glob per identity field; unset fields match everything.
#[derive(Debug, Clone, Default)]
pub struct SelectFilter {
    pub block: Option<String>,
    pub version: Option<String>,
    pub flow: Option<String>,
    pub vendor: Option<String>,
    pub branch: Option<String>,
    pub task: Option<String>,
}

fn glob_to_regex(pattern: &str) -> String {
    let mut out = String::from("^");
    for c in pattern.chars() {
        match c {
            '*' => out.push_str(".*"),
            '?' => out.push('.'),
            _ => out.push_str(&regex::escape(&c.to_string())),
        }
    }
    out.push('$');
    out
}

fn compile(pattern: &str) -> Result<Regex, FilterError> {
    Regex::new(&glob_to_regex(pattern))
        .map_err(|source| FilterError { pattern: pattern.to_string(), source })
}

/// A [`SelectFilter`] with every field pre-compiled to a regex.
pub struct CompiledFilter {
    block: Regex,
    version: Regex,
    flow: Regex,
    vendor: Regex,
    branch: Regex,
    task: Regex,
}

impl CompiledFilter {
    pub fn compile(filter: &SelectFilter) -> Result<Self, FilterError> {
        let field = |f: &Option<String>| compile(f.as_deref().unwrap_or("*"));
        Ok(Self {
            block: field(&filter.block)?,
            version: field(&filter.version)?,
            flow: field(&filter.flow)?,
            vendor: field(&filter.vendor)?,
            branch: field(&filter.branch)?,
            task: field(&filter.task)?,
        })
    }

    pub fn matches(&self, task: &TaskRecord) -> bool {
        let id = &task.identity;
        self.block.is_match(&id.block)
            && self.version.is_match(&id.version)
            && self.flow.is_match(&id.flow)
            && self.vendor.is_match(&id.vendor)
            && self.branch.is_match(&id.branch)
            && self.task.is_match(&id.task)
    }
}

/// Select every task matching `filter`, preserving the config store's load
/// order.
pub fn select(tasks: &[Arc<TaskRecord>], filter: &SelectFilter) -> Result<Vec<Arc<TaskRecord>>, FilterError> {
    let compiled = CompiledFilter::compile(filter)?;
    Ok(tasks.iter().filter(|t| compiled.matches(t)).cloned().collect())
}

#[cfg(test)]
#[path = "select_tests.rs"]
mod tests;
