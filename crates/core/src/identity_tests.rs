// SPDX-License-Identifier: MIT
// Copyright (c) 2026 EDA Task Runner Contributors

use super::*;

fn id() -> Identity {
    Identity::new("B1", "V1", "synth", "cadence", "main", "t1")
}

#[test]
fn block_version_key_joins_with_colon() {
    assert_eq!(id().block_version_key(), "B1:V1");
}

#[test]
fn group_key_joins_with_dots() {
    assert_eq!(id().group_key().to_string(), "B1.V1.synth.cadence.main");
}

#[test]
fn display_is_space_separated() {
    assert_eq!(id().to_string(), "B1 V1 synth cadence main t1");
}

#[test]
fn group_key_ignores_task() {
    let a = Identity::new("B1", "V1", "synth", "cadence", "main", "t1");
    let b = Identity::new("B1", "V1", "synth", "cadence", "main", "t2");
    assert_eq!(a.group_key(), b.group_key());
}
