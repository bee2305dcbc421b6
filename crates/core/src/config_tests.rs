// SPDX-License-Identifier: MIT
// Copyright (c) 2026 EDA Task Runner Contributors

use super::*;
use crate::identity::Identity;
use std::collections::HashMap;

struct Fixture(Vec<Arc<TaskRecord>>);

impl ConfigStore for Fixture {
    fn lookup(&self, identity: &Identity) -> Option<Arc<TaskRecord>> {
        self.0.iter().find(|t| &t.identity == identity).cloned()
    }

    fn tasks_for_block_version(&self, block: &str, version: &str) -> Vec<Arc<TaskRecord>> {
        self.0
            .iter()
            .filter(|t| t.identity.block == block && t.identity.version == version)
            .cloned()
            .collect()
    }

    fn run_order(&self, _block: &str, _version: &str) -> Vec<FlowBundle> {
        vec![]
    }

    fn run_type(&self, _group: &GroupKey) -> RunType {
        RunType::Serial
    }
}

#[test]
fn block_versions_deduplicates_preserving_order() {
    let tasks = vec![
        Arc::new(TaskRecord::new(Identity::new("B1", "V1", "f", "v", "br", "t1"), HashMap::new())),
        Arc::new(TaskRecord::new(Identity::new("B1", "V1", "f", "v", "br", "t2"), HashMap::new())),
        Arc::new(TaskRecord::new(Identity::new("B2", "V1", "f", "v", "br", "t1"), HashMap::new())),
    ];
    let bvs = Fixture::block_versions(&tasks);
    assert_eq!(bvs, vec![("B1".to_string(), "V1".to_string()), ("B2".to_string(), "V1".to_string())]);
}

#[test]
fn lookup_finds_by_identity() {
    let id = Identity::new("B1", "V1", "f", "v", "br", "t1");
    let fixture = Fixture(vec![Arc::new(TaskRecord::new(id.clone(), HashMap::new()))]);
    assert!(fixture.lookup(&id).is_some());
    assert!(fixture.lookup(&Identity::new("B2", "V1", "f", "v", "br", "t1")).is_none());
}
