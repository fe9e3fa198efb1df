// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

use rstest::rstest;

use super::*;

fn sample() -> Manifest {
    let mut root = Entry::empty_dir();
    let mut subdir = Entry::empty_dir();
    subdir.entries.insert(
        "inner.txt".to_string(),
        Entry {
            kind: EntryKind::Blob,
            ..Default::default()
        },
    );
    root.entries.insert("subdir".to_string(), subdir);
    root.entries.insert(
        "top.txt".to_string(),
        Entry {
            kind: EntryKind::Blob,
            ..Default::default()
        },
    );
    Manifest::new(root)
}

#[rstest]
fn test_get_path_resolves_nested_entry() {
    let manifest = sample();
    assert!(manifest.get_path("subdir/inner.txt").is_some());
    assert!(manifest.get_path("/subdir/inner.txt/").is_some());
    assert!(manifest.get_path("missing").is_none());
}

#[rstest]
fn test_get_path_through_non_tree_fails() {
    let manifest = sample();
    assert!(manifest.get_path("top.txt/nested").is_none());
}

#[rstest]
fn test_walk_visits_every_entry_in_sorted_order() {
    let manifest = sample();
    let paths: Vec<_> = manifest.walk().map(|(p, _)| p).collect();
    assert_eq!(paths, vec!["subdir", "subdir/inner.txt", "top.txt"]);
}

#[rstest]
fn test_empty_manifest_reports_empty() {
    assert!(Manifest::default().is_empty());
    assert!(!sample().is_empty());
}
