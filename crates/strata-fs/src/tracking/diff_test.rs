// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

use rstest::rstest;
use strata_digest::Digest;

use super::*;

fn file(content: &str) -> Entry {
    Entry {
        kind: EntryKind::Blob,
        mode: 0o100644,
        size: content.len() as u64,
        object: Digest::from_reader(content.as_bytes()).unwrap(),
        entries: Default::default(),
    }
}

fn manifest(entries: &[(&str, Entry)]) -> Manifest {
    let mut root = Entry::empty_dir();
    for (name, entry) in entries {
        root.entries.insert(name.to_string(), entry.clone());
    }
    Manifest::new(root)
}

#[rstest]
fn test_diff_detects_added_and_removed() {
    let a = manifest(&[("a.txt", file("a"))]);
    let b = manifest(&[("b.txt", file("b"))]);
    let diffs = compute_diff(&a, &b);
    assert!(diffs.iter().any(|d| d.path == "a.txt" && d.mode.is_removed()));
    assert!(diffs.iter().any(|d| d.path == "b.txt" && d.mode.is_added()));
}

#[rstest]
fn test_diff_detects_unchanged() {
    let a = manifest(&[("same.txt", file("x"))]);
    let b = manifest(&[("same.txt", file("x"))]);
    let diffs = compute_diff(&a, &b);
    assert_eq!(diffs.len(), 1);
    assert!(diffs[0].mode.is_unchanged());
}

#[rstest]
fn test_diff_detects_changed_content() {
    let a = manifest(&[("f.txt", file("old"))]);
    let b = manifest(&[("f.txt", file("new"))]);
    let diffs = compute_diff(&a, &b);
    assert_eq!(diffs.len(), 1);
    assert!(diffs[0].mode.is_changed());
}

#[rstest]
fn test_diff_mask_entry_is_removal_even_with_no_a_entry() {
    let a = manifest(&[]);
    let mask = Entry {
        kind: EntryKind::Mask,
        ..Default::default()
    };
    let b = manifest(&[("gone.txt", mask)]);
    let diffs = compute_diff(&a, &b);
    assert_eq!(diffs.len(), 1);
    assert!(diffs[0].mode.is_removed());
}

#[rstest]
fn test_diff_is_lexicographically_ordered() {
    let a = manifest(&[]);
    let b = manifest(&[("zeta", file("z")), ("alpha", file("a"))]);
    let diffs = compute_diff(&a, &b);
    let paths: Vec<_> = diffs.iter().map(|d| d.path.as_str()).collect();
    assert_eq!(paths, vec!["alpha", "zeta"]);
}
