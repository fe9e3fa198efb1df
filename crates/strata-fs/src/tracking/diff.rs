// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeSet;

use super::entry::{Entry, EntryKind};
use super::manifest::Manifest;

#[cfg(test)]
#[path = "./diff_test.rs"]
mod diff_test;

/// What changed, if anything, at a single path between two manifests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffMode {
    Unchanged(Entry),
    Changed(Entry, Entry),
    Added(Entry),
    Removed(Entry),
}

impl DiffMode {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged(..))
    }
    pub fn is_changed(&self) -> bool {
        matches!(self, Self::Changed(..))
    }
    pub fn is_added(&self) -> bool {
        matches!(self, Self::Added(..))
    }
    pub fn is_removed(&self) -> bool {
        matches!(self, Self::Removed(..))
    }
}

impl std::fmt::Display for DiffMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unchanged(..) => f.write_str("="),
            Self::Changed(..) => f.write_str("~"),
            Self::Added(..) => f.write_str("+"),
            Self::Removed(..) => f.write_str("-"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diff {
    pub path: String,
    pub mode: DiffMode,
}

impl std::fmt::Display for Diff {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.mode, self.path)
    }
}

/// Produce a lexicographically-ordered sequence of path-level diffs between
/// two manifests. A `mask` entry in `b` is treated as a deletion relative to
/// whatever `a` holds at the same path, regardless of whether `a` has an
/// entry there.
pub fn compute_diff(a: &Manifest, b: &Manifest) -> Vec<Diff> {
    let mut paths: BTreeSet<String> = BTreeSet::new();
    paths.extend(a.walk().map(|(path, _)| path));
    paths.extend(b.walk().map(|(path, _)| path));

    paths
        .into_iter()
        .filter_map(|path| diff_path(a, b, path))
        .collect()
}

fn diff_path(a: &Manifest, b: &Manifest, path: String) -> Option<Diff> {
    let mode = match (a.get_path(&path), b.get_path(&path)) {
        (None, None) => return None,
        (_, Some(entry)) if entry.kind == EntryKind::Mask => DiffMode::Removed(entry.clone()),
        (None, Some(entry)) => DiffMode::Added(entry.clone()),
        (Some(entry), None) => DiffMode::Removed(entry.clone()),
        (Some(a_entry), Some(b_entry)) if a_entry == b_entry => DiffMode::Unchanged(b_entry.clone()),
        (Some(a_entry), Some(b_entry)) => DiffMode::Changed(a_entry.clone(), b_entry.clone()),
    };
    Some(Diff { path, mode })
}
