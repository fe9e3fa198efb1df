// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

use super::entry::{Entry, EntryKind};

#[cfg(test)]
#[path = "./manifest_test.rs"]
mod manifest_test;

/// A live, in-memory filesystem snapshot: a root [`Entry`] and everything
/// beneath it. Produced by the committer while walking a directory, and
/// consumed by [`crate::commit::intern`] to produce immutable graph objects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    root: Entry,
}

impl Manifest {
    pub fn new(root: Entry) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Entry {
        &self.root
    }

    pub fn into_root(self) -> Entry {
        self.root
    }

    pub fn is_empty(&self) -> bool {
        self.root.entries.is_empty()
    }

    /// Look up the entry at a `/`-separated relative path.
    pub fn get_path(&self, path: &str) -> Option<&Entry> {
        let path = path.trim_matches('/');
        if path.is_empty() {
            return Some(&self.root);
        }
        let mut entry = &self.root;
        for step in path.split('/') {
            if !entry.kind.is_tree() {
                return None;
            }
            entry = entry.entries.get(step)?;
        }
        Some(entry)
    }

    /// Walk every entry top-down and depth-first, yielding `/`-joined paths.
    pub fn walk(&self) -> impl Iterator<Item = (String, &Entry)> {
        let mut out = Vec::new();
        walk_into(&self.root, String::new(), &mut out);
        out.into_iter()
    }
}

fn walk_into<'a>(entry: &'a Entry, prefix: String, out: &mut Vec<(String, &'a Entry)>) {
    let mut names: Vec<_> = entry.entries.keys().cloned().collect();
    names.sort();
    for name in names {
        let child = &entry.entries[&name];
        let path = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{prefix}/{name}")
        };
        out.push((path.clone(), child));
        if child.kind == EntryKind::Tree {
            walk_into(child, path, out);
        }
    }
}
