// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;

use strata_digest::Digest;

pub use crate::graph::EntryKind;

#[cfg(test)]
#[path = "./entry_test.rs"]
mod entry_test;

/// A live, in-memory filesystem tree node, as built by the committer before
/// it is interned into immutable [`crate::graph::Tree`] objects.
///
/// Unlike [`crate::graph::Entry`], a tracking entry owns its children
/// directly rather than pointing at another object by digest, which makes
/// it cheap to build and mutate while walking a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub kind: EntryKind,
    pub mode: u32,
    pub size: u64,
    /// The payload digest for a blob entry; meaningless for a tree entry,
    /// which derives its object digest from its children at intern time.
    pub object: Digest,
    pub entries: BTreeMap<String, Entry>,
}

impl Default for Entry {
    fn default() -> Self {
        Self {
            kind: EntryKind::Tree,
            mode: 0o40755,
            size: 0,
            object: Digest::default(),
            entries: Default::default(),
        }
    }
}

impl Entry {
    pub fn empty_dir() -> Self {
        Self::default()
    }

    pub fn is_symlink(&self) -> bool {
        self.kind == EntryKind::Blob && unix_mode::is_symlink(self.mode)
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Tree
    }

    pub fn is_regular_file(&self) -> bool {
        self.kind == EntryKind::Blob && !self.is_symlink()
    }
}
