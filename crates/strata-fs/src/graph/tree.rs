// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;
use std::io::BufRead;

use strata_digest::Digest;

use super::encoding::{Decodable, Encodable};
use crate::{Error, Result};

#[cfg(test)]
#[path = "./tree_test.rs"]
mod tree_test;

/// The kind of a single entry within a [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EntryKind {
    Tree,
    Blob,
    Mask,
}

impl EntryKind {
    fn as_u8(self) -> u8 {
        match self {
            Self::Tree => 0,
            Self::Blob => 1,
            Self::Mask => 2,
        }
    }

    fn from_u8(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Self::Tree),
            1 => Ok(Self::Blob),
            2 => Ok(Self::Mask),
            other => Err(Error::String(format!("invalid tree entry kind: {other}"))),
        }
    }
}

/// One named child of a [`Tree`]: a file, subdirectory, or deletion mask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub kind: EntryKind,
    pub mode: u32,
    pub size: u64,
    pub object: Digest,
}

impl Entry {
    pub fn is_tree(&self) -> bool {
        matches!(self.kind, EntryKind::Tree)
    }

    pub fn is_mask(&self) -> bool {
        matches!(self.kind, EntryKind::Mask)
    }

    pub fn is_symlink(&self) -> bool {
        self.kind == EntryKind::Blob && unix_mode::is_symlink(self.mode)
    }
}

impl Encodable for Entry {
    fn encode(&self, writer: &mut impl std::io::Write) -> Result<()> {
        strata_digest::write_u8(&mut *writer, self.kind.as_u8())?;
        strata_digest::write_uint32(&mut *writer, self.mode)?;
        strata_digest::write_uint(&mut *writer, self.size)?;
        strata_digest::write_digest(&mut *writer, &self.object)?;
        let name_bytes = self.name.as_bytes();
        strata_digest::write_uint16(&mut *writer, name_bytes.len() as u16)?;
        writer
            .write_all(name_bytes)
            .map_err(strata_digest::Error::FailedWrite)?;
        Ok(())
    }
}

impl Decodable for Entry {
    fn decode(reader: &mut impl BufRead) -> Result<Self> {
        let kind = EntryKind::from_u8(strata_digest::read_u8(&mut *reader)?)?;
        let mode = strata_digest::read_uint32(&mut *reader)?;
        let size = strata_digest::read_uint(&mut *reader)?;
        let object = strata_digest::read_digest(&mut *reader)?;
        let name_len = strata_digest::read_uint16(&mut *reader)? as usize;
        let mut name_buf = vec![0u8; name_len];
        std::io::Read::read_exact(reader, &mut name_buf).map_err(strata_digest::Error::FailedRead)?;
        let name = String::from_utf8(name_buf)
            .map_err(|e| Error::String(format!("invalid utf-8 in entry name: {e}")))?;
        Ok(Entry {
            name,
            kind,
            mode,
            size,
            object,
        })
    }
}

/// An ordered set of named children, sorted and unique by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    entries: BTreeMap<String, Entry>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: impl IntoIterator<Item = Entry>) -> Result<Self> {
        let mut tree = Self::new();
        for entry in entries {
            tree.add(entry)?;
        }
        Ok(tree)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.entries.get(name)
    }

    /// Add an entry, replacing any existing entry of the same name.
    pub fn add(&mut self, entry: Entry) -> Result<()> {
        self.entries.insert(entry.name.clone(), entry);
        Ok(())
    }

    pub fn remove(&mut self, name: &str) -> Option<Entry> {
        self.entries.remove(name)
    }

    /// Iterate entries in lexicographic order by name.
    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.values()
    }
}

impl Encodable for Tree {
    fn encode(&self, writer: &mut impl std::io::Write) -> Result<()> {
        strata_digest::write_uint(&mut *writer, self.len() as u64)?;
        for entry in self.iter() {
            entry.encode(writer)?;
        }
        Ok(())
    }
}

impl Decodable for Tree {
    fn decode(reader: &mut impl BufRead) -> Result<Self> {
        let count = strata_digest::read_uint(&mut *reader)?;
        let mut tree = Tree::new();
        for _ in 0..count {
            let entry = Entry::decode(reader)?;
            tree.add(entry)?;
        }
        Ok(tree)
    }
}
