// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

use std::io::BufRead;

use strata_digest::Digest;

use super::database::Database;
use super::encoding::{Decodable, Encodable};
use super::tree::Tree;
use crate::Result;

#[cfg(test)]
#[path = "./manifest_test.rs"]
mod manifest_test;

/// A root tree plus the set of every subtree interned beneath it, forming a
/// Merkle tree over a filesystem snapshot.
///
/// The manifest itself carries no tree bytes: every [`Tree`] it names (the
/// root and each subtree) is written to the object database as its own
/// object, and the manifest is just the closure of digests that make it up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    pub root: Digest,
    /// Digests of every subtree beneath the root, not including the root
    /// itself. Order is insertion order from the commit walk and carries no
    /// semantic meaning, but is kept stable for a deterministic encoding.
    pub trees: Vec<Digest>,
}

impl Manifest {
    pub fn new(root: Digest, trees: Vec<Digest>) -> Self {
        Self { root, trees }
    }

    /// Every tree digest this manifest references, root first.
    pub fn iter_tree_digests(&self) -> impl Iterator<Item = &Digest> {
        std::iter::once(&self.root).chain(self.trees.iter())
    }

    /// Resolve and return the root [`Tree`] from the given database.
    pub fn root_tree(&self, db: &dyn Database) -> Result<Tree> {
        db.read_tree(&self.root)
    }

    /// Walk every entry reachable from the root, depth-first, yielding
    /// `(path, entry)` pairs with `/`-joined relative paths.
    pub fn walk(&self, db: &dyn Database) -> Result<Vec<(String, super::tree::Entry)>> {
        let mut out = Vec::new();
        let root = self.root_tree(db)?;
        walk_tree(db, &root, "", &mut out)?;
        Ok(out)
    }

    /// All blob/mask child object digests named anywhere in this manifest.
    pub fn child_objects(&self, db: &dyn Database) -> Result<Vec<Digest>> {
        let mut out = Vec::new();
        for digest in self.iter_tree_digests() {
            let tree = db.read_tree(digest)?;
            for entry in tree.iter() {
                if !entry.is_tree() {
                    out.push(entry.object);
                }
            }
        }
        Ok(out)
    }
}

fn walk_tree(
    db: &dyn Database,
    tree: &Tree,
    prefix: &str,
    out: &mut Vec<(String, super::tree::Entry)>,
) -> Result<()> {
    for entry in tree.iter() {
        let path = if prefix.is_empty() {
            entry.name.clone()
        } else {
            format!("{prefix}/{}", entry.name)
        };
        if entry.is_tree() {
            let child = db.read_tree(&entry.object)?;
            walk_tree(db, &child, &path, out)?;
        }
        out.push((path, entry.clone()));
    }
    Ok(())
}

impl Encodable for Manifest {
    fn encode(&self, writer: &mut impl std::io::Write) -> Result<()> {
        strata_digest::write_digest(&mut *writer, &self.root)?;
        strata_digest::write_uint(&mut *writer, self.trees.len() as u64)?;
        for digest in &self.trees {
            strata_digest::write_digest(&mut *writer, digest)?;
        }
        Ok(())
    }
}

impl Decodable for Manifest {
    fn decode(reader: &mut impl BufRead) -> Result<Self> {
        let root = strata_digest::read_digest(&mut *reader)?;
        let count = strata_digest::read_uint(&mut *reader)?;
        let mut trees = Vec::with_capacity(count as usize);
        for _ in 0..count {
            trees.push(strata_digest::read_digest(&mut *reader)?);
        }
        Ok(Manifest { root, trees })
    }
}
