// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

//! Walks a filesystem tree, streams blobs into a payload store, and interns
//! the resulting directory structure into the object graph as a canonical
//! [`graph::Manifest`].

use std::os::unix::fs::MetadataExt;
use std::path::Path;

use strata_digest::Digest;

use crate::graph::{self, Database, EntryKind};
use crate::storage::PayloadStore;
use crate::tracking;
use crate::{Error, Result};

/// Walk `path` on the local filesystem, streaming every regular file and
/// symlink target into `payloads`, and return the in-memory tree that
/// describes what was found.
///
/// Non-regular, non-symlink, non-directory entries (device nodes, FIFOs,
/// sockets) fail with [`Error::UnsupportedFile`].
fn walk_path(payloads: &PayloadStore, path: &Path) -> Result<tracking::Entry> {
    let metadata = std::fs::symlink_metadata(path)?;
    let file_type = metadata.file_type();

    if file_type.is_dir() {
        let mut entry = tracking::Entry {
            mode: metadata.mode(),
            ..tracking::Entry::empty_dir()
        };
        let mut names: Vec<_> = std::fs::read_dir(path)?
            .map(|res| res.map(|e| e.file_name()))
            .collect::<std::io::Result<Vec<_>>>()?;
        names.sort();
        for name in names {
            let child = walk_path(payloads, &path.join(&name))?;
            entry.entries.insert(name.to_string_lossy().into_owned(), child);
        }
        Ok(entry)
    } else if file_type.is_symlink() {
        let target = std::fs::read_link(path)?;
        let target_bytes = target.to_string_lossy().into_owned().into_bytes();
        let object = payloads.write_payload(target_bytes.as_slice())?;
        Ok(tracking::Entry {
            kind: EntryKind::Blob,
            mode: metadata.mode(),
            size: target_bytes.len() as u64,
            object,
            entries: Default::default(),
        })
    } else if file_type.is_file() {
        let file = std::fs::File::open(path)?;
        let object = payloads.write_payload(file)?;
        Ok(tracking::Entry {
            kind: EntryKind::Blob,
            mode: metadata.mode(),
            size: metadata.len(),
            object,
            entries: Default::default(),
        })
    } else {
        Err(Error::UnsupportedFile(path.to_path_buf()))
    }
}

/// Walk `path`, computing content digests in memory without writing
/// anything to a payload store. Used by the diff engine, which only needs
/// to compare digests, not durably store the bytes behind them.
pub(crate) fn walk_path_digest_only(path: &Path) -> Result<tracking::Entry> {
    let metadata = std::fs::symlink_metadata(path)?;
    let file_type = metadata.file_type();

    if file_type.is_dir() {
        let mut entry = tracking::Entry {
            mode: metadata.mode(),
            ..tracking::Entry::empty_dir()
        };
        let mut names: Vec<_> = std::fs::read_dir(path)?
            .map(|res| res.map(|e| e.file_name()))
            .collect::<std::io::Result<Vec<_>>>()?;
        names.sort();
        for name in names {
            let child = walk_path_digest_only(&path.join(&name))?;
            entry.entries.insert(name.to_string_lossy().into_owned(), child);
        }
        Ok(entry)
    } else if file_type.is_symlink() {
        let target = std::fs::read_link(path)?;
        let bytes = target.to_string_lossy().into_owned().into_bytes();
        let object = Digest::from_reader(bytes.as_slice())?;
        Ok(tracking::Entry {
            kind: EntryKind::Blob,
            mode: metadata.mode(),
            size: bytes.len() as u64,
            object,
            entries: Default::default(),
        })
    } else if file_type.is_file() {
        let object = Digest::from_reader(std::fs::File::open(path)?)?;
        Ok(tracking::Entry {
            kind: EntryKind::Blob,
            mode: metadata.mode(),
            size: metadata.len(),
            object,
            entries: Default::default(),
        })
    } else {
        Err(Error::UnsupportedFile(path.to_path_buf()))
    }
}

/// Commit `path` to `db`, storing its file and symlink contents in
/// `payloads` along the way, and return the resulting canonical manifest.
///
/// Writing happens in a single walk: each file's blob is streamed into the
/// payload store as its entry is discovered, rather than in a second pass
/// over the already-built tree.
pub fn commit_path(db: &dyn Database, payloads: &PayloadStore, path: &Path) -> Result<graph::Manifest> {
    let canonical = path.canonicalize()?;
    let root = walk_path(payloads, &canonical)?;
    if !root.is_dir() {
        return Err(Error::UnsupportedFile(canonical));
    }
    intern(db, &tracking::Manifest::new(root))
}

/// Intern an in-memory [`tracking::Manifest`] into the object graph,
/// writing one [`graph::Tree`] per directory (bottom-up), one [`graph::Blob`]
/// per file or symlink, and finally the [`graph::Manifest`] itself.
///
/// Identical content at any level yields identical digests and writing an
/// already-present object is a no-op, so repeated commits of unchanged
/// content never duplicate storage.
pub fn intern(db: &dyn Database, manifest: &tracking::Manifest) -> Result<graph::Manifest> {
    let mut subtrees = Vec::new();
    let root = intern_dir(db, manifest.root(), &mut subtrees)?;
    let graph_manifest = graph::Manifest::new(root, subtrees);
    db.write_object(&graph::Object::Manifest(graph_manifest.clone()))?;
    Ok(graph_manifest)
}

fn intern_dir(db: &dyn Database, dir: &tracking::Entry, subtrees: &mut Vec<Digest>) -> Result<Digest> {
    let mut entries = Vec::with_capacity(dir.entries.len());
    for (name, child) in dir.entries.iter() {
        if child.is_dir() {
            let child_digest = intern_dir(db, child, subtrees)?;
            subtrees.push(child_digest);
            entries.push(graph::Entry {
                name: name.clone(),
                kind: EntryKind::Tree,
                mode: child.mode,
                size: 0,
                object: child_digest,
            });
        } else {
            db.write_object(&graph::Object::Blob(graph::Blob::new(child.object, child.size)))?;
            entries.push(graph::Entry {
                name: name.clone(),
                kind: EntryKind::Blob,
                mode: child.mode,
                size: child.size,
                object: child.object,
            });
        }
    }
    let tree = graph::Tree::from_entries(entries)?;
    db.write_object(&graph::Object::Tree(tree))
}

/// Wrap a committed manifest as a new [`graph::Layer`], the unit of
/// deduplicable change stacked into a [`graph::Platform`].
///
/// # Errors
/// [`Error::NothingToCommit`] if the manifest's root tree has no entries.
pub fn create_layer(db: &dyn Database, manifest: &graph::Manifest) -> Result<graph::Layer> {
    if manifest.root_tree(db)?.is_empty() {
        return Err(Error::NothingToCommit);
    }
    let manifest_digest = graph::Object::from(manifest.clone()).digest()?;
    let layer = graph::Layer::new(manifest_digest);
    db.write_object(&graph::Object::Layer(layer))?;
    Ok(layer)
}

#[cfg(test)]
#[path = "./commit_test.rs"]
mod commit_test;
