// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

//! Flattens a stack of refs (tags, digests, or platforms) into an ordered
//! list of layers, and folds that list's manifests into the single
//! effective filesystem a runtime should render.

use std::collections::BTreeMap;

use strata_digest::Digest;

use crate::graph::{self, Database, Entry as GraphEntry};
use crate::storage::Repository;
use crate::tracking;
use crate::{Error, Result};

/// Resolve a stack of refs to the ordered list of layers they expand to.
///
/// Each ref is a tag spec, digest, or digest prefix. A platform ref is
/// replaced in place by its own inner stack, recursively, so the result
/// never contains a platform. Order is preserved: earlier entries are
/// lower layers, later entries are upper layers that win on conflict.
pub fn resolve_stack_to_layers(
    repo: &dyn Repository,
    stack: &[String],
) -> Result<Vec<(Digest, graph::Layer)>> {
    let mut out = Vec::new();
    for reference in stack {
        let digest = repo.read_ref(reference)?;
        expand_ref(repo, &digest, &mut out)?;
    }
    Ok(out)
}

fn expand_ref(repo: &dyn Repository, digest: &Digest, out: &mut Vec<(Digest, graph::Layer)>) -> Result<()> {
    match repo.read_object(digest)? {
        graph::Object::Platform(platform) => {
            for layer_digest in platform.iter_bottom_up() {
                expand_ref(repo, layer_digest, out)?;
            }
            Ok(())
        }
        graph::Object::Layer(layer) => {
            out.push((*digest, layer));
            Ok(())
        }
        other => Err(Error::InvalidRef {
            reference: digest.to_string(),
            reason: format!("expected a layer or platform, found a {other}"),
        }),
    }
}

/// Rebuild a flat, path-keyed view of every entry a manifest contains,
/// `/`-joined root-relative paths to the [`graph::Entry`] found there.
fn flatten(db: &dyn Database, manifest: &graph::Manifest) -> Result<BTreeMap<String, GraphEntry>> {
    Ok(manifest.walk(db)?.into_iter().collect())
}

/// Merge two manifests' flattened path maps: `upper` wins at every path it
/// names. A `mask` entry in `upper` deletes the path (and, since paths are
/// plain strings, every path nested beneath it) from the result rather than
/// appearing in it.
///
/// This is the core of stack resolution (§4.6): folded left-to-right across
/// a layer stack, it produces the effective merged filesystem.
pub fn merge_manifests(
    db: &dyn Database,
    lower: &graph::Manifest,
    upper: &graph::Manifest,
) -> Result<tracking::Manifest> {
    let lower_paths = flatten(db, lower)?;
    let upper_paths = flatten(db, upper)?;

    let masked: Vec<&str> = upper_paths
        .iter()
        .filter(|(_, entry)| entry.is_mask())
        .map(|(path, _)| path.as_str())
        .collect();
    let is_masked = |path: &str| masked.iter().any(|m| path == *m || path.starts_with(&format!("{m}/")));

    let mut merged: BTreeMap<String, GraphEntry> = BTreeMap::new();
    for (path, entry) in lower_paths {
        if !is_masked(&path) {
            merged.insert(path, entry);
        }
    }
    for (path, entry) in upper_paths {
        if entry.is_mask() {
            merged.remove(&path);
            continue;
        }
        merged.insert(path, entry);
    }

    Ok(build_tracking_manifest(merged))
}

/// Fold an ordered layer stack's manifests into the single effective
/// manifest a runtime should render, lower layers first.
///
/// This fold is a strict left-to-right accumulation, not a symmetric or
/// associative combine: `fold(fold(a, b), c)` matches `fold(a, fold(b, c))`
/// only when no layer in the middle both masks and reintroduces the same
/// path, since a mask's effect is "erase everything beneath me in whatever
/// I'm merged on top of," and which manifest plays that role changes
/// depending on how the fold associates. Stack resolution always folds
/// left-to-right in stack order, never any other grouping, so the
/// ambiguity never arises in practice.
pub fn fold_stack(db: &dyn Database, layers: &[graph::Layer]) -> Result<tracking::Manifest> {
    let mut iter = layers.iter();
    let Some(first) = iter.next() else {
        return Ok(tracking::Manifest::default());
    };
    let mut accumulated = db.read_manifest(&first.manifest)?;
    for layer in iter {
        let upper = db.read_manifest(&layer.manifest)?;
        // the next fold step needs a `graph::Manifest` to merge again, so
        // intern the accumulated result back into the graph. The blobs it
        // references already exist (they came from existing layers), so
        // this only ever writes new Tree/Manifest objects, never payloads.
        accumulated = crate::commit::intern(db, &merge_manifests(db, &accumulated, &upper)?)?;
    }
    manifest_to_tracking(db, &accumulated)
}

pub fn manifest_to_tracking(db: &dyn Database, manifest: &graph::Manifest) -> Result<tracking::Manifest> {
    let flat = flatten(db, manifest)?;
    Ok(build_tracking_manifest(flat))
}

fn build_tracking_manifest(paths: BTreeMap<String, GraphEntry>) -> tracking::Manifest {
    let mut root = tracking::Entry::empty_dir();
    for (path, entry) in paths {
        insert_path(&mut root, &path, &entry);
    }
    tracking::Manifest::new(root)
}

fn insert_path(root: &mut tracking::Entry, path: &str, entry: &GraphEntry) {
    let segments: Vec<&str> = path.split('/').collect();
    let mut current = root;
    for (i, segment) in segments.iter().enumerate() {
        let is_last = i == segments.len() - 1;
        if is_last {
            let node = current
                .entries
                .entry(segment.to_string())
                .or_insert_with(tracking::Entry::empty_dir);
            node.kind = entry.kind;
            node.mode = entry.mode;
            node.size = entry.size;
            node.object = entry.object;
        } else {
            current = current
                .entries
                .entry(segment.to_string())
                .or_insert_with(tracking::Entry::empty_dir);
        }
    }
}

#[cfg(test)]
#[path = "./resolve_test.rs"]
mod resolve_test;
