// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

//! Reachability from tag roots, and removal of anything outside that
//! closure. A stop-the-world administrative operation: safety against
//! concurrent writers is the operator's responsibility (§5).

use std::collections::HashSet;

use strata_digest::Digest;
use tracing::info;

use crate::graph::{Blob, DigestSearchCriteria, Object};
use crate::storage::Repository;
use crate::Result;

/// The set of object and payload digests still reachable from every tag
/// head in a repository.
#[derive(Debug, Default)]
pub struct Reachable {
    pub objects: HashSet<Digest>,
    pub payloads: HashSet<Digest>,
}

/// What a clean pass would remove: every object and payload digest present
/// in the repository but outside its reachable closure.
#[derive(Debug, Default)]
pub struct CleanPlan {
    pub objects: Vec<Digest>,
    pub payloads: Vec<Digest>,
}

/// Compute the reachable closure of every tag head in `repo`.
pub fn reachable(repo: &dyn Repository) -> Result<Reachable> {
    let roots = repo
        .iter_tags()?
        .into_iter()
        .filter_map(|spec| repo.resolve_tag(&spec).ok())
        .map(|tag| tag.target)
        .collect::<Vec<_>>();
    reachable_from(repo, &roots)
}

/// Compute the reachable closure of an explicit set of root digests,
/// rather than every tag head. Used by [`crate::sync::sync_ref`] to copy
/// just the closure of the one ref being synced.
pub fn reachable_from(repo: &dyn Repository, roots: &[Digest]) -> Result<Reachable> {
    let mut found = Reachable::default();
    for root in roots {
        walk_reachable(repo, root, &mut found)?;
    }
    Ok(found)
}

fn walk_reachable(repo: &dyn Repository, digest: &Digest, found: &mut Reachable) -> Result<()> {
    if !found.objects.insert(*digest) {
        return Ok(());
    }
    match repo.read_object(digest)? {
        Object::Blob(blob) => {
            found.payloads.insert(blob.payload);
        }
        Object::Tree(tree) => {
            walk_tree_entries(repo, &tree, found)?;
        }
        Object::Manifest(manifest) => {
            for tree_digest in manifest.iter_tree_digests() {
                if found.objects.insert(*tree_digest) {
                    let tree = repo.read_tree(tree_digest)?;
                    walk_tree_entries(repo, &tree, found)?;
                }
            }
        }
        Object::Layer(layer) => walk_reachable(repo, &layer.manifest, found)?,
        Object::Platform(platform) => {
            for layer_digest in platform.iter_bottom_up() {
                walk_reachable(repo, layer_digest, found)?;
            }
        }
        Object::Mask => {}
    }
    Ok(())
}

fn walk_tree_entries(repo: &dyn Repository, tree: &crate::graph::Tree, found: &mut Reachable) -> Result<()> {
    for entry in tree.iter() {
        match entry.kind {
            crate::graph::EntryKind::Mask => {}
            crate::graph::EntryKind::Blob => {
                found.payloads.insert(entry.object);
                // blob entries name the payload digest directly; the
                // standalone `graph::Blob` object that records its size is
                // never named by a tree entry, so it is reconstructed here
                // rather than walked to.
                let blob_digest = Object::Blob(Blob::new(entry.object, entry.size)).digest()?;
                found.objects.insert(blob_digest);
            }
            crate::graph::EntryKind::Tree => {
                if found.objects.insert(entry.object) {
                    let child = repo.read_tree(&entry.object)?;
                    walk_tree_entries(repo, &child, found)?;
                }
            }
        }
    }
    Ok(())
}

/// List every object and payload not reachable from any tag head, without
/// removing anything.
pub fn plan_clean(repo: &dyn Repository) -> Result<CleanPlan> {
    let found = reachable(repo)?;
    let mut plan = CleanPlan::default();
    for digest in repo.find_digests(DigestSearchCriteria::All)? {
        let digest = digest?;
        if !found.objects.contains(&digest) {
            plan.objects.push(digest);
        }
    }
    for digest in repo.iter_payload_digests()? {
        let digest = digest?;
        if !found.payloads.contains(&digest) {
            plan.payloads.push(digest);
        }
    }
    Ok(plan)
}

/// Remove everything named by a previously computed [`CleanPlan`].
pub fn execute_clean(repo: &dyn Repository, plan: &CleanPlan) -> Result<()> {
    for digest in &plan.objects {
        info!(%digest, "removing unreachable object");
        repo.remove_object(digest)?;
    }
    for digest in &plan.payloads {
        info!(%digest, "removing unreachable payload");
        repo.remove_payload(digest)?;
    }
    Ok(())
}

/// Compute and execute a clean pass in one step.
pub fn clean(repo: &dyn Repository) -> Result<CleanPlan> {
    let plan = plan_clean(repo)?;
    execute_clean(repo, &plan)?;
    Ok(plan)
}

#[cfg(test)]
#[path = "./clean_test.rs"]
mod clean_test;
