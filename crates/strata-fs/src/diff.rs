// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

//! Structural diffing: between two committed manifests, or between a
//! committed manifest and a live filesystem path.

use std::path::Path;

use strata_digest::Digest;

use crate::commit::walk_path_digest_only;
use crate::graph::Database;
use crate::resolve::manifest_to_tracking;
use crate::tracking::{self, Diff};
use crate::Result;

pub use tracking::compute_diff;

/// Diff a committed manifest against a live directory on disk.
///
/// The filesystem side is walked in memory only: file and symlink content
/// is hashed to compute a comparable digest, but nothing is written to a
/// payload store. This is the same walk [`crate::commit::commit_path`]
/// performs, minus the durable write, so a diff never mutates storage.
pub fn diff_manifest_against_path(
    db: &dyn Database,
    manifest_digest: &Digest,
    path: &Path,
) -> Result<Vec<Diff>> {
    let manifest = db.read_manifest(manifest_digest)?;
    let committed = manifest_to_tracking(db, &manifest)?;
    let on_disk = tracking::Manifest::new(walk_path_digest_only(path)?);
    Ok(compute_diff(&committed, &on_disk))
}

#[cfg(test)]
#[path = "./diff_test.rs"]
mod diff_test;
