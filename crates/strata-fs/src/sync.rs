// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

//! Copies the closure of a ref between two repositories: every object and
//! payload it transitively names, then the tag itself if the ref was a tag.

use strata_digest::Digest;
use tracing::info;

use crate::clean::reachable_from;
use crate::storage::Repository;
use crate::tracking::TagSpec;
use crate::Result;

/// Resolve `reference` in `src`, copy its full closure into `dst`, and
/// advance the same tag name in `dst` if `reference` names a tag (as
/// opposed to a bare digest or digest prefix). Idempotent: re-running with
/// nothing new to copy only re-pushes the tag.
pub fn sync_ref(reference: &str, src: &dyn Repository, dst: &dyn Repository) -> Result<Digest> {
    let digest = src.read_ref(reference)?;
    sync_closure(&digest, src, dst)?;

    if let Ok(spec) = TagSpec::parse(reference) {
        if src.resolve_tag(&spec).is_ok() {
            dst.push_tag(&spec.org, &spec.name, digest)?;
        }
    }
    Ok(digest)
}

/// Copy every object and payload reachable from `root` in `src` that is
/// not already present in `dst`. No tag is advanced.
pub fn sync_closure(root: &Digest, src: &dyn Repository, dst: &dyn Repository) -> Result<()> {
    let found = reachable_from(src, std::slice::from_ref(root))?;

    for digest in found.objects {
        if dst.has_object(&digest) {
            continue;
        }
        if !src.has_object(&digest) {
            // synthesized digests (see `crate::clean`) may not correspond
            // to an object actually written by the committer.
            continue;
        }
        let obj = src.read_object(&digest)?;
        dst.write_object(&obj)?;
        info!(%digest, "synced object");
    }

    for digest in found.payloads {
        if dst.has_payload(&digest) {
            continue;
        }
        let mut reader = src.open_payload(&digest)?;
        dst.write_payload(reader.as_mut())?;
        info!(%digest, "synced payload");
    }

    Ok(())
}

#[cfg(test)]
#[path = "./sync_test.rs"]
mod sync_test;
