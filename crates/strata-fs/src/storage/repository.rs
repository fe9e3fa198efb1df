// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

use std::io::Read;

use strata_digest::Digest;

use crate::graph::{Database, Layer, Manifest, Object, Platform};
use crate::tracking::{Tag, TagSpec};
use crate::Result;

/// Bundles one tag store, one object database, and one payload store behind
/// a single contract that every storage backend (local filesystem, tar
/// archive, eventually a remote) must satisfy.
pub trait Repository: Database {
    /// Walk `path` on the local filesystem and commit it as a new manifest.
    /// Only implemented by writable (non-archival) backends.
    fn commit_dir(&self, path: &std::path::Path) -> Result<Manifest>;

    /// True if `reference` resolves to an object, either as a digest
    /// prefix or a tag spec.
    fn has_ref(&self, reference: &str) -> bool {
        self.read_ref(reference).is_ok()
    }

    /// Resolve a reference: digest-prefix expansion is tried first, then
    /// tag resolution.
    fn read_ref(&self, reference: &str) -> Result<Digest>;

    fn push_tag(&self, org: &str, name: &str, target: Digest) -> Result<Tag>;

    fn resolve_tag(&self, spec: &TagSpec) -> Result<Tag>;

    fn find_tags(&self, digest: &Digest) -> Result<Vec<TagSpec>>;

    fn ls_tags(&self, prefix: &str) -> Result<Vec<String>>;

    fn remove_tag(&self, tag: &Tag) -> Result<()>;

    fn remove_tag_stream(&self, spec: &TagSpec) -> Result<()>;

    /// Every tag stream this repository holds, as a head-version spec.
    /// The roots that clean and sync closures are computed from.
    fn iter_tags(&self) -> Result<Vec<TagSpec>>;

    fn has_payload(&self, digest: &Digest) -> bool;

    fn open_payload(&self, digest: &Digest) -> Result<Box<dyn Read + '_>>;

    /// Consume `reader` to completion, writing it into this repository's
    /// payload store and returning the digest of its content.
    fn write_payload(&self, reader: &mut dyn Read) -> Result<Digest>;

    fn remove_payload(&self, digest: &Digest) -> Result<()>;

    fn iter_payload_digests(&self) -> Result<Box<dyn Iterator<Item = Result<Digest>> + '_>>;

    /// Iterate every manifest object in the database.
    fn iter_manifests(&self) -> Result<Vec<(Digest, Manifest)>> {
        self.iter_digests()?
            .filter_map(|digest| {
                let digest = match digest {
                    Ok(d) => d,
                    Err(e) => return Some(Err(e)),
                };
                match self.read_object(&digest) {
                    Ok(Object::Manifest(m)) => Some(Ok((digest, m))),
                    Ok(_) => None,
                    Err(e) => Some(Err(e)),
                }
            })
            .collect()
    }

    /// Iterate every layer object in the database.
    fn iter_layers(&self) -> Result<Vec<(Digest, Layer)>> {
        self.iter_digests()?
            .filter_map(|digest| {
                let digest = match digest {
                    Ok(d) => d,
                    Err(e) => return Some(Err(e)),
                };
                match self.read_object(&digest) {
                    Ok(Object::Layer(l)) => Some(Ok((digest, l))),
                    Ok(_) => None,
                    Err(e) => Some(Err(e)),
                }
            })
            .collect()
    }

    /// Iterate every platform object in the database.
    fn iter_platforms(&self) -> Result<Vec<(Digest, Platform)>> {
        self.iter_digests()?
            .filter_map(|digest| {
                let digest = match digest {
                    Ok(d) => d,
                    Err(e) => return Some(Err(e)),
                };
                match self.read_object(&digest) {
                    Ok(Object::Platform(p)) => Some(Ok((digest, p))),
                    Ok(_) => None,
                    Err(e) => Some(Err(e)),
                }
            })
            .collect()
    }
}
