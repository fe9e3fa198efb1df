// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

use std::fs::File;
use std::io::Read;
use std::path::Path;

use strata_digest::Digest;

use super::hash_store::HashStore;
use crate::graph::DigestSearchCriteria;
use crate::Result;

/// The payload store: raw file contents and symlink targets, addressed by
/// the digest of their uncompressed bytes.
///
/// Distinct from the object database: payloads are never decoded as
/// objects, only streamed in and out.
pub struct PayloadStore {
    store: HashStore,
}

impl PayloadStore {
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            store: HashStore::open(root)?,
        })
    }

    /// Consume `reader` to completion, writing its bytes to the store and
    /// returning the digest of the content.
    pub fn write_payload(&self, reader: impl Read) -> Result<Digest> {
        let (digest, _size) = self.store.write_data(reader)?;
        Ok(digest)
    }

    pub fn open_payload(&self, digest: &Digest) -> Result<File> {
        self.store.open_data(digest)
    }

    pub fn remove_payload(&self, digest: &Digest) -> Result<()> {
        self.store.remove_data(digest)
    }

    pub fn has_payload(&self, digest: &Digest) -> bool {
        self.store.has_digest(digest)
    }

    pub fn iter_payload_digests(&self) -> Result<Box<dyn Iterator<Item = Result<Digest>> + '_>> {
        self.store.iter_digests(DigestSearchCriteria::All)
    }
}
