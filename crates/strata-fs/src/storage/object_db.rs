// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

use std::path::Path;

use strata_digest::Digest;

use super::hash_store::HashStore;
use crate::graph::encoding::{Decodable, Encodable};
use crate::graph::{Database, DigestSearchCriteria, Object};
use crate::Result;

/// An on-disk object [`Database`]: objects are stored at
/// `<root>/objects/<digest[:2]>/<digest[2:]>` in their canonical encoding.
pub struct FsDatabase {
    store: HashStore,
}

impl FsDatabase {
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            store: HashStore::open(root)?,
        })
    }
}

impl Database for FsDatabase {
    fn read_object(&self, digest: &Digest) -> Result<Object> {
        let mut reader = std::io::BufReader::new(self.store.open_data(digest)?);
        Object::decode(&mut reader)
    }

    fn write_object(&self, obj: &Object) -> Result<Digest> {
        let bytes = obj.encode_to_bytes()?;
        let (digest, _) = self.store.write_data(bytes.as_slice())?;
        Ok(digest)
    }

    fn remove_object(&self, digest: &Digest) -> Result<()> {
        self.store.remove_data(digest)
    }

    fn find_digests(
        &self,
        criteria: DigestSearchCriteria,
    ) -> Result<Box<dyn Iterator<Item = Result<Digest>> + '_>> {
        self.store.iter_digests(criteria)
    }

    fn resolve_full_digest(&self, partial: &strata_digest::PartialDigest) -> Result<Digest> {
        self.store.resolve_full_digest(partial)
    }
}
