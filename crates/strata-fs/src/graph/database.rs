// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

use strata_digest::{Digest, PartialDigest};

use super::object::Object;
use crate::{Error, Result};

/// Selects which digests [`Database::find_digests`] should yield.
#[derive(Debug)]
pub enum DigestSearchCriteria {
    All,
    StartsWith(PartialDigest),
}

/// The object graph database: a content-addressed store of [`Object`]s.
pub trait Database {
    /// Read the object identified by `digest`.
    ///
    /// # Errors
    /// - [`Error::UnknownObject`] if no such object exists.
    fn read_object(&self, digest: &Digest) -> Result<Object>;

    /// Write an object, returning its digest whether newly written or
    /// already present. Idempotent.
    fn write_object(&self, obj: &Object) -> Result<Digest>;

    /// Remove an object from the database.
    fn remove_object(&self, digest: &Digest) -> Result<()>;

    /// Iterate the digests matching a search criteria.
    fn find_digests(
        &self,
        criteria: DigestSearchCriteria,
    ) -> Result<Box<dyn Iterator<Item = Result<Digest>> + '_>>;

    /// Return true if this database contains the identified object.
    fn has_object(&self, digest: &Digest) -> bool {
        self.read_object(digest).is_ok()
    }

    /// Iterate every digest stored in this database.
    fn iter_digests(&self) -> Result<Box<dyn Iterator<Item = Result<Digest>> + '_>> {
        self.find_digests(DigestSearchCriteria::All)
    }

    /// Expand a hex digest prefix to the one full digest it identifies.
    ///
    /// # Errors
    /// - [`Error::UnknownReference`] if no digest matches.
    /// - [`Error::AmbiguousReference`] if more than one digest matches.
    fn resolve_full_digest(&self, partial: &PartialDigest) -> Result<Digest> {
        if let Some(digest) = partial.to_digest() {
            if self.has_object(&digest) {
                return Ok(digest);
            }
            return Err(Error::UnknownReference(partial.to_string()));
        }
        let mut matches = self
            .find_digests(DigestSearchCriteria::StartsWith(partial.clone()))?
            .collect::<Result<Vec<_>>>()?;
        match matches.len() {
            0 => Err(Error::UnknownReference(partial.to_string())),
            1 => Ok(matches.remove(0)),
            _ => Err(Error::AmbiguousReference(partial.to_string())),
        }
    }

    /// Read the object at `digest`, expecting it to be a [`super::Tree`].
    fn read_tree(&self, digest: &Digest) -> Result<super::tree::Tree> {
        match self.read_object(digest)? {
            Object::Tree(tree) => Ok(tree),
            other => Err(Error::InvalidRef {
                reference: digest.to_string(),
                reason: format!("expected a tree, found a {other}"),
            }),
        }
    }

    /// Read the object at `digest`, expecting it to be a [`super::Manifest`].
    fn read_manifest(&self, digest: &Digest) -> Result<super::manifest::Manifest> {
        match self.read_object(digest)? {
            Object::Manifest(manifest) => Ok(manifest),
            other => Err(Error::InvalidRef {
                reference: digest.to_string(),
                reason: format!("expected a manifest, found a {other}"),
            }),
        }
    }

    /// Read the object at `digest`, expecting it to be a [`super::Layer`].
    fn read_layer(&self, digest: &Digest) -> Result<super::layer::Layer> {
        match self.read_object(digest)? {
            Object::Layer(layer) => Ok(layer),
            other => Err(Error::InvalidRef {
                reference: digest.to_string(),
                reason: format!("expected a layer, found a {other}"),
            }),
        }
    }

    /// Read the object at `digest`, expecting it to be a [`super::Platform`].
    fn read_platform(&self, digest: &Digest) -> Result<super::platform::Platform> {
        match self.read_object(digest)? {
            Object::Platform(platform) => Ok(platform),
            other => Err(Error::InvalidRef {
                reference: digest.to_string(),
                reason: format!("expected a platform, found a {other}"),
            }),
        }
    }
}
