// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

use std::io::Write;

use strata_digest::{Digest, Hasher};

use crate::Result;

/// A graph object that can be written to its canonical binary form.
///
/// Every [`super::Object`] variant's digest is defined as the hash of its
/// own [`Encodable::encode`] output, with the object's one-byte kind tag
/// prepended by the caller before hashing (see [`super::Object::digest`]).
pub trait Encodable
where
    Self: Sized,
{
    fn encode(&self, writer: &mut impl Write) -> Result<()>;

    fn encode_to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.encode(&mut buf)?;
        Ok(buf)
    }

    /// Compute the digest of this object's canonical encoding alone, with no
    /// kind tag. Useful for content that is not itself a top-level object
    /// (for example a [`super::Tree`] interned within a [`super::Manifest`]).
    fn digest(&self) -> Result<Digest> {
        let mut hasher = Hasher::default();
        self.encode(&mut hasher)?;
        Ok(hasher.digest())
    }
}

pub trait Decodable
where
    Self: Encodable,
{
    fn decode(reader: &mut impl std::io::BufRead) -> Result<Self>;
}
