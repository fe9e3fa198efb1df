// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

use std::io::BufRead;

use strata_digest::Digest;

use super::encoding::{Decodable, Encodable};
use crate::Result;

/// A metadata-only reference to a payload stored in the payload store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Blob {
    pub payload: Digest,
    pub size: u64,
}

impl Blob {
    pub fn new(payload: Digest, size: u64) -> Self {
        Self { payload, size }
    }
}

impl Encodable for Blob {
    fn encode(&self, writer: &mut impl std::io::Write) -> Result<()> {
        strata_digest::write_digest(&mut *writer, &self.payload)?;
        strata_digest::write_uint(&mut *writer, self.size)?;
        Ok(())
    }
}

impl Decodable for Blob {
    fn decode(reader: &mut impl BufRead) -> Result<Self> {
        let payload = strata_digest::read_digest(&mut *reader)?;
        let size = strata_digest::read_uint(&mut *reader)?;
        Ok(Blob { payload, size })
    }
}
