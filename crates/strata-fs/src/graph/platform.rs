// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

use std::io::BufRead;

use strata_digest::Digest;

use super::encoding::{Decodable, Encodable};
use crate::Result;

/// An ordered stack of layer digests. Order is meaningful: later entries
/// override earlier ones when the stack is resolved to a filesystem.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Platform {
    pub stack: Vec<Digest>,
}

impl Platform {
    pub fn new(stack: Vec<Digest>) -> Self {
        Self { stack }
    }

    /// Layers in bottom-to-top order, as used when folding a stack.
    pub fn iter_bottom_up(&self) -> impl Iterator<Item = &Digest> {
        self.stack.iter()
    }
}

impl Encodable for Platform {
    fn encode(&self, writer: &mut impl std::io::Write) -> Result<()> {
        strata_digest::write_uint(&mut *writer, self.stack.len() as u64)?;
        for digest in &self.stack {
            strata_digest::write_digest(&mut *writer, digest)?;
        }
        Ok(())
    }
}

impl Decodable for Platform {
    fn decode(reader: &mut impl BufRead) -> Result<Self> {
        let count = strata_digest::read_uint(&mut *reader)?;
        let mut stack = Vec::with_capacity(count as usize);
        for _ in 0..count {
            stack.push(strata_digest::read_digest(&mut *reader)?);
        }
        Ok(Platform { stack })
    }
}
