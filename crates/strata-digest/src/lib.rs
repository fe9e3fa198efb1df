// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

//! The digest type and canonical binary encoding primitives shared by every
//! `strata-fs` object kind.

mod binary;
mod error;
mod hash;

pub use binary::{
    consume_header, read_digest, read_string, read_u8, read_uint, read_uint16, read_uint32,
    write_digest, write_header, write_string, write_u8, write_uint, write_uint16, write_uint32,
};
pub use error::{Error, Result};
pub use hash::{
    parse_digest, Decodable, Digest, Encodable, Hasher, PartialDigest, DIGEST_SIZE, EMPTY_DIGEST,
    NULL_DIGEST,
};
