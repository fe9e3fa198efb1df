// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

use thiserror::Error;

#[derive(Debug, Error, miette::Diagnostic)]
pub enum Error {
    #[error("failed to read data to digest")]
    FailedRead(#[source] std::io::Error),
    #[error("failed to write digested data")]
    FailedWrite(#[source] std::io::Error),
    #[error("invalid digest header: expected {wanted:?}, got {got:?}")]
    InvalidHeader { wanted: Vec<u8>, got: Vec<u8> },
    #[error("digest must be exactly {expected} bytes, got {0}", expected = crate::DIGEST_SIZE)]
    DigestLengthError(usize),
    #[error("failed to decode digest: {0}")]
    DigestDecodeError(#[source] data_encoding::DecodeError),
    #[error("invalid partial digest '{given}': {reason}")]
    InvalidPartialDigest { reason: String, given: String },
    #[error("string contains a forbidden null byte")]
    StringHasNull,
    #[error("invalid utf-8 string encoding")]
    InvalidStringEncoding(#[source] std::str::Utf8Error),
}

pub type Result<T> = std::result::Result<T, Error>;
