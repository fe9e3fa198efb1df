// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

use std::fmt::Display;
use std::io::{Read, Write};

use data_encoding::HEXLOWER;
use ring::digest::{Context, SHA256, SHA256_OUTPUT_LEN};
use serde::{Deserialize, Serialize};

use crate::binary;
use crate::{Error, Result};

/// The number of bytes that make up a digest.
pub const DIGEST_SIZE: usize = SHA256_OUTPUT_LEN;

/// The bytes of hashing the empty string. Distinct from [`NULL_DIGEST`].
pub const EMPTY_DIGEST: [u8; DIGEST_SIZE] = [
    227, 176, 196, 66, 152, 252, 28, 20, 154, 251, 244, 200, 153, 111, 185, 36, 39, 174, 65, 228,
    100, 155, 147, 76, 164, 149, 153, 27, 120, 82, 184, 85,
];

/// An explicitly unique, all-zero digest used to mark absence of a value.
pub const NULL_DIGEST: [u8; DIGEST_SIZE] = [0; DIGEST_SIZE];

/// The Hasher calculates a [`Digest`] from the bytes written to it, optionally
/// tee-ing those bytes through to an underlying writer at the same time.
pub struct Hasher<T> {
    ctx: Context,
    target: T,
}

impl<T> Hasher<T> {
    /// The target of the hasher will receive a copy of all bytes written to it.
    pub fn with_target(writer: T) -> Self {
        Self {
            ctx: Context::new(&SHA256),
            target: writer,
        }
    }

    /// Finalize the hasher and return the digest of everything written.
    pub fn digest(self) -> Digest {
        let ring_digest = self.ctx.finish();
        let bytes: [u8; DIGEST_SIZE] = ring_digest
            .as_ref()
            .try_into()
            .expect("sha256 digest is exactly DIGEST_SIZE bytes");
        Digest(bytes)
    }
}

impl Default for Hasher<std::io::Sink> {
    fn default() -> Self {
        Self {
            ctx: Context::new(&SHA256),
            target: std::io::sink(),
        }
    }
}

impl<T> Write for Hasher<T>
where
    T: Write,
{
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.ctx.update(buf);
        self.target.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.target.flush()
    }
}

/// A type that can be binary-encoded to a byte stream.
pub trait Encodable
where
    Self: Sized,
{
    /// Compute the digest for this instance by encoding it and hashing the result.
    fn digest(&self) -> Result<Digest> {
        let mut hasher = Hasher::default();
        self.encode(&mut hasher)?;
        Ok(hasher.digest())
    }

    /// Write this object in canonical binary form.
    fn encode(&self, writer: &mut impl Write) -> Result<()>;

    /// Encode this object into its binary form in memory.
    fn encode_to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.encode(&mut buf)?;
        Ok(buf)
    }
}

/// A type that can be rebuilt from a previously encoded binary stream.
pub trait Decodable
where
    Self: Encodable,
{
    /// Read a previously encoded object from the given binary stream.
    fn decode(reader: &mut impl std::io::BufRead) -> Result<Self>;
}

impl Encodable for String {
    fn encode(&self, writer: &mut impl Write) -> Result<()> {
        binary::write_string(writer, self)
    }
}
impl Decodable for String {
    fn decode(reader: &mut impl std::io::BufRead) -> Result<Self> {
        binary::read_string(reader)
    }
}

/// Digest is the fixed-width result of hashing some binary data.
#[derive(PartialEq, Eq, Hash, Copy, Clone, Ord, PartialOrd)]
pub struct Digest([u8; DIGEST_SIZE]);

impl Default for Digest {
    fn default() -> Self {
        NULL_DIGEST.into()
    }
}

impl std::fmt::Debug for Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_string())
    }
}

impl std::str::FromStr for Digest {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Digest::parse(s)
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}

impl Digest {
    /// Yields a view of the underlying bytes for this digest.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_ref()
    }

    /// Extract the raw bytes of this digest.
    pub fn into_bytes(self) -> [u8; DIGEST_SIZE] {
        self.0
    }

    /// Create a digest from the provided bytes.
    ///
    /// The exact [`DIGEST_SIZE`] number of bytes must be given.
    pub fn from_bytes(digest_bytes: &[u8]) -> Result<Self> {
        match digest_bytes.try_into() {
            Err(_) => Err(Error::DigestLengthError(digest_bytes.len())),
            Ok(bytes) => Ok(Self(bytes)),
        }
    }

    /// Parse the given string as a lowercase-hex encoded digest.
    pub fn parse(digest_str: &str) -> Result<Digest> {
        parse_digest(digest_str)
    }

    /// Reads the given reader to completion, returning the digest of its contents.
    pub fn from_reader(mut reader: impl Read) -> Result<Self> {
        let mut ctx = Context::new(&SHA256);
        let mut buf = [0u8; 4096];
        loop {
            let count = reader.read(&mut buf).map_err(Error::FailedRead)?;
            if count == 0 {
                break;
            }
            ctx.update(&buf[..count]);
        }
        let ring_digest = ctx.finish();
        let bytes: [u8; DIGEST_SIZE] = ring_digest
            .as_ref()
            .try_into()
            .expect("sha256 digest is exactly DIGEST_SIZE bytes");
        Ok(Digest(bytes))
    }
}

impl Serialize for Digest {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Digest::parse(&s).map_err(serde::de::Error::custom)
    }
}

impl From<[u8; DIGEST_SIZE]> for Digest {
    fn from(bytes: [u8; DIGEST_SIZE]) -> Self {
        Digest(bytes)
    }
}

impl TryFrom<&str> for Digest {
    type Error = Error;

    fn try_from(digest_str: &str) -> Result<Digest> {
        parse_digest(digest_str)
    }
}

impl Display for Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&HEXLOWER.encode(self.as_bytes()))
    }
}

impl Encodable for Digest {
    fn encode(&self, writer: &mut impl Write) -> Result<()> {
        binary::write_digest(writer, self)
    }

    fn digest(&self) -> Result<Digest> {
        Ok(*self)
    }
}

impl Decodable for Digest {
    fn decode(reader: &mut impl std::io::BufRead) -> Result<Self> {
        binary::read_digest(reader)
    }
}

/// Parse a hex-encoded digest string.
pub fn parse_digest(digest_str: impl AsRef<str>) -> Result<Digest> {
    let digest_str = digest_str.as_ref();
    let lowered;
    let normalized = if digest_str.bytes().any(|b| b.is_ascii_uppercase()) {
        lowered = digest_str.to_ascii_lowercase();
        lowered.as_str()
    } else {
        digest_str
    };
    let bytes = HEXLOWER
        .decode(normalized.as_bytes())
        .map_err(Error::DigestDecodeError)?;
    Digest::from_bytes(&bytes)
}

/// The first N hex characters of a digest, which may be ambiguous as a reference.
#[derive(Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Clone)]
pub struct PartialDigest(String);

impl PartialDigest {
    /// Parse the given string as a partial (hex-prefix) digest.
    pub fn parse<S: AsRef<str>>(source: S) -> Result<Self> {
        let source = source.as_ref();
        if source.is_empty() {
            return Err(Error::InvalidPartialDigest {
                reason: "partial digest cannot be empty".to_string(),
                given: String::new(),
            });
        }
        if source.len() > DIGEST_SIZE * 2 || !source.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::InvalidPartialDigest {
                reason: "not a valid hex digest prefix".to_string(),
                given: source.to_string(),
            });
        }
        Ok(Self(source.to_ascii_lowercase()))
    }

    /// Return true if this partial digest is actually a full digest.
    pub fn is_full(&self) -> bool {
        self.0.len() == DIGEST_SIZE * 2
    }

    /// If this partial digest is actually a full digest, convert it.
    pub fn to_digest(&self) -> Option<Digest> {
        if self.is_full() {
            Digest::parse(&self.0).ok()
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for PartialDigest {
    type Err = Error;

    fn from_str(source: &str) -> Result<Self> {
        Self::parse(source)
    }
}

impl Display for PartialDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
#[path = "./hash_test.rs"]
mod hash_test;
