// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

use std::io::{BufRead, Read, Write};
use std::iter::FromIterator;

use crate::hash::{Digest, DIGEST_SIZE, NULL_DIGEST};
use crate::{Error, Result};

const INT_SIZE: usize = std::mem::size_of::<u64>();

/// Read and validate the given header from a binary stream.
pub fn consume_header(mut reader: impl Read, header: &[u8]) -> Result<()> {
    let mut buf = vec![0; header.len() + 1];
    reader
        .read_exact(buf.as_mut_slice())
        .map_err(Error::FailedRead)?;
    if buf[0..header.len()] != *header || buf.last() != Some(&b'\n') {
        Err(Error::InvalidHeader {
            wanted: header.to_vec(),
            got: buf,
        })
    } else {
        Ok(())
    }
}

/// Write an identifiable header to the given binary stream.
pub fn write_header(mut writer: impl Write, header: &[u8]) -> Result<()> {
    writer.write_all(header).map_err(Error::FailedWrite)?;
    writer.write_all(b"\n").map_err(Error::FailedWrite)?;
    Ok(())
}

/// Write an unsigned integer to the given binary stream, big-endian.
pub fn write_uint(mut writer: impl Write, value: u64) -> Result<()> {
    writer
        .write_all(&value.to_be_bytes())
        .map_err(Error::FailedWrite)?;
    Ok(())
}

/// Read an unsigned integer from the given binary stream, big-endian.
pub fn read_uint(mut reader: impl Read) -> Result<u64> {
    let mut buf: [u8; INT_SIZE] = [0; INT_SIZE];
    reader.read_exact(&mut buf).map_err(Error::FailedRead)?;
    Ok(u64::from_be_bytes(buf))
}

/// Write a single byte (used for one-byte kind tags).
pub fn write_u8(mut writer: impl Write, value: u8) -> Result<()> {
    writer.write_all(&[value]).map_err(Error::FailedWrite)?;
    Ok(())
}

/// Read a single byte (used for one-byte kind tags).
pub fn read_u8(mut reader: impl Read) -> Result<u8> {
    let mut buf = [0u8; 1];
    reader.read_exact(&mut buf).map_err(Error::FailedRead)?;
    Ok(buf[0])
}

/// Write a 32 bit unsigned integer, big-endian (used for file modes).
pub fn write_uint32(mut writer: impl Write, value: u32) -> Result<()> {
    writer
        .write_all(&value.to_be_bytes())
        .map_err(Error::FailedWrite)?;
    Ok(())
}

/// Read a 32 bit unsigned integer, big-endian (used for file modes).
pub fn read_uint32(mut reader: impl Read) -> Result<u32> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf).map_err(Error::FailedRead)?;
    Ok(u32::from_be_bytes(buf))
}

/// Write a 16 bit unsigned integer, big-endian (used for name lengths).
pub fn write_uint16(mut writer: impl Write, value: u16) -> Result<()> {
    writer
        .write_all(&value.to_be_bytes())
        .map_err(Error::FailedWrite)?;
    Ok(())
}

/// Read a 16 bit unsigned integer, big-endian (used for name lengths).
pub fn read_uint16(mut reader: impl Read) -> Result<u16> {
    let mut buf = [0u8; 2];
    reader.read_exact(&mut buf).map_err(Error::FailedRead)?;
    Ok(u16::from_be_bytes(buf))
}

/// Write a digest to the given binary stream.
pub fn write_digest(mut writer: impl Write, digest: &Digest) -> Result<()> {
    writer
        .write_all(digest.as_ref())
        .map_err(Error::FailedWrite)?;
    Ok(())
}

/// Read a digest from the given binary stream.
pub fn read_digest(mut reader: impl Read) -> Result<Digest> {
    let mut buf: [u8; DIGEST_SIZE] = NULL_DIGEST;
    reader.read_exact(buf.as_mut()).map_err(Error::FailedRead)?;
    Digest::from_bytes(&buf)
}

/// Write a length-prefixed, null-terminated string to the given binary stream.
///
/// Strings may not contain an embedded null byte: the terminator is what
/// lets [`read_string`] find the end without a separate length field.
pub fn write_string(mut writer: impl Write, string: &str) -> Result<()> {
    if string.contains('\x00') {
        return Err(Error::StringHasNull);
    }
    writer
        .write_all(string.as_bytes())
        .map_err(Error::FailedWrite)?;
    writer.write_all(b"\x00").map_err(Error::FailedWrite)?;
    Ok(())
}

/// Read a null-terminated string from the given binary stream.
pub fn read_string(reader: &mut impl BufRead) -> Result<String> {
    let mut parts = Vec::with_capacity(2);
    loop {
        let buf = reader.fill_buf().map_err(Error::FailedRead)?;
        match buf.iter().position(|&c| c == 0) {
            Some(index) => {
                parts.push(
                    std::str::from_utf8(&buf[..index])
                        .map_err(Error::InvalidStringEncoding)?
                        .to_string(),
                );
                reader.consume(index + 1);
                break;
            }
            None => {
                if buf.is_empty() {
                    return Err(Error::FailedRead(std::io::Error::from(
                        std::io::ErrorKind::UnexpectedEof,
                    )));
                }
                parts.push(
                    std::str::from_utf8(buf)
                        .map_err(Error::InvalidStringEncoding)?
                        .to_string(),
                );
                let consumed = buf.len();
                reader.consume(consumed);
            }
        }
    }
    Ok(String::from_iter(parts))
}

#[cfg(test)]
#[path = "./binary_test.rs"]
mod binary_test;
