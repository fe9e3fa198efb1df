// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

use rstest::rstest;

use super::*;
use crate::hash::Digest;

#[rstest]
fn test_uint_round_trip() {
    let mut buf = Vec::new();
    write_uint(&mut buf, 1234567).unwrap();
    let mut reader = std::io::BufReader::new(buf.as_slice());
    assert_eq!(read_uint(&mut reader).unwrap(), 1234567);
}

#[rstest]
fn test_string_round_trip() {
    let mut buf = Vec::new();
    write_string(&mut buf, "hello world").unwrap();
    let mut reader = std::io::BufReader::new(buf.as_slice());
    assert_eq!(read_string(&mut reader).unwrap(), "hello world");
}

#[rstest]
fn test_string_rejects_embedded_null() {
    assert!(write_string(&mut Vec::new(), "a\0b").is_err());
}

#[rstest]
fn test_uint16_round_trip() {
    let mut buf = Vec::new();
    write_uint16(&mut buf, 65535).unwrap();
    let mut reader = std::io::BufReader::new(buf.as_slice());
    assert_eq!(read_uint16(&mut reader).unwrap(), 65535);
}

#[rstest]
fn test_digest_round_trip() {
    let digest = Digest::from_reader("some content".as_bytes()).unwrap();
    let mut buf = Vec::new();
    write_digest(&mut buf, &digest).unwrap();
    let mut reader = std::io::BufReader::new(buf.as_slice());
    assert_eq!(read_digest(&mut reader).unwrap(), digest);
}

#[rstest]
fn test_header_round_trip() {
    let mut buf = Vec::new();
    write_header(&mut buf, b"--STRATA--").unwrap();
    let mut reader = std::io::BufReader::new(buf.as_slice());
    consume_header(&mut reader, b"--STRATA--").unwrap();
}

#[rstest]
fn test_header_rejects_mismatch() {
    let mut buf = Vec::new();
    write_header(&mut buf, b"--STRATA--").unwrap();
    let mut reader = std::io::BufReader::new(buf.as_slice());
    assert!(consume_header(&mut reader, b"--OTHER--").is_err());
}
