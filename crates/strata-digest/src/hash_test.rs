// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

use std::io::Write;

use rstest::rstest;

use super::*;

#[rstest]
fn test_partial_digest_empty() {
    assert!(
        PartialDigest::parse("").is_err(),
        "empty string is not a valid partial digest"
    );
}

#[rstest]
#[case("aa")]
#[case("bb00")]
#[case("ccaa1234")]
fn test_partial_digest_round_trip(#[case] src: &str) {
    let partial = PartialDigest::parse(src).expect("should be valid partial digest");
    let other: PartialDigest = partial.to_string().parse().expect("re-parse same partial");
    assert_eq!(partial, other, "should survive a round-trip encoding");
}

#[rstest]
fn test_partial_digest_rejects_non_hex() {
    assert!(PartialDigest::parse("not-hex!").is_err());
}

#[rstest]
fn test_digest_text_form_is_lowercase_hex() {
    let digest = Digest::from_reader("hello".as_bytes()).unwrap();
    let text = digest.to_string();
    assert_eq!(text.len(), DIGEST_SIZE * 2);
    assert!(text.bytes().all(|b| b.is_ascii_hexdigit() && !b.is_ascii_uppercase()));
    let parsed = Digest::parse(&text).unwrap();
    assert_eq!(digest, parsed);
}

#[rstest]
fn test_digest_parse_accepts_uppercase() {
    let digest = Digest::from_reader("hello".as_bytes()).unwrap();
    let upper = digest.to_string().to_ascii_uppercase();
    assert_eq!(Digest::parse(&upper).unwrap(), digest);
}

#[rstest]
fn test_empty_digest_constant() {
    let digest = Digest::from_reader(std::io::empty()).unwrap();
    assert_eq!(digest.into_bytes(), EMPTY_DIGEST);
}

#[rstest]
fn test_null_digest_is_not_empty_digest() {
    assert_ne!(NULL_DIGEST, EMPTY_DIGEST);
}

#[rstest]
fn test_hasher_writes_through_to_target() {
    let mut target = Vec::new();
    let mut hasher = Hasher::with_target(&mut target);
    hasher.write_all(b"hello").unwrap();
    let digest = hasher.digest();
    assert_eq!(target, b"hello");
    assert_eq!(digest, Digest::from_reader("hello".as_bytes()).unwrap());
}

#[rstest]
fn test_digest_length_error() {
    let err = Digest::from_bytes(&[0u8; 4]).unwrap_err();
    assert!(matches!(err, Error::DigestLengthError(4)));
}
