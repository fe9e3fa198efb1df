// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

use rstest::rstest;

use super::*;

#[rstest]
#[case("1.0.0", "1.0.0")]
#[case("1", "1.0.0")]
#[case("1.2", "1.2.0")]
#[case("1.0.0-alpha.1", "1.0.0-alpha.1")]
fn test_parse_and_format(#[case] input: &str, #[case] expected: &str) {
    let v = Version::from_str(input).unwrap();
    assert_eq!(v.to_string(), expected);
}

#[rstest]
#[case("1.0.0", "1.0.1")]
#[case("1.0.0", "1.1.0")]
#[case("1.0.0-alpha.1", "1.0.0")]
#[case("1.0.0-alpha.1", "1.0.0-alpha.2")]
#[case("1.0.0", "1.0.0+post.1")]
fn test_ordering(#[case] lesser: &str, #[case] greater: &str) {
    let a = Version::from_str(lesser).unwrap();
    let b = Version::from_str(greater).unwrap();
    assert!(a < b, "{a} should be less than {b}");
}

#[test]
fn test_trailing_zero_parts_are_equivalent_for_ordering() {
    let a = Version::from_str("1.2").unwrap();
    let b = Version::from_str("1.2.0").unwrap();
    assert_eq!(a.cmp(&b), Ordering::Equal);
}

#[test]
fn test_major_minor_patch_accessors() {
    let v = Version::new(1, 2, 3);
    assert_eq!(v.major(), 1);
    assert_eq!(v.minor(), 2);
    assert_eq!(v.patch(), 3);
}

#[test]
fn test_invalid_version_rejected() {
    assert!(Version::from_str("1.x.0").is_err());
}
