// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

use rstest::rstest;

use super::*;

#[rstest]
#[case("python")]
#[case("my-pkg")]
#[case("a")]
#[case("lib2to3")]
fn test_valid_pkg_names(#[case] name: &str) {
    PkgNameBuf::new(name).unwrap();
}

#[rstest]
#[case("-leading-hyphen")]
#[case("Has_Upper")]
#[case("has_underscore")]
#[case("")]
fn test_invalid_pkg_names(#[case] name: &str) {
    assert!(PkgNameBuf::new(name).is_err());
}

#[rstest]
#[case("debug")]
#[case("python.abi")]
#[case("my_option")]
fn test_valid_opt_names(#[case] name: &str) {
    OptNameBuf::new(name).unwrap();
}

#[test]
fn test_opt_name_rejects_upper() {
    assert!(OptNameBuf::new("Debug").is_err());
}

#[test]
fn test_pkg_name_as_opt_name_roundtrip() {
    let pkg = PkgNameBuf::new("python").unwrap();
    assert_eq!(pkg.as_opt_name().as_str(), "python");
}
