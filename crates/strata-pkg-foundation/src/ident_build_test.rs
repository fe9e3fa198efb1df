// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

use super::*;

#[test]
fn test_src_and_embedded_roundtrip() {
    assert_eq!(Build::from_str("src").unwrap(), Build::Src);
    assert_eq!(Build::from_str("embedded").unwrap(), Build::Embedded);
    assert_eq!(Build::Src.to_string(), "src");
}

#[test]
fn test_build_id_from_options_is_deterministic() {
    let opts = OptionMap::default();
    let a = BuildId::from_options(&opts);
    let b = BuildId::from_options(&opts);
    assert_eq!(a, b);
    assert_eq!(a.as_str().len(), 8);
}

#[test]
fn test_invalid_build_digest_rejected() {
    assert!(Build::from_str("not-a-digest!").is_err());
    assert!(Build::from_str("short").is_err());
}
