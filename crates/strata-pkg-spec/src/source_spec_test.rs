// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

use super::*;

#[test]
fn test_parse_local_source() {
    let src: SourceSpec = serde_yaml::from_str("path: ./src\n").unwrap();
    assert!(matches!(src, SourceSpec::Local(_)));
}

#[test]
fn test_parse_git_source() {
    let src: SourceSpec = serde_yaml::from_str("git: https://example.com/repo.git\n").unwrap();
    assert!(matches!(src, SourceSpec::Git(_)));
}

#[test]
fn test_parse_tar_source() {
    let src: SourceSpec = serde_yaml::from_str("tar: https://example.com/archive.tar.gz\n").unwrap();
    assert!(matches!(src, SourceSpec::Tar(_)));
}
