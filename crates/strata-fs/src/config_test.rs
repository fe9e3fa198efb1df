// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

use rstest::rstest;

use super::*;

#[rstest]
fn test_load_string_defaults() {
    let config = Config::load_string("").unwrap();
    assert_eq!(config.solver.max_build_variants, 25);
    assert!(!config.solver.allow_prerelease);
}

#[rstest]
fn test_load_string_overrides_storage_root() {
    let config = Config::load_string("[storage]\nroot = \"/custom/root\"\n").unwrap();
    assert_eq!(config.storage.root, std::path::PathBuf::from("/custom/root"));
}

#[rstest]
fn test_load_string_parses_remotes() {
    let config =
        Config::load_string("[remote.origin]\npath = \"/mnt/shared/strata\"\n").unwrap();
    let origin = config.remote.get("origin").expect("remote present");
    assert_eq!(origin.path, std::path::PathBuf::from("/mnt/shared/strata"));
}
