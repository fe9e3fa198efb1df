// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeSet;

use super::*;

#[test]
fn test_parse_known_components() {
    assert_eq!(Component::parse("run").unwrap(), Component::Run);
    assert_eq!(Component::parse("build").unwrap(), Component::Build);
    assert_eq!(Component::parse("all").unwrap(), Component::All);
}

#[test]
fn test_parse_named_component() {
    assert_eq!(
        Component::parse("plugins").unwrap(),
        Component::Named("plugins".to_string())
    );
}

#[test]
fn test_format_component_set() {
    let none: BTreeSet<Component> = BTreeSet::new();
    assert_eq!(format_component_set(&none), "");

    let one = BTreeSet::from([Component::Run]);
    assert_eq!(format_component_set(&one), ":run");

    let two = BTreeSet::from([Component::Build, Component::Run]);
    assert_eq!(format_component_set(&two), ":{build,run}");
}

#[test]
fn test_resolve_all_expands_to_available() {
    let requested = BTreeSet::from([Component::All]);
    let available = BTreeSet::from([Component::Run, Component::Build]);
    let resolved = resolve_requested_components(&requested, &available);
    assert_eq!(resolved.len(), 2);
}
