// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

use rstest::rstest;
use strata_pkg_foundation::name::PkgNameBuf;
use strata_pkg_ident::request::RequestedBy;
use strata_pkg_ident::PkgRequest;

use super::*;

fn solved(name: &str, version: &str) -> SolvedPackage {
    let ident = Ident::new(PkgNameBuf::new(name).unwrap(), version.parse().unwrap());
    SolvedPackage {
        request: PkgRequest::new(ident.name.clone(), "*".parse().unwrap(), RequestedBy::CommandLine),
        spec: Spec::new(ident),
        source: PackageSource::Repository {
            repo_name: "test".to_string(),
        },
    }
}

#[rstest]
fn test_insert_and_get_roundtrip() {
    let mut solution = Solution::new();
    let name = PkgNameBuf::new("a").unwrap();
    solution.insert(name.clone(), solved("a", "1.0.0"));

    assert!(solution.contains(&name));
    assert_eq!(solution.len(), 1);
    assert_eq!(solution.get(&name).unwrap().spec.pkg.version.to_string(), "1.0.0");
}

#[rstest]
fn test_remove_drops_entry() {
    let mut solution = Solution::new();
    let name = PkgNameBuf::new("a").unwrap();
    solution.insert(name.clone(), solved("a", "1.0.0"));
    solution.remove(&name);

    assert!(!solution.contains(&name));
    assert!(solution.is_empty());
}

#[rstest]
fn test_insertion_order_is_preserved() {
    let mut solution = Solution::new();
    solution.insert(PkgNameBuf::new("b").unwrap(), solved("b", "1.0.0"));
    solution.insert(PkgNameBuf::new("a").unwrap(), solved("a", "1.0.0"));

    let names: Vec<String> = solution.iter().map(|(name, _)| name.to_string()).collect();
    assert_eq!(names, vec!["b".to_string(), "a".to_string()]);
}

#[rstest]
fn test_idents_reflects_each_packages_resolved_spec() {
    let mut solution = Solution::new();
    solution.insert(PkgNameBuf::new("a").unwrap(), solved("a", "1.0.0"));
    solution.insert(PkgNameBuf::new("b").unwrap(), solved("b", "2.0.0"));

    let idents: Vec<String> = solution.idents().map(ToString::to_string).collect();
    assert_eq!(idents, vec!["a/1.0.0".to_string(), "b/2.0.0".to_string()]);
}
