// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

use rstest::rstest;
use strata_pkg_foundation::ident_build::{Build, BuildId};
use strata_pkg_foundation::name::PkgNameBuf;
use strata_pkg_ident::request::RequestedBy;
use strata_pkg_ident::{Ident, InclusionPolicy, PkgRequest, Request};
use strata_pkg_spec::Spec;

use super::*;
use crate::package_iterator::Candidate;
use crate::solution::PackageSource;

fn pkg_request(name: &str, range: &str) -> PkgRequest {
    PkgRequest::new(
        PkgNameBuf::new(name).unwrap(),
        range.parse().unwrap(),
        RequestedBy::CommandLine,
    )
}

fn resolved(name: &str, version: &str, build: &str) -> ResolvedPackage {
    let ident = Ident::new(PkgNameBuf::new(name).unwrap(), version.parse().unwrap())
        .with_build(Build::Digest(BuildId::new(build).unwrap()));
    let spec = Spec::new(ident.clone());
    ResolvedPackage {
        name: ident.name.clone(),
        request: pkg_request(name, "*"),
        spec,
        source: PackageSource::Repository {
            repo_name: "test".to_string(),
        },
    }
}

#[rstest]
fn test_solution_folds_ancestry_root_to_leaf() {
    let mut tree = DecisionTree::new();
    let root = tree.root();
    let child = tree.add_child(root);
    tree.add_resolved(root, resolved("a", "1.0.0", "aaaaaaaa"));
    tree.add_resolved(child, resolved("b", "1.0.0", "bbbbbbbb"));

    let solution = tree.solution(child);
    assert!(solution.contains(&PkgNameBuf::new("a").unwrap()));
    assert!(solution.contains(&PkgNameBuf::new("b").unwrap()));
    assert_eq!(solution.len(), 2);
}

#[rstest]
fn test_solution_at_sibling_does_not_see_other_branch() {
    let mut tree = DecisionTree::new();
    let root = tree.root();
    let left = tree.add_child(root);
    let right = tree.add_child(root);
    tree.add_resolved(left, resolved("a", "1.0.0", "aaaaaaaa"));

    assert!(tree.solution(left).contains(&PkgNameBuf::new("a").unwrap()));
    assert!(!tree.solution(right).contains(&PkgNameBuf::new("a").unwrap()));
}

#[rstest]
fn test_add_request_marks_existing_resolution_unresolved_when_incompatible() {
    let mut tree = DecisionTree::new();
    let root = tree.root();
    tree.add_resolved(root, resolved("a", "1.0.0", "aaaaaaaa"));

    let child = tree.add_child(root);
    tree.add_request(child, Request::Pkg(pkg_request("a", ">=2.0.0")));

    assert!(!tree.solution(child).contains(&PkgNameBuf::new("a").unwrap()));
}

#[rstest]
fn test_add_request_leaves_compatible_resolution_alone() {
    let mut tree = DecisionTree::new();
    let root = tree.root();
    tree.add_resolved(root, resolved("a", "1.5.0", "aaaaaaaa"));

    let child = tree.add_child(root);
    tree.add_request(child, Request::Pkg(pkg_request("a", ">=1.0.0")));

    assert!(tree.solution(child).contains(&PkgNameBuf::new("a").unwrap()));
}

#[rstest]
fn test_merged_request_intersects_every_ancestor_request() {
    let mut tree = DecisionTree::new();
    let root = tree.root();
    tree.add_request(root, Request::Pkg(pkg_request("a", ">=1.0.0")));
    let child = tree.add_child(root);
    tree.add_request(child, Request::Pkg(pkg_request("a", "<2.0.0")));

    let name = PkgNameBuf::new("a").unwrap();
    let merged = tree.merged_request(child, &name).unwrap().unwrap();
    assert!(merged.is_version_applicable(&"1.5.0".parse().unwrap()));
    assert!(!merged.is_version_applicable(&"2.5.0".parse().unwrap()));
}

#[rstest]
fn test_merged_request_reports_conflicting_requests() {
    let mut tree = DecisionTree::new();
    let root = tree.root();
    tree.add_request(root, Request::Pkg(pkg_request("a", ">=2.0.0")));
    tree.add_request(root, Request::Pkg(pkg_request("a", "<2.0.0")));

    let name = PkgNameBuf::new("a").unwrap();
    let err = tree.merged_request(root, &name).unwrap_err();
    assert!(matches!(err, SolverError::ConflictingRequests { .. }));
}

#[rstest]
fn test_next_request_returns_first_unsatisfied_always_request() {
    let mut tree = DecisionTree::new();
    let root = tree.root();
    tree.add_request(root, Request::Pkg(pkg_request("a", "*")));
    tree.add_request(root, Request::Pkg(pkg_request("b", "*")));

    let next = tree.next_request(root).unwrap().unwrap();
    assert_eq!(next.name, PkgNameBuf::new("a").unwrap());
}

#[rstest]
fn test_next_request_skips_already_resolved_names() {
    let mut tree = DecisionTree::new();
    let root = tree.root();
    tree.add_request(root, Request::Pkg(pkg_request("a", "*")));
    tree.add_resolved(root, resolved("a", "1.0.0", "aaaaaaaa"));
    tree.add_request(root, Request::Pkg(pkg_request("b", "*")));

    let next = tree.next_request(root).unwrap().unwrap();
    assert_eq!(next.name, PkgNameBuf::new("b").unwrap());
}

#[rstest]
fn test_next_request_ignores_if_already_present_only_requests() {
    let mut tree = DecisionTree::new();
    let root = tree.root();
    tree.add_request(
        root,
        Request::Pkg(pkg_request("a", "*").with_inclusion(InclusionPolicy::IfAlreadyPresent)),
    );

    assert!(tree.next_request(root).unwrap().is_none());
}

#[rstest]
fn test_iterator_is_inherited_from_nearest_ancestor() {
    let mut tree = DecisionTree::new();
    let root = tree.root();
    let name = PkgNameBuf::new("a").unwrap();
    let iterator = PackageIterator::from_candidates(Vec::new());
    tree.set_iterator(root, name.clone(), iterator);

    let child = tree.add_child(root);
    let grandchild = tree.add_child(child);

    assert!(tree.iterator(grandchild, &name).is_some());
}

#[rstest]
fn test_set_iterator_on_child_shadows_ancestor() {
    let mut tree = DecisionTree::new();
    let root = tree.root();
    let name = PkgNameBuf::new("a").unwrap();

    let candidates = vec![
        Candidate {
            ident: Ident::new(name.clone(), "2.0.0".parse().unwrap()),
            spec: Spec::new(Ident::new(name.clone(), "2.0.0".parse().unwrap())),
            repo_name: "test".to_string(),
        },
        Candidate {
            ident: Ident::new(name.clone(), "1.0.0".parse().unwrap()),
            spec: Spec::new(Ident::new(name.clone(), "1.0.0".parse().unwrap())),
            repo_name: "test".to_string(),
        },
    ];
    tree.set_iterator(root, name.clone(), PackageIterator::from_candidates(candidates));

    let child = tree.add_child(root);
    let mut child_iterator = tree.iterator(child, &name).unwrap();
    child_iterator.advance();
    tree.set_iterator(child, name.clone(), child_iterator);

    // The child's own pinned position must not mutate the root's.
    assert_eq!(
        tree.iterator(root, &name).unwrap().peek().unwrap().ident.version.to_string(),
        "2.0.0"
    );
    assert_eq!(
        tree.iterator(child, &name).unwrap().peek().unwrap().ident.version.to_string(),
        "1.0.0"
    );
}

#[rstest]
fn test_get_error_chain_follows_most_recent_branch() {
    let mut tree = DecisionTree::new();
    let root = tree.root();
    tree.set_error(
        root,
        SolverError::ConflictingRequests {
            name: PkgNameBuf::new("a").unwrap(),
            message: "root error".to_string(),
            requests: vec![],
        },
    );
    let first_child = tree.add_child(root);
    let second_child = tree.add_child(root);
    tree.set_error(
        second_child,
        SolverError::ConflictingRequests {
            name: PkgNameBuf::new("a").unwrap(),
            message: "leaf error".to_string(),
            requests: vec![],
        },
    );
    let _ = first_child;

    let chain = tree.get_error_chain();
    assert_eq!(chain.len(), 2);
    assert_eq!(chain[1].to_string(), "conflicting requests for 'a': leaf error");
}
