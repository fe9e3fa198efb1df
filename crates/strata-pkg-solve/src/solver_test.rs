// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

use rstest::rstest;
use strata_digest::Digest;
use strata_pkg_foundation::ident_build::{Build, BuildId};
use strata_pkg_foundation::name::PkgNameBuf;
use strata_pkg_spec::Spec;
use strata_pkg_storage::MemRepository;

use super::*;

fn publish(repo: &MemRepository, yaml: &str, build: &str) {
    let mut spec = Spec::from_yaml(yaml).unwrap();
    spec.pkg.build = Some(Build::Digest(BuildId::new(build).unwrap()));
    let layer = Digest::from_reader(format!("{yaml}{build}").as_bytes()).unwrap();
    repo.publish_package(&spec, layer).unwrap();
}

fn request(name: &str, range: &str) -> PkgRequest {
    PkgRequest::new(
        PkgNameBuf::new(name).unwrap(),
        range.parse().unwrap(),
        strata_pkg_ident::request::RequestedBy::CommandLine,
    )
}

#[rstest]
fn test_solver_resolves_a_triangle_of_requirements() {
    let repo = MemRepository::new("main");
    publish(
        &repo,
        "pkg: a/1.0.0\ninstall:\n  requirements:\n    - pkg: b/^1\n",
        "aaaaaaaa",
    );
    publish(
        &repo,
        "pkg: b/1.0.0\ninstall:\n  requirements:\n    - pkg: c/>=2\n",
        "bbbbbbbb",
    );
    publish(&repo, "pkg: c/2.0.0\n", "cccccccc");
    publish(&repo, "pkg: c/2.1.0\n", "dddddddd");

    let mut solver = Solver::new(vec![&repo]);
    solver.add_request(request("a", "1.0.0"));
    let (solution, _tree) = solver.solve().unwrap();

    assert_eq!(solution.len(), 3);
    assert_eq!(
        solution.get(&PkgNameBuf::new("a").unwrap()).unwrap().spec.pkg.to_string(),
        "a/1.0.0/aaaaaaaa"
    );
    assert_eq!(
        solution.get(&PkgNameBuf::new("b").unwrap()).unwrap().spec.pkg.to_string(),
        "b/1.0.0/bbbbbbbb"
    );
    assert_eq!(
        solution.get(&PkgNameBuf::new("c").unwrap()).unwrap().spec.pkg.to_string(),
        "c/2.1.0/dddddddd"
    );
}

#[rstest]
fn test_solver_backtracks_when_the_newest_build_dead_ends() {
    let repo = MemRepository::new("main");
    publish(
        &repo,
        "pkg: a/1.0.0\ninstall:\n  requirements:\n    - pkg: b/>=1\n",
        "aaaaaaaa",
    );
    // The newest build of b wants a c that does not exist; the solver must
    // back out and settle for the older build of b instead.
    publish(
        &repo,
        "pkg: b/2.0.0\ninstall:\n  requirements:\n    - pkg: c/>=2\n",
        "bbbbbbbb",
    );
    publish(
        &repo,
        "pkg: b/1.0.0\ninstall:\n  requirements:\n    - pkg: c/<2\n",
        "cccccccc",
    );
    publish(&repo, "pkg: c/1.0.0\n", "dddddddd");

    let mut solver = Solver::new(vec![&repo]);
    solver.add_request(request("a", "*"));
    let (solution, _tree) = solver.solve().unwrap();

    assert_eq!(
        solution.get(&PkgNameBuf::new("b").unwrap()).unwrap().spec.pkg.to_string(),
        "b/1.0.0/cccccccc"
    );
    assert_eq!(
        solution.get(&PkgNameBuf::new("c").unwrap()).unwrap().spec.pkg.to_string(),
        "c/1.0.0/dddddddd"
    );
}

#[rstest]
fn test_solver_reports_conflicting_root_requests() {
    let repo = MemRepository::new("main");
    let mut solver = Solver::new(vec![&repo]);
    solver.add_request(request("a", ">=2.0.0"));
    solver.add_request(request("a", "<2.0.0"));

    let err = solver.solve().unwrap_err();
    assert!(err.to_string().contains("conflicting requests for 'a'"));
}

#[rstest]
fn test_solver_reports_unresolved_package_with_rejection_history() {
    let repo = MemRepository::new("main");
    publish(&repo, "pkg: a/1.0.0\n", "aaaaaaaa");

    let mut solver = Solver::new(vec![&repo]);
    solver.add_request(request("a", ">=2.0.0"));

    let err = solver.solve().unwrap_err();
    assert!(err.to_string().contains("Failed to resolve"));
}

#[rstest]
fn test_solver_resolves_embedded_packages_alongside_their_owner() {
    let repo = MemRepository::new("main");
    publish(
        &repo,
        "pkg: main-pkg/1.0.0\n\
install:\n\
  embedded:\n\
    - name: lib-pkg\n\
      version: 1.0.0\n\
      build: bbbbbbbb\n",
        "aaaaaaaa",
    );

    let mut solver = Solver::new(vec![&repo]);
    solver.add_request(request("main-pkg", "*"));
    let (solution, _tree) = solver.solve().unwrap();

    assert_eq!(solution.len(), 2);
    let lib = solution.get(&PkgNameBuf::new("lib-pkg").unwrap()).unwrap();
    assert_eq!(lib.spec.pkg.to_string(), "lib-pkg/1.0.0/bbbbbbbb");
    assert!(matches!(lib.source, PackageSource::Embedded { .. }));
}
