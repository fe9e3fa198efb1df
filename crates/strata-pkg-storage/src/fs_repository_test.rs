// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

use rstest::rstest;
use strata_digest::Digest;
use strata_pkg_foundation::ident_build::{Build, BuildId};
use strata_pkg_foundation::name::PkgNameBuf;
use strata_pkg_ident::Ident;
use strata_pkg_spec::Spec;
use tempfile::TempDir;

use super::*;

fn layer(content: &str) -> Digest {
    Digest::from_reader(content.as_bytes()).unwrap()
}

#[rstest]
fn test_create_makes_recipes_and_packages_dirs() {
    let dir = TempDir::new().unwrap();
    let repo = FsRepository::create("main", dir.path()).unwrap();
    assert!(repo.root().join(RECIPES_DIR).is_dir());
    assert!(repo.root().join(PACKAGES_DIR).is_dir());
}

#[rstest]
fn test_publish_and_read_recipe_roundtrip() {
    let dir = TempDir::new().unwrap();
    let repo = FsRepository::create("main", dir.path()).unwrap();
    let ident = Ident::new(PkgNameBuf::new("a").unwrap(), "1.0.0".parse().unwrap());
    repo.publish_recipe(&Spec::new(ident)).unwrap();

    let name = PkgNameBuf::new("a").unwrap();
    let version = "1.0.0".parse().unwrap();
    let read = repo.read_recipe(&name, &version).unwrap();
    assert_eq!(read.pkg.to_string(), "a/1.0.0");
}

#[rstest]
fn test_publish_recipe_rejects_duplicate_version() {
    let dir = TempDir::new().unwrap();
    let repo = FsRepository::create("main", dir.path()).unwrap();
    let ident = Ident::new(PkgNameBuf::new("a").unwrap(), "1.0.0".parse().unwrap());
    repo.publish_recipe(&Spec::new(ident.clone())).unwrap();

    assert!(matches!(
        repo.publish_recipe(&Spec::new(ident)).unwrap_err(),
        Error::VersionExists { .. }
    ));
}

#[rstest]
fn test_publish_and_read_package_with_layer_roundtrip() {
    let dir = TempDir::new().unwrap();
    let repo = FsRepository::create("main", dir.path()).unwrap();
    let ident = Ident::new(PkgNameBuf::new("a").unwrap(), "1.0.0".parse().unwrap())
        .with_build(Build::Digest(BuildId::new("aaaaaaaa").unwrap()));
    repo.publish_package(&Spec::new(ident.clone()), layer("a-1.0.0")).unwrap();

    let read = repo.read_package(&ident).unwrap();
    assert_eq!(read.pkg, ident);
    assert_eq!(repo.read_package_layer(&ident).unwrap(), layer("a-1.0.0"));
}

#[rstest]
fn test_list_package_versions_and_builds() {
    let dir = TempDir::new().unwrap();
    let repo = FsRepository::create("main", dir.path()).unwrap();
    let name = PkgNameBuf::new("a").unwrap();
    for (version, build) in [("1.0.0", "aaaaaaaa"), ("2.0.0", "bbbbbbbb")] {
        let ident = Ident::new(name.clone(), version.parse().unwrap())
            .with_build(Build::Digest(BuildId::new(build).unwrap()));
        repo.publish_package(&Spec::new(ident), layer(build)).unwrap();
    }

    let versions: Vec<String> = repo
        .list_package_versions(&name)
        .unwrap()
        .into_iter()
        .map(|v| v.to_string())
        .collect();
    assert_eq!(versions, vec!["2.0.0", "1.0.0"]);

    let builds = repo
        .list_package_builds(&name, &"1.0.0".parse().unwrap())
        .unwrap();
    assert_eq!(builds.len(), 1);
}

#[rstest]
fn test_remove_package_deletes_spec_and_layer_files() {
    let dir = TempDir::new().unwrap();
    let repo = FsRepository::create("main", dir.path()).unwrap();
    let ident = Ident::new(PkgNameBuf::new("a").unwrap(), "1.0.0".parse().unwrap())
        .with_build(Build::Digest(BuildId::new("aaaaaaaa").unwrap()));
    repo.publish_package(&Spec::new(ident.clone()), layer("a")).unwrap();

    repo.remove_package(&ident).unwrap();
    assert!(repo.read_package(&ident).is_err());
    assert!(repo.read_package_layer(&ident).is_err());
}

#[rstest]
fn test_recipes_and_packages_persist_across_repository_instances() {
    let dir = TempDir::new().unwrap();
    {
        let repo = FsRepository::create("main", dir.path()).unwrap();
        let ident = Ident::new(PkgNameBuf::new("a").unwrap(), "1.0.0".parse().unwrap());
        repo.publish_recipe(&Spec::new(ident)).unwrap();
    }

    let reopened = FsRepository::create("main", dir.path()).unwrap();
    let name = PkgNameBuf::new("a").unwrap();
    assert_eq!(reopened.list_package_versions(&name).unwrap().len(), 1);
}
