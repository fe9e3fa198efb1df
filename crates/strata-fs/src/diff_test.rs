// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

use rstest::rstest;
use tempfile::TempDir;

use super::*;
use crate::graph;
use crate::storage::{FsRepository, Repository as _};
use crate::tracking::DiffMode;

fn write_file(dir: &std::path::Path, rel: &str, content: &str) {
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

#[rstest]
fn test_unmodified_path_matches_on_disk() {
    let repo_dir = TempDir::new().unwrap();
    let repo = FsRepository::create(repo_dir.path()).unwrap();

    let src = TempDir::new().unwrap();
    write_file(src.path(), "a", "same");
    let manifest = repo.commit_dir(src.path()).unwrap();
    let digest = repo.write_object(&graph::Object::Manifest(manifest.clone())).unwrap();

    let diffs = diff_manifest_against_path(&repo, &digest, src.path()).unwrap();
    let entry = diffs.iter().find(|d| d.path == "a").unwrap();
    assert!(entry.mode.is_unchanged(), "expected unchanged, got {:?}", entry.mode);
}

#[rstest]
fn test_changed_content_is_detected() {
    let repo_dir = TempDir::new().unwrap();
    let repo = FsRepository::create(repo_dir.path()).unwrap();

    let src = TempDir::new().unwrap();
    write_file(src.path(), "a", "before");
    let manifest = repo.commit_dir(src.path()).unwrap();
    let digest = repo.write_object(&graph::Object::Manifest(manifest.clone())).unwrap();

    write_file(src.path(), "a", "after");
    let diffs = diff_manifest_against_path(&repo, &digest, src.path()).unwrap();
    let entry = diffs.iter().find(|d| d.path == "a").unwrap();
    assert!(matches!(entry.mode, DiffMode::Changed(..)));
}

#[rstest]
fn test_added_and_removed_paths_are_detected() {
    let repo_dir = TempDir::new().unwrap();
    let repo = FsRepository::create(repo_dir.path()).unwrap();

    let src = TempDir::new().unwrap();
    write_file(src.path(), "stays", "x");
    write_file(src.path(), "gone", "y");
    let manifest = repo.commit_dir(src.path()).unwrap();
    let digest = repo.write_object(&graph::Object::Manifest(manifest.clone())).unwrap();

    std::fs::remove_file(src.path().join("gone")).unwrap();
    write_file(src.path(), "new", "z");

    let diffs = diff_manifest_against_path(&repo, &digest, src.path()).unwrap();
    let gone = diffs.iter().find(|d| d.path == "gone").unwrap();
    assert!(matches!(gone.mode, DiffMode::Removed(..)));
    let new = diffs.iter().find(|d| d.path == "new").unwrap();
    assert!(matches!(new.mode, DiffMode::Added(..)));
}
