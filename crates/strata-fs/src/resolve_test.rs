// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

use rstest::rstest;
use tempfile::TempDir;

use super::*;
use crate::graph::Database as _;
use crate::storage::{FsRepository, Repository as _};

fn write_file(dir: &std::path::Path, rel: &str, content: &str) {
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

fn repo() -> (TempDir, FsRepository) {
    let dir = TempDir::new().unwrap();
    let repo = FsRepository::create(dir.path().join("repo")).unwrap();
    (dir, repo)
}

fn commit_layer(repo: &FsRepository, src: &std::path::Path) -> graph::Layer {
    let manifest = repo.commit_dir(src).unwrap();
    crate::commit::create_layer(repo, &manifest).unwrap()
}

#[rstest]
fn test_stack_override_last_layer_wins() {
    let (_dir, repo) = repo();

    let l1_src = TempDir::new().unwrap();
    write_file(l1_src.path(), "a", "x");
    let layer1 = commit_layer(&repo, l1_src.path());

    let l2_src = TempDir::new().unwrap();
    write_file(l2_src.path(), "a", "y");
    let layer2 = commit_layer(&repo, l2_src.path());

    let merged = fold_stack(&repo, &[layer1, layer2]).unwrap();
    let entry = merged.get_path("a").unwrap();
    assert_eq!(
        entry.object,
        strata_digest::Digest::from_reader("y".as_bytes()).unwrap()
    );
}

#[rstest]
fn test_mask_entry_deletes_from_lower_layer() {
    let (_dir, repo) = repo();

    let l1_src = TempDir::new().unwrap();
    write_file(l1_src.path(), "a", "x");
    let layer1 = commit_layer(&repo, l1_src.path());

    let l2_src = TempDir::new().unwrap();
    write_file(l2_src.path(), "untouched", "z");
    let mut upper_tracking = repo.commit_dir(l2_src.path()).unwrap();
    // Inject a mask entry directly at the tracking layer since the
    // committer has no filesystem representation for masks.
    let upper_root_tree = upper_tracking.root_tree(&repo).unwrap();
    let mut entries: Vec<_> = upper_root_tree.iter().cloned().collect();
    entries.push(graph::Entry {
        name: "a".to_string(),
        kind: graph::EntryKind::Mask,
        mode: 0,
        size: 0,
        object: strata_digest::Digest::default(),
    });
    let masked_tree = graph::Tree::from_entries(entries).unwrap();
    let masked_tree_digest = repo.write_object(&graph::Object::Tree(masked_tree)).unwrap();
    upper_tracking = graph::Manifest::new(masked_tree_digest, upper_tracking.trees.clone());
    repo.write_object(&graph::Object::Manifest(upper_tracking.clone())).unwrap();
    let layer2 = crate::commit::create_layer(&repo, &upper_tracking).unwrap();

    let merged = fold_stack(&repo, &[layer1, layer2]).unwrap();
    assert!(merged.get_path("a").is_none());
    assert!(merged.get_path("untouched").is_some());
}

#[rstest]
fn test_merge_lower_with_empty_upper_is_unchanged() {
    let (_dir, repo) = repo();
    let src = TempDir::new().unwrap();
    write_file(src.path(), "a", "x");
    let manifest = repo.commit_dir(src.path()).unwrap();

    let empty_src = TempDir::new().unwrap();
    let empty_manifest = repo.commit_dir(empty_src.path()).unwrap();

    let merged = merge_manifests(&repo, &manifest, &empty_manifest).unwrap();
    assert_eq!(merged.get_path("a").unwrap().size, 1);
}

#[rstest]
fn test_resolve_stack_to_layers_expands_platform() {
    let (_dir, repo) = repo();
    let src = TempDir::new().unwrap();
    write_file(src.path(), "a", "x");
    let layer = commit_layer(&repo, src.path());
    let layer_digest = graph::Object::from(layer).digest().unwrap();

    let platform = graph::Platform::new(vec![layer_digest]);
    let platform_digest = repo.write_object(&graph::Object::Platform(platform)).unwrap();
    repo.push_tag("", "env", platform_digest).unwrap();

    let resolved = resolve_stack_to_layers(&repo, &["env".to_string()]).unwrap();
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].0, layer_digest);
}
