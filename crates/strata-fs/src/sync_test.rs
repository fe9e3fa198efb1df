// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

use rstest::rstest;
use tempfile::TempDir;

use super::*;
use crate::graph::{self, Database as _};
use crate::storage::{FsRepository, Repository as _};

fn write_file(dir: &std::path::Path, rel: &str, content: &str) {
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

#[rstest]
fn test_sync_ref_copies_closure_and_advances_tag() {
    let src_dir = TempDir::new().unwrap();
    let src = FsRepository::create(src_dir.path()).unwrap();
    let dst_dir = TempDir::new().unwrap();
    let dst = FsRepository::create(dst_dir.path()).unwrap();

    let content_dir = TempDir::new().unwrap();
    write_file(content_dir.path(), "a.txt", "hello");
    write_file(content_dir.path(), "sub/b.txt", "world");
    let manifest = src.commit_dir(content_dir.path()).unwrap();
    let layer = crate::commit::create_layer(&src, &manifest).unwrap();
    let layer_digest = src.write_object(&graph::Object::Layer(layer)).unwrap();
    src.push_tag("", "thing", layer_digest).unwrap();

    let synced_digest = sync_ref("thing", &src, &dst).unwrap();
    assert_eq!(synced_digest, layer_digest);
    assert!(dst.has_object(&layer_digest));

    let tag = dst.resolve_tag(&crate::tracking::TagSpec::parse("thing").unwrap()).unwrap();
    assert_eq!(tag.target, layer_digest);

    let dst_manifest = dst.read_manifest(&dst.read_layer(&layer_digest).unwrap().manifest).unwrap();
    let rendered = dst.render(&dst_manifest).unwrap();
    assert_eq!(std::fs::read_to_string(rendered.join("a.txt")).unwrap(), "hello");
}

#[rstest]
fn test_sync_closure_is_idempotent() {
    let src_dir = TempDir::new().unwrap();
    let src = FsRepository::create(src_dir.path()).unwrap();
    let dst_dir = TempDir::new().unwrap();
    let dst = FsRepository::create(dst_dir.path()).unwrap();

    let content_dir = TempDir::new().unwrap();
    write_file(content_dir.path(), "a.txt", "hello");
    let manifest = src.commit_dir(content_dir.path()).unwrap();
    let manifest_digest = src.write_object(&graph::Object::Manifest(manifest)).unwrap();

    sync_closure(&manifest_digest, &src, &dst).unwrap();
    sync_closure(&manifest_digest, &src, &dst).unwrap();
    assert!(dst.has_object(&manifest_digest));
}
