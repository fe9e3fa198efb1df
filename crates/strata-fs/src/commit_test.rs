// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

use std::path::Path;

use rstest::rstest;
use tempfile::TempDir;

use super::*;
use crate::graph::Object;
use crate::storage::FsDatabase;

fn repo_pieces() -> (TempDir, FsDatabase, PayloadStore) {
    let dir = TempDir::new().unwrap();
    let db = FsDatabase::open(dir.path().join("objects")).unwrap();
    let payloads = PayloadStore::open(dir.path().join("payloads")).unwrap();
    (dir, db, payloads)
}

fn write_file(dir: &Path, rel: &str, content: &str, mode: u32) {
    use std::os::unix::fs::PermissionsExt;
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(mode)).unwrap();
}

#[rstest]
fn test_commit_is_deterministic_across_runs() {
    let (_dbdir, db, payloads) = repo_pieces();
    let src = TempDir::new().unwrap();
    write_file(src.path(), "a.txt", "hello", 0o644);
    write_file(src.path(), "sub/b.txt", "world", 0o644);

    let first = commit_path(&db, &payloads, src.path()).unwrap();
    let second = commit_path(&db, &payloads, src.path()).unwrap();
    assert_eq!(
        Object::from(first).digest().unwrap(),
        Object::from(second).digest().unwrap()
    );
}

#[rstest]
fn test_commit_identical_content_in_different_dirs_matches() {
    let (_dbdir, db, payloads) = repo_pieces();
    let a = TempDir::new().unwrap();
    let b = TempDir::new().unwrap();
    write_file(a.path(), "x.txt", "same bytes", 0o644);
    write_file(b.path(), "x.txt", "same bytes", 0o644);

    let ma = commit_path(&db, &payloads, a.path()).unwrap();
    let mb = commit_path(&db, &payloads, b.path()).unwrap();
    assert_eq!(
        Object::from(ma).digest().unwrap(),
        Object::from(mb).digest().unwrap()
    );
}

#[rstest]
fn test_commit_rejects_unsupported_file_kind() {
    let (_dbdir, db, payloads) = repo_pieces();
    let src = TempDir::new().unwrap();
    let fifo_path = src.path().join("afifo");
    let c_path = std::ffi::CString::new(fifo_path.to_str().unwrap()).unwrap();
    let rc = unsafe { libc::mkfifo(c_path.as_ptr(), 0o644) };
    assert_eq!(rc, 0, "failed to create test fifo");

    let err = commit_path(&db, &payloads, src.path()).unwrap_err();
    assert!(matches!(err, Error::UnsupportedFile(_)));
}

#[rstest]
fn test_commit_then_render_round_trips_symlink_and_mode() {
    let (_dbdir, db, payloads) = repo_pieces();
    let src = TempDir::new().unwrap();
    write_file(src.path(), "dir/file", "hi", 0o444);
    std::os::unix::fs::symlink("dir/file", src.path().join("dir/link")).unwrap();

    let manifest = commit_path(&db, &payloads, src.path()).unwrap();

    let out = TempDir::new().unwrap();
    crate::storage::render_manifest_into_dir(
        &db,
        &payloads,
        &manifest,
        out.path(),
        crate::storage::RenderType::Copy,
    )
    .unwrap();

    let rendered_file_mode = std::fs::metadata(out.path().join("dir/file")).unwrap().permissions();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        assert_eq!(rendered_file_mode.mode() & 0o777, 0o444);
    }

    let link_target = std::fs::read_link(out.path().join("dir/link")).unwrap();
    assert_eq!(link_target, std::path::PathBuf::from("dir/file"));

    let rerendered = commit_path(&db, &payloads, out.path()).unwrap();
    assert_eq!(
        Object::from(manifest).digest().unwrap(),
        Object::from(rerendered).digest().unwrap()
    );
}

#[rstest]
fn test_create_layer_fails_on_empty_manifest() {
    let (_dbdir, db, payloads) = repo_pieces();
    let empty = TempDir::new().unwrap();
    let manifest = commit_path(&db, &payloads, empty.path()).unwrap();
    let err = create_layer(&db, &manifest).unwrap_err();
    assert!(matches!(err, Error::NothingToCommit));
}

#[rstest]
fn test_create_layer_succeeds_on_nonempty_manifest() {
    let (_dbdir, db, payloads) = repo_pieces();
    let src = TempDir::new().unwrap();
    write_file(src.path(), "f", "x", 0o644);
    let manifest = commit_path(&db, &payloads, src.path()).unwrap();
    let layer = create_layer(&db, &manifest).unwrap();
    assert_eq!(layer.manifest, Object::from(manifest).digest().unwrap());
}
