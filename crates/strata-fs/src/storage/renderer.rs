// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

use std::io::Read;
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use crate::graph::{Database, Entry, EntryKind, Manifest};
use crate::storage::PayloadStore;
use crate::{Error, Result};

/// How a blob's payload bytes get placed at its rendered path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderType {
    HardLink,
    Copy,
}

/// Recreate the full directory structure described by `manifest` under
/// `target_dir`, creating directories before the files and symlinks that
/// live inside them so that permission-setting on a parent never races
/// the creation of its children.
pub fn render_manifest_into_dir(
    db: &dyn Database,
    payloads: &PayloadStore,
    manifest: &Manifest,
    target_dir: &Path,
    render_type: RenderType,
) -> Result<()> {
    std::fs::create_dir_all(target_dir)?;
    let entries = manifest.walk(db)?;

    for (path, entry) in entries.iter() {
        let full_path = target_dir.join(path);
        match entry.kind {
            EntryKind::Tree => {
                std::fs::create_dir_all(&full_path)?;
            }
            EntryKind::Mask => continue,
            EntryKind::Blob => render_blob(payloads, &full_path, entry, render_type)?,
        }
    }

    #[cfg(unix)]
    for (path, entry) in entries.iter().rev() {
        if entry.is_mask() || entry.is_symlink() {
            continue;
        }
        let full_path = target_dir.join(path);
        std::fs::set_permissions(&full_path, std::fs::Permissions::from_mode(entry.mode))?;
    }

    Ok(())
}

fn render_blob(
    payloads: &PayloadStore,
    rendered_path: &Path,
    entry: &Entry,
    render_type: RenderType,
) -> Result<()> {
    if entry.is_symlink() {
        #[cfg(unix)]
        {
            let mut reader = payloads.open_payload(&entry.object)?;
            let mut target = String::new();
            reader.read_to_string(&mut target)?;
            return match std::os::unix::fs::symlink(&target, rendered_path) {
                Ok(()) => Ok(()),
                Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => Ok(()),
                Err(err) => Err(err.into()),
            };
        }
        #[cfg(not(unix))]
        return Err(Error::String("symlinks require a unix target".into()));
    }

    let payload_path = payloads.digest_path(&entry.object);
    match render_type {
        RenderType::HardLink => match std::fs::hard_link(&payload_path, rendered_path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Err(Error::UnknownObject(entry.object))
            }
            Err(err) => Err(err.into()),
        },
        RenderType::Copy => {
            match std::fs::copy(&payload_path, rendered_path) {
                Ok(_) => (),
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                    return Err(Error::UnknownObject(entry.object))
                }
                Err(err) => return Err(err.into()),
            }
            #[cfg(unix)]
            std::fs::set_permissions(rendered_path, std::fs::Permissions::from_mode(entry.mode))?;
            Ok(())
        }
    }
}

/// Location under `<root>/renders/<digest[:2]>/<digest[2:]>` where a fully
/// rendered manifest is cached, keyed by the manifest's own digest so a
/// repeat render can be skipped entirely.
pub fn render_cache_path(renders_root: &Path, manifest: &Manifest) -> Result<PathBuf> {
    let digest = manifest.digest()?;
    let hex = digest.to_string();
    let (prefix, rest) = hex.split_at(2);
    Ok(renders_root.join(prefix).join(rest))
}

/// A completed render directory is marked with a sibling `.completed` file
/// so a render that was interrupted mid-way is never mistaken for a cache
/// hit and re-rendered from scratch.
pub fn render_marker_path(rendered_dir: &Path) -> PathBuf {
    let mut name = rendered_dir
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".completed");
    rendered_dir.with_file_name(name)
}

pub fn render_manifest(
    db: &dyn Database,
    payloads: &PayloadStore,
    renders_root: &Path,
    manifest: &Manifest,
    render_type: RenderType,
) -> Result<PathBuf> {
    let rendered_dir = render_cache_path(renders_root, manifest)?;
    let marker = render_marker_path(&rendered_dir);
    if marker.exists() {
        return Ok(rendered_dir);
    }

    let working_dir = renders_root.join("work").join(uuid::Uuid::new_v4().to_string());
    render_manifest_into_dir(db, payloads, manifest, &working_dir, render_type)?;

    if let Some(parent) = rendered_dir.parent() {
        std::fs::create_dir_all(parent)?;
    }
    match std::fs::rename(&working_dir, &rendered_dir) {
        Ok(()) => (),
        Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => {
            std::fs::remove_dir_all(&working_dir)?;
        }
        Err(err) => return Err(err.into()),
    }

    std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .open(&marker)?;
    Ok(rendered_dir)
}
