// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

use std::fs::OpenOptions;
use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};

use strata_digest::Digest;

use crate::graph::encoding::{Decodable, Encodable};
use crate::tracking::{Tag, TagSpec, TagVersion};
use crate::{Error, Result};

#[cfg(test)]
#[path = "./tag_test.rs"]
mod tag_test;

const TAG_EXT: &str = "tag";

/// Append-only per-name tag history, stored one file per stream at
/// `<root>/<org>/<name>.tag`. Each record is length-prefixed so a stream
/// can be read back as a sequence without a separate index.
pub struct TagStorage {
    root: PathBuf,
}

impl TagStorage {
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        std::fs::create_dir_all(root.as_ref())?;
        Ok(Self {
            root: root.as_ref().to_path_buf(),
        })
    }

    fn stream_path(&self, org: &str, name: &str) -> PathBuf {
        let mut path = self.root.clone();
        if !org.is_empty() {
            for part in org.split('/') {
                path.push(part);
            }
        }
        path.push(format!("{name}.{TAG_EXT}"));
        path
    }

    /// Read every tag record in a stream, oldest first.
    pub(crate) fn read_stream(&self, org: &str, name: &str) -> Result<Vec<Tag>> {
        let path = self.stream_path(org, name);
        let file = match std::fs::File::open(&path) {
            Ok(file) => file,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };
        let mut reader = BufReader::new(file);
        let mut tags = Vec::new();
        loop {
            let mut len_buf = [0u8; 8];
            match reader.read_exact(&mut len_buf) {
                Ok(()) => (),
                Err(err) if err.kind() == std::io::ErrorKind::UnexpectedEof => break,
                Err(err) => return Err(err.into()),
            }
            let len = u64::from_be_bytes(len_buf) as usize;
            let mut buf = vec![0u8; len];
            reader.read_exact(&mut buf)?;
            let mut tag_reader = BufReader::new(buf.as_slice());
            tags.push(Tag::decode(&mut tag_reader)?);
        }
        Ok(tags)
    }

    pub(crate) fn write_stream(&self, org: &str, name: &str, tags: &[Tag]) -> Result<()> {
        let path = self.stream_path(org, name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)?;
        for tag in tags {
            let bytes = tag.encode_to_bytes()?;
            file.write_all(&(bytes.len() as u64).to_be_bytes())?;
            file.write_all(&bytes)?;
        }
        file.sync_all()?;
        Ok(())
    }

    /// Append a new tag onto the named stream, pointing at `target`. The
    /// new tag's parent is the digest of the record that previously sat at
    /// the stream's head, not that record's target.
    pub fn push_tag(&self, org: &str, name: &str, target: Digest) -> Result<Tag> {
        let _lock = StreamLock::acquire(&self.stream_path(org, name))?;
        let history = self.read_stream(org, name)?;
        let parent = match history.last() {
            Some(tag) => tag.digest()?,
            None => Digest::default(),
        };
        let tag = Tag::new(org, name, target, parent);

        let path = self.stream_path(org, name);
        if let Some(parent_dir) = path.parent() {
            std::fs::create_dir_all(parent_dir)?;
        }
        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
        let bytes = tag.encode_to_bytes()?;
        file.write_all(&(bytes.len() as u64).to_be_bytes())?;
        file.write_all(&bytes)?;
        file.sync_all()?;
        Ok(tag)
    }

    /// Resolve a tag spec to the single tag record it identifies.
    pub fn resolve_tag(&self, spec: &TagSpec) -> Result<Tag> {
        let history = self.read_stream(&spec.org, &spec.name)?;
        if history.is_empty() {
            return Err(Error::UnknownTagStream(spec.path()));
        }
        match &spec.version {
            TagVersion::Head => Ok(history.last().cloned().expect("checked non-empty")),
            TagVersion::Index(index) => {
                let from_head = *index as usize;
                if from_head >= history.len() {
                    return Err(Error::UnknownReference(spec.to_string()));
                }
                Ok(history[history.len() - 1 - from_head].clone())
            }
            TagVersion::Digest(prefix) => history
                .iter()
                .rev()
                .find(|tag| {
                    tag.digest()
                        .map(|d| d.to_string().starts_with(prefix.as_str()))
                        .unwrap_or(false)
                })
                .cloned()
                .ok_or_else(|| Error::UnknownReference(spec.to_string())),
        }
    }

    /// Every tag spec whose current head points at `digest`.
    pub fn find_tags(&self, digest: &Digest) -> Result<Vec<TagSpec>> {
        let mut found = Vec::new();
        for (org, name) in self.iter_stream_names()? {
            let history = self.read_stream(&org, &name)?;
            if let Some(tag) = history.last() {
                if &tag.target == digest {
                    found.push(TagSpec {
                        org,
                        name,
                        version: TagVersion::Head,
                    });
                }
            }
        }
        Ok(found)
    }

    /// Enumerate the tag namespace under `prefix` (an org path, possibly
    /// empty), one path segment at a time: immediate child directories
    /// (suffixed with `/`) and immediate tag names.
    pub fn ls_tags(&self, prefix: &str) -> Result<Vec<String>> {
        let mut dir = self.root.clone();
        if !prefix.is_empty() {
            for part in prefix.split('/') {
                dir.push(part);
            }
        }
        let entries = match std::fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };
        let mut names = Vec::new();
        for entry in entries {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some(TAG_EXT) {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_string());
                }
            } else if path.is_dir() {
                if let Some(dirname) = path.file_name().and_then(|s| s.to_str()) {
                    names.push(format!("{dirname}/"));
                }
            }
        }
        names.sort();
        Ok(names)
    }

    pub fn remove_tag(&self, tag: &Tag) -> Result<()> {
        let _lock = StreamLock::acquire(&self.stream_path(&tag.org, &tag.name))?;
        let mut history = self.read_stream(&tag.org, &tag.name)?;
        history.retain(|t| t != tag);
        self.write_stream(&tag.org, &tag.name, &history)
    }

    pub fn remove_tag_stream(&self, spec: &TagSpec) -> Result<()> {
        let path = self.stream_path(&spec.org, &spec.name);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    /// Every tag stream in this store, as a head-version [`TagSpec`].
    pub fn iter_tags(&self) -> Result<Vec<TagSpec>> {
        Ok(self
            .iter_stream_names()?
            .into_iter()
            .map(|(org, name)| TagSpec {
                org,
                name,
                version: TagVersion::Head,
            })
            .collect())
    }

    /// Replace a stream's history wholesale, under the stream's write lock.
    /// Used by pruning to drop a computed set of records in one rewrite.
    pub(crate) fn replace_stream(&self, org: &str, name: &str, tags: &[Tag]) -> Result<()> {
        let _lock = StreamLock::acquire(&self.stream_path(org, name))?;
        self.write_stream(org, name, tags)
    }

    fn iter_stream_names(&self) -> Result<Vec<(String, String)>> {
        let mut out = Vec::new();
        walk_streams(&self.root, &self.root, &mut out)?;
        Ok(out)
    }
}

fn walk_streams(root: &Path, dir: &Path, out: &mut Vec<(String, String)>) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            walk_streams(root, &path, out)?;
        } else if path.extension().and_then(|e| e.to_str()) == Some(TAG_EXT) {
            let name = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default()
                .to_string();
            let org = path
                .parent()
                .and_then(|p| p.strip_prefix(root).ok())
                .map(|p| p.to_string_lossy().replace(std::path::MAIN_SEPARATOR, "/"))
                .unwrap_or_default();
            out.push((org, name));
        }
    }
    Ok(())
}

struct StreamLock(PathBuf);

impl StreamLock {
    fn acquire(tag_path: &Path) -> Result<Self> {
        if let Some(parent) = tag_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let lock_path = tag_path.with_extension(format!("{TAG_EXT}.lock"));
        match OpenOptions::new().create_new(true).write(true).open(&lock_path) {
            Ok(_) => Ok(StreamLock(lock_path)),
            Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => {
                Err(Error::String(format!(
                    "tag stream is locked by another writer: {}",
                    tag_path.display()
                )))
            }
            Err(err) => Err(err.into()),
        }
    }
}

impl Drop for StreamLock {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
    }
}
