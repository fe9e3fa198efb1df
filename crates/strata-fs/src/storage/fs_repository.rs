// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

use std::io::Read;
use std::path::{Path, PathBuf};

use strata_digest::{Digest, PartialDigest};

use super::object_db::FsDatabase;
use super::payload::PayloadStore;
use super::renderer::{render_manifest, RenderType};
use super::repository::Repository;
use super::tag::TagStorage;
use crate::graph::{Database, DigestSearchCriteria, Object};
use crate::tracking::{Tag, TagSpec};
use crate::Result;

const OBJECTS_DIR: &str = "objects";
const PAYLOADS_DIR: &str = "payloads";
const TAGS_DIR: &str = "tags";
const RENDERS_DIR: &str = "renders";
const VERSION_FILE: &str = "VERSION";

/// A repository rooted at a directory on the local filesystem, laid out as
/// `objects/`, `payloads/`, `tags/`, `renders/`, and a `VERSION` marker.
///
/// This is the only writable [`Repository`] implementation in this crate;
/// `tar` and remote backends are read-only or out of scope, but must
/// satisfy the same trait.
pub struct FsRepository {
    root: PathBuf,
    db: FsDatabase,
    payloads: PayloadStore,
    tags: TagStorage,
}

impl FsRepository {
    /// Open a repository at `root`, creating the on-disk layout if it does
    /// not already exist.
    pub fn create(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        std::fs::create_dir_all(root)?;
        std::fs::create_dir_all(root.join(RENDERS_DIR))?;
        let version_path = root.join(VERSION_FILE);
        if !version_path.exists() {
            std::fs::write(&version_path, env!("CARGO_PKG_VERSION"))?;
        }
        Ok(Self {
            db: FsDatabase::open(root.join(OBJECTS_DIR))?,
            payloads: PayloadStore::open(root.join(PAYLOADS_DIR))?,
            tags: TagStorage::open(root.join(TAGS_DIR))?,
            root: root.to_path_buf(),
        })
    }

    /// Open an existing repository, failing if the layout has never been
    /// initialized. In practice identical to [`Self::create`], since the
    /// on-disk layout has no required pre-existing content beyond the
    /// directories themselves.
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        Self::create(root)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn payloads(&self) -> &PayloadStore {
        &self.payloads
    }

    pub fn tags(&self) -> &TagStorage {
        &self.tags
    }

    fn renders_root(&self) -> PathBuf {
        self.root.join(RENDERS_DIR)
    }

    /// Materialize `manifest` under this repository's render cache,
    /// returning the path it was rendered to. A second call with the same
    /// manifest digest is a cache hit.
    pub fn render(&self, manifest: &crate::graph::Manifest) -> Result<PathBuf> {
        render_manifest(&self.db, &self.payloads, &self.renders_root(), manifest, RenderType::HardLink)
    }
}

impl Database for FsRepository {
    fn read_object(&self, digest: &Digest) -> Result<Object> {
        self.db.read_object(digest)
    }

    fn write_object(&self, obj: &Object) -> Result<Digest> {
        self.db.write_object(obj)
    }

    fn remove_object(&self, digest: &Digest) -> Result<()> {
        self.db.remove_object(digest)
    }

    fn find_digests(
        &self,
        criteria: DigestSearchCriteria,
    ) -> Result<Box<dyn Iterator<Item = Result<Digest>> + '_>> {
        self.db.find_digests(criteria)
    }

    fn resolve_full_digest(&self, partial: &PartialDigest) -> Result<Digest> {
        self.db.resolve_full_digest(partial)
    }
}

impl Repository for FsRepository {
    fn commit_dir(&self, path: &Path) -> Result<crate::graph::Manifest> {
        crate::commit::commit_path(&self.db, &self.payloads, path)
    }

    fn read_ref(&self, reference: &str) -> Result<Digest> {
        if let Ok(partial) = PartialDigest::parse(reference) {
            if let Ok(digest) = self.db.resolve_full_digest(&partial) {
                return Ok(digest);
            }
        }
        let spec = TagSpec::parse(reference)?;
        Ok(self.tags.resolve_tag(&spec)?.target)
    }

    fn push_tag(&self, org: &str, name: &str, target: Digest) -> Result<Tag> {
        self.tags.push_tag(org, name, target)
    }

    fn resolve_tag(&self, spec: &TagSpec) -> Result<Tag> {
        self.tags.resolve_tag(spec)
    }

    fn find_tags(&self, digest: &Digest) -> Result<Vec<TagSpec>> {
        self.tags.find_tags(digest)
    }

    fn ls_tags(&self, prefix: &str) -> Result<Vec<String>> {
        self.tags.ls_tags(prefix)
    }

    fn remove_tag(&self, tag: &Tag) -> Result<()> {
        self.tags.remove_tag(tag)
    }

    fn remove_tag_stream(&self, spec: &TagSpec) -> Result<()> {
        self.tags.remove_tag_stream(spec)
    }

    fn iter_tags(&self) -> Result<Vec<TagSpec>> {
        self.tags.iter_tags()
    }

    fn has_payload(&self, digest: &Digest) -> bool {
        self.payloads.has_payload(digest)
    }

    fn open_payload(&self, digest: &Digest) -> Result<Box<dyn Read + '_>> {
        Ok(Box::new(self.payloads.open_payload(digest)?))
    }

    fn write_payload(&self, reader: &mut dyn Read) -> Result<Digest> {
        self.payloads.write_payload(reader)
    }

    fn remove_payload(&self, digest: &Digest) -> Result<()> {
        self.payloads.remove_payload(digest)
    }

    fn iter_payload_digests(&self) -> Result<Box<dyn Iterator<Item = Result<Digest>> + '_>> {
        self.payloads.iter_payload_digests()
    }
}

#[cfg(test)]
#[path = "./fs_repository_test.rs"]
mod fs_repository_test;
