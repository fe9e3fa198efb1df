// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

use std::fs::OpenOptions;
use std::io::Read;
use std::path::{Path, PathBuf};

use strata_digest::{Digest, Hasher, PartialDigest};

use crate::graph::DigestSearchCriteria;
use crate::{Error, Result};

#[cfg(test)]
#[path = "./hash_store_test.rs"]
mod hash_store_test;

const WORKDIR: &str = "work";

/// A directory of content-addressed files, split two levels deep by the
/// first two hex characters of their digest: `<root>/<digest[:2]>/<digest[2:]>`.
///
/// Shared building block for both the object database and the payload
/// store, which differ only in what bytes they store at each digest.
pub struct HashStore {
    root: PathBuf,
}

impl HashStore {
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self> {
        std::fs::create_dir_all(root.as_ref())?;
        std::fs::create_dir_all(root.as_ref().join(WORKDIR))?;
        Ok(Self {
            root: root.as_ref().to_path_buf(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn workdir(&self) -> PathBuf {
        self.root.join(WORKDIR)
    }

    pub fn digest_path(&self, digest: &Digest) -> PathBuf {
        let text = digest.to_string();
        self.root.join(&text[..2]).join(&text[2..])
    }

    pub fn has_digest(&self, digest: &Digest) -> bool {
        self.digest_path(digest).exists()
    }

    /// Write the bytes read from `reader`, hashing as they are written.
    /// Returns the digest of the written content and the number of bytes
    /// copied. Idempotent: writing identical content twice is a no-op the
    /// second time.
    pub fn write_data(&self, mut reader: impl Read) -> Result<(Digest, u64)> {
        let working_path = self.workdir().join(uuid::Uuid::new_v4().to_string());
        let file = OpenOptions::new()
            .create_new(true)
            .write(true)
            .open(&working_path)?;
        let mut hasher = Hasher::with_target(file);
        let copied = std::io::copy(&mut reader, &mut hasher).map_err(|err| {
            let _ = std::fs::remove_file(&working_path);
            err
        })?;
        let digest = hasher.digest();

        let final_path = self.digest_path(&digest);
        if let Some(parent) = final_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        match std::fs::rename(&working_path, &final_path) {
            Ok(()) => (),
            Err(err) if final_path.exists() => {
                // a concurrent writer won the race with identical content.
                let _ = std::fs::remove_file(&working_path);
                let _ = err;
            }
            Err(err) => {
                let _ = std::fs::remove_file(&working_path);
                return Err(err.into());
            }
        }
        Ok((digest, copied))
    }

    pub fn open_data(&self, digest: &Digest) -> Result<std::fs::File> {
        std::fs::File::open(self.digest_path(digest)).map_err(|err| match err.kind() {
            std::io::ErrorKind::NotFound => Error::UnknownObject(*digest),
            _ => err.into(),
        })
    }

    pub fn remove_data(&self, digest: &Digest) -> Result<()> {
        match std::fs::remove_file(self.digest_path(digest)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    /// Expand a (possibly partial) digest to the single full digest it
    /// resolves to in this store.
    pub fn resolve_full_digest(&self, partial: &PartialDigest) -> Result<Digest> {
        if let Some(digest) = partial.to_digest() {
            if self.has_digest(&digest) {
                return Ok(digest);
            }
            return Err(Error::UnknownReference(partial.to_string()));
        }
        let short = partial.as_str();
        let (dirname, prefix) = short.split_at(2.min(short.len()));
        let dirpath = self.root.join(dirname);
        let entries = match std::fs::read_dir(&dirpath) {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::UnknownReference(partial.to_string()))
            }
            Err(err) => return Err(err.into()),
        };
        let mut matches = Vec::new();
        for entry in entries {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with(prefix) {
                matches.push(format!("{dirname}{name}"));
            }
        }
        match matches.len() {
            0 => Err(Error::UnknownReference(partial.to_string())),
            1 => Digest::parse(&matches.remove(0)),
            _ => Err(Error::AmbiguousReference(partial.to_string())),
        }
    }

    /// Iterate every digest stored in this store, matching `criteria`.
    pub fn iter_digests(
        &self,
        criteria: DigestSearchCriteria,
    ) -> Result<Box<dyn Iterator<Item = Result<Digest>> + '_>> {
        let prefix = match &criteria {
            DigestSearchCriteria::All => None,
            DigestSearchCriteria::StartsWith(partial) => Some(partial.as_str().to_string()),
        };
        let mut digests = Vec::new();
        for dir_entry in std::fs::read_dir(&self.root)? {
            let dir_entry = dir_entry?;
            if dir_entry.file_name() == WORKDIR {
                continue;
            }
            let dirname = dir_entry.file_name().to_string_lossy().into_owned();
            if dirname.len() != 2 {
                continue;
            }
            for file_entry in std::fs::read_dir(dir_entry.path())? {
                let file_entry = file_entry?;
                let rest = file_entry.file_name().to_string_lossy().into_owned();
                let full = format!("{dirname}{rest}");
                if let Some(prefix) = &prefix {
                    if !full.starts_with(prefix.as_str()) {
                        continue;
                    }
                }
                digests.push(Digest::parse(&full));
            }
        }
        Ok(Box::new(digests.into_iter().map(|d| d.map_err(Error::from))))
    }
}
