// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

use std::io::BufRead;

use chrono::prelude::*;
use strata_digest::Digest;

use crate::graph::encoding::{Decodable, Encodable};
use crate::{Error, Result};

#[cfg(test)]
#[path = "./tag_test.rs"]
mod tag_test;

/// A mutable pointer to an object, with a parent link back to what it
/// previously pointed at. Tags form an append-only per-name history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub org: String,
    pub name: String,
    pub target: Digest,
    pub parent: Digest,
    pub user: String,
    pub time: DateTime<Utc>,
}

impl Tag {
    /// Build the next tag in a stream, pointing `target` and recording
    /// `parent` as whatever previously sat at the head (or the null digest
    /// if this is the first tag in the stream).
    pub fn new(org: impl Into<String>, name: impl Into<String>, target: Digest, parent: Digest) -> Self {
        Self {
            org: org.into(),
            name: name.into(),
            target,
            parent,
            user: format!("{}@{}", whoami::username(), whoami::hostname()),
            time: Utc::now(),
        }
    }

    pub fn path(&self) -> String {
        if self.org.is_empty() {
            self.name.clone()
        } else {
            format!("{}/{}", self.org, self.name)
        }
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: target={} parent={} user={} time={}",
            self.path(),
            self.target,
            self.parent,
            self.user,
            self.time.to_rfc3339(),
        )
    }
}

impl Encodable for Tag {
    fn encode(&self, writer: &mut impl std::io::Write) -> Result<()> {
        strata_digest::write_string(&mut *writer, &self.org)?;
        strata_digest::write_string(&mut *writer, &self.name)?;
        strata_digest::write_digest(&mut *writer, &self.target)?;
        strata_digest::write_digest(&mut *writer, &self.parent)?;
        strata_digest::write_string(&mut *writer, &self.user)?;
        strata_digest::write_string(&mut *writer, &self.time.to_rfc3339())?;
        Ok(())
    }
}

impl Decodable for Tag {
    fn decode(reader: &mut impl BufRead) -> Result<Self> {
        let org = strata_digest::read_string(&mut *reader)?;
        let name = strata_digest::read_string(&mut *reader)?;
        let target = strata_digest::read_digest(&mut *reader)?;
        let parent = strata_digest::read_digest(&mut *reader)?;
        let user = strata_digest::read_string(&mut *reader)?;
        let time_str = strata_digest::read_string(&mut *reader)?;
        let time = DateTime::parse_from_rfc3339(&time_str)
            .map_err(|e| Error::String(format!("invalid tag timestamp: {e}")))?
            .with_timezone(&Utc);
        Ok(Tag {
            org,
            name,
            target,
            parent,
            user,
            time,
        })
    }
}

/// Identifies a tag stream and, optionally, a position within its history.
///
/// Grammar: `org/name[:version]`, where `version` is absent or `~` for the
/// head, a non-negative integer for the nth record back from head (0 =
/// head), or a hex digest prefix identifying that revision directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSpec {
    pub org: String,
    pub name: String,
    pub version: TagVersion,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagVersion {
    Head,
    Index(u64),
    Digest(String),
}

impl TagSpec {
    pub fn parse(source: &str) -> Result<Self> {
        let (path, version) = match source.split_once(':') {
            Some((path, version)) => (path, Some(version)),
            None => (source, None),
        };
        if path.is_empty() {
            return Err(Error::InvalidRef {
                reference: source.to_string(),
                reason: "tag spec must name a path".to_string(),
            });
        }
        let (org, name) = match path.rsplit_once('/') {
            Some((org, name)) => (org.to_string(), name.to_string()),
            None => (String::new(), path.to_string()),
        };
        if name.is_empty() {
            return Err(Error::InvalidRef {
                reference: source.to_string(),
                reason: "tag name cannot be empty".to_string(),
            });
        }
        let version = match version {
            None | Some("") | Some("~") => TagVersion::Head,
            Some(v) => {
                if let Ok(index) = v.parse::<u64>() {
                    TagVersion::Index(index)
                } else if v.bytes().all(|b| b.is_ascii_hexdigit()) {
                    TagVersion::Digest(v.to_lowercase())
                } else {
                    return Err(Error::InvalidRef {
                        reference: source.to_string(),
                        reason: format!("invalid tag version: {v}"),
                    });
                }
            }
        };
        Ok(TagSpec { org, name, version })
    }

    pub fn path(&self) -> String {
        if self.org.is_empty() {
            self.name.clone()
        } else {
            format!("{}/{}", self.org, self.name)
        }
    }

    pub fn with_version(&self, version: u64) -> Self {
        TagSpec {
            org: self.org.clone(),
            name: self.name.clone(),
            version: TagVersion::Index(version),
        }
    }
}

impl std::fmt::Display for TagSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.version {
            TagVersion::Head => write!(f, "{}", self.path()),
            TagVersion::Index(i) => write!(f, "{}:{i}", self.path()),
            TagVersion::Digest(d) => write!(f, "{}:{d}", self.path()),
        }
    }
}

impl std::str::FromStr for TagSpec {
    type Err = Error;

    fn from_str(source: &str) -> Result<Self> {
        TagSpec::parse(source)
    }
}
