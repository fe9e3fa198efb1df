// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

//! Dotted version numbers with optional pre/post-release tag sets.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use itertools::Itertools;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Error, Result};

const VERSION_SEP: &str = ".";
const TAG_SET_SEP: &str = ",";
const TAG_SEP: &str = ".";

/// A set of named, numbered pre- or post-release tags, e.g. `alpha.1,rev.2`.
#[derive(Debug, Default, Clone, Eq, PartialEq, Hash)]
pub struct TagSet(BTreeMap<String, u32>);

impl TagSet {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<u32> {
        self.0.get(name).copied()
    }
}

impl fmt::Display for TagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .iter()
                .map(|(name, num)| format!("{name}{TAG_SEP}{num}"))
                .join(TAG_SET_SEP)
        )
    }
}

impl PartialOrd for TagSet {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TagSet {
    fn cmp(&self, other: &Self) -> Ordering {
        // Tags compare entry-by-entry in sorted-name order; the set with
        // more entries (all else equal) sorts greater, matching the
        // convention that `alpha.1.rc.2` is a later tag than `alpha.1`.
        for (a, b) in self.0.iter().zip(other.0.iter()) {
            match a.cmp(&b) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }
        self.0.len().cmp(&other.0.len())
    }
}

fn parse_tag_set(raw: &str) -> Result<TagSet> {
    let mut tags = BTreeMap::new();
    if raw.is_empty() {
        return Ok(TagSet(tags));
    }
    for tag in raw.split(TAG_SET_SEP) {
        let (name, num) = tag.split_once(TAG_SEP).ok_or_else(|| Error::InvalidVersion {
            version: raw.to_string(),
            reason: format!("tag must be of the form <name>.<int>, got '{tag}'"),
        })?;
        if name.is_empty() || num.is_empty() {
            return Err(Error::InvalidVersion {
                version: raw.to_string(),
                reason: format!("tag must be of the form <name>.<int>, got '{tag}'"),
            });
        }
        let num: u32 = num.parse().map_err(|_| Error::InvalidVersion {
            version: raw.to_string(),
            reason: format!("tag value must be an integer, got '{num}'"),
        })?;
        if tags.insert(name.to_string(), num).is_some() {
            return Err(Error::InvalidVersion {
                version: raw.to_string(),
                reason: format!("duplicate tag '{name}'"),
            });
        }
    }
    Ok(TagSet(tags))
}

/// A dotted version number (`1.2.3`) with optional pre-release (`-alpha.1`)
/// and post-release (`+build.2`) tag sets.
#[derive(Debug, Default, Clone, Eq, PartialEq, Hash)]
pub struct Version {
    pub parts: Vec<u32>,
    pub pre: TagSet,
    pub post: TagSet,
}

impl Version {
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            parts: vec![major, minor, patch],
            ..Default::default()
        }
    }

    pub fn major(&self) -> u32 {
        self.parts.first().copied().unwrap_or_default()
    }

    pub fn minor(&self) -> u32 {
        self.parts.get(1).copied().unwrap_or_default()
    }

    pub fn patch(&self) -> u32 {
        self.parts.get(2).copied().unwrap_or_default()
    }

    fn base_normalized(&self) -> String {
        const MIN_PARTS: usize = 3;
        let mut parts = self.parts.clone();
        while parts.len() < MIN_PARTS {
            parts.push(0);
        }
        parts.iter().join(VERSION_SEP)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base_normalized())?;
        if !self.pre.is_empty() {
            write!(f, "-{}", self.pre)?;
        }
        if !self.post.is_empty() {
            write!(f, "+{}", self.post)?;
        }
        Ok(())
    }
}

impl FromStr for Version {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Ok(Version::default());
        }
        let (rest, post) = match s.split_once('+') {
            Some((a, b)) => (a, b),
            None => (s, ""),
        };
        let (base, pre) = match rest.split_once('-') {
            Some((a, b)) => (a, b),
            None => (rest, ""),
        };
        let mut parts = Vec::new();
        for (i, p) in base.split(VERSION_SEP).enumerate() {
            let n: u32 = p.parse().map_err(|_| Error::InvalidVersion {
                version: s.to_string(),
                reason: format!("part {i} ('{p}') is not an integer"),
            })?;
            parts.push(n);
        }
        Ok(Version {
            parts,
            pre: parse_tag_set(pre)?,
            post: parse_tag_set(post)?,
        })
    }
}

impl TryFrom<&str> for Version {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        Version::from_str(value)
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Version::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.parts.len().max(other.parts.len());
        for i in 0..len {
            let a = self.parts.get(i).copied().unwrap_or(0);
            let b = other.parts.get(i).copied().unwrap_or(0);
            match a.cmp(&b) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }
        // No pre-release is greater than any pre-release (1.0.0 > 1.0.0-rc.1).
        match (self.pre.is_empty(), other.pre.is_empty()) {
            (true, true) => {}
            (true, false) => return Ordering::Greater,
            (false, true) => return Ordering::Less,
            (false, false) => match self.pre.cmp(&other.pre) {
                Ordering::Equal => {}
                ord => return ord,
            },
        }
        self.post.cmp(&other.post)
    }
}

#[cfg(test)]
#[path = "./version_test.rs"]
mod version_test;
