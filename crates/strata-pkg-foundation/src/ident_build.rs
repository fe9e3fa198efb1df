// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

//! Build identifiers: the `src` source build, the virtual `embedded` build,
//! or a concrete option-map digest.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::option_map::OptionMap;
use crate::{Error, Result};

pub const SRC: &str = "src";
pub const EMBEDDED: &str = "embedded";

fn is_base32(c: char) -> bool {
    matches!(c, 'a'..='z' | 'A'..='Z' | '2'..='7')
}

/// The 8-character base32 digest identifying one concrete build.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BuildId(String);

impl BuildId {
    pub fn new(digest: impl Into<String>) -> Result<Self> {
        let digest = digest.into();
        if digest.len() != 8 || !digest.chars().all(is_base32) {
            return Err(Error::InvalidBuild {
                build: digest,
                reason: "build digest must be 8 base32 characters".to_string(),
            });
        }
        Ok(Self(digest))
    }

    /// Derive the build id for a resolved set of build options.
    pub fn from_options(options: &OptionMap) -> Self {
        Self(options.digest())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BuildId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A package build identifier: either the source build, an embedded
/// (virtual) build with no independent storage, or a concrete build
/// digest.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Build {
    Src,
    Embedded,
    Digest(BuildId),
}

impl Build {
    pub fn is_src(&self) -> bool {
        matches!(self, Build::Src)
    }

    pub fn is_embedded(&self) -> bool {
        matches!(self, Build::Embedded)
    }

    pub fn digest_str(&self) -> String {
        match self {
            Build::Src => SRC.to_string(),
            Build::Embedded => EMBEDDED.to_string(),
            Build::Digest(d) => d.to_string(),
        }
    }
}

impl fmt::Display for Build {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.digest_str())
    }
}

impl FromStr for Build {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            SRC => Ok(Build::Src),
            EMBEDDED => Ok(Build::Embedded),
            _ => Ok(Build::Digest(BuildId::new(s)?)),
        }
    }
}

impl Serialize for Build {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.digest_str())
    }
}

impl<'de> Deserialize<'de> for Build {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Build::from_str(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "./ident_build_test.rs"]
mod ident_build_test;
