// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strata_pkg_foundation::ident_build::Build;
use strata_pkg_foundation::name::PkgNameBuf;
use strata_pkg_foundation::version::Version;

use crate::{Error, Result};

/// `(name, version, optional build)`: identifies one package, one version
/// of a package family, or one concrete built instantiation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ident {
    pub name: PkgNameBuf,
    pub version: Version,
    pub build: Option<Build>,
}

impl Ident {
    pub fn new(name: PkgNameBuf, version: Version) -> Self {
        Self {
            name,
            version,
            build: None,
        }
    }

    pub fn with_build(mut self, build: Build) -> Self {
        self.build = Some(build);
        self
    }

    pub fn is_source(&self) -> bool {
        matches!(&self.build, Some(b) if b.is_src())
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name, self.version)?;
        if let Some(build) = &self.build {
            write!(f, "/{build}")?;
        }
        Ok(())
    }
}

impl FromStr for Ident {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.splitn(3, '/');
        let name = parts
            .next()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| Error::String(format!("invalid ident '{s}': missing package name")))?;
        let version = parts
            .next()
            .ok_or_else(|| Error::String(format!("invalid ident '{s}': missing version")))?;
        let build = parts.next();

        let name = PkgNameBuf::new(name)?;
        let version = Version::from_str(version).map_err(strata_pkg_foundation::Error::from)?;
        let build = build
            .map(Build::from_str)
            .transpose()
            .map_err(strata_pkg_foundation::Error::from)?;
        Ok(Ident {
            name,
            version,
            build,
        })
    }
}

#[cfg(test)]
#[path = "./ident_test.rs"]
mod ident_test;
