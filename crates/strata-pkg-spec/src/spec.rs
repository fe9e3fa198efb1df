// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

//! The top-level package spec file: `pkg`, `compat`, `sources`, `build`,
//! `install`.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strata_pkg_ident::Ident;

use crate::build_spec::BuildSpec;
use crate::install_spec::InstallSpec;
use crate::source_spec::SourceSpec;
use crate::{Error, Result};

mod ident_as_string {
    use std::str::FromStr;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use strata_pkg_ident::Ident;

    pub fn serialize<S: Serializer>(ident: &Ident, serializer: S) -> Result<S::Ok, S::Error> {
        ident.to_string().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Ident, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ident::from_str(&s).map_err(serde::de::Error::custom)
    }
}

fn default_compat() -> String {
    "x.x.x".to_string()
}

/// A package spec: either a family recipe (no build in `pkg`) or one
/// concrete, already-built instantiation (`pkg` carries a [`Build`]).
///
/// [`Build`]: strata_pkg_foundation::ident_build::Build
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spec {
    #[serde(with = "ident_as_string")]
    pub pkg: Ident,
    #[serde(default = "default_compat")]
    pub compat: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<SourceSpec>,
    #[serde(default)]
    pub build: BuildSpec,
    #[serde(default)]
    pub install: InstallSpec,
}

impl Spec {
    pub fn new(pkg: Ident) -> Self {
        Self {
            pkg,
            compat: default_compat(),
            sources: Vec::new(),
            build: BuildSpec::default(),
            install: InstallSpec::default(),
        }
    }

    /// A recipe describes a package family (version only); a spec with a
    /// concrete `Build` describes one buildable instantiation.
    pub fn is_recipe(&self) -> bool {
        self.pkg.build.is_none()
    }

    pub fn name(&self) -> &strata_pkg_foundation::name::PkgNameBuf {
        &self.pkg.name
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(Error::InvalidSpec)
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(Error::InvalidSpec)
    }
}

#[cfg(test)]
#[path = "./spec_test.rs"]
mod spec_test;
