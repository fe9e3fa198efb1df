// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

//! Build options declared in a package spec's `build.options` list: either a
//! dependency ([`PkgOpt`]) or a free-form variable ([`VarOpt`]).

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strata_pkg_foundation::name::{OptNameBuf, PkgNameBuf};
use strata_pkg_foundation::version_range::VersionFilter;
use strata_pkg_ident::request::{InclusionPolicy, PkgRequest, RequestedBy, Request, VarRequest};

use crate::{Error, Result};

/// A build-time dependency: its resolved version becomes part of this
/// package's build digest and, unless overridden, its own install
/// requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PkgOpt {
    pub pkg: PkgNameBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

impl PkgOpt {
    pub fn full_name(&self) -> OptNameBuf {
        self.pkg.as_opt_name()
    }

    pub fn get_value(&self, given: Option<&str>) -> Option<String> {
        given.map(str::to_string).or_else(|| self.default.clone())
    }

    /// The request this option contributes to the build environment.
    pub fn to_request(&self, value: Option<&str>) -> Result<PkgRequest> {
        let range = match self.get_value(value) {
            Some(v) if !v.is_empty() => VersionFilter::from_str(&v)?,
            _ => VersionFilter::any(),
        };
        Ok(
            PkgRequest::new(self.pkg.clone(), range, RequestedBy::Unknown)
                .with_inclusion(InclusionPolicy::Always),
        )
    }
}

/// A free-form build variable, e.g. `debug: {choices: [on, off], default: off}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VarOpt {
    pub var: OptNameBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<String>,
}

impl VarOpt {
    pub fn full_name(&self) -> OptNameBuf {
        self.var.clone()
    }

    pub fn get_value(&self, given: Option<&str>) -> String {
        given
            .map(str::to_string)
            .or_else(|| self.default.clone())
            .unwrap_or_default()
    }

    pub fn validate(&self, value: &str) -> Result<()> {
        if self.choices.is_empty() || self.choices.iter().any(|c| c == value) {
            return Ok(());
        }
        Err(Error::InvalidOptionValue {
            name: self.var.to_string(),
            value: value.to_string(),
            reason: format!("must be one of {:?}", self.choices),
        })
    }

    pub fn to_request(&self, value: &str) -> VarRequest {
        VarRequest::new(self.var.clone(), value.to_string())
    }
}

/// One entry of a spec's `build.options` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Opt {
    Pkg(PkgOpt),
    Var(VarOpt),
}

impl Opt {
    pub fn full_name(&self) -> OptNameBuf {
        match self {
            Opt::Pkg(opt) => opt.full_name(),
            Opt::Var(opt) => opt.full_name(),
        }
    }

    pub fn is_pkg(&self) -> bool {
        matches!(self, Opt::Pkg(_))
    }

    /// Resolve this option against a given value (or its default) and
    /// produce the request it contributes to the build.
    pub fn to_request(&self, value: Option<&str>) -> Result<Request> {
        match self {
            Opt::Pkg(opt) => Ok(Request::Pkg(opt.to_request(value)?)),
            Opt::Var(opt) => {
                let resolved = opt.get_value(value);
                opt.validate(&resolved)?;
                Ok(Request::Var(opt.to_request(&resolved)))
            }
        }
    }
}

#[cfg(test)]
#[path = "./option_test.rs"]
mod option_test;
