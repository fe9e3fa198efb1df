// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

//! The `install` section of a package spec: what this build requires at
//! runtime, what it embeds, and what named components it exposes.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strata_pkg_foundation::ident_component::Component;
use strata_pkg_foundation::name::PkgNameBuf;
use strata_pkg_foundation::version_range::VersionFilter;
use strata_pkg_ident::request::{PkgRequest, RequestedBy, Request, VarRequest};
use strata_pkg_ident::Ident;

use crate::{Error, Result};

/// One `install.requirements` entry as written in YAML: either
/// `{pkg: "name/range"}` or `{var: "name/value"}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RequestYaml {
    Pkg { pkg: String },
    Var { var: String },
}

impl RequestYaml {
    fn into_request(self) -> Result<Request> {
        match self {
            RequestYaml::Pkg { pkg } => {
                let (name, range) = match pkg.split_once('/') {
                    Some((name, range)) => (name, range),
                    None => (pkg.as_str(), "*"),
                };
                let name = PkgNameBuf::new(name)?;
                let range = VersionFilter::from_str(range)?;
                Ok(Request::Pkg(PkgRequest::new(
                    name,
                    range,
                    RequestedBy::Unknown,
                )))
            }
            RequestYaml::Var { var } => {
                let (name, value) = var.split_once('=').ok_or_else(|| {
                    Error::String(format!("invalid var request '{var}': expected 'name=value'"))
                })?;
                Ok(Request::Var(VarRequest::new(
                    strata_pkg_foundation::name::OptNameBuf::new(name)?,
                    value,
                )))
            }
        }
    }
}

fn serialize_requests<S: serde::Serializer>(
    requests: &[Request],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    use serde::ser::SerializeSeq;
    let mut seq = serializer.serialize_seq(Some(requests.len()))?;
    for req in requests {
        match req {
            Request::Pkg(r) => seq.serialize_element(&RequestYaml::Pkg {
                pkg: format!("{}/{}", r.name, r.range),
            })?,
            Request::Var(r) => seq.serialize_element(&RequestYaml::Var {
                var: format!("{}={}", r.name, r.value),
            })?,
        }
    }
    seq.end()
}

fn deserialize_requests<'de, D: serde::Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Vec<Request>, D::Error> {
    let raw = Vec::<RequestYaml>::deserialize(deserializer)?;
    raw.into_iter()
        .map(|r| r.into_request())
        .collect::<Result<Vec<_>>>()
        .map_err(serde::de::Error::custom)
}

/// A named subset of a build's install artifacts and the files belonging to
/// it, plus any other components it depends on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentSpec {
    pub name: Component,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub uses: Vec<Component>,
}

/// Runtime requirements, embedded packages, and exposed components.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstallSpec {
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        serialize_with = "serialize_requests",
        deserialize_with = "deserialize_requests"
    )]
    pub requirements: Vec<Request>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub embedded: Vec<Ident>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<ComponentSpec>,
}

impl InstallSpec {
    pub fn pkg_requirements(&self) -> impl Iterator<Item = &PkgRequest> {
        self.requirements.iter().filter_map(Request::as_pkg)
    }
}

#[cfg(test)]
#[path = "./install_spec_test.rs"]
mod install_spec_test;
