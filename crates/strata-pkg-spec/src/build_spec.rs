// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

//! The `build` section of a package spec: the build script, declared
//! options, and the variants a recipe expands into concrete builds for.

use serde::{Deserialize, Serialize};
use strata_pkg_foundation::ident_build::BuildId;
use strata_pkg_foundation::option_map::OptionMap;
use strata_pkg_ident::request::Request;

use crate::option::Opt;
use crate::Result;

/// Structured build inputs: the script that performs the build, the
/// options that parameterize it, and (for a recipe) the variants to build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildSpec {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub script: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<Opt>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variants: Vec<OptionMap>,
}

impl BuildSpec {
    /// Resolve every declared option against the given values (typically a
    /// variant's `OptionMap`), producing the final option map for a build
    /// plus the requests those package options contribute.
    pub fn resolve_options(&self, given: &OptionMap) -> Result<(OptionMap, Vec<Request>)> {
        let mut resolved = OptionMap::default();
        let mut requests = Vec::new();
        for opt in &self.options {
            let name = opt.full_name();
            let value = given.get(&name);
            let request = opt.to_request(value)?;
            let value = match &request {
                Request::Pkg(req) => req.range.to_string(),
                Request::Var(req) => req.value.clone(),
            };
            resolved.insert(name, value);
            requests.push(request);
        }
        Ok((resolved, requests))
    }

    /// The build identifier for a fully resolved option map: see
    /// [`OptionMap::digest`].
    pub fn build_id(&self, resolved: &OptionMap) -> BuildId {
        BuildId::from_options(resolved)
    }

    /// The variants this recipe should build; a recipe with none declared
    /// builds a single default (empty) variant.
    pub fn variants_or_default(&self) -> Vec<OptionMap> {
        if self.variants.is_empty() {
            vec![OptionMap::default()]
        } else {
            self.variants.clone()
        }
    }
}

#[cfg(test)]
#[path = "./build_spec_test.rs"]
mod build_spec_test;
