// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

//! Expanding a family spec (a [`Spec`] with only a version) into the
//! concrete, per-variant builds the solver resolves against.

use strata_pkg_foundation::ident_build::Build;
use strata_pkg_foundation::option_map::OptionMap;
use strata_pkg_ident::request::Request;

use crate::spec::Spec;
use crate::Result;

impl Spec {
    /// The variants this recipe builds, falling back to one default
    /// (empty-option) variant if none are declared.
    pub fn variants(&self) -> Vec<OptionMap> {
        self.build.variants_or_default()
    }

    /// Resolve `variant` against this recipe's declared options and
    /// produce the concrete build: a [`Spec`] with a digest-derived
    /// [`Build`], plus every requirement (from build options and the
    /// install section) that build must satisfy in the environment.
    pub fn generate_build(&self, variant: &OptionMap) -> Result<(Spec, Vec<Request>)> {
        let (resolved, build_requests) = self.build.resolve_options(variant)?;
        let build_id = self.build.build_id(&resolved);

        let mut built = self.clone();
        built.pkg = built.pkg.with_build(Build::Digest(build_id));

        let mut requests = build_requests;
        requests.extend(built.install.requirements.iter().cloned());
        Ok((built, requests))
    }
}

#[cfg(test)]
#[path = "./recipe_test.rs"]
mod recipe_test;
