// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

use strata_digest::Digest;
use strata_pkg_foundation::ident_build::Build;
use strata_pkg_foundation::name::PkgName;
use strata_pkg_foundation::version::Version;
use strata_pkg_ident::Ident;
use strata_pkg_spec::Spec;

use crate::Result;

/// A source of package recipes and built packages that the solver reads
/// from, and that build tooling publishes into.
///
/// A "recipe" is a [`Spec`] whose `pkg` carries no [`Build`]; it describes
/// a package family at one version. A "package" (or "build") is a `Spec`
/// whose `pkg` carries a concrete `Build`, paired with the digest of the
/// `strata-fs` layer that holds its installed files.
pub trait Repository {
    /// A short name for this repository, used in diagnostics and to
    /// attribute a solved package to the repository it came from.
    fn name(&self) -> &str;

    fn list_package_names(&self) -> Result<Vec<strata_pkg_foundation::name::PkgNameBuf>>;

    /// Every version this repository holds a recipe or at least one build
    /// for, most recent first.
    fn list_package_versions(&self, name: &PkgName) -> Result<Vec<Version>>;

    /// Every build published for `name` at `version`, in no particular
    /// order; callers that need determinism should sort.
    fn list_package_builds(&self, name: &PkgName, version: &Version) -> Result<Vec<Build>>;

    fn read_recipe(&self, name: &PkgName, version: &Version) -> Result<Spec>;

    fn read_package(&self, ident: &Ident) -> Result<Spec>;

    /// The digest of the `strata-fs` layer holding `ident`'s installed
    /// files. Fails if `ident` is not a published build.
    fn read_package_layer(&self, ident: &Ident) -> Result<Digest>;

    fn publish_recipe(&self, spec: &Spec) -> Result<()>;

    /// Associate a concrete build `spec` (whose `pkg.build` is `Some`) with
    /// the digest of an already-committed `strata-fs` layer.
    fn publish_package(&self, spec: &Spec, layer: Digest) -> Result<()>;

    fn remove_recipe(&self, name: &PkgName, version: &Version) -> Result<()>;

    fn remove_package(&self, ident: &Ident) -> Result<()>;

    fn has_package(&self, ident: &Ident) -> bool {
        self.read_package(ident).is_ok()
    }
}

#[cfg(test)]
#[path = "./repository_test.rs"]
mod repository_test;
