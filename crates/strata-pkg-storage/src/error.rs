// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

use strata_pkg_foundation::name::PkgNameBuf;
use strata_pkg_foundation::version::Version;
use strata_pkg_ident::Ident;
use thiserror::Error;

#[derive(Debug, Error, miette::Diagnostic)]
pub enum Error {
    #[error(transparent)]
    Foundation(#[from] strata_pkg_foundation::Error),
    #[error(transparent)]
    Ident(#[from] strata_pkg_ident::Error),
    #[error(transparent)]
    Spec(#[from] strata_pkg_spec::Error),
    #[error(transparent)]
    Fs(#[from] strata_fs::Error),
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A recipe for `name/version` already exists and publishing did not
    /// request an overwrite.
    #[error("version exists: {name}/{version}")]
    VersionExists { name: PkgNameBuf, version: Version },

    /// Neither a recipe nor any build could be found for the given name,
    /// version, or ident.
    #[error("package not found: {0}")]
    PackageNotFound(String),

    /// `publish_package` was asked to associate an ident with a build layer
    /// digest but the ident carries no concrete [`Build`](strata_pkg_foundation::ident_build::Build).
    #[error("cannot publish '{0}' as a build: it has no build identifier")]
    NotABuild(Ident),

    #[error("{0}")]
    String(String),
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::String(value)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
