// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

use strata_pkg_foundation::name::PkgNameBuf;
use thiserror::Error;

#[derive(Debug, Error, miette::Diagnostic)]
pub enum Error {
    #[error(transparent)]
    Foundation(#[from] strata_pkg_foundation::Error),

    /// Two or more requests for the same package could not be reconciled
    /// into a single request; `requests` holds each contributing request's
    /// display form for diagnostics.
    #[error("conflicting requests for '{name}': {message}")]
    ConflictingRequests {
        name: PkgNameBuf,
        message: String,
        requests: Vec<String>,
    },

    #[error("{0}")]
    String(String),
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::String(value)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
