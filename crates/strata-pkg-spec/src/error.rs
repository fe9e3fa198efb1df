// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

use thiserror::Error;

#[derive(Debug, Error, miette::Diagnostic)]
pub enum Error {
    #[error(transparent)]
    Foundation(#[from] strata_pkg_foundation::Error),

    #[error(transparent)]
    Ident(#[from] strata_pkg_ident::Error),

    #[error("invalid package spec: {0}")]
    InvalidSpec(#[source] serde_yaml::Error),

    #[error("option '{name}' given invalid value '{value}': {reason}")]
    InvalidOptionValue {
        name: String,
        value: String,
        reason: String,
    },

    #[error("'{name}' is not a known build option of this package")]
    UnknownOption { name: String },

    #[error("{0}")]
    String(String),
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::String(value)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
