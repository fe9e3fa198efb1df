// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

use strata_digest::Digest;
use thiserror::Error;

#[derive(Debug, Error, miette::Diagnostic)]
pub enum Error {
    #[error(transparent)]
    Digest(#[from] strata_digest::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
    #[error(transparent)]
    Config(#[from] config::ConfigError),

    /// Denotes a missing object or one that is not present in the database.
    #[error("unknown object: {0}")]
    UnknownObject(Digest),
    /// Denotes a reference (tag spec or digest prefix) that could not be resolved.
    #[error("unknown reference: {0}")]
    UnknownReference(String),
    /// Denotes a digest prefix that could refer to more than one object.
    #[error("ambiguous reference (too short): {0}")]
    AmbiguousReference(String),
    /// Denotes a ref that does not parse, or resolves to an object of the wrong kind.
    #[error("invalid reference '{reference}': {reason}")]
    InvalidRef { reference: String, reason: String },

    #[error("unsupported file at {0}: not a regular file, directory, or symlink")]
    UnsupportedFile(PathBuf),

    #[error("nothing to commit, resulting filesystem would be empty")]
    NothingToCommit,

    #[error("no active runtime")]
    NoRuntime,

    #[error("tag stream '{0}' has no entries")]
    UnknownTagStream(String),

    #[error("collection produced no changes or attempted to escape the source root: {0}")]
    Collection(String),

    #[error("{0}")]
    String(String),
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::String(value)
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Error::String(value.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
