// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

use strata_pkg_foundation::name::PkgNameBuf;
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
    Storage(#[from] strata_pkg_storage::Error),

    #[error(transparent)]
    Solver(#[from] SolverError),

    /// The caller's cancellation check returned `true` mid-search.
    #[error("solve cancelled")]
    Cancelled,

    #[error("{0}")]
    String(String),
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::String(value)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// One candidate build the solver tried for a package and the reason it
/// was passed over, kept for `UnresolvedPackageError::history`.
#[derive(Debug, Clone)]
pub struct RejectedCandidate {
    pub ident: String,
    pub reason: String,
}

/// A request could not be satisfied by any candidate offered by the
/// repositories searched; `history` records every build that was tried and
/// why it was rejected, in the order the solver tried them.
#[derive(Debug, Clone, Error)]
#[error("failed to resolve '{name}': out of options")]
pub struct UnresolvedPackageError {
    pub name: PkgNameBuf,
    pub history: Vec<RejectedCandidate>,
}

/// The diagnostic a dead-end [`crate::Decision`] carries: either two
/// requests for the same package turned out to have no common
/// satisfaction, or every candidate build for the chosen package was
/// rejected.
#[derive(Debug, Clone, Error)]
pub enum SolverError {
    #[error("conflicting requests for '{name}': {message}")]
    ConflictingRequests {
        name: PkgNameBuf,
        message: String,
        requests: Vec<String>,
    },
    #[error(transparent)]
    Unresolved(#[from] UnresolvedPackageError),
}

impl From<strata_pkg_ident::Error> for SolverError {
    fn from(value: strata_pkg_ident::Error) -> Self {
        match value {
            strata_pkg_ident::Error::ConflictingRequests {
                name,
                message,
                requests,
            } => SolverError::ConflictingRequests {
                name,
                message,
                requests,
            },
            other => SolverError::ConflictingRequests {
                name: PkgNameBuf::new("unknown").expect("'unknown' is a valid package name"),
                message: other.to_string(),
                requests: Vec::new(),
            },
        }
    }
}
