// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

//! The backtracking dependency solver: resolves a set of package and
//! variable requests against one or more `strata-pkg-storage` repositories
//! into a [`Solution`], retaining the [`DecisionTree`] it explored for
//! diagnosis when no solution exists.
//!
//! The search is depth-first with backtracking (see [`Solver::solve`]):
//! at each step it picks the next unresolved request with an `Always`
//! inclusion policy, tries each candidate build in descending version
//! order, and recurses. A candidate's own install requirements become new
//! requests on the child decision it created; if those requests conflict
//! with an already-resolved package, that package is marked unresolved and
//! picked again later. A branch with no viable candidate records the
//! [`SolverError`] that closed it and the search backs out to try the next
//! candidate at the parent.

mod decision;
mod error;
mod package_iterator;
mod solution;
mod solver;

pub use decision::{Decision, DecisionTree, ResolvedPackage};
pub use error::{Error, RejectedCandidate, Result, SolverError, UnresolvedPackageError};
pub use package_iterator::{Candidate, PackageIterator};
pub use solution::{PackageSource, SolvedPackage, Solution};
pub use solver::Solver;
