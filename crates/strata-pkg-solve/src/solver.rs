// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

//! The depth-first, backtracking solver: drives a [`DecisionTree`] to a
//! leaf that satisfies every request, or exhausts every branch and reports
//! why.

use strata_pkg_ident::request::RequestedBy;
use strata_pkg_ident::{PkgRequest, Request};
use strata_pkg_storage::Repository;

use crate::decision::{DecisionTree, ResolvedPackage};
use crate::error::{RejectedCandidate, SolverError, UnresolvedPackageError};
use crate::package_iterator::{Candidate, PackageIterator};
use crate::solution::{PackageSource, Solution};
use crate::{Error, Result};

/// A backtracking dependency solver: a fixed set of repositories to read
/// candidates from, and the initial requests to satisfy.
pub struct Solver<'a> {
    repos: Vec<&'a dyn Repository>,
    requests: Vec<Request>,
}

impl<'a> Solver<'a> {
    pub fn new(repos: Vec<&'a dyn Repository>) -> Self {
        Self {
            repos,
            requests: Vec::new(),
        }
    }

    pub fn add_request(&mut self, request: impl Into<Request>) {
        self.requests.push(request.into());
    }

    /// Run the solve to completion, producing a [`Solution`] plus the
    /// [`DecisionTree`] that produced it (useful for rendering the
    /// REQUEST/RESOLVE/TRY trail even on success).
    pub fn solve(&self) -> Result<(Solution, DecisionTree)> {
        self.solve_cancellable(&|| false)
    }

    /// As [`Self::solve`], but `is_cancelled` is polled before every
    /// candidate attempt; if it ever returns `true` the search stops and
    /// no partial solution is returned.
    pub fn solve_cancellable(&self, is_cancelled: &dyn Fn() -> bool) -> Result<(Solution, DecisionTree)> {
        let mut tree = DecisionTree::new();
        let root = tree.root();
        for request in self.requests.iter().cloned() {
            tree.add_request(root, request);
        }
        tracing::debug!(count = self.requests.len(), "REQUEST initial requests");

        match self.solve_node(&mut tree, root, is_cancelled)? {
            Some(leaf) => Ok((tree.solution(leaf), tree)),
            None => {
                let chain: Vec<String> = tree
                    .get_error_chain()
                    .into_iter()
                    .map(ToString::to_string)
                    .collect();
                Err(Error::String(format!(
                    "Failed to resolve: {}",
                    if chain.is_empty() {
                        "no candidates were considered".to_string()
                    } else {
                        chain.join(" <- ")
                    }
                )))
            }
        }
    }

    /// Resolve `index`'s next open request by trying each of its
    /// candidates in turn, recursing into a child decision for each.
    /// Returns the index of the leaf decision that completed the solve, if
    /// any branch beneath `index` reaches one.
    fn solve_node(
        &self,
        tree: &mut DecisionTree,
        index: usize,
        is_cancelled: &dyn Fn() -> bool,
    ) -> Result<Option<usize>> {
        if is_cancelled() {
            return Err(Error::Cancelled);
        }

        let request = match tree.next_request(index) {
            Ok(request) => request,
            Err(err) => {
                tree.set_error(index, err);
                return Ok(None);
            }
        };
        let Some(request) = request else {
            tracing::debug!("solution complete");
            return Ok(Some(index));
        };
        tracing::debug!(pkg = %request.name, "REQUEST");

        let mut iterator = match tree.iterator(index, &request.name) {
            Some(iterator) => iterator,
            None => PackageIterator::new(&request.name, &self.repos)?,
        };

        let mut history = Vec::new();
        loop {
            if is_cancelled() {
                return Err(Error::Cancelled);
            }
            let Some(candidate) = iterator.peek().cloned() else {
                break;
            };
            iterator.advance();
            tracing::debug!(candidate = %candidate.ident, "TRY");

            let child = tree.add_child(index);
            tree.set_iterator(child, request.name.clone(), iterator.clone());

            match self.try_resolve(tree, child, &request, &candidate) {
                Ok(()) => {
                    tracing::debug!(pkg = %candidate.ident, "RESOLVE");
                    match self.solve_node(tree, child, is_cancelled)? {
                        Some(leaf) => return Ok(Some(leaf)),
                        None => {
                            let reason = tree
                                .get(child)
                                .error
                                .as_ref()
                                .map(ToString::to_string)
                                .unwrap_or_default();
                            tracing::debug!(candidate = %candidate.ident, reason = %reason, "BLOCKED");
                            history.push(RejectedCandidate {
                                ident: candidate.ident.to_string(),
                                reason,
                            });
                        }
                    }
                }
                Err(err) => {
                    tracing::debug!(candidate = %candidate.ident, reason = %err, "BLOCKED");
                    history.push(RejectedCandidate {
                        ident: candidate.ident.to_string(),
                        reason: err.to_string(),
                    });
                    tree.set_error(child, err);
                }
            }
        }

        tracing::debug!(pkg = %request.name, "UNRESOLVE");
        tree.set_error(
            index,
            SolverError::Unresolved(UnresolvedPackageError {
                name: request.name.clone(),
                history,
            }),
        );
        Ok(None)
    }

    /// Attempt to resolve `request` with `candidate` at `child`: check
    /// version/build compatibility, record the resolution, and queue the
    /// build's own install requirements (and any embedded packages) as new
    /// requests on `child`. Conflicts between those new requests and an
    /// already-resolved package surface later, the first time `child`'s
    /// `next_request` is computed — this only rejects outright-incompatible
    /// candidates.
    fn try_resolve(
        &self,
        tree: &mut DecisionTree,
        child: usize,
        request: &PkgRequest,
        candidate: &Candidate,
    ) -> std::result::Result<(), SolverError> {
        if !request.is_satisfied_by(&candidate.ident) {
            return Err(SolverError::Unresolved(UnresolvedPackageError {
                name: request.name.clone(),
                history: vec![RejectedCandidate {
                    ident: candidate.ident.to_string(),
                    reason: format!("does not satisfy request '{request}'"),
                }],
            }));
        }

        tree.add_resolved(
            child,
            ResolvedPackage {
                name: request.name.clone(),
                request: request.clone(),
                spec: candidate.spec.clone(),
                source: PackageSource::Repository {
                    repo_name: candidate.repo_name.clone(),
                },
            },
        );

        for requirement in candidate.spec.install.requirements.iter().cloned() {
            tree.add_request(child, requirement);
        }

        // Embedded packages are not stored independently: they are
        // resolved as soon as the embedding spec is, attributed to it
        // rather than to a repository.
        for embedded_ident in candidate.spec.install.embedded.iter().cloned() {
            let embedded_request = PkgRequest::from_ident(
                &embedded_ident,
                RequestedBy::Package(candidate.ident.clone()),
            );
            tree.add_request(child, Request::Pkg(embedded_request.clone()));

            let mut embedded_spec = candidate.spec.clone();
            embedded_spec.pkg = embedded_ident.clone();
            tree.add_resolved(
                child,
                ResolvedPackage {
                    name: embedded_ident.name.clone(),
                    request: embedded_request,
                    spec: embedded_spec,
                    source: PackageSource::Embedded {
                        by: candidate.ident.clone(),
                    },
                },
            );
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "./solver_test.rs"]
mod solver_test;
