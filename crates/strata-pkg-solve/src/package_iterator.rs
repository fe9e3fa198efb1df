// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

//! A cheap-clone cursor over every published build of one package name,
//! across a fixed set of repositories, in descending version order.

use std::rc::Rc;

use strata_pkg_foundation::name::PkgName;
use strata_pkg_ident::Ident;
use strata_pkg_spec::Spec;
use strata_pkg_storage::Repository;

use crate::Result;

/// One build offered by a repository: the identifier and spec the solver
/// can resolve a request to, plus the name of the repository it came from
/// (attributed in the eventual [`crate::ResolvedPackage::source`]).
#[derive(Debug, Clone)]
pub struct Candidate {
    pub ident: Ident,
    pub spec: Spec,
    pub repo_name: String,
}

/// A stateful, order-preserving view over every candidate build for one
/// package name.
///
/// Candidates are computed once, up front, and shared (via `Rc`) between
/// every clone of the iterator; only the cursor position is per-clone.
/// A child decision that inherits its parent's cursor therefore never
/// reconsiders a build the parent already rejected, which is what keeps
/// the search from looping.
#[derive(Debug, Clone)]
pub struct PackageIterator {
    candidates: Rc<Vec<Candidate>>,
    position: usize,
}

impl PackageIterator {
    /// Build an iterator over every build of `name` known to `repos`,
    /// highest version first; builds tied on version are ordered by
    /// repository precedence (the order `repos` were given in), then by
    /// build identifier for determinism.
    pub fn new(name: &PkgName, repos: &[&dyn Repository]) -> Result<Self> {
        let mut candidates = Vec::new();
        for repo in repos {
            for version in repo.list_package_versions(name)? {
                let mut builds = repo.list_package_builds(name, &version)?;
                builds.sort();
                for build in builds {
                    let ident = Ident::new(name.to_owned(), version.clone()).with_build(build);
                    let spec = repo.read_package(&ident)?;
                    candidates.push(Candidate {
                        ident,
                        spec,
                        repo_name: repo.name().to_string(),
                    });
                }
            }
        }
        // `list_package_versions` already returns each repository's
        // versions newest-first; a stable sort keyed only on version
        // preserves that per-repository build order while still grouping
        // every repository's offering of the same version together.
        candidates.sort_by(|a, b| b.ident.version.cmp(&a.ident.version));
        Ok(Self {
            candidates: Rc::new(candidates),
            position: 0,
        })
    }

    pub fn from_candidates(candidates: Vec<Candidate>) -> Self {
        Self {
            candidates: Rc::new(candidates),
            position: 0,
        }
    }

    /// The candidate at the cursor, without consuming it.
    pub fn peek(&self) -> Option<&Candidate> {
        self.candidates.get(self.position)
    }

    /// Move the cursor past the current candidate.
    pub fn advance(&mut self) {
        self.position += 1;
    }

    pub fn is_exhausted(&self) -> bool {
        self.position >= self.candidates.len()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

#[cfg(test)]
#[path = "./package_iterator_test.rs"]
mod package_iterator_test;
