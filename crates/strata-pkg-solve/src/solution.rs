// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

//! A solver's final answer: every package it resolved, and which request
//! and repository (or embedding package) each came from.

use indexmap::IndexMap;
use strata_pkg_foundation::name::PkgNameBuf;
use strata_pkg_ident::{Ident, PkgRequest};
use strata_pkg_spec::Spec;

/// Where a resolved package's build was obtained from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageSource {
    /// Read directly from a named repository.
    Repository { repo_name: String },
    /// Not independently stored: declared in `install.embedded` by the
    /// package identified here, and resolved alongside it.
    Embedded { by: Ident },
}

/// One entry of a [`Solution`]: the request that was satisfied, the spec it
/// was satisfied by, and where that spec came from.
#[derive(Debug, Clone)]
pub struct SolvedPackage {
    pub request: PkgRequest,
    pub spec: Spec,
    pub source: PackageSource,
}

/// The ordered mapping of package name to resolved package the solver
/// produces. Order is insertion order (first resolved first), which is what
/// makes repeated solves of the same requests reproducible downstream (e.g.
/// generating environment variables or render order).
#[derive(Debug, Clone, Default)]
pub struct Solution {
    packages: IndexMap<PkgNameBuf, SolvedPackage>,
}

impl Solution {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: PkgNameBuf, solved: SolvedPackage) {
        self.packages.insert(name, solved);
    }

    pub fn remove(&mut self, name: &PkgNameBuf) {
        self.packages.shift_remove(name);
    }

    pub fn get(&self, name: &PkgNameBuf) -> Option<&SolvedPackage> {
        self.packages.get(name)
    }

    pub fn contains(&self, name: &PkgNameBuf) -> bool {
        self.packages.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PkgNameBuf, &SolvedPackage)> {
        self.packages.iter()
    }

    pub fn idents(&self) -> impl Iterator<Item = &Ident> {
        self.packages.values().map(|solved| &solved.spec.pkg)
    }
}

#[cfg(test)]
#[path = "./solution_test.rs"]
mod solution_test;
