// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

//! The search tree the solver builds as it explores candidates, kept
//! around after a solve (successful or not) for diagnosis.
//!
//! Nodes are arena-indexed rather than linked by owning parent/child
//! pointers: a [`Decision`] only ever refers to other nodes by their index
//! into the owning [`DecisionTree`]'s `Vec`, so the tree can grow during a
//! recursive search without any node borrowing another mutably.
//!
//! A node's state (its accumulated requests, its resolved packages) is
//! never stored flattened: every query (`merged_request`, `solution`, ...)
//! walks the chain of ancestors from the root down to the node in
//! question and folds as it goes. This is what spec.md's §9 design note on
//! "per-call memoization" asks for: nothing is cached on mutation, so
//! nothing can go stale when a sibling branch is explored afterward.

use indexmap::IndexSet;
use strata_pkg_foundation::name::{PkgName, PkgNameBuf};
use strata_pkg_ident::request::merge_pkg_requests;
use strata_pkg_ident::{Ident, PkgRequest, Request};
use strata_pkg_spec::Spec;

use crate::error::SolverError;
use crate::package_iterator::PackageIterator;
use crate::solution::{PackageSource, SolvedPackage, Solution};

/// One package this decision resolved: either the package a request
/// targeted, or one its spec declares as `install.embedded`.
#[derive(Debug, Clone)]
pub struct ResolvedPackage {
    pub name: PkgNameBuf,
    pub request: PkgRequest,
    pub spec: Spec,
    pub source: PackageSource,
}

/// One node in the search: the requests it added, the packages it
/// resolved (the one its branch targeted, plus anything embedded by that
/// spec), the names it invalidated, and whichever error closed the branch
/// off, if it dead-ended.
#[derive(Debug, Default)]
pub struct Decision {
    pub parent: Option<usize>,
    pub children: Vec<usize>,
    /// Requests added at this node, in the order they were added.
    pub requests: Vec<Request>,
    /// Packages this node resolved.
    pub resolved: Vec<ResolvedPackage>,
    /// Names whose previously-resolved package this decision invalidated,
    /// because a newly added request no longer matched it.
    pub unresolved: Vec<PkgNameBuf>,
    /// Set once every candidate beneath this node has been exhausted
    /// without reaching a solution.
    pub error: Option<SolverError>,
    /// Package iterators whose cursor position is pinned as of this node;
    /// a node without its own entry for a name inherits its nearest
    /// ancestor's cursor (see [`DecisionTree::iterator`]).
    iterators: Vec<(PkgNameBuf, PackageIterator)>,
}

impl Decision {
    fn child(parent: usize) -> Self {
        Self {
            parent: Some(parent),
            ..Default::default()
        }
    }
}

/// An arena of [`Decision`]s, rooted at index `0`.
#[derive(Debug, Default)]
pub struct DecisionTree {
    nodes: Vec<Decision>,
}

impl DecisionTree {
    /// A tree containing just its root node.
    pub fn new() -> Self {
        Self {
            nodes: vec![Decision::default()],
        }
    }

    pub fn root(&self) -> usize {
        0
    }

    pub fn get(&self, index: usize) -> &Decision {
        &self.nodes[index]
    }

    fn get_mut(&mut self, index: usize) -> &mut Decision {
        &mut self.nodes[index]
    }

    /// Add a new child of `parent`, returning its index.
    pub fn add_child(&mut self, parent: usize) -> usize {
        let index = self.nodes.len();
        self.nodes.push(Decision::child(parent));
        self.nodes[parent].children.push(index);
        index
    }

    /// The path from the root to `index`, root first.
    fn ancestry(&self, index: usize) -> Vec<usize> {
        let mut path = Vec::new();
        let mut cur = Some(index);
        while let Some(i) = cur {
            path.push(i);
            cur = self.nodes[i].parent;
        }
        path.reverse();
        path
    }

    /// Record a new request at `index`. If a package with this name is
    /// already resolved in `index`'s current solution but no longer
    /// satisfies the new request, the name is marked unresolved: the next
    /// call to [`Self::next_request`] will ask the solver to pick a new
    /// build for it.
    pub fn add_request(&mut self, index: usize, request: Request) {
        if let Request::Pkg(pkg) = &request {
            let solution = self.solution(index);
            if let Some(solved) = solution.get(&pkg.name) {
                if !pkg.is_satisfied_by(&solved.spec.pkg) {
                    self.add_unresolved(index, pkg.name.clone());
                }
            }
        }
        self.get_mut(index).requests.push(request);
    }

    pub fn add_resolved(&mut self, index: usize, resolved: ResolvedPackage) {
        self.get_mut(index).resolved.push(resolved);
    }

    pub fn add_unresolved(&mut self, index: usize, name: PkgNameBuf) {
        self.get_mut(index).unresolved.push(name);
    }

    pub fn set_error(&mut self, index: usize, error: SolverError) {
        self.get_mut(index).error = Some(error);
    }

    /// Every request added for `name` from the root down to (and
    /// including) `index`, in that order.
    pub fn package_requests(&self, index: usize, name: &PkgName) -> Vec<PkgRequest> {
        let mut requests = Vec::new();
        for &node in &self.ancestry(index) {
            for request in &self.nodes[node].requests {
                if let Request::Pkg(pkg) = request {
                    if pkg.name.as_str() == name.as_str() {
                        requests.push(pkg.clone());
                    }
                }
            }
        }
        requests
    }

    /// Every distinct package name requested anywhere from the root down
    /// to `index`, in the order each name was first requested.
    pub fn requested_names(&self, index: usize) -> IndexSet<PkgNameBuf> {
        let mut names = IndexSet::new();
        for &node in &self.ancestry(index) {
            for request in &self.nodes[node].requests {
                if let Request::Pkg(pkg) = request {
                    names.insert(pkg.name.clone());
                }
            }
        }
        names
    }

    /// Fold every request for `name` up to `index` into one request,
    /// failing if they have no common satisfaction.
    pub fn merged_request(
        &self,
        index: usize,
        name: &PkgName,
    ) -> std::result::Result<Option<PkgRequest>, SolverError> {
        let requests = self.package_requests(index, name);
        if requests.is_empty() {
            return Ok(None);
        }
        Ok(Some(merge_pkg_requests(&requests)?))
    }

    /// The full set of resolved packages at `index`: every ancestor's
    /// resolutions folded in root-to-leaf order, with each node's
    /// `unresolved` names removed before its own resolutions are applied
    /// (so a decision can invalidate a parent's pick and immediately
    /// replace it).
    pub fn solution(&self, index: usize) -> Solution {
        let mut solution = Solution::new();
        for &node in &self.ancestry(index) {
            for name in &self.nodes[node].unresolved {
                solution.remove(name);
            }
            for resolved in &self.nodes[node].resolved {
                solution.insert(
                    resolved.name.clone(),
                    SolvedPackage {
                        request: resolved.request.clone(),
                        spec: resolved.spec.clone(),
                        source: resolved.source.clone(),
                    },
                );
            }
        }
        solution
    }

    /// The next request this state must resolve: the first requested name
    /// (in request order) that is not yet satisfied in the current
    /// solution and whose merged inclusion policy is `Always`. Returns
    /// `None` when every unresolved request is merely `IfAlreadyPresent`
    /// (or there are none) — both cases make `index` a leaf.
    pub fn next_request(
        &self,
        index: usize,
    ) -> std::result::Result<Option<PkgRequest>, SolverError> {
        let names = self.requested_names(index);
        let solution = self.solution(index);
        for name in names {
            let Some(merged) = self.merged_request(index, &name)? else {
                continue;
            };
            let satisfied = solution
                .get(&name)
                .is_some_and(|solved| merged.is_satisfied_by(&solved.spec.pkg));
            if satisfied {
                continue;
            }
            if merged.inclusion_policy == strata_pkg_ident::InclusionPolicy::Always {
                return Ok(Some(merged));
            }
        }
        Ok(None)
    }

    /// The package iterator in effect for `name` as of `index`: its own,
    /// if this node has advanced one; otherwise the nearest ancestor's.
    pub fn iterator(&self, index: usize, name: &PkgNameBuf) -> Option<PackageIterator> {
        for &node in self.ancestry(index).iter().rev() {
            if let Some((_, it)) = self.nodes[node]
                .iterators
                .iter()
                .find(|(n, _)| n == name)
            {
                return Some(it.clone());
            }
        }
        None
    }

    /// Pin `iterator`'s cursor position as `name`'s state at `index`.
    pub fn set_iterator(&mut self, index: usize, name: PkgNameBuf, iterator: PackageIterator) {
        let node = self.get_mut(index);
        if let Some(slot) = node.iterators.iter_mut().find(|(n, _)| n == &name) {
            slot.1 = iterator;
        } else {
            node.iterators.push((name, iterator));
        }
    }

    /// Visit every node in preorder (a node before its children, children
    /// in the order they were added).
    pub fn preorder(&self) -> Vec<usize> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root()];
        while let Some(index) = stack.pop() {
            out.push(index);
            for &child in self.nodes[index].children.iter().rev() {
                stack.push(child);
            }
        }
        out
    }

    /// Walk the rightmost (most recently tried) branch from the root,
    /// collecting every node's error along the way, stopping once a node
    /// has no children left to descend into. This is the branch the
    /// search was exploring when it gave up, so its errors are the most
    /// relevant diagnosis of the overall failure.
    pub fn get_error_chain(&self) -> Vec<&SolverError> {
        let mut chain = Vec::new();
        let mut index = self.root();
        loop {
            if let Some(error) = &self.nodes[index].error {
                chain.push(error);
            }
            match self.nodes[index].children.last() {
                Some(&child) => index = child,
                None => break,
            }
        }
        chain
    }
}

#[cfg(test)]
#[path = "./decision_test.rs"]
mod decision_test;
