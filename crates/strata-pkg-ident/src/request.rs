// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

//! Requests the solver tries to satisfy: a package version/build constraint
//! ([`PkgRequest`]) or a build option constraint ([`VarRequest`]).

use std::collections::BTreeSet;
use std::fmt;

use strata_pkg_foundation::ident_build::Build;
use strata_pkg_foundation::ident_component::Component;
use strata_pkg_foundation::name::{OptNameBuf, PkgNameBuf};
use strata_pkg_foundation::option_map::OptionMap;
use strata_pkg_foundation::version_range::{VersionFilter, VersionRange};

use crate::ident::Ident;
use crate::{Error, Result};

/// Whether a request must be satisfied for the solve to succeed, or only
/// constrains the package if something else already pulled it in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum InclusionPolicy {
    IfAlreadyPresent,
    Always,
}

impl Default for InclusionPolicy {
    fn default() -> Self {
        Self::Always
    }
}

impl fmt::Display for InclusionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InclusionPolicy::Always => f.write_str("Always"),
            InclusionPolicy::IfAlreadyPresent => f.write_str("IfAlreadyPresent"),
        }
    }
}

/// Whether pre-release versions are acceptable candidates for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreReleasePolicy {
    ExcludeAll,
    IncludeAll,
}

impl Default for PreReleasePolicy {
    fn default() -> Self {
        Self::ExcludeAll
    }
}

impl PreReleasePolicy {
    /// Merging two requests' prerelease policies is the stricter of the
    /// two: if either excludes prereleases, the merged request does too.
    fn merge(self, other: Self) -> Self {
        if self == Self::ExcludeAll || other == Self::ExcludeAll {
            Self::ExcludeAll
        } else {
            Self::IncludeAll
        }
    }
}

/// Identifies what part of the solve introduced a request, for diagnostics
/// (`UnresolvedPackageError.history` in spec terms).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RequestedBy {
    CommandLine,
    Package(Ident),
    Unknown,
}

impl fmt::Display for RequestedBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestedBy::CommandLine => f.write_str("command line"),
            RequestedBy::Package(ident) => write!(f, "{ident}"),
            RequestedBy::Unknown => f.write_str("unknown"),
        }
    }
}

/// A request for a build option to hold a specific value, optionally
/// namespaced to one package's options (`python.abi`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarRequest {
    pub name: OptNameBuf,
    pub value: String,
}

impl VarRequest {
    pub fn new(name: OptNameBuf, value: impl Into<String>) -> Self {
        Self {
            name,
            value: value.into(),
        }
    }

    pub fn is_satisfied_by(&self, options: &OptionMap) -> bool {
        options.get(&self.name) == Some(self.value.as_str())
    }
}

impl fmt::Display for VarRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

/// A desired package and the constraints on which build may satisfy it.
#[derive(Debug, Clone)]
pub struct PkgRequest {
    pub name: PkgNameBuf,
    pub range: VersionFilter,
    pub build: Option<Build>,
    pub components: BTreeSet<Component>,
    pub inclusion_policy: InclusionPolicy,
    pub prerelease_policy: PreReleasePolicy,
    pub requested_by: Vec<RequestedBy>,
}

impl PkgRequest {
    pub fn new(name: PkgNameBuf, range: VersionFilter, requester: RequestedBy) -> Self {
        Self {
            name,
            range,
            build: None,
            components: BTreeSet::new(),
            inclusion_policy: InclusionPolicy::default(),
            prerelease_policy: PreReleasePolicy::default(),
            requested_by: vec![requester],
        }
    }

    /// A request that matches exactly one already-resolved ident, used when
    /// injecting a request for an embedded package.
    pub fn from_ident(ident: &Ident, requester: RequestedBy) -> Self {
        let mut req = Self::new(
            ident.name.clone(),
            VersionFilter::single(VersionRange::Equals(ident.version.clone())),
            requester,
        );
        req.build = ident.build.clone();
        req
    }

    pub fn with_inclusion(mut self, policy: InclusionPolicy) -> Self {
        self.inclusion_policy = policy;
        self
    }

    pub fn with_prerelease(mut self, policy: PreReleasePolicy) -> Self {
        self.prerelease_policy = policy;
        self
    }

    pub fn is_version_applicable(&self, version: &strata_pkg_foundation::version::Version) -> bool {
        if self.prerelease_policy == PreReleasePolicy::ExcludeAll && !version.pre.is_empty() {
            return false;
        }
        self.range.is_satisfied(version)
    }

    pub fn is_satisfied_by(&self, ident: &Ident) -> bool {
        if self.name != ident.name {
            return false;
        }
        if !self.is_version_applicable(&ident.version) {
            return false;
        }
        match (&self.build, &ident.build) {
            (Some(wanted), Some(actual)) => wanted == actual,
            (Some(_), None) => false,
            (None, _) => true,
        }
    }

    /// Narrow this request to the intersection with `other`, combining
    /// version ranges, build constraints, components, and policies.
    pub fn restrict(&mut self, other: &PkgRequest) -> Result<()> {
        if self.name != other.name {
            return Err(Error::String(format!(
                "cannot restrict request for '{}' with request for '{}'",
                self.name, other.name
            )));
        }
        self.range = self.range.intersect(&other.range).map_err(|err| {
            Error::ConflictingRequests {
                name: self.name.clone(),
                message: err.to_string(),
                requests: vec![self.range.to_string(), other.range.to_string()],
            }
        })?;
        match (&self.build, &other.build) {
            (Some(a), Some(b)) if a != b => {
                return Err(Error::ConflictingRequests {
                    name: self.name.clone(),
                    message: format!("incompatible build constraints: {a} != {b}"),
                    requests: vec![a.to_string(), b.to_string()],
                });
            }
            (None, Some(b)) => self.build = Some(b.clone()),
            _ => {}
        }
        self.components.extend(other.components.iter().cloned());
        self.inclusion_policy = self.inclusion_policy.max(other.inclusion_policy);
        self.prerelease_policy = self.prerelease_policy.merge(other.prerelease_policy);
        self.requested_by.extend(other.requested_by.iter().cloned());
        Ok(())
    }
}

impl fmt::Display for PkgRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name, self.range)
    }
}

/// A request for either a package or a build option.
#[derive(Debug, Clone)]
pub enum Request {
    Pkg(PkgRequest),
    Var(VarRequest),
}

impl Request {
    pub fn as_pkg(&self) -> Option<&PkgRequest> {
        match self {
            Request::Pkg(req) => Some(req),
            Request::Var(_) => None,
        }
    }

    pub fn as_var(&self) -> Option<&VarRequest> {
        match self {
            Request::Var(req) => Some(req),
            Request::Pkg(_) => None,
        }
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Request::Pkg(req) => req.fmt(f),
            Request::Var(req) => req.fmt(f),
        }
    }
}

impl From<PkgRequest> for Request {
    fn from(req: PkgRequest) -> Self {
        Request::Pkg(req)
    }
}

impl From<VarRequest> for Request {
    fn from(req: VarRequest) -> Self {
        Request::Var(req)
    }
}

/// Fold a non-empty set of requests for the same package into one merged
/// request, failing with [`Error::ConflictingRequests`] on an empty
/// intersection.
pub fn merge_pkg_requests(requests: &[PkgRequest]) -> Result<PkgRequest> {
    let mut iter = requests.iter();
    let first = iter
        .next()
        .ok_or_else(|| Error::String("cannot merge an empty set of requests".to_string()))?;
    let mut merged = first.clone();
    for next in iter {
        merged.restrict(next)?;
    }
    Ok(merged)
}

#[cfg(test)]
#[path = "./request_test.rs"]
mod request_test;
