// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

//! Version range constraints used by package requests: exact/inequality
//! bounds, caret ("compatible") ranges, and wildcards, combined into an
//! intersection ([`VersionFilter`]).

use std::fmt;
use std::str::FromStr;

use itertools::Itertools;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::version::Version;
use crate::{Error, Result};

/// A single version constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionRange {
    Any,
    Equals(Version),
    NotEquals(Version),
    GreaterThan(Version),
    GreaterThanOrEqualTo(Version),
    LessThan(Version),
    LessThanOrEqualTo(Version),
    /// `^1.2.3`: compatible with `1.2.3`, up to (excluding) the next
    /// backwards-incompatible version.
    Compatible(Version),
    /// `1.2.*`: each `Some` position must match exactly; `None` positions
    /// (the wildcard) are unconstrained.
    Wildcard(Vec<Option<u32>>),
}

/// The exclusive upper bound implied by a caret range: the next version
/// that a `^`-compatible build is not expected to remain compatible with.
fn next_incompatible(v: &Version) -> Version {
    let major = v.major();
    let minor = v.minor();
    if major > 0 {
        Version::new(major + 1, 0, 0)
    } else if minor > 0 {
        Version::new(0, minor + 1, 0)
    } else {
        Version::new(0, 0, v.patch() + 1)
    }
}

impl VersionRange {
    pub fn is_satisfied(&self, v: &Version) -> bool {
        match self {
            VersionRange::Any => true,
            VersionRange::Equals(e) => v == e,
            VersionRange::NotEquals(e) => v != e,
            VersionRange::GreaterThan(b) => v > b,
            VersionRange::GreaterThanOrEqualTo(b) => v >= b,
            VersionRange::LessThan(b) => v < b,
            VersionRange::LessThanOrEqualTo(b) => v <= b,
            VersionRange::Compatible(base) => v >= base && v < &next_incompatible(base),
            VersionRange::Wildcard(parts) => parts
                .iter()
                .enumerate()
                .all(|(i, p)| match p {
                    Some(expected) => v.parts.get(i).copied().unwrap_or(0) == *expected,
                    None => true,
                }),
        }
    }

    /// The inclusive-or-exclusive lower bound implied by this range, if any.
    fn lower_bound(&self) -> Option<(Version, bool)> {
        match self {
            VersionRange::GreaterThan(b) => Some((b.clone(), false)),
            VersionRange::GreaterThanOrEqualTo(b) => Some((b.clone(), true)),
            VersionRange::Compatible(b) => Some((b.clone(), true)),
            VersionRange::Equals(b) => Some((b.clone(), true)),
            _ => None,
        }
    }

    /// The inclusive-or-exclusive upper bound implied by this range, if any.
    fn upper_bound(&self) -> Option<(Version, bool)> {
        match self {
            VersionRange::LessThan(b) => Some((b.clone(), false)),
            VersionRange::LessThanOrEqualTo(b) => Some((b.clone(), true)),
            VersionRange::Compatible(b) => Some((next_incompatible(b), false)),
            VersionRange::Equals(b) => Some((b.clone(), true)),
            _ => None,
        }
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionRange::Any => f.write_str("*"),
            VersionRange::Equals(v) => write!(f, "={v}"),
            VersionRange::NotEquals(v) => write!(f, "!={v}"),
            VersionRange::GreaterThan(v) => write!(f, ">{v}"),
            VersionRange::GreaterThanOrEqualTo(v) => write!(f, ">={v}"),
            VersionRange::LessThan(v) => write!(f, "<{v}"),
            VersionRange::LessThanOrEqualTo(v) => write!(f, "<={v}"),
            VersionRange::Compatible(v) => write!(f, "^{v}"),
            VersionRange::Wildcard(parts) => write!(
                f,
                "{}",
                parts
                    .iter()
                    .map(|p| p.map(|n| n.to_string()).unwrap_or_else(|| "*".to_string()))
                    .join(".")
            ),
        }
    }
}

impl FromStr for VersionRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason: String| Error::InvalidVersionRange {
            range: s.to_string(),
            reason,
        };
        if s == "*" {
            return Ok(VersionRange::Any);
        }
        if s.contains('*') {
            let parts = s
                .split('.')
                .map(|p| if p == "*" { Ok(None) } else { p.parse().map(Some) })
                .collect::<std::result::Result<Vec<_>, _>>()
                .map_err(|_| invalid("wildcard parts must be integers or '*'".to_string()))?;
            return Ok(VersionRange::Wildcard(parts));
        }
        if let Some(rest) = s.strip_prefix(">=") {
            return Ok(VersionRange::GreaterThanOrEqualTo(rest.parse()?));
        }
        if let Some(rest) = s.strip_prefix("<=") {
            return Ok(VersionRange::LessThanOrEqualTo(rest.parse()?));
        }
        if let Some(rest) = s.strip_prefix("!=") {
            return Ok(VersionRange::NotEquals(rest.parse()?));
        }
        if let Some(rest) = s.strip_prefix('>') {
            return Ok(VersionRange::GreaterThan(rest.parse()?));
        }
        if let Some(rest) = s.strip_prefix('<') {
            return Ok(VersionRange::LessThan(rest.parse()?));
        }
        if let Some(rest) = s.strip_prefix('^') {
            return Ok(VersionRange::Compatible(rest.parse()?));
        }
        if let Some(rest) = s.strip_prefix('=') {
            return Ok(VersionRange::Equals(rest.parse()?));
        }
        Ok(VersionRange::Equals(s.parse()?))
    }
}

/// An intersection (logical AND) of one or more [`VersionRange`]s, as
/// written in a request (`>=1.0,<2.0`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionFilter(Vec<VersionRange>);

impl VersionFilter {
    pub fn single(range: VersionRange) -> Self {
        Self(vec![range])
    }

    pub fn any() -> Self {
        Self(vec![VersionRange::Any])
    }

    pub fn rules(&self) -> &[VersionRange] {
        &self.0
    }

    pub fn is_satisfied(&self, v: &Version) -> bool {
        self.0.iter().all(|r| r.is_satisfied(v))
    }

    /// Combine the effective lower/upper bounds of every rule; used to
    /// detect an empty intersection up front rather than only discovering
    /// it once every candidate version has been rejected.
    fn bounds(&self) -> (Option<(Version, bool)>, Option<(Version, bool)>) {
        let mut lower: Option<(Version, bool)> = None;
        let mut upper: Option<(Version, bool)> = None;
        for rule in &self.0 {
            if let Some((v, incl)) = rule.lower_bound() {
                lower = Some(match &lower {
                    Some((cur, cur_incl)) if *cur > v || (*cur == v && !*cur_incl) => {
                        (cur.clone(), *cur_incl)
                    }
                    _ => (v, incl),
                });
            }
            if let Some((v, incl)) = rule.upper_bound() {
                upper = Some(match &upper {
                    Some((cur, cur_incl)) if *cur < v || (*cur == v && !*cur_incl) => {
                        (cur.clone(), *cur_incl)
                    }
                    _ => (v, incl),
                });
            }
        }
        (lower, upper)
    }

    /// Intersect this filter with `other`, failing if the combination can
    /// never be satisfied by any version.
    pub fn intersect(&self, other: &VersionFilter) -> Result<VersionFilter> {
        let mut combined = self.0.clone();
        combined.extend(other.0.iter().cloned());
        let merged = VersionFilter(combined);
        let (lower, upper) = merged.bounds();
        if let (Some((lo, lo_incl)), Some((hi, hi_incl))) = (&lower, &upper) {
            let empty = match lo.cmp(hi) {
                std::cmp::Ordering::Greater => true,
                std::cmp::Ordering::Equal => !(*lo_incl && *hi_incl),
                std::cmp::Ordering::Less => false,
            };
            if empty {
                return Err(Error::String(format!(
                    "conflicting version ranges: '{self}' does not intersect '{other}'"
                )));
            }
        }
        Ok(merged)
    }
}

impl fmt::Display for VersionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.iter().join(","))
    }
}

impl FromStr for VersionFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Ok(VersionFilter::any());
        }
        let rules = s
            .split(',')
            .map(VersionRange::from_str)
            .collect::<Result<Vec<_>>>()?;
        Ok(VersionFilter(rules))
    }
}

impl Serialize for VersionFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for VersionFilter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        VersionFilter::from_str(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "./version_range_test.rs"]
mod version_range_test;
