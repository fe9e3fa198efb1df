// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

//! Named install artifacts a package can expose (`run`, `build`, `all`, or a
//! user-defined name) and requests can select a subset of.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use itertools::Itertools;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::name::PkgNameBuf;
use crate::Result;

/// Identifies one named component of a package's install artifacts.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Component {
    All,
    Build,
    Run,
    Source,
    Named(String),
}

impl Component {
    pub fn parse(source: &str) -> Result<Self> {
        // Components share a package's naming rules.
        let _ = PkgNameBuf::new(source)?;
        Ok(match source {
            "all" => Self::All,
            "run" => Self::Run,
            "build" => Self::Build,
            "src" => Self::Source,
            _ => Self::Named(source.to_string()),
        })
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::All => "all",
            Self::Run => "run",
            Self::Build => "build",
            Self::Source => "src",
            Self::Named(name) => name,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Component {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self> {
        Component::parse(s)
    }
}

impl Serialize for Component {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Component {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Component::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// A set of requested or declared components, rendered as `:name` for one
/// entry or `:{a,b}` for several; an empty set renders as nothing.
pub fn format_component_set<'a>(components: impl IntoIterator<Item = &'a Component>) -> String {
    let names: Vec<&str> = components.into_iter().map(Component::as_str).collect();
    match names.len() {
        0 => String::new(),
        1 => format!(":{}", names[0]),
        _ => format!(":{{{}}}", names.iter().join(",")),
    }
}

/// Expand a request's component set: `all` stands in for every component a
/// package actually declares.
pub fn resolve_requested_components<'a>(
    requested: &'a BTreeSet<Component>,
    available: &'a BTreeSet<Component>,
) -> BTreeSet<&'a Component> {
    if requested.iter().any(Component::is_all) {
        return available.iter().collect();
    }
    requested.iter().collect()
}

#[cfg(test)]
#[path = "./ident_component_test.rs"]
mod ident_component_test;
