// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

//! An ordered, order-independent map of build option names to values,
//! whose digest identifies one concrete build configuration.

use std::collections::BTreeMap;
use std::fmt;

use data_encoding::BASE32;
use ring::digest::{Context, SHA1_FOR_LEGACY_USE_ONLY};
use serde::{Deserialize, Serialize};

use crate::name::OptNameBuf;

/// Number of base32 characters kept from the option digest; short enough to
/// be readable in a build identifier, long enough that collisions within one
/// package's namespace are vanishingly unlikely.
const DIGEST_SIZE: usize = 8;

/// A sorted map of option name to its resolved value for one build.
#[derive(Debug, Default, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionMap(BTreeMap<OptNameBuf, String>);

impl OptionMap {
    pub fn insert(&mut self, name: OptNameBuf, value: impl Into<String>) -> Option<String> {
        self.0.insert(name, value.into())
    }

    pub fn get(&self, name: &OptNameBuf) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&OptNameBuf, &String)> {
        self.0.iter()
    }

    /// The 8-character base32 build digest for this option map: SHA1 over
    /// `name=value\0` triples in sorted-name order (sorting is free, the map
    /// is already a `BTreeMap`), so insertion order never affects the digest.
    pub fn digest(&self) -> String {
        let mut ctx = Context::new(&SHA1_FOR_LEGACY_USE_ONLY);
        for (name, value) in self.0.iter() {
            ctx.update(name.as_str().as_bytes());
            ctx.update(b"=");
            ctx.update(value.as_bytes());
            ctx.update(b"\0");
        }
        let hash = ctx.finish();
        BASE32.encode(hash.as_ref())[..DIGEST_SIZE].to_string()
    }
}

impl FromIterator<(OptNameBuf, String)> for OptionMap {
    fn from_iter<T: IntoIterator<Item = (OptNameBuf, String)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for OptionMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{{}}}",
            self.0
                .iter()
                .map(|(k, v)| format!("{k}: {v}"))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

#[cfg(test)]
#[path = "./option_map_test.rs"]
mod option_map_test;
