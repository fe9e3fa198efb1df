// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

//! Validated package and option names.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

const MIN_LEN: usize = 1;
const MAX_LEN: usize = 64;

fn is_valid_pkg_name_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'
}

fn is_valid_opt_name_char(c: char) -> bool {
    is_valid_pkg_name_char(c) || c == '_'
}

fn validate(name: &str, allow: impl Fn(char) -> bool) -> Result<()> {
    if name.len() < MIN_LEN || name.len() > MAX_LEN {
        return Err(Error::InvalidName {
            name: name.to_string(),
            reason: format!("must be between {MIN_LEN} and {MAX_LEN} characters"),
        });
    }
    if name.starts_with('-') {
        return Err(Error::InvalidName {
            name: name.to_string(),
            reason: "must begin with a letter, not a hyphen".to_string(),
        });
    }
    if let Some(bad) = name.chars().find(|c| !allow(*c)) {
        return Err(Error::InvalidName {
            name: name.to_string(),
            reason: format!("invalid character '{bad}'"),
        });
    }
    Ok(())
}

macro_rules! name_type {
    ($owned:ident, $validator:expr, $what:literal) => {
        #[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
        #[doc = concat!("An owned, validated ", $what, " name.")]
        pub struct $owned(String);

        impl $owned {
            pub fn new(name: impl Into<String>) -> Result<Self> {
                let name = name.into();
                validate(&name, $validator)?;
                Ok(Self(name))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl FromStr for $owned {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                Self::new(s)
            }
        }

        impl TryFrom<String> for $owned {
            type Error = Error;

            fn try_from(s: String) -> Result<Self> {
                Self::new(s)
            }
        }

        impl TryFrom<&str> for $owned {
            type Error = Error;

            fn try_from(s: &str) -> Result<Self> {
                Self::new(s)
            }
        }

        impl fmt::Display for $owned {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $owned {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

name_type!(PkgNameBuf, is_valid_pkg_name_char, "package");
name_type!(OptNameBuf, is_valid_opt_name_char, "option");

impl PkgNameBuf {
    /// Every valid package name is also a valid option name (its namespace
    /// when referring to another package's build options, e.g. `python.abi`).
    pub fn as_opt_name(&self) -> OptNameBuf {
        OptNameBuf(self.0.clone())
    }
}

/// A borrowed, validated package name (`&PkgName`), the unsized companion
/// to [`PkgNameBuf`] the way `str` is to `String`.
#[derive(Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct PkgName(str);

impl PkgName {
    pub fn new(name: &str) -> Result<&Self> {
        validate(name, is_valid_pkg_name_char)?;
        // SAFETY: `PkgName` is a transparent wrapper around `str` and was
        // just validated above.
        Ok(unsafe { &*(name as *const str as *const Self) })
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for PkgName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PkgName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::ops::Deref for PkgNameBuf {
    type Target = PkgName;

    fn deref(&self) -> &PkgName {
        self.borrow()
    }
}

impl std::borrow::Borrow<PkgName> for PkgNameBuf {
    fn borrow(&self) -> &PkgName {
        // SAFETY: `PkgNameBuf`'s contents were validated at construction
        // with the same rules `PkgName` enforces.
        unsafe { &*(self.0.as_str() as *const str as *const PkgName) }
    }
}

impl std::borrow::ToOwned for PkgName {
    type Owned = PkgNameBuf;

    fn to_owned(&self) -> PkgNameBuf {
        PkgNameBuf(self.0.to_owned())
    }
}

impl PartialEq<PkgName> for PkgNameBuf {
    fn eq(&self, other: &PkgName) -> bool {
        self.0 == other.0
    }
}

impl PartialEq<PkgNameBuf> for PkgName {
    fn eq(&self, other: &PkgNameBuf) -> bool {
        self.0 == other.0
    }
}

impl<'a> TryFrom<&'a str> for &'a PkgName {
    type Error = Error;

    fn try_from(value: &'a str) -> Result<Self> {
        PkgName::new(value)
    }
}

#[cfg(test)]
#[path = "./name_test.rs"]
mod name_test;
