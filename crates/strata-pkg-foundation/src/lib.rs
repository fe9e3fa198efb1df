// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

//! Core SPK value types shared by every higher layer: validated package and
//! option names, dotted [`version::Version`] numbers, [`version_range`]
//! constraints used in requests, order-independent [`option_map::OptionMap`]
//! digests, build identifiers ([`ident_build`]), and named install
//! components ([`ident_component`]).

mod error;
pub mod ident_build;
pub mod ident_component;
pub mod name;
pub mod option_map;
pub mod version;
pub mod version_range;

pub use error::{Error, Result};
