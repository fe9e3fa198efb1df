// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

//! Package spec files: a recipe's sources, build options and variants, and
//! install requirements, plus expansion of a recipe into concrete builds.

mod build_spec;
mod error;
mod install_spec;
pub mod option;
mod recipe;
pub mod source_spec;
mod spec;

pub use build_spec::BuildSpec;
pub use error::{Error, Result};
pub use install_spec::{ComponentSpec, InstallSpec};
pub use option::Opt;
pub use source_spec::SourceSpec;
pub use spec::Spec;
