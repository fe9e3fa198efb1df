// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

//! Package identifiers ([`Ident`]) and the requests ([`request::Request`])
//! the solver resolves against them.

mod error;
mod ident;
pub mod request;

pub use error::{Error, Result};
pub use ident::Ident;
pub use request::{
    InclusionPolicy, PkgRequest, PreReleasePolicy, Request, RequestedBy, VarRequest,
};
