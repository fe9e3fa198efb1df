// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

//! The content-addressed object graph: canonical encoding, the five object
//! kinds, and the database contract that stores them.

mod blob;
mod database;
pub mod encoding;
mod kind;
mod layer;
mod manifest;
mod object;
mod platform;
mod tree;

pub use blob::Blob;
pub use database::{Database, DigestSearchCriteria};
pub use kind::{Kind, ObjectKind};
pub use layer::Layer;
pub use manifest::Manifest;
pub use object::Object;
pub use platform::Platform;
pub use tree::{Entry, EntryKind, Tree};
