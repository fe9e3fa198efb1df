// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

//! Package repositories: where the solver reads recipes and published
//! builds from, and where build tooling publishes them to.
//!
//! [`Repository`] is the contract; [`FsRepository`] backs it with a
//! directory of YAML spec files (pairing each build with the digest of the
//! `strata-fs` layer holding its installed files), and [`MemRepository`] is
//! an in-memory stand-in for tests.

mod error;
mod fs_repository;
mod mem_repository;
mod repository;

pub use error::{Error, Result};
pub use fs_repository::FsRepository;
pub use mem_repository::MemRepository;
pub use repository::Repository;
