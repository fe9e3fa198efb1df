// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

//! On-disk storage backends: the object database, the payload store, the
//! tag store, and the repository facades that bundle them together.

mod fs_repository;
mod hash_store;
mod object_db;
mod payload;
mod renderer;
mod repository;
mod tag;

pub use fs_repository::FsRepository;
pub use object_db::FsDatabase;
pub use payload::PayloadStore;
pub use renderer::{render_manifest, render_manifest_into_dir, RenderType};
pub use repository::Repository;
pub use tag::TagStorage;
