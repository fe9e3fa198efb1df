// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashMap;
use std::path::PathBuf;

use config::{Config as ConfigBase, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::storage::FsRepository;
use crate::Result;

static DEFAULT_STORAGE_ROOT: &str = ".local/share/strata";
static FALLBACK_STORAGE_ROOT: &str = "/tmp/strata";
static CONFIG_ENV_VAR: &str = "STRATA_CONFIG";
static ENV_PREFIX: &str = "STRATA";

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct Storage {
    pub root: PathBuf,
}

impl Default for Storage {
    fn default() -> Self {
        Self {
            root: dirs::home_dir()
                .map(|home| home.join(DEFAULT_STORAGE_ROOT))
                .unwrap_or_else(|| PathBuf::from(FALLBACK_STORAGE_ROOT)),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct Solver {
    /// Maximum number of build variants the solver will attempt for a
    /// single package before giving up and backtracking further.
    pub max_build_variants: usize,
    pub allow_prerelease: bool,
}

impl Default for Solver {
    fn default() -> Self {
        Self {
            max_build_variants: 25,
            allow_prerelease: false,
        }
    }
}

/// A single remote repository address, by name.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Remote {
    pub path: PathBuf,
}

/// Runtime configuration for a `strata-fs` repository and the solver that
/// consults it, loaded from defaults layered with an optional config file
/// and `STRATA_*` environment variables.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub storage: Storage,
    pub solver: Solver,
    pub remote: HashMap<String, Remote>,
}

impl Config {
    /// Load configuration from the default search path, falling back to
    /// built-in defaults when no config file is present.
    pub fn load() -> Result<Self> {
        let mut builder = ConfigBase::builder();
        if let Some(path) = Self::config_path() {
            if path.exists() {
                builder = builder.add_source(File::from(path));
            }
        }
        let builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).separator("_"));
        let loaded = builder.build()?;
        Ok(loaded.try_deserialize()?)
    }

    /// Load a configuration from an in-memory TOML string, primarily for
    /// tests.
    pub fn load_string(toml: &str) -> Result<Self> {
        let loaded = ConfigBase::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?;
        Ok(loaded.try_deserialize()?)
    }

    fn config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|dir| dir.join("strata").join("strata.toml"))
    }

    /// Open (creating if necessary) the local repository as configured.
    pub fn open_repository(&self) -> Result<FsRepository> {
        FsRepository::create(&self.storage.root)
    }

    /// Open a named remote repository.
    pub fn open_remote(&self, name: &str) -> Result<FsRepository> {
        match self.remote.get(name) {
            Some(remote) => FsRepository::create(&remote.path),
            None => Err(crate::Error::String(format!(
                "unknown remote repository: {name}"
            ))),
        }
    }
}

#[cfg(test)]
#[path = "./config_test.rs"]
mod config_test;
