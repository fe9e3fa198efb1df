// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

use std::path::{Path, PathBuf};

use strata_digest::Digest;
use strata_pkg_foundation::ident_build::Build;
use strata_pkg_foundation::name::{PkgName, PkgNameBuf};
use strata_pkg_foundation::version::Version;
use strata_pkg_ident::Ident;
use strata_pkg_spec::Spec;

use crate::repository::Repository;
use crate::{Error, Result};

const RECIPES_DIR: &str = "recipes";
const PACKAGES_DIR: &str = "packages";
const SPEC_EXT: &str = "spk.yaml";
const LAYER_EXT: &str = "layer";

/// A [`Repository`] rooted at a directory on the local filesystem.
///
/// Recipes live at `<root>/recipes/<name>/<version>.spk.yaml`; builds live
/// at `<root>/packages/<name>/<version>/<build>.spk.yaml` alongside a
/// sibling `.layer` file holding the hex digest of the `strata-fs` layer
/// that stores the build's installed files. This repository does not own
/// that layer's storage — a caller commits and renders layers through a
/// `strata-fs` repository of its own and passes the resulting digest to
/// [`Repository::publish_package`].
pub struct FsRepository {
    name: String,
    root: PathBuf,
}

impl FsRepository {
    pub fn create(name: impl Into<String>, root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        std::fs::create_dir_all(root.join(RECIPES_DIR))?;
        std::fs::create_dir_all(root.join(PACKAGES_DIR))?;
        Ok(Self {
            name: name.into(),
            root: root.to_path_buf(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn recipe_path(&self, name: &PkgName, version: &Version) -> PathBuf {
        self.root
            .join(RECIPES_DIR)
            .join(name.as_str())
            .join(format!("{version}.{SPEC_EXT}"))
    }

    fn build_dir(&self, name: &PkgName, version: &Version) -> PathBuf {
        self.root
            .join(PACKAGES_DIR)
            .join(name.as_str())
            .join(version.to_string())
    }

    fn spec_path(&self, name: &PkgName, version: &Version, build: &Build) -> PathBuf {
        self.build_dir(name, version)
            .join(format!("{}.{SPEC_EXT}", build.digest_str()))
    }

    fn layer_path(&self, name: &PkgName, version: &Version, build: &Build) -> PathBuf {
        self.build_dir(name, version)
            .join(format!("{}.{LAYER_EXT}", build.digest_str()))
    }

    fn write_atomic(path: &Path, contents: &str) -> Result<()> {
        std::fs::create_dir_all(path.parent().expect("path has a parent"))?;
        let tmp = path.with_extension(format!("{}.tmp", std::process::id()));
        std::fs::write(&tmp, contents)?;
        std::fs::rename(&tmp, path)?;
        Ok(())
    }
}

impl Repository for FsRepository {
    fn name(&self) -> &str {
        &self.name
    }

    fn list_package_names(&self) -> Result<Vec<PkgNameBuf>> {
        let mut names = Vec::new();
        for dir in [self.root.join(RECIPES_DIR), self.root.join(PACKAGES_DIR)] {
            if !dir.is_dir() {
                continue;
            }
            for entry in std::fs::read_dir(&dir)? {
                let entry = entry?;
                if entry.file_type()?.is_dir() {
                    if let Some(name) = entry.file_name().to_str() {
                        names.push(PkgNameBuf::new(name)?);
                    }
                }
            }
        }
        names.sort();
        names.dedup();
        Ok(names)
    }

    fn list_package_versions(&self, name: &PkgName) -> Result<Vec<Version>> {
        let mut versions = Vec::new();
        let recipe_dir = self.root.join(RECIPES_DIR).join(name.as_str());
        if recipe_dir.is_dir() {
            for entry in std::fs::read_dir(&recipe_dir)? {
                let entry = entry?;
                if let Some(stem) = entry.file_name().to_str().and_then(|n| n.strip_suffix(&format!(".{SPEC_EXT}"))) {
                    versions.push(stem.parse()?);
                }
            }
        }
        let package_dir = self.root.join(PACKAGES_DIR).join(name.as_str());
        if package_dir.is_dir() {
            for entry in std::fs::read_dir(&package_dir)? {
                let entry = entry?;
                if entry.file_type()?.is_dir() {
                    if let Some(version) = entry.file_name().to_str() {
                        versions.push(version.parse()?);
                    }
                }
            }
        }
        versions.sort();
        versions.dedup();
        versions.reverse();
        Ok(versions)
    }

    fn list_package_builds(&self, name: &PkgName, version: &Version) -> Result<Vec<Build>> {
        let dir = self.build_dir(name, version);
        if !dir.is_dir() {
            return Ok(Vec::new());
        }
        let mut builds = Vec::new();
        for entry in std::fs::read_dir(&dir)? {
            let entry = entry?;
            if let Some(stem) = entry
                .file_name()
                .to_str()
                .and_then(|n| n.strip_suffix(&format!(".{SPEC_EXT}")))
            {
                builds.push(stem.parse()?);
            }
        }
        Ok(builds)
    }

    fn read_recipe(&self, name: &PkgName, version: &Version) -> Result<Spec> {
        let path = self.recipe_path(name, version);
        let yaml = std::fs::read_to_string(&path)
            .map_err(|_| Error::PackageNotFound(format!("{name}/{version}")))?;
        Ok(Spec::from_yaml(&yaml)?)
    }

    fn read_package(&self, ident: &Ident) -> Result<Spec> {
        let build = ident
            .build
            .as_ref()
            .ok_or_else(|| Error::NotABuild(ident.clone()))?;
        let path = self.spec_path(&ident.name, &ident.version, build);
        let yaml = std::fs::read_to_string(&path)
            .map_err(|_| Error::PackageNotFound(ident.to_string()))?;
        Ok(Spec::from_yaml(&yaml)?)
    }

    fn read_package_layer(&self, ident: &Ident) -> Result<Digest> {
        let build = ident
            .build
            .as_ref()
            .ok_or_else(|| Error::NotABuild(ident.clone()))?;
        let path = self.layer_path(&ident.name, &ident.version, build);
        let hex = std::fs::read_to_string(&path)
            .map_err(|_| Error::PackageNotFound(ident.to_string()))?;
        Ok(Digest::parse(hex.trim())?)
    }

    fn publish_recipe(&self, spec: &Spec) -> Result<()> {
        if !spec.is_recipe() {
            return Err(Error::String(format!(
                "cannot publish '{}' as a recipe: it has a concrete build",
                spec.pkg
            )));
        }
        let path = self.recipe_path(&spec.pkg.name, &spec.pkg.version);
        if path.exists() {
            return Err(Error::VersionExists {
                name: spec.pkg.name.clone(),
                version: spec.pkg.version.clone(),
            });
        }
        Self::write_atomic(&path, &spec.to_yaml()?)
    }

    fn publish_package(&self, spec: &Spec, layer: Digest) -> Result<()> {
        let build = spec
            .pkg
            .build
            .clone()
            .ok_or_else(|| Error::NotABuild(spec.pkg.clone()))?;
        let spec_path = self.spec_path(&spec.pkg.name, &spec.pkg.version, &build);
        Self::write_atomic(&spec_path, &spec.to_yaml()?)?;
        let layer_path = self.layer_path(&spec.pkg.name, &spec.pkg.version, &build);
        Self::write_atomic(&layer_path, &layer.to_string())
    }

    fn remove_recipe(&self, name: &PkgName, version: &Version) -> Result<()> {
        let path = self.recipe_path(name, version);
        std::fs::remove_file(&path)
            .map_err(|_| Error::PackageNotFound(format!("{name}/{version}")))
    }

    fn remove_package(&self, ident: &Ident) -> Result<()> {
        let build = ident
            .build
            .as_ref()
            .ok_or_else(|| Error::NotABuild(ident.clone()))?;
        let spec_path = self.spec_path(&ident.name, &ident.version, build);
        std::fs::remove_file(&spec_path)
            .map_err(|_| Error::PackageNotFound(ident.to_string()))?;
        let _ = std::fs::remove_file(self.layer_path(&ident.name, &ident.version, build));
        Ok(())
    }
}

#[cfg(test)]
#[path = "./fs_repository_test.rs"]
mod fs_repository_test;
