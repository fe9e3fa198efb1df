// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;
use std::sync::RwLock;

use strata_digest::Digest;
use strata_pkg_foundation::ident_build::Build;
use strata_pkg_foundation::name::{PkgName, PkgNameBuf};
use strata_pkg_foundation::version::Version;
use strata_pkg_ident::Ident;
use strata_pkg_spec::Spec;

use crate::repository::Repository;
use crate::{Error, Result};

/// An in-memory [`Repository`], used by solver tests and anywhere a
/// throwaway repository is cheaper than a filesystem one.
#[derive(Default)]
pub struct MemRepository {
    name: String,
    recipes: RwLock<BTreeMap<PkgNameBuf, BTreeMap<Version, Spec>>>,
    #[allow(clippy::type_complexity)]
    packages: RwLock<BTreeMap<PkgNameBuf, BTreeMap<Version, BTreeMap<Build, (Spec, Digest)>>>>,
}

impl MemRepository {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

impl Repository for MemRepository {
    fn name(&self) -> &str {
        &self.name
    }

    fn list_package_names(&self) -> Result<Vec<PkgNameBuf>> {
        let recipes = self.recipes.read().unwrap();
        let packages = self.packages.read().unwrap();
        let mut names: Vec<PkgNameBuf> =
            recipes.keys().chain(packages.keys()).cloned().collect();
        names.sort();
        names.dedup();
        Ok(names)
    }

    fn list_package_versions(&self, name: &PkgName) -> Result<Vec<Version>> {
        let recipes = self.recipes.read().unwrap();
        let packages = self.packages.read().unwrap();
        let mut versions: Vec<Version> = recipes
            .get(name)
            .into_iter()
            .flat_map(|m| m.keys().cloned())
            .chain(packages.get(name).into_iter().flat_map(|m| m.keys().cloned()))
            .collect();
        versions.sort();
        versions.dedup();
        versions.reverse();
        Ok(versions)
    }

    fn list_package_builds(&self, name: &PkgName, version: &Version) -> Result<Vec<Build>> {
        let packages = self.packages.read().unwrap();
        Ok(packages
            .get(name)
            .and_then(|m| m.get(version))
            .map(|b| b.keys().cloned().collect())
            .unwrap_or_default())
    }

    fn read_recipe(&self, name: &PkgName, version: &Version) -> Result<Spec> {
        self.recipes
            .read()
            .unwrap()
            .get(name)
            .and_then(|m| m.get(version))
            .cloned()
            .ok_or_else(|| Error::PackageNotFound(format!("{name}/{version}")))
    }

    fn read_package(&self, ident: &Ident) -> Result<Spec> {
        let build = ident
            .build
            .as_ref()
            .ok_or_else(|| Error::NotABuild(ident.clone()))?;
        self.packages
            .read()
            .unwrap()
            .get(&ident.name)
            .and_then(|m| m.get(&ident.version))
            .and_then(|b| b.get(build))
            .map(|(spec, _)| spec.clone())
            .ok_or_else(|| Error::PackageNotFound(ident.to_string()))
    }

    fn read_package_layer(&self, ident: &Ident) -> Result<Digest> {
        let build = ident
            .build
            .as_ref()
            .ok_or_else(|| Error::NotABuild(ident.clone()))?;
        self.packages
            .read()
            .unwrap()
            .get(&ident.name)
            .and_then(|m| m.get(&ident.version))
            .and_then(|b| b.get(build))
            .map(|(_, layer)| layer.clone())
            .ok_or_else(|| Error::PackageNotFound(ident.to_string()))
    }

    fn publish_recipe(&self, spec: &Spec) -> Result<()> {
        if !spec.is_recipe() {
            return Err(Error::String(format!(
                "cannot publish '{}' as a recipe: it has a concrete build",
                spec.pkg
            )));
        }
        let mut recipes = self.recipes.write().unwrap();
        let by_version = recipes.entry(spec.pkg.name.clone()).or_default();
        if by_version.contains_key(&spec.pkg.version) {
            return Err(Error::VersionExists {
                name: spec.pkg.name.clone(),
                version: spec.pkg.version.clone(),
            });
        }
        by_version.insert(spec.pkg.version.clone(), spec.clone());
        Ok(())
    }

    fn publish_package(&self, spec: &Spec, layer: Digest) -> Result<()> {
        let build = spec
            .pkg
            .build
            .clone()
            .ok_or_else(|| Error::NotABuild(spec.pkg.clone()))?;
        let mut packages = self.packages.write().unwrap();
        packages
            .entry(spec.pkg.name.clone())
            .or_default()
            .entry(spec.pkg.version.clone())
            .or_default()
            .insert(build, (spec.clone(), layer));
        Ok(())
    }

    fn remove_recipe(&self, name: &PkgName, version: &Version) -> Result<()> {
        let mut recipes = self.recipes.write().unwrap();
        match recipes.get_mut(name) {
            Some(by_version) if by_version.remove(version).is_some() => Ok(()),
            _ => Err(Error::PackageNotFound(format!("{name}/{version}"))),
        }
    }

    fn remove_package(&self, ident: &Ident) -> Result<()> {
        let build = ident
            .build
            .as_ref()
            .ok_or_else(|| Error::NotABuild(ident.clone()))?;
        let mut packages = self.packages.write().unwrap();
        match packages
            .get_mut(&ident.name)
            .and_then(|m| m.get_mut(&ident.version))
        {
            Some(builds) if builds.remove(build).is_some() => Ok(()),
            _ => Err(Error::PackageNotFound(ident.to_string())),
        }
    }
}

#[cfg(test)]
#[path = "./mem_repository_test.rs"]
mod mem_repository_test;
