// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

use thiserror::Error;

#[derive(Debug, Error, miette::Diagnostic)]
pub enum Error {
    #[error("invalid name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    #[error("invalid version '{version}': {reason}")]
    InvalidVersion { version: String, reason: String },

    #[error("invalid version range '{range}': {reason}")]
    InvalidVersionRange { range: String, reason: String },

    #[error("invalid build '{build}': {reason}")]
    InvalidBuild { build: String, reason: String },

    #[error("invalid component '{component}': {reason}")]
    InvalidComponent { component: String, reason: String },

    #[error("{0}")]
    String(String),
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::String(value)
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Error::String(value.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
