// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

use std::str::FromStr;

use strata_pkg_foundation::name::{OptNameBuf, PkgNameBuf};
use strata_pkg_foundation::option_map::OptionMap;
use strata_pkg_foundation::version_range::VersionFilter;

use super::*;
use crate::ident::Ident;

fn pkg_request(name: &str, range: &str) -> PkgRequest {
    PkgRequest::new(
        PkgNameBuf::new(name).unwrap(),
        VersionFilter::from_str(range).unwrap(),
        RequestedBy::Unknown,
    )
}

#[test]
fn test_inclusion_policy_merge_prefers_always() {
    assert_eq!(
        InclusionPolicy::Always.max(InclusionPolicy::IfAlreadyPresent),
        InclusionPolicy::Always
    );
}

#[test]
fn test_prerelease_policy_merge_prefers_exclude() {
    assert_eq!(
        PreReleasePolicy::ExcludeAll.merge(PreReleasePolicy::IncludeAll),
        PreReleasePolicy::ExcludeAll
    );
    assert_eq!(
        PreReleasePolicy::IncludeAll.merge(PreReleasePolicy::IncludeAll),
        PreReleasePolicy::IncludeAll
    );
}

#[test]
fn test_var_request_is_satisfied_by() {
    let mut options = OptionMap::default();
    options.insert(OptNameBuf::new("debug").unwrap(), "true");
    let req = VarRequest::new(OptNameBuf::new("debug").unwrap(), "true");
    assert!(req.is_satisfied_by(&options));
    let req = VarRequest::new(OptNameBuf::new("debug").unwrap(), "false");
    assert!(!req.is_satisfied_by(&options));
}

#[test]
fn test_pkg_request_is_satisfied_by() {
    let req = pkg_request("python", ">=3.8,<3.10");
    let ident = Ident::from_str("python/3.9.1").unwrap();
    assert!(req.is_satisfied_by(&ident));
    let ident = Ident::from_str("python/3.10.0").unwrap();
    assert!(!req.is_satisfied_by(&ident));
}

#[test]
fn test_pkg_request_excludes_prerelease_by_default() {
    let req = pkg_request("python", ">=3.8");
    let ident = Ident::from_str("python/3.9.1-alpha.1").unwrap();
    assert!(!req.is_satisfied_by(&ident));
}

#[test]
fn test_restrict_merges_compatible_ranges() {
    let mut a = pkg_request("python", ">=3.0");
    let b = pkg_request("python", "<3.10");
    a.restrict(&b).unwrap();
    assert!(a.range.is_satisfied(&"3.9.0".parse().unwrap()));
    assert!(!a.range.is_satisfied(&"3.10.0".parse().unwrap()));
}

#[test]
fn test_restrict_rejects_conflicting_ranges() {
    let mut a = pkg_request("python", ">=2");
    let b = pkg_request("python", "<2");
    let err = a.restrict(&b).unwrap_err();
    assert!(matches!(err, Error::ConflictingRequests { .. }));
}

#[test]
fn test_restrict_combines_requested_by() {
    let mut a = pkg_request("python", "*");
    a.requested_by = vec![RequestedBy::CommandLine];
    let mut b = pkg_request("python", "*");
    b.requested_by = vec![RequestedBy::Unknown];
    a.restrict(&b).unwrap();
    assert_eq!(a.requested_by.len(), 2);
}

#[test]
fn test_merge_pkg_requests_folds_all() {
    let requests = vec![
        pkg_request("python", ">=3.0"),
        pkg_request("python", "<3.10"),
        pkg_request("python", ">=3.5"),
    ];
    let merged = merge_pkg_requests(&requests).unwrap();
    assert!(merged.range.is_satisfied(&"3.6.0".parse().unwrap()));
    assert!(!merged.range.is_satisfied(&"3.2.0".parse().unwrap()));
}

#[test]
fn test_merge_pkg_requests_empty_is_error() {
    assert!(merge_pkg_requests(&[]).is_err());
}
