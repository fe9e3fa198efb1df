// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

use super::*;

#[test]
fn test_parse_pkg_opt() {
    let opt: Opt = serde_yaml::from_str("pkg: python\ndefault: \"3.9\"\n").unwrap();
    assert!(opt.is_pkg());
}

#[test]
fn test_parse_var_opt() {
    let opt: Opt = serde_yaml::from_str("var: debug\nchoices: [on, off]\ndefault: off\n").unwrap();
    assert!(!opt.is_pkg());
}

#[test]
fn test_var_opt_rejects_invalid_choice() {
    let opt = VarOpt {
        var: OptNameBuf::new("debug").unwrap(),
        default: Some("off".to_string()),
        choices: vec!["on".to_string(), "off".to_string()],
    };
    assert!(opt.validate("off").is_ok());
    assert!(opt.validate("maybe").is_err());
}

#[test]
fn test_pkg_opt_to_request_uses_given_value() {
    let opt = PkgOpt {
        pkg: PkgNameBuf::new("python").unwrap(),
        default: None,
    };
    let req = opt.to_request(Some(">=3.8")).unwrap();
    assert_eq!(req.name.as_str(), "python");
}
