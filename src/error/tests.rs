// typed-env: Typed environment variable access
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::error::Error as _;

use super::{UnexpectedTypeError, VarError, VarResult};

#[test]
fn test_not_found_display() {
    let err = VarError::not_found("APP_PORT");
    insta::assert_snapshot!(err.to_string(), @"environment variable 'APP_PORT' does not exist");
}

#[test]
fn test_invalid_argument_display() {
    let err = VarError::invalid_argument("name was empty");
    insta::assert_snapshot!(err.to_string(), @"invalid argument: name was empty");
}

#[test]
fn test_unexpected_type_display() {
    let err: VarError = UnexpectedTypeError::new("APP_PORT", "eighty", "i32", None).into();
    insta::assert_snapshot!(
        err.to_string(),
        @"environment variable 'APP_PORT' value 'eighty' is not of expected type: i32"
    );
}

#[test]
fn test_unexpected_type_keeps_cause() {
    let cause = "x".parse::<i32>().unwrap_err();
    let err: VarError =
        UnexpectedTypeError::new("APP_PORT", "x", "i32", Some(Box::new(cause))).into();

    let source = err.source().expect("unexpected type should expose its cause");
    assert_eq!(source.to_string(), "invalid digit found in string");

    let VarError::UnexpectedType(inner) = err else {
        panic!("expected UnexpectedType");
    };
    assert_eq!(inner.name(), "APP_PORT");
    assert_eq!(inner.value(), "x");
    assert_eq!(inner.expected(), "i32");
}

#[test]
fn test_store_error_from_io() {
    let err: VarError = std::io::Error::from(std::io::ErrorKind::PermissionDenied).into();
    assert!(matches!(err, VarError::Store(_)));
    assert!(!err.is_absorbed_by_default());
}

#[test]
fn test_absorbed_kinds() {
    let unexpected: VarError = UnexpectedTypeError::new("A", "b", "bool", None).into();
    let kinds = [
        (VarError::not_found("A"), true),
        (unexpected, true),
        (VarError::invalid_argument("name was empty"), false),
    ];
    for (err, absorbed) in kinds {
        assert_eq!(err.is_absorbed_by_default(), absorbed, "{err}");
    }
}

#[test]
fn test_var_error_size() {
    // Largest payload is a fat pointer (16 bytes) plus discriminant.
    let size = std::mem::size_of::<VarError>();
    assert!(size <= 24, "VarError is {size} bytes, expected <= 24");
}

#[test]
fn test_var_result_size() {
    let size = std::mem::size_of::<VarResult<()>>();
    assert!(size <= 24, "VarResult<()> is {size} bytes, expected <= 24");
}
