//---------------------------------------------------------------------------//
// Copyright (c) 2024 The rvio contributors. All rights reserved.
//
// This file is part of the Re-Volt I/O (rvio) project.
//
// This file is licensed under the MIT license, which can be found in the
// LICENSE file at the root of this repository.
//---------------------------------------------------------------------------//

//! Module containing tests for the generic utils.

use std::fs::File;
use std::io::{Cursor, Write};
use std::path::Path;

use crate::error::RLibError;

use crate::utils::*;

#[test]
fn test_check_count() {
    let mut cursor = Cursor::new(vec![0u8; 24]);

    assert_eq!(check_count(&mut cursor, "vertex", 1, 24).unwrap(), 1);
    assert_eq!(check_count(&mut cursor, "vertex", 0, 24).unwrap(), 0);
    assert!(matches!(check_count(&mut cursor, "vertex", -1, 24), Err(RLibError::InvalidCount("vertex", -1, 24))));
    assert!(matches!(check_count(&mut cursor, "vertex", 2, 24), Err(RLibError::InvalidCount(..))));
    assert!(check_count(&mut cursor, "vertex", i64::MAX, 24).is_err());
}

#[test]
fn test_check_size_mismatch() {
    assert!(check_size_mismatch(10, 10).is_ok());
    assert!(matches!(check_size_mismatch(8, 10), Err(RLibError::DecodingMismatchSizeError(10, 8))));
}

#[test]
fn test_count_as_i16() {
    assert_eq!(count_as_i16("polygon", 3).unwrap(), 3);
    assert!(matches!(count_as_i16("polygon", 40_000), Err(RLibError::EncodingTooManyElements("polygon", 40_000, 32_767))));
}

#[test]
fn test_open_if_not_empty() {
    let folder = tempfile::tempdir().unwrap();
    let empty = folder.path().join("empty.ncp");
    let full = folder.path().join("full.ncp");
    File::create(&empty).unwrap();
    File::create(&full).unwrap().write_all(&[0, 0]).unwrap();

    assert!(open_if_not_empty(&folder.path().join("missing.ncp")).unwrap().is_none());
    assert!(open_if_not_empty(&empty).unwrap().is_none());
    assert!(open_if_not_empty(&full).unwrap().is_some());
}

#[test]
fn test_parent_folder_name() {
    assert_eq!(parent_folder_name(Path::new("cars/Rotor/body.prm")).as_deref(), Some("rotor"));
    assert_eq!(parent_folder_name(Path::new("body.prm")), None);
}
