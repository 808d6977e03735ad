//---------------------------------------------------------------------------//
// Copyright (c) 2024 The rvio contributors. All rights reserved.
//
// This file is part of the Re-Volt I/O (rvio) project.
//
// This file is licensed under the MIT license, which can be found in the
// LICENSE file at the root of this repository.
//---------------------------------------------------------------------------//

//! Tests for the [`ReadBytes`] trait.
//!
//! [`ReadBytes`]: crate::binary::ReadBytes

use nalgebra::Vector3;

use std::io::Cursor;

use crate::error::RLibError;

use super::ReadBytes;

/// Test for ReadBytes::len() and ReadBytes::remaining().
#[test]
fn len_and_remaining() {
    let mut cursor = Cursor::new(vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(cursor.len().unwrap(), 6);
    assert_eq!(cursor.read_i16().unwrap(), 513);
    assert_eq!(cursor.remaining().unwrap(), 4);

    // Len must not move the cursor.
    assert_eq!(cursor.len().unwrap(), 6);
    assert_eq!(cursor.position(), 2);
}

/// Test for ReadBytes::read_i16().
#[test]
fn read_i16() {
    let mut cursor = Cursor::new(vec![254, 254, 10]);
    assert_eq!(cursor.read_i16().unwrap(), -258);

    // A short read must be reported as truncated input, not as a generic IO error.
    assert!(matches!(cursor.read_i16(), Err(RLibError::TruncatedInput("i16", 2))));
}

/// Test for ReadBytes::read_u32().
#[test]
fn read_u32() {
    let mut cursor = Cursor::new(vec![0x33, 0x44, 0x55, 0xFF]);
    assert_eq!(cursor.read_u32().unwrap(), 0xFF55_4433);
    assert!(matches!(cursor.read_u32(), Err(RLibError::TruncatedInput("u32", 4))));
}

/// Test for ReadBytes::read_f32().
#[test]
fn read_f32() {
    let mut cursor = Cursor::new(vec![51, 51, 35, 193]);
    assert_eq!(cursor.read_f32().unwrap(), -10.2);
    assert!(cursor.read_f32().is_err());
}

/// Test for ReadBytes::read_vector_3_f32().
#[test]
fn read_vector_3_f32() {
    let mut cursor = Cursor::new(vec![0, 0, 128, 63, 0, 0, 0, 64, 0, 0, 64, 64, 0, 0]);
    assert_eq!(cursor.read_vector_3_f32().unwrap(), Vector3::new(1.0, 2.0, 3.0));
    assert!(matches!(cursor.read_vector_3_f32(), Err(RLibError::TruncatedInput("f32", 12))));
}

/// Test for ReadBytes::read_slice().
#[test]
fn read_slice() {
    let mut cursor = Cursor::new(vec![1, 2, 3, 4]);
    assert_eq!(cursor.read_slice(2, true).unwrap(), vec![1, 2]);
    assert_eq!(cursor.position(), 0);
    assert_eq!(cursor.read_slice(0, false).unwrap(), Vec::<u8>::new());
    assert!(matches!(cursor.read_slice(5, false), Err(RLibError::TruncatedInput("byte slice", 0))));
}
