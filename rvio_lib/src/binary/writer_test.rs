//---------------------------------------------------------------------------//
// Copyright (c) 2024 The rvio contributors. All rights reserved.
//
// This file is part of the Re-Volt I/O (rvio) project.
//
// This file is licensed under the MIT license, which can be found in the
// LICENSE file at the root of this repository.
//---------------------------------------------------------------------------//

//! Tests for the [`WriteBytes`] trait.
//!
//! [`WriteBytes`]: crate::binary::WriteBytes

use nalgebra::Vector3;

use super::WriteBytes;

/// Test for WriteBytes::write_i16().
#[test]
fn write_i16() {
    let mut data = vec![];
    assert!(data.write_i16(-258).is_ok());
    assert_eq!(data, vec![254, 254]);
}

/// Test for WriteBytes::write_u32().
#[test]
fn write_u32() {

    // Colours are stored as 0xAARRGGBB, so the first byte is blue.
    let mut data = vec![];
    assert!(data.write_u32(0xFF55_4433).is_ok());
    assert_eq!(data, vec![0x33, 0x44, 0x55, 0xFF]);
}

/// Test for WriteBytes::write_i32().
#[test]
fn write_i32() {
    let mut data = vec![];
    assert!(data.write_i32(-1).is_ok());
    assert_eq!(data, vec![255, 255, 255, 255]);
}

/// Test for WriteBytes::write_f32().
#[test]
fn write_f32() {
    let mut data = vec![];
    assert!(data.write_f32(-10.2).is_ok());
    assert_eq!(data, vec![51, 51, 35, 193]);
}

/// Test for WriteBytes::write_vector_3_f32().
#[test]
fn write_vector_3_f32() {
    let mut data = vec![];
    assert!(data.write_vector_3_f32(Vector3::new(1.0, 2.0, 3.0)).is_ok());
    assert_eq!(data, vec![0, 0, 128, 63, 0, 0, 0, 64, 0, 0, 64, 64]);
}
