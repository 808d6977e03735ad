//---------------------------------------------------------------------------//
// Copyright (c) 2024 The rvio contributors. All rights reserved.
//
// This file is part of the Re-Volt I/O (rvio) project.
//
// This file is licensed under the MIT license, which can be found in the
// LICENSE file at the root of this repository.
//---------------------------------------------------------------------------//

//! Module containing tests for reading/writing `WorldInfo` files.

use float_eq::assert_float_eq;
use nalgebra::Vector3;

use std::f32::consts::PI;

use crate::error::RLibError;

use super::*;

const TOY_WORLD: &str = "\
;-------------------------
; Toy World level info
;-------------------------

NAME        'Toy World 1'
STARTPOS    100 -50 2000
STARTROT    0.25
FARCLIP     6000    ; draw distance
FOGSTART    5000
FOGCOLOR    255 128 0
";

#[test]
fn test_read_world_info() {
    let info = WorldInfo::from_text(TOY_WORLD).unwrap();
    assert_eq!(info.name(), "Toy World 1");
    assert_eq!(*info.farclip(), 6000.0);
    assert_eq!(*info.fogstart(), 5000.0);
    assert_eq!(*info.startpos(), Some(Vector3::new(100.0, -50.0, 2000.0)));
    assert_float_eq!(*info.startrot(), 0.25, abs <= 0.0001);
    assert_float_eq!(info.fog_colour()[0], 1.0, abs <= 0.0001);
    assert_float_eq!(info.fog_colour()[1], 128.0 / 255.0, abs <= 0.0001);
    assert_float_eq!(info.fog_colour()[2], 0.0, abs <= 0.0001);
}

#[test]
fn test_read_incomplete_world_info() {
    let info = WorldInfo::from_text("farclip 3000\nFOGCOLOR 10 20\nSTARTPOS 1 2").unwrap();
    assert_eq!(*info.farclip(), 3000.0);
    assert_eq!(info.name(), "");
    assert_eq!(*info.fog_colour(), [0.0; 3]);
    assert!(info.startpos().is_none());

    let result = WorldInfo::from_text("FOGSTART near");
    assert!(matches!(result, Err(RLibError::InvalidParameter(_, _))));
}

#[test]
fn test_world_info_to_external() {
    let transform = Transform::default();
    let info = WorldInfo::from_text(TOY_WORLD).unwrap();

    assert_float_eq!(info.farclip_to_external(&transform), 60.0, abs <= 0.0001);
    assert_float_eq!(info.fogstart_to_external(&transform), 50.0, abs <= 0.0001);
    assert_float_eq!(info.startrot_to_external(), -PI / 2.0, abs <= 0.0001);

    let startpos = info.startpos_to_external(&transform).unwrap();
    assert_float_eq!(startpos.x, 1.0, abs <= 0.0001);
    assert_float_eq!(startpos.y, 20.0, abs <= 0.0001);
    assert_float_eq!(startpos.z, 0.5, abs <= 0.0001);
}

#[test]
fn test_world_info_from_external() {
    let transform = Transform::default();
    let info = WorldInfo::from_external("Toy World 1", 60.0, 50.0, [1.0, 0.5, 0.0], Some(&Vector3::new(1.0, 20.0, 0.5)), -PI / 2.0, &transform);

    assert_float_eq!(*info.farclip(), 6000.0, abs <= 0.01);
    assert_float_eq!(*info.startrot(), 0.25, abs <= 0.0001);

    let startpos = info.startpos().unwrap();
    assert_float_eq!(startpos.x, 100.0, abs <= 0.001);
    assert_float_eq!(startpos.y, -50.0, abs <= 0.001);
    assert_float_eq!(startpos.z, 2000.0, abs <= 0.01);

    // Rotations are kept in a single turn.
    let info = WorldInfo::from_external("", 0.0, 0.0, [0.0; 3], None, PI / 2.0, &transform);
    assert_float_eq!(*info.startrot(), 0.75, abs <= 0.0001);
}

#[test]
fn test_write_world_info() {
    let mut info = WorldInfo::default();
    info.set_name("Toy World 1".to_owned());
    info.set_farclip(6000.0);
    info.set_fogstart(5000.0);
    info.set_fog_colour([1.0, 0.5, 0.0]);

    let text = info.to_text();
    assert_eq!(text, "\
NAME         'Toy World 1'
STARTPOS     0 0 0
STARTROT     0
FARCLIP      6000
FOGSTART     5000
FOGCOLOR     255 127 0
");

    let read = WorldInfo::from_text(&text).unwrap();
    assert_eq!(read.name(), "Toy World 1");
    assert_eq!(*read.startpos(), Some(Vector3::zeros()));
    assert_eq!(*read.farclip(), 6000.0);
}
