//---------------------------------------------------------------------------//
// Copyright (c) 2024 The rvio contributors. All rights reserved.
//
// This file is part of the Re-Volt I/O (rvio) project.
//
// This file is licensed under the MIT license, which can be found in the
// LICENSE file at the root of this repository.
//---------------------------------------------------------------------------//

//! Module containing tests for decoding/encoding `Fob` files.

use float_eq::assert_float_eq;
use nalgebra::{Matrix3, Vector3};

use std::io::Cursor;
use std::path::Path;

use crate::binary::WriteBytes;
use crate::error::RLibError;

use super::*;

/// Two objects: an upright planet facing forward, and something this lib doesn't know.
fn objects_data() -> Vec<u8> {
    let mut data = vec![];
    data.write_i32(2).unwrap();

    data.write_i32(2).unwrap();
    for flag in [3, 0, -1, 7] {
        data.write_i32(flag).unwrap();
    }
    data.write_vector_3_f32(Vector3::new(100.0, -200.0, 300.0)).unwrap();
    data.write_vector_3_f32(Vector3::new(0.0, 1.0, 0.0)).unwrap();
    data.write_vector_3_f32(Vector3::new(0.0, 0.0, 1.0)).unwrap();

    data.write_i32(99).unwrap();
    for _ in 0..4 {
        data.write_i32(0).unwrap();
    }
    for _ in 0..9 {
        data.write_f32(0.0).unwrap();
    }

    data
}

#[test]
fn test_decode_fob() {
    let data = objects_data();
    let mut fob = Fob::decode(&mut Cursor::new(&data), &None).unwrap();
    assert_eq!(fob.objects().len(), 2);

    let planet = &fob.objects()[0];
    assert_eq!(*planet.kind(), ObjectType::Planet);
    assert_eq!(*planet.flags(), [3, 0, -1, 7]);
    assert_eq!(*planet.location(), Vector3::new(100.0, -200.0, 300.0));
    assert_eq!(*fob.objects()[1].kind(), ObjectType::Unknown(99));

    let mut encoded = vec![];
    fob.encode(&mut encoded, &None).unwrap();
    assert_eq!(encoded, data);
}

#[test]
fn test_decode_fob_errors() {
    let data = objects_data();

    let result = Fob::decode(&mut Cursor::new(&data[..60]), &None);
    assert!(matches!(result, Err(RLibError::InvalidCount("object", 2, 56))));

    let mut data = data;
    data[0..4].copy_from_slice(&(-2i32).to_le_bytes());
    let result = Fob::decode(&mut Cursor::new(&data), &None);
    assert!(matches!(result, Err(RLibError::InvalidCount("object", -2, _))));
}

#[test]
fn test_object_types() {
    assert_eq!(ObjectType::from(-1), ObjectType::Car);
    assert_eq!(ObjectType::from(0), ObjectType::Barrel);
    assert_eq!(ObjectType::from(15), ObjectType::Football);
    assert_eq!(ObjectType::from(36), ObjectType::BombGlow);
    assert_eq!(ObjectType::from(37), ObjectType::Unknown(37));
    assert_eq!(ObjectType::from(-5), ObjectType::Unknown(-5));

    assert_eq!(i32::from(ObjectType::Car), -1);
    assert_eq!(i32::from(ObjectType::Strobe), 14);
    assert_eq!(i32::from(ObjectType::BombGlow), 36);
    assert_eq!(i32::from(ObjectType::Unknown(120)), 120);
}

#[test]
fn test_default_models() {
    let mut object = WorldObject::default();
    assert_eq!(object.default_model(), Some("models/barrel.m"));

    object.set_kind(ObjectType::Strobe);
    assert_eq!(object.default_model(), Some("models/light1.m"));

    object.set_kind(ObjectType::Planet);
    object.set_flags([3, 0, 0, 0]);
    assert_eq!(object.default_model(), Some("models/mars.m"));

    // The sun has no model, and neither have broken flags.
    object.set_flags([11, 0, 0, 0]);
    assert_eq!(object.default_model(), None);
    object.set_flags([-1, 0, 0, 0]);
    assert_eq!(object.default_model(), None);

    object.set_kind(ObjectType::Firework);
    assert_eq!(object.default_model(), None);
}

#[test]
fn test_game_root() {
    let path = Path::new("/games/revolt/levels/nhood1/nhood1.fob");
    assert_eq!(game_root(path), Some(Path::new("/games/revolt")));
    assert_eq!(game_root(Path::new("nhood1.fob")), None);
}

#[test]
fn test_object_orientation() {
    let transform = Transform::default();
    let fob = Fob::decode(&mut Cursor::new(&objects_data()), &None).unwrap();
    let planet = &fob.objects()[0];

    // Upright, looking along external Y.
    let orientation = planet.orientation_to_external(&transform);
    for (value, expected) in orientation.iter().zip(Matrix3::<f32>::identity().iter()) {
        assert_float_eq!(*value, *expected, abs <= 0.0001);
    }

    let location = planet.location_to_external(&transform);
    assert_float_eq!(location.x, 1.0, abs <= 0.0001);
    assert_float_eq!(location.y, 3.0, abs <= 0.0001);
    assert_float_eq!(location.z, 2.0, abs <= 0.0001);

    // And back.
    let object = WorldObject::new(ObjectType::Planet, [3, 0, -1, 7], &location, &orientation, &transform);
    assert_float_eq!(object.up().y, 1.0, abs <= 0.0001);
    assert_float_eq!(object.forward().z, 1.0, abs <= 0.0001);
    assert_float_eq!(object.location().y, -200.0, abs <= 0.01);
}
