//---------------------------------------------------------------------------//
// Copyright (c) 2024 The rvio contributors. All rights reserved.
//
// This file is part of the Re-Volt I/O (rvio) project.
//
// This file is licensed under the MIT license, which can be found in the
// LICENSE file at the root of this repository.
//---------------------------------------------------------------------------//

//! Module containing tests for the file/external space [`Transform`].

use float_eq::assert_float_eq;
use nalgebra::{Matrix3, Vector3, Vector4};

use super::*;

fn assert_vector_eq(a: &Vector3<f32>, b: &Vector3<f32>) {
    assert_float_eq!(a.x, b.x, abs <= 0.0001);
    assert_float_eq!(a.y, b.y, abs <= 0.0001);
    assert_float_eq!(a.z, b.z, abs <= 0.0001);
}

#[test]
fn test_canonical_mapping() {
    let transform = Transform::new(1.0);
    let external = transform.point_to_external(&Vector3::new(1.0, 2.0, 3.0));
    assert_eq!(external, Vector3::new(1.0, 3.0, -2.0));

    // File Y points down, so a file "up" of -Y is external +Z.
    let up = transform.direction_to_external(&Vector3::new(0.0, -1.0, 0.0));
    assert_eq!(up, Vector3::new(0.0, 0.0, 1.0));
}

#[test]
fn test_canonical_axes_are_a_rotation() {
    assert_float_eq!(Transform::canonical_axes().determinant(), 1.0, abs <= 0.0001);
}

#[test]
fn test_scale_applies_to_points_only() {
    let transform = Transform::new(0.01);
    assert_vector_eq(&transform.point_to_external(&Vector3::new(100.0, -200.0, 300.0)), &Vector3::new(1.0, 3.0, 2.0));
    assert_vector_eq(&transform.direction_to_external(&Vector3::new(1.0, 0.0, 0.0)), &Vector3::new(1.0, 0.0, 0.0));
    assert_float_eq!(transform.scalar_to_external(250.0), 2.5, abs <= 0.0001);
    assert_float_eq!(transform.scalar_to_file(2.5), 250.0, abs <= 0.001);
}

#[test]
fn test_round_trip_points() {
    let transform = Transform::from_parts(Transform::canonical_axes(), Vector3::new(0.01, 0.02, 0.5), Vector3::new(4.0, -3.0, 1.5));
    let points = [
        Vector3::new(0.0, 0.0, 0.0),
        Vector3::new(1.5, -2.25, 3.125),
        Vector3::new(-1000.0, 42.0, 0.001),
    ];

    for point in &points {
        assert_vector_eq(&transform.point_to_external(&transform.point_to_file(point)), point);
        assert_vector_eq(&transform.point_to_file(&transform.point_to_external(point)), point);
        assert_vector_eq(&transform.direction_to_external(&transform.direction_to_file(point)), point);
    }
}

#[test]
fn test_basis_round_trip() {
    let transform = Transform::default();
    let basis = Matrix3::new(
        0.0, 0.0, 1.0,
        0.0, 1.0, 0.0,
        -1.0, 0.0, 0.0,
    );

    let external = transform.basis_to_external(&basis);
    assert_eq!(transform.basis_to_file(&external), basis);

    // The identity orientation must stay the identity.
    assert_eq!(transform.basis_to_external(&Matrix3::identity()), Matrix3::identity());
}

#[test]
fn test_matrices_match_operations() {
    let transform = Transform::from_parts(Transform::canonical_axes(), Vector3::repeat(0.1), Vector3::new(1.0, 2.0, 3.0));
    let point = Vector3::new(10.0, 20.0, 30.0);

    let expected = transform.point_to_external(&point);
    let homogeneous = transform.to_external_matrix() * Vector4::new(point.x, point.y, point.z, 1.0);
    assert_vector_eq(&homogeneous.xyz(), &expected);

    let back = transform.to_file_matrix() * Vector4::new(expected.x, expected.y, expected.z, 1.0);
    assert_vector_eq(&back.xyz(), &point);
}
