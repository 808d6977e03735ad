//---------------------------------------------------------------------------//
// Copyright (c) 2024 The rvio contributors. All rights reserved.
//
// This file is part of the Re-Volt I/O (rvio) project.
//
// This file is licensed under the MIT license, which can be found in the
// LICENSE file at the root of this repository.
//---------------------------------------------------------------------------//

//! Module with the [`Transform`] between file space and external space.
//!
//! Re-Volt files use a left-handed space with Y pointing down. The external space is right-handed with Z up.
//! The canonical mapping is:
//!
//! ```text
//! external = (file.x, file.z, -file.y) * scale + translation
//! ```
//!
//! Positions, directions and plain distances go through different operations:
//! - Points get the axis remap, the scale and the translation.
//! - Directions (normals, basis vectors) only get the axis remap. No inverse-transpose is applied, even for
//!   non-uniform scales, so the files written match the ones the game tools write.
//! - Scalars (radius, distances) only get the scale.
//!
//! Face winding is not handled here: the mesh codecs reverse the corner order themselves.

use getset::*;
use nalgebra::{Matrix3, Matrix4, Vector3};
use serde_derive::{Serialize, Deserialize};

#[cfg(test)] mod transform_test;

/// Scale used by default for models and worlds: one external unit is 100 file units.
pub const DEFAULT_SCALE: f32 = 0.01;

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// This struct represents an affine transform between the file space and the external space.
#[derive(PartialEq, Clone, Debug, Getters, Setters, Serialize, Deserialize)]
#[getset(get = "pub", set = "pub")]
pub struct Transform {

    /// Rotation/reflection taking file axes to external axes. It must be orthonormal.
    axes: Matrix3<f32>,

    /// Per-axis scale, applied in external space.
    scale: Vector3<f32>,

    /// Translation, applied in external space after scaling.
    translation: Vector3<f32>,
}

//---------------------------------------------------------------------------//
//                           Implementation of Transform
//---------------------------------------------------------------------------//

impl Default for Transform {
    fn default() -> Self {
        Self::new(DEFAULT_SCALE)
    }
}

impl Transform {

    /// This function creates the canonical transform, with the provided uniform scale.
    pub fn new(scale: f32) -> Self {
        Self {
            axes: Self::canonical_axes(),
            scale: Vector3::repeat(scale),
            translation: Vector3::zeros(),
        }
    }

    /// This function creates a transform from a custom axis remap, a per-axis scale and a translation.
    pub fn from_parts(axes: Matrix3<f32>, scale: Vector3<f32>, translation: Vector3<f32>) -> Self {
        Self {
            axes,
            scale,
            translation,
        }
    }

    /// This function returns the canonical axis remap: `(x, y, z)` to `(x, z, -y)`.
    pub fn canonical_axes() -> Matrix3<f32> {
        Matrix3::new(
            1.0, 0.0, 0.0,
            0.0, 0.0, 1.0,
            0.0, -1.0, 0.0,
        )
    }

    /// This function converts a position from file space to external space.
    pub fn point_to_external(&self, point: &Vector3<f32>) -> Vector3<f32> {
        (self.axes * point).component_mul(&self.scale) + self.translation
    }

    /// This function converts a position from external space to file space.
    pub fn point_to_file(&self, point: &Vector3<f32>) -> Vector3<f32> {
        self.axes.transpose() * (point - self.translation).component_div(&self.scale)
    }

    /// This function converts a direction (normal, axis...) from file space to external space.
    pub fn direction_to_external(&self, direction: &Vector3<f32>) -> Vector3<f32> {
        self.axes * direction
    }

    /// This function converts a direction (normal, axis...) from external space to file space.
    pub fn direction_to_file(&self, direction: &Vector3<f32>) -> Vector3<f32> {
        self.axes.transpose() * direction
    }

    /// This function converts a distance from file space to external space.
    ///
    /// With non-uniform scales, the smallest one is used.
    pub fn scalar_to_external(&self, value: f32) -> f32 {
        value * self.uniform_scale()
    }

    /// This function converts a distance from external space to file space.
    ///
    /// With non-uniform scales, the smallest one is used.
    pub fn scalar_to_file(&self, value: f32) -> f32 {
        value / self.uniform_scale()
    }

    /// This function converts an orientation matrix from file space to external space.
    pub fn basis_to_external(&self, basis: &Matrix3<f32>) -> Matrix3<f32> {
        self.axes * basis * self.axes.transpose()
    }

    /// This function converts an orientation matrix from external space to file space.
    pub fn basis_to_file(&self, basis: &Matrix3<f32>) -> Matrix3<f32> {
        self.axes.transpose() * basis * self.axes
    }

    /// This function returns the transform as a 4x4 affine matrix, going from file space to external space.
    pub fn to_external_matrix(&self) -> Matrix4<f32> {
        let linear = Matrix3::from_diagonal(&self.scale) * self.axes;
        let mut matrix = linear.to_homogeneous();
        matrix.fixed_view_mut::<3, 1>(0, 3).copy_from(&self.translation);
        matrix
    }

    /// This function returns the transform as a 4x4 affine matrix, going from external space to file space.
    pub fn to_file_matrix(&self) -> Matrix4<f32> {
        let linear = self.axes.transpose() * Matrix3::from_diagonal(&self.scale.map(|value| 1.0 / value));
        let mut matrix = linear.to_homogeneous();
        matrix.fixed_view_mut::<3, 1>(0, 3).copy_from(&(-(linear * self.translation)));
        matrix
    }

    /// This function returns the scale used for plain distances.
    pub fn uniform_scale(&self) -> f32 {
        self.scale.x.abs().min(self.scale.y.abs()).min(self.scale.z.abs())
    }
}
