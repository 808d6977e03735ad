//---------------------------------------------------------------------------//
// Copyright (c) 2024 The rvio contributors. All rights reserved.
//
// This file is part of the Re-Volt I/O (rvio) project.
//
// This file is licensed under the MIT license, which can be found in the
// LICENSE file at the root of this repository.
//---------------------------------------------------------------------------//

//! Small records shared between several formats.

use getset::*;
use nalgebra::Vector3;
use serde_derive::{Serialize, Deserialize};

use crate::binary::{ReadBytes, WriteBytes};
use crate::error::Result;
use crate::files::{DecodeableExtraData, Decodeable, EncodeableExtraData, Encodeable};

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// Axis-aligned box, stored as `xlo, xhi, ylo, yhi, zlo, zhi`.
#[derive(Default, PartialEq, Clone, Debug, Getters, MutGetters, Setters, Serialize, Deserialize)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct BoundingBox {
    x_lo: f32,
    x_hi: f32,
    y_lo: f32,
    y_hi: f32,
    z_lo: f32,
    z_hi: f32,
}

/// A plane, with the points `p` on it satisfying `normal · p + distance = 0`.
#[derive(Default, PartialEq, Clone, Debug, Getters, MutGetters, Setters, Serialize, Deserialize)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct Plane {
    normal: Vector3<f32>,
    distance: f32,
}

#[derive(Default, PartialEq, Clone, Debug, Getters, MutGetters, Setters, Serialize, Deserialize)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct Sphere {
    center: Vector3<f32>,
    radius: f32,
}

/// Texture coordinates, as stored in the file (V goes down).
#[derive(Default, PartialEq, Clone, Copy, Debug, Getters, MutGetters, Setters, Serialize, Deserialize)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct Uv {
    u: f32,
    v: f32,
}

//---------------------------------------------------------------------------//
//                           Implementation of BoundingBox
//---------------------------------------------------------------------------//

impl BoundingBox {

    /// This function creates a box from its min and max corners.
    pub fn from_corners(min: &Vector3<f32>, max: &Vector3<f32>) -> Self {
        Self {
            x_lo: min.x,
            x_hi: max.x,
            y_lo: min.y,
            y_hi: max.y,
            z_lo: min.z,
            z_hi: max.z,
        }
    }

    pub fn min(&self) -> Vector3<f32> {
        Vector3::new(self.x_lo, self.y_lo, self.z_lo)
    }

    pub fn max(&self) -> Vector3<f32> {
        Vector3::new(self.x_hi, self.y_hi, self.z_hi)
    }
}

impl Decodeable for BoundingBox {

    fn decode<R: ReadBytes>(data: &mut R, _extra_data: &Option<DecodeableExtraData>) -> Result<Self> {
        Ok(Self {
            x_lo: data.read_f32()?,
            x_hi: data.read_f32()?,
            y_lo: data.read_f32()?,
            y_hi: data.read_f32()?,
            z_lo: data.read_f32()?,
            z_hi: data.read_f32()?,
        })
    }
}

impl Encodeable for BoundingBox {

    fn encode<W: WriteBytes>(&mut self, buffer: &mut W, _extra_data: &Option<EncodeableExtraData>) -> Result<()> {
        buffer.write_f32(self.x_lo)?;
        buffer.write_f32(self.x_hi)?;
        buffer.write_f32(self.y_lo)?;
        buffer.write_f32(self.y_hi)?;
        buffer.write_f32(self.z_lo)?;
        buffer.write_f32(self.z_hi)?;

        Ok(())
    }
}

//---------------------------------------------------------------------------//
//                           Implementation of Plane
//---------------------------------------------------------------------------//

impl Plane {
    pub fn new(normal: Vector3<f32>, distance: f32) -> Self {
        Self {
            normal,
            distance,
        }
    }

    /// This function creates the plane with the provided normal going through `point`.
    pub fn from_point(normal: Vector3<f32>, point: &Vector3<f32>) -> Self {
        Self {
            distance: -point.dot(&normal),
            normal,
        }
    }
}

impl Decodeable for Plane {

    fn decode<R: ReadBytes>(data: &mut R, _extra_data: &Option<DecodeableExtraData>) -> Result<Self> {
        Ok(Self {
            normal: data.read_vector_3_f32()?,
            distance: data.read_f32()?,
        })
    }
}

impl Encodeable for Plane {

    fn encode<W: WriteBytes>(&mut self, buffer: &mut W, _extra_data: &Option<EncodeableExtraData>) -> Result<()> {
        buffer.write_vector_3_f32(self.normal)?;
        buffer.write_f32(self.distance)
    }
}

//---------------------------------------------------------------------------//
//                           Implementation of Sphere
//---------------------------------------------------------------------------//

impl Sphere {
    pub fn new(center: Vector3<f32>, radius: f32) -> Self {
        Self {
            center,
            radius,
        }
    }
}

impl Decodeable for Sphere {

    fn decode<R: ReadBytes>(data: &mut R, _extra_data: &Option<DecodeableExtraData>) -> Result<Self> {
        Ok(Self {
            center: data.read_vector_3_f32()?,
            radius: data.read_f32()?,
        })
    }
}

impl Encodeable for Sphere {

    fn encode<W: WriteBytes>(&mut self, buffer: &mut W, _extra_data: &Option<EncodeableExtraData>) -> Result<()> {
        buffer.write_vector_3_f32(self.center)?;
        buffer.write_f32(self.radius)
    }
}

//---------------------------------------------------------------------------//
//                           Implementation of Uv
//---------------------------------------------------------------------------//

impl Uv {
    pub fn new(u: f32, v: f32) -> Self {
        Self { u, v }
    }

    /// This function converts external texture coordinates (V goes up) into file ones.
    pub fn from_external(uv: &[f32; 2]) -> Self {
        Self::new(uv[0], 1.0 - uv[1])
    }

    /// This function converts the file texture coordinates into external ones (V goes up).
    pub fn to_external(&self) -> [f32; 2] {
        [self.u, 1.0 - self.v]
    }
}

impl Decodeable for Uv {

    fn decode<R: ReadBytes>(data: &mut R, _extra_data: &Option<DecodeableExtraData>) -> Result<Self> {
        Ok(Self {
            u: data.read_f32()?,
            v: data.read_f32()?,
        })
    }
}

impl Encodeable for Uv {

    fn encode<W: WriteBytes>(&mut self, buffer: &mut W, _extra_data: &Option<EncodeableExtraData>) -> Result<()> {
        buffer.write_f32(self.u)?;
        buffer.write_f32(self.v)
    }
}
