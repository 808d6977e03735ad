//---------------------------------------------------------------------------//
// Copyright (c) 2024 The rvio contributors. All rights reserved.
//
// This file is part of the Re-Volt I/O (rvio) project.
//
// This file is licensed under the MIT license, which can be found in the
// LICENSE file at the root of this repository.
//---------------------------------------------------------------------------//

//! Module with the [`WriteBytes`] trait, to write bytes from known types to a [`Writer`].
//!
//! [`Writer`]: std::io::Write

use byteorder::{LittleEndian, WriteBytesExt};
use nalgebra::Vector3;

use std::io::Write;

use crate::error::Result;

//---------------------------------------------------------------------------//
//                            Trait Definition
//---------------------------------------------------------------------------//

/// This trait allow us to easily write all kind of data types to something that implements [`Write`].
pub trait WriteBytes: Write {

    /// This function tries to write an u8 value to `self`.
    ///
    /// It may fail if `self` cannot be written to.
    ///
    /// ```rust
    /// use rvio_lib::binary::WriteBytes;
    ///
    /// let mut data: Vec<u8> = vec![];
    /// assert!(data.write_u8(10).is_ok());
    /// assert_eq!(data, vec![10]);
    /// ```
    fn write_u8(&mut self, integer: u8) -> Result<()> {
        WriteBytesExt::write_u8(self, integer).map_err(From::from)
    }

    /// This function tries to write an u16 value to `self`.
    ///
    /// It may fail if `self` cannot be written to.
    ///
    /// ```rust
    /// use rvio_lib::binary::WriteBytes;
    ///
    /// let mut data: Vec<u8> = vec![];
    /// assert!(data.write_u16(258).is_ok());
    /// assert_eq!(data, vec![2, 1]);
    /// ```
    fn write_u16(&mut self, integer: u16) -> Result<()> {
        WriteBytesExt::write_u16::<LittleEndian>(self, integer).map_err(From::from)
    }

    /// This function tries to write an i16 value to `self`.
    ///
    /// It may fail if `self` cannot be written to.
    ///
    /// ```rust
    /// use rvio_lib::binary::WriteBytes;
    ///
    /// let mut data: Vec<u8> = vec![];
    /// assert!(data.write_i16(-258).is_ok());
    /// assert_eq!(data, vec![254, 254]);
    /// ```
    fn write_i16(&mut self, integer: i16) -> Result<()> {
        WriteBytesExt::write_i16::<LittleEndian>(self, integer).map_err(From::from)
    }

    /// This function tries to write an u32 value to `self`.
    ///
    /// It may fail if `self` cannot be written to.
    ///
    /// ```rust
    /// use rvio_lib::binary::WriteBytes;
    ///
    /// let mut data: Vec<u8> = vec![];
    /// assert!(data.write_u32(258).is_ok());
    /// assert_eq!(data, vec![2, 1, 0, 0]);
    /// ```
    fn write_u32(&mut self, integer: u32) -> Result<()> {
        WriteBytesExt::write_u32::<LittleEndian>(self, integer).map_err(From::from)
    }

    /// This function tries to write an i32 value to `self`.
    ///
    /// It may fail if `self` cannot be written to.
    ///
    /// ```rust
    /// use rvio_lib::binary::WriteBytes;
    ///
    /// let mut data: Vec<u8> = vec![];
    /// assert!(data.write_i32(-258).is_ok());
    /// assert_eq!(data, vec![254, 254, 255, 255]);
    /// ```
    fn write_i32(&mut self, integer: i32) -> Result<()> {
        WriteBytesExt::write_i32::<LittleEndian>(self, integer).map_err(From::from)
    }

    /// This function tries to write a f32 value to `self`.
    ///
    /// It may fail if `self` cannot be written to.
    ///
    /// ```rust
    /// use rvio_lib::binary::WriteBytes;
    ///
    /// let mut data: Vec<u8> = vec![];
    /// assert!(data.write_f32(-10.2).is_ok());
    /// assert_eq!(data, vec![51, 51, 35, 193]);
    /// ```
    fn write_f32(&mut self, float: f32) -> Result<()> {
        WriteBytesExt::write_f32::<LittleEndian>(self, float).map_err(From::from)
    }

    /// This function tries to write a Vector of 3 f32 values to `self`.
    ///
    /// It may fail if `self` cannot be written to.
    ///
    /// ```rust
    /// use nalgebra::Vector3;
    ///
    /// use rvio_lib::binary::WriteBytes;
    ///
    /// let mut data: Vec<u8> = vec![];
    /// assert!(data.write_vector_3_f32(Vector3::new(1.0, 2.0, 3.0)).is_ok());
    /// assert_eq!(data, vec![0, 0, 128, 63, 0, 0, 0, 64, 0, 0, 64, 64]);
    /// ```
    fn write_vector_3_f32(&mut self, value: Vector3<f32>) -> Result<()> {
        self.write_f32(value.x)?;
        self.write_f32(value.y)?;
        self.write_f32(value.z)
    }
}

// Automatic implementation for everything that implements `Write`.
impl<W: Write> WriteBytes for W {}
