//---------------------------------------------------------------------------//
// Copyright (c) 2024 The rvio contributors. All rights reserved.
//
// This file is part of the Re-Volt I/O (rvio) project.
//
// This file is licensed under the MIT license, which can be found in the
// LICENSE file at the root of this repository.
//---------------------------------------------------------------------------//

//! Module with the [`ReadBytes`] trait, to read bytes to known types.

use byteorder::{LittleEndian, ReadBytesExt};
use nalgebra::Vector3;

use std::io::{ErrorKind, Read, Seek, SeekFrom};

use crate::error::{Result, RLibError};

//---------------------------------------------------------------------------//
//                            Trait Definition
//---------------------------------------------------------------------------//

/// This trait allow us to easily read all kind of data from a source that implements [`Read`] + [`Seek`].
pub trait ReadBytes: Read + Seek {

    /// This function returns the lenght of the data we're reading.
    ///
    /// ```rust
    /// use std::io::Cursor;
    ///
    /// use rvio_lib::binary::ReadBytes;
    ///
    /// let data: Vec<u8> = vec![1, 2, 3, 4];
    /// let mut cursor = Cursor::new(data);
    /// let len = cursor.len().unwrap();
    /// assert_eq!(len, 4);
    /// ```
    fn len(&mut self) -> Result<u64> {
        let old_pos = self.stream_position()?;
        let len = self.seek(SeekFrom::End(0))?;
        if old_pos != len {
            self.seek(SeekFrom::Start(old_pos))?;
        }
        Ok(len)
    }

    /// This function returns if the data is empty.
    ///
    /// ```rust
    /// use std::io::Cursor;
    ///
    /// use rvio_lib::binary::ReadBytes;
    ///
    /// let data: Vec<u8> = vec![];
    /// let mut cursor = Cursor::new(data);
    /// assert!(ReadBytes::is_empty(&mut cursor).unwrap());
    /// ```
    fn is_empty(&mut self) -> Result<bool> {
        self.len().map(|len| len == 0)
    }

    /// This function returns the amount of bytes left between the current position and the end of the data.
    fn remaining(&mut self) -> Result<u64> {
        let pos = self.stream_position()?;
        Ok(self.len()?.saturating_sub(pos))
    }

    /// This function returns the amount of bytes specified in the `size` argument as a [`Vec<u8>`].
    ///
    /// If `rewind` is true, the cursor will be reset to its original position once the data is returned.
    ///
    /// ```rust
    /// use std::io::Cursor;
    ///
    /// use rvio_lib::binary::ReadBytes;
    ///
    /// let data: Vec<u8> = vec![1, 2, 3, 4];
    /// let mut cursor = Cursor::new(data.to_vec());
    /// let data_read = cursor.read_slice(4, false).unwrap();
    /// assert_eq!(data, data_read);
    /// assert!(cursor.read_slice(1, false).is_err());
    /// ```
    fn read_slice(&mut self, size: usize, rewind: bool) -> Result<Vec<u8>> {
        let mut data = vec![0; size];
        if size == 0 {
            return Ok(data)
        }

        let position = self.stream_position()?;
        self.read_exact(&mut data).map_err(truncated("byte slice", position))?;

        if rewind {
            self.seek(SeekFrom::Current(-(size as i64)))?;
        }

        Ok(data)
    }

    /// This function tries to read an unsigned byte value from `self`.
    ///
    /// It may fail if there are not enough bytes to read the value or `self` cannot be read.
    ///
    /// ```rust
    /// use std::io::Cursor;
    ///
    /// use rvio_lib::binary::ReadBytes;
    ///
    /// let mut cursor = Cursor::new(vec![10u8]);
    /// assert_eq!(cursor.read_u8().unwrap(), 10);
    /// assert!(cursor.read_u8().is_err());
    /// ```
    fn read_u8(&mut self) -> Result<u8> {
        let position = self.stream_position()?;
        ReadBytesExt::read_u8(self).map_err(truncated("u8", position))
    }

    /// This function tries to read an u16 value from `self`.
    ///
    /// It may fail if there are not enough bytes to read the value or `self` cannot be read.
    ///
    /// ```rust
    /// use std::io::Cursor;
    ///
    /// use rvio_lib::binary::ReadBytes;
    ///
    /// let mut cursor = Cursor::new(vec![10u8, 0, 10]);
    /// assert_eq!(cursor.read_u16().unwrap(), 10);
    /// assert!(cursor.read_u16().is_err());
    /// ```
    fn read_u16(&mut self) -> Result<u16> {
        let position = self.stream_position()?;
        ReadBytesExt::read_u16::<LittleEndian>(self).map_err(truncated("u16", position))
    }

    /// This function tries to read an i16 value from `self`.
    ///
    /// It may fail if there are not enough bytes to read the value or `self` cannot be read.
    ///
    /// ```rust
    /// use std::io::Cursor;
    ///
    /// use rvio_lib::binary::ReadBytes;
    ///
    /// let mut cursor = Cursor::new(vec![254u8, 254, 10]);
    /// assert_eq!(cursor.read_i16().unwrap(), -258);
    /// assert!(cursor.read_i16().is_err());
    /// ```
    fn read_i16(&mut self) -> Result<i16> {
        let position = self.stream_position()?;
        ReadBytesExt::read_i16::<LittleEndian>(self).map_err(truncated("i16", position))
    }

    /// This function tries to read an u32 value from `self`.
    ///
    /// It may fail if there are not enough bytes to read the value or `self` cannot be read.
    ///
    /// ```rust
    /// use std::io::Cursor;
    ///
    /// use rvio_lib::binary::ReadBytes;
    ///
    /// let mut cursor = Cursor::new(vec![10u8, 0, 0, 0, 10]);
    /// assert_eq!(cursor.read_u32().unwrap(), 10);
    /// assert!(cursor.read_u32().is_err());
    /// ```
    fn read_u32(&mut self) -> Result<u32> {
        let position = self.stream_position()?;
        ReadBytesExt::read_u32::<LittleEndian>(self).map_err(truncated("u32", position))
    }

    /// This function tries to read an i32 value from `self`.
    ///
    /// It may fail if there are not enough bytes to read the value or `self` cannot be read.
    ///
    /// ```rust
    /// use std::io::Cursor;
    ///
    /// use rvio_lib::binary::ReadBytes;
    ///
    /// let mut cursor = Cursor::new(vec![10u8, 0, 0, 0, 10]);
    /// assert_eq!(cursor.read_i32().unwrap(), 10);
    /// assert!(cursor.read_i32().is_err());
    /// ```
    fn read_i32(&mut self) -> Result<i32> {
        let position = self.stream_position()?;
        ReadBytesExt::read_i32::<LittleEndian>(self).map_err(truncated("i32", position))
    }

    /// This function tries to read an f32 value from `self`.
    ///
    /// It may fail if there are not enough bytes to read the value or `self` cannot be read.
    ///
    /// ```rust
    /// use std::io::Cursor;
    ///
    /// use rvio_lib::binary::ReadBytes;
    ///
    /// let mut cursor = Cursor::new(vec![0u8, 0, 32, 65, 10]);
    /// assert_eq!(cursor.read_f32().unwrap(), 10.0);
    /// assert!(cursor.read_f32().is_err());
    /// ```
    fn read_f32(&mut self) -> Result<f32> {
        let position = self.stream_position()?;
        ReadBytesExt::read_f32::<LittleEndian>(self).map_err(truncated("f32", position))
    }

    /// This function tries to read a Vector of 3 f32 values from `self`.
    ///
    /// It may fail if there are not enough bytes to read the value or `self` cannot be read.
    ///
    /// ```rust
    /// use nalgebra::Vector3;
    /// use std::io::Cursor;
    ///
    /// use rvio_lib::binary::ReadBytes;
    ///
    /// let mut cursor = Cursor::new(vec![0u8, 0, 128, 63, 0, 0, 0, 64, 0, 0, 64, 64]);
    /// assert_eq!(cursor.read_vector_3_f32().unwrap(), Vector3::new(1.0, 2.0, 3.0));
    /// assert!(cursor.read_vector_3_f32().is_err());
    /// ```
    fn read_vector_3_f32(&mut self) -> Result<Vector3<f32>> {
        let x = self.read_f32()?;
        let y = self.read_f32()?;
        let z = self.read_f32()?;
        Ok(Vector3::new(x, y, z))
    }
}

// Automatic implementation for everything that implements `Read + Seek`.
impl<R: Read + Seek> ReadBytes for R {}

/// This function turns a short read into a [`RLibError::TruncatedInput`] at `position`, and leaves any other IO error as it is.
fn truncated(type_name: &'static str, position: u64) -> impl FnOnce(std::io::Error) -> RLibError {
    move |error| match error.kind() {
        ErrorKind::UnexpectedEof => RLibError::TruncatedInput(type_name, position),
        _ => RLibError::IOError(error),
    }
}
