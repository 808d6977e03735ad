//---------------------------------------------------------------------------//
// Copyright (c) 2024 The rvio contributors. All rights reserved.
//
// This file is part of the Re-Volt I/O (rvio) project.
//
// This file is licensed under the MIT license, which can be found in the
// LICENSE file at the root of this repository.
//---------------------------------------------------------------------------//

//! This module contains the traits [`ReadBytes`] and [`WriteBytes`], used to read binary data
//! into usable data and write it back to binary.
//!
//! # Simple types
//!
//! All the Re-Volt formats are tightly packed, with no alignment or padding, and always use LittleEndian:
//!
//! | Type | Bytes | Binary Format | Example | Explanation |
//! | ---- | ----- | ------------- | ------- | ----------- |
//! | **[u8]**  | 1    | ```05```            | 5       | Unsigned Integer. Colour channels. |
//! | **[i16]** | 2    | ```05 00```         | 5       | Signed Integer. Polygon and vertex counts in models. |
//! | **[u16]** | 2    | ```05 00```         | 5       | Unsigned Integer. |
//! | **[i32]** | 4    | ```05 00 00 00```   | 5       | Signed Integer. Counts in worlds and tables. |
//! | **[u32]** | 4    | ```05 00 00 00```   | 5       | Unsigned Integer. Packed colours. |
//! | **[f32]** | 4    | ```00 00 80 3F```   | 1.0     | Floating Point Value. |
//!
//! # Complex types
//!
//! | Type | Bytes | Binary Format | Example | Explanation |
//! | ---- | ----- | ------------- | ------- | ----------- |
//! | **Vector** | 12 | ```00 00 80 3F 00 00 00 00 00 00 00 00``` | (1, 0, 0) | Three [f32], in file space. |
//! | **Colour** | 4  | ```33 44 55 FF``` | #554433, alpha 255 | A [u32] with the format `0xAARRGGBB`, so the bytes go B, G, R, A. |
//!
//! Reading past the end of the data fails with [`TruncatedInput`](crate::error::RLibError::TruncatedInput).

mod reader;
mod writer;

pub use self::reader::ReadBytes;
pub use self::writer::WriteBytes;

#[cfg(test)] mod reader_test;
#[cfg(test)] mod writer_test;
