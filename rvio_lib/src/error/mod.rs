//---------------------------------------------------------------------------//
// Copyright (c) 2024 The rvio contributors. All rights reserved.
//
// This file is part of the Re-Volt I/O (rvio) project.
//
// This file is licensed under the MIT license, which can be found in the
// LICENSE file at the root of this repository.
//---------------------------------------------------------------------------//

//! This module contains all kind of errors used inside this crate.
//!
//! Missing and empty files are not errors: the [import](crate::import) functions return `Ok(None)` for them.
//! Degenerate geometry isn't an error either, it's skipped and logged.

use thiserror::Error;

/// Custom `Result` type, to always return our custom error.
pub type Result<T, E = RLibError> = core::result::Result<T, E>;

/// Custom error type for the lib.
#[derive(Error, Debug)]
pub enum RLibError {
    #[error("The data ended before a {0} value could be read at byte {1}. The file is truncated.")]
    TruncatedInput(&'static str, u64),

    #[error("Invalid {0} count: {1}. It's either negative or it needs more bytes than the {2} left in the data.")]
    InvalidCount(&'static str, i64, u64),

    #[error("Error trying to decode: expected to end at byte {0}, but we ended at byte {1}.")]
    DecodingMismatchSizeError(usize, usize),

    #[error("Too many {0} to encode: {1}. The maximum is {2}.")]
    EncodingTooManyElements(&'static str, usize, usize),

    #[error("The lookup grid cell size {0} is too small: the grid would need more than {1} cells.")]
    EncodingGridTooLarge(f32, usize),

    #[error("Face {0} has {1} vertices. Only triangles and quads can be encoded.")]
    EncodingUnsupportedPolygon(usize, usize),

    #[error("Face {0} references the vertex {1}, but there are only {2} vertices.")]
    EncodingVertexIndexOutOfRange(usize, usize, usize),

    #[error("The convex hull cannot be built: {0}.")]
    HullDegenerate(String),

    #[error("The file \"{0}\" is not of a type we know how to handle.")]
    UnknownFileType(String),

    #[error("The parameter \"{0}\" has an invalid value: \"{1}\".")]
    InvalidParameter(String, String),

    #[error("The provided path \"{0}\" has no parent folder.")]
    PathWithoutParent(String),

    #[error("The config folder couldn't be found or created.")]
    ConfigFolderNotFound,

    #[error(transparent)]
    ParseFloatError(#[from] std::num::ParseFloatError),

    #[error(transparent)]
    ParseIntError(#[from] std::num::ParseIntError),

    /// Represents all other cases of `std::io::Error`.
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// Represents a failure to move a temporary file into its final path.
    #[error(transparent)]
    PersistError(#[from] tempfile::PersistError),

    /// Represents all other cases of `toml::ser::Error`.
    #[error(transparent)]
    TomlError(#[from] toml::ser::Error),

    /// Represents all other cases of `std::time::SystemTimeError`.
    #[error(transparent)]
    SystemTimeError(#[from] std::time::SystemTimeError),

    #[cfg(feature = "integration_log")]
    #[error(transparent)]
    SetLoggerError(#[from] log::SetLoggerError),
}
