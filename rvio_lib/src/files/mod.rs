//---------------------------------------------------------------------------//
// Copyright (c) 2024 The rvio contributors. All rights reserved.
//
// This file is part of the Re-Volt I/O (rvio) project.
//
// This file is licensed under the MIT license, which can be found in the
// LICENSE file at the root of this repository.
//---------------------------------------------------------------------------//

//! This module contains the file formats Re-Volt uses, and the traits to decode and encode them.
//!
//! Each binary format has a raw struct implementing [`Decodeable`] and [`Encodeable`]. Raw structs keep
//! everything the file has, in file space, so encoding a decoded file gives back the same bytes.
//! Conversions to and from the external [`Mesh`](crate::geometry::Mesh) live next to each raw struct.

use getset::*;
use serde_derive::{Serialize, Deserialize};

use std::path::Path;

use crate::binary::{ReadBytes, WriteBytes};
use crate::error::Result;

pub mod car;
pub mod common;
pub mod fin;
pub mod fob;
pub mod hul;
pub mod inf;
pub mod ncp;
pub mod parameters;
pub mod prm;
pub mod w;

#[cfg(test)] mod files_test;

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// This enum specifies the known types of files we can find in a Re-Volt install.
#[derive(Clone, Copy, Debug, Default, Eq, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub enum FileType {
    CarParameters,
    ConvexHull,
    Hitbox,
    Instances,
    Model,
    Objects,
    World,
    WorldInfo,

    #[default]
    Unknown,
}

/// This is a generic struct to easily pass additional data to a [Decodeable::decode] method.
#[derive(Clone, Debug, Default, Getters, Setters)]
#[getset(get = "pub", set = "pub")]
pub struct DecodeableExtraData<'a> {

    /// Name of the file we're trying to decode. Only used to give context to logs.
    file_name: Option<&'a str>,
}

/// This is a generic struct to easily pass additional data to a [Encodeable::encode] method.
#[derive(Clone, Debug, Default, Getters, Setters)]
#[getset(get = "pub", set = "pub")]
pub struct EncodeableExtraData<'a> {

    /// Name of the file we're trying to encode. Only used to give context to logs.
    file_name: Option<&'a str>,

    /// Only for worlds. Colour used for env-mapped polygons that have no colour in the env list.
    env_colour_fallback: Option<u32>,
}

//---------------------------------------------------------------------------//
//                           Trait Definitions
//---------------------------------------------------------------------------//

/// A generic trait to implement decoding logic from anything implementing [ReadBytes](crate::binary::ReadBytes)
/// into structured types.
pub trait Decodeable: Send + Sync {

    /// This method provides a generic and expandable way to decode anything implementing [ReadBytes](crate::binary::ReadBytes)
    /// into the implementor's structure.
    ///
    /// The parameter `extra_data` contains arguments that can be used to provide additional data needed for the decoding process.
    fn decode<R: ReadBytes>(data: &mut R, extra_data: &Option<DecodeableExtraData>) -> Result<Self> where Self: Sized;
}

/// A generic trait to implement encoding logic from structured types into anything implementing [WriteBytes](crate::binary::WriteBytes).
pub trait Encodeable: Send + Sync {

    /// This method provides a generic and expandable way to encode any implementor's structure into anything
    /// implementing [WriteBytes](crate::binary::WriteBytes)
    ///
    /// The parameter `extra_data` contains arguments that can be used to provide additional data needed for the encoding process.
    fn encode<W: WriteBytes>(&mut self, buffer: &mut W, extra_data: &Option<EncodeableExtraData>) -> Result<()>;
}

//---------------------------------------------------------------------------//
//                       Implementation of FileType
//---------------------------------------------------------------------------//

impl FileType {

    /// This function guesses the type of a file from its path. Only the file name is checked.
    pub fn from_path(path: &Path) -> Self {
        let name = match path.file_name() {
            Some(name) => name.to_string_lossy().to_lowercase(),
            None => return Self::Unknown,
        };

        if name == car::FILE_NAME {
            Self::CarParameters
        }

        else if prm::EXTENSIONS.iter().any(|x| name.ends_with(x)) {
            Self::Model
        }

        else if name.ends_with(w::EXTENSION) {
            Self::World
        }

        else if name.ends_with(ncp::EXTENSION) {
            Self::Hitbox
        }

        else if name.ends_with(hul::EXTENSION) {
            Self::ConvexHull
        }

        else if name.ends_with(fin::EXTENSION) {
            Self::Instances
        }

        else if name.ends_with(fob::EXTENSION) {
            Self::Objects
        }

        else if name.ends_with(inf::EXTENSION) {
            Self::WorldInfo
        }

        else {
            Self::Unknown
        }
    }
}

/// This function returns the file name in the decoding extra data, for logging purposes.
pub(crate) fn decode_log_name<'a>(extra_data: &'a Option<DecodeableExtraData>) -> &'a str {
    extra_data.as_ref().and_then(|extra_data| *extra_data.file_name()).unwrap_or("<memory>")
}

/// This function returns the file name in the encoding extra data, for logging purposes.
pub(crate) fn encode_log_name<'a>(extra_data: &'a Option<EncodeableExtraData>) -> &'a str {
    extra_data.as_ref().and_then(|extra_data| *extra_data.file_name()).unwrap_or("<memory>")
}
