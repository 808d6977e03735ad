//---------------------------------------------------------------------------//
// Copyright (c) 2024 The rvio contributors. All rights reserved.
//
// This file is part of the Re-Volt I/O (rvio) project.
//
// This file is licensed under the MIT license, which can be found in the
// LICENSE file at the root of this repository.
//---------------------------------------------------------------------------//

//! Instances, as found in `.fin` files. These place the static models of a level (`.prm` files next to the world).
//!
//! # Structure
//!
//! | Bytes | Type | Data |
//! | ----- | ---- | ---- |
//! | 4     | i32  | Instance count. |
//! | 72 * Instance count | [`Instance`] | Instances. |
//!
//! Each instance is:
//!
//! | Bytes | Type | Data |
//! | ----- | ---- | ---- |
//! | 9     | [u8; 9] | Model name, without extension, NUL-padded. |
//! | 3     | [u8; 3] | Model colour. |
//! | 4     | u32 | Env colour. |
//! | 4     | [u8; 4] | Reserved. |
//! | 4     | f32 | Reserved. |
//! | 12    | 3 x f32 | Location. |
//! | 36    | 9 x f32 | Orientation, row-major. |

use getset::*;
use log::debug;
use nalgebra::{Matrix3, Vector3};
use serde_derive::{Serialize, Deserialize};

use std::fs;
use std::path::{Path, PathBuf};

use crate::binary::{ReadBytes, WriteBytes};
use crate::error::Result;
use crate::files::{decode_log_name, DecodeableExtraData, Decodeable, EncodeableExtraData, Encodeable};
use crate::transform::Transform;
use crate::utils::{check_count, check_size_mismatch, count_as_i32};

pub const EXTENSION: &str = ".fin";

/// Size of an instance record.
pub const INSTANCE_SIZE: u64 = 72;

/// Bytes used by the model name.
const NAME_SIZE: usize = 9;


//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// An instance list, in file space.
#[derive(Default, PartialEq, Clone, Debug, Getters, MutGetters, Setters, Serialize, Deserialize)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct Fin {
    instances: Vec<Instance>,
}

#[derive(Default, PartialEq, Clone, Debug, Getters, MutGetters, Setters, Serialize, Deserialize)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct Instance {
    name: [u8; NAME_SIZE],
    model_colour: [u8; 3],
    env_colour: u32,
    reserved: [u8; 4],
    lod_bias: f32,
    location: Vector3<f32>,
    orientation: Matrix3<f32>,
}

//---------------------------------------------------------------------------//
//                            Implementation of Fin
//---------------------------------------------------------------------------//

impl Decodeable for Fin {

    fn decode<R: ReadBytes>(data: &mut R, extra_data: &Option<DecodeableExtraData>) -> Result<Self> {
        let count = data.read_i32()?;
        let count = check_count(data, "instance", count as i64, INSTANCE_SIZE)?;

        let mut instances = Vec::with_capacity(count);
        for _ in 0..count {
            instances.push(Instance::decode(data, extra_data)?);
        }

        check_size_mismatch(data.stream_position()? as usize, data.len()? as usize)?;
        debug!("Instances {} decoded: {} instances.", decode_log_name(extra_data), instances.len());

        Ok(Self {
            instances,
        })
    }
}

impl Encodeable for Fin {

    fn encode<W: WriteBytes>(&mut self, buffer: &mut W, extra_data: &Option<EncodeableExtraData>) -> Result<()> {
        buffer.write_i32(count_as_i32("instance", self.instances.len())?)?;
        for instance in &mut self.instances {
            instance.encode(buffer, extra_data)?;
        }

        Ok(())
    }
}

//---------------------------------------------------------------------------//
//                          Implementation of Instance
//---------------------------------------------------------------------------//

impl Decodeable for Instance {

    fn decode<R: ReadBytes>(data: &mut R, _extra_data: &Option<DecodeableExtraData>) -> Result<Self> {
        let mut name = [0; NAME_SIZE];
        name.copy_from_slice(&data.read_slice(NAME_SIZE, false)?);

        let mut model_colour = [0; 3];
        model_colour.copy_from_slice(&data.read_slice(3, false)?);

        let env_colour = data.read_u32()?;

        let mut reserved = [0; 4];
        reserved.copy_from_slice(&data.read_slice(4, false)?);

        let lod_bias = data.read_f32()?;
        let location = data.read_vector_3_f32()?;

        let mut orientation = [0.0; 9];
        for value in &mut orientation {
            *value = data.read_f32()?;
        }

        Ok(Self {
            name,
            model_colour,
            env_colour,
            reserved,
            lod_bias,
            location,
            orientation: Matrix3::from_row_slice(&orientation),
        })
    }
}

impl Encodeable for Instance {

    fn encode<W: WriteBytes>(&mut self, buffer: &mut W, _extra_data: &Option<EncodeableExtraData>) -> Result<()> {
        buffer.write_all(&self.name)?;
        buffer.write_all(&self.model_colour)?;
        buffer.write_u32(self.env_colour)?;
        buffer.write_all(&self.reserved)?;
        buffer.write_f32(self.lod_bias)?;
        buffer.write_vector_3_f32(self.location)?;

        for row in self.orientation.row_iter() {
            for value in row.iter() {
                buffer.write_f32(*value)?;
            }
        }

        Ok(())
    }
}

impl Instance {

    /// This function creates an instance of the model `model_name` from its placement in external space.
    pub fn new(model_name: &str, location: &Vector3<f32>, orientation: &Matrix3<f32>, transform: &Transform) -> Self {
        Self {
            name: encode_name(model_name),
            location: transform.point_to_file(location),
            orientation: transform.basis_to_file(orientation),
            ..Default::default()
        }
    }

    /// This function returns the name of the instanced model, lowercased and without padding.
    ///
    /// Names longer than 8 characters are cut, so this may only be the start of the model file name.
    pub fn model_name(&self) -> String {
        let end = self.name.iter().position(|byte| *byte == 0).unwrap_or(NAME_SIZE);
        String::from_utf8_lossy(&self.name[..end]).to_lowercase()
    }

    /// This function sets the name of the instanced model. The `.prm` extension is optional.
    pub fn set_model_name(&mut self, model_name: &str) {
        self.name = encode_name(model_name);
    }

    /// This function returns the path of the model file in `folder`.
    ///
    /// If `<name>.prm` doesn't exist, the name is assumed to be cut, and the only `<name>*.prm` file is used.
    /// If there are none or more than one, None is returned.
    pub fn resolve_model(&self, folder: &Path) -> Option<PathBuf> {
        let name = self.model_name();
        let exact = folder.join(format!("{name}.prm"));
        if exact.is_file() {
            return Some(exact);
        }

        let mut candidates = fs::read_dir(folder).ok()?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .filter(|path| path.file_name()
                .map(|file_name| file_name.to_string_lossy().to_lowercase())
                .is_some_and(|file_name| file_name.starts_with(&name) && file_name.ends_with(".prm")))
            .collect::<Vec<_>>();

        if candidates.len() == 1 {
            candidates.pop()
        } else {
            None
        }
    }

    /// This function returns the location of the instance in external space.
    pub fn location_to_external(&self, transform: &Transform) -> Vector3<f32> {
        transform.point_to_external(&self.location)
    }

    /// This function returns the orientation of the instance in external space.
    pub fn orientation_to_external(&self, transform: &Transform) -> Matrix3<f32> {
        transform.basis_to_external(&self.orientation)
    }
}

/// This function turns a model name into the stored name: uppercase, with `.PRM` and the dot turned into a NUL.
///
/// Only the first 8 bytes are kept, so the name is always NUL-terminated.
fn encode_name(model_name: &str) -> [u8; NAME_SIZE] {
    let mut full_name = model_name.to_uppercase();
    if !full_name.ends_with(".PRM") {
        full_name.push_str(".PRM");
    }

    let mut name = [0; NAME_SIZE];
    for (byte, value) in name.iter_mut().zip(full_name.replace('.', "\0").bytes().take(NAME_SIZE - 1)) {
        *byte = value;
    }

    name
}
