//---------------------------------------------------------------------------//
// Copyright (c) 2024 The rvio contributors. All rights reserved.
//
// This file is part of the Re-Volt I/O (rvio) project.
//
// This file is licensed under the MIT license, which can be found in the
// LICENSE file at the root of this repository.
//---------------------------------------------------------------------------//

//! World info, as found in `.inf` files.
//!
//! These are [parameter blocks](crate::files::parameters) with the name of the level, its fog, its
//! draw distance and where the race starts. Distances and positions are in file space, and the start
//! rotation is in turns.

use getset::*;
use nalgebra::Vector3;
use serde_derive::{Serialize, Deserialize};

use std::f32::consts::TAU;

use crate::error::Result;
use crate::files::parameters::ParameterBlock;
use crate::transform::Transform;

pub const EXTENSION: &str = ".inf";

#[cfg(test)] mod inf_test;

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// World info, in file space.
#[derive(Default, PartialEq, Clone, Debug, Getters, MutGetters, Setters, Serialize, Deserialize)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct WorldInfo {
    name: String,
    farclip: f32,
    fogstart: f32,

    /// Fog colour, from 0 to 1.
    fog_colour: [f32; 3],

    /// Start position, if the file has one.
    startpos: Option<Vector3<f32>>,

    /// Start rotation, in turns.
    startrot: f32,
}

//---------------------------------------------------------------------------//
//                         Implementation of WorldInfo
//---------------------------------------------------------------------------//

impl WorldInfo {

    /// This function reads the world info from its text.
    ///
    /// Missing values are left at their defaults. A fog colour without exactly 3 values is ignored.
    pub fn from_text(text: &str) -> Result<Self> {
        Self::from_block(&ParameterBlock::parse(text))
    }

    /// This function reads the world info from an already parsed block.
    pub fn from_block(block: &ParameterBlock) -> Result<Self> {
        let mut info = Self::default();

        if let Some(name) = block.get_string(&["NAME"]) {
            info.name = name;
        }

        info.farclip = block.get_f32(&["FARCLIP"])?.unwrap_or_default();
        info.fogstart = block.get_f32(&["FOGSTART"])?.unwrap_or_default();
        info.startrot = block.get_f32(&["STARTROT"])?.unwrap_or_default();

        if let Some(colour) = block.get_floats(&["FOGCOLOR"])? {
            if let [r, g, b] = colour[..] {
                info.fog_colour = [r / 255.0, g / 255.0, b / 255.0];
            }
        }

        if let Some(position) = block.get_floats(&["STARTPOS"])? {
            if let [x, y, z] = position[..] {
                info.startpos = Some(Vector3::new(x, y, z));
            }
        }

        Ok(info)
    }

    /// This function returns the world info as a parameter block.
    ///
    /// Levels without a start position start at the origin.
    pub fn to_block(&self) -> ParameterBlock {
        let startpos = self.startpos.unwrap_or_else(Vector3::zeros);

        let mut block = ParameterBlock::default();
        block.set_parameter("NAME", &[format!("'{}'", self.name)]);
        block.set_parameter("STARTPOS", &[startpos.x.to_string(), startpos.y.to_string(), startpos.z.to_string()]);
        block.set_parameter("STARTROT", &[self.startrot.to_string()]);
        block.set_parameter("FARCLIP", &[self.farclip.to_string()]);
        block.set_parameter("FOGSTART", &[self.fogstart.to_string()]);
        block.set_parameter("FOGCOLOR", &self.fog_colour.iter()
            .map(|value| ((value * 255.0) as i32).to_string())
            .collect::<Vec<_>>());

        block
    }

    /// This function returns the world info as text.
    pub fn to_text(&self) -> String {
        self.to_block().write()
    }

    /// This function returns the draw distance in external units.
    pub fn farclip_to_external(&self, transform: &Transform) -> f32 {
        transform.scalar_to_external(self.farclip)
    }

    /// This function returns the fog start distance in external units.
    pub fn fogstart_to_external(&self, transform: &Transform) -> f32 {
        transform.scalar_to_external(self.fogstart)
    }

    /// This function returns the start position in external space.
    pub fn startpos_to_external(&self, transform: &Transform) -> Option<Vector3<f32>> {
        self.startpos.map(|position| transform.point_to_external(&position))
    }

    /// This function returns the start rotation as radians around the external Z axis.
    pub fn startrot_to_external(&self) -> f32 {
        -self.startrot * TAU
    }

    /// This function creates the world info from values in external space.
    ///
    /// `startrot` is in radians around the external Z axis.
    pub fn from_external(
        name: &str,
        farclip: f32,
        fogstart: f32,
        fog_colour: [f32; 3],
        startpos: Option<&Vector3<f32>>,
        startrot: f32,
        transform: &Transform,
    ) -> Self {
        Self {
            name: name.to_owned(),
            farclip: transform.scalar_to_file(farclip),
            fogstart: transform.scalar_to_file(fogstart),
            fog_colour,
            startpos: startpos.map(|position| transform.point_to_file(position)),
            startrot: (-startrot).rem_euclid(TAU) / TAU,
        }
    }
}
