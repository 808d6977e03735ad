//---------------------------------------------------------------------------//
// Copyright (c) 2024 The rvio contributors. All rights reserved.
//
// This file is part of the Re-Volt I/O (rvio) project.
//
// This file is licensed under the MIT license, which can be found in the
// LICENSE file at the root of this repository.
//---------------------------------------------------------------------------//

//! Objects, as found in `.fob` files. These are the scripted things of a level: barrels, planets, pickups...
//!
//! # Structure
//!
//! | Bytes | Type | Data |
//! | ----- | ---- | ---- |
//! | 4     | i32  | Object count. |
//! | 56 * Object count | [`WorldObject`] | Objects. |
//!
//! Each object is:
//!
//! | Bytes | Type | Data |
//! | ----- | ---- | ---- |
//! | 4     | i32  | [`ObjectType`]. |
//! | 16    | 4 x i32 | Flags. Their meaning depends on the type. |
//! | 12    | 3 x f32 | Location. |
//! | 12    | 3 x f32 | Up vector. It points down in file space. |
//! | 12    | 3 x f32 | Forward vector. |

use getset::*;
use log::debug;
use nalgebra::{Matrix3, Vector3};
use serde_derive::{Serialize, Deserialize};

use std::path::Path;

use crate::binary::{ReadBytes, WriteBytes};
use crate::error::Result;
use crate::files::{decode_log_name, DecodeableExtraData, Decodeable, EncodeableExtraData, Encodeable};
use crate::transform::Transform;
use crate::utils::{check_count, check_size_mismatch, count_as_i32};

pub const EXTENSION: &str = ".fob";

/// Size of an object record.
pub const OBJECT_SIZE: u64 = 56;

/// Models of the planets, by their first flag. The sun (11) has no model.
const PLANET_MODELS: [&str; 11] = [
    "models/mercury.m",
    "models/venus.m",
    "models/earth.m",
    "models/mars.m",
    "models/jupiter.m",
    "models/saturn.m",
    "models/uranus.m",
    "models/neptune.m",
    "models/pluto.m",
    "models/moon.m",
    "models/rings.m",
];

/// Known object types, in file order, starting from 0.
const OBJECT_TYPES: [ObjectType; 37] = [
    ObjectType::Barrel,
    ObjectType::BeachBall,
    ObjectType::Planet,
    ObjectType::Plane,
    ObjectType::Copter,
    ObjectType::Dragon,
    ObjectType::Water,
    ObjectType::Trolley,
    ObjectType::Boat,
    ObjectType::Speedup,
    ObjectType::Radar,
    ObjectType::Balloon,
    ObjectType::Horse,
    ObjectType::Train,
    ObjectType::Strobe,
    ObjectType::Football,
    ObjectType::SparkGenerator,
    ObjectType::Spaceman,
    ObjectType::Shockwave,
    ObjectType::Firework,
    ObjectType::PuttyBomb,
    ObjectType::WaterBomb,
    ObjectType::ElectroPulse,
    ObjectType::OilSlick,
    ObjectType::OilSlickDropper,
    ObjectType::ChromeBall,
    ObjectType::Clone,
    ObjectType::Turbo,
    ObjectType::Slowdown,
    ObjectType::Spring,
    ObjectType::PickupGenerator,
    ObjectType::Pickup,
    ObjectType::DissolveModel,
    ObjectType::Flap,
    ObjectType::Laser,
    ObjectType::Splash,
    ObjectType::BombGlow,
];

#[cfg(test)] mod fob_test;

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// An object list, in file space.
#[derive(Default, PartialEq, Clone, Debug, Getters, MutGetters, Setters, Serialize, Deserialize)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct Fob {
    objects: Vec<WorldObject>,
}

#[derive(Default, PartialEq, Clone, Debug, Getters, MutGetters, Setters, Serialize, Deserialize)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct WorldObject {
    kind: ObjectType,
    flags: [i32; 4],
    location: Vector3<f32>,
    up: Vector3<f32>,
    forward: Vector3<f32>,
}

/// Types of objects. Values not known by this lib are kept as `Unknown`.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub enum ObjectType {
    Car,
    #[default]
    Barrel,
    BeachBall,
    Planet,
    Plane,
    Copter,
    Dragon,
    Water,
    Trolley,
    Boat,
    Speedup,
    Radar,
    Balloon,
    Horse,
    Train,
    Strobe,
    Football,
    SparkGenerator,
    Spaceman,
    Shockwave,
    Firework,
    PuttyBomb,
    WaterBomb,
    ElectroPulse,
    OilSlick,
    OilSlickDropper,
    ChromeBall,
    Clone,
    Turbo,
    Slowdown,
    Spring,
    PickupGenerator,
    Pickup,
    DissolveModel,
    Flap,
    Laser,
    Splash,
    BombGlow,
    Unknown(i32),
}

//---------------------------------------------------------------------------//
//                            Implementation of Fob
//---------------------------------------------------------------------------//

impl Decodeable for Fob {

    fn decode<R: ReadBytes>(data: &mut R, extra_data: &Option<DecodeableExtraData>) -> Result<Self> {
        let count = data.read_i32()?;
        let count = check_count(data, "object", count as i64, OBJECT_SIZE)?;

        let mut objects = Vec::with_capacity(count);
        for _ in 0..count {
            objects.push(WorldObject::decode(data, extra_data)?);
        }

        check_size_mismatch(data.stream_position()? as usize, data.len()? as usize)?;
        debug!("Objects {} decoded: {} objects.", decode_log_name(extra_data), objects.len());

        Ok(Self {
            objects,
        })
    }
}

impl Encodeable for Fob {

    fn encode<W: WriteBytes>(&mut self, buffer: &mut W, extra_data: &Option<EncodeableExtraData>) -> Result<()> {
        buffer.write_i32(count_as_i32("object", self.objects.len())?)?;
        for object in &mut self.objects {
            object.encode(buffer, extra_data)?;
        }

        Ok(())
    }
}

//---------------------------------------------------------------------------//
//                        Implementation of WorldObject
//---------------------------------------------------------------------------//

impl Decodeable for WorldObject {

    fn decode<R: ReadBytes>(data: &mut R, _extra_data: &Option<DecodeableExtraData>) -> Result<Self> {
        let kind = ObjectType::from(data.read_i32()?);

        let mut flags = [0; 4];
        for flag in &mut flags {
            *flag = data.read_i32()?;
        }

        Ok(Self {
            kind,
            flags,
            location: data.read_vector_3_f32()?,
            up: data.read_vector_3_f32()?,
            forward: data.read_vector_3_f32()?,
        })
    }
}

impl Encodeable for WorldObject {

    fn encode<W: WriteBytes>(&mut self, buffer: &mut W, _extra_data: &Option<EncodeableExtraData>) -> Result<()> {
        buffer.write_i32(self.kind.into())?;
        for flag in self.flags {
            buffer.write_i32(flag)?;
        }

        buffer.write_vector_3_f32(self.location)?;
        buffer.write_vector_3_f32(self.up)?;
        buffer.write_vector_3_f32(self.forward)?;
        Ok(())
    }
}

impl WorldObject {

    /// This function creates an object from its placement in external space.
    ///
    /// The columns of `orientation` are the right, forward and up vectors of the object.
    pub fn new(kind: ObjectType, flags: [i32; 4], location: &Vector3<f32>, orientation: &Matrix3<f32>, transform: &Transform) -> Self {
        let forward = orientation.column(1).into_owned();
        let up = orientation.column(2).into_owned();

        Self {
            kind,
            flags,
            location: transform.point_to_file(location),
            up: -transform.direction_to_file(&up),
            forward: transform.direction_to_file(&forward),
        }
    }

    /// This function returns the location of the object in external space.
    pub fn location_to_external(&self, transform: &Transform) -> Vector3<f32> {
        transform.point_to_external(&self.location)
    }

    /// This function returns the orientation of the object in external space, as a matrix with the right,
    /// forward and up vectors as columns.
    pub fn orientation_to_external(&self, transform: &Transform) -> Matrix3<f32> {
        let up = (-transform.direction_to_external(&self.up)).normalize();
        let forward = transform.direction_to_external(&self.forward).normalize();
        let right = forward.cross(&up);

        Matrix3::from_columns(&[right, forward, up])
    }

    /// This function returns the path of the stock model used by the object, relative to the game root.
    ///
    /// Objects without a model, like the sun or the pickup generators, return None.
    pub fn default_model(&self) -> Option<&'static str> {
        match self.kind {
            ObjectType::Barrel => Some("models/barrel.m"),
            ObjectType::Football => Some("models/football.m"),
            ObjectType::BeachBall => Some("models/beachball.m"),
            ObjectType::Planet => usize::try_from(self.flags[0]).ok().and_then(|index| PLANET_MODELS.get(index).copied()),
            ObjectType::Plane => Some("models/plane.m"),
            ObjectType::Copter => Some("models/copter.m"),
            ObjectType::Dragon => Some("models/dragon1.m"),
            ObjectType::Water => Some("models/water.m"),
            ObjectType::Trolley => Some("models/trolley.m"),
            ObjectType::Boat => Some("models/boat1.m"),
            ObjectType::Radar => Some("models/radar.m"),
            ObjectType::Speedup => Some("models/speedup.m"),
            ObjectType::Balloon => Some("models/baloon.m"),
            ObjectType::Horse => Some("models/horse.m"),
            ObjectType::Train => Some("models/train.m"),
            ObjectType::Strobe => Some("models/light1.m"),
            ObjectType::Spaceman => Some("models/spaceman.m"),
            ObjectType::Pickup => Some("models/pickup.m"),
            ObjectType::Flap => Some("models/flap.m"),
            _ => None,
        }
    }
}

/// This function returns the root folder of the game from the path of a level file (`<root>/levels/<level>/<file>`).
pub fn game_root(level_file: &Path) -> Option<&Path> {
    level_file.ancestors().nth(3)
}

//---------------------------------------------------------------------------//
//                        Implementation of ObjectType
//---------------------------------------------------------------------------//

impl From<i32> for ObjectType {
    fn from(value: i32) -> Self {
        if value == -1 {
            return Self::Car;
        }

        usize::try_from(value).ok()
            .and_then(|index| OBJECT_TYPES.get(index).copied())
            .unwrap_or(Self::Unknown(value))
    }
}

impl From<ObjectType> for i32 {
    fn from(value: ObjectType) -> Self {
        match value {
            ObjectType::Car => -1,
            ObjectType::Unknown(value) => value,
            known => OBJECT_TYPES.iter().position(|kind| *kind == known).map(|index| index as i32).unwrap_or(-1),
        }
    }
}
