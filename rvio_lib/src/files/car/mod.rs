//---------------------------------------------------------------------------//
// Copyright (c) 2024 The rvio contributors. All rights reserved.
//
// This file is part of the Re-Volt I/O (rvio) project.
//
// This file is licensed under the MIT license, which can be found in the
// LICENSE file at the root of this repository.
//---------------------------------------------------------------------------//

//! Car parameters, as found in the `parameters.txt` file of each car folder.
//!
//! The file starts with some free text, followed by a [parameter block](crate::files::parameters) between
//! braces. Only the parts needed to put a car together are read here: its models, where each one goes,
//! and a few handling values shown to the user.
//!
//! Model and texture paths are relative to the game root, which is two folders above the car folder.

use getset::*;
use lazy_static::lazy_static;
use nalgebra::Vector3;
use regex::Regex;
use serde_derive::{Serialize, Deserialize};

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::files::parameters::{ParameterBlock, unquote};
use crate::transform::Transform;

/// Name of car parameter files, lowercased.
pub const FILE_NAME: &str = "parameters.txt";

/// Wheels a car can have.
pub const WHEEL_COUNT: u32 = 4;

/// Value used by model slots without a model.
const NO_MODEL: &str = "NONE";


lazy_static! {

    /// Offsets sometimes come with junk attached to the numbers.
    static ref OFFSET_JUNK: Regex = Regex::new(r"[^0-9\.\+-]").unwrap();
}

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// Car parameters, in file space.
#[derive(Default, PartialEq, Clone, Debug, Getters, MutGetters, Setters, Serialize, Deserialize)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct CarParameters {
    name: String,
    class: String,
    steer_rate: f32,

    /// Texture page of the car, relative to the game root.
    tpage: Option<String>,

    /// Model paths by their number, relative to the game root and with `/` as separator.
    models: BTreeMap<u32, String>,

    wheels: BTreeMap<u32, Wheel>,
    axles: BTreeMap<u32, CarPart>,
    springs: BTreeMap<u32, CarPart>,
    body: Option<CarPart>,
}

#[derive(Default, PartialEq, Clone, Debug, Getters, MutGetters, Setters, Serialize, Deserialize)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct Wheel {
    part: CarPart,
    is_present: bool,
    is_powered: bool,
    is_turnable: bool,
    steer_ratio: f32,
    engine_ratio: f32,
}

/// A part of the car using one of its models.
#[derive(Default, PartialEq, Clone, Debug, Getters, MutGetters, Setters, Serialize, Deserialize)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct CarPart {

    /// Number of the model used. Negative numbers mean no model.
    model_num: i32,

    /// Location of the part, relative to the car.
    offset: Option<Vector3<f32>>,
}

//---------------------------------------------------------------------------//
//                      Implementation of CarParameters
//---------------------------------------------------------------------------//

impl CarParameters {

    /// This function reads the car parameters from the full text of a `parameters.txt` file.
    ///
    /// Everything before the first line with an opening brace is ignored.
    pub fn from_text(text: &str) -> Result<Self> {
        let mut lines = text.lines().skip_while(|line| !line.contains('{'));
        lines.next();

        Self::from_block(&ParameterBlock::from_lines(&mut lines))
    }

    /// This function reads the car parameters from an already parsed block.
    pub fn from_block(block: &ParameterBlock) -> Result<Self> {
        let mut car = Self {
            name: block.get_string(&["Name"]).unwrap_or_default(),
            class: block.get_parameter(&["Class"]).unwrap_or("0").to_owned(),
            steer_rate: block.get_f32(&["SteerRate"])?.unwrap_or_default(),
            tpage: block.get_string(&["TPAGE"]).map(|path| normalize_path(&path)),
            ..Default::default()
        };

        for tokens in block.params() {
            if let [key, number, path, ..] = &tokens[..] {
                if caseless::default_caseless_match_str(key, "MODEL") {
                    if let Ok(number) = number.parse::<u32>() {
                        car.models.insert(number, normalize_path(unquote(path)));
                    }
                }
            }
        }

        for index in 0..WHEEL_COUNT {
            if let Some(wheel) = block.block(&format!("WHEEL {index}")) {
                car.wheels.insert(index, Wheel::from_block(wheel)?);
            }

            if let Some(axle) = block.block(&format!("AXLE {index}")) {
                car.axles.insert(index, CarPart::from_block(axle, "Offset")?);
            }

            if let Some(spring) = block.block(&format!("SPRING {index}")) {
                car.springs.insert(index, CarPart::from_block(spring, "Offset")?);
            }
        }

        car.body = block.block("BODY")
            .map(|body| CarPart::from_block(body, "Offset"))
            .transpose()?;

        Ok(car)
    }

    /// This function returns the path of the model `model_num`, relative to the game root.
    ///
    /// Empty slots return None.
    pub fn model_path(&self, model_num: i32) -> Option<&str> {
        let model_num = u32::try_from(model_num).ok()?;
        self.models.get(&model_num)
            .map(|path| path.as_str())
            .filter(|path| !path.is_empty() && !caseless::default_caseless_match_str(path, NO_MODEL))
    }

    /// This function returns the full path of the model used by `part`.
    pub fn part_model(&self, game_root: &Path, part: &CarPart) -> Option<PathBuf> {
        self.model_path(part.model_num).map(|path| game_root.join(path))
    }

    /// This function returns the full path of the texture page of the car.
    pub fn texture_path(&self, game_root: &Path) -> Option<PathBuf> {
        self.tpage.as_ref()
            .filter(|path| !path.is_empty() && !caseless::default_caseless_match_str(path, NO_MODEL))
            .map(|path| game_root.join(path))
    }
}

/// This function returns the root folder of the game from the path of a car parameters file (`<root>/cars/<car>/parameters.txt`).
pub fn game_root(parameters_file: &Path) -> Option<&Path> {
    parameters_file.ancestors().nth(3)
}

/// This function turns the Windows separators the game uses into `/`.
fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}

//---------------------------------------------------------------------------//
//                          Implementation of Wheel
//---------------------------------------------------------------------------//

impl Wheel {
    fn from_block(block: &ParameterBlock) -> Result<Self> {
        Ok(Self {
            part: CarPart::from_block(block, "Offset1")?,
            is_present: block.get_bool(&["IsPresent"]),
            is_powered: block.get_bool(&["IsPowered"]),
            is_turnable: block.get_bool(&["IsTurnable"]),
            steer_ratio: block.get_f32(&["SteerRatio"])?.unwrap_or_default(),
            engine_ratio: block.get_f32(&["EngineRatio"])?.unwrap_or_default(),
        })
    }
}

//---------------------------------------------------------------------------//
//                         Implementation of CarPart
//---------------------------------------------------------------------------//

impl CarPart {

    /// This function reads a part from its block. `offset_key` is the name of the parameter with its location.
    fn from_block(block: &ParameterBlock, offset_key: &str) -> Result<Self> {
        let model_num = match block.get_parameter(&["ModelNum"]) {
            Some(value) => value.parse::<i32>()?,
            None => -1,
        };

        let offset = match block.get_parameters(&[offset_key]) {
            Some([x, y, z]) => Some(Vector3::new(parse_offset(x)?, parse_offset(y)?, parse_offset(z)?)),
            _ => None,
        };

        Ok(Self {
            model_num,
            offset,
        })
    }

    /// This function returns the location of the part in external space.
    pub fn offset_to_external(&self, transform: &Transform) -> Option<Vector3<f32>> {
        self.offset.map(|offset| transform.point_to_external(&offset))
    }
}

fn parse_offset(value: &str) -> Result<f32> {
    Ok(OFFSET_JUNK.replace_all(value, "").parse::<f32>()?)
}
