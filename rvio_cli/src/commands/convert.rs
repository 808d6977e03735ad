//---------------------------------------------------------------------------//
// Copyright (c) 2024 The rvio contributors. All rights reserved.
//
// This file is part of the Re-Volt I/O (rvio) project.
//
// This file is licensed under the MIT license, which can be found in the
// LICENSE file at the root of this repository.
//---------------------------------------------------------------------------//

//! Conversion between Re-Volt files and JSON.
//!
//! Geometry goes to JSON in external space. Instances and objects stay in file space, as they're stored.

use anyhow::{anyhow, Result};
use serde_json::Value;

use std::path::Path;

use rvio_lib::error::RLibError;
use rvio_lib::export::*;
use rvio_lib::files::FileType;
use rvio_lib::files::fin::{self, Fin};
use rvio_lib::files::fob::{self, Fob};
use rvio_lib::files::hul::{BruteForceHullBuilder, ConvexHull, ConvexHullBuilder};
use rvio_lib::files::inf::{self, WorldInfo};
use rvio_lib::files::ncp;
use rvio_lib::geometry::Mesh;
use rvio_lib::import::*;

use crate::config::Config;
use super::required;

/// This function decodes a file into pretty-printed JSON.
pub fn to_json(config: &Config, path: &Path) -> Result<String> {
    let transform = &config.transform;
    let json = match FileType::from_path(path) {
        FileType::Model => serde_json::to_string_pretty(&required(path, import_model(path, transform)?)?)?,
        FileType::World => serde_json::to_string_pretty(&required(path, import_world(path, transform, &WorldImportSettings::default())?)?)?,
        FileType::Hitbox => serde_json::to_string_pretty(&required(path, import_hitbox(path, transform)?)?)?,
        FileType::ConvexHull => serde_json::to_string_pretty(&required(path, import_hull(path, transform)?)?)?,
        FileType::Instances => serde_json::to_string_pretty(&required(path, import_instances(path)?)?)?,
        FileType::Objects => serde_json::to_string_pretty(&required(path, import_objects(path)?)?)?,
        FileType::WorldInfo => serde_json::to_string_pretty(&required(path, import_world_info(path)?)?)?,
        FileType::CarParameters => serde_json::to_string_pretty(&required(path, import_car(path, transform)?)?)?,
        FileType::Unknown => return Err(RLibError::UnknownFileType(path.display().to_string()).into()),
    };

    Ok(json)
}

/// This function encodes JSON into the file at `path`. Its format is guessed from its name.
///
/// Worlds accept either a mesh, or a world as decoded by [`to_json`], in which case its companion files are written too.
/// Hulls accept either a hull as decoded by [`to_json`], or a mesh whose vertices are wrapped in a new hull.
/// Decoded hulls have no faces, so their hull is built again from their vertices.
pub fn from_json(config: &Config, json: &str, path: &Path, include_textures: bool, cell_size: Option<f32>) -> Result<()> {
    let transform = &config.transform;
    match FileType::from_path(path) {
        FileType::Model => export_model(path, &serde_json::from_str::<Mesh>(json)?, transform, include_textures)?,

        FileType::World => {
            let value = serde_json::from_str::<Value>(json)?;
            if value.get("mesh").is_some() {
                let mut world = serde_json::from_value::<ImportedWorld>(value)?;
                export_world(path, world.mesh(), transform)?;

                if let Some(instances) = world.instances_mut() {
                    export_instances(&companion_path(path, fin::EXTENSION), instances)?;
                }
                if let Some(objects) = world.objects_mut() {
                    export_objects(&companion_path(path, fob::EXTENSION), objects)?;
                }
                if let Some(hitbox) = world.hitbox() {
                    export_hitbox(&companion_path(path, ncp::EXTENSION), hitbox, transform, cell_size)?;
                }
                if let Some(info) = world.info() {
                    export_world_info(&companion_path(path, inf::EXTENSION), info)?;
                }
            } else {
                export_world(path, &serde_json::from_value::<Mesh>(value)?, transform)?;
            }
        }

        FileType::Hitbox => export_hitbox(path, &serde_json::from_str::<Mesh>(json)?, transform, cell_size)?,

        FileType::ConvexHull => {
            let value = serde_json::from_str::<Value>(json)?;
            if value.get("geometry").is_some() {
                let hull = serde_json::from_value::<ConvexHull>(value)?;
                export_hull(path, &hull.closed_geometry(&BruteForceHullBuilder)?, transform)?;
            } else {
                let mesh = serde_json::from_value::<Mesh>(value)?;
                let points = mesh.vertices().iter().map(|vertex| *vertex.position()).collect::<Vec<_>>();
                export_hull(path, &BruteForceHullBuilder.build(&points)?, transform)?;
            }
        }

        FileType::Instances => export_instances(path, &mut serde_json::from_str::<Fin>(json)?)?,
        FileType::Objects => export_objects(path, &mut serde_json::from_str::<Fob>(json)?)?,
        FileType::WorldInfo => export_world_info(path, &serde_json::from_str::<WorldInfo>(json)?)?,
        FileType::CarParameters => return Err(anyhow!("Car parameters can only be decoded.")),
        FileType::Unknown => return Err(RLibError::UnknownFileType(path.display().to_string()).into()),
    }

    Ok(())
}
