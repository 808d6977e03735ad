//---------------------------------------------------------------------------//
// Copyright (c) 2024 The rvio contributors. All rights reserved.
//
// This file is part of the Re-Volt I/O (rvio) project.
//
// This file is licensed under the MIT license, which can be found in the
// LICENSE file at the root of this repository.
//---------------------------------------------------------------------------//

//! Functions to import Re-Volt files from disk into external space.
//!
//! Re-Volt content points to a lot of optional files, so a missing or empty file is not an error here:
//! these functions return `Ok(None)` for them. Any other failure aborts the import.

use getset::*;
use log::{debug, info};
use serde_derive::{Serialize, Deserialize};

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use crate::binary::ReadBytes;
use crate::error::Result;
use crate::files::{Decodeable, DecodeableExtraData};
use crate::files::car::{self, CarParameters};
use crate::files::fin::{self, Fin};
use crate::files::fob::{self, Fob};
use crate::files::hul::{self, ConvexHull};
use crate::files::inf::{self, WorldInfo};
use crate::files::{ncp, prm, w};
use crate::geometry::Mesh;
use crate::transform::Transform;
use crate::utils::open_if_not_empty;


//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// Which companion files are imported together with a world.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Getters, Setters, Serialize, Deserialize)]
#[getset(get = "pub", set = "pub")]
pub struct WorldImportSettings {
    instances: bool,
    objects: bool,
    hitbox: bool,
    info: bool,
}

/// A world with the companion files found next to it.
#[derive(Default, PartialEq, Clone, Debug, Getters, MutGetters, Setters, Serialize, Deserialize)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct ImportedWorld {
    mesh: Mesh,
    instances: Option<Fin>,
    objects: Option<Fob>,
    hitbox: Option<Mesh>,
    info: Option<WorldInfo>,
}

/// A car, with every model it uses loaded once.
#[derive(Default, PartialEq, Clone, Debug, Getters, MutGetters, Setters, Serialize, Deserialize)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct ImportedCar {
    parameters: CarParameters,

    /// Folder the model and texture paths are relative to.
    game_root: PathBuf,

    /// Models by their number in the parameters. Models missing on disk are not here.
    models: BTreeMap<i32, Mesh>,
}

//---------------------------------------------------------------------------//
//                   Implementation of WorldImportSettings
//---------------------------------------------------------------------------//

impl Default for WorldImportSettings {
    fn default() -> Self {
        Self {
            instances: true,
            objects: true,
            hitbox: true,
            info: true,
        }
    }
}

//---------------------------------------------------------------------------//
//                            Import functions
//---------------------------------------------------------------------------//

/// This function imports a model (`.prm`/`.m`) as an external mesh.
pub fn import_model(path: &Path, transform: &Transform) -> Result<Option<Mesh>> {
    decode_path(path, |data, extra_data| prm::decode_model(data, transform, extra_data))
}

/// This function imports a world (`.w`), and the companion files enabled in `settings`.
///
/// Companion files share the name of the world, with their own extension.
pub fn import_world(path: &Path, transform: &Transform, settings: &WorldImportSettings) -> Result<Option<ImportedWorld>> {
    let mesh = match decode_path(path, |data, extra_data| w::decode_world(data, transform, extra_data))? {
        Some(mesh) => mesh,
        None => return Ok(None),
    };

    let mut world = ImportedWorld {
        mesh,
        ..Default::default()
    };

    if settings.instances {
        world.instances = import_instances(&companion_path(path, fin::EXTENSION))?;
    }

    if settings.objects {
        world.objects = import_objects(&companion_path(path, fob::EXTENSION))?;
    }

    if settings.hitbox {
        world.hitbox = import_hitbox(&companion_path(path, ncp::EXTENSION), transform)?;
    }

    if settings.info {
        world.info = import_world_info(&companion_path(path, inf::EXTENSION))?;
    }

    info!("World {} imported: {} faces.", path.display(), world.mesh.faces().len());
    Ok(Some(world))
}

/// This function imports a collision file (`.ncp`) as an external mesh, with one face per cell.
pub fn import_hitbox(path: &Path, transform: &Transform) -> Result<Option<Mesh>> {
    decode_path(path, |data, extra_data| ncp::decode_hitbox(data, transform, extra_data))
}

/// This function imports a convex hull file (`.hul`).
pub fn import_hull(path: &Path, transform: &Transform) -> Result<Option<ConvexHull>> {
    decode_path(path, |data, extra_data| hul::decode_hull(data, transform, extra_data))
}

/// This function imports the instances file (`.fin`) of a world. They're kept in file space.
pub fn import_instances(path: &Path) -> Result<Option<Fin>> {
    decode_path(path, Fin::decode)
}

/// This function imports the objects file (`.fob`) of a world. They're kept in file space.
pub fn import_objects(path: &Path) -> Result<Option<Fob>> {
    decode_path(path, Fob::decode)
}

/// This function imports the world info file (`.inf`).
pub fn import_world_info(path: &Path) -> Result<Option<WorldInfo>> {
    match read_text(path)? {
        Some(text) => WorldInfo::from_text(&text).map(Some),
        None => Ok(None),
    }
}

/// This function imports a car from its `parameters.txt` file, loading each model it uses once.
///
/// Model paths are resolved against the game root, two folders above the car folder.
pub fn import_car(path: &Path, transform: &Transform) -> Result<Option<ImportedCar>> {
    let text = match read_text(path)? {
        Some(text) => text,
        None => return Ok(None),
    };

    let parameters = CarParameters::from_text(&text)?;
    let game_root = car::game_root(path).map(|root| root.to_path_buf()).unwrap_or_default();

    let mut model_nums = parameters.wheels().values().map(|wheel| wheel.part())
        .chain(parameters.axles().values())
        .chain(parameters.springs().values())
        .chain(parameters.body().iter())
        .map(|part| *part.model_num())
        .collect::<Vec<_>>();
    model_nums.sort_unstable();
    model_nums.dedup();

    let mut models = BTreeMap::new();
    for model_num in model_nums {
        if let Some(model_path) = parameters.model_path(model_num) {
            match import_model(&game_root.join(model_path), transform)? {
                Some(mesh) => { models.insert(model_num, mesh); },
                None => debug!("Model {model_num} of car {} not found: {model_path}.", path.display()),
            }
        }
    }

    info!("Car {} imported: {} models.", path.display(), models.len());
    Ok(Some(ImportedCar {
        parameters,
        game_root,
        models,
    }))
}

//---------------------------------------------------------------------------//
//                              Utils
//---------------------------------------------------------------------------//

/// This function returns the path of a file with the same name as `path` and the provided extension.
pub fn companion_path(path: &Path, extension: &str) -> PathBuf {
    path.with_extension(extension.trim_start_matches('.'))
}

/// This function opens `path` and decodes it with `decode`, if the file exists and has data.
fn decode_path<T, F>(path: &Path, decode: F) -> Result<Option<T>>
    where F: FnOnce(&mut BufReader<File>, &Option<DecodeableExtraData>) -> Result<T>
{
    let file = match open_if_not_empty(path)? {
        Some(file) => file,
        None => {
            debug!("Skipping {}: missing or empty.", path.display());
            return Ok(None);
        }
    };

    let file_name = path.file_name().map(|name| name.to_string_lossy().to_string());
    let mut extra_data = DecodeableExtraData::default();
    extra_data.set_file_name(file_name.as_deref());

    let mut data = BufReader::new(file);
    debug!("Decoding {} ({} bytes).", path.display(), data.len()?);

    decode(&mut data, &Some(extra_data)).map(Some)
}

/// This function reads a text file, if it exists and has data. Bytes that are not UTF-8 are replaced.
fn read_text(path: &Path) -> Result<Option<String>> {
    let mut file = match open_if_not_empty(path)? {
        Some(file) => file,
        None => {
            debug!("Skipping {}: missing or empty.", path.display());
            return Ok(None);
        }
    };

    let mut data = vec![];
    file.read_to_end(&mut data)?;
    Ok(Some(String::from_utf8_lossy(&data).into_owned()))
}
