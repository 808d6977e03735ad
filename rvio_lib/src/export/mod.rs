//---------------------------------------------------------------------------//
// Copyright (c) 2024 The rvio contributors. All rights reserved.
//
// This file is part of the Re-Volt I/O (rvio) project.
//
// This file is licensed under the MIT license, which can be found in the
// LICENSE file at the root of this repository.
//---------------------------------------------------------------------------//

//! Functions to export external geometry and level data into Re-Volt files.
//!
//! Everything is encoded in memory first, then written to a temporary file next to the destination
//! and moved over it. If anything fails, the destination is left as it was.

use log::info;

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{RLibError, Result};
use crate::files::{Encodeable, EncodeableExtraData};
use crate::files::fin::Fin;
use crate::files::fob::Fob;
use crate::files::hul::{self, HullGeometry};
use crate::files::inf::WorldInfo;
use crate::files::{ncp, prm, w};
use crate::geometry::Mesh;
use crate::transform::Transform;

#[cfg(test)] mod export_test;

//---------------------------------------------------------------------------//
//                            Export functions
//---------------------------------------------------------------------------//

/// This function exports a mesh as a model (`.prm`/`.m`).
///
/// If `include_textures` is false, every polygon is written untextured.
pub fn export_model(path: &Path, mesh: &Mesh, transform: &Transform, include_textures: bool) -> Result<()> {
    let data = prm::encode_model(mesh, transform, include_textures)?;
    write_file(path, &data)?;

    info!("Model {} exported: {} faces.", path.display(), mesh.faces().len());
    Ok(())
}

/// This function exports a mesh as a world (`.w`).
pub fn export_world(path: &Path, mesh: &Mesh, transform: &Transform) -> Result<()> {
    let data = w::encode_world(mesh, transform)?;
    write_file(path, &data)?;

    info!("World {} exported: {} faces.", path.display(), mesh.faces().len());
    Ok(())
}

/// This function exports a mesh as a collision file (`.ncp`).
///
/// `cell_size` is the size of the lookup grid cells, in file units. With None, a single cell is used.
pub fn export_hitbox(path: &Path, mesh: &Mesh, transform: &Transform, cell_size: Option<f32>) -> Result<()> {
    let data = ncp::encode_hitbox(mesh, transform, cell_size)?;
    write_file(path, &data)?;

    info!("Hitbox {} exported: {} cells.", path.display(), mesh.faces().len());
    Ok(())
}

/// This function exports an already built convex hull (`.hul`).
pub fn export_hull(path: &Path, geometry: &HullGeometry, transform: &Transform) -> Result<()> {
    let data = hul::encode_hull(geometry, transform)?;
    write_file(path, &data)?;

    info!("Hull {} exported: {} vertices.", path.display(), geometry.vertices().len());
    Ok(())
}

/// This function exports the world info (`.inf`).
pub fn export_world_info(path: &Path, world_info: &WorldInfo) -> Result<()> {
    write_file(path, world_info.to_text().as_bytes())?;

    info!("World info {} exported.", path.display());
    Ok(())
}

/// This function exports the model instances of a world (`.fin`).
pub fn export_instances(path: &Path, instances: &mut Fin) -> Result<()> {
    let data = encode(path, instances)?;
    write_file(path, &data)?;

    info!("Instances {} exported: {} instances.", path.display(), instances.instances().len());
    Ok(())
}

/// This function exports the objects of a world (`.fob`).
pub fn export_objects(path: &Path, objects: &mut Fob) -> Result<()> {
    let data = encode(path, objects)?;
    write_file(path, &data)?;

    info!("Objects {} exported: {} objects.", path.display(), objects.objects().len());
    Ok(())
}

//---------------------------------------------------------------------------//
//                              Utils
//---------------------------------------------------------------------------//

/// This function encodes a raw file in memory, using the name of `path` for the logs.
fn encode<T: Encodeable>(path: &Path, file: &mut T) -> Result<Vec<u8>> {
    let file_name = path.file_name().map(|name| name.to_string_lossy().to_string());
    let mut extra_data = EncodeableExtraData::default();
    extra_data.set_file_name(file_name.as_deref());

    let mut data = vec![];
    file.encode(&mut data, &Some(extra_data))?;
    Ok(data)
}

/// This function replaces the file at `path` with `data`, through a temporary file in the same folder.
fn write_file(path: &Path, data: &[u8]) -> Result<()> {
    let folder = match path.parent() {
        Some(folder) if folder.as_os_str().is_empty() => Path::new("."),
        Some(folder) => folder,
        None => return Err(RLibError::PathWithoutParent(path.display().to_string())),
    };

    let mut file = NamedTempFile::new_in(folder)?;
    file.write_all(data)?;
    file.as_file().sync_all()?;
    file.persist(path)?;

    Ok(())
}
