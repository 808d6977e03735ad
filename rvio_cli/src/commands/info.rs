//---------------------------------------------------------------------------//
// Copyright (c) 2024 The rvio contributors. All rights reserved.
//
// This file is part of the Re-Volt I/O (rvio) project.
//
// This file is licensed under the MIT license, which can be found in the
// LICENSE file at the root of this repository.
//---------------------------------------------------------------------------//

use anyhow::Result;
use nalgebra::Vector3;

use std::fmt::Write;
use std::path::Path;

use rvio_lib::error::RLibError;
use rvio_lib::files::FileType;
use rvio_lib::geometry::Mesh;
use rvio_lib::import::*;

use crate::config::Config;
use super::required;

/// This function decodes a file and returns a human-readable summary of it.
pub fn summary(config: &Config, path: &Path) -> Result<String> {
    let transform = &config.transform;
    let mut summary = String::new();

    match FileType::from_path(path) {
        FileType::Model => {
            let mesh = required(path, import_model(path, transform)?)?;
            writeln!(summary, "Model {}", path.display())?;
            write_mesh(&mut summary, &mesh)?;
        }

        FileType::World => {
            let world = required(path, import_world(path, transform, &WorldImportSettings::default())?)?;
            writeln!(summary, "World {}", path.display())?;
            write_mesh(&mut summary, world.mesh())?;

            if let Some(info) = world.info() {
                writeln!(summary, "  Name: {}", info.name())?;
            }
            if let Some(hitbox) = world.hitbox() {
                writeln!(summary, "  Collision cells: {}", hitbox.faces().len())?;
            }
            if let Some(instances) = world.instances() {
                writeln!(summary, "  Instances: {}", instances.instances().len())?;
            }
            if let Some(objects) = world.objects() {
                writeln!(summary, "  Objects: {}", objects.objects().len())?;
            }
        }

        FileType::Hitbox => {
            let mesh = required(path, import_hitbox(path, transform)?)?;
            writeln!(summary, "Hitbox {}", path.display())?;
            write_mesh(&mut summary, &mesh)?;
        }

        FileType::ConvexHull => {
            let hull = required(path, import_hull(path, transform)?)?;
            writeln!(summary, "Convex hull {}", path.display())?;
            writeln!(summary, "  Vertices: {}", hull.geometry().vertices().len())?;
            writeln!(summary, "  Edges: {}", hull.geometry().edges().len())?;
            writeln!(summary, "  Spheres: {}", hull.spheres().len())?;
        }

        FileType::Instances => {
            let instances = required(path, import_instances(path)?)?;
            writeln!(summary, "Instances {}: {}", path.display(), instances.instances().len())?;
            for instance in instances.instances() {
                writeln!(summary, "  {} at {}", instance.model_name(), format_vector(&instance.location_to_external(transform)))?;
            }
        }

        FileType::Objects => {
            let objects = required(path, import_objects(path)?)?;
            writeln!(summary, "Objects {}: {}", path.display(), objects.objects().len())?;
            for object in objects.objects() {
                writeln!(summary, "  {:?} at {}", object.kind(), format_vector(&object.location_to_external(transform)))?;
            }
        }

        FileType::WorldInfo => {
            let info = required(path, import_world_info(path)?)?;
            writeln!(summary, "World info {}", path.display())?;
            writeln!(summary, "  Name: {}", info.name())?;
            writeln!(summary, "  Far clip: {}", info.farclip_to_external(transform))?;
            if let Some(startpos) = info.startpos_to_external(transform) {
                writeln!(summary, "  Start: {}", format_vector(&startpos))?;
            }
        }

        FileType::CarParameters => {
            let car = required(path, import_car(path, transform)?)?;
            writeln!(summary, "Car {}", path.display())?;
            writeln!(summary, "  Name: {}", car.parameters().name())?;
            writeln!(summary, "  Wheels: {}", car.parameters().wheels().len())?;
            writeln!(summary, "  Models loaded: {} of {}", car.models().len(), car.parameters().models().len())?;
        }

        FileType::Unknown => return Err(RLibError::UnknownFileType(path.display().to_string()).into()),
    }

    Ok(summary.trim_end().to_owned())
}

fn write_mesh(summary: &mut String, mesh: &Mesh) -> Result<()> {
    writeln!(summary, "  Vertices: {}", mesh.vertices().len())?;
    writeln!(summary, "  Faces: {}", mesh.faces().len())?;
    if let Some((min, max)) = mesh.bounds() {
        writeln!(summary, "  Bounds: {} to {}", format_vector(&min), format_vector(&max))?;
    }

    Ok(())
}

fn format_vector(vector: &Vector3<f32>) -> String {
    format!("({:.3}, {:.3}, {:.3})", vector.x, vector.y, vector.z)
}
