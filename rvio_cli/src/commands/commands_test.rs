//---------------------------------------------------------------------------//
// Copyright (c) 2024 The rvio contributors. All rights reserved.
//
// This file is part of the Re-Volt I/O (rvio) project.
//
// This file is licensed under the MIT license, which can be found in the
// LICENSE file at the root of this repository.
//---------------------------------------------------------------------------//

//! Module containing tests for the CLI commands.

use std::fs;

use rvio_lib::export::{export_hull, export_model};
use rvio_lib::files::hul::{BruteForceHullBuilder, ConvexHullBuilder};
use rvio_lib::import::import_hull;
use rvio_lib::geometry::{Face, Mesh, Vertex};

use nalgebra::Vector3;

use super::*;

fn config() -> Config {
    Config::new(false, 0.01).unwrap()
}

fn triangle_mesh() -> Mesh {
    let vertices = vec![
        Vertex::new(Vector3::new(0.0, 0.0, 0.0), Vector3::z()),
        Vertex::new(Vector3::new(1.0, 0.0, 0.0), Vector3::z()),
        Vertex::new(Vector3::new(0.0, 1.0, 0.0), Vector3::z()),
    ];

    Mesh::new(vertices, vec![Face::new(vec![0, 1, 2])])
}

#[test]
fn test_model_summary() {
    let folder = tempfile::tempdir().unwrap();
    let path = folder.path().join("triangle.prm");
    export_model(&path, &triangle_mesh(), &config().transform, true).unwrap();

    let summary = info::summary(&config(), &path).unwrap();
    assert!(summary.starts_with("Model "));
    assert!(summary.contains("  Vertices: 3"));
    assert!(summary.contains("  Faces: 1"));
}

#[test]
fn test_unknown_and_missing_files() {
    let folder = tempfile::tempdir().unwrap();
    assert!(info::summary(&config(), &folder.path().join("readme.txt")).is_err());
    assert!(info::summary(&config(), &folder.path().join("missing.w")).is_err());
    assert!(command_check(&config(), &[folder.path().join("missing.prm")]).is_err());
}

#[test]
fn test_json_conversion() {
    let folder = tempfile::tempdir().unwrap();
    let path = folder.path().join("triangle.prm");
    export_model(&path, &triangle_mesh(), &config().transform, true).unwrap();

    let json_path = folder.path().join("triangle.json");
    command_decode(&config(), &path, Some(&json_path)).unwrap();

    let copy = folder.path().join("copy.prm");
    command_encode(&config(), &json_path, &copy, false, None).unwrap();
    assert!(fs::metadata(&copy).unwrap().len() > 0);

    let original = rvio_lib::import::import_model(&path, &config().transform).unwrap().unwrap();
    let copied = rvio_lib::import::import_model(&copy, &config().transform).unwrap().unwrap();
    assert_eq!(original.faces().len(), copied.faces().len());
    for (a, b) in original.vertices().iter().zip(copied.vertices()) {
        assert!((a.position() - b.position()).norm() < 0.0001);
    }

    // Hulls can be built from the vertices of a mesh.
    let mut mesh = triangle_mesh();
    mesh.vertices_mut().push(Vertex::new(Vector3::new(0.0, 0.0, 1.0), Vector3::z()));
    let hull = folder.path().join("triangle.hul");
    convert::from_json(&config(), &serde_json::to_string(&mesh).unwrap(), &hull, true, None).unwrap();
    assert!(info::summary(&config(), &hull).unwrap().contains("  Vertices: 4"));

    assert!(convert::from_json(&config(), "{}", &folder.path().join("parameters.txt"), true, None).is_err());
}

#[test]
fn test_hull_json_conversion() {
    let folder = tempfile::tempdir().unwrap();
    let mut points = vec![];
    for x in [-1.0, 1.0] {
        for y in [-1.0, 1.0] {
            for z in [-1.0, 1.0] {
                points.push(Vector3::new(x, y, z));
            }
        }
    }

    let path = folder.path().join("cube.hul");
    let geometry = BruteForceHullBuilder.build(&points).unwrap();
    export_hull(&path, &geometry, &config().transform).unwrap();

    let json_path = folder.path().join("cube.json");
    command_decode(&config(), &path, Some(&json_path)).unwrap();

    let copy = folder.path().join("copy.hul");
    command_encode(&config(), &json_path, &copy, false, None).unwrap();

    let hull = import_hull(&copy, &config().transform).unwrap().unwrap();
    assert_eq!(hull.geometry().vertices().len(), 8);
    assert_eq!(hull.spheres().len(), 125);
    assert!(hull.spheres().iter().all(|sphere| sphere.radius().is_finite() && *sphere.radius() > 0.0));
}

#[test]
fn test_invalid_scale() {
    assert!(Config::new(false, 0.0).is_err());
    assert!(Config::new(false, -1.0).is_err());
    assert!(Config::new(false, f32::NAN).is_err());
}
