//---------------------------------------------------------------------------//
// Copyright (c) 2024 The rvio contributors. All rights reserved.
//
// This file is part of the Re-Volt I/O (rvio) project.
//
// This file is licensed under the MIT license, which can be found in the
// LICENSE file at the root of this repository.
//---------------------------------------------------------------------------//

//! Module containing tests for exporting files to disk.

use nalgebra::Vector3;

use std::fs;

use crate::files::hul::{BruteForceHullBuilder, ConvexHullBuilder};
use crate::geometry::{Face, Vertex};

use super::*;

fn triangle_mesh() -> Mesh {
    let vertices = vec![
        Vertex::new(Vector3::new(0.0, 0.0, 0.0), Vector3::z()),
        Vertex::new(Vector3::new(1.0, 0.0, 0.0), Vector3::z()),
        Vertex::new(Vector3::new(0.0, 1.0, 0.0), Vector3::z()),
    ];

    Mesh::new(vertices, vec![Face::new(vec![0, 1, 2])])
}

#[test]
fn test_export_replaces_files() {
    let folder = tempfile::tempdir().unwrap();
    let path = folder.path().join("triangle.prm");
    fs::write(&path, b"old data").unwrap();

    export_model(&path, &triangle_mesh(), &Transform::default(), true).unwrap();
    let data = fs::read(&path).unwrap();
    assert_eq!(data, prm::encode_model(&triangle_mesh(), &Transform::default(), true).unwrap());

    // No temporary files are left behind.
    assert_eq!(fs::read_dir(folder.path()).unwrap().count(), 1);
}

#[test]
fn test_failed_export_keeps_files() {
    let folder = tempfile::tempdir().unwrap();
    let path = folder.path().join("broken.prm");
    fs::write(&path, b"old data").unwrap();

    let mut mesh = triangle_mesh();
    mesh.faces_mut().push(Face::new(vec![0, 1]));
    assert!(export_model(&path, &mesh, &Transform::default(), true).is_err());
    assert!(export_world(&folder.path().join("broken.w"), &mesh, &Transform::default()).is_err());

    assert_eq!(fs::read(&path).unwrap(), b"old data");
    assert!(!folder.path().join("broken.w").exists());
    assert_eq!(fs::read_dir(folder.path()).unwrap().count(), 1);
}

#[test]
fn test_export_hull() {
    let folder = tempfile::tempdir().unwrap();
    let path = folder.path().join("car.hul");
    let transform = Transform::default();

    let points = vec![
        Vector3::new(0.0, 0.0, 0.0),
        Vector3::new(1.0, 0.0, 0.0),
        Vector3::new(0.0, 1.0, 0.0),
        Vector3::new(0.0, 0.0, 1.0),
    ];
    let geometry = BruteForceHullBuilder.build(&points).unwrap();
    export_hull(&path, &geometry, &transform).unwrap();
    assert_eq!(fs::read(&path).unwrap(), hul::encode_hull(&geometry, &transform).unwrap());

    assert!(export_hull(&folder.path().join("empty.hul"), &HullGeometry::default(), &transform).is_err());
    assert!(!folder.path().join("empty.hul").exists());
}

#[test]
fn test_export_world_info() {
    let folder = tempfile::tempdir().unwrap();
    let path = folder.path().join("level.inf");

    let mut info = WorldInfo::default();
    info.set_name("Level".to_owned());
    info.set_farclip(5000.0);
    export_world_info(&path, &info).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("NAME         'Level'\n"));
    assert_eq!(WorldInfo::from_text(&text).unwrap().farclip(), &5000.0);
}

#[test]
fn test_export_instances() {
    let folder = tempfile::tempdir().unwrap();
    let mut instances = Fin::default();
    let path = folder.path().join("level.fin");

    export_instances(&path, &mut instances).unwrap();
    assert_eq!(fs::read(&path).unwrap(), vec![0u8; 4]);

    assert!(matches!(write_file(Path::new("/"), b""), Err(RLibError::PathWithoutParent(_))));
}
