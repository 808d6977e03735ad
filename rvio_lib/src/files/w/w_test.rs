//---------------------------------------------------------------------------//
// Copyright (c) 2024 The rvio contributors. All rights reserved.
//
// This file is part of the Re-Volt I/O (rvio) project.
//
// This file is licensed under the MIT license, which can be found in the
// LICENSE file at the root of this repository.
//---------------------------------------------------------------------------//

//! Module containing tests for decoding/encoding `World` files.

use float_eq::assert_float_eq;
use nalgebra::Vector3;

use std::io::Cursor;

use crate::binary::WriteBytes;
use crate::error::RLibError;
use crate::files::prm::{Polygon, Vertex};
use crate::geometry::{self, PolygonFlags};

use super::*;

fn polygon(flags: u16, indices: [i16; 4]) -> Polygon {
    let mut polygon = Polygon::default();
    polygon.set_flags(PolygonFlags::from_bits_retain(flags));
    polygon.set_indices(indices);
    polygon
}

/// A world with two meshes: the first one has an env-mapped triangle, a degenerate env-mapped triangle
/// and a plain quad. The second one has an env-mapped triangle.
fn test_world() -> World {
    let vertices = vec![
        Vertex::new(Vector3::new(0.0, 0.0, 0.0), Vector3::new(0.0, -1.0, 0.0)),
        Vertex::new(Vector3::new(100.0, 0.0, 0.0), Vector3::new(0.0, -1.0, 0.0)),
        Vertex::new(Vector3::new(100.0, 0.0, 100.0), Vector3::new(0.0, -1.0, 0.0)),
        Vertex::new(Vector3::new(0.0, 0.0, 100.0), Vector3::new(0.0, -1.0, 0.0)),
    ];

    let mut first = Prm::default();
    first.set_polygons(vec![
        polygon(0x0800, [0, 1, 2, 0]),
        polygon(0x0800, [0, 0, 2, 0]),
        polygon(0x0001, [0, 1, 2, 3]),
    ]);
    first.set_vertices(vertices.clone());

    let mut second = Prm::default();
    second.set_polygons(vec![polygon(0x0802, [1, 2, 3, 0])]);
    second.set_vertices(vertices);

    let mut meshes = vec![WorldMesh::default(), WorldMesh::default()];
    meshes[0].set_model(first);
    meshes[1].set_model(second);

    let mut animation = TextureAnimation::default();
    let mut frame = Frame::default();
    frame.set_texture(3);
    frame.set_delay(50.0);
    animation.set_frames(vec![frame]);

    let mut world = World::default();
    world.set_meshes(meshes);
    world.set_big_cubes(vec![BigCube::new(Vector3::new(50.0, 0.0, 50.0), 70.0, vec![0, 1])]);
    world.set_animations(vec![animation]);
    world.set_env_colours(vec![0xFF00_0001, 0xFF00_0002, 0xFF00_0003]);
    world
}

fn encoded(world: &World) -> Vec<u8> {
    let mut world = world.clone();
    let mut data = vec![];
    world.encode(&mut data, &None).unwrap();
    data
}

#[test]
fn test_decode_world() {
    let world = test_world();
    assert_eq!(world.env_count(), 3);

    let data = encoded(&world);
    let decoded = World::decode(&mut Cursor::new(&data), &None).unwrap();
    assert_eq!(decoded, world);
    assert_eq!(encoded(&decoded), data);
}

#[test]
fn test_decode_world_wrong_env_count() {
    let data = encoded(&test_world());

    // One colour more than env-mapped polygons.
    let mut longer = data.clone();
    longer.write_u32(0xFF00_0004).unwrap();
    let result = World::decode(&mut Cursor::new(&longer), &None);
    assert!(matches!(result, Err(RLibError::DecodingMismatchSizeError(_, _))));

    // One colour less.
    let shorter = &data[..data.len() - 4];
    let result = World::decode(&mut Cursor::new(shorter), &None);
    assert!(matches!(result, Err(RLibError::TruncatedInput(_, _))));
}

#[test]
fn test_decode_world_invalid_counts() {
    let mut data = vec![];
    data.write_i32(-3).unwrap();
    let result = World::decode(&mut Cursor::new(&data), &None);
    assert!(matches!(result, Err(RLibError::InvalidCount("mesh", -3, 0))));

    let mut data = vec![];
    data.write_i32(0).unwrap();
    data.write_i32(1_000_000).unwrap();
    let result = World::decode(&mut Cursor::new(&data), &None);
    assert!(matches!(result, Err(RLibError::InvalidCount("big cube", 1_000_000, 0))));
}

#[test]
fn test_encode_world_fixes_env_colours() {
    let mut world = test_world();
    world.set_env_colours(vec![0xFF00_0001]);

    let mut extra_data = EncodeableExtraData::default();
    extra_data.set_env_colour_fallback(Some(0x8000_00FF));

    let mut data = vec![];
    world.encode(&mut data, &Some(extra_data)).unwrap();

    let decoded = World::decode(&mut Cursor::new(&data), &None).unwrap();
    assert_eq!(decoded.env_colours(), &vec![0xFF00_0001, 0x8000_00FF, 0x8000_00FF]);

    // Extra colours are dropped.
    world.set_env_colours(vec![1, 2, 3, 4, 5]);
    let decoded = World::decode(&mut Cursor::new(&encoded(&world)), &None).unwrap();
    assert_eq!(decoded.env_colours(), &vec![1, 2, 3]);
}

#[test]
fn test_world_to_mesh() {
    let mesh = test_world().to_mesh(&Transform::default());

    assert_eq!(mesh.vertices().len(), 8);
    assert_eq!(mesh.faces().len(), 3);

    // The degenerate polygon is skipped, but its colour isn't given to the next one.
    assert_eq!(*mesh.faces()[0].env_colour(), Some(0xFF00_0001));
    assert_eq!(*mesh.faces()[1].env_colour(), None);
    assert_eq!(*mesh.faces()[2].env_colour(), Some(0xFF00_0003));

    // Indices of the second mesh are offset by the vertices of the first one.
    assert_eq!(mesh.faces()[2].indices(), &vec![7, 6, 5]);
}

#[test]
fn test_world_from_mesh() {
    let transform = Transform::default();
    let vertices = vec![
        geometry::Vertex::new(Vector3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 1.0)),
        geometry::Vertex::new(Vector3::new(2.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 1.0)),
        geometry::Vertex::new(Vector3::new(2.0, 2.0, 0.0), Vector3::new(0.0, 0.0, 1.0)),
        geometry::Vertex::new(Vector3::new(0.0, 2.0, 0.0), Vector3::new(0.0, 0.0, 1.0)),
    ];

    let mut env_face = Face::new(vec![0, 1, 2]);
    env_face.set_flags(PolygonFlags::ENV);
    env_face.set_env_colour(Some(0xFF12_3456));

    let mut plain_env_face = Face::new(vec![0, 2, 3]);
    plain_env_face.set_flags(PolygonFlags::ENV);

    let quad = Face::new(vec![0, 1, 2, 3]);

    let mesh = Mesh::new(vertices, vec![env_face, plain_env_face, quad]);
    let world = World::from_mesh(&mesh, &transform).unwrap();

    assert_eq!(world.meshes().len(), 3);
    assert_eq!(world.env_colours(), &vec![0xFF12_3456, DEFAULT_ENV_COLOUR]);
    assert!(world.animations().is_empty());

    // Each mesh has its own copy of the face vertices.
    assert_eq!(world.meshes()[0].model().vertices().len(), 3);
    assert_eq!(world.meshes()[2].model().vertices().len(), 4);

    // The first face spans from (0, 0) to (2, 2) externally, so (0, 0, 0) to (200, 0, 200) in the file.
    let first = &world.meshes()[0];
    assert_float_eq!(*first.bbox().x_hi(), 200.0, abs <= 0.001);
    assert_float_eq!(*first.bbox().z_hi(), 200.0, abs <= 0.001);
    assert_float_eq!(first.bounding_sphere().center().x, 100.0, abs <= 0.001);
    assert_float_eq!(*first.bounding_sphere().radius(), 100.0 * 2.0f32.sqrt(), abs <= 0.001);

    let big_cube = &world.big_cubes()[0];
    assert_eq!(big_cube.mesh_indices(), &vec![0, 1, 2]);
    assert_float_eq!(big_cube.sphere().center().z, 100.0, abs <= 0.001);
    assert_float_eq!(*big_cube.sphere().radius(), 100.0 * 2.0f32.sqrt(), abs <= 0.001);

    // And the whole thing goes back to the same faces.
    let data = encode_world(&mesh, &transform).unwrap();
    let decoded = decode_world(&mut Cursor::new(&data), &transform, &None).unwrap();
    assert_eq!(decoded.faces().len(), 3);
    assert_eq!(*decoded.faces()[0].env_colour(), Some(0xFF12_3456));
    assert_eq!(decoded.faces()[2].indices().len(), 4);
}

#[test]
fn test_world_from_mesh_errors() {
    let mesh = Mesh::new(vec![geometry::Vertex::default(); 3], vec![Face::new(vec![0, 1, 5])]);
    assert!(matches!(World::from_mesh(&mesh, &Transform::default()), Err(RLibError::EncodingVertexIndexOutOfRange(0, 5, 3))));

    let mesh = Mesh::new(vec![geometry::Vertex::default(); 3], vec![Face::new(vec![0, 1, 2]), Face::new(vec![0, 1])]);
    assert!(matches!(World::from_mesh(&mesh, &Transform::default()), Err(RLibError::EncodingUnsupportedPolygon(1, 2))));
}
