//---------------------------------------------------------------------------//
// Copyright (c) 2024 The rvio contributors. All rights reserved.
//
// This file is part of the Re-Volt I/O (rvio) project.
//
// This file is licensed under the MIT license, which can be found in the
// LICENSE file at the root of this repository.
//---------------------------------------------------------------------------//

//! Module with the geometry representation exchanged with the outside world.
//!
//! A [`Mesh`] lives in external space (right-handed, Z up). Faces keep every per-face and per-corner
//! attribute the formats can store, so a host application can edit them and hand them back for encoding.

use bitflags::bitflags;
use getset::*;
use nalgebra::Vector3;
use serde_derive::{Serialize, Deserialize};


//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

bitflags! {

    /// The type bit-field of a polygon. Bits we don't know about are kept as they are.
    #[derive(PartialEq, Eq, Clone, Copy, Debug, Default, Serialize, Deserialize)]
    pub struct PolygonFlags: u16 {
        const QUAD = 0x0001;
        const DOUBLE_SIDED = 0x0002;
        const TRANSLUCENT = 0x0004;
        const MIRROR = 0x0080;
        const ADDITIVE = 0x0100;
        const TEXTURE_ANIMATION = 0x0200;
        const NO_ENV = 0x0400;
        const ENV = 0x0800;
        const CLOTH = 0x1000;
        const NO_EXPORT = 0x2000;

        const _ = !0;
    }
}

/// A polygon mesh, in external space.
#[derive(Default, PartialEq, Clone, Debug, Getters, MutGetters, Setters, Serialize, Deserialize)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct Mesh {
    vertices: Vec<Vertex>,
    faces: Vec<Face>,
}

/// A vertex of a [`Mesh`].
#[derive(Default, PartialEq, Clone, Debug, Getters, MutGetters, Setters, Serialize, Deserialize)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct Vertex {
    position: Vector3<f32>,
    normal: Vector3<f32>,
}

/// A face of a [`Mesh`]. Triangles have 3 corners, quads have 4.
///
/// `colours` and `uvs` go in the same order as `indices`. If they're shorter, the missing corners get defaults when encoding.
#[derive(PartialEq, Clone, Debug, Getters, MutGetters, Setters, Serialize, Deserialize)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct Face {
    indices: Vec<usize>,

    /// Full type bit-field. The quad bit is recomputed from the corner count when encoding.
    flags: PolygonFlags,

    /// Texture page. Negative means untextured.
    texture: i16,
    colours: Vec<Colour>,
    uvs: Vec<[f32; 2]>,

    /// Surface material, for collision meshes.
    material: i32,

    /// Environment map colour, for world faces with the env flag.
    env_colour: Option<u32>,
}

/// A colour with all its channels between 0 and 1.
#[derive(PartialEq, Clone, Copy, Debug, Getters, MutGetters, Setters, Serialize, Deserialize)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct Colour {
    r: f32,
    g: f32,
    b: f32,
    a: f32,
}

//---------------------------------------------------------------------------//
//                           Implementation of Mesh
//---------------------------------------------------------------------------//

impl Mesh {

    /// This function creates a mesh from its vertices and faces.
    pub fn new(vertices: Vec<Vertex>, faces: Vec<Face>) -> Self {
        Self {
            vertices,
            faces,
        }
    }

    /// This function returns the corner positions of a face.
    ///
    /// Indices out of range are ignored.
    pub fn face_positions(&self, face: &Face) -> Vec<Vector3<f32>> {
        face.indices.iter()
            .filter_map(|index| self.vertices.get(*index))
            .map(|vertex| vertex.position)
            .collect()
    }

    /// This function returns the min and max corners of the bounding box of all the vertices, or None if the mesh has no vertices.
    pub fn bounds(&self) -> Option<(Vector3<f32>, Vector3<f32>)> {
        bounds(self.vertices.iter().map(|vertex| vertex.position))
    }
}

/// This function returns the min and max corners of the bounding box of a set of points, or None if there are no points.
pub fn bounds<I: IntoIterator<Item = Vector3<f32>>>(points: I) -> Option<(Vector3<f32>, Vector3<f32>)> {
    points.into_iter().fold(None, |acc, point| match acc {
        Some((min, max)) => Some((min.inf(&point), max.sup(&point))),
        None => Some((point, point)),
    })
}

/// This function returns the unit normal of a polygon, using Newell's method so quads that aren't
/// completely flat still get a sensible normal. The normal follows the counter-clockwise winding.
pub fn polygon_normal(points: &[Vector3<f32>]) -> Vector3<f32> {
    let mut normal = Vector3::zeros();
    for (index, current) in points.iter().enumerate() {
        let next = &points[(index + 1) % points.len()];
        normal.x += (current.y - next.y) * (current.z + next.z);
        normal.y += (current.z - next.z) * (current.x + next.x);
        normal.z += (current.x - next.x) * (current.y + next.y);
    }

    normal.try_normalize(f32::EPSILON).unwrap_or_else(Vector3::zeros)
}

//---------------------------------------------------------------------------//
//                           Implementation of Vertex
//---------------------------------------------------------------------------//

impl Vertex {
    pub fn new(position: Vector3<f32>, normal: Vector3<f32>) -> Self {
        Self {
            position,
            normal,
        }
    }
}

//---------------------------------------------------------------------------//
//                           Implementation of Face
//---------------------------------------------------------------------------//

impl Default for Face {
    fn default() -> Self {
        Self {
            indices: vec![],
            flags: PolygonFlags::empty(),
            texture: -1,
            colours: vec![],
            uvs: vec![],
            material: 0,
            env_colour: None,
        }
    }
}

impl Face {

    /// This function creates an untextured face with white corners from its vertex indices.
    pub fn new(indices: Vec<usize>) -> Self {
        let corners = indices.len();
        Self {
            indices,
            colours: vec![Colour::default(); corners],
            uvs: vec![[0.0, 0.0]; corners],
            ..Default::default()
        }
    }

    /// This function returns if the face is a quad.
    pub fn is_quad(&self) -> bool {
        self.indices.len() == 4
    }
}

//---------------------------------------------------------------------------//
//                           Implementation of Colour
//---------------------------------------------------------------------------//

/// Opaque white.
impl Default for Colour {
    fn default() -> Self {
        Self::new(1.0, 1.0, 1.0, 1.0)
    }
}

impl Colour {
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// This function unpacks a `0xAARRGGBB` colour.
    pub fn from_argb(value: u32) -> Self {
        let channel = |shift: u32| ((value >> shift) & 0xFF) as f32 / 255.0;
        Self::new(channel(16), channel(8), channel(0), channel(24))
    }

    /// This function packs the colour as `0xAARRGGBB`, rounding and clamping each channel to 0-255.
    pub fn to_argb(&self) -> u32 {
        let channel = |value: f32| (value * 255.0).round().clamp(0.0, 255.0) as u32;
        (channel(self.a) << 24) | (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }
}
