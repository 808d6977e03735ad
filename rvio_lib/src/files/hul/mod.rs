//---------------------------------------------------------------------------//
// Copyright (c) 2024 The rvio contributors. All rights reserved.
//
// This file is part of the Re-Volt I/O (rvio) project.
//
// This file is licensed under the MIT license, which can be found in the
// LICENSE file at the root of this repository.
//---------------------------------------------------------------------------//

//! Convex hulls, as found in `.hul` files. Cars use them for collisions with the world and other objects.
//!
//! # Structure
//!
//! | Bytes | Type | Data |
//! | ----- | ---- | ---- |
//! | 2     | i16  | Hull count. Always 1 in practice. |
//! | *     | [`Hull`] | Hulls. |
//! | 2     | i16  | Sphere count. |
//! | 16 * Sphere count | [`Sphere`] | Spheres filling the inside of the hulls. |
//!
//! Each hull is:
//!
//! | Bytes | Type | Data |
//! | ----- | ---- | ---- |
//! | 6     | 3 x i16 | Vertex, edge and face counts. |
//! | 24    | [`BoundingBox`] | Bounding box. |
//! | 12    | 3 x f32 | Reserved. Always zero. |
//! | 12 * Vertex count | 3 x f32 | Vertices. |
//! | 4 * Edge count | 2 x i16 | Edges, as vertex index pairs. |
//! | 16 * Face count | [`Plane`] | Face planes. |

use getset::*;
use log::debug;
use nalgebra::Vector3;
use serde_derive::{Serialize, Deserialize};

use crate::binary::{ReadBytes, WriteBytes};
use crate::error::{RLibError, Result};
use crate::files::{decode_log_name, DecodeableExtraData, Decodeable, EncodeableExtraData, Encodeable};
use crate::files::common::{BoundingBox, Plane, Sphere};
use crate::geometry;
use crate::transform::Transform;
use crate::utils::{check_count, check_size_mismatch, count_as_i16};

pub use self::builder::{BruteForceHullBuilder, ConvexHullBuilder, HullGeometry};

mod builder;


pub const EXTENSION: &str = ".hul";

/// Amount of sphere candidates per axis used to fill a hull.
pub const SPHERE_GRID_SIZE: usize = 5;

/// Fewest faces a closed convex hull can have.
const MIN_FACE_COUNT: usize = 4;

/// Minimum size of a hull record: counts, bounding box and the reserved vector.
const HULL_MIN_SIZE: u64 = 6 + 24 + 12;

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// A convex hull file, in file space.
#[derive(Default, PartialEq, Clone, Debug, Getters, MutGetters, Setters, Serialize, Deserialize)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct ConvexHullFile {
    hulls: Vec<Hull>,
    spheres: Vec<Sphere>,
}

#[derive(Default, PartialEq, Clone, Debug, Getters, MutGetters, Setters, Serialize, Deserialize)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct Hull {
    bbox: BoundingBox,
    reserved: Vector3<f32>,
    vertices: Vec<Vector3<f32>>,
    edges: Vec<[i16; 2]>,
    planes: Vec<Plane>,
}

/// A decoded convex hull, in external space. Face connectivity is not stored in the files, so the geometry has no faces.
#[derive(Default, PartialEq, Clone, Debug, Getters, MutGetters, Setters, Serialize, Deserialize)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct ConvexHull {
    geometry: HullGeometry,
    spheres: Vec<Sphere>,
}

//---------------------------------------------------------------------------//
//                       Implementation of ConvexHullFile
//---------------------------------------------------------------------------//

impl Decodeable for ConvexHullFile {

    fn decode<R: ReadBytes>(data: &mut R, extra_data: &Option<DecodeableExtraData>) -> Result<Self> {
        let hull_count = data.read_i16()?;
        let hull_count = check_count(data, "hull", hull_count as i64, HULL_MIN_SIZE)?;
        if hull_count != 1 {
            debug!("Convex hull {} has {} hulls.", decode_log_name(extra_data), hull_count);
        }

        let mut hulls = Vec::with_capacity(hull_count);
        for _ in 0..hull_count {
            hulls.push(Hull::decode(data, extra_data)?);
        }

        let sphere_count = data.read_i16()?;
        let sphere_count = check_count(data, "sphere", sphere_count as i64, 16)?;
        let mut spheres = Vec::with_capacity(sphere_count);
        for _ in 0..sphere_count {
            spheres.push(Sphere::decode(data, extra_data)?);
        }

        check_size_mismatch(data.stream_position()? as usize, data.len()? as usize)?;

        Ok(Self {
            hulls,
            spheres,
        })
    }
}

impl Encodeable for ConvexHullFile {

    fn encode<W: WriteBytes>(&mut self, buffer: &mut W, extra_data: &Option<EncodeableExtraData>) -> Result<()> {
        buffer.write_i16(count_as_i16("hull", self.hulls.len())?)?;
        for hull in &mut self.hulls {
            hull.encode(buffer, extra_data)?;
        }

        buffer.write_i16(count_as_i16("sphere", self.spheres.len())?)?;
        for sphere in &mut self.spheres {
            sphere.encode(buffer, extra_data)?;
        }

        Ok(())
    }
}

impl ConvexHullFile {

    /// This function builds a file with a single hull from already built hull geometry, in external space.
    ///
    /// Face planes are computed in file space. The spheres fill the hull using a grid of
    /// [`SPHERE_GRID_SIZE`] candidates per axis over its bounding box, in external space.
    pub fn from_geometry(geometry: &HullGeometry, transform: &Transform) -> Result<Self> {
        let hull = Hull::from_geometry(geometry, transform)?;
        let spheres = fill_spheres(geometry)?.into_iter()
            .map(|sphere| Sphere::new(transform.point_to_file(sphere.center()), transform.scalar_to_file(*sphere.radius())))
            .collect::<Vec<_>>();

        count_as_i16("sphere", spheres.len())?;

        Ok(Self {
            hulls: vec![hull],
            spheres,
        })
    }

    /// This function converts the file into external space. Vertices and edges of all the hulls are merged.
    pub fn to_external(&self, transform: &Transform) -> ConvexHull {
        let mut vertices = vec![];
        let mut edges = vec![];

        for hull in &self.hulls {
            let offset = vertices.len();
            edges.extend(hull.edges.iter()
                .filter(|edge| edge.iter().all(|index| *index >= 0 && (*index as usize) < hull.vertices.len()))
                .map(|edge| [edge[0] as usize + offset, edge[1] as usize + offset]));
            vertices.extend(hull.vertices.iter().map(|vertex| transform.point_to_external(vertex)));
        }

        let spheres = self.spheres.iter()
            .map(|sphere| Sphere::new(transform.point_to_external(sphere.center()), transform.scalar_to_external(*sphere.radius())))
            .collect();

        ConvexHull {
            geometry: HullGeometry::new(vertices, edges, vec![]),
            spheres,
        }
    }
}

//---------------------------------------------------------------------------//
//                         Implementation of ConvexHull
//---------------------------------------------------------------------------//

impl ConvexHull {

    /// This function returns geometry ready to be encoded again.
    ///
    /// Files don't store face connectivity, so when the hull has no faces they're rebuilt from its vertices with `builder`.
    pub fn closed_geometry<B: ConvexHullBuilder>(&self, builder: &B) -> Result<HullGeometry> {
        if self.geometry.faces().len() >= MIN_FACE_COUNT {
            Ok(self.geometry.clone())
        } else {
            builder.build(self.geometry.vertices())
        }
    }
}

/// This function decodes a whole convex hull file into external space.
pub fn decode_hull<R: ReadBytes>(data: &mut R, transform: &Transform, extra_data: &Option<DecodeableExtraData>) -> Result<ConvexHull> {
    ConvexHullFile::decode(data, extra_data).map(|file| file.to_external(transform))
}

/// This function encodes already built hull geometry as a whole convex hull file.
pub fn encode_hull(geometry: &HullGeometry, transform: &Transform) -> Result<Vec<u8>> {
    let mut file = ConvexHullFile::from_geometry(geometry, transform)?;
    let mut data = vec![];
    file.encode(&mut data, &None)?;
    Ok(data)
}

/// This function builds the convex hull of a point set with the provided builder, and encodes it.
pub fn encode_hull_from_points<B: ConvexHullBuilder>(builder: &B, points: &[Vector3<f32>], transform: &Transform) -> Result<Vec<u8>> {
    encode_hull(&builder.build(points)?, transform)
}

/// This function returns the spheres filling the hull, in external space and grid order (x-major, z minor).
///
/// A candidate is kept if its center is strictly inside every face. Its radius is the distance to the closest face.
pub fn fill_spheres(geometry: &HullGeometry) -> Result<Vec<Sphere>> {
    check_closed(geometry)?;

    let (min, max) = geometry::bounds(geometry.vertices().iter().copied())
        .ok_or_else(|| RLibError::HullDegenerate("the hull has no vertices".to_owned()))?;

    let planes = geometry.faces().iter()
        .map(|face| face_plane(geometry.vertices(), face))
        .collect::<Result<Vec<_>>>()?;

    let step = (max - min) / SPHERE_GRID_SIZE as f32;
    let mut spheres = vec![];
    for x in 0..SPHERE_GRID_SIZE {
        for y in 0..SPHERE_GRID_SIZE {
            for z in 0..SPHERE_GRID_SIZE {
                let center = min + step / 2.0 + step.component_mul(&Vector3::new(x as f32, y as f32, z as f32));

                // Margin of the center behind each face.
                let margins = planes.iter().map(|(normal, offset)| offset - center.dot(normal)).collect::<Vec<_>>();
                if margins.iter().all(|margin| *margin > 0.0) {
                    let radius = margins.iter().copied().fold(f32::MAX, f32::min);
                    spheres.push(Sphere::new(center, radius));
                }
            }
        }
    }

    Ok(spheres)
}

/// This function checks the geometry has enough faces to enclose a volume.
///
/// Decoded hulls have no faces, so they need to be built again before encoding them.
fn check_closed(geometry: &HullGeometry) -> Result<()> {
    if geometry.faces().len() < MIN_FACE_COUNT {
        return Err(RLibError::HullDegenerate(format!("the hull has {} faces, at least {} are needed", geometry.faces().len(), MIN_FACE_COUNT)));
    }

    Ok(())
}

/// This function returns the unit normal of a face and the dot product of the normal and its first corner.
fn face_plane(vertices: &[Vector3<f32>], face: &[usize]) -> Result<(Vector3<f32>, f32)> {
    let points = face_points(vertices, face)?;
    let normal = geometry::polygon_normal(&points);
    Ok((normal, normal.dot(&points[0])))
}

/// This function returns the corners of a face, checking it's a proper polygon.
fn face_points(vertices: &[Vector3<f32>], face: &[usize]) -> Result<Vec<Vector3<f32>>> {
    if face.len() < 3 {
        return Err(RLibError::HullDegenerate(format!("a face has {} vertices", face.len())));
    }

    face.iter()
        .map(|index| vertices.get(*index)
            .copied()
            .ok_or_else(|| RLibError::HullDegenerate(format!("a face references the vertex {}, but there are only {} vertices", index, vertices.len()))))
        .collect()
}

//---------------------------------------------------------------------------//
//                            Implementation of Hull
//---------------------------------------------------------------------------//

impl Decodeable for Hull {

    fn decode<R: ReadBytes>(data: &mut R, extra_data: &Option<DecodeableExtraData>) -> Result<Self> {
        let vertex_count = data.read_i16()?;
        let edge_count = data.read_i16()?;
        let face_count = data.read_i16()?;

        let bbox = BoundingBox::decode(data, extra_data)?;
        let reserved = data.read_vector_3_f32()?;

        let vertex_count = check_count(data, "hull vertex", vertex_count as i64, 12)?;
        let mut vertices = Vec::with_capacity(vertex_count);
        for _ in 0..vertex_count {
            vertices.push(data.read_vector_3_f32()?);
        }

        let edge_count = check_count(data, "hull edge", edge_count as i64, 4)?;
        let mut edges = Vec::with_capacity(edge_count);
        for _ in 0..edge_count {
            edges.push([data.read_i16()?, data.read_i16()?]);
        }

        let face_count = check_count(data, "hull face", face_count as i64, 16)?;
        let mut planes = Vec::with_capacity(face_count);
        for _ in 0..face_count {
            planes.push(Plane::decode(data, extra_data)?);
        }

        Ok(Self {
            bbox,
            reserved,
            vertices,
            edges,
            planes,
        })
    }
}

impl Encodeable for Hull {

    fn encode<W: WriteBytes>(&mut self, buffer: &mut W, extra_data: &Option<EncodeableExtraData>) -> Result<()> {
        buffer.write_i16(count_as_i16("hull vertex", self.vertices.len())?)?;
        buffer.write_i16(count_as_i16("hull edge", self.edges.len())?)?;
        buffer.write_i16(count_as_i16("hull face", self.planes.len())?)?;

        self.bbox.encode(buffer, extra_data)?;
        buffer.write_vector_3_f32(self.reserved)?;

        for vertex in &self.vertices {
            buffer.write_vector_3_f32(*vertex)?;
        }

        for edge in &self.edges {
            buffer.write_i16(edge[0])?;
            buffer.write_i16(edge[1])?;
        }

        for plane in &mut self.planes {
            plane.encode(buffer, extra_data)?;
        }

        Ok(())
    }
}

impl Hull {

    /// This function builds a hull from already built hull geometry, in external space.
    pub fn from_geometry(geometry: &HullGeometry, transform: &Transform) -> Result<Self> {
        check_closed(geometry)?;

        let vertices = geometry.vertices().iter()
            .map(|vertex| transform.point_to_file(vertex))
            .collect::<Vec<_>>();

        let (min, max) = geometry::bounds(vertices.iter().copied())
            .ok_or_else(|| RLibError::HullDegenerate("the hull has no vertices".to_owned()))?;

        let edges = geometry.edges().iter()
            .map(|edge| {
                if let Some(index) = edge.iter().find(|index| **index >= vertices.len()) {
                    return Err(RLibError::HullDegenerate(format!("an edge references the vertex {}, but there are only {} vertices", index, vertices.len())));
                }

                Ok([count_as_i16("hull vertex", edge[0])?, count_as_i16("hull vertex", edge[1])?])
            })
            .collect::<Result<Vec<_>>>()?;

        let planes = geometry.faces().iter()
            .map(|face| {
                let points = face_points(&vertices, face)?;
                Ok(Plane::from_point(geometry::polygon_normal(&points), &points[0]))
            })
            .collect::<Result<Vec<_>>>()?;

        count_as_i16("hull vertex", vertices.len())?;
        count_as_i16("hull edge", edges.len())?;
        count_as_i16("hull face", planes.len())?;

        Ok(Self {
            bbox: BoundingBox::from_corners(&min, &max),
            reserved: Vector3::zeros(),
            vertices,
            edges,
            planes,
        })
    }
}
