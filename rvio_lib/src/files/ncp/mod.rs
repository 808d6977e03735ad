//---------------------------------------------------------------------------//
// Copyright (c) 2024 The rvio contributors. All rights reserved.
//
// This file is part of the Re-Volt I/O (rvio) project.
//
// This file is licensed under the MIT license, which can be found in the
// LICENSE file at the root of this repository.
//---------------------------------------------------------------------------//

//! Hitboxes, as found in `.ncp` files. These are the collision meshes of worlds and objects.
//!
//! Hitboxes don't store vertices. Each cell is a floor plane cut by 3 or 4 side planes, and the corners
//! are recovered by intersecting the floor with each pair of consecutive side planes.
//!
//! # Structure
//!
//! | Bytes | Type | Data |
//! | ----- | ---- | ---- |
//! | 2     | i16  | Cell count. |
//! | 108 * Cell count | [`Polyhedron`] | Cells: kind (i32), surface material (i32), 5 planes and a bounding box. |
//! | 20    | 5 x f32 | Lookup grid header: x start, z start, x cell count, z cell count, cell size. Optional. |
//! | *     | (i32, i32 * n) | Lookup grid lists, z-major. One per grid cell. |

use getset::*;
use log::debug;
use nalgebra::{Matrix3, Vector3};
use serde_derive::{Serialize, Deserialize};

use crate::binary::{ReadBytes, WriteBytes};
use crate::error::{RLibError, Result};
use crate::files::{decode_log_name, DecodeableExtraData, Decodeable, EncodeableExtraData, Encodeable};
use crate::files::common::{BoundingBox, Plane};
use crate::geometry::{self, Face, Mesh, Vertex};
use crate::transform::Transform;
use crate::utils::{check_count, check_size_mismatch, count_as_i16, count_as_i32};

pub const EXTENSION: &str = ".ncp";

/// Size of a cell record.
pub const POLYHEDRON_SIZE: u64 = 4 + 4 + 5 * 16 + 24;

/// Determinants below this are treated as parallel planes.
const DETERMINANT_EPSILON: f32 = 1e-6;

/// Max cells per grid axis. Counts are stored as f32, which holds integers exactly up to this.
const MAX_GRID_AXIS_COUNT: usize = 1 << 24;

/// Max cells in a grid. Each one takes at least 4 bytes in the file.
pub const MAX_GRID_CELL_COUNT: usize = 1 << 22;


//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// A hitbox, in file space.
#[derive(Default, PartialEq, Clone, Debug, Getters, MutGetters, Setters, Serialize, Deserialize)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct Hitbox {
    polyhedra: Vec<Polyhedron>,
    lookup_grid: Option<LookupGrid>,
}

/// A collision cell.
#[derive(Default, PartialEq, Clone, Debug, Getters, MutGetters, Setters, Serialize, Deserialize)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct Polyhedron {

    /// 0 for triangles, 1 for quads. Only the lowest bit is checked.
    kind: i32,
    material: i32,

    /// The floor plane, followed by up to 4 side planes. Unused ones are zeroed.
    planes: [Plane; 5],
    bbox: BoundingBox,
}

/// Uniform grid over the XZ footprint of the hitbox, listing the cells each grid cell touches.
#[derive(Default, PartialEq, Clone, Debug, Getters, MutGetters, Setters, Serialize, Deserialize)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct LookupGrid {
    x_start: f32,
    z_start: f32,
    x_count: usize,
    z_count: usize,
    cell_size: f32,

    /// One list per grid cell, z-major.
    lists: Vec<Vec<i32>>,
}

/// Surface materials, which decide the grip, sound and particles of each cell.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub enum SurfaceMaterial {
    None,
    #[default]
    Default,
    Marble,
    Stone,
    Wood,
    Sand,
    Plastic,
    CarpetTile,
    CarpetShag,
    Boundary,
    Glass,
    Ice1,
    Metal,
    Grass,
    BumpMetal,
    Pebbles,
    Gravel,
    Conveyor1,
    Conveyor2,
    Dirt1,
    Dirt2,
    Dirt3,
    Ice2,
    Ice3,
    Other(i32),
}

//---------------------------------------------------------------------------//
//                           Implementation of Hitbox
//---------------------------------------------------------------------------//

impl Decodeable for Hitbox {

    fn decode<R: ReadBytes>(data: &mut R, extra_data: &Option<DecodeableExtraData>) -> Result<Self> {
        let count = data.read_i16()?;
        let count = check_count(data, "hitbox cell", count as i64, POLYHEDRON_SIZE)?;

        let mut polyhedra = Vec::with_capacity(count);
        for _ in 0..count {
            polyhedra.push(Polyhedron::decode(data, extra_data)?);
        }

        // The grid is only used by the game, and some tools don't write it.
        let lookup_grid = if data.remaining()? > 0 {
            Some(LookupGrid::decode(data, extra_data)?)
        } else {
            debug!("Hitbox {} has no lookup grid.", decode_log_name(extra_data));
            None
        };

        check_size_mismatch(data.stream_position()? as usize, data.len()? as usize)?;

        Ok(Self {
            polyhedra,
            lookup_grid,
        })
    }
}

impl Encodeable for Hitbox {

    fn encode<W: WriteBytes>(&mut self, buffer: &mut W, extra_data: &Option<EncodeableExtraData>) -> Result<()> {
        buffer.write_i16(count_as_i16("hitbox cell", self.polyhedra.len())?)?;
        for polyhedron in &mut self.polyhedra {
            polyhedron.encode(buffer, extra_data)?;
        }

        if let Some(ref mut lookup_grid) = self.lookup_grid {
            lookup_grid.encode(buffer, extra_data)?;
        }

        Ok(())
    }
}

impl Hitbox {

    /// This function converts the hitbox into an external [`Mesh`], with one face and its own vertices per cell.
    ///
    /// Cells with less than 3 recoverable corners are skipped.
    pub fn to_mesh(&self, transform: &Transform) -> Mesh {
        let mut mesh = Mesh::default();

        for (index, polyhedron) in self.polyhedra.iter().enumerate() {
            let corners = polyhedron.corners();
            if corners.len() < 3 {
                debug!("Skipping hitbox cell {index}: only {} of its corners could be found.", corners.len());
                continue;
            }

            let normal = transform.direction_to_external(polyhedron.planes[0].normal());
            let offset = mesh.vertices().len();
            mesh.vertices_mut().extend(corners.iter().map(|corner| Vertex::new(transform.point_to_external(corner), normal)));

            let mut face = Face::new((offset..offset + corners.len()).collect());
            face.set_material(polyhedron.material);
            mesh.faces_mut().push(face);
        }

        mesh
    }

    /// This function builds a hitbox from an external [`Mesh`].
    ///
    /// `cell_size` is the size of the lookup grid cells, in file units. If None, the grid has a single cell
    /// covering the whole mesh.
    pub fn from_mesh(mesh: &Mesh, transform: &Transform, cell_size: Option<f32>) -> Result<Self> {
        count_as_i16("hitbox cell", mesh.faces().len())?;

        let mut polyhedra = Vec::with_capacity(mesh.faces().len());
        for (index, face) in mesh.faces().iter().enumerate() {
            let corners = face.indices().len();
            if !(3..=4).contains(&corners) {
                return Err(RLibError::EncodingUnsupportedPolygon(index, corners));
            }

            let points = face.indices().iter()
                .map(|vertex| mesh.vertices().get(*vertex)
                    .map(|vertex| transform.point_to_file(vertex.position()))
                    .ok_or(RLibError::EncodingVertexIndexOutOfRange(index, *vertex, mesh.vertices().len())))
                .collect::<Result<Vec<_>>>()?;

            polyhedra.push(Polyhedron::from_points(&points, *face.material()));
        }

        let lookup_grid = LookupGrid::new(&polyhedra, cell_size)?;

        Ok(Self {
            polyhedra,
            lookup_grid: Some(lookup_grid),
        })
    }
}

/// This function decodes a whole hitbox file into an external [`Mesh`].
pub fn decode_hitbox<R: ReadBytes>(data: &mut R, transform: &Transform, extra_data: &Option<DecodeableExtraData>) -> Result<Mesh> {
    Hitbox::decode(data, extra_data).map(|hitbox| hitbox.to_mesh(transform))
}

/// This function encodes an external [`Mesh`] as a whole hitbox file.
pub fn encode_hitbox(mesh: &Mesh, transform: &Transform, cell_size: Option<f32>) -> Result<Vec<u8>> {
    let mut hitbox = Hitbox::from_mesh(mesh, transform, cell_size)?;
    let mut data = vec![];
    hitbox.encode(&mut data, &None)?;
    Ok(data)
}

//---------------------------------------------------------------------------//
//                         Implementation of Polyhedron
//---------------------------------------------------------------------------//

impl Decodeable for Polyhedron {

    fn decode<R: ReadBytes>(data: &mut R, extra_data: &Option<DecodeableExtraData>) -> Result<Self> {
        let kind = data.read_i32()?;
        let material = data.read_i32()?;

        let mut planes: [Plane; 5] = Default::default();
        for plane in &mut planes {
            *plane = Plane::decode(data, extra_data)?;
        }

        Ok(Self {
            kind,
            material,
            planes,
            bbox: BoundingBox::decode(data, extra_data)?,
        })
    }
}

impl Encodeable for Polyhedron {

    fn encode<W: WriteBytes>(&mut self, buffer: &mut W, extra_data: &Option<EncodeableExtraData>) -> Result<()> {
        buffer.write_i32(self.kind)?;
        buffer.write_i32(self.material)?;
        for plane in &mut self.planes {
            plane.encode(buffer, extra_data)?;
        }

        self.bbox.encode(buffer, extra_data)
    }
}

impl Polyhedron {

    /// This function returns the amount of side planes the cell uses.
    pub fn side_count(&self) -> usize {
        if self.kind % 2 == 0 { 3 } else { 4 }
    }

    pub fn surface_material(&self) -> SurfaceMaterial {
        SurfaceMaterial::from(self.material)
    }

    /// This function returns the corners of the cell, in file space and in the order they were encoded.
    ///
    /// Corners where the floor and the side planes don't meet at a single point are left out.
    pub fn corners(&self) -> Vec<Vector3<f32>> {
        let floor = &self.planes[0];
        let side_count = self.side_count();

        let mut corners = Vec::with_capacity(side_count);
        for side in 0..side_count {
            let a = &self.planes[side + 1];
            let b = &self.planes[(side + 1) % side_count + 1];

            if let Some(corner) = intersect_planes(floor, a, b) {
                corners.insert(0, corner);
            }
        }

        corners
    }

    /// This function builds a cell from its corners, in file space and counter-clockwise.
    ///
    /// Side planes are written starting from the edge closing the polygon and going backwards, so decoding
    /// gives back the corners in their original order.
    pub fn from_points(points: &[Vector3<f32>], material: i32) -> Self {
        let normal = geometry::polygon_normal(points);

        let mut planes: [Plane; 5] = Default::default();
        planes[0] = Plane::from_point(normal, &points[0]);

        for (slot, index) in (0..points.len()).rev().enumerate() {
            let current = &points[index];
            let next = &points[(index + 1) % points.len()];
            let side_normal = normal.cross(&(current - next)).try_normalize(f32::EPSILON).unwrap_or_else(Vector3::zeros);
            planes[slot + 1] = Plane::from_point(side_normal, current);
        }

        let (min, max) = geometry::bounds(points.iter().copied()).unwrap_or_default();

        Self {
            kind: if points.len() == 4 { 1 } else { 0 },
            material,
            planes,
            bbox: BoundingBox::from_corners(&min, &max),
        }
    }
}

/// This function returns the point where three planes meet, or None if two of them are parallel.
pub fn intersect_planes(p0: &Plane, p1: &Plane, p2: &Plane) -> Option<Vector3<f32>> {
    let (n0, n1, n2) = (p0.normal(), p1.normal(), p2.normal());
    let determinant = Matrix3::from_rows(&[n0.transpose(), n1.transpose(), n2.transpose()]).determinant();
    if determinant.abs() < DETERMINANT_EPSILON {
        return None;
    }

    let point = -*p0.distance() * n1.cross(n2) - *p1.distance() * n2.cross(n0) - *p2.distance() * n0.cross(n1);
    Some(point / determinant)
}

//---------------------------------------------------------------------------//
//                         Implementation of LookupGrid
//---------------------------------------------------------------------------//

impl Decodeable for LookupGrid {

    fn decode<R: ReadBytes>(data: &mut R, _extra_data: &Option<DecodeableExtraData>) -> Result<Self> {
        let x_start = data.read_f32()?;
        let z_start = data.read_f32()?;
        let x_count = data.read_f32()?;
        let z_count = data.read_f32()?;
        let cell_size = data.read_f32()?;

        let x_count = check_count(data, "lookup grid column", x_count as i64, 0)?;
        let z_count = check_count(data, "lookup grid row", z_count as i64, 0)?;
        let cell_count = check_count(data, "lookup grid cell", (x_count as i64).saturating_mul(z_count as i64), 4)?;

        let mut lists = Vec::with_capacity(cell_count);
        for _ in 0..cell_count {
            let len = data.read_i32()?;
            let len = check_count(data, "lookup grid entry", len as i64, 4)?;

            let mut list = Vec::with_capacity(len);
            for _ in 0..len {
                list.push(data.read_i32()?);
            }

            lists.push(list);
        }

        Ok(Self {
            x_start,
            z_start,
            x_count,
            z_count,
            cell_size,
            lists,
        })
    }
}

impl Encodeable for LookupGrid {

    fn encode<W: WriteBytes>(&mut self, buffer: &mut W, _extra_data: &Option<EncodeableExtraData>) -> Result<()> {
        buffer.write_f32(self.x_start)?;
        buffer.write_f32(self.z_start)?;
        buffer.write_f32(self.x_count as f32)?;
        buffer.write_f32(self.z_count as f32)?;
        buffer.write_f32(self.cell_size)?;

        for list in &self.lists {
            buffer.write_i32(count_as_i32("lookup grid entry", list.len())?)?;
            for index in list {
                buffer.write_i32(*index)?;
            }
        }

        Ok(())
    }
}

impl LookupGrid {

    /// This function builds the grid for the provided cells.
    ///
    /// With no `cell_size`, a single grid cell covers the whole footprint and lists every cell.
    /// A `cell_size` so small the grid would need more than [`MAX_GRID_CELL_COUNT`] cells is an error.
    pub fn new(polyhedra: &[Polyhedron], cell_size: Option<f32>) -> Result<Self> {
        let mut x_start = f32::MAX;
        let mut z_start = f32::MAX;
        let mut x_end = f32::MIN;
        let mut z_end = f32::MIN;
        for polyhedron in polyhedra {
            x_start = x_start.min(*polyhedron.bbox.x_lo());
            z_start = z_start.min(*polyhedron.bbox.z_lo());
            x_end = x_end.max(*polyhedron.bbox.x_hi());
            z_end = z_end.max(*polyhedron.bbox.z_hi());
        }

        if polyhedra.is_empty() {
            x_start = 0.0;
            z_start = 0.0;
            x_end = 0.0;
            z_end = 0.0;
        }

        let extent = (x_end - x_start).max(z_end - z_start);
        let cell_size = match cell_size {
            Some(cell_size) if cell_size > 0.0 => cell_size,
            _ => {
                return Ok(Self {
                    x_start,
                    z_start,
                    x_count: 1,
                    z_count: 1,
                    cell_size: extent,
                    lists: vec![(0..polyhedra.len() as i32).collect()],
                });
            }
        };

        let axis_count = |extent: f32| {
            let count = (extent / cell_size).ceil().max(1.0);
            if count.is_finite() && count <= MAX_GRID_AXIS_COUNT as f32 {
                Ok(count as usize)
            } else {
                Err(RLibError::EncodingGridTooLarge(cell_size, MAX_GRID_CELL_COUNT))
            }
        };

        let x_count = axis_count(x_end - x_start)?;
        let z_count = axis_count(z_end - z_start)?;
        let cell_count = x_count.checked_mul(z_count)
            .filter(|count| *count <= MAX_GRID_CELL_COUNT)
            .ok_or(RLibError::EncodingGridTooLarge(cell_size, MAX_GRID_CELL_COUNT))?;

        let mut lists = vec![vec![]; cell_count];
        for (index, polyhedron) in polyhedra.iter().enumerate() {
            let bbox = &polyhedron.bbox;
            let cell_range = |lo: f32, hi: f32, start: f32, count: usize| {
                let first = (((lo - start) / cell_size).floor().max(0.0) as usize).min(count - 1);
                let last = (((hi - start) / cell_size).floor().max(0.0) as usize).min(count - 1);
                first..=last
            };

            for z in cell_range(*bbox.z_lo(), *bbox.z_hi(), z_start, z_count) {
                for x in cell_range(*bbox.x_lo(), *bbox.x_hi(), x_start, x_count) {
                    lists[z * x_count + x].push(index as i32);
                }
            }
        }

        Ok(Self {
            x_start,
            z_start,
            x_count,
            z_count,
            cell_size,
            lists,
        })
    }

    /// This function returns the list of cells for the grid cell at the provided column and row.
    pub fn list(&self, x: usize, z: usize) -> Option<&Vec<i32>> {
        if x >= self.x_count {
            return None;
        }

        self.lists.get(z * self.x_count + x)
    }
}

//---------------------------------------------------------------------------//
//                      Implementation of SurfaceMaterial
//---------------------------------------------------------------------------//

impl From<i32> for SurfaceMaterial {
    fn from(value: i32) -> Self {
        match value {
            -1 => Self::None,
            0 => Self::Default,
            1 => Self::Marble,
            2 => Self::Stone,
            3 => Self::Wood,
            4 => Self::Sand,
            5 => Self::Plastic,
            6 => Self::CarpetTile,
            7 => Self::CarpetShag,
            8 => Self::Boundary,
            9 => Self::Glass,
            10 => Self::Ice1,
            11 => Self::Metal,
            12 => Self::Grass,
            13 => Self::BumpMetal,
            14 => Self::Pebbles,
            15 => Self::Gravel,
            16 => Self::Conveyor1,
            17 => Self::Conveyor2,
            18 => Self::Dirt1,
            19 => Self::Dirt2,
            20 => Self::Dirt3,
            21 => Self::Ice2,
            22 => Self::Ice3,
            _ => Self::Other(value),
        }
    }
}

impl From<SurfaceMaterial> for i32 {
    fn from(value: SurfaceMaterial) -> Self {
        match value {
            SurfaceMaterial::None => -1,
            SurfaceMaterial::Default => 0,
            SurfaceMaterial::Marble => 1,
            SurfaceMaterial::Stone => 2,
            SurfaceMaterial::Wood => 3,
            SurfaceMaterial::Sand => 4,
            SurfaceMaterial::Plastic => 5,
            SurfaceMaterial::CarpetTile => 6,
            SurfaceMaterial::CarpetShag => 7,
            SurfaceMaterial::Boundary => 8,
            SurfaceMaterial::Glass => 9,
            SurfaceMaterial::Ice1 => 10,
            SurfaceMaterial::Metal => 11,
            SurfaceMaterial::Grass => 12,
            SurfaceMaterial::BumpMetal => 13,
            SurfaceMaterial::Pebbles => 14,
            SurfaceMaterial::Gravel => 15,
            SurfaceMaterial::Conveyor1 => 16,
            SurfaceMaterial::Conveyor2 => 17,
            SurfaceMaterial::Dirt1 => 18,
            SurfaceMaterial::Dirt2 => 19,
            SurfaceMaterial::Dirt3 => 20,
            SurfaceMaterial::Ice2 => 21,
            SurfaceMaterial::Ice3 => 22,
            SurfaceMaterial::Other(value) => value,
        }
    }
}
