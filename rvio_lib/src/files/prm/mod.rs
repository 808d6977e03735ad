//---------------------------------------------------------------------------//
// Copyright (c) 2024 The rvio contributors. All rights reserved.
//
// This file is part of the Re-Volt I/O (rvio) project.
//
// This file is licensed under the MIT license, which can be found in the
// LICENSE file at the root of this repository.
//---------------------------------------------------------------------------//

//! Models, as found in `.prm` and `.m` files. The same polygon/vertex block is embedded in every world mesh.
//!
//! # Structure
//!
//! | Bytes | Type | Data |
//! | ----- | ---- | ---- |
//! | 2     | i16  | Polygon count. |
//! | 2     | i16  | Vertex count. |
//! | 60 * Polygon count | [`Polygon`] | Polygons. |
//! | 24 * Vertex count  | [`Vertex`]  | Vertices. |
//!
//! Each polygon is:
//!
//! | Bytes | Type | Data |
//! | ----- | ---- | ---- |
//! | 2     | u16 | Type bit-field. Bit 0 means quad. |
//! | 2     | i16 | Texture page. Negative means untextured. |
//! | 8     | 4 x i16 | Vertex indices. Triangles ignore the last one. |
//! | 16    | 4 x u32 | Corner colours, as `0xAARRGGBB`. |
//! | 32    | 4 x (f32, f32) | Corner UVs. |
//!
//! Corners are stored in the opposite winding of the external space, so the conversions reverse them.

use getset::*;
use log::{debug, warn};
use nalgebra::Vector3;
use serde_derive::{Serialize, Deserialize};

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::binary::{ReadBytes, WriteBytes};
use crate::error::{RLibError, Result};
use crate::files::{decode_log_name, DecodeableExtraData, Decodeable, EncodeableExtraData, Encodeable};
use crate::files::common::Uv;
use crate::geometry::{self, Colour, Face, Mesh, PolygonFlags};
use crate::transform::Transform;
use crate::utils::{check_count, count_as_i16};

pub const EXTENSIONS: [&str; 2] = [".prm", ".m"];

/// Size of a polygon record, in bytes.
pub const POLYGON_SIZE: u64 = 60;

/// Size of a vertex record, in bytes.
pub const VERTEX_SIZE: u64 = 24;

/// Corner order used for triangles, both ways. The fourth slot is unused.
const TRIANGLE_ORDER: [usize; 4] = [2, 1, 0, 3];

/// Corner order used for quads, both ways.
const QUAD_ORDER: [usize; 4] = [3, 2, 1, 0];


//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// A model, in file space.
#[derive(Default, PartialEq, Clone, Debug, Getters, MutGetters, Setters, Serialize, Deserialize)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct Prm {
    polygons: Vec<Polygon>,
    vertices: Vec<Vertex>,
}

#[derive(Default, PartialEq, Clone, Debug, Getters, MutGetters, Setters, Serialize, Deserialize)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct Polygon {
    flags: PolygonFlags,
    texture: i16,
    indices: [i16; 4],
    colours: [u32; 4],
    uvs: [Uv; 4],
}

#[derive(Default, PartialEq, Clone, Debug, Getters, MutGetters, Setters, Serialize, Deserialize)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct Vertex {
    position: Vector3<f32>,
    normal: Vector3<f32>,
}

/// Something able to find the image for a texture page.
pub trait TextureResolver {

    /// This function returns the path of the image used by the texture page `index`, if there is one.
    fn resolve(&self, index: i16) -> Option<PathBuf>;
}

/// [`TextureResolver`] for the standard layout: texture pages are `<folder><letter>.bmp` files next to the model.
#[derive(Clone, Debug, Getters)]
#[getset(get = "pub")]
pub struct DirectoryTextureResolver {
    folder: PathBuf,
}

//---------------------------------------------------------------------------//
//                           Implementation of Prm
//---------------------------------------------------------------------------//

impl Decodeable for Prm {

    fn decode<R: ReadBytes>(data: &mut R, _extra_data: &Option<DecodeableExtraData>) -> Result<Self> {
        let polygon_count = data.read_i16()?;
        let vertex_count = data.read_i16()?;

        let polygon_count = check_count(data, "polygon", polygon_count as i64, POLYGON_SIZE)?;
        let mut polygons = Vec::with_capacity(polygon_count);
        for _ in 0..polygon_count {
            polygons.push(Polygon::decode(data, &None)?);
        }

        let vertex_count = check_count(data, "vertex", vertex_count as i64, VERTEX_SIZE)?;
        let mut vertices = Vec::with_capacity(vertex_count);
        for _ in 0..vertex_count {
            vertices.push(Vertex::decode(data, &None)?);
        }

        Ok(Self {
            polygons,
            vertices,
        })
    }
}

impl Encodeable for Prm {

    fn encode<W: WriteBytes>(&mut self, buffer: &mut W, _extra_data: &Option<EncodeableExtraData>) -> Result<()> {
        buffer.write_i16(count_as_i16("polygon", self.polygons.len())?)?;
        buffer.write_i16(count_as_i16("vertex", self.vertices.len())?)?;

        for polygon in &mut self.polygons {
            polygon.encode(buffer, &None)?;
        }

        for vertex in &mut self.vertices {
            vertex.encode(buffer, &None)?;
        }

        Ok(())
    }
}

impl Prm {

    /// This function converts the model into an external [`Mesh`].
    ///
    /// Polygons with repeated or out-of-range indices, or using the same vertices as a previous polygon, are skipped.
    pub fn to_mesh(&self, transform: &Transform) -> Mesh {
        self.to_mesh_with_env_colours(transform, &mut std::iter::empty())
    }

    /// This function converts the model into an external [`Mesh`], taking the env colour of each env-mapped
    /// polygon from `env_colours`, in order.
    ///
    /// Skipped polygons still take their colour, so the ones after them don't get shifted.
    pub(crate) fn to_mesh_with_env_colours<I: Iterator<Item = u32>>(&self, transform: &Transform, env_colours: &mut I) -> Mesh {
        let vertices = self.vertices.iter()
            .map(|vertex| vertex.to_external(transform))
            .collect::<Vec<_>>();

        let mut used_sets = HashSet::new();
        let mut faces = Vec::with_capacity(self.polygons.len());
        for (index, polygon) in self.polygons.iter().enumerate() {
            let env_colour = if polygon.is_env_mapped() { env_colours.next() } else { None };

            match polygon.to_face(vertices.len()) {
                Some(mut face) => {
                    face.set_env_colour(env_colour);

                    let mut set = face.indices().clone();
                    set.sort_unstable();

                    if used_sets.insert(set) {
                        faces.push(face);
                    } else {
                        debug!("Skipping polygon {index}: it uses the same vertices as a previous polygon.");
                    }
                }
                None => debug!("Skipping polygon {index}: its vertex indices are repeated or out of range."),
            }
        }

        Mesh::new(vertices, faces)
    }

    /// This function builds a model from an external [`Mesh`].
    ///
    /// If `include_textures` is false, every polygon is written as untextured.
    pub fn from_mesh(mesh: &Mesh, transform: &Transform, include_textures: bool) -> Result<Self> {
        count_as_i16("polygon", mesh.faces().len())?;
        count_as_i16("vertex", mesh.vertices().len())?;

        let polygons = mesh.faces().iter()
            .enumerate()
            .map(|(index, face)| Polygon::from_face(index, face, mesh.vertices().len(), include_textures))
            .collect::<Result<Vec<_>>>()?;

        let vertices = mesh.vertices().iter()
            .map(|vertex| Vertex::from_external(vertex, transform))
            .collect();

        Ok(Self {
            polygons,
            vertices,
        })
    }
}

/// This function decodes a whole model file into an external [`Mesh`].
///
/// Trailing bytes after the vertices are ignored, with a warning.
pub fn decode_model<R: ReadBytes>(data: &mut R, transform: &Transform, extra_data: &Option<DecodeableExtraData>) -> Result<Mesh> {
    let prm = Prm::decode(data, extra_data)?;

    let remaining = data.remaining()?;
    if remaining != 0 {
        warn!("Model {} has {} unused bytes at the end.", decode_log_name(extra_data), remaining);
    }

    Ok(prm.to_mesh(transform))
}

/// This function encodes an external [`Mesh`] as a whole model file.
pub fn encode_model(mesh: &Mesh, transform: &Transform, include_textures: bool) -> Result<Vec<u8>> {
    let mut prm = Prm::from_mesh(mesh, transform, include_textures)?;
    let mut data = vec![];
    prm.encode(&mut data, &None)?;
    Ok(data)
}

//---------------------------------------------------------------------------//
//                           Implementation of Polygon
//---------------------------------------------------------------------------//

impl Decodeable for Polygon {

    fn decode<R: ReadBytes>(data: &mut R, extra_data: &Option<DecodeableExtraData>) -> Result<Self> {
        let mut polygon = Self {
            flags: PolygonFlags::from_bits_retain(data.read_u16()?),
            texture: data.read_i16()?,
            ..Default::default()
        };

        for index in &mut polygon.indices {
            *index = data.read_i16()?;
        }

        for colour in &mut polygon.colours {
            *colour = data.read_u32()?;
        }

        for uv in &mut polygon.uvs {
            *uv = Uv::decode(data, extra_data)?;
        }

        Ok(polygon)
    }
}

impl Encodeable for Polygon {

    fn encode<W: WriteBytes>(&mut self, buffer: &mut W, extra_data: &Option<EncodeableExtraData>) -> Result<()> {
        buffer.write_u16(self.flags.bits())?;
        buffer.write_i16(self.texture)?;

        for index in &self.indices {
            buffer.write_i16(*index)?;
        }

        for colour in &self.colours {
            buffer.write_u32(*colour)?;
        }

        for uv in &mut self.uvs {
            uv.encode(buffer, extra_data)?;
        }

        Ok(())
    }
}

impl Polygon {

    /// This function returns the amount of corners the polygon uses.
    pub fn corner_count(&self) -> usize {
        if self.flags.contains(PolygonFlags::QUAD) { 4 } else { 3 }
    }

    /// This function returns if the polygon has an entry in the env colour list of a world.
    pub fn is_env_mapped(&self) -> bool {
        self.flags.contains(PolygonFlags::ENV)
    }

    /// This function converts the polygon into an external face, reversing its winding.
    ///
    /// Returns None if its indices are repeated or out of range.
    pub fn to_face(&self, vertex_count: usize) -> Option<Face> {
        let order = if self.corner_count() == 4 { &QUAD_ORDER[..] } else { &TRIANGLE_ORDER[..3] };

        let mut indices = Vec::with_capacity(order.len());
        for corner in order {
            let index = usize::try_from(self.indices[*corner]).ok().filter(|index| *index < vertex_count)?;
            if indices.contains(&index) {
                return None;
            }
            indices.push(index);
        }

        let mut face = Face::new(indices);
        face.set_flags(self.flags);
        face.set_texture(self.texture);
        face.set_colours(order.iter().map(|corner| Colour::from_argb(self.colours[*corner])).collect());
        face.set_uvs(order.iter().map(|corner| self.uvs[*corner].to_external()).collect());
        Some(face)
    }

    /// This function builds a polygon from an external face, reversing its winding.
    ///
    /// `index` is the position of the face in its mesh, for error reporting.
    pub fn from_face(index: usize, face: &Face, vertex_count: usize, include_textures: bool) -> Result<Self> {
        let corners = face.indices().len();
        let order = match corners {
            3 => &TRIANGLE_ORDER,
            4 => &QUAD_ORDER,
            _ => return Err(RLibError::EncodingUnsupportedPolygon(index, corners)),
        };

        if let Some(vertex) = face.indices().iter().find(|vertex| **vertex >= vertex_count) {
            return Err(RLibError::EncodingVertexIndexOutOfRange(index, *vertex, vertex_count));
        }

        let mut flags = face.flags().difference(PolygonFlags::QUAD);
        if corners == 4 {
            flags.insert(PolygonFlags::QUAD);
        }

        let texture = if include_textures && *face.texture() >= 0 { *face.texture() } else { -1 };

        let mut polygon = Self {
            flags,
            texture,
            ..Default::default()
        };

        for (slot, corner) in order.iter().enumerate() {
            if *corner < corners {
                polygon.indices[slot] = face.indices()[*corner] as i16;
                polygon.colours[slot] = face.colours().get(*corner).copied().unwrap_or_default().to_argb();
                polygon.uvs[slot] = Uv::from_external(face.uvs().get(*corner).unwrap_or(&[0.0, 0.0]));
            } else {
                polygon.indices[slot] = 0;
                polygon.colours[slot] = Colour::default().to_argb();
                polygon.uvs[slot] = Uv::from_external(&[0.0, 0.0]);
            }
        }

        Ok(polygon)
    }
}

//---------------------------------------------------------------------------//
//                           Implementation of Vertex
//---------------------------------------------------------------------------//

impl Decodeable for Vertex {

    fn decode<R: ReadBytes>(data: &mut R, _extra_data: &Option<DecodeableExtraData>) -> Result<Self> {
        Ok(Self {
            position: data.read_vector_3_f32()?,
            normal: data.read_vector_3_f32()?,
        })
    }
}

impl Encodeable for Vertex {

    fn encode<W: WriteBytes>(&mut self, buffer: &mut W, _extra_data: &Option<EncodeableExtraData>) -> Result<()> {
        buffer.write_vector_3_f32(self.position)?;
        buffer.write_vector_3_f32(self.normal)
    }
}

impl Vertex {
    pub fn new(position: Vector3<f32>, normal: Vector3<f32>) -> Self {
        Self {
            position,
            normal,
        }
    }

    pub fn to_external(&self, transform: &Transform) -> geometry::Vertex {
        geometry::Vertex::new(transform.point_to_external(&self.position), transform.direction_to_external(&self.normal))
    }

    pub fn from_external(vertex: &geometry::Vertex, transform: &Transform) -> Self {
        Self {
            position: transform.point_to_file(vertex.position()),
            normal: transform.direction_to_file(vertex.normal()),
        }
    }
}

//---------------------------------------------------------------------------//
//                     Implementation of the texture resolvers
//---------------------------------------------------------------------------//

/// This function returns the file name of the texture page `index` for the models in `folder_name`.
///
/// Texture pages are lettered: page 0 of the `rotor` folder is `rotora.bmp`, page 1 is `rotorb.bmp`, and so on.
pub fn texture_file_name(folder_name: &str, index: i16) -> Option<String> {
    let index = u8::try_from(index).ok().filter(|index| *index < 26)?;
    Some(format!("{}{}.bmp", folder_name.to_lowercase(), (b'a' + index) as char))
}

impl DirectoryTextureResolver {

    /// This function creates a resolver for the models in `folder`.
    pub fn new(folder: &Path) -> Self {
        Self {
            folder: folder.to_path_buf(),
        }
    }

    /// This function creates a resolver for the folder containing the provided model.
    pub fn for_model(model_path: &Path) -> Option<Self> {
        model_path.parent().map(Self::new)
    }
}

impl TextureResolver for DirectoryTextureResolver {
    fn resolve(&self, index: i16) -> Option<PathBuf> {
        let folder_name = self.folder.file_name()?.to_string_lossy();
        let path = self.folder.join(texture_file_name(&folder_name, index)?);
        if path.is_file() {
            Some(path)
        } else {
            None
        }
    }
}
