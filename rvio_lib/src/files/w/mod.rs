//---------------------------------------------------------------------------//
// Copyright (c) 2024 The rvio contributors. All rights reserved.
//
// This file is part of the Re-Volt I/O (rvio) project.
//
// This file is licensed under the MIT license, which can be found in the
// LICENSE file at the root of this repository.
//---------------------------------------------------------------------------//

//! Worlds, as found in `.w` files. These hold the visible geometry of a level.
//!
//! # Structure
//!
//! | Bytes | Type | Data |
//! | ----- | ---- | ---- |
//! | 4     | i32  | Mesh count. |
//! | *     | [`WorldMesh`] | Meshes: bounding sphere, bounding box and a [`Prm`] block. |
//! | 4     | i32  | Big cube count. |
//! | *     | [`BigCube`] | Culling cubes: sphere, mesh index count (i32) and mesh indices (i32). |
//! | 4     | i32  | Texture animation count. |
//! | *     | [`TextureAnimation`] | Frame count (i32) and frames. |
//! | 4 * env count | u32 | Env colours. |
//!
//! The env colour list has no count: it has one entry per polygon with the env bit, across all meshes.

use getset::*;
use log::{info, warn};
use nalgebra::Vector3;
use serde_derive::{Serialize, Deserialize};

use std::iter;

use crate::binary::{ReadBytes, WriteBytes};
use crate::error::{RLibError, Result};
use crate::files::{decode_log_name, encode_log_name, DecodeableExtraData, Decodeable, EncodeableExtraData, Encodeable};
use crate::files::common::{BoundingBox, Sphere, Uv};
use crate::files::prm::Prm;
use crate::geometry::{self, Face, Mesh};
use crate::transform::Transform;
use crate::utils::{check_count, check_size_mismatch, count_as_i32};

pub const EXTENSION: &str = ".w";

/// Env colour used for env-mapped polygons without one.
pub const DEFAULT_ENV_COLOUR: u32 = 0xFFFF_FFFF;

/// Minimum size of a mesh record: sphere, box and an empty model.
const MESH_MIN_SIZE: u64 = 16 + 24 + 4;

/// Minimum size of a big cube record: sphere and an empty index list.
const BIG_CUBE_MIN_SIZE: u64 = 16 + 4;

/// Size of a texture animation frame.
const FRAME_SIZE: u64 = 4 + 4 + 32;

#[cfg(test)] mod w_test;

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// A world, in file space.
#[derive(Default, PartialEq, Clone, Debug, Getters, MutGetters, Setters, Serialize, Deserialize)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct World {
    meshes: Vec<WorldMesh>,
    big_cubes: Vec<BigCube>,
    animations: Vec<TextureAnimation>,
    env_colours: Vec<u32>,
}

#[derive(Default, PartialEq, Clone, Debug, Getters, MutGetters, Setters, Serialize, Deserialize)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct WorldMesh {
    bounding_sphere: Sphere,
    bbox: BoundingBox,
    model: Prm,
}

/// A culling volume. The game only draws the meshes of the cubes in view.
#[derive(Default, PartialEq, Clone, Debug, Getters, MutGetters, Setters, Serialize, Deserialize)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct BigCube {
    sphere: Sphere,
    mesh_indices: Vec<i32>,
}

#[derive(Default, PartialEq, Clone, Debug, Getters, MutGetters, Setters, Serialize, Deserialize)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct TextureAnimation {
    frames: Vec<Frame>,
}

#[derive(Default, PartialEq, Clone, Debug, Getters, MutGetters, Setters, Serialize, Deserialize)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct Frame {
    texture: i32,

    /// Delay, in milliseconds.
    delay: f32,
    uvs: [Uv; 4],
}

//---------------------------------------------------------------------------//
//                           Implementation of World
//---------------------------------------------------------------------------//

impl Decodeable for World {

    fn decode<R: ReadBytes>(data: &mut R, extra_data: &Option<DecodeableExtraData>) -> Result<Self> {
        let mesh_count = data.read_i32()?;
        let mesh_count = check_count(data, "mesh", mesh_count as i64, MESH_MIN_SIZE)?;

        let mut meshes = Vec::with_capacity(mesh_count);
        let mut env_count = 0;
        for _ in 0..mesh_count {
            let mesh = WorldMesh::decode(data, extra_data)?;
            env_count += mesh.env_count();
            meshes.push(mesh);
        }

        let big_cube_count = data.read_i32()?;
        let big_cube_count = check_count(data, "big cube", big_cube_count as i64, BIG_CUBE_MIN_SIZE)?;
        let mut big_cubes = Vec::with_capacity(big_cube_count);
        for _ in 0..big_cube_count {
            big_cubes.push(BigCube::decode(data, extra_data)?);
        }

        let animation_count = data.read_i32()?;
        let animation_count = check_count(data, "texture animation", animation_count as i64, 4)?;
        let mut animations = Vec::with_capacity(animation_count);
        for _ in 0..animation_count {
            animations.push(TextureAnimation::decode(data, extra_data)?);
        }

        // No count for this one. We have to trust the env bits we found.
        let mut env_colours = Vec::with_capacity(env_count);
        for _ in 0..env_count {
            env_colours.push(data.read_u32()?);
        }

        check_size_mismatch(data.stream_position()? as usize, data.len()? as usize)?;

        info!("World {} decoded: {} meshes, {} env colours.", decode_log_name(extra_data), meshes.len(), env_colours.len());

        Ok(Self {
            meshes,
            big_cubes,
            animations,
            env_colours,
        })
    }
}

impl Encodeable for World {

    fn encode<W: WriteBytes>(&mut self, buffer: &mut W, extra_data: &Option<EncodeableExtraData>) -> Result<()> {
        buffer.write_i32(count_as_i32("mesh", self.meshes.len())?)?;
        for mesh in &mut self.meshes {
            mesh.encode(buffer, extra_data)?;
        }

        buffer.write_i32(count_as_i32("big cube", self.big_cubes.len())?)?;
        for big_cube in &mut self.big_cubes {
            big_cube.encode(buffer, extra_data)?;
        }

        buffer.write_i32(count_as_i32("texture animation", self.animations.len())?)?;
        for animation in &mut self.animations {
            animation.encode(buffer, extra_data)?;
        }

        // The game reads as many colours as env-mapped polygons, so the list must match them.
        let env_count = self.env_count();
        if self.env_colours.len() < env_count {
            warn!("World {} has {} env-mapped polygons but only {} env colours. Filling the rest.", encode_log_name(extra_data), env_count, self.env_colours.len());
        } else if self.env_colours.len() > env_count {
            warn!("World {} has {} env-mapped polygons but {} env colours. Dropping the extra ones.", encode_log_name(extra_data), env_count, self.env_colours.len());
        }

        let fallback = extra_data.as_ref()
            .and_then(|extra_data| *extra_data.env_colour_fallback())
            .unwrap_or(DEFAULT_ENV_COLOUR);

        for colour in self.env_colours.iter().copied().chain(iter::repeat(fallback)).take(env_count) {
            buffer.write_u32(colour)?;
        }

        Ok(())
    }
}

impl World {

    /// This function returns the amount of env-mapped polygons in the world.
    pub fn env_count(&self) -> usize {
        self.meshes.iter().map(|mesh| mesh.env_count()).sum()
    }

    /// This function converts the world into a single external [`Mesh`].
    ///
    /// Env colours are given to the env-mapped faces in polygon order.
    pub fn to_mesh(&self, transform: &Transform) -> Mesh {
        let mut env_colours = self.env_colours.iter().copied();
        let mut result = Mesh::default();

        for mesh in &self.meshes {
            let mesh = mesh.model.to_mesh_with_env_colours(transform, &mut env_colours);
            let offset = result.vertices().len();

            result.vertices_mut().extend_from_slice(mesh.vertices());
            result.faces_mut().extend(mesh.faces().iter().cloned().map(|mut face| {
                face.indices_mut().iter_mut().for_each(|index| *index += offset);
                face
            }));
        }

        result
    }

    /// This function builds a world from an external [`Mesh`].
    ///
    /// Each face becomes its own world mesh, and a single big cube encloses all of them. Env colours
    /// are taken from the env-mapped faces, with [`DEFAULT_ENV_COLOUR`] for the ones without a colour.
    pub fn from_mesh(mesh: &Mesh, transform: &Transform) -> Result<Self> {
        count_as_i32("mesh", mesh.faces().len())?;

        let mut meshes = Vec::with_capacity(mesh.faces().len());
        let mut env_colours = vec![];
        for (index, face) in mesh.faces().iter().enumerate() {
            let world_mesh = WorldMesh::from_face(index, face, mesh, transform)?;
            if world_mesh.env_count() > 0 {
                env_colours.push(face.env_colour().unwrap_or(DEFAULT_ENV_COLOUR));
            }

            meshes.push(world_mesh);
        }

        let mut big_cubes = vec![];
        if let Some((min, max)) = geometry::bounds(mesh.vertices().iter().map(|vertex| transform.point_to_file(vertex.position()))) {
            let center = (min + max) / 2.0;
            let radius = (max - min).norm() / 2.0;

            big_cubes.push(BigCube {
                sphere: Sphere::new(center, radius),
                mesh_indices: (0..meshes.len() as i32).collect(),
            });
        }

        Ok(Self {
            meshes,
            big_cubes,
            animations: vec![],
            env_colours,
        })
    }
}

/// This function decodes a whole world file into an external [`Mesh`].
pub fn decode_world<R: ReadBytes>(data: &mut R, transform: &Transform, extra_data: &Option<DecodeableExtraData>) -> Result<Mesh> {
    World::decode(data, extra_data).map(|world| world.to_mesh(transform))
}

/// This function encodes an external [`Mesh`] as a whole world file.
pub fn encode_world(mesh: &Mesh, transform: &Transform) -> Result<Vec<u8>> {
    let mut world = World::from_mesh(mesh, transform)?;
    let mut data = vec![];
    world.encode(&mut data, &None)?;
    Ok(data)
}

//---------------------------------------------------------------------------//
//                         Implementation of WorldMesh
//---------------------------------------------------------------------------//

impl Decodeable for WorldMesh {

    fn decode<R: ReadBytes>(data: &mut R, extra_data: &Option<DecodeableExtraData>) -> Result<Self> {
        Ok(Self {
            bounding_sphere: Sphere::decode(data, extra_data)?,
            bbox: BoundingBox::decode(data, extra_data)?,
            model: Prm::decode(data, extra_data)?,
        })
    }
}

impl Encodeable for WorldMesh {

    fn encode<W: WriteBytes>(&mut self, buffer: &mut W, extra_data: &Option<EncodeableExtraData>) -> Result<()> {
        self.bounding_sphere.encode(buffer, extra_data)?;
        self.bbox.encode(buffer, extra_data)?;
        self.model.encode(buffer, extra_data)
    }
}

impl WorldMesh {

    /// This function returns the amount of env-mapped polygons in the mesh.
    pub fn env_count(&self) -> usize {
        self.model.polygons().iter().filter(|polygon| polygon.is_env_mapped()).count()
    }

    /// This function builds a world mesh holding a single face of `mesh`, with its own copy of the face vertices.
    ///
    /// `index` is the position of the face in `mesh`, for error reporting.
    fn from_face(index: usize, face: &Face, mesh: &Mesh, transform: &Transform) -> Result<Self> {
        let corners = face.indices().len();
        if !(3..=4).contains(&corners) {
            return Err(RLibError::EncodingUnsupportedPolygon(index, corners));
        }

        let vertices = face.indices().iter()
            .map(|vertex| mesh.vertices().get(*vertex)
                .cloned()
                .ok_or(RLibError::EncodingVertexIndexOutOfRange(index, *vertex, mesh.vertices().len())))
            .collect::<Result<Vec<_>>>()?;

        let positions = vertices.iter().map(|vertex| transform.point_to_file(vertex.position())).collect::<Vec<_>>();
        let (min, max) = geometry::bounds(positions.iter().copied()).unwrap_or_default();
        let center = (min + max) / 2.0;
        let radius = positions.iter()
            .map(|position| (position - center).norm())
            .fold(0.0, f32::max);

        let mut local_face = face.clone();
        local_face.set_indices((0..corners).collect());
        let model = Prm::from_mesh(&Mesh::new(vertices, vec![local_face]), transform, true)?;

        Ok(Self {
            bounding_sphere: Sphere::new(center, radius),
            bbox: BoundingBox::from_corners(&min, &max),
            model,
        })
    }
}

//---------------------------------------------------------------------------//
//                          Implementation of BigCube
//---------------------------------------------------------------------------//

impl Decodeable for BigCube {

    fn decode<R: ReadBytes>(data: &mut R, extra_data: &Option<DecodeableExtraData>) -> Result<Self> {
        let sphere = Sphere::decode(data, extra_data)?;

        let mesh_index_count = data.read_i32()?;
        let mesh_index_count = check_count(data, "big cube mesh index", mesh_index_count as i64, 4)?;
        let mut mesh_indices = Vec::with_capacity(mesh_index_count);
        for _ in 0..mesh_index_count {
            mesh_indices.push(data.read_i32()?);
        }

        Ok(Self {
            sphere,
            mesh_indices,
        })
    }
}

impl Encodeable for BigCube {

    fn encode<W: WriteBytes>(&mut self, buffer: &mut W, extra_data: &Option<EncodeableExtraData>) -> Result<()> {
        self.sphere.encode(buffer, extra_data)?;
        buffer.write_i32(count_as_i32("big cube mesh index", self.mesh_indices.len())?)?;
        for index in &self.mesh_indices {
            buffer.write_i32(*index)?;
        }

        Ok(())
    }
}

impl BigCube {
    pub fn new(center: Vector3<f32>, radius: f32, mesh_indices: Vec<i32>) -> Self {
        Self {
            sphere: Sphere::new(center, radius),
            mesh_indices,
        }
    }
}

//---------------------------------------------------------------------------//
//                      Implementation of TextureAnimation
//---------------------------------------------------------------------------//

impl Decodeable for TextureAnimation {

    fn decode<R: ReadBytes>(data: &mut R, extra_data: &Option<DecodeableExtraData>) -> Result<Self> {
        let frame_count = data.read_i32()?;
        let frame_count = check_count(data, "animation frame", frame_count as i64, FRAME_SIZE)?;

        let mut frames = Vec::with_capacity(frame_count);
        for _ in 0..frame_count {
            frames.push(Frame::decode(data, extra_data)?);
        }

        Ok(Self {
            frames,
        })
    }
}

impl Encodeable for TextureAnimation {

    fn encode<W: WriteBytes>(&mut self, buffer: &mut W, extra_data: &Option<EncodeableExtraData>) -> Result<()> {
        buffer.write_i32(count_as_i32("animation frame", self.frames.len())?)?;
        for frame in &mut self.frames {
            frame.encode(buffer, extra_data)?;
        }

        Ok(())
    }
}

impl Decodeable for Frame {

    fn decode<R: ReadBytes>(data: &mut R, extra_data: &Option<DecodeableExtraData>) -> Result<Self> {
        let mut frame = Self {
            texture: data.read_i32()?,
            delay: data.read_f32()?,
            ..Default::default()
        };

        for uv in &mut frame.uvs {
            *uv = Uv::decode(data, extra_data)?;
        }

        Ok(frame)
    }
}

impl Encodeable for Frame {

    fn encode<W: WriteBytes>(&mut self, buffer: &mut W, extra_data: &Option<EncodeableExtraData>) -> Result<()> {
        buffer.write_i32(self.texture)?;
        buffer.write_f32(self.delay)?;
        for uv in &mut self.uvs {
            uv.encode(buffer, extra_data)?;
        }

        Ok(())
    }
}
