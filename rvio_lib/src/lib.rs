//---------------------------------------------------------------------------//
// Copyright (c) 2024 The rvio contributors. All rights reserved.
//
// This file is part of the Re-Volt I/O (rvio) project.
//
// This file is licensed under the MIT license, which can be found in the
// LICENSE file at the root of this repository.
//---------------------------------------------------------------------------//

//! This crate contains the codecs to read and write the binary formats used by Re-Volt.
//!
//! The supported formats are:
//!
//! | Extension | Codec | Contents |
//! | --------- | ----- | -------- |
//! | `.prm`, `.m` | [`files::prm`] | Models: polygons with per-corner colour and UV, plus vertices. |
//! | `.w`    | [`files::w`]   | Worlds: meshes with culling bounds, big cubes, texture animations and env colours. |
//! | `.ncp`  | [`files::ncp`] | Collision cells described by planes, plus a broad-phase lookup grid. |
//! | `.hul`  | [`files::hul`] | Convex hulls with their interior sphere filling. |
//! | `.fin`  | [`files::fin`] | Instances of models placed in a world. |
//! | `.fob`  | [`files::fob`] | Scripted objects placed in a world. |
//! | `.inf`  | [`files::inf`] | World metadata, in parameter-block text. |
//! | `parameters.txt` | [`files::car`] | Car setup, in parameter-block text. |
//!
//! Every raw file struct implements [`Decodeable`](files::Decodeable) and [`Encodeable`](files::Encodeable),
//! so decoding and encoding it again gives back the same bytes. To work with the geometry in a right-handed,
//! Z-up space, use the `to_mesh`/`from_mesh` conversions together with a [`Transform`](transform::Transform),
//! or the path-level functions in [`import`] and [`export`].

// Disabled `Clippy` linters, with the reasons why they were disabled.
#![allow(
    clippy::too_many_arguments,             // Decoders for fixed records take a lot of values.
    clippy::type_complexity,                // Disabled temporarily.
)]

pub mod binary;
pub mod config;
pub mod error;
pub mod export;
pub mod files;
pub mod geometry;
pub mod import;
pub mod integrations;
pub mod transform;
pub mod utils;

#[cfg(test)] mod utils_test;
