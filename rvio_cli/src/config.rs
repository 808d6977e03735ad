//---------------------------------------------------------------------------//
// Copyright (c) 2024 The rvio contributors. All rights reserved.
//
// This file is part of the Re-Volt I/O (rvio) project.
//
// This file is licensed under the MIT license, which can be found in the
// LICENSE file at the root of this repository.
//---------------------------------------------------------------------------//

//! This module contains the configuration used during the execution of the program.

use anyhow::{anyhow, Result};

use rvio_lib::transform::Transform;

/// This struct serves to hold the configuration used during the execution of the program.
pub struct Config {
    pub verbose: bool,
    pub transform: Transform,
}

impl Config {

    /// This function creates a new Config struct with the provided scale.
    pub fn new(verbose: bool, scale: f32) -> Result<Self> {
        if !scale.is_normal() || scale < 0.0 {
            return Err(anyhow!("Invalid scale: {}. It must be a positive number.", scale));
        }

        Ok(Self {
            verbose,
            transform: Transform::new(scale),
        })
    }
}
