//---------------------------------------------------------------------------//
// Copyright (c) 2024 The rvio contributors. All rights reserved.
//
// This file is part of the Re-Volt I/O (rvio) project.
//
// This file is licensed under the MIT license, which can be found in the
// LICENSE file at the root of this repository.
//---------------------------------------------------------------------------//

//! Commands of the CLI tool. Each one returns an error if any of the files involved fails to decode or encode.

use anyhow::{anyhow, Result};
use log::{error, info};
use rayon::prelude::*;

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Config;

mod convert;
mod info;

#[cfg(test)] mod commands_test;

//---------------------------------------------------------------------------//
//                              Command Variants
//---------------------------------------------------------------------------//

/// This function prints the summary of a file.
pub fn command_info(config: &Config, path: &Path) -> Result<()> {
    println!("{}", info::summary(config, path)?);
    Ok(())
}

/// This function decodes a file into JSON, and writes it to `output` or prints it.
pub fn command_decode(config: &Config, path: &Path, output: Option<&Path>) -> Result<()> {
    let json = convert::to_json(config, path)?;
    match output {
        Some(output) => {
            fs::write(output, json)?;
            info!("Decoded {} into {}.", path.display(), output.display());
        }
        None => println!("{json}"),
    }

    Ok(())
}

/// This function encodes a JSON file into `path`.
pub fn command_encode(config: &Config, input: &Path, path: &Path, no_textures: bool, cell_size: Option<f32>) -> Result<()> {
    let json = fs::read_to_string(input)?;
    convert::from_json(config, &json, path, !no_textures, cell_size)
}

/// This function decodes all the provided files in parallel, and reports the ones that failed.
pub fn command_check(config: &Config, paths: &[PathBuf]) -> Result<()> {
    let results = paths.par_iter()
        .map(|path| (path, info::summary(config, path)))
        .collect::<Vec<_>>();

    let mut failed = 0;
    for (path, result) in results {
        match result {
            Ok(summary) => if config.verbose {
                println!("{summary}");
            } else {
                println!("{}: OK", path.display());
            },
            Err(error) => {
                failed += 1;
                error!("{}: {}", path.display(), error);
            }
        }
    }

    if failed > 0 {
        Err(anyhow!("{} of {} files failed to decode.", failed, paths.len()))
    } else {
        Ok(())
    }
}

//---------------------------------------------------------------------------//
//                              Utils
//---------------------------------------------------------------------------//

/// This function turns the "nothing to read" result of the imports into an error, as here we need the file.
fn required<T>(path: &Path, value: Option<T>) -> Result<T> {
    value.ok_or_else(|| anyhow!("The file {} doesn't exist or it's empty.", path.display()))
}
