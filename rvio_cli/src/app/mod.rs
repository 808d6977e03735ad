//---------------------------------------------------------------------------//
// Copyright (c) 2024 The rvio contributors. All rights reserved.
//
// This file is part of the Re-Volt I/O (rvio) project.
//
// This file is licensed under the MIT license, which can be found in the
// LICENSE file at the root of this repository.
//---------------------------------------------------------------------------//

//! App module for the CLI tool.
//!
//! This contains the definition of the arguments and commands of the tool.

use clap::{Parser, Subcommand};

use std::path::PathBuf;

use rvio_lib::transform::DEFAULT_SCALE;

//---------------------------------------------------------------------------//
//                          App helpers
//---------------------------------------------------------------------------//

/// CLI tool to inspect and convert Re-Volt files.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {

    /// Make output more detailed.
    #[arg(short, long)]
    pub verbose: bool,

    /// Scale from file units to external units. Re-Volt cars usually look right with 0.1.
    #[arg(short, long, value_name = "SCALE", default_value_t = DEFAULT_SCALE)]
    pub scale: f32,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {

    /// Print a summary of a file. The type of the file is guessed from its name.
    Info {

        /// Path of the file to inspect.
        #[arg(value_name = "FILE_PATH")]
        path: PathBuf,
    },

    /// Decode a file into JSON, in external space.
    Decode {

        /// Path of the file to decode.
        #[arg(value_name = "FILE_PATH")]
        path: PathBuf,

        /// Path of the JSON file to write. If not provided, the JSON is printed.
        #[arg(short, long, value_name = "JSON_PATH")]
        output: Option<PathBuf>,
    },

    /// Encode a JSON file into the format given by the extension of the destination.
    Encode {

        /// Path of the JSON file to encode.
        #[arg(value_name = "JSON_PATH")]
        input: PathBuf,

        /// Path of the file to write.
        #[arg(value_name = "FILE_PATH")]
        path: PathBuf,

        /// Write every model polygon untextured.
        #[arg(long)]
        no_textures: bool,

        /// Size of the collision lookup grid cells, in file units. If not provided, a single cell is used.
        #[arg(long, value_name = "SIZE")]
        cell_size: Option<f32>,
    },

    /// Print a summary of every file passed, in parallel. Useful to check entire game folders for broken files.
    Check {

        /// Paths of the files to check.
        #[arg(value_name = "FILE_PATHS", required = true)]
        paths: Vec<PathBuf>,
    },
}
