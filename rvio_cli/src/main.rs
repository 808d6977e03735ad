//---------------------------------------------------------------------------//
// Copyright (c) 2024 The rvio contributors. All rights reserved.
//
// This file is part of the Re-Volt I/O (rvio) project.
//
// This file is licensed under the MIT license, which can be found in the
// LICENSE file at the root of this repository.
//---------------------------------------------------------------------------//

// This is the CLI version of rvio. Check `rvio --help` for the available commands.

use clap::Parser;
use log::{error, warn};

use std::process::exit;

use rvio_lib::config::{error_path, init_config_path};
use rvio_lib::integrations::log::Logger;

use crate::app::{Cli, Commands};
use crate::config::Config;

mod app;
mod commands;
mod config;

/// Guess you know what this function does....
fn main() {
    let cli = Cli::parse();

    // Initialize the logging stuff here. This can fail depending on a lot of things, so trigger a console message if it fails.
    let logger = init_config_path()
        .and_then(|_| error_path())
        .and_then(|path| Logger::init(&path, cli.verbose));

    if logger.is_err() && cli.verbose {
        warn!("Logging initialization has failed. No crash reports will be saved.");
    }

    let config = match Config::new(cli.verbose, cli.scale) {
        Ok(config) => config,
        Err(error) => {
            error!("{}", error);
            exit(1)
        }
    };

    let result = match cli.command {
        Commands::Info { path } => commands::command_info(&config, &path),
        Commands::Decode { path, output } => commands::command_decode(&config, &path, output.as_deref()),
        Commands::Encode { input, path, no_textures, cell_size } => commands::command_encode(&config, &input, &path, no_textures, cell_size),
        Commands::Check { paths } => commands::command_check(&config, &paths),
    };

    match result {
        Ok(_) => exit(0),
        Err(error) => {
            error!("{}", error);
            exit(1)
        },
    }
}
