//---------------------------------------------------------------------------//
// Copyright (c) 2024 The rvio contributors. All rights reserved.
//
// This file is part of the Re-Volt I/O (rvio) project.
//
// This file is licensed under the MIT license, which can be found in the
// LICENSE file at the root of this repository.
//---------------------------------------------------------------------------//

//! Module with the paths the tools built on this lib use to store their stuff.
//!
//! The lib itself keeps no state between calls. These folders are only for logs and crash reports.

use directories::ProjectDirs;

use std::fs::DirBuilder;
use std::path::PathBuf;

use crate::error::{RLibError, Result};

#[cfg(test)] mod config_test;

const QUALIFIER: &str = "com";
const ORGANISATION: &str = "rvio";
const PROGRAM_NAME: &str = "rvio";

/// Name of the folder where crash reports are stored, inside the config folder.
const ERROR_FOLDER: &str = "error";

//---------------------------------------------------------------------------//
//                          Config path functions
//---------------------------------------------------------------------------//

/// This function initializes the config folder, creating it if it doesn't exist.
#[must_use = "The logs depend on this folder existing. So better check this worked."]
pub fn init_config_path() -> Result<PathBuf> {
    let config_path = config_path()?;
    DirBuilder::new().recursive(true).create(error_path()?)?;

    if config_path.is_dir() {
        Ok(config_path)
    } else {
        Err(RLibError::ConfigFolderNotFound)
    }
}

/// This function returns the current config path, or an error if said path is not available.
pub fn config_path() -> Result<PathBuf> {
    match ProjectDirs::from(QUALIFIER, ORGANISATION, PROGRAM_NAME) {
        Some(proj_dirs) => Ok(proj_dirs.config_dir().to_path_buf()),
        None => Err(RLibError::ConfigFolderNotFound)
    }
}

/// This function returns the path where crash reports are stored.
pub fn error_path() -> Result<PathBuf> {
    Ok(config_path()?.join(ERROR_FOLDER))
}
