//---------------------------------------------------------------------------//
// Copyright (c) 2024 The rvio contributors. All rights reserved.
//
// This file is part of the Re-Volt I/O (rvio) project.
//
// This file is licensed under the MIT license, which can be found in the
// LICENSE file at the root of this repository.
//---------------------------------------------------------------------------//

//! Module containing tests for the config paths.

use super::*;

#[test]
fn test_error_path_is_inside_config_path() {

    // Some CI machines have no home folder, so there's no config path to check.
    if let Ok(config_path) = config_path() {
        let error_path = error_path().unwrap();
        assert_eq!(error_path.parent(), Some(config_path.as_path()));
        assert!(error_path.ends_with(ERROR_FOLDER));
    }
}
