//---------------------------------------------------------------------------//
// Copyright (c) 2024 The rvio contributors. All rights reserved.
//
// This file is part of the Re-Volt I/O (rvio) project.
//
// This file is licensed under the MIT license, which can be found in the
// LICENSE file at the root of this repository.
//---------------------------------------------------------------------------//

//! Module containing tests for file type detection.

use std::path::Path;

use super::*;

#[test]
fn test_file_type_from_path() {
    assert_eq!(FileType::from_path(Path::new("cars/rotor/body.prm")), FileType::Model);
    assert_eq!(FileType::from_path(Path::new("models/barrel.m")), FileType::Model);
    assert_eq!(FileType::from_path(Path::new("levels/nhood1/nhood1.w")), FileType::World);
    assert_eq!(FileType::from_path(Path::new("levels/nhood1/NHOOD1.NCP")), FileType::Hitbox);
    assert_eq!(FileType::from_path(Path::new("cars/rotor/hull.hul")), FileType::ConvexHull);
    assert_eq!(FileType::from_path(Path::new("levels/nhood1/nhood1.fin")), FileType::Instances);
    assert_eq!(FileType::from_path(Path::new("levels/nhood1/nhood1.fob")), FileType::Objects);
    assert_eq!(FileType::from_path(Path::new("levels/nhood1/nhood1.inf")), FileType::WorldInfo);
    assert_eq!(FileType::from_path(Path::new("cars/rotor/Parameters.txt")), FileType::CarParameters);
}

#[test]
fn test_file_type_unknown() {
    assert_eq!(FileType::from_path(Path::new("cars/rotor/readme.txt")), FileType::Unknown);
    assert_eq!(FileType::from_path(Path::new("levels/nhood1/nhood1.wav")), FileType::Unknown);
    assert_eq!(FileType::from_path(Path::new("")), FileType::Unknown);
    assert_eq!(FileType::default(), FileType::Unknown);
}

#[test]
fn test_log_names() {
    assert_eq!(decode_log_name(&None), "<memory>");

    let mut extra_data = DecodeableExtraData::default();
    extra_data.set_file_name(Some("nhood1.w"));
    assert_eq!(decode_log_name(&Some(extra_data)), "nhood1.w");

    let mut extra_data = EncodeableExtraData::default();
    extra_data.set_file_name(Some("nhood1.w"));
    assert_eq!(encode_log_name(&Some(extra_data)), "nhood1.w");
}
