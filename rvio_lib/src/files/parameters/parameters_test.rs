//---------------------------------------------------------------------------//
// Copyright (c) 2024 The rvio contributors. All rights reserved.
//
// This file is part of the Re-Volt I/O (rvio) project.
//
// This file is licensed under the MIT license, which can be found in the
// LICENSE file at the root of this repository.
//---------------------------------------------------------------------------//

//! Module containing tests for parsing and writing parameter blocks.

use float_eq::assert_float_eq;

use crate::error::RLibError;

use super::*;

const CAR_BLOCK: &str = "\
Name        \"Test Car\"   ; The name shown in menus.
MODEL   0   \"cars\\test\\body.prm\"
MODEL   1   \"cars\\test\\wheel.prm\"
SteerRate   3.5

WHEEL 0 {
    ModelNum    1
    IsPresent   TRUE
    IsPowered   false
    Offset1     -21.0 8.5 29.0
}

BODY
{
    ModelNum    0
}
}
LEFTOVER    1
";

#[test]
fn test_parse_blocks() {
    let block = ParameterBlock::parse("WHEEL 0\n{\n  IsPresent TRUE\n}\n");
    assert!(block.params().is_empty());
    assert!(block.block("WHEEL 0").unwrap().get_bool(&["IsPresent"]));

    let block = ParameterBlock::parse(CAR_BLOCK);
    assert_eq!(block.blocks().len(), 2);
    assert_eq!(block.params().len(), 4);

    // The closing brace ends the block, so what goes after it isn't read.
    assert_eq!(block.get_parameter(&["LEFTOVER"]), None);
}

#[test]
fn test_comments() {
    let block = ParameterBlock::parse("FARCLIP 500 ; comment\n; only a comment\n   \nFOGSTART 100");
    assert_eq!(block.params(), &vec![
        vec!["FARCLIP".to_owned(), "500".to_owned()],
        vec!["FOGSTART".to_owned(), "100".to_owned()],
    ]);
}

#[test]
fn test_quoted_tokens() {
    let block = ParameterBlock::parse(CAR_BLOCK);
    assert_eq!(block.get_parameter(&["Name"]), Some("\"Test Car\""));
    assert_eq!(block.get_string(&["Name"]), Some("Test Car".to_owned()));
    assert_eq!(block.get_parameter(&["MODEL", "1"]), Some("\"cars\\test\\wheel.prm\""));

    assert_eq!(unquote("'Toy World'"), "Toy World");
    assert_eq!(unquote("plain"), "plain");
    assert_eq!(unquote("\""), "\"");
}

#[test]
fn test_case_insensitive_lookup() {
    let block = ParameterBlock::parse(CAR_BLOCK);
    assert_eq!(block.get_parameter(&["name"]), Some("\"Test Car\""));
    assert_eq!(block.get_parameter(&["model", "0"]), Some("\"cars\\test\\body.prm\""));

    let wheel = block.block("wheel 0").unwrap();
    assert_eq!(wheel.get_parameter(&["modelnum"]), Some("1"));
    assert!(wheel.get_bool(&["ISPRESENT"]));
    assert!(!wheel.get_bool(&["IsPowered"]));
    assert!(!wheel.get_bool(&["IsTurnable"]));

    assert!(block.block("BODY").is_some());
    assert!(block.block("WHEEL 1").is_none());
}

#[test]
fn test_numbers() {
    let block = ParameterBlock::parse(CAR_BLOCK);
    assert_float_eq!(block.get_f32(&["SteerRate"]).unwrap().unwrap(), 3.5, abs <= 0.0001);
    assert!(block.get_f32(&["Missing"]).unwrap().is_none());

    let offset = block.block("WHEEL 0").unwrap().get_floats(&["Offset1"]).unwrap().unwrap();
    assert_eq!(offset, vec![-21.0, 8.5, 29.0]);

    // Keys without values don't match.
    let block = ParameterBlock::parse("STARTPOS\nFARCLIP far");
    assert!(block.get_floats(&["STARTPOS"]).unwrap().is_none());
    assert!(matches!(block.get_f32(&["FARCLIP"]), Err(RLibError::InvalidParameter(_, _))));
}

#[test]
fn test_write() {
    let mut block = ParameterBlock::default();
    block.set_parameter("NAME", &["'Toy World'".to_owned()]);
    block.set_parameter("STARTPOS", &["0".to_owned(), "0".to_owned(), "0".to_owned()]);
    block.set_parameter("FARCLIP", &["6000".to_owned()]);
    block.set_parameter("name", &["'Toy World 2'".to_owned()]);

    let text = block.write();
    assert_eq!(text, "NAME         'Toy World 2'\nSTARTPOS     0 0 0\nFARCLIP      6000\n");

    let parsed = ParameterBlock::parse(&text);
    assert_eq!(parsed.get_string(&["NAME"]), Some("Toy World 2".to_owned()));

    // Sub-blocks survive a write/parse cycle.
    let block = ParameterBlock::parse(CAR_BLOCK);
    assert_eq!(ParameterBlock::parse(&block.write()), block);
}
