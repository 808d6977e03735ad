//---------------------------------------------------------------------------//
// Copyright (c) 2024 The rvio contributors. All rights reserved.
//
// This file is part of the Re-Volt I/O (rvio) project.
//
// This file is licensed under the MIT license, which can be found in the
// LICENSE file at the root of this repository.
//---------------------------------------------------------------------------//

//! Parameter blocks, the text format used by `parameters.txt` and `.inf` files.
//!
//! A parameter block is a list of lines, each one a list of tokens separated by spaces, plus named sub-blocks:
//!
//! ```text
//! ; Comments start with a semicolon.
//! Name        "Some Car"
//! MODEL   0   "cars\somecar\body.prm"
//!
//! WHEEL 0 {
//!     IsPresent   TRUE
//!     Offset1     -21.0 8.5 29.0
//! }
//! ```
//!
//! Quoted tokens keep their quotes, and can contain spaces. Keys are matched ignoring case, but tokens are
//! kept as they are in the file.

use getset::*;
use lazy_static::lazy_static;
use regex::Regex;
use serde_derive::{Serialize, Deserialize};

use std::collections::BTreeMap;

use crate::error::{RLibError, Result};

/// Spaces between the longest key and the values when writing a block.
const KEY_PADDING: usize = 5;

#[cfg(test)] mod parameters_test;

lazy_static! {

    /// Tokens are quoted strings or runs of non-space characters.
    static ref TOKEN_REGEX: Regex = Regex::new(r#"(['"].+['"]|\S+)"#).unwrap();
}

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// A block of parameters, with its sub-blocks.
#[derive(Default, PartialEq, Clone, Debug, Getters, MutGetters, Setters, Serialize, Deserialize)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct ParameterBlock {

    /// Sub-blocks, by the text before their opening brace.
    blocks: BTreeMap<String, ParameterBlock>,

    /// Parameter lines, already split in tokens.
    params: Vec<Vec<String>>,
}

//---------------------------------------------------------------------------//
//                       Implementation of ParameterBlock
//---------------------------------------------------------------------------//

impl ParameterBlock {

    /// This function parses a full text as a block.
    pub fn parse(text: &str) -> Self {
        Self::from_lines(&mut text.lines())
    }

    /// This function parses lines as a block, until the end of the lines or a line closing the block.
    ///
    /// The closing line is consumed, so the caller can keep reading after the block.
    pub fn from_lines<'a, I: Iterator<Item = &'a str>>(lines: &mut I) -> Self {
        let mut block = Self::default();

        while let Some(line) = lines.next() {
            let line = match line.split_once(';') {
                Some((line, _)) => line.trim_end(),
                None => line.trim_end(),
            };

            if line.trim().is_empty() {
                continue;
            }

            if let Some(index) = line.find('{') {
                let mut key = line[..index].trim().to_owned();

                // Keys can be alone in the line before the brace.
                if key.is_empty() {
                    if let Some(tokens) = block.params.pop() {
                        key = tokens.join(" ");
                    }
                }

                let sub_block = Self::from_lines(lines);
                block.blocks.insert(key, sub_block);
                continue;
            }

            if line.contains('}') {
                break;
            }

            block.params.push(tokenize(line));
        }

        block
    }

    /// This function returns the sub-block called `name`, ignoring case.
    pub fn block(&self, name: &str) -> Option<&ParameterBlock> {
        self.blocks.get(name).or_else(|| self.blocks.iter()
            .find(|(key, _)| caseless::default_caseless_match_str(key, name))
            .map(|(_, block)| block))
    }

    /// This function returns the tokens following the first line starting with `keys`.
    ///
    /// Lines with nothing after the keys don't match.
    pub fn get_parameters(&self, keys: &[&str]) -> Option<&[String]> {
        self.params.iter()
            .find(|tokens| tokens.len() > keys.len() && keys.iter()
                .zip(tokens.iter())
                .all(|(key, token)| caseless::default_caseless_match_str(key, token)))
            .map(|tokens| &tokens[keys.len()..])
    }

    /// This function returns the token right after the first line starting with `keys`.
    pub fn get_parameter(&self, keys: &[&str]) -> Option<&str> {
        self.get_parameters(keys).and_then(|values| values.first()).map(|value| value.as_str())
    }

    /// This function returns the value after `keys` without its quotes.
    pub fn get_string(&self, keys: &[&str]) -> Option<String> {
        self.get_parameter(keys).map(|value| unquote(value).to_owned())
    }

    /// This function returns the value after `keys` as a float.
    pub fn get_f32(&self, keys: &[&str]) -> Result<Option<f32>> {
        self.get_parameter(keys)
            .map(|value| parse_f32(keys, value))
            .transpose()
    }

    /// This function returns all the values after `keys` as floats.
    pub fn get_floats(&self, keys: &[&str]) -> Result<Option<Vec<f32>>> {
        self.get_parameters(keys)
            .map(|values| values.iter().map(|value| parse_f32(keys, value)).collect())
            .transpose()
    }

    /// This function returns if the value after `keys` is `TRUE`. Missing values are false.
    pub fn get_bool(&self, keys: &[&str]) -> bool {
        self.get_parameter(keys).is_some_and(|value| caseless::default_caseless_match_str(value, "TRUE"))
    }

    /// This function sets the values of the line starting with `key`, adding the line if there is none.
    ///
    /// An existing line keeps the case of its key.
    pub fn set_parameter(&mut self, key: &str, values: &[String]) {
        match self.params.iter_mut().find(|tokens| tokens.first().is_some_and(|token| caseless::default_caseless_match_str(token, key))) {
            Some(tokens) => {
                tokens.truncate(1);
                tokens.extend_from_slice(values);
            }
            None => {
                let mut tokens = vec![key.to_owned()];
                tokens.extend_from_slice(values);
                self.params.push(tokens);
            }
        }
    }

    /// This function writes the block as text.
    ///
    /// Values are aligned a few spaces after the longest key. Sub-blocks go after the parameters.
    pub fn write(&self) -> String {
        self.write_indented(0)
    }

    fn write_indented(&self, depth: usize) -> String {
        let indent = "    ".repeat(depth);
        let width = self.params.iter()
            .filter_map(|tokens| tokens.first())
            .map(|key| key.len())
            .max()
            .unwrap_or_default() + KEY_PADDING;

        let mut text = String::new();
        for tokens in &self.params {
            if let Some((key, values)) = tokens.split_first() {
                let line = format!("{key:width$}{}", values.join(" "));
                text.push_str(&indent);
                text.push_str(line.trim_end());
                text.push('\n');
            }
        }

        for (key, block) in &self.blocks {
            text.push_str(&format!("{indent}{key} {{\n"));
            text.push_str(&block.write_indented(depth + 1));
            text.push_str(&format!("{indent}}}\n"));
        }

        text
    }
}

/// This function splits a line in tokens.
fn tokenize(line: &str) -> Vec<String> {
    TOKEN_REGEX.find_iter(line)
        .map(|token| token.as_str().to_owned())
        .collect()
}

/// This function removes the quotes around a token, if it has them.
pub fn unquote(token: &str) -> &str {
    let quoted = token.len() >= 2 &&
        (token.starts_with('"') && token.ends_with('"') || token.starts_with('\'') && token.ends_with('\''));

    if quoted {
        &token[1..token.len() - 1]
    } else {
        token
    }
}

fn parse_f32(keys: &[&str], value: &str) -> Result<f32> {
    value.parse::<f32>().map_err(|_| RLibError::InvalidParameter(keys.join(" "), value.to_owned()))
}
