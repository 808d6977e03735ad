//---------------------------------------------------------------------------//
// Copyright (c) 2024 The rvio contributors. All rights reserved.
//
// This file is part of the Re-Volt I/O (rvio) project.
//
// This file is licensed under the MIT license, which can be found in the
// LICENSE file at the root of this repository.
//---------------------------------------------------------------------------//

//! Module with generic utility functions that don't fit anywhere else.

use std::fs::File;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::binary::ReadBytes;
use crate::error::{RLibError, Result};

//--------------------------------------------------------//
// Generic utils.
//--------------------------------------------------------//

/// This function returns the current time, as seconds since the unix epoch.
pub fn current_time() -> Result<u64> {
    Ok(SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs())
}

/// This function opens the file at `path`, unless it doesn't exist or it's empty.
///
/// Re-Volt content references a lot of optional companion files, so both cases mean "nothing to read" rather than an error.
pub fn open_if_not_empty(path: &Path) -> Result<Option<File>> {
    if !path.is_file() {
        return Ok(None);
    }

    let file = File::open(path)?;
    if file.metadata()?.len() == 0 {
        return Ok(None);
    }

    Ok(Some(file))
}

/// This function returns the name of the folder containing `path`, lowercased.
pub fn parent_folder_name(path: &Path) -> Option<String> {
    path.parent()
        .and_then(|parent| parent.file_name())
        .map(|name| name.to_string_lossy().to_lowercase())
}

//--------------------------------------------------------//
// Decoder utils.
//--------------------------------------------------------//

/// Function to check for a size mismatch error (we expected the cursor to be at `expected_pos`,
/// but instead we're at `curr_pos`).
pub(crate) fn check_size_mismatch(curr_pos: usize, expected_pos: usize) -> Result<()> {
    if curr_pos != expected_pos {
        return Err(RLibError::DecodingMismatchSizeError(expected_pos, curr_pos));
    }

    Ok(())
}

/// Function to sanity-check a count read from the data.
///
/// A count is rejected if it's negative, or if `count` records of at least `min_record_size` bytes
/// cannot fit in what's left of the data.
pub(crate) fn check_count<R: ReadBytes>(data: &mut R, name: &'static str, count: i64, min_record_size: u64) -> Result<usize> {
    let remaining = data.remaining()?;
    if count < 0 || (count as u64).saturating_mul(min_record_size) > remaining {
        return Err(RLibError::InvalidCount(name, count, remaining));
    }

    Ok(count as usize)
}

//--------------------------------------------------------//
// Encoder utils.
//--------------------------------------------------------//

/// Function to check a list fits in an i16 count before encoding it.
pub(crate) fn count_as_i16(name: &'static str, len: usize) -> Result<i16> {
    i16::try_from(len).map_err(|_| RLibError::EncodingTooManyElements(name, len, i16::MAX as usize))
}

/// Function to check a list fits in an i32 count before encoding it.
pub(crate) fn count_as_i32(name: &'static str, len: usize) -> Result<i32> {
    i32::try_from(len).map_err(|_| RLibError::EncodingTooManyElements(name, len, i32::MAX as usize))
}
