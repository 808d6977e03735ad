//---------------------------------------------------------------------------//
// Copyright (c) 2024 The rvio contributors. All rights reserved.
//
// This file is part of the Re-Volt I/O (rvio) project.
//
// This file is licensed under the MIT license, which can be found in the
// LICENSE file at the root of this repository.
//---------------------------------------------------------------------------//

/*!
Terminal logging and crash reports for the rvio tools.

[`Logger::init`] sets up a terminal logger for the codec messages (skipped polygons, padded env
colours, and so on) and a panic hook. When a conversion panics, the hook writes a [`CrashReport`]
as a `rvio-crash-<unix time>.toml` file in the folder passed to `init`, so it can be attached to a bug report.

Nothing is logged until `Logger::init` is called.
!*/

use backtrace::Backtrace;
pub use log::{error, info, warn};
use serde_derive::Serialize;
use simplelog::{ColorChoice, CombinedLogger, LevelFilter, SharedLogger, TermLogger, TerminalMode};

use std::any::Any;
use std::fs::{DirBuilder, File};
use std::io::{BufWriter, Write};
use std::panic::{self, Location, PanicHookInfo};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::utils::current_time;

#[cfg(test)] #[path = "log_test.rs"] mod log_test;

/// Prefix of the crash report files.
const CRASH_REPORT_PREFIX: &str = "rvio-crash";

//-------------------------------------------------------------------------------//
//                              Enums & Structs
//-------------------------------------------------------------------------------//

/// Entry point of the logging setup. It holds no state.
pub struct Logger;

/// What gets written to disk when one of the rvio tools panics.
#[derive(Debug, Serialize)]
pub struct CrashReport {

    /// Tool and version, like `rvio_lib 0.1.0`.
    tool: String,

    /// `debug` or `release`.
    build: String,

    /// OS type and version.
    os: String,

    /// Panic message, if it had one we could read.
    cause: String,

    /// `file:line` where the panic happened.
    location: String,
    backtrace: String,
}

//-------------------------------------------------------------------------------//
//                              Implementations
//-------------------------------------------------------------------------------//

impl Logger {

    /// This function initializes the terminal logger, and the panic hook that writes crash reports to `crash_folder`.
    ///
    /// With `verbose`, info messages are printed too. Otherwise, only warnings and errors.
    pub fn init(crash_folder: &Path, verbose: bool) -> Result<()> {
        DirBuilder::new().recursive(true).create(crash_folder)?;

        let level = if verbose { LevelFilter::Info } else { LevelFilter::Warn };
        let loggers: Vec<Box<dyn SharedLogger + 'static>> = vec![TermLogger::new(level, simplelog::Config::default(), TerminalMode::Mixed, ColorChoice::Auto)];
        log::set_max_level(level);
        log::set_boxed_logger(CombinedLogger::new(loggers))?;

        // The hook runs on every thread, so panics inside the parallel `check` command get reported too.
        let default_hook = panic::take_hook();
        let crash_folder = crash_folder.to_owned();
        panic::set_hook(Box::new(move |info: &PanicHookInfo| {
            let report = CrashReport::from_panic(info);
            match report.save(&crash_folder) {
                Ok(path) => error!("rvio crashed. Crash report written to {}.", path.display()),
                Err(_) => error!("rvio crashed, and the crash report could not be written to {}.", crash_folder.display()),
            }

            default_hook(info);
        }));

        info!("Logger initialized.");
        Ok(())
    }
}

impl CrashReport {

    /// This function builds a report from the panic being handled. It does not touch the disk.
    pub fn from_panic(info: &PanicHookInfo) -> Self {
        Self::new(info.payload(), info.location())
    }

    /// This function builds a report from a panic payload and location, capturing the current backtrace.
    pub fn new(payload: &(dyn Any + Send), location: Option<&Location>) -> Self {
        let os = os_info::get();
        Self {
            tool: format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            build: if cfg!(debug_assertions) { "debug" } else { "release" }.to_owned(),
            os: format!("{} {}", os.os_type(), os.version()),
            cause: panic_cause(payload),
            location: location.map(|location| format!("{}:{}", location.file(), location.line()))
                .unwrap_or_else(|| "unknown".to_owned()),
            backtrace: format!("{:#?}", Backtrace::new()),
        }
    }

    /// This function writes the report into `folder`, returning the path of the new file.
    pub fn save(&self, folder: &Path) -> Result<PathBuf> {
        let path = folder.join(format!("{}-{}.toml", CRASH_REPORT_PREFIX, current_time()?));
        let mut file = BufWriter::new(File::create(&path)?);
        file.write_all(toml::to_string_pretty(&self)?.as_bytes())?;
        file.flush()?;
        Ok(path)
    }
}

/// This function extracts the message of a panic payload. `panic!` produces either a `&str` or a `String`.
fn panic_cause(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_owned()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown".to_owned()
    }
}
