//! Command line configuration for the `species-atlas` binary.
//!
//! Values come from command line arguments, with environment variable
//! fallbacks for the options that are commonly fixed per machine:
//!
//! - `SPECIES_ATLAS_QUIT_WORD`: word that ends the search session (default `quit`)
//! - `SPECIES_ATLAS_LOG`: `tracing` filter directive (default `warn`)

use clap::Parser;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::ingest::IngestOptions;
use crate::session::DEFAULT_QUIT_WORD;

/// Configuration errors detected before any data is read.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The data file does not exist.
    #[error("the file {} does not exist", .0.display())]
    MissingDataFile(PathBuf),

    /// The data file path names something other than a regular file.
    #[error("{} is not a regular file", .0.display())]
    NotAFile(PathBuf),

    /// The data file exists but cannot be opened for reading.
    #[error("the file {} cannot be read", .path.display())]
    Unreadable {
        /// Path of the data file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The quit word is empty, so the session could never be ended by it.
    #[error("the quit word must not be empty")]
    EmptyQuitWord,
}

/// Search NY biodiversity-by-county data by common or scientific name.
#[derive(Clone, Debug, Parser)]
#[command(name = "species-atlas", version, about)]
pub struct AtlasConfig {
    /// CSV export of the "Biodiversity by County" dataset.
    pub data_file: PathBuf,

    /// Word that ends the interactive search (case-insensitive).
    #[arg(long, env = "SPECIES_ATLAS_QUIT_WORD", default_value = DEFAULT_QUIT_WORD)]
    pub quit_word: String,

    /// The data file has no column header row.
    #[arg(long)]
    pub no_header: bool,

    /// Log filter directive, e.g. `info` or `species_atlas=debug`.
    #[arg(long, env = "SPECIES_ATLAS_LOG", default_value = "warn")]
    pub log_filter: String,
}

impl AtlasConfig {
    /// Checks that the data file can be read and the quit word is usable.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.quit_word.trim().is_empty() {
            return Err(ConfigError::EmptyQuitWord);
        }
        check_readable_file(&self.data_file)
    }

    /// Returns the ingestion options implied by this configuration.
    pub const fn ingest_options(&self) -> IngestOptions {
        IngestOptions {
            has_header: !self.no_header,
        }
    }
}

fn check_readable_file(path: &Path) -> Result<(), ConfigError> {
    let metadata = fs::metadata(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => ConfigError::MissingDataFile(path.to_path_buf()),
        _ => ConfigError::Unreadable {
            path: path.to_path_buf(),
            source,
        },
    })?;
    if !metadata.is_file() {
        return Err(ConfigError::NotAFile(path.to_path_buf()));
    }

    File::open(path)
        .map(drop)
        .map_err(|source| ConfigError::Unreadable {
            path: path.to_path_buf(),
            source,
        })
}
