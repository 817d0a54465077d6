//! Loading a catalog from delimited rows.
//!
//! Each usable row becomes a [`Species`] inserted together with its county,
//! so repeated rows for one species fold into a single entry. Rows that
//! cannot be parsed, or whose fields cannot form a valid species, are
//! skipped and logged (including rows that are not valid UTF-8); only I/O
//! failures stop the load.

use std::fmt;
use std::io::{self, BufRead};
use std::str;
use thiserror::Error;

use crate::record::{RecordError, parse_line};
use crate::species::Species;
use crate::species_list::SpeciesList;

/// Options controlling how rows are read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IngestOptions {
    /// Skip the first line as a column header.
    pub has_header: bool,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self { has_header: true }
    }
}

/// Counters describing one load.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IngestReport {
    /// Data rows read, excluding the header.
    pub rows_read: usize,
    /// Rows skipped because they were blank, malformed or invalid.
    pub rows_skipped: usize,
    /// Rows that created a new catalog entry.
    pub species_added: usize,
    /// Rows merged into an existing entry.
    pub records_merged: usize,
}

impl fmt::Display for IngestReport {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "{} rows read, {} skipped, {} species added, {} merged",
            self.rows_read, self.rows_skipped, self.species_added, self.records_merged
        )
    }
}

/// Errors that stop a load.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Reading a line failed.
    #[error("failed to read line {line}")]
    Io {
        /// 1-based line number.
        line: usize,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// Reads every row from `reader` into a new catalog.
///
/// # Errors
///
/// Returns [`IngestError::Io`] if reading from `reader` fails.
///
/// # Examples
///
/// ```rust
/// use species_atlas::ingest::{IngestOptions, load_catalog};
///
/// let data = "County,Category,Group,Sub-Group,Scientific,Common,Year,Status\n\
///             Erie,Animal,Mammals,Cats,Lynx rufus,Bobcat,2019,Not Listed\n\
///             Suffolk,Animal,Mammals,Cats,Lynx rufus,Bobcat,2020,Not Listed\n";
///
/// let (catalog, report) = load_catalog(data.as_bytes(), &IngestOptions::default())?;
/// assert_eq!(catalog.len(), 1);
/// assert_eq!(report.records_merged, 1);
/// # Ok::<(), species_atlas::ingest::IngestError>(())
/// ```
pub fn load_catalog<R: BufRead>(
    reader: R,
    options: &IngestOptions,
) -> Result<(SpeciesList, IngestReport), IngestError> {
    let mut catalog = SpeciesList::new();
    let report = load_into(&mut catalog, reader, options)?;
    Ok((catalog, report))
}

/// Reads every row from `reader` into an existing catalog.
///
/// # Errors
///
/// Returns [`IngestError::Io`] if reading from `reader` fails.
pub fn load_into<R: BufRead>(
    catalog: &mut SpeciesList,
    mut reader: R,
    options: &IngestOptions,
) -> Result<IngestReport, IngestError> {
    let mut report = IngestReport::default();
    let mut buffer = Vec::new();
    let mut line_number = 0;

    loop {
        buffer.clear();
        line_number += 1;
        let read = reader
            .read_until(b'\n', &mut buffer)
            .map_err(|source| IngestError::Io {
                line: line_number,
                source,
            })?;
        if read == 0 {
            break;
        }
        if line_number == 1 && options.has_header {
            continue;
        }

        report.rows_read += 1;
        let outcome = match str::from_utf8(&buffer) {
            Ok(line) => ingest_row(catalog, line.trim_end_matches(['\r', '\n']), line_number),
            Err(error) => {
                tracing::warn!(line = line_number, %error, "skipping row that is not valid UTF-8");
                None
            }
        };
        match outcome {
            Some(true) => report.species_added += 1,
            Some(false) => report.records_merged += 1,
            None => report.rows_skipped += 1,
        }
    }

    tracing::info!(%report, species = catalog.len(), "catalog loaded");
    Ok(report)
}

/// Returns whether the row added a new entry, or `None` if it was skipped.
fn ingest_row(catalog: &mut SpeciesList, line: &str, line_number: usize) -> Option<bool> {
    if line.trim().is_empty() {
        tracing::debug!(line = line_number, "skipping blank row");
        return None;
    }

    let record = match parse_line(line) {
        Ok(record) => record,
        Err(RecordError::BlankCounty) => {
            tracing::debug!(line = line_number, "skipping row without county");
            return None;
        }
        Err(error) => {
            tracing::warn!(line = line_number, %error, row = line, "skipping malformed row");
            return None;
        }
    };

    let outcome = Species::try_from(&record)
        .and_then(|species| catalog.insert_with_county(species, &record.county));
    match outcome {
        Ok(added) => Some(added),
        Err(error) => {
            tracing::debug!(line = line_number, %error, "skipping invalid species row");
            None
        }
    }
}
