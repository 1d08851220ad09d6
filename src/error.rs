// src/error.rs
use std::{io, path::PathBuf, time::Duration};

use thiserror::Error;

use crate::browser::BrowserError;

/// Every way a run can fail. None of them are retried: the caller aborts and
/// nothing is exported.
#[derive(Error, Debug)]
pub enum Error {
    // Resolution (before any network access)
    #[error("No event registry for {year}: {path} does not exist")]
    RegistryMissing { year: i32, path: PathBuf },

    #[error("Event not found: no event {event_id} in {path}")]
    EventNotFound { event_id: u32, path: PathBuf },

    #[error("Malformed registry {path}, line {line}: {reason}")]
    MalformedRegistry { path: PathBuf, line: usize, reason: String },

    #[error("No participant registry for event {event_id}: {path} does not exist")]
    RosterMissing { event_id: u32, path: PathBuf },

    // Fetch
    #[error("Timed out after {after:?} waiting for {what}")]
    Timeout { what: String, after: Duration },

    #[error("Malformed pager link: {0}")]
    MalformedPager(String),

    // Extraction
    #[error("Malformed results row {row} at offset {offset}: {source}")]
    MalformedRow {
        offset: usize,
        row: usize,
        #[source]
        source: ExtractError,
    },

    // Infrastructure
    #[error(transparent)]
    Browser(#[from] BrowserError),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io { path: path.into(), source }
    }

    /// Resolution errors are raised before a browser session is opened.
    pub fn is_resolution(&self) -> bool {
        matches!(
            self,
            Error::RegistryMissing { .. }
                | Error::EventNotFound { .. }
                | Error::MalformedRegistry { .. }
                | Error::RosterMissing { .. }
        )
    }
}

/// A row did not have the shape the row schema expects.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("cell {cell} missing (row has {found} cells)")]
    MissingCell { cell: usize, found: usize },

    #[error("cell {cell} has no line {line}")]
    MissingLine { cell: usize, line: usize },

    #[error("cell {cell} is empty")]
    EmptyToken { cell: usize },

    #[error("cell {cell} has no `{css}` element")]
    MissingChild { cell: usize, css: &'static str },

    #[error("cell {cell} element has no `{attr}` attribute")]
    MissingAttribute { cell: usize, attr: &'static str },

    #[error(transparent)]
    Browser(#[from] BrowserError),
}

impl ExtractError {
    /// Attach the row position. Session failures stay session failures.
    pub fn at(self, offset: usize, row: usize) -> Error {
        match self {
            ExtractError::Browser(e) => Error::Browser(e),
            source => Error::MalformedRow { offset, row, source },
        }
    }
}
