// src/roster.rs
//! Participant registry: `<data>/<year>/participants/<event_id>.csv`, one
//! header line, then one pilot per line with the name in the first field.
//!
//! Loaded once into a set, so membership checks are O(1). A missing file is not
//! an error until someone asks about a pilot: a run where no row ever reaches
//! the roster check finishes with zero flights, exactly like an empty roster.

use std::collections::HashSet;
use std::path::PathBuf;

use crate::config::consts::REGISTRY_SEP;
use crate::config::options::DataPaths;
use crate::csv::data_rows;
use crate::error::Error;
use crate::file::read_if_exists;

#[derive(Clone, Debug)]
pub struct Roster {
    event_id: u32,
    source: PathBuf,
    names: Option<HashSet<String>>,
}

impl Roster {
    pub fn load(paths: &DataPaths, year: i32, event_id: u32) -> Result<Self, Error> {
        let source = paths.participants_file(year, event_id);
        let Some(text) = read_if_exists(&source)? else {
            logw!("No participant registry for event {event_id} at {}", source.display());
            return Ok(Self { event_id, source, names: None });
        };

        let names: HashSet<String> = data_rows(&text, REGISTRY_SEP)
            .filter_map(|row| row.into_iter().next())
            .filter(|name| !name.is_empty())
            .collect();
        logd!(event_id, pilots = names.len(), "roster loaded");
        Ok(Self { event_id, source, names: Some(names) })
    }

    /// An in-memory roster.
    pub fn from_names<I, S>(event_id: u32, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            event_id,
            source: PathBuf::new(),
            names: Some(names.into_iter().map(Into::into).collect()),
        }
    }

    /// A roster whose registry file does not exist.
    pub fn missing(event_id: u32, source: impl Into<PathBuf>) -> Self {
        Self { event_id, source: source.into(), names: None }
    }

    pub fn is_available(&self) -> bool {
        self.names.is_some()
    }

    /// Registered pilots; 0 for a missing registry.
    pub fn len(&self) -> usize {
        self.names.as_ref().map_or(0, HashSet::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Exact, case-sensitive name match. Fails if the registry file is missing.
    pub fn is_registered(&self, pilot_name: &str) -> Result<bool, Error> {
        match &self.names {
            Some(names) => Ok(names.contains(pilot_name)),
            None => Err(Error::RosterMissing { event_id: self.event_id, path: self.source.clone() }),
        }
    }
}
