// src/events.rs
//! Event registry: `<data>/<year>/events.csv`, one header line, then one event
//! per line. The event id is the 1-based data row number; columns 2 and 3 hold
//! the date and the launch site. Values are taken verbatim: the site is
//! compared exactly against each result row's launch site.

use crate::config::consts::REGISTRY_SEP;
use crate::config::options::DataPaths;
use crate::csv::data_records;
use crate::data::EventDescriptor;
use crate::error::Error;
use crate::file::read_if_exists;

pub fn lookup(paths: &DataPaths, year: i32, event_id: u32) -> Result<EventDescriptor, Error> {
    let path = paths.events_file(year);
    let text = read_if_exists(&path)?.ok_or_else(|| Error::RegistryMissing { year, path: path.clone() })?;

    let not_found = || Error::EventNotFound { event_id, path: path.clone() };
    let index = (event_id as usize).checked_sub(1).ok_or_else(not_found)?;
    let (line, row) = data_records(&text, REGISTRY_SEP).nth(index).ok_or_else(not_found)?;

    let (Some(date), Some(site)) = (row.get(1), row.get(2)) else {
        return Err(Error::MalformedRegistry {
            path,
            line,
            reason: format!("expected at least 3 fields, found {}", row.len()),
        });
    };

    logf!("Event found: {date}, {site}");
    Ok(EventDescriptor { event_id, date: date.clone(), launch_site: site.clone() })
}
