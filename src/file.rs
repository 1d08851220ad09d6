// src/file.rs

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::config::consts::{EXPORT_HEADERS, EXPORT_SEP};
use crate::config::options::DataPaths;
use crate::csv::rows_to_string;
use crate::error::Error;
use crate::ranking::RankedResultSet;

/// Write the ranked flights of one event to `<out>/<year>/<date>_<site>.csv`,
/// replacing any previous export. Returns the path written to.
///
/// The whole file is rendered before it is opened, so a failure leaves an
/// earlier export untouched.
pub fn export_flights(
    paths: &DataPaths,
    year: i32,
    date: &str,
    launch_site: &str,
    flights: &RankedResultSet,
) -> Result<PathBuf, Error> {
    logf!("Exporting flights to CSV...");

    ensure_directory(&paths.output_dir(year))?;
    let path = paths.output_file(year, date, launch_site);

    let contents = flights_to_csv(flights);
    fs::write(&path, contents).map_err(|e| Error::io(&path, e))?;

    logf!("Export complete!");
    Ok(path)
}

/// Fixed header, then one line per record in rank order.
pub fn flights_to_csv(flights: &RankedResultSet) -> String {
    let rows: Vec<Vec<String>> = flights.iter().map(|r| r.to_row()).collect();
    rows_to_string(&EXPORT_HEADERS, &rows, EXPORT_SEP)
}

/// Read a whole file, or `None` if it does not exist.
pub fn read_if_exists(path: &Path) -> Result<Option<String>, Error> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::io(path, e)),
    }
}

pub fn ensure_directory(dir: &Path) -> Result<(), Error> {
    if dir.exists() && !dir.is_dir() {
        let e = io::Error::new(io::ErrorKind::AlreadyExists, "path exists but is not a directory");
        return Err(Error::io(dir, e));
    }
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
    }
    Ok(())
}
