// src/config/options.rs
use std::path::{Path, PathBuf};

use super::consts::*;
use crate::browser::BrowserKind;
use crate::core::sanitize::sanitize_file_stem;
use crate::scrape::WaitPolicy;

/// Everything one run needs. Built once by the CLI, read-only afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOptions {
    pub event_id: u32,
    pub year: i32,
    pub paths: DataPaths,
    pub query: QueryFilter,
    pub wait: WaitPolicy,
    pub driver: DriverOptions,
}

impl RunOptions {
    pub fn new(event_id: u32, year: i32) -> Self {
        Self {
            event_id,
            year,
            paths: DataPaths::default(),
            query: QueryFilter::default(),
            wait: WaitPolicy::default(),
            driver: DriverOptions::default(),
        }
    }
}

/// Where registries are read from and exports are written to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataPaths {
    pub data_dir: PathBuf,
    pub out_dir: PathBuf,
}

impl Default for DataPaths {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
        }
    }
}

impl DataPaths {
    pub fn new(data_dir: impl AsRef<Path>, out_dir: impl AsRef<Path>) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            out_dir: out_dir.as_ref().to_path_buf(),
        }
    }

    /// `<data>/<year>/events.csv`
    pub fn events_file(&self, year: i32) -> PathBuf {
        self.data_dir.join(year.to_string()).join(EVENTS_FILE)
    }

    /// `<data>/<year>/participants/<event_id>.csv`
    pub fn participants_file(&self, year: i32, event_id: u32) -> PathBuf {
        self.data_dir
            .join(year.to_string())
            .join(PARTICIPANTS_SUBDIR)
            .join(format!("{event_id}.csv"))
    }

    /// `<out>/<year>`
    pub fn output_dir(&self, year: i32) -> PathBuf {
        self.out_dir.join(year.to_string())
    }

    /// `<out>/<year>/<date>_<site>.csv`
    pub fn output_file(&self, year: i32, date: &str, launch_site: &str) -> PathBuf {
        let stem = sanitize_file_stem(&format!("{date}_{launch_site}"));
        self.output_dir(year).join(format!("{stem}.csv"))
    }
}

/// Filters baked into the results query next to the date.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryFilter {
    pub country: String,
    pub category: String,
}

impl Default for QueryFilter {
    fn default() -> Self {
        Self {
            country: s!(DEFAULT_COUNTRY),
            category: s!(DEFAULT_CATEGORY),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DriverOptions {
    pub url: String,
    pub browser: BrowserKind,
    pub headless: bool,
}

impl Default for DriverOptions {
    fn default() -> Self {
        Self {
            url: s!(DEFAULT_WEBDRIVER_URL),
            browser: BrowserKind::Firefox,
            headless: true,
        }
    }
}
