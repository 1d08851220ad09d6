// src/cli.rs
use std::{path::PathBuf, time::Duration};

use chrono::Datelike;
use clap::{ArgAction, Parser};

use crate::browser::BrowserKind;
use crate::config::consts::*;
use crate::config::options::{DataPaths, DriverOptions, QueryFilter, RunOptions};
use crate::progress::Progress;
use crate::runner::{self, RunSummary};
use crate::scrape::WaitPolicy;

/// Rank a cup event's flights from the XContest daily score and export them to CSV.
#[derive(Parser, Debug)]
#[command(name = "xc_cup_ranker", version, about)]
pub struct Cli {
    /// Event number: the 1-based row of the year's events.csv
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    pub event_id: u32,

    /// Competition year [default: current year]
    #[arg(long)]
    pub year: Option<i32>,

    /// Directory holding <year>/events.csv and <year>/participants/
    #[arg(long, default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// Directory the <year>/<date>_<site>.csv export goes to
    #[arg(long, default_value = DEFAULT_OUT_DIR)]
    pub output_dir: PathBuf,

    /// WebDriver server (geckodriver, chromedriver)
    #[arg(long, env = "XC_WEBDRIVER_URL", default_value = DEFAULT_WEBDRIVER_URL)]
    pub webdriver: String,

    #[arg(long, value_enum, default_value_t = BrowserKind::Firefox)]
    pub browser: BrowserKind,

    /// Show the browser window
    #[arg(long)]
    pub headed: bool,

    /// Seconds to wait for each page element
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    #[arg(long, default_value = DEFAULT_COUNTRY)]
    pub country: String,

    /// Glider category filter
    #[arg(long, default_value = DEFAULT_CATEGORY)]
    pub category: String,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Warnings and errors only
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    pub fn into_options(self) -> RunOptions {
        let year = self.year.unwrap_or_else(|| chrono::Local::now().year());
        RunOptions {
            event_id: self.event_id,
            year,
            paths: DataPaths::new(self.data_dir, self.output_dir),
            query: QueryFilter { country: self.country, category: self.category },
            wait: WaitPolicy::default().with_timeout(Duration::from_secs(self.timeout)),
            driver: DriverOptions { url: self.webdriver, browser: self.browser, headless: !self.headed },
        }
    }
}

/// Console progress: page counts go to the log.
pub struct ConsoleProgress {
    total: usize,
    done: usize,
}

impl ConsoleProgress {
    pub fn new() -> Self {
        Self { total: 0, done: 0 }
    }
}

impl Default for ConsoleProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl Progress for ConsoleProgress {
    fn begin(&mut self, pages: usize) {
        self.total = pages;
        logd!("{pages} result page(s) to read");
    }

    fn page_done(&mut self, offset: usize, rows: usize) {
        self.done += 1;
        logd!("page {}/{} (offset {offset}): {rows} rows", self.done, self.total);
    }
}

pub fn run() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    crate::log::init(cli.verbose, cli.quiet);

    let opts = cli.into_options();
    let mut progress = ConsoleProgress::new();
    let summary = runner::run(&opts, Some(&mut progress))?;
    report(&summary);
    Ok(())
}

fn report(summary: &RunSummary) {
    logf!(
        "{} flight(s) ranked from {} row(s) on {} page(s) -> {}",
        summary.accepted,
        summary.rows_seen,
        summary.pages,
        summary.output.display()
    );
    if summary.order_breaks > 0 {
        logw!(
            "{} row(s) were out of points order; check that first-seen flights are each pilot's best",
            summary.order_breaks
        );
    }
}
