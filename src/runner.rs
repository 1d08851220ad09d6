// src/runner.rs
use std::path::PathBuf;

use crate::{
    browser::{Browser, Session, WebDriverSession},
    config::options::{DriverOptions, RunOptions},
    data::EventDescriptor,
    error::Error,
    events,
    file::export_flights,
    progress::Progress,
    ranking::{Decision, RankedResultSet, RankingFilter},
    roster::Roster,
    scrape::{PageWalker, WaitPolicy, WalkStats},
    specs::flights::{ResultsQuery, FLIGHT_ROW},
};

/// Summary of what was produced.
#[derive(Clone, Debug)]
pub struct RunSummary {
    pub event: EventDescriptor,
    pub pages: usize,
    pub rows_seen: usize,
    pub accepted: usize,
    pub order_breaks: usize,
    pub output: PathBuf,
}

/// Result of walking the table, before export.
#[derive(Debug)]
pub struct Collected {
    pub results: RankedResultSet,
    pub stats: WalkStats,
    pub order_breaks: usize,
}

/// Top-level runner: resolve the event, open a browser session, rank, export.
///
/// Registry lookups happen first so a bad event id never starts a browser.
/// The session is closed before returning, whatever the outcome.
pub fn run(
    opts: &RunOptions,
    progress: Option<&mut dyn Progress>,
) -> Result<RunSummary, Error> {
    run_in_session(opts, progress, |driver| Ok(WebDriverSession::start(driver)?))
}

/// [`run`] with the session opened by `open`. `open` is only called once the
/// event and roster are resolved, and the session it returns is always quit.
pub fn run_in_session<S, F>(
    opts: &RunOptions,
    progress: Option<&mut dyn Progress>,
    open: F,
) -> Result<RunSummary, Error>
where
    S: Session,
    F: FnOnce(&DriverOptions) -> Result<S, Error>,
{
    let event = events::lookup(&opts.paths, opts.year, opts.event_id)?;
    let roster = Roster::load(&opts.paths, opts.year, opts.event_id)?;

    let mut session = open(&opts.driver)?;
    let outcome = run_with(&mut session, opts, &event, &roster, progress);
    if let Err(e) = session.quit() {
        logw!("Failed to close browser session: {e}");
    }
    outcome
}

/// Walk, rank and export with an already open browser.
pub fn run_with(
    browser: &mut dyn Browser,
    opts: &RunOptions,
    event: &EventDescriptor,
    roster: &Roster,
    progress: Option<&mut dyn Progress>,
) -> Result<RunSummary, Error> {
    let query = ResultsQuery::new(&event.date, &opts.query);
    let collected = collect(browser, &query, opts.wait, &event.launch_site, roster, progress)?;

    let output = export_flights(&opts.paths, opts.year, &event.date, &event.launch_site, &collected.results)?;

    Ok(RunSummary {
        event: event.clone(),
        pages: collected.stats.pages,
        rows_seen: collected.stats.rows,
        accepted: collected.results.len(),
        order_breaks: collected.order_breaks,
        output,
    })
}

/// Walk every page of `query` and rank the rows launched from `take_off_site`.
pub fn collect(
    browser: &mut dyn Browser,
    query: &ResultsQuery,
    wait: WaitPolicy,
    take_off_site: &str,
    roster: &Roster,
    progress: Option<&mut dyn Progress>,
) -> Result<Collected, Error> {
    let mut filter = RankingFilter::new(take_off_site, roster);

    let stats = PageWalker::new(browser, query, wait).walk(progress, |browser, row| {
        let flight = FLIGHT_ROW
            .extract(browser, row.cells)
            .map_err(|e| e.at(row.offset, row.index))?;
        let pilot = flight.pilot_name.clone();

        match filter.offer(flight)? {
            Decision::Accepted(rank) => logd!(rank, %pilot, "flight accepted"),
            skipped => logd!(?skipped, %pilot, offset = row.offset, row = row.index, "flight skipped"),
        }
        Ok(())
    })?;

    let order_breaks = filter.order_breaks();
    Ok(Collected { results: filter.finish(), stats, order_breaks })
}
