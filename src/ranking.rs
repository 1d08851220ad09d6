// src/ranking.rs
//! Decides which rows count and gives them their contest rank.
//!
//! A row is kept when its launch site equals the event's take-off site exactly,
//! its pilot has no record yet, and the pilot is on the roster. Kept rows are
//! ranked 1, 2, 3… in the order they are offered; nothing is re-sorted
//! afterwards. The results table lists flights best-first, so the first kept
//! row of a pilot is that pilot's best flight. [`OrderWatch`] reports when the
//! table breaks that ordering.

use std::collections::HashMap;
use std::slice;

use crate::data::{Flight, FlightRecord};
use crate::error::Error;
use crate::roster::Roster;

/// Accepted flights keyed by pilot, in rank order.
#[derive(Clone, Debug, Default)]
pub struct RankedResultSet {
    records: Vec<FlightRecord>,
    by_pilot: HashMap<String, usize>,
}

impl RankedResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, pilot_name: &str) -> bool {
        self.by_pilot.contains_key(pilot_name)
    }

    pub fn get(&self, pilot_name: &str) -> Option<&FlightRecord> {
        self.by_pilot.get(pilot_name).map(|&i| &self.records[i])
    }

    /// Records in rank order.
    pub fn iter(&self) -> slice::Iter<'_, FlightRecord> {
        self.records.iter()
    }

    fn push(&mut self, record: FlightRecord) {
        self.by_pilot.insert(record.flight.pilot_name.clone(), self.records.len());
        self.records.push(record);
    }
}

impl<'a> IntoIterator for &'a RankedResultSet {
    type Item = &'a FlightRecord;
    type IntoIter = slice::Iter<'a, FlightRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// What happened to an offered flight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    Accepted(u32),
    WrongSite,
    Duplicate,
    NotRegistered,
}

pub struct RankingFilter<'a> {
    take_off_site: &'a str,
    roster: &'a Roster,
    results: RankedResultSet,
    next_rank: u32,
    order: OrderWatch,
}

impl<'a> RankingFilter<'a> {
    pub fn new(take_off_site: &'a str, roster: &'a Roster) -> Self {
        Self {
            take_off_site,
            roster,
            results: RankedResultSet::new(),
            next_rank: 1,
            order: OrderWatch::default(),
        }
    }

    /// Offer the next row in table order.
    /// The roster is only consulted for rows that pass the site and duplicate checks.
    pub fn offer(&mut self, flight: Flight) -> Result<Decision, Error> {
        self.order.observe(&flight);

        if flight.launch_site != self.take_off_site {
            return Ok(Decision::WrongSite);
        }
        if self.results.contains(&flight.pilot_name) {
            return Ok(Decision::Duplicate);
        }
        if !self.roster.is_registered(&flight.pilot_name)? {
            return Ok(Decision::NotRegistered);
        }

        let rank = self.next_rank;
        self.results.push(FlightRecord { rank, flight });
        self.next_rank += 1;
        Ok(Decision::Accepted(rank))
    }

    pub fn results(&self) -> &RankedResultSet {
        &self.results
    }

    /// Rows whose points exceeded the row before them.
    pub fn order_breaks(&self) -> usize {
        self.order.breaks()
    }

    pub fn finish(self) -> RankedResultSet {
        self.results
    }
}

/// Checks that points never increase from one row to the next.
#[derive(Clone, Debug, Default)]
pub struct OrderWatch {
    last: Option<f64>,
    breaks: usize,
}

impl OrderWatch {
    pub fn observe(&mut self, flight: &Flight) {
        let Ok(points) = flight.points.parse::<f64>() else {
            logd!(pilot = %flight.pilot_name, points = %flight.points, "points not numeric; order not checked");
            return;
        };
        if let Some(prev) = self.last {
            if points > prev {
                self.breaks += 1;
                if self.breaks == 1 {
                    logw!(
                        "Results are not sorted by points ({} has {points} after {prev}); \
                         first-seen flights may not be each pilot's best",
                        flight.pilot_name
                    );
                } else {
                    logd!(pilot = %flight.pilot_name, points, prev, "results order broken again");
                }
            }
        }
        self.last = Some(points);
    }

    pub fn breaks(&self) -> usize {
        self.breaks
    }
}
