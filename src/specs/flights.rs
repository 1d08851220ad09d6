// src/specs/flights.rs
//! Daily-score flight list.
//!
//! Row layout (cells, 0-based):
//! `0` position, `1` take-off time over timezone, `2` pilot, `3` country over
//! launch site, `4` route type icon, `5` distance, `6` points, `7` average
//! speed, `8` glider icon. Icons carry their meaning in a `title` attribute.

use super::{Column, Rule, RowSchema};
use crate::config::consts::RESULTS_URL;
use crate::config::options::QueryFilter;
use crate::data::Field;
use crate::error::Error;

pub const RESULTS_TABLE: &str = ".XClist";
pub const PAGER: &str = ".XCpager";
pub const PAGER_LINK: &str = "a";
pub const TABLE_BODY: &str = "tbody";
pub const ROW: &str = "tr";
pub const CELL: &str = "td";

const ICON: &str = "div:nth-child(1)";

pub const FLIGHT_ROW: RowSchema = RowSchema {
    columns: &[
        Column { cell: 1, field: Field::TakeOffTime, rule: Rule::Line(0) },
        Column { cell: 2, field: Field::PilotName, rule: Rule::Text },
        Column { cell: 3, field: Field::LaunchSite, rule: Rule::Line(1) },
        Column { cell: 4, field: Field::RouteType, rule: Rule::ChildAttr { css: ICON, attr: "title" } },
        Column { cell: 5, field: Field::Distance, rule: Rule::FirstToken },
        Column { cell: 6, field: Field::Points, rule: Rule::FirstToken },
        Column { cell: 7, field: Field::AvgSpeed, rule: Rule::Text },
        Column { cell: 8, field: Field::Glider, rule: Rule::ChildAttr { css: ICON, attr: "title" } },
    ],
};

/// The results query for one day.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultsQuery {
    base: String,
}

impl ResultsQuery {
    pub fn new(date: &str, filter: &QueryFilter) -> Self {
        let base = format!(
            "{RESULTS_URL}#filter[date]={date}@filter[country]={}@filter[detail_glider_catg]={}",
            filter.country, filter.category
        );
        Self { base }
    }

    /// URL of the page starting at row `offset`. Offset 0 is the base query.
    pub fn page_url(&self, offset: usize) -> String {
        if offset == 0 {
            self.base.clone()
        } else {
            format!("{}@flights[start]={offset}", self.base)
        }
    }
}

/// Target offset of a pager link: the value after its last `=`.
pub fn parse_pager_offset(href: &str) -> Result<usize, Error> {
    href.rsplit('=')
        .next()
        .and_then(|v| v.trim().parse().ok())
        .ok_or_else(|| Error::MalformedPager(href.to_string()))
}
