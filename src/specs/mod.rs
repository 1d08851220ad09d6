// src/specs/mod.rs
//! # Scraping "specs" module
//!
//! Page-specific knowledge of the results site: *where the ground truth lives
//! in the rendered document* and *how to read it*.
//!
//! ## What lives here
//! - **Selectors** for the results table, its pager, body, rows and cells.
//! - **The query URL** for one day's results and its pagination parameter.
//! - **A declarative row schema**: an ordered list of `{cell index, field, rule}`.
//!   A layout change on the site is a change to one table in `flights.rs`.
//!
//! ## What does **not** live here
//! - **Waiting and pagination** (`scrape::walker`), which decide *when* a table
//!   may be read.
//! - **Ranking and roster checks** (`ranking`), which decide *whether* a row counts.
//! - **Export formatting** (`file`).
//!
//! ## Conventions & invariants
//! - Extraction is positional and all-or-nothing: a missing cell, line, child
//!   element or attribute is an [`ExtractError`], never a silently empty field.
//! - Text shaping ([`Rule::shape`]) is pure, so schemas are testable offline.

pub mod flights;

use crate::browser::{Browser, ElementId, Scope};
use crate::core::sanitize::{first_token, nth_line};
use crate::data::{Field, Flight};
use crate::error::ExtractError;

/// How one field is read from its cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rule {
    /// The cell's rendered text, as is.
    Text,
    /// One line (0-based) of a multi-line cell.
    Line(usize),
    /// First whitespace-delimited token, e.g. the number in `"87.21 km"`.
    FirstToken,
    /// An attribute of a child element rather than any text.
    ChildAttr { css: &'static str, attr: &'static str },
}

impl Rule {
    /// Shape a cell's text. `None` means the text does not have the expected form.
    /// `ChildAttr` values are taken verbatim.
    pub fn shape(&self, text: &str) -> Option<String> {
        match self {
            Rule::Text | Rule::ChildAttr { .. } => Some(text.to_string()),
            Rule::Line(n) => nth_line(text, *n).map(str::to_owned),
            Rule::FirstToken => first_token(text).map(str::to_owned),
        }
    }

    fn read(&self, browser: &mut dyn Browser, cell: &ElementId, index: usize) -> Result<String, ExtractError> {
        match *self {
            Rule::ChildAttr { css, attr } => {
                let child = browser
                    .find(Scope::Within(cell), css)?
                    .ok_or(ExtractError::MissingChild { cell: index, css })?;
                browser
                    .attribute(&child, attr)?
                    .ok_or(ExtractError::MissingAttribute { cell: index, attr })
            }
            rule => {
                let text = browser.text(cell)?;
                rule.shape(&text).ok_or(match rule {
                    Rule::Line(line) => ExtractError::MissingLine { cell: index, line },
                    _ => ExtractError::EmptyToken { cell: index },
                })
            }
        }
    }
}

/// One schema entry: `field` comes from cell `cell` via `rule`.
#[derive(Clone, Copy, Debug)]
pub struct Column {
    pub cell: usize,
    pub field: Field,
    pub rule: Rule,
}

#[derive(Clone, Copy, Debug)]
pub struct RowSchema {
    pub columns: &'static [Column],
}

impl RowSchema {
    /// Smallest cell count a row must have.
    pub fn min_cells(&self) -> usize {
        self.columns.iter().map(|c| c.cell + 1).max().unwrap_or(0)
    }

    /// Read one row's cells into a [`Flight`].
    pub fn extract(&self, browser: &mut dyn Browser, cells: &[ElementId]) -> Result<Flight, ExtractError> {
        let needed = self.min_cells();
        if cells.len() < needed {
            return Err(ExtractError::MissingCell { cell: needed - 1, found: cells.len() });
        }

        let mut flight = Flight::default();
        for col in self.columns {
            *flight.field_mut(col.field) = col.rule.read(browser, &cells[col.cell], col.cell)?;
        }
        Ok(flight)
    }
}
