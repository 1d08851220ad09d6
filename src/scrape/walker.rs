// src/scrape/walker.rs
//! Walks every row of the paginated results table exactly once, in display order.
//!
//! The site swaps the table in by script after each navigation. Reading right
//! after `navigate` can return the previous page's table, so every page waits
//! until the table element's *identity* differs from the one read last. Content
//! is never compared: two pages may render alike, a replaced element never
//! keeps its id.

use super::wait::{self, WaitPolicy};
use crate::browser::{Browser, ElementId, Scope};
use crate::config::consts::PAGE_SIZE;
use crate::error::Error;
use crate::progress::Progress;
use crate::specs::flights::{
    parse_pager_offset, ResultsQuery, CELL, PAGER, PAGER_LINK, RESULTS_TABLE, ROW, TABLE_BODY,
};

/// Pagination progress. Only the walker moves it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageCursor {
    pub offset: usize,
    pub last_table: Option<ElementId>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WalkStats {
    pub max_offset: usize,
    pub pages: usize,
    pub rows: usize,
}

/// One table row, with its cells already located.
pub struct RowRef<'a> {
    pub offset: usize,
    pub index: usize,
    pub cells: &'a [ElementId],
}

/// Offsets of every page up to and including the last pager target.
pub fn page_offsets(max_offset: usize) -> impl Iterator<Item = usize> {
    (0..=max_offset).step_by(PAGE_SIZE)
}

/// 1-based row numbers shown on the page at `offset`.
pub fn page_span(offset: usize) -> (usize, usize) {
    (offset.saturating_add(1), offset.saturating_add(PAGE_SIZE))
}

pub struct PageWalker<'b> {
    browser: &'b mut dyn Browser,
    query: &'b ResultsQuery,
    wait: WaitPolicy,
    cursor: PageCursor,
}

impl<'b> PageWalker<'b> {
    pub fn new(browser: &'b mut dyn Browser, query: &'b ResultsQuery, wait: WaitPolicy) -> Self {
        Self { browser, query, wait, cursor: PageCursor::default() }
    }

    pub fn cursor(&self) -> &PageCursor {
        &self.cursor
    }

    /// Highest page offset offered by the pager of the loaded page.
    /// No links, or a last link without a target, means a single page.
    pub fn max_offset(&mut self) -> Result<usize, Error> {
        let browser = &mut *self.browser;
        let pager = wait::until(&self.wait, "XCpager", || Ok(browser.find(Scope::Document, PAGER)?))?;

        let links = browser.find_all(Scope::Within(&pager), PAGER_LINK)?;
        let Some(last) = links.last() else {
            return Ok(0);
        };
        match browser.attribute(last, "href")? {
            Some(href) => parse_pager_offset(&href),
            None => Ok(0),
        }
    }

    /// Load the query, then hand every row of every page to `visit`.
    /// Any failure ends the walk; rows already visited are not rolled back.
    pub fn walk<F>(&mut self, mut progress: Option<&mut dyn Progress>, mut visit: F) -> Result<WalkStats, Error>
    where
        F: FnMut(&mut dyn Browser, RowRef<'_>) -> Result<(), Error>,
    {
        self.browser.navigate(&self.query.page_url(0))?;
        let max_offset = self.max_offset()?;
        let mut stats = WalkStats { max_offset, ..WalkStats::default() };

        if let Some(p) = progress.as_deref_mut() {
            p.begin(page_offsets(max_offset).count());
        }

        for offset in page_offsets(max_offset) {
            let (first, last) = page_span(offset);
            logf!("Processing first flights {first}-{last}...");
            if offset != 0 {
                self.browser.navigate(&self.query.page_url(offset))?;
            }
            self.cursor.offset = offset;

            let table = self.fresh_table()?;
            let rows = self.rows_of(&table)?;

            for (index, row) in rows.iter().enumerate() {
                let browser = &mut *self.browser;
                let cells = wait::until(&self.wait, "row cells", || {
                    let cells = browser.find_all(Scope::Within(row), CELL)?;
                    Ok((!cells.is_empty()).then_some(cells))
                })?;
                visit(browser, RowRef { offset, index, cells: &cells })?;
            }

            stats.pages += 1;
            stats.rows += rows.len();
            logd!(offset, rows = rows.len(), table = %table, "page done");
            if let Some(p) = progress.as_deref_mut() {
                p.page_done(offset, rows.len());
            }
            self.cursor.last_table = Some(table);
        }

        if let Some(p) = progress.as_deref_mut() {
            p.finish();
        }
        Ok(stats)
    }

    /// Poll for the results table until its identity differs from the last page's.
    fn fresh_table(&mut self) -> Result<ElementId, Error> {
        let browser = &mut *self.browser;
        let previous = self.cursor.last_table.as_ref();
        let mut stale_polls = 0usize;

        let table = wait::until(&self.wait, "flights table", || {
            match browser.find(Scope::Document, RESULTS_TABLE)? {
                Some(table) if Some(&table) != previous => Ok(Some(table)),
                Some(_) => {
                    stale_polls += 1;
                    Ok(None)
                }
                None => Ok(None),
            }
        })?;
        if stale_polls > 0 {
            logd!(stale_polls, "waited for the previous table to be replaced");
        }
        Ok(table)
    }

    fn rows_of(&mut self, table: &ElementId) -> Result<Vec<ElementId>, Error> {
        let browser = &mut *self.browser;
        let body = wait::until(&self.wait, "flights table body", || {
            Ok(browser.find(Scope::Within(table), TABLE_BODY)?)
        })?;
        wait::until(&self.wait, "flights", || {
            let rows = browser.find_all(Scope::Within(&body), ROW)?;
            Ok((!rows.is_empty()).then_some(rows))
        })
    }
}
