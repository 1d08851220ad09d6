// tests/common/mod.rs
//
// A scripted in-memory results site implementing `Browser`.
//
// Element ids encode what they point at, so an id read from a stale table
// keeps resolving to that table's rows, like a real DOM node would.
#![allow(dead_code)]

use std::cell::Cell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Duration;

use xc_cup_ranker::browser::{Browser, BrowserError, ElementId, Scope, Session};
use xc_cup_ranker::scrape::WaitPolicy;

#[derive(Clone, Debug)]
pub struct FakeRow {
    pub time: String,
    pub pilot: String,
    pub site: String,
    pub route: Option<String>,
    pub distance: String,
    pub points: String,
    pub speed: String,
    pub glider: Option<String>,
    pub cells: usize,
}

pub fn row(pilot: &str, site: &str, points: &str) -> FakeRow {
    FakeRow {
        time: "10:05".into(),
        pilot: pilot.into(),
        site: site.into(),
        route: Some("FAI triangle".into()),
        distance: "87.21".into(),
        points: points.into(),
        speed: "31.2 km/h".into(),
        glider: Some("OZONE Enzo 3".into()),
        cells: 9,
    }
}

#[derive(Clone, Debug, Default)]
pub struct FakePage {
    pub rows: Vec<FakeRow>,
    /// Polls after navigation that still see the previous page's table.
    pub stale_polls: usize,
}

pub enum Pager {
    Missing,
    NoLinks,
    LastLinkWithoutHref,
    LastOffset(usize),
}

pub struct ScriptedBrowser {
    pub pages: BTreeMap<usize, FakePage>,
    pub pager: Pager,
    pub navigations: Vec<String>,
    pub table_polls: usize,
    /// Row ids whose cells were listed, in order.
    pub rows_read: Vec<String>,
    /// Tables render without a `tbody`.
    pub missing_body: bool,
    /// Times `quit` was called; shared so it outlives the session.
    pub closed: Rc<Cell<usize>>,
    current: Option<usize>,
    shown: Option<usize>,
    polls_on_page: usize,
}

impl ScriptedBrowser {
    pub fn new(pages: Vec<(usize, FakePage)>, pager: Pager) -> Self {
        Self {
            pages: pages.into_iter().collect(),
            pager,
            navigations: Vec::new(),
            table_polls: 0,
            rows_read: Vec::new(),
            missing_body: false,
            closed: Rc::new(Cell::new(0)),
            current: None,
            shown: None,
            polls_on_page: 0,
        }
    }

    /// One page of rows, no further pages.
    pub fn single_page(rows: Vec<FakeRow>) -> Self {
        Self::new(vec![(0, FakePage { rows, stale_polls: 0 })], Pager::NoLinks)
    }

    fn page(&self, offset: usize) -> Option<&FakePage> {
        self.pages.get(&offset)
    }

    fn fake_row(&self, offset: usize, index: usize) -> Option<&FakeRow> {
        self.page(offset).and_then(|p| p.rows.get(index))
    }
}

pub fn quick_wait() -> WaitPolicy {
    WaitPolicy::new(Duration::from_millis(200), Duration::from_millis(1))
}

fn id(s: String) -> ElementId {
    ElementId::new(s)
}

fn parts(el: &ElementId) -> (String, Vec<usize>) {
    let mut it = el.as_str().split('-');
    let kind = it.next().unwrap_or_default().to_string();
    let nums = it.filter_map(|n| n.parse().ok()).collect();
    (kind, nums)
}

fn offset_of(url: &str) -> usize {
    url.rsplit_once("@flights[start]=")
        .and_then(|(_, n)| n.parse().ok())
        .unwrap_or(0)
}

impl Browser for ScriptedBrowser {
    fn navigate(&mut self, url: &str) -> Result<(), BrowserError> {
        self.navigations.push(url.to_string());
        self.current = Some(offset_of(url));
        self.polls_on_page = 0;
        Ok(())
    }

    fn find(&mut self, scope: Scope<'_>, css: &str) -> Result<Option<ElementId>, BrowserError> {
        match (scope, css) {
            (Scope::Document, ".XCpager") => {
                Ok((!matches!(self.pager, Pager::Missing)).then(|| id("pager".into())))
            }
            (Scope::Document, ".XClist") => {
                let Some(current) = self.current else { return Ok(None) };
                let Some(page) = self.page(current) else { return Ok(None) };
                let stale = page.stale_polls;
                self.table_polls += 1;
                self.polls_on_page += 1;
                if let Some(shown) = self.shown {
                    if shown != current && self.polls_on_page <= stale {
                        return Ok(Some(id(format!("table-{shown}"))));
                    }
                }
                self.shown = Some(current);
                Ok(Some(id(format!("table-{current}"))))
            }
            (Scope::Within(el), "tbody") => {
                let (kind, nums) = parts(el);
                Ok((kind == "table" && !self.missing_body).then(|| id(format!("tbody-{}", nums[0]))))
            }
            (Scope::Within(el), "div:nth-child(1)") => {
                let (kind, nums) = parts(el);
                if kind != "cell" {
                    return Ok(None);
                }
                let (offset, index, cell) = (nums[0], nums[1], nums[2]);
                let row = self.fake_row(offset, index);
                let present = match cell {
                    4 => row.is_some_and(|r| r.route.is_some()),
                    8 => row.is_some_and(|r| r.glider.is_some()),
                    _ => false,
                };
                Ok(present.then(|| id(format!("icon-{offset}-{index}-{cell}"))))
            }
            _ => Ok(None),
        }
    }

    fn find_all(&mut self, scope: Scope<'_>, css: &str) -> Result<Vec<ElementId>, BrowserError> {
        let Scope::Within(el) = scope else { return Ok(Vec::new()) };
        let (kind, nums) = parts(el);
        match (kind.as_str(), css) {
            ("pager", "a") => Ok(match self.pager {
                Pager::Missing | Pager::NoLinks => Vec::new(),
                Pager::LastLinkWithoutHref => vec![id("link-0".into()), id("link-1".into())],
                Pager::LastOffset(_) => vec![id("link-0".into()), id("link-1".into()), id("link-2".into())],
            }),
            ("tbody", "tr") => {
                let offset = nums[0];
                let count = self.page(offset).map_or(0, |p| p.rows.len());
                Ok((0..count).map(|i| id(format!("row-{offset}-{i}"))).collect())
            }
            ("row", "td") => {
                self.rows_read.push(el.as_str().to_string());
                let (offset, index) = (nums[0], nums[1]);
                let cells = self.fake_row(offset, index).map_or(0, |r| r.cells);
                Ok((0..cells).map(|c| id(format!("cell-{offset}-{index}-{c}"))).collect())
            }
            _ => Ok(Vec::new()),
        }
    }

    fn text(&mut self, el: &ElementId) -> Result<String, BrowserError> {
        let (kind, nums) = parts(el);
        if kind != "cell" {
            return Ok(String::new());
        }
        let (offset, index, cell) = (nums[0], nums[1], nums[2]);
        let Some(r) = self.fake_row(offset, index) else { return Ok(String::new()) };
        Ok(match cell {
            0 => format!("{}.", offset + index + 1),
            1 => format!("{}\nUTC+02:00", r.time),
            2 => r.pilot.clone(),
            3 => format!("CH\n{}", r.site),
            5 => format!("{} km", r.distance),
            6 => format!("{} p.", r.points),
            7 => r.speed.clone(),
            _ => String::new(),
        })
    }

    fn attribute(&mut self, el: &ElementId, name: &str) -> Result<Option<String>, BrowserError> {
        let (kind, nums) = parts(el);
        match (kind.as_str(), name) {
            ("link", "href") => Ok(match self.pager {
                Pager::LastOffset(max) => {
                    let step = if nums[0] == 2 { max } else { (nums[0] + 1) * 100 };
                    Some(format!("https://www.xcontest.org/#filter[date]=x@flights[start]={step}"))
                }
                Pager::LastLinkWithoutHref if nums[0] == 0 => Some("https://x/@flights[start]=100".into()),
                _ => None,
            }),
            ("icon", "title") => {
                let r = self.fake_row(nums[0], nums[1]);
                Ok(match nums[2] {
                    4 => r.and_then(|r| r.route.clone()),
                    8 => r.and_then(|r| r.glider.clone()),
                    _ => None,
                })
            }
            _ => Ok(None),
        }
    }
}

impl Session for ScriptedBrowser {
    fn quit(self) -> Result<(), BrowserError> {
        self.closed.set(self.closed.get() + 1);
        Ok(())
    }
}
