// src/browser/mod.rs
//! The rendered-document capability the page walker drives.
//!
//! The results table is filled in by script after navigation, so a plain HTTP
//! fetch never sees it. Anything that can load a URL, look elements up by CSS
//! selector, and read their text and attributes can stand behind [`Browser`];
//! the shipped implementation is [`WebDriverSession`].
//!
//! Element handles are opaque [`ElementId`]s. Two lookups of the same DOM node
//! return equal ids; a node that was replaced gets a new id. The walker relies
//! on that to tell a freshly loaded table from the previous page's.

pub mod webdriver;

use std::fmt;

use thiserror::Error;

pub use webdriver::WebDriverSession;

/// Opaque per-load handle of a DOM element.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ElementId(String);

impl ElementId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where a selector lookup starts.
#[derive(Clone, Copy, Debug)]
pub enum Scope<'a> {
    Document,
    Within(&'a ElementId),
}

pub trait Browser {
    /// Load `url` in the session's single window.
    fn navigate(&mut self, url: &str) -> Result<(), BrowserError>;

    /// First match of `css` in `scope`, or `None` if nothing matches right now.
    fn find(&mut self, scope: Scope<'_>, css: &str) -> Result<Option<ElementId>, BrowserError>;

    /// All matches of `css` in `scope`, in document order.
    fn find_all(&mut self, scope: Scope<'_>, css: &str) -> Result<Vec<ElementId>, BrowserError>;

    /// Rendered text, lines separated by `\n`.
    fn text(&mut self, el: &ElementId) -> Result<String, BrowserError>;

    fn attribute(&mut self, el: &ElementId, name: &str) -> Result<Option<String>, BrowserError>;
}

/// A browser the run owns and must release when it is done.
pub trait Session: Browser {
    /// End the session. Called once per run, whatever the outcome.
    fn quit(self) -> Result<(), BrowserError>
    where
        Self: Sized;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum BrowserKind {
    #[default]
    Firefox,
    Chrome,
}

/// Maximum length for error messages relayed from the driver (they can carry stack traces)
const MAX_MESSAGE_LENGTH: usize = 500;

#[derive(Error, Debug)]
pub enum BrowserError {
    #[error("WebDriver unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("WebDriver command failed ({status} {error}): {message}")]
    Command { status: u16, error: String, message: String },

    #[error("Invalid WebDriver response: {0}")]
    InvalidResponse(String),
}

impl BrowserError {
    pub fn command(status: u16, error: &str, message: &str) -> Self {
        let message = if message.len() <= MAX_MESSAGE_LENGTH {
            message.to_string()
        } else {
            let cut = (0..=MAX_MESSAGE_LENGTH)
                .rev()
                .find(|i| message.is_char_boundary(*i))
                .unwrap_or(0);
            format!("{}... (truncated, {} total bytes)", &message[..cut], message.len())
        };
        BrowserError::Command { status, error: error.to_string(), message }
    }

    pub fn is_no_such_element(&self) -> bool {
        matches!(self, BrowserError::Command { error, .. } if error == "no such element")
    }
}
