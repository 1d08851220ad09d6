// src/browser/webdriver.rs
//! W3C WebDriver client (geckodriver / chromedriver) over blocking HTTP.

use std::time::Duration;

use reqwest::{blocking::Client, Method};
use serde_json::{json, Value};

use super::{Browser, BrowserError, BrowserKind, ElementId, Scope, Session};
use crate::config::consts::REQUEST_TIMEOUT_SECS;
use crate::config::options::DriverOptions;

/// Key under which the protocol wraps element references.
const ELEMENT_KEY: &str = "element-6066-11e4-a52a-4f735466cecf";

/// One browser session. Closed by [`Session::quit`], or on drop as a fallback,
/// so the browser never outlives the run.
pub struct WebDriverSession {
    http: Client,
    base: String,
    id: String,
    open: bool,
}

impl WebDriverSession {
    /// Start a fresh session on the driver at `opts.url`.
    pub fn start(opts: &DriverOptions) -> Result<Self, BrowserError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        let base = opts.url.trim_end_matches('/').to_string();

        let body = json!({
            "capabilities": { "alwaysMatch": capabilities(opts.browser, opts.headless) }
        });
        let value = send(&http, Method::POST, &format!("{base}/session"), Some(&body))?;
        let id = value
            .get("sessionId")
            .and_then(Value::as_str)
            .ok_or_else(|| BrowserError::InvalidResponse(s!("new session without sessionId")))?
            .to_string();

        logd!(session = %id, driver = %base, "WebDriver session started");
        Ok(Self { http, base, id, open: true })
    }

    fn close(&mut self) -> Result<(), BrowserError> {
        if !self.open {
            return Ok(());
        }
        self.open = false;
        self.command(Method::DELETE, "", None)?;
        logd!(session = %self.id, "WebDriver session closed");
        Ok(())
    }

    fn command(&self, method: Method, path: &str, body: Option<&Value>) -> Result<Value, BrowserError> {
        let url = format!("{}/session/{}{}", self.base, self.id, path);
        send(&self.http, method, &url, body)
    }
}

impl Session for WebDriverSession {
    /// End the session and close the browser.
    fn quit(mut self) -> Result<(), BrowserError> {
        self.close()
    }
}

impl Drop for WebDriverSession {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            logw!(session = %self.id, "Failed to close WebDriver session: {e}");
        }
    }
}

impl Browser for WebDriverSession {
    fn navigate(&mut self, url: &str) -> Result<(), BrowserError> {
        logd!(%url, "navigate");
        self.command(Method::POST, "/url", Some(&json!({ "url": url })))?;
        Ok(())
    }

    fn find(&mut self, scope: Scope<'_>, css: &str) -> Result<Option<ElementId>, BrowserError> {
        let path = format!("{}/element", scope_path(scope));
        match self.command(Method::POST, &path, Some(&locator(css))) {
            Ok(value) => element_id(&value).map(Some),
            Err(e) if e.is_no_such_element() => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn find_all(&mut self, scope: Scope<'_>, css: &str) -> Result<Vec<ElementId>, BrowserError> {
        let path = format!("{}/elements", scope_path(scope));
        let value = self.command(Method::POST, &path, Some(&locator(css)))?;
        value
            .as_array()
            .ok_or_else(|| BrowserError::InvalidResponse(format!("expected element list for `{css}`")))?
            .iter()
            .map(element_id)
            .collect()
    }

    fn text(&mut self, el: &ElementId) -> Result<String, BrowserError> {
        let value = self.command(Method::GET, &format!("/element/{el}/text"), None)?;
        value
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| BrowserError::InvalidResponse(format!("element {el} text is not a string")))
    }

    fn attribute(&mut self, el: &ElementId, name: &str) -> Result<Option<String>, BrowserError> {
        let value = self.command(Method::GET, &format!("/element/{el}/attribute/{name}"), None)?;
        match value {
            Value::Null => Ok(None),
            Value::String(s) => Ok(Some(s)),
            other => Ok(Some(other.to_string())),
        }
    }
}

fn send(http: &Client, method: Method, url: &str, body: Option<&Value>) -> Result<Value, BrowserError> {
    let mut request = http.request(method, url);
    if let Some(body) = body {
        request = request.json(body);
    }
    let response = request.send()?;
    let status = response.status();
    let mut payload: Value = response.json()?;
    let value = payload.get_mut("value").map(Value::take).unwrap_or(Value::Null);

    if status.is_success() {
        return Ok(value);
    }
    let error = value.get("error").and_then(Value::as_str).unwrap_or("unknown error");
    let message = value.get("message").and_then(Value::as_str).unwrap_or("");
    Err(BrowserError::command(status.as_u16(), error, message))
}

fn scope_path(scope: Scope<'_>) -> String {
    match scope {
        Scope::Document => s!(),
        Scope::Within(el) => format!("/element/{el}"),
    }
}

fn locator(css: &str) -> Value {
    json!({ "using": "css selector", "value": css })
}

fn element_id(value: &Value) -> Result<ElementId, BrowserError> {
    value
        .get(ELEMENT_KEY)
        .and_then(Value::as_str)
        .map(ElementId::new)
        .ok_or_else(|| BrowserError::InvalidResponse(format!("not an element reference: {value}")))
}

fn capabilities(kind: BrowserKind, headless: bool) -> Value {
    match kind {
        BrowserKind::Firefox => {
            let args: &[&str] = if headless { &["-headless"] } else { &[] };
            json!({ "browserName": "firefox", "moz:firefoxOptions": { "args": args } })
        }
        BrowserKind::Chrome => {
            let args: &[&str] = if headless { &["--headless=new"] } else { &[] };
            json!({ "browserName": "chrome", "goog:chromeOptions": { "args": args } })
        }
    }
}
