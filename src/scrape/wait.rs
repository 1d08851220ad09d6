// src/scrape/wait.rs
use std::{thread, time::{Duration, Instant}};

use crate::config::consts::{DEFAULT_TIMEOUT_SECS, POLL_INTERVAL_MS};
use crate::error::Error;

/// Fixed-window polling: probe every `poll_interval` until `timeout` has elapsed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WaitPolicy {
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl Default for WaitPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            poll_interval: Duration::from_millis(POLL_INTERVAL_MS),
        }
    }
}

impl WaitPolicy {
    pub fn new(timeout: Duration, poll_interval: Duration) -> Self {
        Self { timeout, poll_interval }
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        Self { timeout, ..self }
    }
}

/// Run `probe` until it yields a value. The probe always runs at least once;
/// once the window is spent the wait fails with [`Error::Timeout`] naming `what`.
/// Errors from the probe end the wait immediately.
pub fn until<T, F>(policy: &WaitPolicy, what: &str, mut probe: F) -> Result<T, Error>
where
    F: FnMut() -> Result<Option<T>, Error>,
{
    let started = Instant::now();
    loop {
        if let Some(found) = probe()? {
            return Ok(found);
        }
        let waited = started.elapsed();
        if waited >= policy.timeout {
            loge!("{what} not found after {:?}", policy.timeout);
            return Err(Error::Timeout { what: what.to_string(), after: policy.timeout });
        }
        thread::sleep(policy.poll_interval.min(policy.timeout - waited));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quick() -> WaitPolicy {
        WaitPolicy::new(Duration::from_millis(50), Duration::from_millis(1))
    }

    #[test]
    fn returns_as_soon_as_probe_succeeds() {
        let mut calls = 0;
        let got = until(&quick(), "thing", || {
            calls += 1;
            Ok((calls == 3).then_some(calls))
        })
        .unwrap();
        assert_eq!(got, 3);
    }

    #[test]
    fn times_out_naming_the_element() {
        let err = until::<(), _>(&quick(), "results table", || Ok(None)).unwrap_err();
        match err {
            Error::Timeout { what, .. } => assert_eq!(what, "results table"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn zero_timeout_still_probes_once() {
        let policy = WaitPolicy::new(Duration::ZERO, Duration::from_millis(1));
        assert_eq!(until(&policy, "x", || Ok(Some(7))).unwrap(), 7);
    }

    #[test]
    fn probe_errors_are_not_retried() {
        let mut calls = 0;
        let err = until::<(), _>(&quick(), "pager", || {
            calls += 1;
            Err(Error::MalformedPager(s!("?")))
        })
        .unwrap_err();
        assert!(matches!(err, Error::MalformedPager(_)));
        assert_eq!(calls, 1);
    }
}
