//! Periodic delivery of counted activity to the ingestion service.
//!
//! Every interval the counters are drained into an [`ActivityRecord`]
//! stamped with the local wall-clock date, then POSTed to the service's
//! ingest endpoint with basic retry logic. A report that still fails after
//! all retries is dropped — the next interval starts from fresh counts.

use std::time::Duration;

use ostinato::ActivityRecord;

use crate::input::ActivityCounters;

/// Configuration for the reporting loop.
pub struct ReportConfig {
    /// Full ingest endpoint URL.
    pub endpoint: String,
    /// Time between reports.
    pub interval: Duration,
    /// HTTP request timeout.
    pub timeout: Duration,
    /// Maximum number of retry attempts on failure.
    pub max_retries: u32,
    /// Initial backoff duration between retries (doubles each attempt).
    pub retry_backoff: Duration,
}

impl ReportConfig {
    /// Creates a config for the given service base URL.
    ///
    /// Defaults: 30s timeout, 3 retries, 100ms initial backoff.
    pub fn new(base_url: &str, interval: Duration) -> Self {
        Self {
            endpoint: format!("{}/PostEvent", base_url.trim_end_matches('/')),
            interval,
            timeout: Duration::from_secs(30),
            max_retries: 3,
            retry_backoff: Duration::from_millis(100),
        }
    }
}

/// Runs the reporting loop (blocking — intended to own the main thread).
///
/// # Errors
///
/// Returns an error only if the HTTP client cannot be constructed;
/// delivery failures are logged and the loop continues.
pub fn run(
    config: &ReportConfig,
    counters: &ActivityCounters,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = reqwest::blocking::Client::builder()
        .timeout(config.timeout)
        .build()?;

    loop {
        std::thread::sleep(config.interval);

        let (keyboard_events, mouse_events) = counters.drain();
        let date = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let record = ActivityRecord::new(date, keyboard_events, mouse_events);

        match send_with_retry(&client, config, &record) {
            Ok(()) => {
                tracing::debug!(keyboard_events, mouse_events, "reported activity");
            }
            Err(e) => {
                tracing::warn!(
                    keyboard_events,
                    mouse_events,
                    "report not delivered, counts dropped: {e}"
                );
            }
        }
    }
}

/// POSTs the record to the endpoint with exponential backoff retry.
fn send_with_retry(
    client: &reqwest::blocking::Client,
    config: &ReportConfig,
    record: &ActivityRecord,
) -> Result<(), Box<dyn std::error::Error>> {
    let body = serde_json::to_vec(record)?;

    let mut last_error: Option<Box<dyn std::error::Error>> = None;
    let mut backoff = config.retry_backoff;

    for attempt in 0..=config.max_retries {
        let request = client
            .post(&config.endpoint)
            .header("Content-Type", "application/json")
            .body(body.clone());

        match request.send() {
            Ok(resp) if resp.status().is_success() => return Ok(()),
            Ok(resp) => {
                last_error = Some(format!("server returned status {}", resp.status()).into());
            }
            Err(e) => {
                last_error = Some(Box::new(e));
            }
        }

        if attempt < config.max_retries {
            std::thread::sleep(backoff);
            backoff *= 2;
        }
    }

    Err(last_error.expect("at least one attempt was made"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_construction() {
        let config = ReportConfig::new("http://localhost:5001", Duration::from_secs(30));
        assert_eq!(config.endpoint, "http://localhost:5001/PostEvent");

        let config = ReportConfig::new("http://localhost:5001/", Duration::from_secs(30));
        assert_eq!(config.endpoint, "http://localhost:5001/PostEvent");
    }
}
