//! Probe module for endpoint monitoring.
//!
//! One probe is one HTTP GET. Probes never fail as calls; every outcome,
//! including transport errors, comes back inside a [`PingResult`].

mod resolver;

pub use resolver::*;

use chrono::{DateTime, Local};
use std::time::{Duration, Instant};

use crate::store::{PingResult, Profile};

/// Upper bound on one probe attempt, connection setup included.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(30);

/// Issue one GET request to the profile's resolved URL with the profile's
/// headers attached.
///
/// Transport, DNS, and timeout failures set `error` and leave the status
/// code at zero. A received response is a success iff its status is 2xx.
pub async fn run_probe(profile: &Profile) -> PingResult {
    let timestamp = Local::now();
    let start = Instant::now();

    let client = match reqwest::Client::builder().timeout(PROBE_TIMEOUT).build() {
        Ok(client) => client,
        Err(e) => return failure(timestamp, start, e.to_string()),
    };

    let mut request = client.get(profile.full_url());
    for (key, value) in &profile.headers {
        request = request.header(key.as_str(), value.as_str());
    }

    match request.send().await {
        Ok(response) => {
            let status = response.status().as_u16();
            PingResult {
                timestamp,
                status_code: status,
                success: (200..300).contains(&status),
                error: None,
                duration: start.elapsed(),
            }
        }
        Err(e) => failure(timestamp, start, e.to_string()),
    }
}

fn failure(timestamp: DateTime<Local>, start: Instant, error: String) -> PingResult {
    PingResult {
        timestamp,
        status_code: 0,
        success: false,
        error: Some(error),
        duration: start.elapsed(),
    }
}
