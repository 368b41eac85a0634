//! Model types for profiles and probe outcomes.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

use crate::probe::resolve;

/// Polling interval applied when a profile carries none or a non-positive one.
pub const DEFAULT_INTERVAL_MINUTES: u64 = 5;

fn default_interval() -> u64 {
    DEFAULT_INTERVAL_MINUTES
}

/// A named monitoring target.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    pub base_url: String,
    #[serde(default)]
    pub route: String,
    #[serde(default)]
    pub params: HashMap<String, String>,
    #[serde(default)]
    pub headers: HashMap<String, String>,
    /// Minutes between probes.
    #[serde(default = "default_interval")]
    pub interval: u64,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: String::new(),
            base_url: String::new(),
            route: String::new(),
            params: HashMap::new(),
            headers: HashMap::new(),
            interval: DEFAULT_INTERVAL_MINUTES,
        }
    }
}

impl Profile {
    /// The fully resolved request URL for this profile.
    pub fn full_url(&self) -> String {
        resolve(&self.base_url, &self.route, &self.params)
    }

    /// Time between probes. Non-positive intervals fall back to the default.
    pub fn interval_duration(&self) -> Duration {
        let minutes = if self.interval == 0 {
            DEFAULT_INTERVAL_MINUTES
        } else {
            self.interval
        };
        Duration::from_secs(minutes * 60)
    }
}

/// The outcome of one probe. Kept in memory only, never persisted.
#[derive(Debug, Clone)]
pub struct PingResult {
    /// Instant the probe was issued.
    pub timestamp: DateTime<Local>,
    /// HTTP status, zero when the request never produced a response.
    pub status_code: u16,
    /// True iff no transport error occurred and the status is 2xx.
    pub success: bool,
    /// Transport-level failure description (DNS, connect, timeout).
    pub error: Option<String>,
    /// Wall time from request start to completion or failure.
    pub duration: Duration,
}
