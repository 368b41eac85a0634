//! Configuration module for watchpost.
//!
//! Loads configuration from environment variables with sensible defaults.

use std::env;
use std::path::PathBuf;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the profiles JSON file (default: `~/.watchpost/profiles.json`)
    pub profiles_path: PathBuf,
    /// Path to the log file (default: `~/.watchpost/watchpost.log`)
    pub log_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        let base = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".watchpost");
        Self {
            profiles_path: base.join("profiles.json"),
            log_path: base.join("watchpost.log"),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `WATCHPOST_PROFILES_PATH`: profiles file path
    /// - `WATCHPOST_LOG_PATH`: log file path
    pub fn load() -> Self {
        let mut cfg = Self::default();

        if let Ok(path) = env::var("WATCHPOST_PROFILES_PATH") {
            cfg.profiles_path = PathBuf::from(path);
        }

        if let Ok(path) = env::var("WATCHPOST_LOG_PATH") {
            cfg.log_path = PathBuf::from(path);
        }

        cfg
    }
}
