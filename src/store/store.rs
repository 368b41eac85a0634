//! JSON-file profile store implementation.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::models::{Profile, DEFAULT_INTERVAL_MINUTES};

/// Store error types.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("profile not found")]
    NotFound,
}

/// Profile collection persisted as a single JSON file.
///
/// Every mutating call rewrites the whole file before returning.
#[derive(Debug)]
pub struct ProfileStore {
    profiles: Vec<Profile>,
    path: PathBuf,
}

impl ProfileStore {
    /// Open the store at the given path.
    ///
    /// A missing file yields an empty store. An unreadable or unparsable
    /// file is an error; the caller decides whether that is fatal.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let profiles = if path.exists() {
            let data = fs::read_to_string(&path)?;
            serde_json::from_str(&data)?
        } else {
            Vec::new()
        };
        Ok(Self { profiles, path })
    }

    /// An empty store backed by the given path, for when an existing file
    /// could not be read.
    pub fn empty<P: AsRef<Path>>(path: P) -> Self {
        Self {
            profiles: Vec::new(),
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Write the full collection to disk.
    ///
    /// Serializes to a sibling temp file and renames it over the target so
    /// a concurrent load never observes a partial write.
    pub fn save(&self) -> Result<(), StoreError> {
        let data = serde_json::to_string_pretty(&self.profiles)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, data)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    // --- Profile CRUD ---

    /// Insert a profile, replacing any existing one with the same name in
    /// place. Persists before returning.
    pub fn add_or_replace(&mut self, mut profile: Profile) -> Result<(), StoreError> {
        if profile.interval == 0 {
            profile.interval = DEFAULT_INTERVAL_MINUTES;
        }

        if let Some(existing) = self.profiles.iter_mut().find(|p| p.name == profile.name) {
            *existing = profile;
        } else {
            self.profiles.push(profile);
        }
        self.save()
    }

    /// Remove the profile with the given name. Persists before returning.
    pub fn delete(&mut self, name: &str) -> Result<(), StoreError> {
        let idx = self
            .profiles
            .iter()
            .position(|p| p.name == name)
            .ok_or(StoreError::NotFound)?;
        self.profiles.remove(idx);
        self.save()
    }

    /// All profiles, in stored order.
    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }
}
