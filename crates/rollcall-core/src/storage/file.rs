use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use crate::models::Athlete;

/// Roster file name inside the data directory.
const ROSTER_FILE: &str = "athletes.json";

/// Saved data with the time it was written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot<T> {
    pub data: T,
    #[serde(rename = "savedAt")]
    pub saved_at: DateTime<Utc>,
}

impl<T> Snapshot<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            saved_at: Utc::now(),
        }
    }

    pub fn age_minutes(&self) -> i64 {
        let now = Utc::now();
        (now - self.saved_at).num_minutes()
    }

    pub fn age_display(&self) -> String {
        match self.age_minutes() {
            // Negative ages come from clock skew
            m if m < 1 => "just now".to_string(),
            m if m < 60 => format!("{}m ago", m),
            m if m < 24 * 60 => format!("{}h ago", m / 60),
            m => format!("{}d ago", m / (24 * 60)),
        }
    }
}

/// On-disk layouts we accept. Older files hold a bare array.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredFile<T> {
    Snapshot(Snapshot<T>),
    Bare(T),
}

/// The roster kept as a JSON file in a local data directory.
pub struct RosterFile {
    path: PathBuf,
}

impl RosterFile {
    pub fn new(data_dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
        Ok(Self {
            path: data_dir.join(ROSTER_FILE),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read<T: DeserializeOwned>(&self) -> Result<Option<Snapshot<T>>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read roster file: {}", self.path.display()))?;

        let stored: StoredFile<T> = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse roster file: {}", self.path.display()))?;

        Ok(Some(match stored {
            StoredFile::Snapshot(snapshot) => snapshot,
            StoredFile::Bare(data) => {
                // No timestamp in the old layout; fall back to the file's mtime
                let saved_at = std::fs::metadata(&self.path)
                    .and_then(|m| m.modified())
                    .map(DateTime::<Utc>::from)
                    .unwrap_or_else(|_| Utc::now());
                Snapshot { data, saved_at }
            }
        }))
    }

    pub fn load(&self) -> Result<Option<Snapshot<Vec<Athlete>>>> {
        let snapshot = self.read::<Vec<Athlete>>()?;
        if let Some(ref s) = snapshot {
            debug!(path = %self.path.display(), athletes = s.data.len(), "Loaded roster file");
        }
        Ok(snapshot)
    }

    pub fn save(&self, athletes: &[Athlete]) -> Result<()> {
        let snapshot = Snapshot::new(athletes);
        let contents = serde_json::to_string_pretty(&snapshot)?;
        std::fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write roster file: {}", self.path.display()))?;
        debug!(path = %self.path.display(), athletes = athletes.len(), "Saved roster file");
        Ok(())
    }

    /// How long ago the roster was saved, or "never".
    pub fn age_display(&self) -> String {
        match self.read::<serde_json::Value>() {
            Ok(Some(snapshot)) => snapshot.age_display(),
            Ok(None) => "never".to_string(),
            Err(e) => {
                debug!(error = %e, "Failed to read roster file for age display");
                "unknown".to_string()
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
