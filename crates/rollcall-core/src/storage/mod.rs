//! Where the roster lives between runs.
//!
//! `RosterSource` picks between a local JSON file and a remote roster server
//! and exposes the same load/persist pair for both.

pub mod file;

use anyhow::{Context, Result};
use tracing::info;

use crate::api::ApiClient;
use crate::models::{assign_missing_ids, Athlete};

pub use file::{RosterFile, Snapshot};

pub enum RosterSource {
    File(RosterFile),
    Remote(ApiClient),
}

impl RosterSource {
    /// Load the stored roster. A missing local file is an empty roster.
    ///
    /// Records stored without an id get one here and the roster is written
    /// back at once, so ids shown by a read-only command still resolve on
    /// the next run.
    pub async fn load_roster(&self) -> Result<Vec<Athlete>> {
        let mut athletes = match self {
            RosterSource::File(file) => file.load()?.map(|s| s.data).unwrap_or_default(),
            RosterSource::Remote(client) => client.fetch_roster().await?,
        };

        let assigned = assign_missing_ids(&mut athletes);
        if assigned > 0 {
            info!(assigned, source = %self.describe(), "Assigned ids to stored athletes");
            self.persist_roster(&athletes)
                .await
                .context("Failed to store newly assigned athlete ids")?;
        }
        Ok(athletes)
    }

    /// Store the full roster, replacing what was there.
    pub async fn persist_roster(&self, athletes: &[Athlete]) -> Result<()> {
        match self {
            RosterSource::File(file) => file.save(athletes)?,
            RosterSource::Remote(client) => client.push_roster(athletes).await?,
        }
        info!(athletes = athletes.len(), source = %self.describe(), "Persisted roster");
        Ok(())
    }

    /// Where the roster is stored, for status output.
    pub fn describe(&self) -> String {
        match self {
            RosterSource::File(file) => file.path().display().to_string(),
            RosterSource::Remote(client) => client.url().to_string(),
        }
    }

    /// Age of the stored roster, when the source can tell.
    pub fn age_display(&self) -> Option<String> {
        match self {
            RosterSource::File(file) => Some(file.age_display()),
            RosterSource::Remote(_) => None,
        }
    }
}
