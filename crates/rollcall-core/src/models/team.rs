use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Canonical team labels. Free-text team strings are mapped onto these
/// through [`Team::normalize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Team {
    Varsity = 1,
    Jv = 2,
    A = 3,
    DevSquad = 4,
}

/// Alias table, keyed by the lower-cased and trimmed input.
const TEAM_ALIASES: &[(&str, Team)] = &[
    ("varsity", Team::Varsity),
    ("v", Team::Varsity),
    ("jv", Team::Jv),
    ("j", Team::Jv),
    ("a", Team::A),
    ("dev", Team::DevSquad),
    ("d", Team::DevSquad),
    ("devsquad", Team::DevSquad),
    ("dev squad", Team::DevSquad),
    ("development", Team::DevSquad),
];

/// Sort position for an athlete without a recognized team.
pub const UNRANKED: usize = usize::MAX;

impl Team {
    /// Map a raw team string onto a canonical team.
    /// Returns `None` when no alias matches.
    pub fn normalize(raw: &str) -> Option<Team> {
        let key = raw.trim().to_lowercase();
        TEAM_ALIASES
            .iter()
            .find(|(alias, _)| *alias == key)
            .map(|(_, team)| *team)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Team::Varsity => "Varsity",
            Team::Jv => "JV",
            Team::A => "A",
            Team::DevSquad => "Dev Squad",
        }
    }

    /// Fixed display order (Varsity=1 .. Dev Squad=4).
    pub fn rank(&self) -> usize {
        *self as usize
    }
}

/// Rank of an optional team; unrecognized teams sort last.
pub fn team_rank(team: Option<Team>) -> usize {
    team.map(|t| t.rank()).unwrap_or(UNRANKED)
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Team {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Team::normalize(s).ok_or_else(|| format!("unrecognized team \"{}\"", s.trim()))
    }
}

// Stored rosters keep the team as its label, with "" for no team.

impl Serialize for Team {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Team {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Team::normalize(&raw).ok_or_else(|| serde::de::Error::custom(format!("unknown team \"{}\"", raw)))
    }
}

pub(crate) mod optional_label {
    //! Serde adapter writing `Option<Team>` as a plain string.

    use serde::{Deserialize, Deserializer, Serializer};

    use super::Team;

    pub fn serialize<S: Serializer>(team: &Option<Team>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(team.map(|t| t.label()).unwrap_or(""))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Team>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(Team::normalize))
    }
}
