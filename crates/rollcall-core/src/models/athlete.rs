use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::team::{self, Team};
use crate::error::ValidationError;

/// Recognized grades, in sort order.
pub const GRADE_ORDER: [&str; 6] = ["7", "8", "9", "10", "11", "12"];

/// Position of a grade in [`GRADE_ORDER`]. Unknown or empty grades sort last.
pub fn grade_rank(grade: &str) -> usize {
    let grade = grade.trim();
    GRADE_ORDER
        .iter()
        .position(|g| *g == grade)
        .unwrap_or(GRADE_ORDER.len())
}

/// Opaque, stable identifier assigned when an athlete is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AthleteId(Uuid);

impl AthleteId {
    /// Stand-in for records stored before ids were assigned.
    pub const UNASSIGNED: AthleteId = AthleteId(Uuid::nil());

    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    fn unassigned() -> Self {
        Self::UNASSIGNED
    }

    pub fn is_assigned(&self) -> bool {
        !self.0.is_nil()
    }

    /// First eight hex digits, enough to pick an athlete out on the command line.
    pub fn short(&self) -> String {
        self.0.simple().to_string()[..8].to_string()
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for AthleteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceEntry {
    pub date: NaiveDate,
    pub present: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Athlete {
    #[serde(default = "AthleteId::unassigned")]
    pub id: AthleteId,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub grade: String,
    #[serde(default, with = "team::optional_label")]
    pub team: Option<Team>,
    #[serde(default)]
    pub workout_group: String,
    #[serde(default)]
    pub present: bool,
    #[serde(default)]
    pub attendance_history: Vec<AttendanceEntry>,
}

impl Athlete {
    /// Build a record with a fresh id, absent, and no history.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        grade: impl Into<String>,
        team: Option<Team>,
        workout_group: impl Into<String>,
    ) -> Self {
        Self {
            id: AthleteId::new(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            grade: grade.into(),
            team,
            workout_group: workout_group.into(),
            present: false,
            attendance_history: Vec::new(),
        }
    }

    /// "First Last", trimmed.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }

    pub fn team_label(&self) -> &'static str {
        self.team.map(|t| t.label()).unwrap_or("")
    }

    pub fn grade_rank(&self) -> usize {
        grade_rank(&self.grade)
    }

    pub fn team_rank(&self) -> usize {
        team::team_rank(self.team)
    }

    /// Flip today's flag and log the new value. Returns the new flag.
    pub fn toggle(&mut self, date: NaiveDate) -> bool {
        self.set_present(date, !self.present);
        self.present
    }

    /// Set today's flag and log it, even if unchanged.
    pub fn set_present(&mut self, date: NaiveDate, present: bool) {
        self.present = present;
        self.attendance_history.push(AttendanceEntry { date, present });
    }

    pub fn present_entries(&self) -> usize {
        self.attendance_history.iter().filter(|e| e.present).count()
    }

    pub fn absent_entries(&self) -> usize {
        self.attendance_history.len() - self.present_entries()
    }

    pub fn has_entry_on(&self, date: NaiveDate) -> bool {
        self.attendance_history.iter().any(|e| e.date == date)
    }

    pub fn present_on(&self, date: NaiveDate) -> bool {
        self.attendance_history.iter().any(|e| e.date == date && e.present)
    }
}

/// Give a fresh id to every record loaded without one.
/// Returns how many were assigned; the caller should store the roster again.
pub fn assign_missing_ids(athletes: &mut [Athlete]) -> usize {
    let mut assigned = 0;
    for athlete in athletes.iter_mut().filter(|a| !a.id.is_assigned()) {
        athlete.id = AthleteId::new();
        assigned += 1;
    }
    assigned
}

/// User-entered fields for adding or editing an athlete.
#[derive(Debug, Clone, Default)]
pub struct AthleteDraft {
    pub first_name: String,
    pub last_name: String,
    pub grade: String,
    pub team: String,
    pub workout_group: String,
}

/// A draft that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidDraft {
    pub first_name: String,
    pub last_name: String,
    pub grade: String,
    pub team: Team,
    pub workout_group: String,
}

impl AthleteDraft {
    /// All five fields are required. The team goes through the alias table and
    /// the grade must be one of [`GRADE_ORDER`].
    pub fn validate(&self) -> Result<ValidDraft, ValidationError> {
        let first_name = required("first name", &self.first_name)?;
        let last_name = required("last name", &self.last_name)?;
        let grade = required("grade", &self.grade)?;
        let team_raw = required("team", &self.team)?;
        let workout_group = required("workout group", &self.workout_group)?;

        if !GRADE_ORDER.contains(&grade.as_str()) {
            return Err(ValidationError::UnknownGrade(grade));
        }
        let team = Team::normalize(&team_raw).ok_or(ValidationError::UnknownTeam(team_raw))?;

        Ok(ValidDraft {
            first_name,
            last_name,
            grade,
            team,
            workout_group,
        })
    }
}

fn required(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(value.to_string())
    }
}
