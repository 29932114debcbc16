//! Data models for the athlete roster.
//!
//! - `Athlete`, `AthleteId`, `AttendanceEntry`: stored roster records
//! - `AthleteDraft`: user-entered fields for add/edit, with validation
//! - `Team`: canonical team labels and the alias normalizer

pub mod athlete;
pub mod team;

pub use athlete::{
    assign_missing_ids, grade_rank, Athlete, AthleteDraft, AthleteId, AttendanceEntry, ValidDraft,
    GRADE_ORDER,
};
pub use team::{team_rank, Team};
