//! Error types for roster operations and CSV import.

use thiserror::Error;

use crate::models::AthleteId;

/// A required add/edit field is missing or not one of the allowed values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Unrecognized team \"{0}\"")]
    UnknownTeam(String),

    #[error("Unrecognized grade \"{0}\" (expected 7-12)")]
    UnknownGrade(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RosterError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Athlete not found: {0}")]
    NotFound(AthleteId),
}

/// CSV import failed; the existing roster is left as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    #[error("CSV must contain a header row and at least one data row")]
    TooFewLines,

    #[error("No valid athlete rows found in CSV")]
    NoAthletes,
}
