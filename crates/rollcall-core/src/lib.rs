//! Rollcall core library.
//!
//! Attendance tracking for sports-team rosters: athlete records, CSV
//! import/export, filtered and sorted roster views, and attendance stats.
//! Rendering and user interaction live in the front end; this crate only
//! loads, transforms and persists the roster.

pub mod api;
pub mod config;
pub mod error;
pub mod import;
pub mod models;
pub mod roster;
pub mod stats;
pub mod storage;
pub mod utils;

pub use config::Config;
pub use error::{ImportError, RosterError, ValidationError};
pub use import::{export_csv, import_csv, ImportOutcome, NormalizationWarning};
pub use models::{Athlete, AthleteDraft, AthleteId, AttendanceEntry, Team};
pub use roster::{filter_and_sort, FilterCriteria, FilterOptions, RosterStore, SortKey};
pub use stats::{compute_stats, RosterStats};
pub use storage::RosterSource;
