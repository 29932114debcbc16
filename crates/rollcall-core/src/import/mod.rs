//! CSV import and export of the roster.
//!
//! Import infers columns from the header row and groups athletes under
//! workout-group header rows; export writes the fixed six-column layout.

pub mod export;
pub mod parser;

pub use export::{export_csv, export_file_name, EXPORT_HEADERS};
pub use parser::{import_csv, ImportOutcome, NormalizationWarning};
