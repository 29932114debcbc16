//! Utility functions for string comparison and formatting.

pub mod format;

// Re-export commonly used functions at module level
pub use format::{cmp_ignore_case, eq_ignore_case, format_rate, round_percent, truncate_string};
