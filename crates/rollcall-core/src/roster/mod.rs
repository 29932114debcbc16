//! The roster and views over it.
//!
//! `RosterStore` owns the athlete list and applies add/edit/remove/toggle
//! actions; `view` derives filtered and sorted slices for display.

pub mod store;
pub mod view;

pub use store::RosterStore;
pub use view::{filter, filter_and_sort, sort, FilterCriteria, FilterOptions, SortKey};
