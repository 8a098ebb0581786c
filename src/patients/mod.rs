//! Patient data for the monitoring dashboard.
//!
//! All records are synthetic and compiled in.

pub mod chart;
pub mod model;
pub mod roster;
pub mod rounds;

pub use model::Patient;
pub use roster::{high_priority_count, sample_roster, select, SortKey, StatusFilter};
