//! Patient monitoring dashboard.
//!
//! Shows a grid of patient cards, each with live vitals and its own animated ECG trace,
//! a per-patient detail overlay and the ward schedule.

pub mod card;
pub mod detail;
pub mod schedule;
pub mod ui;

pub use ui::{Dashboard, DashboardOptions};
