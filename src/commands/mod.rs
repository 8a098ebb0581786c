//! Application command handlers for wardwatch.
//!
//! # Commands
//! - `monitor`: Patient monitoring dashboard (default)
//! - `trace`: Print the synthetic ECG trace
//! - `config`: Open the configuration file in the user's editor
//! - `logs`: Display recent log entries

pub mod config;
pub mod logs;
pub mod monitor;
pub mod trace;

pub use config::handle_config;
pub use logs::handle_logs;
pub use monitor::{handle_monitor, MonitorOverrides};
pub use trace::handle_trace;
