mod app;
mod commands;
mod config;
mod dashboard;
mod logging;
mod monitor;
mod patients;
mod ui;

use std::process;

fn main() {
    if let Err(e) = app::run() {
        tracing::error!("Fatal error: {e:#}");
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
