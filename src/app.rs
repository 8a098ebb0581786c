//! Application orchestration and command routing.
//!
//! Handles command-line argument parsing and delegates to the command handlers.

use crate::commands::{self, MonitorOverrides};
use crate::logging;
use crate::monitor::SURFACE_WIDTH;
use crate::patients::{SortKey, StatusFilter};
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;

/// A terminal patient-monitoring dashboard with live ECG traces
#[derive(Parser)]
#[command(name = "wardwatch")]
#[command(version)]
#[command(
    long_about = "A terminal patient-monitoring dashboard with live ECG traces.\n\nAll patient data is synthetic.\n\nDEFAULT COMMAND:\n    If no command is specified, 'monitor' is used.\n\nEXAMPLES:\n    # Open the dashboard with compact cards\n    $ wardwatch --compact\n\n    # Show only critical patients, highest heart rate first\n    $ wardwatch monitor --filter critical --sort heart-rate\n\n    # Dump the compact trace\n    $ wardwatch trace --compact"
)]
#[command(
    after_help = "CONFIGURATION:\n    Config file:        ~/.config/wardwatch/wardwatch.toml\n    Logs:               ~/.local/state/wardwatch/wardwatch.log.*"
)]
struct Cli {
    #[command(flatten)]
    monitor: MonitorArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Options of the dashboard (default command).
#[derive(Args, Debug, Clone, Default)]
struct MonitorArgs {
    /// Start with compact patient cards
    #[arg(short, long)]
    compact: bool,

    /// Only show patients with this status
    #[arg(short, long, value_enum)]
    filter: Option<StatusFilter>,

    /// Initial ordering of the patient cards
    #[arg(short, long, value_enum)]
    sort: Option<SortKey>,
}

impl MonitorArgs {
    /// Combines top-level flags with those given after `monitor`. The latter win.
    fn merged(self, subcommand: MonitorArgs) -> MonitorArgs {
        MonitorArgs {
            compact: self.compact || subcommand.compact,
            filter: subcommand.filter.or(self.filter),
            sort: subcommand.sort.or(self.sort),
        }
    }
}

impl From<MonitorArgs> for MonitorOverrides {
    fn from(args: MonitorArgs) -> Self {
        Self {
            compact: args.compact,
            filter: args.filter,
            sort: args.sort,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Open the patient monitoring dashboard (default)
    ///
    /// Arrow keys select a patient, Enter opens details, v toggles compact cards,
    /// f cycles the status filter, s cycles the sort order, / searches, r shows the
    /// ward schedule and rounds, q quits. Flags given here override top-level ones.
    #[command(visible_alias = "m")]
    Monitor(MonitorArgs),

    /// Print the synthetic ECG trace, one "x<TAB>sample" line per column
    Trace {
        /// Use the compact preset
        #[arg(short, long)]
        compact: bool,

        /// Number of columns to generate
        #[arg(short, long, default_value_t = SURFACE_WIDTH)]
        width: usize,
    },

    /// Open configuration file in your preferred editor
    ///
    /// Uses $EDITOR or falls back to nano/vi.
    #[command(visible_alias = "c")]
    Config,

    /// Show recent log entries
    ///
    /// Display the last 50 lines of the most recent log file.
    Logs,

    /// Generate shell completion script
    ///
    /// Examples:
    ///   wardwatch completions bash > wardwatch.bash
    ///   wardwatch completions zsh > _wardwatch
    Completions {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Runs the application based on command-line arguments.
///
/// # Errors
/// - If logging initialization fails
/// - If command execution fails
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Commands that write to stdout run without logging setup
    match &cli.command {
        Some(Commands::Completions { shell }) => {
            generate(*shell, &mut Cli::command(), "wardwatch", &mut io::stdout());
            return Ok(());
        }
        Some(Commands::Logs) => return commands::handle_logs(),
        Some(Commands::Trace { width, compact }) => {
            return commands::handle_trace(*width, *compact);
        }
        _ => {}
    }

    logging::init_logging()?;

    match cli.command {
        None => commands::handle_monitor(cli.monitor.into())?,
        Some(Commands::Monitor(args)) => {
            commands::handle_monitor(cli.monitor.merged(args).into())?
        }
        Some(Commands::Config) => commands::handle_config()?,
        Some(Commands::Completions { .. }) | Some(Commands::Logs) | Some(Commands::Trace { .. }) => {
            unreachable!("These commands are handled earlier")
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_command_flags() {
        let cli = Cli::try_parse_from(["wardwatch", "-c", "--filter", "warning"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.monitor.compact);
        assert_eq!(cli.monitor.filter, Some(StatusFilter::Warning));
    }

    #[test]
    fn test_monitor_subcommand_sort() {
        let cli = Cli::try_parse_from(["wardwatch", "monitor", "--sort", "heart-rate"]).unwrap();
        match cli.command {
            Some(Commands::Monitor(args)) => assert_eq!(args.sort, Some(SortKey::HeartRate)),
            _ => panic!("expected monitor command"),
        }
    }

    #[test]
    fn test_top_level_flags_merge_into_monitor() {
        let cli = Cli::try_parse_from([
            "wardwatch", "-c", "--sort", "room", "-f", "stable", "monitor", "-f", "critical",
        ])
        .unwrap();
        let Some(Commands::Monitor(args)) = cli.command else {
            panic!("expected monitor command");
        };

        let merged = cli.monitor.merged(args);
        assert!(merged.compact);
        assert_eq!(merged.sort, Some(SortKey::Room));
        assert_eq!(merged.filter, Some(StatusFilter::Critical));
    }

    #[test]
    fn test_trace_defaults_to_surface_width() {
        let cli = Cli::try_parse_from(["wardwatch", "trace"]).unwrap();
        match cli.command {
            Some(Commands::Trace { width, compact }) => {
                assert_eq!(width, 400);
                assert!(!compact);
            }
            _ => panic!("expected trace command"),
        }
    }
}
