//! The patient monitoring dashboard command.

use crate::config::{ViewMode, WardwatchConfig};
use crate::dashboard::{Dashboard, DashboardOptions};
use crate::patients::{self, SortKey, StatusFilter};
use crate::ui::ErrorScreen;

/// One-run overrides of the configured display settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonitorOverrides {
    pub compact: bool,
    pub filter: Option<StatusFilter>,
    pub sort: Option<SortKey>,
}

impl MonitorOverrides {
    fn apply(self, config: &WardwatchConfig) -> DashboardOptions {
        let display = &config.display;
        DashboardOptions {
            view: if self.compact {
                ViewMode::Compact
            } else {
                display.view
            },
            filter: self.filter.unwrap_or(display.filter),
            sort: self.sort.unwrap_or(display.sort),
        }
    }
}

/// Runs the dashboard until the user quits.
///
/// # Errors
/// - If the configuration cannot be loaded (after showing an error screen)
/// - If the terminal cannot be initialized or drawn to
pub fn handle_monitor(overrides: MonitorOverrides) -> anyhow::Result<()> {
    tracing::info!("=== wardwatch dashboard starting ===");

    let config = match WardwatchConfig::load() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("Failed to load configuration: {err}");
            let message = format!(
                "Configuration Error:\n\n{err}\n\nPlease check your ~/.config/wardwatch/wardwatch.toml file and try again."
            );
            let mut error_screen = ErrorScreen::new()?;
            error_screen.show_error(&message)?;
            error_screen.cleanup()?;
            return Err(anyhow::anyhow!("Configuration error: {err}"));
        }
    };

    let options = overrides.apply(&config);
    let frame_interval = config.display.frame_interval();
    tracing::info!(
        "Display: view={}, filter={}, sort={}, frame_interval={:?}",
        options.view,
        options.filter.label(),
        options.sort.label(),
        frame_interval
    );

    let mut dashboard = Dashboard::new(patients::sample_roster(), options, frame_interval)?;
    let result = dashboard.run();
    dashboard.cleanup()?;
    result?;

    tracing::info!("=== wardwatch dashboard exited ===");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_take_precedence() {
        let config = WardwatchConfig::default();
        let overrides = MonitorOverrides {
            compact: true,
            filter: Some(StatusFilter::Critical),
            sort: None,
        };
        let options = overrides.apply(&config);
        assert_eq!(options.view, ViewMode::Compact);
        assert_eq!(options.filter, StatusFilter::Critical);
        assert_eq!(options.sort, SortKey::Name);
    }

    #[test]
    fn test_no_overrides_keep_config() {
        let mut config = WardwatchConfig::default();
        config.display.view = ViewMode::Compact;
        config.display.sort = SortKey::HeartRate;

        let options = MonitorOverrides::default().apply(&config);
        assert_eq!(options.view, ViewMode::Compact);
        assert_eq!(options.sort, SortKey::HeartRate);
        assert_eq!(options.filter, StatusFilter::All);
    }
}
