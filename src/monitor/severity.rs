//! Patient severity levels and their display colors.

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Discrete patient status level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Stable,
    Warning,
    Critical,
}

impl Severity {
    /// Trace and accent color for this severity.
    pub fn color(self) -> Color {
        match self {
            Self::Critical => Color::Rgb(0xef, 0x44, 0x44),
            Self::Warning => Color::Rgb(0xea, 0xb3, 0x08),
            Self::Stable => Color::Rgb(0x22, 0xc5, 0x5e),
        }
    }

    /// Lowercase label, also used as the sort key for status ordering.
    pub fn label(self) -> &'static str {
        match self {
            Self::Stable => "stable",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_mapping() {
        assert_eq!(Severity::Critical.color(), Color::Rgb(239, 68, 68));
        assert_eq!(Severity::Warning.color(), Color::Rgb(234, 179, 8));
        assert_eq!(Severity::Stable.color(), Color::Rgb(34, 197, 94));
    }

    #[test]
    fn test_colors_are_distinct() {
        let colors: Vec<Color> = [Severity::Stable, Severity::Warning, Severity::Critical]
            .iter()
            .map(|s| s.color())
            .collect();
        assert_ne!(colors[0], colors[1]);
        assert_ne!(colors[1], colors[2]);
        assert_ne!(colors[0], colors[2]);
    }

    #[test]
    fn test_serde_lowercase() {
        #[derive(Deserialize)]
        struct Wrapper {
            status: Severity,
        }
        let parsed: Wrapper = toml::from_str("status = \"critical\"").unwrap();
        assert_eq!(parsed.status, Severity::Critical);
        assert!(toml::from_str::<Wrapper>("status = \"unknown\"").is_err());
    }
}
