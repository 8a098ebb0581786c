//! Patient records shown on the dashboard.

use crate::monitor::Severity;
use ratatui::style::Color;

/// Origin of an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    /// Recommended care measure
    Preventive,
    /// Something reported or observed that needs attention
    Notification,
}

impl AlertKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Preventive => "preventive",
            Self::Notification => "notification",
        }
    }
}

/// Alert urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }

    /// Text color for alerts of this priority.
    pub fn color(self) -> Color {
        match self {
            Self::High => Color::Rgb(0xb9, 0x1c, 0x1c),
            Self::Medium => Color::Rgb(0xa1, 0x62, 0x07),
            Self::Low => Color::Rgb(0x1d, 0x4e, 0xd8),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
    pub priority: Priority,
}

impl Alert {
    pub fn new(kind: AlertKind, message: &str, priority: Priority) -> Self {
        Self {
            kind,
            message: message.to_string(),
            priority,
        }
    }
}

/// Arterial blood pressure in mmHg.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BloodPressure {
    pub systolic: u16,
    pub diastolic: u16,
}

impl BloodPressure {
    pub fn new(systolic: u16, diastolic: u16) -> Self {
        Self {
            systolic,
            diastolic,
        }
    }
}

impl std::fmt::Display for BloodPressure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.systolic, self.diastolic)
    }
}

/// Snapshot of one monitored patient.
#[derive(Debug, Clone, PartialEq)]
pub struct Patient {
    pub id: String,
    pub name: String,
    pub room: String,
    pub age: u8,
    pub condition: String,
    /// Beats per minute
    pub heart_rate: u16,
    pub blood_pressure: BloodPressure,
    /// Oxygen saturation in percent
    pub spo2: u8,
    /// Body temperature in degrees Celsius
    pub temperature: f32,
    pub status: Severity,
    pub alerts: Vec<Alert>,
}

impl Patient {
    pub fn has_high_priority_alert(&self) -> bool {
        self.alerts.iter().any(|alert| alert.priority == Priority::High)
    }

    /// Case-insensitive match against name or room.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.name.to_lowercase().contains(&term) || self.room.to_lowercase().contains(&term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blood_pressure_display() {
        assert_eq!(BloodPressure::new(135, 90).to_string(), "135/90");
    }

    #[test]
    fn test_priority_order() {
        assert!(Priority::High > Priority::Medium);
        assert!(Priority::Medium > Priority::Low);
        assert_eq!(Priority::Low.label(), "Low");
    }
}
