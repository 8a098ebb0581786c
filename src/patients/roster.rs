//! Built-in patient roster and the filter/search/sort selection over it.

use super::model::{Alert, AlertKind, BloodPressure, Patient, Priority};
use crate::monitor::Severity;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Which severities are shown.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Stable,
    Warning,
    Critical,
}

impl StatusFilter {
    pub fn accepts(self, status: Severity) -> bool {
        match self {
            Self::All => true,
            Self::Stable => status == Severity::Stable,
            Self::Warning => status == Severity::Warning,
            Self::Critical => status == Severity::Critical,
        }
    }

    /// Next filter in the cycle all → stable → warning → critical → all.
    pub fn next(self) -> Self {
        match self {
            Self::All => Self::Stable,
            Self::Stable => Self::Warning,
            Self::Warning => Self::Critical,
            Self::Critical => Self::All,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All Patients",
            Self::Stable => "Stable",
            Self::Warning => "Warning",
            Self::Critical => "Critical",
        }
    }
}

/// Ordering of the visible patients.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    Name,
    Room,
    Status,
    /// Highest heart rate first
    HeartRate,
}

impl SortKey {
    pub fn next(self) -> Self {
        match self {
            Self::Name => Self::Room,
            Self::Room => Self::Status,
            Self::Status => Self::HeartRate,
            Self::HeartRate => Self::Name,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Room => "Room Number",
            Self::Status => "Status",
            Self::HeartRate => "Heart Rate",
        }
    }

    fn compare(self, a: &Patient, b: &Patient) -> Ordering {
        match self {
            Self::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            Self::Room => a.room.to_lowercase().cmp(&b.room.to_lowercase()),
            Self::Status => a.status.label().cmp(b.status.label()),
            Self::HeartRate => b.heart_rate.cmp(&a.heart_rate),
        }
    }
}

/// Returns the patients passing `filter` and `search`, ordered by `sort`.
///
/// An empty search term matches everyone. Ties keep roster order.
pub fn select<'a>(
    patients: &'a [Patient],
    filter: StatusFilter,
    search: &str,
    sort: SortKey,
) -> Vec<&'a Patient> {
    let mut selected: Vec<&Patient> = patients
        .iter()
        .filter(|p| filter.accepts(p.status) && p.matches_search(search))
        .collect();
    selected.sort_by(|a, b| sort.compare(a, b));
    selected
}

/// Number of patients with at least one high-priority alert.
pub fn high_priority_count(patients: &[Patient]) -> usize {
    patients.iter().filter(|p| p.has_high_priority_alert()).count()
}

/// The ICU roster shown by the dashboard.
pub fn sample_roster() -> Vec<Patient> {
    vec![
        Patient {
            id: "1".to_string(),
            name: "Sarah Johnson".to_string(),
            room: "ICU-101".to_string(),
            age: 65,
            condition: "Post-surgery".to_string(),
            heart_rate: 82,
            blood_pressure: BloodPressure::new(120, 80),
            spo2: 98,
            temperature: 37.2,
            status: Severity::Stable,
            alerts: vec![Alert::new(
                AlertKind::Preventive,
                "DVT prevention measures recommended",
                Priority::Medium,
            )],
        },
        Patient {
            id: "2".to_string(),
            name: "Robert Chen".to_string(),
            room: "ICU-102".to_string(),
            age: 54,
            condition: "Cardiac monitoring".to_string(),
            heart_rate: 95,
            blood_pressure: BloodPressure::new(135, 90),
            spo2: 95,
            temperature: 37.8,
            status: Severity::Warning,
            alerts: vec![Alert::new(
                AlertKind::Notification,
                "Patient reported increased chest pain",
                Priority::High,
            )],
        },
        Patient {
            id: "3".to_string(),
            name: "Emily Davis".to_string(),
            room: "ICU-103".to_string(),
            age: 72,
            condition: "Respiratory distress".to_string(),
            heart_rate: 110,
            blood_pressure: BloodPressure::new(145, 95),
            spo2: 92,
            temperature: 38.5,
            status: Severity::Critical,
            alerts: vec![Alert::new(
                AlertKind::Notification,
                "Oxygen saturation dropping",
                Priority::High,
            )],
        },
        Patient {
            id: "4".to_string(),
            name: "Michael Wong".to_string(),
            room: "ICU-104".to_string(),
            age: 60,
            condition: "Post-operative care".to_string(),
            heart_rate: 78,
            blood_pressure: BloodPressure::new(118, 75),
            spo2: 97,
            temperature: 36.9,
            status: Severity::Stable,
            alerts: Vec::new(),
        },
        Patient {
            id: "5".to_string(),
            name: "Lisa Thompson".to_string(),
            room: "ICU-105".to_string(),
            age: 48,
            condition: "Sepsis monitoring".to_string(),
            heart_rate: 105,
            blood_pressure: BloodPressure::new(100, 60),
            spo2: 94,
            temperature: 38.2,
            status: Severity::Warning,
            alerts: vec![Alert::new(
                AlertKind::Notification,
                "Elevated white blood cell count",
                Priority::Medium,
            )],
        },
    ]
}
