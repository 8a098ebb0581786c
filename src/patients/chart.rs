//! Bedside chart of a patient: medication timeline, clinical notes, care insights
//! and the last day of vital signs.
//!
//! Records are compiled in. The vitals history is derived from the patient's current
//! readings with a deterministic hourly wobble, so the same patient and reference
//! time always produce the same chart.

use super::model::{Patient, Priority};
use chrono::{Duration, NaiveDate, NaiveDateTime};

/// Hours of vitals history before the reference time.
pub const HISTORY_HOURS: i64 = 24;

/// Day the compiled-in chart entries were recorded.
fn chart_time(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 2, 22)
        .and_then(|date| date.and_hms_opt(hour, minute, 0))
        .unwrap_or_default()
}

/// One administered dose.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MedicationEvent {
    pub at: NaiveDateTime,
    pub medication: String,
    pub dosage: String,
    pub administered_by: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteCategory {
    Observation,
    Assessment,
    Intervention,
}

impl NoteCategory {
    pub fn label(self) -> &'static str {
        match self {
            Self::Observation => "Observation",
            Self::Assessment => "Assessment",
            Self::Intervention => "Intervention",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClinicalNote {
    pub at: NaiveDateTime,
    pub category: NoteCategory,
    pub note: String,
    pub author: String,
}

/// Area a care insight concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsightKind {
    Medication,
    Preventive,
    Risk,
    Treatment,
}

impl InsightKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Medication => "medication",
            Self::Preventive => "preventive",
            Self::Risk => "risk",
            Self::Treatment => "treatment",
        }
    }
}

/// Generated care recommendation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insight {
    pub kind: InsightKind,
    pub title: String,
    pub description: String,
    pub priority: Priority,
}

/// Vital signs at one point of the history.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VitalsSample {
    pub at: NaiveDateTime,
    pub heart_rate: f64,
    pub systolic: f64,
    pub diastolic: f64,
    pub spo2: f64,
    pub temperature: f64,
}

/// Everything the patient detail view shows beyond the live monitor.
#[derive(Debug, Clone, PartialEq)]
pub struct PatientChart {
    pub medications: Vec<MedicationEvent>,
    pub notes: Vec<ClinicalNote>,
    pub insights: Vec<Insight>,
    pub history: Vec<VitalsSample>,
}

impl PatientChart {
    /// Builds the chart of `patient`, with history ending at `now`.
    pub fn for_patient(patient: &Patient, now: NaiveDateTime) -> Self {
        Self {
            medications: medications(),
            notes: clinical_notes(),
            insights: insights(),
            history: vitals_history(patient, now),
        }
    }

    /// High-priority insights, shown on the overview.
    pub fn critical_insights(&self) -> impl Iterator<Item = &Insight> {
        self.insights
            .iter()
            .filter(|insight| insight.priority == Priority::High)
    }
}

fn medications() -> Vec<MedicationEvent> {
    let event = |hour, minute, medication: &str, dosage: &str, by: &str| MedicationEvent {
        at: chart_time(hour, minute),
        medication: medication.to_string(),
        dosage: dosage.to_string(),
        administered_by: by.to_string(),
    };
    vec![
        event(8, 30, "Morphine", "5mg", "Dr. Smith"),
        event(6, 0, "Amoxicillin", "500mg", "Nurse Johnson"),
    ]
}

fn clinical_notes() -> Vec<ClinicalNote> {
    vec![
        ClinicalNote {
            at: chart_time(9, 15),
            category: NoteCategory::Assessment,
            note: "Patient reports mild discomfort in lower abdomen. Vital signs stable. \
                   Incision site shows good healing progress."
                .to_string(),
            author: "Dr. Williams".to_string(),
        },
        ClinicalNote {
            at: chart_time(8, 45),
            category: NoteCategory::Intervention,
            note: "Repositioned patient and applied compression stockings.".to_string(),
            author: "Nurse Johnson".to_string(),
        },
        ClinicalNote {
            at: chart_time(7, 30),
            category: NoteCategory::Observation,
            note: "Patient slept well through the night. Morning medications administered \
                   on schedule. Good appetite at breakfast."
                .to_string(),
            author: "Nurse Chen".to_string(),
        },
    ]
}

fn insights() -> Vec<Insight> {
    let insight = |kind, title: &str, description: &str, priority| Insight {
        kind,
        title: title.to_string(),
        description: description.to_string(),
        priority,
    };
    vec![
        insight(
            InsightKind::Medication,
            "Medication Interaction Alert",
            "Potential interaction between current pain management and antibiotics. \
             Monitor liver function.",
            Priority::Medium,
        ),
        insight(
            InsightKind::Preventive,
            "DVT Prevention",
            "Recommend increasing position changes and considering compression stockings \
             due to limited mobility.",
            Priority::High,
        ),
        insight(
            InsightKind::Risk,
            "Fall Risk Assessment",
            "Current medications may increase dizziness. Implement additional fall precautions.",
            Priority::Medium,
        ),
        insight(
            InsightKind::Treatment,
            "Early Mobilization",
            "Patient tolerates short walks. Continue assisted mobilization twice daily.",
            Priority::Low,
        ),
    ]
}

/// Deterministic value in `[-1, 1]` for hour `i` of signal `channel`.
fn wobble(i: i64, channel: f64) -> f64 {
    (i as f64 * 1.7 + channel * 2.3).sin()
}

/// Hourly samples from `HISTORY_HOURS` before `now` up to `now`, oldest first.
///
/// Each reading stays within a fixed band around the patient's current value:
/// ±5 bpm, ±5 mmHg, ±2 % SpO2 and ±0.2 °C.
pub fn vitals_history(patient: &Patient, now: NaiveDateTime) -> Vec<VitalsSample> {
    (0..=HISTORY_HOURS)
        .rev()
        .map(|hours_ago| VitalsSample {
            at: now - Duration::hours(hours_ago),
            heart_rate: f64::from(patient.heart_rate) + 5.0 * wobble(hours_ago, 0.0),
            systolic: f64::from(patient.blood_pressure.systolic) + 5.0 * wobble(hours_ago, 1.0),
            diastolic: f64::from(patient.blood_pressure.diastolic) + 5.0 * wobble(hours_ago, 2.0),
            spo2: f64::from(patient.spo2) + 2.0 * wobble(hours_ago, 3.0),
            temperature: f64::from(patient.temperature) + 0.2 * wobble(hours_ago, 4.0),
        })
        .collect()
}
