//! Staff shift assignments and ward round notes.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use ratatui::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftType {
    Day,
    Swing,
    Night,
}

impl ShiftType {
    pub fn label(self) -> &'static str {
        match self {
            Self::Day => "Day",
            Self::Swing => "Swing",
            Self::Night => "Night",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftStatus {
    Scheduled,
    InProgress,
    Completed,
    Vacation,
    Duty,
}

impl ShiftStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::InProgress => "in progress",
            Self::Completed => "completed",
            Self::Vacation => "vacation",
            Self::Duty => "on duty",
        }
    }

    pub fn color(self) -> Color {
        match self {
            Self::InProgress => Color::Rgb(0x1d, 0x4e, 0xd8),
            Self::Completed => Color::Rgb(0x15, 0x80, 0x3d),
            Self::Vacation => Color::Rgb(0x7e, 0x22, 0xce),
            Self::Duty => Color::Rgb(0xc2, 0x41, 0x0c),
            Self::Scheduled => Color::Rgb(0x6b, 0x72, 0x80),
        }
    }

    /// Whether the person is expected on the ward during the shift.
    pub fn is_working(self) -> bool {
        !matches!(self, Self::Vacation)
    }
}

/// Pause inside a shift.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftBreak {
    pub label: String,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftAssignment {
    pub employee_name: String,
    pub role: String,
    pub unit: String,
    pub shift_type: ShiftType,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub status: ShiftStatus,
    pub breaks: Vec<ShiftBreak>,
}

impl ShiftAssignment {
    /// Whether `time` falls inside the shift. Shifts ending before they start run
    /// past midnight.
    pub fn covers(&self, time: NaiveTime) -> bool {
        if self.start <= self.end {
            self.start <= time && time < self.end
        } else {
            time >= self.start || time < self.end
        }
    }
}

/// Outcome of a ward round at one bed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundNote {
    pub at: NaiveDateTime,
    pub patient_room: String,
    pub notes: String,
    pub outcome: String,
    pub attendees: Vec<String>,
}

fn clock(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default()
}

fn round_time(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 2, 22)
        .map(|date| date.and_time(clock(hour, minute)))
        .unwrap_or_default()
}

fn assignment(
    name: &str,
    role: &str,
    unit: &str,
    shift_type: ShiftType,
    hours: (NaiveTime, NaiveTime),
    status: ShiftStatus,
) -> ShiftAssignment {
    ShiftAssignment {
        employee_name: name.to_string(),
        role: role.to_string(),
        unit: unit.to_string(),
        shift_type,
        start: hours.0,
        end: hours.1,
        status,
        breaks: Vec::new(),
    }
}

/// Today's shift plan.
pub fn sample_shifts() -> Vec<ShiftAssignment> {
    let mut head_nurse = assignment(
        "Molly Snyder",
        "Head Nurse",
        "Cardiac Care Unit",
        ShiftType::Swing,
        (clock(15, 0), clock(23, 0)),
        ShiftStatus::Scheduled,
    );
    head_nurse.breaks.push(ShiftBreak {
        label: "Break".to_string(),
        start: clock(17, 0),
        end: clock(17, 30),
    });

    vec![
        assignment(
            "Dr. Sarah Smith",
            "Primary Physician",
            "Cardiac Care",
            ShiftType::Day,
            (clock(7, 0), clock(15, 0)),
            ShiftStatus::InProgress,
        ),
        assignment(
            "Nurse Johnson",
            "Registered Nurse",
            "Cardiac Care",
            ShiftType::Swing,
            (clock(15, 0), clock(23, 0)),
            ShiftStatus::Scheduled,
        ),
        head_nurse,
        assignment(
            "Alicia Adams",
            "Registered Nurse",
            "Cardiac Care Unit",
            ShiftType::Day,
            (clock(7, 0), clock(15, 0)),
            ShiftStatus::Vacation,
        ),
        assignment(
            "Danielle Hawk",
            "Registered Nurse",
            "Cardiac Care Unit",
            ShiftType::Night,
            (clock(23, 0), clock(7, 0)),
            ShiftStatus::Completed,
        ),
        assignment(
            "Trenton Kilroy",
            "Registered Nurse",
            "Cardiac Care Unit",
            ShiftType::Day,
            (clock(7, 0), clock(15, 0)),
            ShiftStatus::Duty,
        ),
    ]
}

/// Notes from today's ward rounds, newest first.
pub fn sample_rounds() -> Vec<RoundNote> {
    vec![
        RoundNote {
            at: round_time(9, 30),
            patient_room: "ICU-103".to_string(),
            notes: "Oxygen requirement increased overnight".to_string(),
            outcome: "Escalate respiratory support, repeat blood gas in 2 hours".to_string(),
            attendees: vec!["Dr. Smith".to_string(), "Nurse Chen".to_string()],
        },
        RoundNote {
            at: round_time(9, 0),
            patient_room: "ICU-101".to_string(),
            notes: "Morning rounds - Patient showing improvement".to_string(),
            outcome: "Continue current treatment plan".to_string(),
            attendees: vec![
                "Dr. Smith".to_string(),
                "Nurse Johnson".to_string(),
                "Dr. Chen".to_string(),
            ],
        },
    ]
}

/// Staff whose shift covers `time`.
pub fn on_shift(shifts: &[ShiftAssignment], time: NaiveTime) -> Vec<&ShiftAssignment> {
    shifts
        .iter()
        .filter(|shift| shift.status.is_working() && shift.covers(time))
        .collect()
}

/// Round notes recorded at `room`, case-insensitive.
pub fn rounds_for_room<'a>(rounds: &'a [RoundNote], room: &str) -> Vec<&'a RoundNote> {
    rounds
        .iter()
        .filter(|round| round.patient_room.eq_ignore_ascii_case(room))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names<'a>(shifts: &[&'a ShiftAssignment]) -> Vec<&'a str> {
        shifts.iter().map(|s| s.employee_name.as_str()).collect()
    }

    #[test]
    fn test_day_shift_coverage() {
        let shifts = sample_shifts();
        let morning = on_shift(&shifts, clock(10, 0));
        // Alicia Adams is on vacation.
        assert_eq!(names(&morning), vec!["Dr. Sarah Smith", "Trenton Kilroy"]);
    }

    #[test]
    fn test_shift_end_is_exclusive() {
        let shifts = sample_shifts();
        let handover = on_shift(&shifts, clock(15, 0));
        assert_eq!(names(&handover), vec!["Nurse Johnson", "Molly Snyder"]);
    }

    #[test]
    fn test_night_shift_wraps_midnight() {
        let shifts = sample_shifts();
        assert_eq!(names(&on_shift(&shifts, clock(2, 0))), vec!["Danielle Hawk"]);
        assert_eq!(names(&on_shift(&shifts, clock(23, 30))), vec!["Danielle Hawk"]);
    }

    #[test]
    fn test_rounds_for_room() {
        let rounds = sample_rounds();
        let notes = rounds_for_room(&rounds, "icu-101");
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].attendees.len(), 3);
        assert!(rounds_for_room(&rounds, "ICU-104").is_empty());
    }

    #[test]
    fn test_head_nurse_has_break() {
        let shifts = sample_shifts();
        let molly = shifts
            .iter()
            .find(|s| s.employee_name == "Molly Snyder")
            .unwrap();
        assert_eq!(molly.breaks.len(), 1);
        assert!(molly.covers(molly.breaks[0].start));
    }
}
