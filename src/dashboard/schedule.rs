//! Ward schedule screen: today's staff shifts and ward round outcomes.

use super::card::{LABEL_FG, VALUE_FG};
use super::detail::round_lines;
use crate::patients::rounds::{self, RoundNote, ShiftAssignment};
use chrono::NaiveDateTime;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Row, Table, Wrap},
};

const ON_SHIFT_MARK: &str = "●";

fn hours(shift: &ShiftAssignment) -> String {
    let mut text = format!(
        "{} - {}",
        shift.start.format("%H:%M"),
        shift.end.format("%H:%M")
    );
    for pause in &shift.breaks {
        text.push_str(&format!(
            " ({} {} - {})",
            pause.label,
            pause.start.format("%H:%M"),
            pause.end.format("%H:%M")
        ));
    }
    text
}

/// Renders the schedule screen. Staff on shift at `now` are marked.
pub fn render_schedule(
    frame: &mut Frame,
    area: Rect,
    shifts: &[ShiftAssignment],
    ward_rounds: &[RoundNote],
    now: NaiveDateTime,
) {
    let on_shift = rounds::on_shift(shifts, now.time());

    let [title_area, staff_area, rounds_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(shifts.len() as u16 + 3),
        Constraint::Min(0),
    ])
    .areas(area);

    let title = Line::from(vec![
        Span::styled(
            " Schedule & Rounds ",
            Style::default().fg(VALUE_FG).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(
                "Week of {}  •  {} on shift now",
                now.format("%Y-%m-%d"),
                on_shift.len()
            ),
            Style::default().fg(LABEL_FG),
        ),
    ]);
    frame.render_widget(Paragraph::new(title), title_area);

    let header = Row::new(["", "Employee", "Role", "Unit", "Shift", "Hours", "Status"])
        .style(Style::default().fg(LABEL_FG).add_modifier(Modifier::BOLD));
    let rows = shifts.iter().map(|shift| {
        let mark = if on_shift.contains(&shift) {
            ON_SHIFT_MARK
        } else {
            ""
        };
        Row::new(vec![
            Line::from(mark),
            Line::from(shift.employee_name.clone()),
            Line::from(shift.role.clone()),
            Line::from(shift.unit.clone()),
            Line::from(shift.shift_type.label()),
            Line::from(hours(shift)),
            Line::from(Span::styled(
                shift.status.label(),
                Style::default().fg(shift.status.color()),
            )),
        ])
        .style(Style::default().fg(VALUE_FG))
    });
    let table = Table::new(
        rows,
        [
            Constraint::Length(1),
            Constraint::Length(18),
            Constraint::Length(18),
            Constraint::Length(18),
            Constraint::Length(6),
            Constraint::Min(14),
            Constraint::Length(12),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(LABEL_FG))
            .title(" Staff Schedule "),
    );
    frame.render_widget(table, staff_area);

    let lines: Vec<Line> = ward_rounds.iter().flat_map(round_lines).collect();
    let rounds_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(LABEL_FG))
        .title(" Rounds & Outcomes ");
    frame.render_widget(
        Paragraph::new(lines)
            .block(rounds_block)
            .wrap(Wrap { trim: true }),
        rounds_area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patients::rounds::{sample_rounds, sample_shifts};
    use chrono::NaiveDate;
    use ratatui::backend::TestBackend;

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 2, 22)
            .and_then(|date| date.and_hms_opt(hour, 0, 0))
            .unwrap()
    }

    fn rendered(now: NaiveDateTime) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_schedule(frame, area, &sample_shifts(), &sample_rounds(), now);
            })
            .unwrap();
        let buffer = terminal.backend().buffer();
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_hours_include_breaks() {
        let shifts = sample_shifts();
        assert_eq!(hours(&shifts[0]), "07:00 - 15:00");
        assert_eq!(hours(&shifts[2]), "15:00 - 23:00 (Break 17:00 - 17:30)");
    }

    #[test]
    fn test_marks_staff_on_shift() {
        let rows = rendered(at(10));
        assert!(rows[0].contains("Schedule & Rounds"));
        assert!(rows[0].contains("2 on shift now"));

        let row_of = |name: &str| rows.iter().find(|row| row.contains(name)).unwrap().clone();
        assert!(row_of("Dr. Sarah Smith").contains(ON_SHIFT_MARK));
        assert!(row_of("Trenton Kilroy").contains(ON_SHIFT_MARK));
        assert!(!row_of("Alicia Adams").contains(ON_SHIFT_MARK));
        assert!(row_of("Alicia Adams").contains("vacation"));
    }

    #[test]
    fn test_lists_round_outcomes() {
        let text = rendered(at(22)).concat();
        assert!(text.contains("Rounds & Outcomes"));
        assert!(text.contains("Room ICU-103"));
        assert!(text.contains("Outcome: Continue current treatment plan"));
        assert!(text.contains("Attendees: Dr. Smith, Nurse Johnson, Dr. Chen"));
    }
}
