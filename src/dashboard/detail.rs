//! Patient detail overlay: a full-size live trace plus the patient's chart in tabs.

use super::card::{self, PatientCard, CARD_BG, LABEL_FG, VALUE_FG};
use crate::monitor::clock::FrameId;
use crate::monitor::FrameClock;
use crate::patients::chart::{PatientChart, VitalsSample};
use crate::patients::rounds::{self, RoundNote};
use crate::patients::Patient;
use chrono::NaiveDateTime;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Sparkline, Tabs, Wrap},
};

/// Tabs of the detail overlay, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailTab {
    #[default]
    Overview,
    Trends,
    Medications,
    Notes,
    Insights,
}

impl DetailTab {
    pub const ALL: [DetailTab; 5] = [
        DetailTab::Overview,
        DetailTab::Trends,
        DetailTab::Medications,
        DetailTab::Notes,
        DetailTab::Insights,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Trends => "Vital Trends",
            Self::Medications => "Medications",
            Self::Notes => "Clinical Notes",
            Self::Insights => "All Insights",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|tab| *tab == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// An open detail overlay. Owns its own monitor, independent of the grid card.
pub struct PatientDetail {
    card: PatientCard,
    chart: PatientChart,
    rounds: Vec<RoundNote>,
    tab: DetailTab,
}

impl PatientDetail {
    /// Mounts a full-size monitor and builds the chart with history ending at `now`.
    pub fn open(
        patient: &Patient,
        clock: &FrameClock,
        now: NaiveDateTime,
        ward_rounds: &[RoundNote],
    ) -> Self {
        Self {
            card: PatientCard::mount(patient, false, clock),
            chart: PatientChart::for_patient(patient, now),
            rounds: rounds::rounds_for_room(ward_rounds, &patient.room)
                .into_iter()
                .cloned()
                .collect(),
            tab: DetailTab::default(),
        }
    }

    pub fn card(&self) -> &PatientCard {
        &self.card
    }

    pub fn tab(&self) -> DetailTab {
        self.tab
    }

    pub fn next_tab(&mut self) {
        self.tab = self.tab.next();
    }

    pub fn previous_tab(&mut self) {
        self.tab = self.tab.previous();
    }

    pub fn on_frame(&mut self, due: &[FrameId]) {
        self.card.on_frame(due);
    }
}

/// One vitals history row of the trends tab.
struct Trend {
    title: &'static str,
    unit: &'static str,
    /// Plotted range; readings outside are clamped.
    domain: (f64, f64),
    color: Color,
    value: fn(&VitalsSample) -> f64,
}

const TRENDS: [Trend; 4] = [
    Trend {
        title: "Heart Rate",
        unit: "bpm",
        domain: (40.0, 180.0),
        color: Color::Rgb(0x16, 0xa3, 0x4a),
        value: |s| s.heart_rate,
    },
    Trend {
        title: "Blood Pressure",
        unit: "mmHg",
        domain: (60.0, 200.0),
        color: Color::Rgb(0x16, 0xa3, 0x4a),
        value: |s| s.systolic,
    },
    Trend {
        title: "Oxygen Saturation",
        unit: "%",
        domain: (85.0, 100.0),
        color: Color::Rgb(0x03, 0x69, 0xa1),
        value: |s| s.spo2,
    },
    Trend {
        title: "Temperature",
        unit: "°C",
        domain: (35.0, 42.0),
        color: Color::Rgb(0xe1, 0x1d, 0x48),
        value: |s| s.temperature,
    },
];

/// Sparkline resolution per unit of the plotted value.
const TREND_SCALE: f64 = 10.0;

/// Bar heights of `trend` over `history`, relative to the bottom of its domain.
fn trend_bars(history: &[VitalsSample], trend: &Trend) -> Vec<u64> {
    let (low, high) = trend.domain;
    history
        .iter()
        .map(|sample| {
            let value = (trend.value)(sample).clamp(low, high);
            ((value - low) * TREND_SCALE).round() as u64
        })
        .collect()
}

/// Centered overlay with one patient's full-size trace and chart.
pub fn render_detail(frame: &mut Frame, area: Rect, patient: &Patient, detail: &PatientDetail) {
    let popup = centered(area, 80, 80);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(patient.status.color()))
        .title(Line::from(Span::styled(
            format!(" {} ", patient.name),
            Style::default().fg(VALUE_FG).add_modifier(Modifier::BOLD),
        )))
        .style(Style::default().bg(CARD_BG));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let [info_area, tabs_area, body_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .areas(inner);

    let info = vec![
        Line::from(Span::styled(
            format!("Room {} • Age {} • {}", patient.room, patient.age, patient.status),
            Style::default().fg(LABEL_FG),
        )),
        Line::from(Span::styled(
            patient.condition.clone(),
            Style::default().fg(VALUE_FG),
        )),
    ];
    frame.render_widget(Paragraph::new(info), info_area);

    let tabs = Tabs::new(DetailTab::ALL.iter().map(|tab| tab.title()))
        .select(detail.tab().index())
        .style(Style::default().fg(LABEL_FG))
        .highlight_style(
            Style::default()
                .fg(VALUE_FG)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        );
    frame.render_widget(tabs, tabs_area);

    match detail.tab() {
        DetailTab::Overview => render_overview(frame, body_area, patient, detail),
        DetailTab::Trends => render_trends(frame, body_area, &detail.chart.history),
        DetailTab::Medications => render_medications(frame, body_area, &detail.chart),
        DetailTab::Notes => render_notes(frame, body_area, detail),
        DetailTab::Insights => render_insights(frame, body_area, &detail.chart),
    }
}

fn render_overview(frame: &mut Frame, area: Rect, patient: &Patient, detail: &PatientDetail) {
    let critical: Vec<Line> = detail
        .chart
        .critical_insights()
        .map(|insight| {
            Line::from(vec![
                Span::styled(
                    format!("{}: ", insight.title),
                    Style::default().fg(insight.priority.color()),
                ),
                Span::styled(insight.description.clone(), Style::default().fg(LABEL_FG)),
            ])
        })
        .collect();

    let [trace_area, vitals_area, alerts_area, insights_area] = Layout::vertical([
        Constraint::Min(6),
        Constraint::Length(3),
        Constraint::Length(patient.alerts.len() as u16 + 1),
        Constraint::Length(critical.len() as u16 + 1),
    ])
    .areas(area);

    card::render_trace(frame, trace_area, detail.card.canvas());
    card::render_vitals(frame, vitals_area, patient);

    let mut alerts = vec![section_title("Alerts")];
    alerts.extend(patient.alerts.iter().map(|alert| {
        Line::from(vec![
            Span::styled(
                format!("[{}] ", alert.kind.label()),
                Style::default().fg(LABEL_FG),
            ),
            Span::styled(
                alert.message.clone(),
                Style::default().fg(alert.priority.color()),
            ),
        ])
    }));
    frame.render_widget(Paragraph::new(alerts), alerts_area);

    let mut insights = vec![section_title("Critical Insights")];
    insights.extend(critical);
    frame.render_widget(Paragraph::new(insights), insights_area);
}

fn render_trends(frame: &mut Frame, area: Rect, history: &[VitalsSample]) {
    let rows = Layout::vertical([Constraint::Ratio(1, 4); 4]).split(area);
    for (row, trend) in rows.iter().zip(TRENDS.iter()) {
        let (low, high) = trend.domain;
        let current = history.last().map(trend.value).unwrap_or(low);
        let title = Line::from(vec![
            Span::styled(format!(" {} ", trend.title), Style::default().fg(LABEL_FG)),
            Span::styled(
                format!("{current:.1} {} ", trend.unit),
                Style::default().fg(VALUE_FG),
            ),
        ]);

        let bars = trend_bars(history, trend);
        let sparkline = Sparkline::default()
            .block(Block::default().borders(Borders::TOP).title(title))
            .data(&bars)
            .max(((high - low) * TREND_SCALE) as u64)
            .style(Style::default().fg(trend.color));
        frame.render_widget(sparkline, *row);
    }
}

fn render_medications(frame: &mut Frame, area: Rect, chart: &PatientChart) {
    let mut lines = vec![section_title("Medication Timeline")];
    for event in &chart.medications {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{}  ", event.at.format("%H:%M")),
                Style::default().fg(LABEL_FG),
            ),
            Span::styled(
                event.medication.clone(),
                Style::default().fg(VALUE_FG).add_modifier(Modifier::BOLD),
            ),
        ]));
        lines.push(Line::from(Span::styled(
            format!(
                "       {} - Administered by {}",
                event.dosage, event.administered_by
            ),
            Style::default().fg(LABEL_FG),
        )));
    }
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_notes(frame: &mut Frame, area: Rect, detail: &PatientDetail) {
    let mut lines = vec![section_title("Clinical Notes")];
    for note in &detail.chart.notes {
        lines.push(Line::from(vec![
            Span::styled(
                format!("[{}] ", note.category.label()),
                Style::default().fg(VALUE_FG),
            ),
            Span::styled(
                note.at.format("%Y-%m-%d %H:%M").to_string(),
                Style::default().fg(LABEL_FG),
            ),
        ]));
        lines.push(Line::from(note.note.clone()));
        lines.push(Line::from(Span::styled(
            format!("Recorded by: {}", note.author),
            Style::default().fg(LABEL_FG),
        )));
        lines.push(Line::default());
    }

    if !detail.rounds.is_empty() {
        lines.push(section_title("Round Notes"));
        for round in &detail.rounds {
            lines.extend(round_lines(round));
        }
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
}

fn render_insights(frame: &mut Frame, area: Rect, chart: &PatientChart) {
    let mut lines = Vec::new();
    for insight in &chart.insights {
        lines.push(Line::from(vec![
            Span::styled(
                format!("[{}] ", insight.kind.label()),
                Style::default().fg(LABEL_FG),
            ),
            Span::styled(
                insight.title.clone(),
                Style::default().fg(VALUE_FG).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {} Priority", insight.priority.label()),
                Style::default().fg(insight.priority.color()),
            ),
        ]));
        lines.push(Line::from(insight.description.clone()));
        lines.push(Line::default());
    }
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
}

/// Lines describing one ward round.
pub fn round_lines(round: &RoundNote) -> Vec<Line<'static>> {
    vec![
        Line::from(vec![
            Span::styled(
                format!("Room {}  ", round.patient_room),
                Style::default().fg(VALUE_FG).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                round.at.format("%Y-%m-%d %H:%M").to_string(),
                Style::default().fg(LABEL_FG),
            ),
        ]),
        Line::from(round.notes.clone()),
        Line::from(vec![
            Span::styled("Outcome: ", Style::default().fg(LABEL_FG)),
            Span::raw(round.outcome.clone()),
        ]),
        Line::from(Span::styled(
            format!("Attendees: {}", round.attendees.join(", ")),
            Style::default().fg(LABEL_FG),
        )),
        Line::default(),
    ]
}

fn section_title(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        title.to_string(),
        Style::default().fg(LABEL_FG).add_modifier(Modifier::BOLD),
    ))
}

fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let width = area.width * percent_x / 100;
    let height = area.height * percent_y / 100;
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patients::chart::vitals_history;
    use crate::patients::rounds::sample_rounds;
    use crate::patients::sample_roster;
    use chrono::NaiveDate;
    use ratatui::backend::TestBackend;

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 2, 22)
            .and_then(|date| date.and_hms_opt(12, 0, 0))
            .unwrap()
    }

    fn rendered(patient: &Patient, detail: &PatientDetail) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 50)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_detail(frame, area, patient, detail);
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_tabs_cycle_both_ways() {
        let mut tab = DetailTab::Overview;
        for _ in 0..DetailTab::ALL.len() {
            tab = tab.next();
        }
        assert_eq!(tab, DetailTab::Overview);
        assert_eq!(DetailTab::Overview.previous(), DetailTab::Insights);
        assert_eq!(DetailTab::Insights.next(), DetailTab::Overview);
    }

    #[test]
    fn test_open_collects_rounds_for_room() {
        let clock = FrameClock::new();
        let roster = sample_roster();

        let sarah = PatientDetail::open(&roster[0], &clock, noon(), &sample_rounds());
        assert_eq!(sarah.rounds.len(), 1);
        assert_eq!(sarah.tab(), DetailTab::Overview);
        assert!(sarah.card().monitor().is_running());

        let michael = PatientDetail::open(&roster[3], &clock, noon(), &sample_rounds());
        assert!(michael.rounds.is_empty());
        assert_eq!(clock.pending(), 2);
    }

    #[test]
    fn test_trend_bars_are_clamped_to_domain() {
        let roster = sample_roster();
        let history = vitals_history(&roster[0], noon());
        let heart_rate = trend_bars(&history, &TRENDS[0]);

        assert_eq!(heart_rate.len(), history.len());
        // 82 bpm ± 5 above a 40 bpm floor
        assert!(heart_rate.iter().all(|&bar| (370..=470).contains(&bar)));

        let mut low = history[0];
        low.spo2 = 60.0;
        assert_eq!(trend_bars(&[low], &TRENDS[2]), vec![0]);
    }

    #[test]
    fn test_overview_shows_critical_insights() {
        let clock = FrameClock::new();
        let roster = sample_roster();
        let detail = PatientDetail::open(&roster[2], &clock, noon(), &sample_rounds());

        let text = rendered(&roster[2], &detail);
        assert!(text.contains("Respiratory distress"));
        assert!(text.contains("[notification] Oxygen saturation dropping"));
        assert!(text.contains("DVT Prevention:"));
        assert!(!text.contains("Fall Risk Assessment"));
    }

    #[test]
    fn test_each_tab_renders_its_records() {
        let clock = FrameClock::new();
        let roster = sample_roster();
        let mut detail = PatientDetail::open(&roster[0], &clock, noon(), &sample_rounds());

        detail.next_tab();
        let text = rendered(&roster[0], &detail);
        assert!(text.contains("Heart Rate"));
        assert!(text.contains("Oxygen Saturation"));

        detail.next_tab();
        let text = rendered(&roster[0], &detail);
        assert!(text.contains("08:30  Morphine"));
        assert!(text.contains("5mg - Administered by Dr. Smith"));

        detail.next_tab();
        let text = rendered(&roster[0], &detail);
        assert!(text.contains("[Assessment] 2024-02-22 09:15"));
        assert!(text.contains("Recorded by: Nurse Chen"));
        assert!(text.contains("Continue current treatment plan"));

        detail.next_tab();
        let text = rendered(&roster[0], &detail);
        assert!(text.contains("Fall Risk Assessment"));
        assert!(text.contains("High Priority"));
        assert!(text.contains("Low Priority"));

        detail.previous_tab();
        assert_eq!(detail.tab(), DetailTab::Notes);
    }
}
