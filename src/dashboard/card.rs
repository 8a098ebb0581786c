//! Patient cards: one ECG monitor per visible patient plus the widgets around it.

use crate::monitor::clock::FrameId;
use crate::monitor::{
    EcgMonitor, FrameClock, MonitorProps, Severity, TraceCanvas, TraceShape, TraceView,
    SURFACE_WIDTH,
};
use crate::patients::Patient;
use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
};

pub const CARD_BG: Color = Color::Rgb(0, 0, 0);
pub const LABEL_FG: Color = Color::Rgb(107, 114, 128);
pub const VALUE_FG: Color = Color::Rgb(255, 255, 255);
const TRACE_BORDER: Color = Color::Rgb(55, 65, 81);

/// Terminal rows of the ECG trace inside its border, per preset.
const COMPACT_TRACE_ROWS: u16 = 2;
const DETAILED_TRACE_ROWS: u16 = 6;

/// A mounted ECG monitor and the canvas it draws on.
pub struct PatientCard {
    patient_id: String,
    monitor: EcgMonitor,
    canvas: TraceCanvas,
}

impl PatientCard {
    /// Creates the card's surface and starts its animation loop.
    pub fn mount(patient: &Patient, compact: bool, clock: &FrameClock) -> Self {
        let shape = TraceShape::new(compact);
        let mut canvas = TraceCanvas::new(SURFACE_WIDTH, shape.height());
        let mut monitor = EcgMonitor::new(MonitorProps::new(patient.status, compact), clock.clone());
        monitor.mount(&mut canvas);

        tracing::debug!(
            "Mounted ECG for patient {} ({}, {})",
            patient.id,
            patient.status,
            if compact { "compact" } else { "detailed" }
        );

        Self {
            patient_id: patient.id.clone(),
            monitor,
            canvas,
        }
    }

    pub fn patient_id(&self) -> &str {
        &self.patient_id
    }

    pub fn monitor(&self) -> &EcgMonitor {
        &self.monitor
    }

    pub fn canvas(&self) -> &TraceCanvas {
        &self.canvas
    }

    /// Switches between presets, restarting the loop when the preset or severity changes.
    pub fn update(&mut self, severity: Severity, compact: bool) {
        let props = MonitorProps::new(severity, compact);
        if props == self.monitor.props() {
            return;
        }
        tracing::debug!(
            "Restarting ECG for patient {} after {} frame(s)",
            self.patient_id,
            self.monitor.frames_drawn().unwrap_or(0)
        );
        self.canvas.resize(SURFACE_WIDTH, TraceShape::new(compact).height());
        self.monitor.set_props(props, &mut self.canvas);
    }

    pub fn on_frame(&mut self, due: &[FrameId]) {
        self.monitor.on_frame(due, &mut self.canvas);
    }
}

/// Terminal height of a card in the grid.
pub fn card_height(patient: &Patient, compact: bool) -> u16 {
    // borders + header + trace box + vitals
    let body = if compact {
        1 + (COMPACT_TRACE_ROWS + 2) + 1
    } else {
        1 + (DETAILED_TRACE_ROWS + 2) + 2
    };
    2 + body + patient.alerts.len() as u16
}

/// Renders a patient card. Its border takes the severity color.
pub fn render_card(
    frame: &mut Frame,
    area: Rect,
    patient: &Patient,
    canvas: &TraceCanvas,
    compact: bool,
    selected: bool,
) {
    let accent = patient.status.color();

    let mut title = vec![Span::styled(
        format!(" {} ", patient.name),
        Style::default().fg(VALUE_FG).add_modifier(Modifier::BOLD),
    )];
    if patient.has_high_priority_alert() {
        title.push(Span::styled("! ", Style::default().fg(Severity::Critical.color())));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(if selected {
            BorderType::Thick
        } else {
            BorderType::Rounded
        })
        .border_style(Style::default().fg(accent))
        .title(Line::from(title))
        .title(Line::from(Span::styled(" ● ", Style::default().fg(accent))).right_aligned())
        .style(Style::default().bg(CARD_BG));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let trace_rows = if compact {
        COMPACT_TRACE_ROWS
    } else {
        DETAILED_TRACE_ROWS
    };
    let vitals_rows = if compact { 1 } else { 2 };

    let [header_area, trace_area, vitals_area, alerts_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(trace_rows + 2),
        Constraint::Length(vitals_rows),
        Constraint::Min(0),
    ])
    .areas(inner);

    let header = Line::from(vec![
        Span::styled(
            format!("Room {} • Age {}", patient.room, patient.age),
            Style::default().fg(LABEL_FG),
        ),
        Span::styled(format!("  {}", patient.condition), Style::default().fg(LABEL_FG)),
    ]);
    frame.render_widget(Paragraph::new(header), header_area);

    render_trace(frame, trace_area, canvas);

    if compact {
        render_vitals_compact(frame, vitals_area, patient);
    } else {
        render_vitals(frame, vitals_area, patient);
    }

    render_alerts(frame, alerts_area, patient);
}

/// Draws a bordered trace box.
pub fn render_trace(frame: &mut Frame, area: Rect, canvas: &TraceCanvas) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(TRACE_BORDER));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(TraceView::new(canvas).background(CARD_BG), inner);
}

/// Four labelled vitals side by side.
pub fn render_vitals(frame: &mut Frame, area: Rect, patient: &Patient) {
    let columns = Layout::horizontal([Constraint::Ratio(1, 4); 4]).split(area);
    for (column, (label, value)) in columns.iter().zip(vital_readings(patient)) {
        let text = vec![
            Line::from(Span::styled(label, Style::default().fg(LABEL_FG))),
            Line::from(Span::styled(
                value,
                Style::default().fg(VALUE_FG).add_modifier(Modifier::BOLD),
            )),
        ];
        frame.render_widget(Paragraph::new(text), *column);
    }
}

fn render_vitals_compact(frame: &mut Frame, area: Rect, patient: &Patient) {
    let spans: Vec<Span> = vital_readings(patient)
        .into_iter()
        .flat_map(|(_, value)| {
            [
                Span::styled(value, Style::default().fg(VALUE_FG)),
                Span::raw("  "),
            ]
        })
        .collect();
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// One line per alert, colored by priority.
pub fn render_alerts(frame: &mut Frame, area: Rect, patient: &Patient) {
    let lines: Vec<Line> = patient
        .alerts
        .iter()
        .map(|alert| {
            Line::from(Span::styled(
                alert.message.clone(),
                Style::default().fg(alert.priority.color()),
            ))
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

/// Label/value pairs for the four vital signs.
pub fn vital_readings(patient: &Patient) -> [(&'static str, String); 4] {
    [
        ("Heart Rate", format!("{} bpm", patient.heart_rate)),
        ("Blood Pressure", format!("{} mmHg", patient.blood_pressure)),
        ("SpO2", format!("{}%", patient.spo2)),
        ("Temperature", format!("{:.1}°C", patient.temperature)),
    ]
}
