//! Terminal dashboard for the patient monitoring view.
//!
//! [`DashboardState`] holds everything the screen shows and reacts to keys; it owns one
//! [`PatientCard`] per visible patient so that every on-screen trace runs its own
//! animation loop. [`Dashboard`] wraps it with the real terminal.

use super::card::{self, PatientCard, CARD_BG, LABEL_FG, VALUE_FG};
use super::detail::{self, PatientDetail};
use super::schedule;
use crate::config::ViewMode;
use crate::monitor::clock::FrameId;
use crate::monitor::FrameClock;
use crate::patients::rounds::{self, RoundNote, ShiftAssignment};
use crate::patients::{self, Patient, SortKey, StatusFilter};
use chrono::{Local, NaiveDateTime};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Paragraph},
};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use tui_input::backend::crossterm::EventHandler;
use tui_input::Input;

const HEADER_FG: Color = Color::Rgb(255, 255, 255);
const HELP_FG: Color = Color::Rgb(100, 100, 100);
const BADGE_BG: Color = Color::Rgb(0xef, 0x44, 0x44);

/// Initial settings for a dashboard session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardOptions {
    pub view: ViewMode,
    pub filter: StatusFilter,
    pub sort: SortKey,
}

/// Top-level screen of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Patient grid with live monitors
    Patients,
    /// Staff shifts and ward round notes
    Schedule,
}

/// Outcome of handling one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardCommand {
    Continue,
    Quit,
}

/// Screen state independent of the terminal.
pub struct DashboardState {
    roster: Vec<Patient>,
    view: ViewMode,
    filter: StatusFilter,
    sort: SortKey,
    search: Input,
    searching: bool,
    selected: usize,
    screen: Screen,
    cards: Vec<PatientCard>,
    detail: Option<PatientDetail>,
    shifts: Vec<ShiftAssignment>,
    ward_rounds: Vec<RoundNote>,
    clock: FrameClock,
}

impl DashboardState {
    pub fn new(roster: Vec<Patient>, options: DashboardOptions, clock: FrameClock) -> Self {
        let mut state = Self {
            roster,
            view: options.view,
            filter: options.filter,
            sort: options.sort,
            search: Input::default(),
            searching: false,
            selected: 0,
            screen: Screen::Patients,
            cards: Vec::new(),
            detail: None,
            shifts: rounds::sample_shifts(),
            ward_rounds: rounds::sample_rounds(),
            clock,
        };
        state.sync_cards();
        state
    }

    /// Patients currently on screen, in display order.
    pub fn visible(&self) -> Vec<&Patient> {
        patients::select(&self.roster, self.filter, self.search.value(), self.sort)
    }

    pub fn cards(&self) -> &[PatientCard] {
        &self.cards
    }

    #[cfg(test)]
    pub fn detail(&self) -> Option<&PatientDetail> {
        self.detail.as_ref()
    }

    #[cfg(test)]
    pub fn view(&self) -> ViewMode {
        self.view
    }

    #[cfg(test)]
    pub fn selected(&self) -> usize {
        self.selected
    }

    #[cfg(test)]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Number of cards, including the detail overlay, with a live animation loop.
    pub fn running_monitors(&self) -> usize {
        self.cards
            .iter()
            .chain(self.detail.as_ref().map(PatientDetail::card))
            .filter(|card| card.monitor().is_running())
            .count()
    }

    /// Runs the animation step of every card whose frame fired.
    pub fn advance(&mut self, due: &[FrameId]) {
        for card in &mut self.cards {
            card.on_frame(due);
        }
        if let Some(detail) = self.detail.as_mut() {
            detail.on_frame(due);
        }
    }

    /// Switches screens. Leaving the patient grid unmounts every monitor.
    fn show(&mut self, screen: Screen) {
        if screen == self.screen {
            return;
        }
        tracing::info!("Switching to {screen:?} screen");
        self.screen = screen;
        match screen {
            Screen::Patients => self.sync_cards(),
            Screen::Schedule => {
                self.detail = None;
                self.cards.clear();
            }
        }
    }

    /// Makes the mounted cards match the visible patients.
    ///
    /// Cards of patients that stay visible keep their running loop; cards of patients
    /// that disappear are dropped, which cancels their scheduled frame.
    fn sync_cards(&mut self) {
        let compact = self.view.is_compact();
        let visible: Vec<(String, crate::monitor::Severity)> = self
            .visible()
            .iter()
            .map(|p| (p.id.clone(), p.status))
            .collect();

        let mut previous = std::mem::take(&mut self.cards);
        for (id, status) in &visible {
            let card = match previous.iter().position(|c| c.patient_id() == id) {
                Some(index) => {
                    let mut card = previous.swap_remove(index);
                    card.update(*status, compact);
                    card
                }
                None => match self.roster.iter().find(|p| &p.id == id) {
                    Some(patient) => PatientCard::mount(patient, compact, &self.clock),
                    None => continue,
                },
            };
            self.cards.push(card);
        }

        if !previous.is_empty() {
            tracing::debug!("Unmounting {} ECG monitor(s)", previous.len());
        }
        drop(previous);

        self.selected = self.selected.min(self.cards.len().saturating_sub(1));
    }

    /// Handles one key press.
    pub fn handle_key(&mut self, key: KeyEvent) -> DashboardCommand {
        if key.kind != KeyEventKind::Press {
            return DashboardCommand::Continue;
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            tracing::debug!("Ctrl+C pressed: quitting dashboard");
            return DashboardCommand::Quit;
        }

        if self.searching {
            self.handle_search_key(key);
            return DashboardCommand::Continue;
        }

        if let Some(detail) = self.detail.as_mut() {
            match key.code {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => {
                    tracing::debug!("Closing patient detail");
                    self.detail = None;
                }
                KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => detail.next_tab(),
                KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => detail.previous_tab(),
                _ => {}
            }
            return DashboardCommand::Continue;
        }

        if self.screen == Screen::Schedule {
            match key.code {
                KeyCode::Char('q') => return DashboardCommand::Quit,
                KeyCode::Esc | KeyCode::Char('r') => self.show(Screen::Patients),
                _ => {}
            }
            return DashboardCommand::Continue;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                tracing::debug!("Quit requested");
                return DashboardCommand::Quit;
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.cards.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Enter => self.open_detail(),
            KeyCode::Char('v') => {
                self.view = self.view.toggle();
                tracing::info!("View mode: {}", self.view);
                self.sync_cards();
            }
            KeyCode::Char('f') => {
                self.filter = self.filter.next();
                tracing::info!("Status filter: {}", self.filter.label());
                self.sync_cards();
            }
            KeyCode::Char('s') => {
                self.sort = self.sort.next();
                tracing::info!("Sort order: {}", self.sort.label());
                self.sync_cards();
            }
            KeyCode::Char('/') => self.searching = true,
            KeyCode::Char('r') => self.show(Screen::Schedule),
            _ => {}
        }
        DashboardCommand::Continue
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Esc => self.searching = false,
            _ => {
                if self.search.handle_event(&Event::Key(key)).is_some() {
                    self.sync_cards();
                }
            }
        }
    }

    fn open_detail(&mut self) {
        let Some(id) = self.cards.get(self.selected).map(|c| c.patient_id().to_string()) else {
            return;
        };
        if let Some(patient) = self.roster.iter().find(|p| p.id == id) {
            tracing::debug!("Opening detail for patient {}", patient.id);
            self.detail = Some(PatientDetail::open(
                patient,
                &self.clock,
                Local::now().naive_local(),
                &self.ward_rounds,
            ));
        }
    }

    fn patient(&self, id: &str) -> Option<&Patient> {
        self.roster.iter().find(|p| p.id == id)
    }

    /// Draws the whole screen.
    pub fn render(&self, frame: &mut Frame) {
        self.render_at(frame, Local::now().naive_local());
    }

    fn render_at(&self, frame: &mut Frame, now: NaiveDateTime) {
        let area = frame.area();
        frame.render_widget(Block::default().style(Style::default().bg(CARD_BG)), area);

        if self.screen == Screen::Schedule {
            let [body_area, help_area] =
                Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);
            schedule::render_schedule(frame, body_area, &self.shifts, &self.ward_rounds, now);
            render_help(frame, help_area, "r/Esc back to patients, q quit");
            return;
        }

        let [header_area, toolbar_area, grid_area, help_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(area);

        self.render_header(frame, header_area);
        self.render_toolbar(frame, toolbar_area);
        self.render_grid(frame, grid_area);

        let help = if self.searching {
            "type to search, Enter/Esc done"
        } else if self.detail.is_some() {
            "←→/Tab switch tab, Esc close"
        } else {
            "↑↓ select, Enter details, v view, f filter, s sort, / search, r rounds, q quit"
        };
        render_help(frame, help_area, help);

        if let Some(open) = &self.detail {
            if let Some(patient) = self.patient(open.card().patient_id()) {
                detail::render_detail(frame, area, patient, open);
            }
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let alerts = patients::high_priority_count(&self.roster);
        let mut spans = vec![
            Span::styled(
                " Patient Monitoring ",
                Style::default().fg(HEADER_FG).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "Real-time vital signs monitoring for ICU patients ",
                Style::default().fg(LABEL_FG),
            ),
        ];
        if alerts > 0 {
            spans.push(Span::styled(
                format!(" {alerts} "),
                Style::default().fg(HEADER_FG).bg(BADGE_BG),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_toolbar(&self, frame: &mut Frame, area: Rect) {
        let search_label = " Search: ";
        let line = Line::from(vec![
            Span::styled(" Sort: ", Style::default().fg(LABEL_FG)),
            Span::styled(self.sort.label(), Style::default().fg(VALUE_FG)),
            Span::styled("  Filter: ", Style::default().fg(LABEL_FG)),
            Span::styled(self.filter.label(), Style::default().fg(VALUE_FG)),
            Span::styled("  View: ", Style::default().fg(LABEL_FG)),
            Span::styled(self.view.to_string(), Style::default().fg(VALUE_FG)),
            Span::styled(format!("  {search_label}"), Style::default().fg(LABEL_FG)),
            Span::styled(self.search.value(), Style::default().fg(VALUE_FG)),
        ]);
        let prefix_width = line.width() - self.search.value().chars().count();
        frame.render_widget(Paragraph::new(line), area);

        if self.searching {
            let x = area.x + (prefix_width + self.search.visual_cursor()) as u16;
            frame.set_cursor_position(Position::new(x.min(area.right().saturating_sub(1)), area.y));
        }
    }

    fn render_grid(&self, frame: &mut Frame, area: Rect) {
        let visible = self.visible();
        if visible.is_empty() {
            frame.render_widget(
                Paragraph::new("No patients match the current filter.")
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(LABEL_FG)),
                area,
            );
            return;
        }

        let compact = self.view.is_compact();
        let columns = grid_columns(self.view);
        let row_height = visible
            .iter()
            .map(|p| card::card_height(p, compact))
            .max()
            .unwrap_or(1);

        let rows_fit = (area.height / row_height).max(1) as usize;
        let selected_row = self.selected / columns;
        let first_row = selected_row.saturating_sub(rows_fit - 1);

        for (index, (patient, mounted)) in visible.iter().zip(&self.cards).enumerate() {
            let row = index / columns;
            if row < first_row || row >= first_row + rows_fit {
                continue;
            }
            let column = (index % columns) as u16;
            let width = area.width / columns as u16;
            let cell = Rect {
                x: area.x + column * width,
                y: area.y + (row - first_row) as u16 * row_height,
                width,
                height: row_height,
            }
            .intersection(area);

            card::render_card(
                frame,
                cell,
                patient,
                mounted.canvas(),
                compact,
                index == self.selected,
            );
        }
    }
}

/// Cards per grid row.
fn grid_columns(view: ViewMode) -> usize {
    match view {
        ViewMode::Compact => 3,
        ViewMode::Detailed => 2,
    }
}

fn render_help(frame: &mut Frame, area: Rect, help: &str) {
    frame.render_widget(
        Paragraph::new(help)
            .alignment(Alignment::Center)
            .style(Style::default().fg(HELP_FG)),
        area,
    );
}

/// Paces clock ticks to the refresh interval, independent of how often input wakes
/// the loop.
#[derive(Debug)]
struct RefreshTimer {
    interval: Duration,
    last_refresh: Option<Instant>,
}

impl RefreshTimer {
    fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_refresh: None,
        }
    }

    /// Whether a refresh is due at `now`. Starts the next interval when it is.
    fn is_due(&mut self, now: Instant) -> bool {
        let due = match self.last_refresh {
            Some(last) => now.duration_since(last) >= self.interval,
            None => true,
        };
        if due {
            self.last_refresh = Some(now);
        }
        due
    }

    /// Time left until the next refresh.
    fn remaining(&self, now: Instant) -> Duration {
        self.last_refresh.map_or(Duration::ZERO, |last| {
            self.interval.saturating_sub(now.duration_since(last))
        })
    }
}

/// Full-screen dashboard bound to the real terminal.
pub struct Dashboard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    state: DashboardState,
    clock: FrameClock,
    refresh: RefreshTimer,
    cleaned_up: bool,
}

impl Dashboard {
    /// Enters the alternate screen and mounts the initial cards.
    ///
    /// # Errors
    /// - If the terminal cannot be initialized
    pub fn new(
        roster: Vec<Patient>,
        options: DashboardOptions,
        frame_interval: Duration,
    ) -> anyhow::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;

        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        let clock = FrameClock::new();
        let state = DashboardState::new(roster, options, clock.clone());

        Ok(Self {
            terminal,
            state,
            clock,
            refresh: RefreshTimer::new(frame_interval),
            cleaned_up: false,
        })
    }

    /// Runs the frame loop until the user quits.
    ///
    /// The clock ticks once per refresh interval. Input is handled as it arrives and
    /// redraws the screen without advancing the traces.
    ///
    /// # Errors
    /// - If drawing or input polling fails
    pub fn run(&mut self) -> anyhow::Result<()> {
        tracing::info!(
            "Dashboard started with {} visible patient(s)",
            self.state.cards().len()
        );

        loop {
            if self.refresh.is_due(Instant::now()) {
                let due = self.clock.tick();
                self.state.advance(&due);

                if self.clock.ticks() % 600 == 0 {
                    tracing::trace!(
                        "{} running monitor(s), {} frame(s) pending",
                        self.state.running_monitors(),
                        self.clock.pending()
                    );
                }
            }

            let state = &self.state;
            self.terminal.draw(|frame| state.render(frame))?;

            if event::poll(self.refresh.remaining(Instant::now()))? {
                if let Event::Key(key) = event::read()? {
                    if self.state.handle_key(key) == DashboardCommand::Quit {
                        break;
                    }
                }
            }
        }

        tracing::info!("Dashboard closed");
        Ok(())
    }

    /// Restores the terminal. Safe to call more than once.
    ///
    /// # Errors
    /// - If raw mode cannot be disabled or the alternate screen left
    pub fn cleanup(&mut self) -> anyhow::Result<()> {
        if self.cleaned_up {
            return Ok(());
        }
        self.cleaned_up = true;

        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for Dashboard {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::detail::DetailTab;
    use crate::patients::sample_roster;
    use chrono::NaiveDate;
    use ratatui::backend::TestBackend;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn state_with(view: ViewMode) -> (DashboardState, FrameClock) {
        let clock = FrameClock::new();
        let options = DashboardOptions {
            view,
            filter: StatusFilter::All,
            sort: SortKey::Name,
        };
        (DashboardState::new(sample_roster(), options, clock.clone()), clock)
    }

    fn card_ids(state: &DashboardState) -> Vec<String> {
        state.cards().iter().map(|c| c.patient_id().to_string()).collect()
    }

    #[test]
    fn test_one_loop_per_visible_card() {
        let (state, clock) = state_with(ViewMode::Detailed);
        assert_eq!(state.cards().len(), 5);
        assert_eq!(clock.pending(), 5);
        // Sorted by name: Emily, Lisa, Michael, Robert, Sarah
        assert_eq!(card_ids(&state), vec!["3", "5", "4", "2", "1"]);
    }

    #[test]
    fn test_filter_unmounts_hidden_cards() {
        let (mut state, clock) = state_with(ViewMode::Detailed);

        state.handle_key(key(KeyCode::Char('f'))); // stable
        assert_eq!(card_ids(&state), vec!["4", "1"]);
        assert_eq!(clock.pending(), 2);

        state.handle_key(key(KeyCode::Char('f'))); // warning
        state.handle_key(key(KeyCode::Char('f'))); // critical
        assert_eq!(card_ids(&state), vec!["3"]);
        assert_eq!(clock.pending(), 1);
    }

    #[test]
    fn test_surviving_cards_keep_their_loop() {
        let (mut state, clock) = state_with(ViewMode::Detailed);
        for _ in 0..3 {
            let due = clock.tick();
            state.advance(&due);
        }
        state.handle_key(key(KeyCode::Char('s'))); // sort by room

        assert_eq!(card_ids(&state), vec!["1", "2", "3", "4", "5"]);
        assert!(state
            .cards()
            .iter()
            .all(|c| c.monitor().offset() == Some(4)));
        assert_eq!(clock.pending(), 5);
    }

    #[test]
    fn test_view_toggle_restarts_every_loop() {
        let (mut state, clock) = state_with(ViewMode::Detailed);
        let due = clock.tick();
        state.advance(&due);

        state.handle_key(key(KeyCode::Char('v')));
        assert_eq!(state.view(), ViewMode::Compact);
        for card in state.cards() {
            assert_eq!(card.monitor().offset(), Some(1));
            assert!(card.monitor().props().compact);
        }
        assert_eq!(clock.pending(), 5);
    }

    #[test]
    fn test_search_narrows_cards() {
        let (mut state, clock) = state_with(ViewMode::Detailed);
        state.handle_key(key(KeyCode::Char('/')));
        for c in "icu-102".chars() {
            state.handle_key(key(KeyCode::Char(c)));
        }
        assert_eq!(card_ids(&state), vec!["2"]);
        assert_eq!(clock.pending(), 1);

        // Keys go to the search box while searching
        state.handle_key(key(KeyCode::Char('q')));
        assert!(state.cards().is_empty());

        state.handle_key(key(KeyCode::Backspace));
        state.handle_key(key(KeyCode::Enter));
        assert_eq!(card_ids(&state), vec!["2"]);
        assert_eq!(
            state.handle_key(key(KeyCode::Char('q'))),
            DashboardCommand::Quit
        );
    }

    #[test]
    fn test_detail_has_its_own_loop() {
        let (mut state, clock) = state_with(ViewMode::Compact);
        state.handle_key(key(KeyCode::Down));
        state.handle_key(key(KeyCode::Enter));

        let detail = state.detail().unwrap().card();
        assert_eq!(detail.patient_id(), "5");
        assert!(!detail.monitor().props().compact);
        assert_eq!(clock.pending(), 6);

        // Esc closes the detail instead of quitting
        assert_eq!(
            state.handle_key(key(KeyCode::Esc)),
            DashboardCommand::Continue
        );
        assert!(state.detail().is_none());
        assert_eq!(clock.pending(), 5);
    }

    #[test]
    fn test_detail_tab_keys() {
        let (mut state, _clock) = state_with(ViewMode::Detailed);
        state.handle_key(key(KeyCode::Enter));

        state.handle_key(key(KeyCode::Tab));
        state.handle_key(key(KeyCode::Right));
        assert_eq!(state.detail().unwrap().tab(), DetailTab::Medications);

        state.handle_key(key(KeyCode::BackTab));
        assert_eq!(state.detail().unwrap().tab(), DetailTab::Trends);

        // Navigation keys stay inside the overlay
        state.handle_key(key(KeyCode::Char('f')));
        assert_eq!(state.cards().len(), 5);
    }

    #[test]
    fn test_schedule_screen_releases_monitors() {
        let (mut state, clock) = state_with(ViewMode::Detailed);
        state.handle_key(key(KeyCode::Enter));
        assert_eq!(clock.pending(), 6);

        state.handle_key(key(KeyCode::Esc));
        state.handle_key(key(KeyCode::Char('r')));
        assert_eq!(state.screen(), Screen::Schedule);
        assert!(state.cards().is_empty());
        assert_eq!(clock.pending(), 0);
        assert_eq!(state.running_monitors(), 0);

        state.handle_key(key(KeyCode::Esc));
        assert_eq!(state.screen(), Screen::Patients);
        assert_eq!(clock.pending(), 5);
        assert!(state
            .cards()
            .iter()
            .all(|c| c.monitor().offset() == Some(1)));
    }

    #[test]
    fn test_quit_from_schedule_screen() {
        let (mut state, _clock) = state_with(ViewMode::Detailed);
        state.handle_key(key(KeyCode::Char('r')));
        assert_eq!(
            state.handle_key(key(KeyCode::Char('q'))),
            DashboardCommand::Quit
        );
    }

    #[test]
    fn test_render_schedule_screen() {
        let (mut state, _clock) = state_with(ViewMode::Detailed);
        state.handle_key(key(KeyCode::Char('r')));

        let now = NaiveDate::from_ymd_opt(2024, 2, 22)
            .and_then(|date| date.and_hms_opt(10, 0, 0))
            .unwrap();
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|frame| state.render_at(frame, now)).unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Staff Schedule"));
        assert!(text.contains("Danielle Hawk"));
        assert!(text.contains("r/Esc back to patients"));
        assert!(!text.contains("Emily Davis"));
    }

    #[test]
    fn test_refresh_timer_paces_ticks() {
        let start = Instant::now();
        let interval = Duration::from_millis(16);
        let mut timer = RefreshTimer::new(interval);

        assert_eq!(timer.remaining(start), Duration::ZERO);
        assert!(timer.is_due(start));

        // Input arriving early must not fire another refresh
        let early = start + Duration::from_millis(5);
        assert!(!timer.is_due(early));
        assert!(!timer.is_due(early));
        assert_eq!(timer.remaining(early), Duration::from_millis(11));

        assert!(timer.is_due(start + interval));
        assert!(!timer.is_due(start + interval + Duration::from_millis(1)));
    }

    #[test]
    fn test_refresh_timer_does_not_burst_after_stall() {
        let start = Instant::now();
        let interval = Duration::from_millis(16);
        let mut timer = RefreshTimer::new(interval);
        assert!(timer.is_due(start));

        let late = start + Duration::from_millis(100);
        assert!(timer.is_due(late));
        assert!(!timer.is_due(late + Duration::from_millis(1)));
        assert_eq!(timer.remaining(late), interval);
    }

    #[test]
    fn test_selection_is_clamped() {
        let (mut state, _clock) = state_with(ViewMode::Detailed);
        for _ in 0..10 {
            state.handle_key(key(KeyCode::Char('j')));
        }
        assert_eq!(state.selected(), 4);

        state.handle_key(key(KeyCode::Char('f'))); // stable: two cards
        assert_eq!(state.selected(), 1);
    }

    #[test]
    fn test_ctrl_c_quits_from_search() {
        let (mut state, _clock) = state_with(ViewMode::Detailed);
        state.handle_key(key(KeyCode::Char('/')));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(state.handle_key(ctrl_c), DashboardCommand::Quit);
    }

    #[test]
    fn test_dropping_state_cancels_all_frames() {
        let (mut state, clock) = state_with(ViewMode::Detailed);
        state.handle_key(key(KeyCode::Enter));
        assert_eq!(clock.pending(), 6);
        assert_eq!(state.running_monitors(), 6);
        drop(state);
        assert_eq!(clock.pending(), 0);
    }

    #[test]
    fn test_render_shows_cards_and_badge() {
        let (state, _clock) = state_with(ViewMode::Compact);
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|frame| state.render(frame)).unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Patient Monitoring"));
        assert!(text.contains("Emily Davis"));
        assert!(text.contains("Sarah Johnson"));
        assert!(text.contains(" 2 "));
    }

    #[test]
    fn test_render_empty_selection() {
        let (mut state, _clock) = state_with(ViewMode::Detailed);
        state.handle_key(key(KeyCode::Char('/')));
        state.handle_key(key(KeyCode::Char('z')));

        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal.draw(|frame| state.render(frame)).unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("No patients match"));
    }

    #[test]
    fn test_render_detail_overlay() {
        let (mut state, _clock) = state_with(ViewMode::Detailed);
        state.handle_key(key(KeyCode::Enter));

        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|frame| state.render(frame)).unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Respiratory distress"));
        assert!(text.contains("[notification] Oxygen saturation dropping"));
    }
}
