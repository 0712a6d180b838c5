//! The single booth screen.
//!
//! Owns every piece of ephemeral view state (focus, per-candidate edit
//! flags, results-panel visibility, inline errors) and translates key
//! events into typed actions; the session itself is only read here, at
//! render time.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::application::BallotSession;
use crate::presentation::widgets::TextInput;

/// Which surface the screen is presenting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoothMode {
    /// Voter name prompt plus admin login.
    Gate,
    /// Candidate list for a confirmed voter.
    Voting,
    /// Transient thank-you view after a cast.
    Interlude,
    /// Admin panel.
    Admin,
}

/// Typed outcome of a key event, applied to the session by the app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoothAction {
    /// Nothing to apply.
    None,
    /// Exit the application.
    Quit,
    /// Submit the entered voter name.
    ConfirmName(String),
    /// Submit the entered admin password.
    AuthenticateAdmin(String),
    /// Select or confirm the candidate at this index (two-phase).
    ChooseCandidate(usize),
    /// Lock the admin panel.
    LockAdmin,
    /// Flip the global voting lock.
    ToggleVotingLock,
    /// Zero all counts and empty the voter log.
    ResetVotes,
    /// Append a placeholder candidate.
    AddCandidate,
    /// Open the inline rename editor for this index.
    BeginEdit(usize),
    /// Commit a rename.
    Rename {
        /// Roster index being renamed.
        index: usize,
        /// New label.
        name: String,
    },
    /// Delete the candidate at this index.
    Remove(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GateFocus {
    Name,
    Password,
}

/// Booth screen view state and key handling.
pub struct BoothScreen {
    mode: BoothMode,
    candidate_count: usize,
    name_input: TextInput,
    password_input: TextInput,
    rename_input: TextInput,
    gate_focus: GateFocus,
    selected: usize,
    editing: Vec<bool>,
    active_edit: Option<usize>,
    show_results: bool,
    error: Option<String>,
}

impl BoothScreen {
    /// Creates the screen at the voter gate.
    #[must_use]
    pub fn new() -> Self {
        let mut name_input = TextInput::new(" Voter Name ").placeholder("Your name...");
        name_input.set_focused(true);
        let password_input = TextInput::new(" Admin Password ")
            .password()
            .placeholder("Password...");
        let rename_input = TextInput::new(" Rename ");

        Self {
            mode: BoothMode::Gate,
            candidate_count: 0,
            name_input,
            password_input,
            rename_input,
            gate_focus: GateFocus::Name,
            selected: 0,
            editing: Vec::new(),
            active_edit: None,
            show_results: false,
            error: None,
        }
    }

    /// Current surface.
    #[must_use]
    pub const fn mode(&self) -> BoothMode {
        self.mode
    }

    /// Currently highlighted candidate row.
    #[must_use]
    pub const fn selected(&self) -> usize {
        self.selected
    }

    /// Inline error, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Sets the inline error line.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    /// Aligns view state with the session after every applied action.
    pub fn refresh(&mut self, mode: BoothMode, candidate_count: usize) {
        if mode != self.mode {
            self.enter_mode(mode);
        }
        if candidate_count != self.candidate_count {
            self.candidate_count = candidate_count;
            self.editing.resize(candidate_count, false);
            if self.active_edit.is_some_and(|i| i >= candidate_count) {
                self.active_edit = None;
            }
        }
        if self.selected >= candidate_count {
            self.selected = candidate_count.saturating_sub(1);
        }
    }

    /// Opens the inline rename editor prefilled with the current label.
    pub fn open_rename(&mut self, index: usize, current_name: &str) {
        if index >= self.candidate_count {
            return;
        }
        self.editing.iter_mut().for_each(|e| *e = false);
        self.editing[index] = true;
        self.active_edit = Some(index);
        self.rename_input.set_value(current_name);
        self.rename_input.set_focused(true);
    }

    fn enter_mode(&mut self, mode: BoothMode) {
        self.mode = mode;
        match mode {
            BoothMode::Gate => {
                self.name_input.clear();
                self.password_input.clear();
                self.set_gate_focus(GateFocus::Name);
            }
            BoothMode::Admin => {
                self.password_input.clear();
                self.editing = vec![false; self.candidate_count];
                self.active_edit = None;
                self.selected = 0;
            }
            BoothMode::Voting | BoothMode::Interlude => {}
        }
    }

    fn set_gate_focus(&mut self, focus: GateFocus) {
        self.gate_focus = focus;
        self.name_input.set_focused(focus == GateFocus::Name);
        self.password_input.set_focused(focus == GateFocus::Password);
    }

    fn close_rename(&mut self) {
        if let Some(index) = self.active_edit.take() {
            if let Some(flag) = self.editing.get_mut(index) {
                *flag = false;
            }
        }
        self.rename_input.clear();
    }

    /// Handles a key press, returning the action to apply.
    pub fn handle_key(&mut self, key: &KeyEvent) -> BoothAction {
        self.error = None;
        match self.mode {
            BoothMode::Gate => self.handle_gate_key(key),
            BoothMode::Voting => self.handle_voting_key(key),
            BoothMode::Interlude => BoothAction::None,
            BoothMode::Admin => self.handle_admin_key(key),
        }
    }

    fn handle_gate_key(&mut self, key: &KeyEvent) -> BoothAction {
        match key.code {
            KeyCode::Esc => return BoothAction::Quit,
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Down | KeyCode::Up => {
                let next = match self.gate_focus {
                    GateFocus::Name => GateFocus::Password,
                    GateFocus::Password => GateFocus::Name,
                };
                self.set_gate_focus(next);
                return BoothAction::None;
            }
            KeyCode::Enter => {
                return match self.gate_focus {
                    GateFocus::Name => {
                        BoothAction::ConfirmName(self.name_input.value().to_string())
                    }
                    GateFocus::Password => {
                        BoothAction::AuthenticateAdmin(self.password_input.value().to_string())
                    }
                };
            }
            _ => {}
        }

        match self.gate_focus {
            GateFocus::Name => self.name_input.handle_key(key),
            GateFocus::Password => self.password_input.handle_key(key),
        };
        BoothAction::None
    }

    fn handle_voting_key(&mut self, key: &KeyEvent) -> BoothAction {
        match key.code {
            KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                BoothAction::None
            }
            KeyCode::Down => {
                if self.selected + 1 < self.candidate_count {
                    self.selected += 1;
                }
                BoothAction::None
            }
            KeyCode::Enter => BoothAction::ChooseCandidate(self.selected),
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                BoothAction::ChooseCandidate(index)
            }
            _ => BoothAction::None,
        }
    }

    fn handle_admin_key(&mut self, key: &KeyEvent) -> BoothAction {
        if let Some(index) = self.active_edit {
            match key.code {
                KeyCode::Enter => {
                    let name = self.rename_input.value().to_string();
                    self.close_rename();
                    return BoothAction::Rename { index, name };
                }
                KeyCode::Esc => {
                    self.close_rename();
                    return BoothAction::None;
                }
                _ => {
                    self.rename_input.handle_key(key);
                    return BoothAction::None;
                }
            }
        }

        match key.code {
            KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                BoothAction::None
            }
            KeyCode::Down => {
                if self.selected + 1 < self.candidate_count {
                    self.selected += 1;
                }
                BoothAction::None
            }
            KeyCode::Char('a') => BoothAction::AddCandidate,
            KeyCode::Char('e') => BoothAction::BeginEdit(self.selected),
            KeyCode::Char('d') | KeyCode::Delete => BoothAction::Remove(self.selected),
            KeyCode::Char('r') => BoothAction::ResetVotes,
            KeyCode::Char('l') => BoothAction::ToggleVotingLock,
            KeyCode::Char('v') => {
                self.show_results = !self.show_results;
                BoothAction::None
            }
            KeyCode::Char('q') | KeyCode::Esc => BoothAction::LockAdmin,
            _ => BoothAction::None,
        }
    }

    /// Renders the whole screen from the session state.
    pub fn render(&self, frame: &mut Frame, session: &BallotSession) {
        let layout = Layout::vertical([
            Constraint::Length(3),
            Constraint::Fill(1),
            Constraint::Length(2),
        ]);
        let [header_area, content_area, footer_area] = layout.areas(frame.area());

        self.render_header(frame, header_area, session);
        match self.mode {
            BoothMode::Gate => self.render_gate(frame, content_area, session),
            BoothMode::Voting | BoothMode::Interlude => {
                self.render_ballot(frame, content_area, session);
            }
            BoothMode::Admin => self.render_admin(frame, content_area, session),
        }
        self.render_footer(frame, footer_area);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect, session: &BallotSession) {
        let mut title = vec![Span::styled(
            " Votebooth ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )];
        if session.is_voting_locked() {
            title.push(Span::styled(
                " [voting locked] ",
                Style::default().fg(Color::Red),
            ));
        }
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(Line::from(title));
        frame.render_widget(block, area);
    }

    fn render_gate(&self, frame: &mut Frame, area: Rect, session: &BallotSession) {
        let vertical = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(12),
            Constraint::Fill(1),
        ]);
        let [_, center, _] = vertical.areas(area);
        let horizontal = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Min(44),
            Constraint::Fill(1),
        ]);
        let [_, column, _] = horizontal.areas(center);

        let rows = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
        ]);
        let [name_title, name_area, warn_area, admin_title, password_area, _] =
            rows.areas(column);

        frame.render_widget(
            Paragraph::new("Enter Voter Name").style(Style::default().fg(Color::White)),
            name_title,
        );
        frame.render_widget(&self.name_input, name_area);

        let typed = self.name_input.value();
        if !typed.trim().is_empty() && session.has_voted(typed.trim()) {
            frame.render_widget(
                Paragraph::new("This name has already voted.")
                    .style(Style::default().fg(Color::Red)),
                warn_area,
            );
        }

        frame.render_widget(
            Paragraph::new("Admin Login").style(Style::default().fg(Color::White)),
            admin_title,
        );
        frame.render_widget(&self.password_input, password_area);
    }

    fn render_ballot(&self, frame: &mut Frame, area: Rect, session: &BallotSession) {
        let rows = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ]);
        let [welcome_area, _, list_area, thanks_area] = rows.areas(area);

        if let Some(voter) = session.flow().voter() {
            frame.render_widget(
                Paragraph::new(format!("Welcome, {voter}"))
                    .style(Style::default().add_modifier(Modifier::BOLD)),
                welcome_area,
            );
        }

        let confirming = session.flow().confirming_index();
        let blinking = session.flow().cast_index();
        let lines: Vec<Line> = session
            .candidates()
            .iter()
            .enumerate()
            .map(|(i, candidate)| {
                let marker = if blinking == Some(i) {
                    Span::styled("● ", Style::default().fg(Color::Green))
                } else {
                    Span::styled("○ ", Style::default().fg(Color::DarkGray))
                };
                let action = if confirming == Some(i) {
                    Span::styled("[Confirm Vote]", Style::default().fg(Color::Yellow))
                } else {
                    Span::styled("[Vote]", Style::default().fg(Color::Blue))
                };
                let mut style = Style::default();
                if self.mode == BoothMode::Voting && i == self.selected {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                Line::from(vec![
                    marker,
                    Span::raw(format!("{:<24} ", candidate.name)),
                    action,
                ])
                .style(style)
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), list_area);

        if self.mode == BoothMode::Interlude {
            frame.render_widget(
                Paragraph::new("Thanks for voting!").style(Style::default().fg(Color::Green)),
                thanks_area,
            );
        }
    }

    fn render_admin(&self, frame: &mut Frame, area: Rect, session: &BallotSession) {
        let rows = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ]);
        let [title_area, _, body_area] = rows.areas(area);

        frame.render_widget(
            Paragraph::new("Admin Panel").style(Style::default().add_modifier(Modifier::BOLD)),
            title_area,
        );

        let list_height = session.candidates().len().max(1).min(usize::from(body_area.height));
        #[allow(clippy::cast_possible_truncation)]
        let body = Layout::vertical([Constraint::Length(list_height as u16 * 3), Constraint::Fill(1)]);
        let [list_area, results_area] = body.areas(body_area);

        self.render_admin_roster(frame, list_area, session);
        if self.show_results {
            self.render_results(frame, results_area, session);
        }
    }

    fn render_admin_roster(&self, frame: &mut Frame, area: Rect, session: &BallotSession) {
        let constraints: Vec<Constraint> = session
            .candidates()
            .iter()
            .map(|_| Constraint::Length(3))
            .collect();
        let row_areas = Layout::vertical(constraints).split(area);

        for (i, candidate) in session.candidates().iter().enumerate() {
            let Some(row) = row_areas.get(i) else { break };
            if self.editing.get(i).copied().unwrap_or(false) {
                frame.render_widget(&self.rename_input, *row);
                continue;
            }

            let selected = i == self.selected;
            let border = if selected {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::Gray)
            };
            let block = Block::default().borders(Borders::ALL).border_style(border);
            let inner = block.inner(*row);
            frame.render_widget(block, *row);
            frame.render_widget(
                Paragraph::new(Line::from(vec![
                    Span::raw(candidate.name.clone()),
                    Span::styled(
                        format!("  ({} votes)", candidate.votes),
                        Style::default().fg(Color::DarkGray),
                    ),
                ])),
                inner,
            );
        }
    }

    fn render_results(&self, frame: &mut Frame, area: Rect, session: &BallotSession) {
        let mut lines = vec![Line::from(Span::styled(
            "Vote Count",
            Style::default().add_modifier(Modifier::BOLD),
        ))];
        for candidate in session.candidates() {
            lines.push(Line::from(format!(
                "  {}: {}",
                candidate.name, candidate.votes
            )));
        }
        lines.push(Line::from(Span::styled(
            session.winner().headline(),
            Style::default().fg(Color::Green),
        )));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Voter Log",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for record in session.voter_log() {
            lines.push(Line::from(format!(
                "  {} voted {} at {}",
                record.name,
                record.voted,
                record.cast_at.format("%H:%M:%S")
            )));
        }
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let line = if let Some(error) = &self.error {
            Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            ))
        } else {
            let hints = match self.mode {
                BoothMode::Gate => "Enter: submit | Tab: switch field | Esc: quit",
                BoothMode::Voting => "↑/↓ or 1-9: pick | Enter: vote, then confirm",
                BoothMode::Interlude => "",
                BoothMode::Admin => {
                    "a: add | e: edit | d: delete | r: reset | l: lock voting | v: results | q: lock admin"
                }
            };
            Line::from(Span::styled(hints, Style::default().fg(Color::DarkGray)))
        };
        frame.render_widget(Paragraph::new(line), area);
    }
}

impl Default for BoothScreen {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(screen: &mut BoothScreen, text: &str) {
        for c in text.chars() {
            screen.handle_key(&key(KeyCode::Char(c)));
        }
    }

    fn screen_with(mode: BoothMode, candidates: usize) -> BoothScreen {
        let mut screen = BoothScreen::new();
        screen.refresh(mode, candidates);
        screen
    }

    #[test]
    fn test_gate_submits_voter_name() {
        let mut screen = screen_with(BoothMode::Gate, 2);
        type_text(&mut screen, "Alice");
        assert_eq!(
            screen.handle_key(&key(KeyCode::Enter)),
            BoothAction::ConfirmName("Alice".to_string())
        );
    }

    #[test]
    fn test_gate_tab_switches_to_password() {
        let mut screen = screen_with(BoothMode::Gate, 2);
        screen.handle_key(&key(KeyCode::Tab));
        type_text(&mut screen, "admin123");
        assert_eq!(
            screen.handle_key(&key(KeyCode::Enter)),
            BoothAction::AuthenticateAdmin("admin123".to_string())
        );
    }

    #[test]
    fn test_gate_escape_quits() {
        let mut screen = screen_with(BoothMode::Gate, 2);
        assert_eq!(screen.handle_key(&key(KeyCode::Esc)), BoothAction::Quit);
    }

    #[test]
    fn test_voting_arrows_and_enter_choose() {
        let mut screen = screen_with(BoothMode::Voting, 3);
        screen.handle_key(&key(KeyCode::Down));
        assert_eq!(screen.selected(), 1);
        assert_eq!(
            screen.handle_key(&key(KeyCode::Enter)),
            BoothAction::ChooseCandidate(1)
        );
    }

    #[test]
    fn test_voting_digit_quick_pick() {
        let mut screen = screen_with(BoothMode::Voting, 3);
        assert_eq!(
            screen.handle_key(&key(KeyCode::Char('3'))),
            BoothAction::ChooseCandidate(2)
        );
    }

    #[test]
    fn test_selection_stays_in_bounds() {
        let mut screen = screen_with(BoothMode::Voting, 2);
        screen.handle_key(&key(KeyCode::Up));
        assert_eq!(screen.selected(), 0);
        screen.handle_key(&key(KeyCode::Down));
        screen.handle_key(&key(KeyCode::Down));
        assert_eq!(screen.selected(), 1);
    }

    #[test]
    fn test_interlude_ignores_keys() {
        let mut screen = screen_with(BoothMode::Interlude, 2);
        assert_eq!(screen.handle_key(&key(KeyCode::Enter)), BoothAction::None);
        assert_eq!(
            screen.handle_key(&key(KeyCode::Char('1'))),
            BoothAction::None
        );
    }

    #[test]
    fn test_admin_keys_map_to_actions() {
        let mut screen = screen_with(BoothMode::Admin, 2);
        assert_eq!(
            screen.handle_key(&key(KeyCode::Char('a'))),
            BoothAction::AddCandidate
        );
        assert_eq!(
            screen.handle_key(&key(KeyCode::Char('d'))),
            BoothAction::Remove(0)
        );
        assert_eq!(
            screen.handle_key(&key(KeyCode::Char('r'))),
            BoothAction::ResetVotes
        );
        assert_eq!(
            screen.handle_key(&key(KeyCode::Char('l'))),
            BoothAction::ToggleVotingLock
        );
        assert_eq!(
            screen.handle_key(&key(KeyCode::Char('q'))),
            BoothAction::LockAdmin
        );
    }

    #[test]
    fn test_admin_rename_flow() {
        let mut screen = screen_with(BoothMode::Admin, 2);
        assert_eq!(
            screen.handle_key(&key(KeyCode::Char('e'))),
            BoothAction::BeginEdit(0)
        );

        screen.open_rename(0, "Candidate A");
        type_text(&mut screen, "!");
        assert_eq!(
            screen.handle_key(&key(KeyCode::Enter)),
            BoothAction::Rename {
                index: 0,
                name: "Candidate A!".to_string()
            }
        );
    }

    #[test]
    fn test_admin_rename_cancel() {
        let mut screen = screen_with(BoothMode::Admin, 2);
        screen.open_rename(1, "Candidate B");
        assert_eq!(screen.handle_key(&key(KeyCode::Esc)), BoothAction::None);
        assert_eq!(
            screen.handle_key(&key(KeyCode::Char('a'))),
            BoothAction::AddCandidate
        );
    }

    #[test]
    fn test_results_toggle_is_view_state() {
        let mut screen = screen_with(BoothMode::Admin, 2);
        assert!(!screen.show_results);
        assert_eq!(
            screen.handle_key(&key(KeyCode::Char('v'))),
            BoothAction::None
        );
        assert!(screen.show_results);
    }

    #[test]
    fn test_entering_admin_resets_edit_flags() {
        let mut screen = screen_with(BoothMode::Gate, 3);
        screen.refresh(BoothMode::Admin, 3);
        assert_eq!(screen.editing, vec![false, false, false]);
        assert!(screen.active_edit.is_none());
    }

    #[test]
    fn test_returning_to_gate_clears_inputs() {
        let mut screen = screen_with(BoothMode::Gate, 2);
        type_text(&mut screen, "Alice");
        screen.refresh(BoothMode::Voting, 2);
        screen.refresh(BoothMode::Gate, 2);
        assert_eq!(
            screen.handle_key(&key(KeyCode::Enter)),
            BoothAction::ConfirmName(String::new())
        );
    }

    #[test]
    fn test_key_press_clears_previous_error() {
        let mut screen = screen_with(BoothMode::Gate, 2);
        screen.set_error("this name has already voted");
        assert!(screen.error().is_some());
        screen.handle_key(&key(KeyCode::Char('x')));
        assert!(screen.error().is_none());
    }

    #[test]
    fn test_refresh_clamps_selection_after_removal() {
        let mut screen = screen_with(BoothMode::Admin, 3);
        screen.handle_key(&key(KeyCode::Down));
        screen.handle_key(&key(KeyCode::Down));
        assert_eq!(screen.selected(), 2);
        screen.refresh(BoothMode::Admin, 2);
        assert_eq!(screen.selected(), 1);
    }
}
