//! Main application orchestrator.

use std::time::{Duration, Instant};

use crossterm::event::{Event, EventStream, KeyEvent};
use futures_util::StreamExt;
use ratatui::DefaultTerminal;
use tokio::time::interval;
use tracing::info;

use crate::application::{BallotSession, VoteFlow};
use crate::presentation::events::EventHandler;
use crate::presentation::ui::{BoothAction, BoothMode, BoothScreen};

const TICK_RATE: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AppState {
    Running,
    Exiting,
}

/// Owns the session and the screen, and runs the event loop.
pub struct App {
    state: AppState,
    session: BallotSession,
    screen: BoothScreen,
}

impl App {
    /// Creates the app around a restored session.
    #[must_use]
    pub fn new(session: BallotSession) -> Self {
        let mut screen = BoothScreen::new();
        screen.refresh(Self::mode_for(&session), session.candidates().len());

        Self {
            state: AppState::Running,
            session,
            screen,
        }
    }

    /// Runs the event loop until the user quits.
    ///
    /// # Errors
    /// Returns an error if the terminal cannot be drawn to.
    pub async fn run(mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        let mut terminal_events = EventStream::new();
        let mut tick = interval(TICK_RATE);

        terminal.draw(|frame| self.screen.render(frame, &self.session))?;

        while self.state != AppState::Exiting {
            tokio::select! {
                Some(Ok(event)) = terminal_events.next() => {
                    if let Event::Key(key) = event {
                        if EventHandler::is_press(&key) {
                            self.handle_key(&key);
                        }
                    }
                    terminal.draw(|frame| self.screen.render(frame, &self.session))?;
                }

                _ = tick.tick() => {
                    if self.session.tick(Instant::now()) {
                        self.sync_screen();
                        terminal.draw(|frame| self.screen.render(frame, &self.session))?;
                    }
                }
            }
        }

        info!("Application exiting normally");
        Ok(())
    }

    fn handle_key(&mut self, key: &KeyEvent) {
        if EventHandler::is_quit_event(key) {
            self.state = AppState::Exiting;
            return;
        }
        let action = self.screen.handle_key(key);
        self.apply_action(action);
        self.sync_screen();
    }

    fn apply_action(&mut self, action: BoothAction) {
        match action {
            BoothAction::None => {}
            BoothAction::Quit => self.state = AppState::Exiting,
            BoothAction::ConfirmName(name) => {
                if let Err(e) = self.session.confirm_name(&name) {
                    self.screen.set_error(e.to_string());
                }
            }
            BoothAction::AuthenticateAdmin(password) => {
                if let Err(e) = self.session.authenticate_admin(&password) {
                    self.screen.set_error(e.to_string());
                }
            }
            BoothAction::ChooseCandidate(index) => self.choose_candidate(index),
            BoothAction::LockAdmin => self.session.lock_admin(),
            BoothAction::ToggleVotingLock => self.session.toggle_voting_lock(),
            BoothAction::ResetVotes => self.session.reset_all(),
            BoothAction::AddCandidate => self.session.add_candidate(),
            BoothAction::BeginEdit(index) => {
                if let Some(candidate) = self.session.candidates().get(index) {
                    let name = candidate.name.clone();
                    self.screen.open_rename(index, &name);
                }
            }
            BoothAction::Rename { index, name } => {
                if let Err(e) = self.session.rename_candidate(index, &name) {
                    self.screen.set_error(e.to_string());
                }
            }
            BoothAction::Remove(index) => self.session.remove_candidate(index),
        }
    }

    /// Two-phase casting: the first press on a candidate targets it,
    /// the second press on the same candidate casts.
    fn choose_candidate(&mut self, index: usize) {
        if self.session.flow().confirming_index() == Some(index) {
            if let Err(e) = self.session.cast_vote(index, Instant::now()) {
                self.screen.set_error(e.to_string());
            }
        } else {
            self.session.select_candidate(index);
        }
    }

    fn sync_screen(&mut self) {
        self.screen
            .refresh(Self::mode_for(&self.session), self.session.candidates().len());
    }

    fn mode_for(session: &BallotSession) -> BoothMode {
        if session.is_admin() {
            return BoothMode::Admin;
        }
        match session.flow() {
            VoteFlow::NamePrompt => BoothMode::Gate,
            VoteFlow::Selecting { .. } | VoteFlow::Confirming { .. } => BoothMode::Voting,
            VoteFlow::Cast { .. } => BoothMode::Interlude,
        }
    }
}
