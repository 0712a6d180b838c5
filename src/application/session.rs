//! Ballot session state machine.
//!
//! Owns the candidate roster, the voter log, and all flow state. Every
//! mutation persists through the store port fire-and-forget; store
//! failures are logged and the in-memory state stays authoritative.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::domain::entities::{BallotRecord, Candidate};
use crate::domain::errors::VoteError;
use crate::domain::ports::{BallotStorePort, CredentialPort, FeedbackPort};
use crate::domain::services::{Winner, winner};

/// Phrase announced when the booth is ready for the next voter.
const NEXT_VOTER_PHRASE: &str = "Next!";

/// Voter-facing flow position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoteFlow {
    /// Waiting for a voter name at the identity gate.
    NamePrompt,
    /// Name confirmed; the voter is browsing candidates.
    Selecting {
        /// Confirmed voter name.
        voter: String,
    },
    /// A candidate is selected and awaits a confirming press.
    Confirming {
        /// Confirmed voter name.
        voter: String,
        /// Roster index awaiting confirmation.
        index: usize,
    },
    /// Transient post-cast state shown until the deferred reset fires.
    Cast {
        /// Voter who just cast.
        voter: String,
        /// Roster index that received the vote.
        index: usize,
    },
}

impl VoteFlow {
    /// Index awaiting confirmation, if any.
    #[must_use]
    pub const fn confirming_index(&self) -> Option<usize> {
        match self {
            Self::Confirming { index, .. } => Some(*index),
            _ => None,
        }
    }

    /// Index that just received a vote, if in the transient cast state.
    #[must_use]
    pub const fn cast_index(&self) -> Option<usize> {
        match self {
            Self::Cast { index, .. } => Some(*index),
            _ => None,
        }
    }

    /// Confirmed voter name, if past the gate.
    #[must_use]
    pub fn voter(&self) -> Option<&str> {
        match self {
            Self::NamePrompt => None,
            Self::Selecting { voter }
            | Self::Confirming { voter, .. }
            | Self::Cast { voter, .. } => Some(voter),
        }
    }
}

/// Deferred post-cast reset, tagged with the flow epoch at cast time.
#[derive(Debug, Clone, Copy)]
struct PendingReset {
    fire_at: Instant,
    epoch: u64,
}

/// The single stateful component: candidates, voter log, flow state,
/// and the admin/voting locks, composed with the store, feedback, and
/// credential ports.
pub struct BallotSession {
    candidates: Vec<Candidate>,
    voter_log: Vec<BallotRecord>,
    flow: VoteFlow,
    epoch: u64,
    pending_reset: Option<PendingReset>,
    admin_unlocked: bool,
    voting_locked: bool,
    reset_delay: Duration,
    store: Arc<dyn BallotStorePort>,
    feedback: Arc<dyn FeedbackPort>,
    credentials: Arc<dyn CredentialPort>,
}

impl BallotSession {
    /// Creates a session, restoring both records from the store.
    ///
    /// An absent roster yields the default two candidates; an absent
    /// log yields an empty one.
    #[must_use]
    pub fn new(
        store: Arc<dyn BallotStorePort>,
        feedback: Arc<dyn FeedbackPort>,
        credentials: Arc<dyn CredentialPort>,
        reset_delay: Duration,
    ) -> Self {
        let candidates = store
            .load_candidates()
            .unwrap_or_else(Candidate::default_roster);
        let voter_log = store.load_voter_log().unwrap_or_default();

        let total: u64 = candidates.iter().map(|c| c.votes).sum();
        if total != voter_log.len() as u64 {
            warn!(
                votes = total,
                log_entries = voter_log.len(),
                "Stored vote counts do not match the voter log"
            );
        }

        Self {
            candidates,
            voter_log,
            flow: VoteFlow::NamePrompt,
            epoch: 0,
            pending_reset: None,
            admin_unlocked: false,
            voting_locked: false,
            reset_delay,
            store,
            feedback,
            credentials,
        }
    }

    /// Current candidate roster in display order.
    #[must_use]
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Append-only voter log.
    #[must_use]
    pub fn voter_log(&self) -> &[BallotRecord] {
        &self.voter_log
    }

    /// Current voter-flow position.
    #[must_use]
    pub const fn flow(&self) -> &VoteFlow {
        &self.flow
    }

    /// Whether the admin panel is unlocked.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.admin_unlocked
    }

    /// Whether the global voting lock is set.
    #[must_use]
    pub const fn is_voting_locked(&self) -> bool {
        self.voting_locked
    }

    /// Case-insensitive lookup against the voter log.
    #[must_use]
    pub fn has_voted(&self, name: &str) -> bool {
        self.voter_log.iter().any(|r| r.matches_voter(name))
    }

    /// Tally of the current roster.
    #[must_use]
    pub fn winner(&self) -> Winner {
        winner(&self.candidates)
    }

    /// Confirms a voter name at the identity gate.
    ///
    /// # Errors
    /// Returns `EmptyName` for a blank name and `AlreadyVoted` when the
    /// name appears in the voter log (case-insensitive).
    pub fn confirm_name(&mut self, name: &str) -> Result<(), VoteError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(VoteError::EmptyName);
        }
        if self.has_voted(name) {
            return Err(VoteError::already_voted(name));
        }
        if self.admin_unlocked || self.flow != VoteFlow::NamePrompt {
            debug!("Ignoring name confirmation outside the gate");
            return Ok(());
        }

        self.set_flow(VoteFlow::Selecting {
            voter: name.to_string(),
        });
        Ok(())
    }

    /// Targets a candidate for confirmation.
    ///
    /// The first press on a candidate moves to the confirming state;
    /// a press on a different candidate re-targets it. Out-of-range
    /// indices and presses outside the voter flow are ignored.
    pub fn select_candidate(&mut self, index: usize) {
        if index >= self.candidates.len() {
            return;
        }
        let voter = match &self.flow {
            VoteFlow::Selecting { voter } | VoteFlow::Confirming { voter, .. } => voter.clone(),
            _ => return,
        };
        self.set_flow(VoteFlow::Confirming { voter, index });
    }

    /// Casts the confirmed vote.
    ///
    /// Increments the candidate, appends a voter-log entry, persists
    /// both records, plays the tone, and schedules the deferred flow
    /// reset. Confirmation is single-use: a second cast for the same
    /// confirmation fails.
    ///
    /// # Errors
    /// Returns `VotingLocked` while the global lock is set and
    /// `NotConfirmed` unless `index` matches the pending confirmation.
    pub fn cast_vote(&mut self, index: usize, now: Instant) -> Result<(), VoteError> {
        if self.voting_locked {
            return Err(VoteError::VotingLocked);
        }
        let voter = match &self.flow {
            VoteFlow::Confirming { voter, index: confirming } if *confirming == index => {
                voter.clone()
            }
            _ => return Err(VoteError::NotConfirmed),
        };
        let Some(candidate) = self.candidates.get_mut(index) else {
            return Err(VoteError::NotConfirmed);
        };

        candidate.votes += 1;
        let record = BallotRecord::new(voter.clone(), candidate.name.clone());
        info!(voter = %record.name, candidate = %record.voted, "Vote cast");
        self.voter_log.push(record);

        self.persist_candidates();
        self.persist_voter_log();
        self.feedback.play_tone();

        self.set_flow(VoteFlow::Cast { voter, index });
        self.pending_reset = Some(PendingReset {
            fire_at: now + self.reset_delay,
            epoch: self.epoch,
        });
        Ok(())
    }

    /// Drives the deferred post-cast reset.
    ///
    /// Returns `true` when the reset fired: all transient vote-flow
    /// state is cleared back to the name prompt and the next voter is
    /// announced. A reset scheduled before any later flow transition
    /// is stale and is dropped without firing.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(pending) = self.pending_reset else {
            return false;
        };
        if pending.epoch != self.epoch {
            self.pending_reset = None;
            return false;
        }
        if now < pending.fire_at {
            return false;
        }

        self.pending_reset = None;
        self.set_flow(VoteFlow::NamePrompt);
        self.feedback.announce(NEXT_VOTER_PHRASE);
        true
    }

    /// Unlocks the admin panel.
    ///
    /// While the panel is unlocked the screen shows the admin flow
    /// only; any in-flight voter flow is parked, not discarded.
    ///
    /// # Errors
    /// Returns `IncorrectPassword` when the credential check fails.
    pub fn authenticate_admin(&mut self, password: &str) -> Result<(), VoteError> {
        if !self.credentials.verify(password) {
            warn!("Admin authentication failed");
            return Err(VoteError::IncorrectPassword);
        }
        info!("Admin panel unlocked");
        self.admin_unlocked = true;
        Ok(())
    }

    /// Locks the admin panel, returning to the voter gate.
    pub fn lock_admin(&mut self) {
        if self.admin_unlocked {
            info!("Admin panel locked");
        }
        self.admin_unlocked = false;
    }

    /// Flips the global voting lock. Admin only.
    pub fn toggle_voting_lock(&mut self) {
        if !self.admin_unlocked {
            return;
        }
        self.voting_locked = !self.voting_locked;
        info!(locked = self.voting_locked, "Voting lock toggled");
    }

    /// Appends a candidate with a placeholder name and zero votes.
    /// Admin only.
    pub fn add_candidate(&mut self) {
        if !self.admin_unlocked {
            return;
        }
        let name = Candidate::placeholder_name(self.candidates.len() + 1);
        self.candidates.push(Candidate::new(name));
        self.persist_candidates();
    }

    /// Overwrites a candidate's label, leaving its votes untouched.
    /// Admin only; out-of-range indices are ignored.
    ///
    /// # Errors
    /// Returns `EmptyCandidateName` when the new label is blank.
    pub fn rename_candidate(&mut self, index: usize, new_name: &str) -> Result<(), VoteError> {
        if !self.admin_unlocked {
            return Ok(());
        }
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(VoteError::EmptyCandidateName);
        }
        if let Some(candidate) = self.candidates.get_mut(index) {
            candidate.name = new_name.to_string();
            self.persist_candidates();
        }
        Ok(())
    }

    /// Deletes the candidate at `index`. Admin only.
    ///
    /// Any in-flight confirmation becomes stale: roster indices may
    /// have shifted, so the voter drops back to selecting.
    pub fn remove_candidate(&mut self, index: usize) {
        if !self.admin_unlocked || index >= self.candidates.len() {
            return;
        }
        self.candidates.remove(index);
        if let VoteFlow::Confirming { voter, .. } = &self.flow {
            let voter = voter.clone();
            self.set_flow(VoteFlow::Selecting { voter });
        }
        self.persist_candidates();
    }

    /// Zeroes every vote count and empties the voter log, preserving
    /// candidate names and order. Admin only.
    ///
    /// Also discards any parked voter flow; a pending deferred reset
    /// becomes stale and never fires.
    pub fn reset_all(&mut self) {
        if !self.admin_unlocked {
            return;
        }
        for candidate in &mut self.candidates {
            candidate.votes = 0;
        }
        self.voter_log.clear();
        self.set_flow(VoteFlow::NamePrompt);
        info!("All votes reset");
        self.persist_candidates();
        self.persist_voter_log();
    }

    fn set_flow(&mut self, flow: VoteFlow) {
        self.flow = flow;
        self.epoch = self.epoch.wrapping_add(1);
    }

    fn persist_candidates(&self) {
        if let Err(e) = self.store.save_candidates(&self.candidates) {
            warn!(error = %e, "Failed to persist candidate roster");
        }
    }

    fn persist_voter_log(&self) {
        if let Err(e) = self.store.save_voter_log(&self.voter_log) {
            warn!(error = %e, "Failed to persist voter log");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::mocks::{MockBallotStore, MockCredential, MockFeedback};

    const PASSWORD: &str = "sesame";
    const DELAY: Duration = Duration::from_secs(1);

    fn session() -> (BallotSession, Arc<MockBallotStore>, Arc<MockFeedback>) {
        session_with_store(Arc::new(MockBallotStore::new()))
    }

    fn session_with_store(
        store: Arc<MockBallotStore>,
    ) -> (BallotSession, Arc<MockBallotStore>, Arc<MockFeedback>) {
        let feedback = Arc::new(MockFeedback::new());
        let session = BallotSession::new(
            store.clone(),
            feedback.clone(),
            Arc::new(MockCredential::accepting(PASSWORD)),
            DELAY,
        );
        (session, store, feedback)
    }

    fn unlock_admin(session: &mut BallotSession) {
        session.authenticate_admin(PASSWORD).unwrap();
    }

    fn vote_sum(session: &BallotSession) -> u64 {
        session.candidates().iter().map(|c| c.votes).sum()
    }

    #[test]
    fn test_starts_at_name_prompt_with_default_roster() {
        let (session, _, _) = session();
        assert_eq!(*session.flow(), VoteFlow::NamePrompt);
        assert_eq!(session.candidates().len(), 2);
        assert!(session.voter_log().is_empty());
        assert!(!session.is_admin());
        assert!(!session.is_voting_locked());
    }

    #[test]
    fn test_restores_stored_roster() {
        let store = Arc::new(MockBallotStore::with_candidates(vec![
            Candidate {
                name: "Ada".to_string(),
                votes: 2,
            },
            Candidate::new("Grace"),
        ]));
        let (session, _, _) = session_with_store(store);
        assert_eq!(session.candidates()[0].name, "Ada");
        assert_eq!(session.candidates()[0].votes, 2);
    }

    #[test]
    fn test_confirm_name_rejects_empty() {
        let (mut session, _, _) = session();
        assert_eq!(session.confirm_name("   "), Err(VoteError::EmptyName));
        assert_eq!(*session.flow(), VoteFlow::NamePrompt);
    }

    #[test]
    fn test_confirm_name_enters_selecting() {
        let (mut session, _, _) = session();
        session.confirm_name("Alice").unwrap();
        assert_eq!(session.flow().voter(), Some("Alice"));
    }

    #[test]
    fn test_duplicate_name_cannot_vote_again() {
        let (mut session, _, _) = session();
        session.confirm_name("Alice").unwrap();
        session.select_candidate(0);
        session.cast_vote(0, Instant::now()).unwrap();
        let fired_at = Instant::now() + DELAY;
        assert!(session.tick(fired_at));

        assert_eq!(
            session.confirm_name("ALICE"),
            Err(VoteError::already_voted("ALICE"))
        );
        assert_eq!(*session.flow(), VoteFlow::NamePrompt);
    }

    #[test]
    fn test_cast_without_confirmation_fails() {
        let (mut session, _, _) = session();
        session.confirm_name("Alice").unwrap();
        assert_eq!(
            session.cast_vote(0, Instant::now()),
            Err(VoteError::NotConfirmed)
        );
        assert_eq!(vote_sum(&session), 0);
    }

    #[test]
    fn test_selecting_a_different_candidate_retargets() {
        let (mut session, _, _) = session();
        session.confirm_name("Alice").unwrap();
        session.select_candidate(0);
        session.select_candidate(1);
        assert_eq!(session.flow().confirming_index(), Some(1));

        assert_eq!(
            session.cast_vote(0, Instant::now()),
            Err(VoteError::NotConfirmed)
        );
        session.cast_vote(1, Instant::now()).unwrap();
        assert_eq!(session.candidates()[1].votes, 1);
        assert_eq!(session.candidates()[0].votes, 0);
    }

    #[test]
    fn test_cast_appends_log_and_plays_tone() {
        let (mut session, store, feedback) = session();
        session.confirm_name("Alice").unwrap();
        session.select_candidate(0);
        session.cast_vote(0, Instant::now()).unwrap();

        assert_eq!(session.candidates()[0].votes, 1);
        assert_eq!(session.voter_log().len(), 1);
        assert_eq!(session.voter_log()[0].name, "Alice");
        assert_eq!(session.voter_log()[0].voted, session.candidates()[0].name);
        assert_eq!(feedback.tone_count(), 1);
        assert!(store.candidate_save_count() >= 1);
        assert!(store.voter_log_save_count() >= 1);
    }

    #[test]
    fn test_confirmation_is_single_use() {
        let (mut session, _, _) = session();
        session.confirm_name("Alice").unwrap();
        session.select_candidate(0);
        session.cast_vote(0, Instant::now()).unwrap();
        assert_eq!(
            session.cast_vote(0, Instant::now()),
            Err(VoteError::NotConfirmed)
        );
        assert_eq!(session.candidates()[0].votes, 1);
    }

    #[test]
    fn test_vote_counts_always_match_log_length() {
        let (mut session, _, _) = session();
        for (voter, choice) in [("Alice", 0), ("Bob", 1), ("Carol", 0)] {
            session.confirm_name(voter).unwrap();
            session.select_candidate(choice);
            let now = Instant::now();
            session.cast_vote(choice, now).unwrap();
            assert!(session.tick(now + DELAY));
            assert_eq!(vote_sum(&session), session.voter_log().len() as u64);
        }
        assert_eq!(vote_sum(&session), 3);
    }

    #[test]
    fn test_deferred_reset_fires_only_after_delay() {
        let (mut session, _, feedback) = session();
        session.confirm_name("Alice").unwrap();
        session.select_candidate(0);
        let t0 = Instant::now();
        session.cast_vote(0, t0).unwrap();

        assert!(!session.tick(t0 + DELAY / 2));
        assert!(matches!(session.flow(), VoteFlow::Cast { .. }));

        assert!(session.tick(t0 + DELAY));
        assert_eq!(*session.flow(), VoteFlow::NamePrompt);
        assert_eq!(
            feedback.events(),
            vec!["tone".to_string(), "announce:Next!".to_string()]
        );

        assert!(!session.tick(t0 + DELAY * 2));
    }

    #[test]
    fn test_later_flow_transition_supersedes_pending_reset() {
        let (mut session, _, feedback) = session();
        session.confirm_name("Alice").unwrap();
        session.select_candidate(0);
        let t0 = Instant::now();
        session.cast_vote(0, t0).unwrap();

        unlock_admin(&mut session);
        session.reset_all();
        assert_eq!(*session.flow(), VoteFlow::NamePrompt);

        assert!(!session.tick(t0 + DELAY * 2));
        assert_eq!(feedback.events(), vec!["tone".to_string()]);
    }

    #[test]
    fn test_voting_lock_blocks_every_cast() {
        let (mut session, _, _) = session();
        unlock_admin(&mut session);
        session.toggle_voting_lock();
        session.lock_admin();

        session.confirm_name("Alice").unwrap();
        session.select_candidate(0);
        assert_eq!(
            session.cast_vote(0, Instant::now()),
            Err(VoteError::VotingLocked)
        );
        assert_eq!(vote_sum(&session), 0);
        assert!(session.voter_log().is_empty());
    }

    #[test]
    fn test_unlocking_voting_restores_casting() {
        let (mut session, _, _) = session();
        unlock_admin(&mut session);
        session.toggle_voting_lock();
        session.toggle_voting_lock();
        session.lock_admin();

        session.confirm_name("Alice").unwrap();
        session.select_candidate(0);
        session.cast_vote(0, Instant::now()).unwrap();
        assert_eq!(session.candidates()[0].votes, 1);
    }

    #[test]
    fn test_wrong_password_reports_failure() {
        let (mut session, _, _) = session();
        assert_eq!(
            session.authenticate_admin("guess"),
            Err(VoteError::IncorrectPassword)
        );
        assert!(!session.is_admin());
    }

    #[test]
    fn test_lock_admin_returns_to_gate() {
        let (mut session, _, _) = session();
        unlock_admin(&mut session);
        assert!(session.is_admin());
        session.lock_admin();
        assert!(!session.is_admin());
    }

    #[test]
    fn test_admin_operations_are_noops_without_auth() {
        let (mut session, store, _) = session();
        let roster = session.candidates().to_vec();

        session.add_candidate();
        session.remove_candidate(0);
        session.rename_candidate(0, "Mallory").unwrap();
        session.toggle_voting_lock();
        session.reset_all();

        assert_eq!(session.candidates(), roster.as_slice());
        assert!(!session.is_voting_locked());
        assert_eq!(store.candidate_save_count(), 0);
    }

    #[test]
    fn test_add_candidate_appends_placeholder() {
        let (mut session, store, _) = session();
        unlock_admin(&mut session);
        session.add_candidate();

        assert_eq!(session.candidates().len(), 3);
        assert_eq!(session.candidates()[2].name, "Candidate 3");
        assert_eq!(session.candidates()[2].votes, 0);
        assert_eq!(store.candidate_save_count(), 1);
    }

    #[test]
    fn test_rename_preserves_votes() {
        let store = Arc::new(MockBallotStore::with_candidates(vec![Candidate {
            name: "Ada".to_string(),
            votes: 4,
        }]));
        let (mut session, _, _) = session_with_store(store);
        unlock_admin(&mut session);

        session.rename_candidate(0, "Grace").unwrap();
        assert_eq!(session.candidates()[0].name, "Grace");
        assert_eq!(session.candidates()[0].votes, 4);

        assert_eq!(
            session.rename_candidate(0, "  "),
            Err(VoteError::EmptyCandidateName)
        );
        assert_eq!(session.candidates()[0].name, "Grace");
    }

    #[test]
    fn test_removal_invalidates_pending_confirmation() {
        let (mut session, _, _) = session();
        session.confirm_name("Alice").unwrap();
        session.select_candidate(1);
        assert_eq!(session.flow().confirming_index(), Some(1));

        unlock_admin(&mut session);
        session.remove_candidate(1);
        session.lock_admin();

        assert_eq!(session.candidates().len(), 1);
        assert_eq!(
            *session.flow(),
            VoteFlow::Selecting {
                voter: "Alice".to_string()
            }
        );
        assert_eq!(
            session.cast_vote(1, Instant::now()),
            Err(VoteError::NotConfirmed)
        );
        assert!(session.voter_log().is_empty());
    }

    #[test]
    fn test_reset_all_preserves_names_and_order() {
        let (mut session, store, _) = session();
        session.confirm_name("Alice").unwrap();
        session.select_candidate(0);
        let now = Instant::now();
        session.cast_vote(0, now).unwrap();
        session.tick(now + DELAY);

        unlock_admin(&mut session);
        session.rename_candidate(0, "Ada").unwrap();
        session.reset_all();

        let names: Vec<&str> = session.candidates().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Ada", "Candidate B"]);
        assert!(session.candidates().iter().all(|c| c.votes == 0));
        assert!(session.voter_log().is_empty());
        assert_eq!(store.saved_voter_log(), Some(vec![]));
    }

    #[test]
    fn test_full_voter_scenario() {
        let (mut session, _, _) = session();
        session.confirm_name("Alice").unwrap();
        session.select_candidate(0);
        let t0 = Instant::now();
        session.cast_vote(0, t0).unwrap();

        assert_eq!(session.candidates()[0].votes, 1);
        assert_eq!(session.voter_log().len(), 1);
        assert_eq!(session.voter_log()[0].name, "Alice");
        assert_eq!(session.voter_log()[0].voted, session.candidates()[0].name);

        assert!(session.tick(t0 + DELAY));
        assert_eq!(*session.flow(), VoteFlow::NamePrompt);
    }

    #[test]
    fn test_select_ignores_out_of_range_index() {
        let (mut session, _, _) = session();
        session.confirm_name("Alice").unwrap();
        session.select_candidate(7);
        assert_eq!(session.flow().confirming_index(), None);
    }

    #[test]
    fn test_winner_delegates_to_tally() {
        let store = Arc::new(MockBallotStore::with_candidates(vec![
            Candidate {
                name: "A".to_string(),
                votes: 5,
            },
            Candidate {
                name: "B".to_string(),
                votes: 2,
            },
        ]));
        let (session, _, _) = session_with_store(store);
        assert_eq!(session.winner(), Winner::Sole("A".to_string()));
    }
}
