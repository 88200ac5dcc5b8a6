//! The `VoteLedger` service: resolves vote intents into atomic mutations.
//!
//! Each cast reads the voter's current state, resolves the transition with
//! the state machine, and hands the repository one [`VoteChange`] to apply
//! transactionally. A conflict means another mutation of the same
//! (voter, target) key won the race; the ledger re-reads and retries up to
//! a bounded number of attempts. Every storage round-trip is wrapped in a
//! timeout; a timed-out transaction is dropped uncommitted.
use std::sync::Arc;
use std::time::Duration;

use agora_repository::{RepositoryError, VoteRepository};
use agora_shared::types::{TargetRef, VoteChange, VoteCounts, VoteValue};
use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::errors::LedgerError;
use crate::machine;

/// Default bound on conflict retries before surfacing `Conflict`.
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 3;

/// Default timeout for a single vote transaction.
pub const DEFAULT_TX_TIMEOUT: Duration = Duration::from_secs(5);

/// The authoritative vote ledger service.
///
/// Owns the toggle state machine and the retry policy; all ledger rows and
/// counter mutations flow through here.
pub struct VoteLedger {
    repository: Arc<dyn VoteRepository>,
    retry_attempts: u32,
    tx_timeout: Duration,
}

impl VoteLedger {
    /// Creates a ledger with the default retry bound and timeout.
    pub fn new(repository: Arc<dyn VoteRepository>) -> Self {
        Self::with_policy(repository, DEFAULT_RETRY_ATTEMPTS, DEFAULT_TX_TIMEOUT)
    }

    /// Creates a ledger with an explicit retry bound and timeout.
    pub fn with_policy(
        repository: Arc<dyn VoteRepository>,
        retry_attempts: u32,
        tx_timeout: Duration,
    ) -> Self {
        Self { repository, retry_attempts, tx_timeout }
    }

    /// Casts a vote, toggling it off when the requested polarity is already
    /// held. Returns the target's counters after the mutation committed.
    pub async fn cast_vote(
        &self,
        voter_id: Uuid,
        target: TargetRef,
        requested: VoteValue,
    ) -> Result<VoteCounts, LedgerError> {
        self.check_preconditions(voter_id, target).await?;

        let mut current = self.repository.get_vote(voter_id, target).await?;
        for attempt in 0..self.retry_attempts {
            let change = machine::transition(current, requested);
            match self.apply(voter_id, target, change).await {
                Ok(counts) => return Ok(counts),
                Err(LedgerError::Conflict) => {
                    debug!(
                        voter = %voter_id,
                        target_id = %target.id,
                        attempt,
                        "vote conflicted with a concurrent mutation, re-reading"
                    );
                    current = self.repository.get_vote(voter_id, target).await?;
                    // The racing mutation was our own twin if the ledger now
                    // already holds the requested polarity; the intent is
                    // satisfied, so report success instead of toggling it
                    // back off.
                    if current == Some(requested) {
                        return self.current_counts(target).await;
                    }
                }
                Err(other) => return Err(other),
            }
        }

        warn!(
            voter = %voter_id,
            target_id = %target.id,
            attempts = self.retry_attempts,
            "vote retries exhausted"
        );
        Err(LedgerError::Conflict)
    }

    /// Unconditionally retracts any current vote. A no-op returning the
    /// current counters when no vote exists.
    pub async fn remove_vote(
        &self,
        voter_id: Uuid,
        target: TargetRef,
    ) -> Result<VoteCounts, LedgerError> {
        self.check_preconditions(voter_id, target).await?;

        for attempt in 0..self.retry_attempts {
            let current = self.repository.get_vote(voter_id, target).await?;
            let Some(change) = machine::retraction(current) else {
                return self.current_counts(target).await;
            };
            match self.apply(voter_id, target, change).await {
                Ok(counts) => return Ok(counts),
                Err(LedgerError::Conflict) => {
                    debug!(
                        voter = %voter_id,
                        target_id = %target.id,
                        attempt,
                        "retraction conflicted with a concurrent mutation, re-reading"
                    );
                }
                Err(other) => return Err(other),
            }
        }
        Err(LedgerError::Conflict)
    }

    /// Applies one resolved change with the transaction timeout.
    async fn apply(
        &self,
        voter_id: Uuid,
        target: TargetRef,
        change: VoteChange,
    ) -> Result<VoteCounts, LedgerError> {
        let applied =
            tokio::time::timeout(self.tx_timeout, self.repository.apply_vote(voter_id, target, change))
                .await
                .map_err(|_| LedgerError::Timeout(self.tx_timeout))?;
        applied.map_err(|err| {
            if let RepositoryError::CounterUnderflow(target_id) = &err {
                // Ledger/counter drift: retries cannot fix this, so make it
                // impossible to miss in the logs.
                error!(target_id = %target_id, "vote counter underflow, ledger and counters diverged");
            }
            LedgerError::from(err)
        })
    }

    /// Verifies voter and target exist and the target is not soft-deleted.
    async fn check_preconditions(
        &self,
        voter_id: Uuid,
        target: TargetRef,
    ) -> Result<(), LedgerError> {
        if !self.repository.voter_exists(voter_id).await? {
            return Err(LedgerError::NotFound);
        }
        if self.repository.counts(target).await?.is_none() {
            return Err(LedgerError::NotFound);
        }
        Ok(())
    }

    async fn current_counts(&self, target: TargetRef) -> Result<VoteCounts, LedgerError> {
        self.repository.counts(target).await?.ok_or(LedgerError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_shared::types::{LedgerWrite, TargetKind};
    use std::sync::Mutex;

    /// In-memory vote store that can be primed to lose a number of races
    /// before a write goes through.
    struct MockVoteRepository {
        voter_known: bool,
        target_live: bool,
        apply_delay: Duration,
        state: Mutex<MockState>,
    }

    struct MockState {
        vote: Option<VoteValue>,
        counts: VoteCounts,
        conflicts_remaining: u32,
        applied: u32,
    }

    impl MockVoteRepository {
        fn fresh() -> Self {
            Self::with_conflicts(0)
        }

        fn with_conflicts(conflicts: u32) -> Self {
            Self {
                voter_known: true,
                target_live: true,
                apply_delay: Duration::ZERO,
                state: Mutex::new(MockState {
                    vote: None,
                    counts: VoteCounts::default(),
                    conflicts_remaining: conflicts,
                    applied: 0,
                }),
            }
        }

        fn applied(&self) -> u32 {
            self.state.lock().unwrap().applied
        }

        fn set_vote(&self, vote: Option<VoteValue>, counts: VoteCounts) {
            let mut state = self.state.lock().unwrap();
            state.vote = vote;
            state.counts = counts;
        }
    }

    #[async_trait::async_trait]
    impl VoteRepository for MockVoteRepository {
        async fn voter_exists(&self, _voter_id: Uuid) -> Result<bool, RepositoryError> {
            Ok(self.voter_known)
        }

        async fn counts(&self, _target: TargetRef) -> Result<Option<VoteCounts>, RepositoryError> {
            if !self.target_live {
                return Ok(None);
            }
            Ok(Some(self.state.lock().unwrap().counts))
        }

        async fn get_vote(
            &self,
            _voter_id: Uuid,
            _target: TargetRef,
        ) -> Result<Option<VoteValue>, RepositoryError> {
            Ok(self.state.lock().unwrap().vote)
        }

        async fn apply_vote(
            &self,
            _voter_id: Uuid,
            _target: TargetRef,
            change: VoteChange,
        ) -> Result<VoteCounts, RepositoryError> {
            if self.apply_delay > Duration::ZERO {
                tokio::time::sleep(self.apply_delay).await;
            }
            let mut state = self.state.lock().unwrap();
            if state.conflicts_remaining > 0 {
                state.conflicts_remaining -= 1;
                return Err(RepositoryError::Conflict);
            }
            state.vote = match change.write {
                LedgerWrite::Insert { polarity } => Some(polarity),
                LedgerWrite::Flip { to, .. } => Some(to),
                LedgerWrite::Retract { .. } => None,
            };
            state.counts.upvotes += change.delta.up;
            state.counts.downvotes += change.delta.down;
            state.applied += 1;
            Ok(state.counts)
        }
    }

    fn ledger(repo: Arc<MockVoteRepository>) -> VoteLedger {
        VoteLedger::with_policy(repo, 3, Duration::from_secs(1))
    }

    fn target() -> TargetRef {
        TargetRef { id: Uuid::new_v4(), kind: TargetKind::Post }
    }

    #[tokio::test]
    async fn cast_then_toggle_returns_to_baseline() {
        let repo = Arc::new(MockVoteRepository::fresh());
        let ledger = ledger(repo.clone());
        let voter = Uuid::new_v4();
        let target = target();

        let counts = ledger.cast_vote(voter, target, VoteValue::Up).await.unwrap();
        assert_eq!(counts, VoteCounts { upvotes: 1, downvotes: 0 });

        let counts = ledger.cast_vote(voter, target, VoteValue::Up).await.unwrap();
        assert_eq!(counts, VoteCounts { upvotes: 0, downvotes: 0 });
        assert_eq!(repo.state.lock().unwrap().vote, None);
    }

    #[tokio::test]
    async fn flip_moves_count_across_polarities() {
        let repo = Arc::new(MockVoteRepository::fresh());
        let ledger = ledger(repo.clone());
        let voter = Uuid::new_v4();
        let target = target();

        ledger.cast_vote(voter, target, VoteValue::Up).await.unwrap();
        let counts = ledger.cast_vote(voter, target, VoteValue::Down).await.unwrap();
        assert_eq!(counts, VoteCounts { upvotes: 0, downvotes: 1 });

        let counts = ledger.remove_vote(voter, target).await.unwrap();
        assert_eq!(counts, VoteCounts { upvotes: 0, downvotes: 0 });
    }

    #[tokio::test]
    async fn remove_without_vote_is_noop_success() {
        let repo = Arc::new(MockVoteRepository::fresh());
        let ledger = ledger(repo.clone());

        let counts = ledger.remove_vote(Uuid::new_v4(), target()).await.unwrap();
        assert_eq!(counts, VoteCounts::default());
        assert_eq!(repo.applied(), 0);
    }

    #[tokio::test]
    async fn unknown_voter_is_not_found() {
        let mut repo = MockVoteRepository::fresh();
        repo.voter_known = false;
        let ledger = ledger(Arc::new(repo));

        let err = ledger.cast_vote(Uuid::new_v4(), target(), VoteValue::Up).await.unwrap_err();
        assert!(matches!(err, LedgerError::NotFound));
    }

    #[tokio::test]
    async fn deleted_target_is_not_found() {
        let mut repo = MockVoteRepository::fresh();
        repo.target_live = false;
        let ledger = ledger(Arc::new(repo));

        let err = ledger.cast_vote(Uuid::new_v4(), target(), VoteValue::Up).await.unwrap_err();
        assert!(matches!(err, LedgerError::NotFound));
    }

    #[tokio::test]
    async fn conflicts_are_retried_until_success() {
        let repo = Arc::new(MockVoteRepository::with_conflicts(2));
        let ledger = ledger(repo.clone());

        let counts = ledger.cast_vote(Uuid::new_v4(), target(), VoteValue::Up).await.unwrap();
        assert_eq!(counts, VoteCounts { upvotes: 1, downvotes: 0 });
        assert_eq!(repo.applied(), 1);
    }

    #[tokio::test]
    async fn exhausted_retries_surface_conflict() {
        let repo = Arc::new(MockVoteRepository::with_conflicts(10));
        let ledger = ledger(repo.clone());

        let err = ledger.cast_vote(Uuid::new_v4(), target(), VoteValue::Up).await.unwrap_err();
        assert!(matches!(err, LedgerError::Conflict));
        assert_eq!(repo.applied(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_transaction_times_out_with_nothing_recorded() {
        let mut repo = MockVoteRepository::fresh();
        repo.apply_delay = Duration::from_secs(10);
        let repo = Arc::new(repo);
        let ledger = VoteLedger::with_policy(repo.clone(), 3, Duration::from_secs(1));

        let err = ledger.cast_vote(Uuid::new_v4(), target(), VoteValue::Up).await.unwrap_err();
        assert!(matches!(err, LedgerError::Timeout(timeout) if timeout == Duration::from_secs(1)));

        // The attempt was abandoned before the store mutated anything.
        assert_eq!(repo.applied(), 0);
        assert_eq!(repo.state.lock().unwrap().vote, None);
        assert_eq!(repo.state.lock().unwrap().counts, VoteCounts::default());
    }

    #[tokio::test]
    async fn race_with_own_twin_reports_success_not_toggle() {
        // The first attempt conflicts; by the time we re-read, the racing
        // request from the same voter has already landed the requested
        // polarity. The intent is satisfied, so this returns the counters
        // instead of toggling the vote back off.
        let repo = Arc::new(MockVoteRepository::with_conflicts(1));
        let ledger = ledger(repo.clone());
        let voter = Uuid::new_v4();
        let target = target();

        repo.set_vote(Some(VoteValue::Up), VoteCounts { upvotes: 1, downvotes: 0 });

        let counts = ledger.cast_vote(voter, target, VoteValue::Up).await.unwrap();
        assert_eq!(counts, VoteCounts { upvotes: 1, downvotes: 0 });
        assert_eq!(repo.state.lock().unwrap().vote, Some(VoteValue::Up));
        assert_eq!(repo.applied(), 0);
    }
}
