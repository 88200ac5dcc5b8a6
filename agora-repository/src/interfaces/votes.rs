//! This module defines the `VoteRepository` trait, the persistence seam of
//! the vote ledger. It abstracts the guarded ledger writes and the atomic
//! counter maintenance that keeps aggregates consistent with ledger rows.
use agora_shared::types::{TargetRef, VoteChange, VoteCounts, VoteValue};
use uuid::Uuid;

use crate::errors::RepositoryError;

/// A trait that defines the interface for the vote ledger store.
///
/// Implementors provide the reads the ledger's state machine needs and the
/// single atomic write that applies a resolved `VoteChange`: the ledger row
/// mutation and the counter delta commit together or not at all.
#[async_trait::async_trait]
pub trait VoteRepository: Send + Sync {
    /// Returns whether a user with the given id exists.
    async fn voter_exists(&self, voter_id: Uuid) -> Result<bool, RepositoryError>;

    /// Returns the target's current vote counters, or `None` when the
    /// target does not exist or is soft-deleted.
    async fn counts(&self, target: TargetRef) -> Result<Option<VoteCounts>, RepositoryError>;

    /// Reads the voter's current polarity on the target, if any.
    async fn get_vote(
        &self,
        voter_id: Uuid,
        target: TargetRef,
    ) -> Result<Option<VoteValue>, RepositoryError>;

    /// Applies a resolved vote change in one transaction: the guarded
    /// ledger write followed by the counter delta as an atomic increment.
    ///
    /// Returns the target's counters after the delta landed.
    ///
    /// # Errors
    ///
    /// * `RepositoryError::Conflict` - a concurrent mutation of the same
    ///   (voter, target) key invalidated the expected prior state.
    /// * `RepositoryError::CounterUnderflow` - the delta would drive a
    ///   counter negative; the transaction is rolled back.
    /// * `RepositoryError::NotFound` - the target vanished between the read
    ///   and the write.
    async fn apply_vote(
        &self,
        voter_id: Uuid,
        target: TargetRef,
        change: VoteChange,
    ) -> Result<VoteCounts, RepositoryError>;
}
