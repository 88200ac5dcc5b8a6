use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents the polarity of a vote held in the ledger.
///
/// Absence of a ledger row means "no vote"; there is no `None` variant
/// here on purpose, so a stored vote is always one of the two polarities.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VoteValue {
    /// Indicates an upvote or positive endorsement.
    Up,
    /// Indicates a downvote or negative endorsement.
    Down,
}

impl VoteValue {
    /// Returns the smallint discriminator persisted in the `polarity` column.
    pub fn as_i16(self) -> i16 {
        match self {
            VoteValue::Up => 0,
            VoteValue::Down => 1,
        }
    }

    /// Decodes the persisted discriminator, `None` for unknown values.
    pub fn from_i16(value: i16) -> Option<Self> {
        match value {
            0 => Some(VoteValue::Up),
            1 => Some(VoteValue::Down),
            _ => None,
        }
    }
}

/// Discriminates which kind of content a vote targets.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    Post,
    Comment,
}

impl TargetKind {
    /// Returns the smallint discriminator persisted in the `target_kind` column.
    pub fn as_i16(self) -> i16 {
        match self {
            TargetKind::Post => 0,
            TargetKind::Comment => 1,
        }
    }
}

/// Identifies a votable piece of content: a post or a comment.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TargetRef {
    pub id: Uuid,
    pub kind: TargetKind,
}

impl TargetRef {
    pub fn post(id: Uuid) -> Self {
        Self { id, kind: TargetKind::Post }
    }

    pub fn comment(id: Uuid) -> Self {
        Self { id, kind: TargetKind::Comment }
    }
}

/// The counter adjustment produced by a ledger transition.
///
/// Applied to the target's denormalized `upvotes`/`downvotes` columns as
/// atomic increments, in the same transaction as the ledger write.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CountDelta {
    pub up: i64,
    pub down: i64,
}

impl CountDelta {
    pub const fn new(up: i64, down: i64) -> Self {
        Self { up, down }
    }
}

/// The ledger row mutation a transition resolved to.
///
/// Each variant carries the state the row is expected to be in, so the
/// repository can guard the write and fail with a conflict when a
/// concurrent mutation raced in between the read and the write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LedgerWrite {
    /// No row exists; insert one with the given polarity.
    Insert { polarity: VoteValue },
    /// A row with polarity `from` exists; flip it to `to`.
    Flip { from: VoteValue, to: VoteValue },
    /// A row with polarity `from` exists; delete it (toggle off / retract).
    Retract { from: VoteValue },
}

/// A fully resolved vote mutation: one ledger write plus the counter delta
/// that keeps the aggregate consistent with it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VoteChange {
    pub write: LedgerWrite,
    pub delta: CountDelta,
}
