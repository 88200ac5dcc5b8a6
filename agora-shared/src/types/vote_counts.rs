use serde::{Deserialize, Serialize};

/// The aggregated vote counts carried on a piece of content.
///
/// Kept equal to the number of ledger rows of each polarity for the target;
/// mutated only by the ledger's delta application, never directly.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct VoteCounts {
    pub upvotes: i64,
    pub downvotes: i64,
}

impl VoteCounts {
    /// Net score used by the trending ranking for posts.
    pub fn net(&self) -> i64 {
        self.upvotes - self.downvotes
    }
}
