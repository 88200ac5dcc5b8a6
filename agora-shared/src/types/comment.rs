use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::VoteCounts;

/// A comment on a post, optionally a reply to another comment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Comment {
    pub id: Uuid,
    pub body: String,
    pub author_id: Uuid,
    pub post_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Uuid>,
    pub upvotes: i64,
    pub downvotes: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Comment {
    pub fn counts(&self) -> VoteCounts {
        VoteCounts { upvotes: self.upvotes, downvotes: self.downvotes }
    }
}

/// The fields a caller supplies when creating a comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewComment {
    pub body: String,
    pub post_id: Uuid,
    #[serde(default)]
    pub parent_id: Option<Uuid>,
}
