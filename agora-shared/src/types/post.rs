use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::VoteCounts;

/// A post published into a sub.
///
/// Carries the denormalized vote counters and the moderation flags gating
/// new comments. `deleted_at` marks a soft delete; deleted posts are not
/// votable and do not count towards sub trending.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub author_id: Uuid,
    pub sub_id: Uuid,
    pub upvotes: i64,
    pub downvotes: i64,
    pub is_locked: bool,
    pub is_pinned: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Post {
    pub fn counts(&self) -> VoteCounts {
        VoteCounts { upvotes: self.upvotes, downvotes: self.downvotes }
    }
}

/// The fields a caller supplies when creating a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub body: String,
    pub sub_id: Uuid,
}

/// The fields a caller may change on an existing post. `None` leaves the
/// field as it is. Vote counters are not editable through any content path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePost {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
}
