use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A community ("sub") that posts are published into.
///
/// Subs have no vote ledger of their own; their trending score is the
/// count of their non-deleted posts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Sub {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub creator_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// The fields a caller supplies when creating a sub.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSub {
    pub name: String,
    pub description: String,
}
