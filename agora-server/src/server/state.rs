//! App state shared by all handlers.
use std::sync::Arc;

use agora_ledger::{TrendingRanker, VoteLedger};
use agora_repository::{CommentRepository, PostRepository, SubRepository, UserRepository};

use crate::auth::Authenticator;

#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<VoteLedger>,
    pub ranker: Arc<TrendingRanker>,
    pub auth: Arc<dyn Authenticator>,
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub subs: Arc<dyn SubRepository>,
    pub users: Arc<dyn UserRepository>,
}
