//! Dependency initialization and wiring for the agora server.
use std::sync::Arc;

use agora_ledger::{TrendingRanker, VoteLedger};
use agora_repository::{
    PostgresCommentRepository, PostgresPostRepository, PostgresSessionRepository,
    PostgresSubRepository, PostgresTrendingRepository, PostgresUserRepository,
    PostgresVoteRepository,
};
use tracing::info;

use crate::auth::SessionAuthenticator;
use crate::config::Config;
use crate::errors::StartupError;
use crate::server::state::AppState;

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The application state handed to the router.
    pub state: AppState,
}

impl Dependencies {
    /// Connects to the database, runs migrations, and wires the ledger,
    /// ranker and repositories into an [`AppState`].
    pub async fn new(config: &Config) -> Result<Self, StartupError> {
        let pool = sqlx::PgPool::connect(&config.database_url).await?;
        sqlx::migrate!("../agora-repository/src/postgres/migrations").run(&pool).await?;
        info!("database connected and migrations applied");

        let ledger = Arc::new(VoteLedger::with_policy(
            Arc::new(PostgresVoteRepository::new(pool.clone())),
            config.vote_retry_attempts,
            config.vote_tx_timeout,
        ));
        let ranker =
            Arc::new(TrendingRanker::new(Arc::new(PostgresTrendingRepository::new(pool.clone()))));
        let auth = Arc::new(SessionAuthenticator::new(Arc::new(PostgresSessionRepository::new(
            pool.clone(),
        ))));

        let state = AppState {
            ledger,
            ranker,
            auth,
            posts: Arc::new(PostgresPostRepository::new(pool.clone())),
            comments: Arc::new(PostgresCommentRepository::new(pool.clone())),
            subs: Arc::new(PostgresSubRepository::new(pool.clone())),
            users: Arc::new(PostgresUserRepository::new(pool)),
        };

        Ok(Dependencies { state })
    }
}
