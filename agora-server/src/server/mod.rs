// Server module - HTTP server setup and routing
pub mod handlers;
pub mod state;

use axum::routing::{delete, get, post};
use axum::Router;
use std::net::SocketAddr;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use self::state::AppState;

/// Create the Axum application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/users", post(handlers::create_user))
        .route("/subs", post(handlers::create_sub))
        .route("/subs/trending", get(handlers::trending_subs))
        .route(
            "/subs/:name",
            get(handlers::get_sub).put(handlers::update_sub).delete(handlers::delete_sub),
        )
        .route("/subs/:name/posts", get(handlers::list_posts))
        .route("/posts", post(handlers::create_post))
        .route("/posts/trending", get(handlers::trending_posts))
        .route(
            "/posts/:id",
            get(handlers::get_post).put(handlers::update_post).delete(handlers::delete_post),
        )
        .route(
            "/posts/:id/vote",
            post(handlers::vote_post).delete(handlers::unvote_post),
        )
        .route(
            "/posts/:id/comments",
            get(handlers::list_comments).post(handlers::create_comment),
        )
        .route(
            "/comments/:id",
            delete(handlers::delete_comment).put(handlers::update_comment),
        )
        .route(
            "/comments/:id/vote",
            post(handlers::vote_comment).delete(handlers::unvote_comment),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Run the server on the specified address.
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), std::io::Error> {
    info!("server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}
