use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::auth::auth_middleware;
use crate::handlers::{
    comments as comment_handlers, replies as reply_handlers, threads as thread_handlers,
};
use crate::repository::Repositories;
use crate::Config;

#[derive(Clone)]
pub struct AppState {
    pub repos: Repositories,
    pub config: Config,
}

pub fn create_router(repos: Repositories, config: Config) -> Router {
    let state = AppState { repos, config };

    // Reading a thread needs no token
    let public_routes = Router::new().route("/threads/:thread_id", get(thread_handlers::get_thread));

    let protected_routes = Router::new()
        .route("/threads", post(thread_handlers::create_thread))
        .route(
            "/threads/:thread_id/comments",
            post(comment_handlers::create_comment),
        )
        .route(
            "/threads/:thread_id/comments/:comment_id",
            delete(comment_handlers::delete_comment),
        )
        .route(
            "/threads/:thread_id/comments/:comment_id/replies",
            post(reply_handlers::create_reply),
        )
        .route(
            "/threads/:thread_id/comments/:comment_id/replies/:reply_id",
            delete(reply_handlers::delete_reply),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .merge(public_routes)
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
