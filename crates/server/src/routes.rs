use std::sync::Arc;
use std::time::Duration;

use axum::{
    routing::{get, post},
    Json, Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;
use service::repository::Repository;

use crate::errors::ApiError;

pub mod posts;
pub mod users;

/// Shared handler state. The repository handle is the only in-memory state
/// the server keeps between requests.
#[derive(Clone)]
pub struct ServerState {
    pub repo: Arc<Repository>,
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Fallback for any verb missing from the route table.
async fn method_not_supported() -> ApiError {
    ApiError("method not supported".into())
}

/// Build the full application router: health plus the users/posts CRUD table.
pub fn build_router(cors: CorsLayer, state: ServerState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/users", post(users::create_user).fallback(method_not_supported))
        .route(
            "/users/:email",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user)
                .fallback(method_not_supported),
        )
        .route("/posts", post(posts::create_post).fallback(method_not_supported))
        .route(
            "/posts/:id",
            get(posts::get_posts_by_user)
                .delete(posts::delete_post)
                .fallback(method_not_supported),
        )
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        // 每次请求创建 span，包含方法和路径，日志级别为 INFO
                        .make_span_with(
                            DefaultMakeSpan::new().level(Level::INFO).include_headers(false),
                        )
                        .on_request(DefaultOnRequest::new().level(Level::INFO))
                        .on_response(
                            DefaultOnResponse::new().level(Level::INFO).include_headers(false),
                        )
                        .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
                )
                // 请求级 30s 超时，慢请求返回 408
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(cors),
        )
}
