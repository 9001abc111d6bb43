use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::{json_response, ApiError};
use crate::routes::ServerState;

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostParams {
    pub user_email: String,
    pub text: String,
}

/// POST /posts — create a post for an existing user; responds 201 echoing
/// the submitted params (not the generated id or timestamp).
pub async fn create_post(
    State(state): State<ServerState>,
    payload: Result<Json<CreatePostParams>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(params) = payload.map_err(|rej| ApiError(rej.body_text()))?;

    state.repo.create_post(&params.user_email, &params.text).await?;

    Ok(json_response(StatusCode::CREATED, &params))
}

/// GET /posts/:email — every post belonging to the user, in no fixed order.
pub async fn get_posts_by_user(
    State(state): State<ServerState>,
    Path(email): Path<String>,
) -> Result<Response, ApiError> {
    let posts = state.repo.get_posts_by_user(&email).await?;
    Ok(json_response(StatusCode::OK, &posts))
}

/// DELETE /posts/:id — responds 200 with an empty object.
pub async fn delete_post(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    state.repo.delete_post(&id).await?;
    Ok(json_response(StatusCode::OK, &serde_json::json!({})))
}
