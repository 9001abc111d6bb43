use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::{json_response, ApiError};
use crate::routes::ServerState;

#[derive(Serialize, Deserialize, Debug)]
pub struct CreateUserParams {
    pub email: String,
    pub password: String,
    pub name: String,
    pub age: i64,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct UpdateUserParams {
    pub password: String,
    pub name: String,
    pub age: i64,
}

/// POST /users — create a user; responds 201 echoing the submitted params.
pub async fn create_user(
    State(state): State<ServerState>,
    payload: Result<Json<CreateUserParams>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(params) = payload.map_err(|rej| ApiError(rej.body_text()))?;

    state
        .repo
        .create_user(&params.email, &params.password, &params.name, params.age)
        .await?;

    Ok(json_response(StatusCode::CREATED, &params))
}

/// GET /users/:email
pub async fn get_user(
    State(state): State<ServerState>,
    Path(email): Path<String>,
) -> Result<Response, ApiError> {
    let user = state.repo.get_user(&email).await?;
    Ok(json_response(StatusCode::OK, &user))
}

/// PUT /users/:email — replace password/name/age; responds with the full user.
pub async fn update_user(
    State(state): State<ServerState>,
    Path(email): Path<String>,
    payload: Result<Json<UpdateUserParams>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(params) = payload.map_err(|rej| ApiError(rej.body_text()))?;

    let user = state
        .repo
        .update_user(&email, &params.password, &params.name, params.age)
        .await?;

    Ok(json_response(StatusCode::OK, &user))
}

/// DELETE /users/:email — responds 200 with an empty object.
pub async fn delete_user(
    State(state): State<ServerState>,
    Path(email): Path<String>,
) -> Result<Response, ApiError> {
    state.repo.delete_user(&email).await?;
    Ok(json_response(StatusCode::OK, &serde_json::json!({})))
}
