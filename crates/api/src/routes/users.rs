//! User routes.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use uuid::Uuid;

use gymlog_domain::{EmailAddress, Name, UserService};
use gymlog_storage::model;

use crate::AppState;
use crate::error::{AppError, Result};
use crate::routes::MessageResponse;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/users", get(list_users).post(create_user))
        .route(
            "/api/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
}

async fn list_users(State(state): State<Arc<AppState>>) -> Result<Json<Vec<model::User>>> {
    let users = state
        .service
        .get_users()
        .await
        .map_err(|err| AppError::read("User", err))?;
    Ok(Json(users.iter().map(model::User::from).collect()))
}

async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<model::User>> {
    let user = state
        .service
        .get_user(id.into())
        .await
        .map_err(|err| AppError::read("User", err))?;
    Ok(Json(model::User::from(&user)))
}

#[derive(Deserialize)]
struct CreateUserPayload {
    name: String,
    email: String,
}

async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateUserPayload>,
) -> Result<(StatusCode, Json<model::User>)> {
    let name = Name::new(&payload.name).map_err(AppError::validation)?;
    let email = EmailAddress::new(&payload.email).map_err(AppError::validation)?;
    let user = state
        .service
        .create_user(name, email)
        .await
        .map_err(AppError::create)?;
    Ok((StatusCode::CREATED, Json(model::User::from(&user))))
}

#[derive(Deserialize)]
struct UpdateUserPayload {
    name: Option<String>,
    email: Option<String>,
}

async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateUserPayload>,
) -> Result<Json<model::User>> {
    let name = payload
        .name
        .as_deref()
        .map(Name::new)
        .transpose()
        .map_err(AppError::validation)?;
    let email = payload
        .email
        .as_deref()
        .map(EmailAddress::new)
        .transpose()
        .map_err(AppError::validation)?;
    let user = state
        .service
        .modify_user(id.into(), name, email)
        .await
        .map_err(|err| AppError::update("User", err))?;
    Ok(Json(model::User::from(&user)))
}

async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>> {
    state
        .service
        .delete_user(id.into())
        .await
        .map_err(|err| AppError::delete("User", err))?;
    Ok(Json(MessageResponse {
        message: "User deleted successfully".to_string(),
    }))
}
