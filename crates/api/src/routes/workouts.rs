//! Workout routes.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use gymlog_domain::{ExerciseDraft, ValidationError, WorkoutService};
use gymlog_storage::model;

use crate::AppState;
use crate::error::{AppError, Result};
use crate::routes::MessageResponse;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/workouts", post(create_workout))
        .route("/api/workouts/detail/{id}", get(get_workout))
        .route(
            "/api/workouts/{id}",
            get(list_workouts).put(update_workout).delete(delete_workout),
        )
}

/// Lists all workouts of a user, most recent date first.
async fn list_workouts(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<model::Workout>>> {
    let workouts = state
        .service
        .get_workouts(user_id.into())
        .await
        .map_err(|err| AppError::read("Workout", err))?;
    Ok(Json(workouts.iter().map(model::Workout::from).collect()))
}

async fn get_workout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<model::Workout>> {
    let workout = state
        .service
        .get_workout(id.into())
        .await
        .map_err(|err| AppError::read("Workout", err))?;
    Ok(Json(model::Workout::from(&workout)))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateWorkoutPayload {
    user_id: Uuid,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    date: Option<NaiveDate>,
    #[serde(default)]
    exercises: Vec<model::Exercise>,
}

async fn create_workout(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateWorkoutPayload>,
) -> Result<(StatusCode, Json<model::Workout>)> {
    let date = payload
        .date
        .ok_or_else(|| AppError::validation(ValidationError::MissingDate))?;
    let exercises = payload
        .exercises
        .into_iter()
        .map(ExerciseDraft::from)
        .collect();
    let workout = state
        .service
        .create_workout(payload.user_id.into(), payload.title, date, exercises)
        .await
        .map_err(AppError::create)?;
    Ok((StatusCode::CREATED, Json(model::Workout::from(&workout))))
}

/// Partial update: only fields present in the payload are overwritten.
#[derive(Deserialize)]
struct UpdateWorkoutPayload {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    date: Option<NaiveDate>,
    #[serde(default)]
    exercises: Option<Vec<model::Exercise>>,
}

async fn update_workout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateWorkoutPayload>,
) -> Result<Json<model::Workout>> {
    let exercises = payload
        .exercises
        .map(|exercises| exercises.into_iter().map(ExerciseDraft::from).collect());
    let workout = state
        .service
        .modify_workout(id.into(), payload.title, payload.date, exercises)
        .await
        .map_err(|err| AppError::update("Workout", err))?;
    Ok(Json(model::Workout::from(&workout)))
}

async fn delete_workout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>> {
    state
        .service
        .delete_workout(id.into())
        .await
        .map_err(|err| AppError::delete("Workout", err))?;
    Ok(Json(MessageResponse {
        message: "Workout deleted successfully".to_string(),
    }))
}
