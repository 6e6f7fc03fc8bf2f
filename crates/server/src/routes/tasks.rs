use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::{error, info};

use models::task;
use service::store::TaskInput;

use crate::errors::ApiError;
use crate::routes::ServerState;

/// Wire shape of a task payload. Every field defaults, so a sparse body
/// decodes and the title rule is enforced by the service, not the decoder.
/// Unknown fields are ignored; a caller-supplied id never reaches the store.
#[derive(Debug, Deserialize)]
pub struct TaskBody {
    #[serde(default)]
    pub id: i32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
}

impl TaskBody {
    fn into_input(self) -> TaskInput {
        TaskInput {
            title: self.title,
            description: self.description,
            completed: self.completed,
        }
    }
}

// The 400 body reads "Not found"; kept verbatim for wire compatibility.
fn parse_id(raw: &str) -> Result<i32, ApiError> {
    raw.parse::<i32>()
        .map_err(|_| ApiError::new(StatusCode::BAD_REQUEST, "Not found"))
}

pub async fn method_not_available() -> ApiError {
    ApiError::new(StatusCode::METHOD_NOT_ALLOWED, "Method is not available")
}

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<task::Model>>, ApiError> {
    match state.tasks.get_tasks().await {
        Ok(tasks) => {
            info!(count = tasks.len(), "list tasks");
            Ok(Json(tasks))
        }
        Err(e) => Err(ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())),
    }
}

pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<TaskBody>, JsonRejection>,
) -> Result<(StatusCode, Json<task::Model>), ApiError> {
    let Json(body) = payload.map_err(|e| ApiError::new(StatusCode::BAD_REQUEST, e.body_text()))?;
    match state.tasks.create_task(body.into_input()).await {
        Ok(created) => {
            info!(id = created.id, "created task");
            Ok((StatusCode::CREATED, Json(created)))
        }
        Err(e) => Err(ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())),
    }
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<task::Model>, ApiError> {
    let id = parse_id(&id)?;
    match state.tasks.get_task_by_id(id).await {
        Ok(found) => Ok(Json(found)),
        // Lookup failures, not-found included, answer 204 rather than 404.
        Err(_) => Err(ApiError::new(StatusCode::NO_CONTENT, "Not found")),
    }
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    payload: Result<Json<TaskBody>, JsonRejection>,
) -> Result<Json<task::Model>, ApiError> {
    let id = parse_id(&id)?;
    let Json(body) = payload.map_err(|_| ApiError::new(StatusCode::BAD_REQUEST, "Invalid input"))?;
    match state.tasks.update_task(id, body.into_input()).await {
        Ok(updated) => {
            info!(id = updated.id, "updated task");
            Ok(Json(updated))
        }
        Err(e) => Err(ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())),
    }
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    match state.tasks.delete_task(id).await {
        Ok(()) => {
            info!(id, "deleted task");
            Ok(StatusCode::NO_CONTENT)
        }
        Err(e) => {
            error!(err = %e, "delete task failed");
            Err(ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
    }
}
