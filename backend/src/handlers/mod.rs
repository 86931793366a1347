pub mod projects;
pub mod tasks;

use axum::{
    async_trait,
    extract::{FromRequestParts, Path, State},
    http::request::Parts,
    Json,
};
use serde_json::{json, Value};
use shared::{Project, Stats, Task};
use uuid::Uuid;

use crate::{
    error::AppError,
    storage::{Storage, PROJECT_PREFIX, TASK_PREFIX},
};

/// `:id` path segment. A value that is not a UUID is rejected with the
/// usual JSON error body instead of axum's plain-text rejection.
pub struct IdPath(pub Uuid);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for IdPath {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::Validation(rejection.body_text()))?;
        raw.parse()
            .map(IdPath)
            .map_err(|_| AppError::Validation(format!("invalid id: {raw}")))
    }
}

pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Todo List API is running!" }))
}

pub async fn get_stats(State(storage): State<Storage>) -> Result<Json<Stats>, AppError> {
    let tasks: Vec<Task> = storage.load_all(TASK_PREFIX).await?;
    let projects: Vec<Project> = storage.load_all(PROJECT_PREFIX).await?;
    Ok(Json(Stats::compute(&tasks, &projects)))
}
