use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use shared::{CreateTaskRequest, Project, Task, TaskStatus, UpdateTaskRequest};
use uuid::Uuid;

use super::IdPath;
use crate::{
    error::AppError,
    storage::{project_key, task_key, Storage, TASK_PREFIX},
};

/// Raw `?project_id=&status=` query. Empty values mean "no filter".
#[derive(Debug, Default, Deserialize)]
pub struct TaskQuery {
    pub project_id: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct TaskFilter {
    pub project_id: Option<Uuid>,
    pub status: Option<TaskStatus>,
}

impl TryFrom<TaskQuery> for TaskFilter {
    type Error = AppError;

    fn try_from(query: TaskQuery) -> Result<Self, Self::Error> {
        let project_id = match non_empty(query.project_id) {
            Some(raw) => Some(
                raw.parse()
                    .map_err(|_| AppError::Validation(format!("invalid project_id: {raw}")))?,
            ),
            None => None,
        };
        let status = match non_empty(query.status) {
            Some(raw) => Some(
                raw.parse()
                    .map_err(|_| AppError::Validation(format!("invalid status: {raw}")))?,
            ),
            None => None,
        };
        Ok(Self { project_id, status })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Newest first; equal timestamps fall back to id order.
pub(crate) fn sort_newest_first(tasks: &mut [Task]) {
    tasks.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| a.id.cmp(&b.id))
    });
}

pub(crate) async fn load_tasks(
    storage: &Storage,
    filter: &TaskFilter,
) -> Result<Vec<Task>, AppError> {
    let mut tasks: Vec<Task> = storage.load_all(TASK_PREFIX).await?;
    tasks.retain(|t| {
        filter.project_id.map_or(true, |id| t.project_id == Some(id))
            && filter.status.map_or(true, |status| t.status == status)
    });
    sort_newest_first(&mut tasks);
    Ok(tasks)
}

pub async fn list_tasks(
    State(storage): State<Storage>,
    Query(query): Query<TaskQuery>,
) -> Result<Json<Vec<Task>>, AppError> {
    let filter = TaskFilter::try_from(query)?;
    Ok(Json(load_tasks(&storage, &filter).await?))
}

pub async fn get_task(
    IdPath(id): IdPath,
    State(storage): State<Storage>,
) -> Result<Json<Task>, AppError> {
    storage
        .load::<Task>(&task_key(id))
        .await?
        .map(Json)
        .ok_or(AppError::NotFound("Task"))
}

pub async fn create_task(
    State(storage): State<Storage>,
    Json(payload): Json<CreateTaskRequest>,
) -> Result<Json<Task>, AppError> {
    if payload.title.trim().is_empty() {
        return Err(AppError::Validation("title is required".to_string()));
    }
    if let Some(project_id) = payload.project_id {
        if storage.load::<Project>(&project_key(project_id)).await?.is_none() {
            return Err(AppError::Validation(format!("unknown project {project_id}")));
        }
    }

    let task = Task::new(payload);
    storage.save(&task_key(task.id), &task).await?;
    tracing::info!(id = %task.id, project = ?task.project_id, "task created");

    Ok(Json(task))
}

pub async fn update_task(
    IdPath(id): IdPath,
    State(storage): State<Storage>,
    Json(payload): Json<UpdateTaskRequest>,
) -> Result<Json<Task>, AppError> {
    let key = task_key(id);
    let mut task: Task = storage.load(&key).await?.ok_or(AppError::NotFound("Task"))?;

    if payload.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
        return Err(AppError::Validation("title is required".to_string()));
    }
    task.apply(payload);
    storage.save(&key, &task).await?;
    tracing::debug!(id = %id, status = task.status.as_str(), "task updated");

    Ok(Json(task))
}

pub async fn delete_task(
    IdPath(id): IdPath,
    State(storage): State<Storage>,
) -> Result<Json<Value>, AppError> {
    if storage.delete(&task_key(id)).await? {
        tracing::info!(id = %id, "task deleted");
        Ok(Json(json!({ "message": "Task deleted successfully" })))
    } else {
        Err(AppError::NotFound("Task"))
    }
}
