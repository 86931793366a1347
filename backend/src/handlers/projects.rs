use axum::{extract::State, Json};
use serde_json::{json, Value};
use shared::{CreateProjectRequest, Project, Task, UpdateProjectRequest};

use super::{
    tasks::{load_tasks, TaskFilter},
    IdPath,
};
use crate::{
    error::AppError,
    storage::{project_key, task_key, Storage, PROJECT_PREFIX},
};

pub async fn list_projects(
    State(storage): State<Storage>,
) -> Result<Json<Vec<Project>>, AppError> {
    let mut projects: Vec<Project> = storage.load_all(PROJECT_PREFIX).await?;
    projects.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| a.id.cmp(&b.id))
    });
    Ok(Json(projects))
}

pub async fn get_project(
    IdPath(id): IdPath,
    State(storage): State<Storage>,
) -> Result<Json<Project>, AppError> {
    storage
        .load::<Project>(&project_key(id))
        .await?
        .map(Json)
        .ok_or(AppError::NotFound("Project"))
}

pub async fn create_project(
    State(storage): State<Storage>,
    Json(payload): Json<CreateProjectRequest>,
) -> Result<Json<Project>, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("name is required".to_string()));
    }

    let project = Project::new(payload);
    storage.save(&project_key(project.id), &project).await?;
    tracing::info!(id = %project.id, name = %project.name, "project created");

    Ok(Json(project))
}

pub async fn update_project(
    IdPath(id): IdPath,
    State(storage): State<Storage>,
    Json(payload): Json<UpdateProjectRequest>,
) -> Result<Json<Project>, AppError> {
    let key = project_key(id);
    let mut project: Project = storage.load(&key).await?.ok_or(AppError::NotFound("Project"))?;

    if payload.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
        return Err(AppError::Validation("name is required".to_string()));
    }
    project.apply(payload);
    storage.save(&key, &project).await?;

    Ok(Json(project))
}

/// Removes the project together with all of its tasks.
pub async fn delete_project(
    IdPath(id): IdPath,
    State(storage): State<Storage>,
) -> Result<Json<Value>, AppError> {
    let filter = TaskFilter {
        project_id: Some(id),
        status: None,
    };
    let tasks = load_tasks(&storage, &filter).await?;
    for task in &tasks {
        storage.delete(&task_key(task.id)).await?;
    }

    if storage.delete(&project_key(id)).await? {
        tracing::info!(id = %id, tasks = tasks.len(), "project deleted");
        Ok(Json(json!({ "message": "Project and all its tasks deleted successfully" })))
    } else {
        Err(AppError::NotFound("Project"))
    }
}

pub async fn project_tasks(
    IdPath(id): IdPath,
    State(storage): State<Storage>,
) -> Result<Json<Vec<Task>>, AppError> {
    let filter = TaskFilter {
        project_id: Some(id),
        status: None,
    };
    Ok(Json(load_tasks(&storage, &filter).await?))
}
