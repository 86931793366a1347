use serde::de::DeserializeOwned;
use shared::{
    CreateProjectRequest, CreateTaskRequest, Project, Stats, Task, UpdateProjectRequest,
    UpdateTaskRequest,
};
use uuid::Uuid;

use crate::error::ApiError;

/// Calls against the TodoMaster REST API. Every call is a single attempt;
/// implementations do not retry.
#[allow(async_fn_in_trait)]
pub trait TodoApi {
    async fn get_stats(&self) -> Result<Stats, ApiError>;
    async fn list_tasks(&self) -> Result<Vec<Task>, ApiError>;
    async fn list_projects(&self) -> Result<Vec<Project>, ApiError>;

    async fn create_task(&self, request: &CreateTaskRequest) -> Result<Task, ApiError>;
    async fn update_task(&self, id: Uuid, request: &UpdateTaskRequest) -> Result<Task, ApiError>;
    /// A task that is already gone is not distinguished from a successful
    /// delete by callers.
    async fn delete_task(&self, id: Uuid) -> Result<(), ApiError>;

    async fn create_project(&self, request: &CreateProjectRequest) -> Result<Project, ApiError>;
    async fn update_project(
        &self,
        id: Uuid,
        request: &UpdateProjectRequest,
    ) -> Result<Project, ApiError>;
    async fn delete_project(&self, id: Uuid) -> Result<(), ApiError>;
}

/// URL layout of the REST API under a configured backend origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRoutes {
    base: String,
}

impl ApiRoutes {
    /// `backend_url` may be empty, in which case the routes are
    /// origin-relative (`/api/...`).
    pub fn new(backend_url: &str) -> Self {
        Self {
            base: format!("{}/api", backend_url.trim().trim_end_matches('/')),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn stats(&self) -> String {
        format!("{}/stats", self.base)
    }

    pub fn tasks(&self) -> String {
        format!("{}/tasks", self.base)
    }

    pub fn task(&self, id: Uuid) -> String {
        format!("{}/tasks/{}", self.base, id)
    }

    pub fn projects(&self) -> String {
        format!("{}/projects", self.base)
    }

    pub fn project(&self, id: Uuid) -> String {
        format!("{}/projects/{}", self.base, id)
    }
}

impl Default for ApiRoutes {
    fn default() -> Self {
        Self::new("")
    }
}

pub fn check_status(status: u16, body: &str) -> Result<(), ApiError> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(ApiError::Server {
            status,
            body: body.to_string(),
        })
    }
}

/// Turns a raw HTTP response into a typed value, rejecting non-2xx statuses
/// before attempting to parse the body.
pub fn decode_response<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    check_status(status, body)?;
    Ok(serde_json::from_str(body)?)
}

pub fn encode_request<T: serde::Serialize>(request: &T) -> Result<String, ApiError> {
    serde_json::to_string(request).map_err(|e| ApiError::Encode(e.to_string()))
}
