//! In-memory [`TodoApi`] used by the store tests.

use std::cell::RefCell;
use std::collections::HashMap;

use shared::{
    CreateProjectRequest, CreateTaskRequest, Project, Stats, Task, UpdateProjectRequest,
    UpdateTaskRequest,
};
use uuid::Uuid;

use crate::{api::TodoApi, error::ApiError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    GetStats,
    ListTasks,
    ListProjects,
    CreateTask,
}

#[derive(Default)]
pub struct FakeApi {
    tasks: RefCell<Vec<Task>>,
    projects: RefCell<Vec<Project>>,
    failing: RefCell<HashMap<Endpoint, ApiError>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// The endpoint answers with a 500 from now on.
    pub fn fail(&self, endpoint: Endpoint) {
        let error = ApiError::Server {
            status: 500,
            body: "injected failure".to_string(),
        };
        self.failing.borrow_mut().insert(endpoint, error);
    }

    /// Requests to the endpoint never reach a server.
    pub fn disconnect(&self, endpoint: Endpoint) {
        let error = ApiError::Network("connection refused".to_string());
        self.failing.borrow_mut().insert(endpoint, error);
    }

    pub fn seed_task(&self, request: CreateTaskRequest) -> Uuid {
        let task = Task::new(request);
        let id = task.id;
        self.tasks.borrow_mut().push(task);
        id
    }

    pub fn seed_project(&self, name: &str) -> Uuid {
        let project = Project::new(CreateProjectRequest {
            name: name.to_string(),
            ..CreateProjectRequest::default()
        });
        let id = project.id;
        self.projects.borrow_mut().push(project);
        id
    }

    fn check(&self, endpoint: Endpoint) -> Result<(), ApiError> {
        match self.failing.borrow().get(&endpoint) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn not_found(what: &str) -> ApiError {
        ApiError::Server {
            status: 404,
            body: format!("{what} not found"),
        }
    }
}

impl TodoApi for FakeApi {
    async fn get_stats(&self) -> Result<Stats, ApiError> {
        self.check(Endpoint::GetStats)?;
        Ok(Stats::compute(&self.tasks.borrow(), &self.projects.borrow()))
    }

    async fn list_tasks(&self) -> Result<Vec<Task>, ApiError> {
        self.check(Endpoint::ListTasks)?;
        Ok(self.tasks.borrow().clone())
    }

    async fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
        self.check(Endpoint::ListProjects)?;
        Ok(self.projects.borrow().clone())
    }

    async fn create_task(&self, request: &CreateTaskRequest) -> Result<Task, ApiError> {
        self.check(Endpoint::CreateTask)?;
        let task = Task::new(request.clone());
        self.tasks.borrow_mut().push(task.clone());
        Ok(task)
    }

    async fn update_task(&self, id: Uuid, request: &UpdateTaskRequest) -> Result<Task, ApiError> {
        let mut tasks = self.tasks.borrow_mut();
        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| Self::not_found("task"))?;
        task.apply(request.clone());
        Ok(task.clone())
    }

    async fn delete_task(&self, id: Uuid) -> Result<(), ApiError> {
        let mut tasks = self.tasks.borrow_mut();
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        if tasks.len() == before {
            return Err(Self::not_found("task"));
        }
        Ok(())
    }

    async fn create_project(&self, request: &CreateProjectRequest) -> Result<Project, ApiError> {
        let project = Project::new(request.clone());
        self.projects.borrow_mut().push(project.clone());
        Ok(project)
    }

    async fn update_project(
        &self,
        id: Uuid,
        request: &UpdateProjectRequest,
    ) -> Result<Project, ApiError> {
        let mut projects = self.projects.borrow_mut();
        let project = projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| Self::not_found("project"))?;
        project.apply(request.clone());
        Ok(project.clone())
    }

    async fn delete_project(&self, id: Uuid) -> Result<(), ApiError> {
        self.tasks.borrow_mut().retain(|t| t.project_id != Some(id));
        let mut projects = self.projects.borrow_mut();
        let before = projects.len();
        projects.retain(|p| p.id != id);
        if projects.len() == before {
            return Err(Self::not_found("project"));
        }
        Ok(())
    }
}
