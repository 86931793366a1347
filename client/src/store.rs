//! Client-side state and the refresh protocol.
//!
//! The store holds the last successful server snapshot. Mutations never patch
//! it locally: each [`Mutation`] issues exactly one request, after which the
//! caller starts a refresh with [`Store::begin_refresh`], runs
//! [`load_snapshot`] and hands the result to [`Store::apply_refresh`].

use shared::{
    CreateProjectRequest, CreateTaskRequest, Project, Stats, Task, UpdateProjectRequest,
    UpdateTaskRequest,
};
use uuid::Uuid;

use crate::{api::TodoApi, error::ApiError};

/// One consistent read of all three collections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub stats: Stats,
    pub tasks: Vec<Task>,
    pub projects: Vec<Project>,
}

/// Fetches stats, tasks and projects concurrently. Fails as a whole if any
/// of the three requests fails.
pub async fn load_snapshot<A: TodoApi>(api: &A) -> Result<Snapshot, ApiError> {
    let (stats, tasks, projects) =
        tokio::try_join!(api.get_stats(), api.list_tasks(), api.list_projects())?;
    Ok(Snapshot {
        stats,
        tasks,
        projects,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RefreshTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Applied,
    /// The fetch failed; previous state was kept.
    Failed,
    /// A newer refresh already settled; the result was dropped.
    Stale,
}

#[derive(Debug, Clone)]
pub struct Store {
    stats: Stats,
    tasks: Vec<Task>,
    projects: Vec<Project>,
    loading: bool,
    issued: u64,
    settled: u64,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    /// Empty collections, `loading` set until the first refresh settles.
    pub fn new() -> Self {
        Self {
            stats: Stats::default(),
            tasks: Vec::new(),
            projects: Vec::new(),
            loading: true,
            issued: 0,
            settled: 0,
        }
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn task(&self, id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn project(&self, id: Uuid) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// Issues a ticket for a refresh about to start. Tickets increase
    /// monotonically.
    pub fn begin_refresh(&mut self) -> RefreshTicket {
        self.issued += 1;
        RefreshTicket(self.issued)
    }

    /// Settles a refresh.
    ///
    /// Pre: `ticket` came from [`Store::begin_refresh`] on this store.
    /// Post: if no refresh with a newer ticket has settled, `loading` is
    /// false and, on success, all three collections are replaced together;
    /// on failure they are left untouched. Results older than the last
    /// settled ticket change nothing.
    pub fn apply_refresh(
        &mut self,
        ticket: RefreshTicket,
        result: Result<Snapshot, ApiError>,
    ) -> RefreshOutcome {
        if ticket.0 <= self.settled {
            tracing::debug!(
                ticket = ticket.0,
                settled = self.settled,
                "discarding out-of-order refresh"
            );
            return RefreshOutcome::Stale;
        }
        self.settled = ticket.0;
        self.loading = false;

        match result {
            Ok(snapshot) => {
                tracing::debug!(
                    ticket = ticket.0,
                    tasks = snapshot.tasks.len(),
                    projects = snapshot.projects.len(),
                    "refresh applied"
                );
                self.stats = snapshot.stats;
                self.tasks = snapshot.tasks;
                self.projects = snapshot.projects;
                RefreshOutcome::Applied
            }
            Err(err) => {
                tracing::error!(ticket = ticket.0, error = %err, "error fetching data");
                RefreshOutcome::Failed
            }
        }
    }
}

/// The write operations the client can perform. Each sends one request and
/// leaves the store untouched; the follow-up refresh is what makes the change
/// visible.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    /// POST `/tasks`. Post: after refresh the task list holds the created
    /// task with server defaults (`todo`, `medium` unless given).
    CreateTask(CreateTaskRequest),
    /// PUT `/tasks/{id}`. Post: only the supplied fields differ.
    UpdateTask(Uuid, UpdateTaskRequest),
    /// DELETE `/tasks/{id}`. Post: no task with `id` after refresh.
    DeleteTask(Uuid),
    /// POST `/projects`.
    CreateProject(CreateProjectRequest),
    /// PUT `/projects/{id}`. Post: only the supplied fields differ.
    UpdateProject(Uuid, UpdateProjectRequest),
    /// DELETE `/projects/{id}`. What happens to its tasks is up to the
    /// server.
    DeleteProject(Uuid),
}

impl Mutation {
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::CreateTask(_) => "create task",
            Mutation::UpdateTask(..) => "update task",
            Mutation::DeleteTask(_) => "delete task",
            Mutation::CreateProject(_) => "create project",
            Mutation::UpdateProject(..) => "update project",
            Mutation::DeleteProject(_) => "delete project",
        }
    }

    /// Sends the request. The entity echoed back by create/update is decoded
    /// but dropped. Failures are logged here and returned for the caller to
    /// inspect; they are never shown to the user.
    pub async fn send<A: TodoApi>(&self, api: &A) -> Result<(), ApiError> {
        let result = match self {
            Mutation::CreateTask(request) => api.create_task(request).await.map(drop),
            Mutation::UpdateTask(id, request) => api.update_task(*id, request).await.map(drop),
            Mutation::DeleteTask(id) => api.delete_task(*id).await,
            Mutation::CreateProject(request) => api.create_project(request).await.map(drop),
            Mutation::UpdateProject(id, request) => {
                api.update_project(*id, request).await.map(drop)
            }
            Mutation::DeleteProject(id) => api.delete_project(*id).await,
        };
        if let Err(err) = &result {
            tracing::error!(operation = self.name(), error = %err, "request failed");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::{Endpoint, FakeApi};
    use crate::views::{board_columns, independent_tasks};
    use shared::{TaskPriority, TaskStatus};

    async fn refresh(store: &mut Store, api: &FakeApi) -> RefreshOutcome {
        let ticket = store.begin_refresh();
        let result = load_snapshot(api).await;
        store.apply_refresh(ticket, result)
    }

    async fn mutate(store: &mut Store, api: &FakeApi, mutation: Mutation) -> Result<(), ApiError> {
        let result = mutation.send(api).await;
        refresh(store, api).await;
        result
    }

    fn titled(title: &str) -> CreateTaskRequest {
        CreateTaskRequest {
            title: title.to_string(),
            ..CreateTaskRequest::default()
        }
    }

    #[test]
    fn starts_loading_and_empty() {
        let store = Store::new();
        assert!(store.loading());
        assert!(store.tasks().is_empty());
        assert!(store.projects().is_empty());
        assert_eq!(store.stats(), &Stats::default());
    }

    #[tokio::test]
    async fn initial_refresh_loads_everything() {
        let api = FakeApi::new();
        api.seed_task(titled("Existing"));
        let mut store = Store::new();

        assert_eq!(refresh(&mut store, &api).await, RefreshOutcome::Applied);
        assert!(!store.loading());
        assert_eq!(store.tasks().len(), 1);
        assert_eq!(store.stats().tasks.total, 1);
    }

    #[tokio::test]
    async fn create_then_refresh_shows_one_new_task_with_defaults() {
        let api = FakeApi::new();
        let mut store = Store::new();
        refresh(&mut store, &api).await;

        mutate(&mut store, &api, Mutation::CreateTask(titled("X")))
            .await
            .unwrap();

        let matching: Vec<_> = store.tasks().iter().filter(|t| t.title == "X").collect();
        assert_eq!(matching.len(), 1);
        assert_eq!(matching[0].status, TaskStatus::Todo);
        assert_eq!(matching[0].priority, TaskPriority::Medium);
    }

    #[tokio::test]
    async fn status_update_is_partial() {
        let api = FakeApi::new();
        let id = api.seed_task(CreateTaskRequest {
            title: "Report".to_string(),
            description: Some("quarterly".to_string()),
            priority: TaskPriority::High,
            due_date: crate::forms::parse_form_date("2024-03-15").unwrap(),
            project_id: None,
        });
        let mut store = Store::new();
        refresh(&mut store, &api).await;
        let before = store.task(id).cloned().unwrap();

        mutate(
            &mut store,
            &api,
            Mutation::UpdateTask(id, UpdateTaskRequest::status(TaskStatus::Done)),
        )
        .await
        .unwrap();

        let after = store.task(id).unwrap();
        assert_eq!(after.status, TaskStatus::Done);
        assert_eq!(after.title, before.title);
        assert_eq!(after.description, before.description);
        assert_eq!(after.priority, before.priority);
        assert_eq!(after.due_date, before.due_date);
    }

    #[tokio::test]
    async fn deleted_task_disappears_from_every_projection() {
        let api = FakeApi::new();
        let project = api.seed_project("Garden");
        let loose = api.seed_task(titled("loose"));
        let scoped = api.seed_task(CreateTaskRequest {
            project_id: Some(project),
            ..titled("scoped")
        });
        let mut store = Store::new();
        refresh(&mut store, &api).await;

        mutate(&mut store, &api, Mutation::DeleteTask(loose)).await.unwrap();
        mutate(&mut store, &api, Mutation::DeleteTask(scoped)).await.unwrap();

        assert!(store.task(loose).is_none());
        assert!(independent_tasks(store.tasks()).iter().all(|t| t.id != loose));
        assert!(board_columns(store.tasks(), project)
            .iter()
            .flat_map(|column| column.tasks.iter())
            .all(|t| t.id != scoped));
    }

    #[tokio::test]
    async fn failed_tasks_fetch_keeps_prior_state_and_clears_loading() {
        let api = FakeApi::new();
        api.seed_project("Kept");
        api.fail(Endpoint::ListTasks);
        let mut store = Store::new();

        assert_eq!(refresh(&mut store, &api).await, RefreshOutcome::Failed);
        assert!(!store.loading());
        assert!(store.tasks().is_empty());
        assert!(store.projects().is_empty(), "no partial update");
        assert_eq!(store.stats(), &Stats::default());
    }

    #[tokio::test]
    async fn failed_refresh_after_success_is_stale_on_error() {
        let api = FakeApi::new();
        api.seed_task(titled("first"));
        let mut store = Store::new();
        refresh(&mut store, &api).await;

        api.seed_task(titled("second"));
        api.fail(Endpoint::GetStats);
        assert_eq!(refresh(&mut store, &api).await, RefreshOutcome::Failed);
        assert_eq!(store.tasks().len(), 1);
        assert_eq!(store.stats().tasks.total, 1);
    }

    #[tokio::test]
    async fn failed_mutation_is_reported_and_still_refreshes() {
        let api = FakeApi::new();
        let mut store = Store::new();
        api.fail(Endpoint::CreateTask);
        api.seed_task(titled("already there"));

        let err = mutate(&mut store, &api, Mutation::CreateTask(titled("lost")))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Server { status: 500, .. }));
        assert_eq!(store.tasks().len(), 1);
        assert!(!store.loading());
    }

    #[tokio::test]
    async fn out_of_order_refresh_is_discarded() {
        let api = FakeApi::new();
        let mut store = Store::new();
        let older = store.begin_refresh();
        let older_result = load_snapshot(&api).await;

        api.seed_task(titled("newer"));
        let newer = store.begin_refresh();
        let newer_result = load_snapshot(&api).await;

        assert_eq!(store.apply_refresh(newer, newer_result), RefreshOutcome::Applied);
        assert_eq!(store.apply_refresh(older, older_result), RefreshOutcome::Stale);
        assert_eq!(store.tasks().len(), 1);
    }

    #[tokio::test]
    async fn older_success_after_newer_failure_is_discarded() {
        let api = FakeApi::new();
        api.seed_task(titled("first"));
        let mut store = Store::new();
        refresh(&mut store, &api).await;

        api.seed_task(titled("second"));
        let older = store.begin_refresh();
        let older_result = load_snapshot(&api).await;
        assert_eq!(older_result.as_ref().map(|s| s.tasks.len()), Ok(2));

        api.disconnect(Endpoint::ListTasks);
        let newer = store.begin_refresh();
        let newer_result = load_snapshot(&api).await;
        assert!(matches!(newer_result, Err(ApiError::Network(_))));

        assert_eq!(store.apply_refresh(newer, newer_result), RefreshOutcome::Failed);
        assert_eq!(store.apply_refresh(older, older_result), RefreshOutcome::Stale);
        assert_eq!(store.tasks().len(), 1);
        assert_eq!(store.tasks()[0].title, "first");
    }

    #[tokio::test]
    async fn unreachable_server_fails_mutation_without_touching_state() {
        let api = FakeApi::new();
        api.seed_task(titled("kept"));
        let mut store = Store::new();
        refresh(&mut store, &api).await;

        api.disconnect(Endpoint::CreateTask);
        let err = mutate(&mut store, &api, Mutation::CreateTask(titled("dropped")))
            .await
            .unwrap_err();

        assert_eq!(err, ApiError::Network("connection refused".to_string()));
        assert!(!err.is_not_found());
        assert_eq!(store.tasks().len(), 1);
        assert_eq!(store.tasks()[0].title, "kept");
    }

    #[tokio::test]
    async fn deleting_missing_task_is_not_fatal() {
        let api = FakeApi::new();
        let mut store = Store::new();
        let result = mutate(&mut store, &api, Mutation::DeleteTask(Uuid::new_v4())).await;
        assert!(result.unwrap_err().is_not_found());
        assert!(!store.loading());
    }

    #[tokio::test]
    async fn project_crud_round_trip() {
        let api = FakeApi::new();
        let mut store = Store::new();

        mutate(
            &mut store,
            &api,
            Mutation::CreateProject(CreateProjectRequest {
                name: "Launch".to_string(),
                ..CreateProjectRequest::default()
            }),
        )
        .await
        .unwrap();
        let id = store.projects()[0].id;
        assert_eq!(store.projects()[0].color, shared::DEFAULT_PROJECT_COLOR);

        mutate(
            &mut store,
            &api,
            Mutation::UpdateProject(
                id,
                UpdateProjectRequest {
                    description: Some("Q3".to_string()),
                    ..UpdateProjectRequest::default()
                },
            ),
        )
        .await
        .unwrap();
        let project = store.project(id).unwrap();
        assert_eq!(project.name, "Launch");
        assert_eq!(project.description.as_deref(), Some("Q3"));

        mutate(&mut store, &api, Mutation::DeleteProject(id)).await.unwrap();
        assert!(store.project(id).is_none());
        assert_eq!(store.stats().projects.total, 0);
    }
}
