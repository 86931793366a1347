use client::{
    load_snapshot, ApiError, Mutation, ProjectEditor, ProjectField, RefreshTicket, Snapshot,
    Store, TaskEditor, TaskField, View,
};
use sauron::{
    html::{attributes::*, *},
    prelude::*,
};
use shared::{TaskStatus, UpdateTaskRequest};
use uuid::Uuid;

mod dashboard;
mod fetch;
mod projects;
mod task_list;
mod widgets;

pub use fetch::FetchApi;

#[derive(Debug, Clone)]
pub enum Msg {
    // Navigation
    SetView(View),

    // Sync
    Refresh,
    Refreshed(RefreshTicket, Result<Snapshot, ApiError>),
    Mutate(Mutation),

    // Task modal, shared by the task list and the board
    NewTask,
    NewProjectTask,
    EditTask(Uuid),
    SetTaskField(TaskField, String),
    SubmitTask,
    CloseTaskModal,
    ChangeStatus(Uuid, String),
    DeleteTask(Uuid),

    // Projects
    SelectProject(Uuid),
    BackToProjects,
    NewProject,
    EditProject(Uuid),
    SetProjectField(ProjectField, String),
    SubmitProject,
    CloseProjectModal,
    DeleteProject(Uuid),
}

#[derive(Debug, Clone)]
pub struct Model {
    api: FetchApi,
    pub(crate) store: Store,
    pub(crate) current_view: View,
    pub(crate) task_editor: Option<TaskEditor>,
    pub(crate) project_editor: Option<ProjectEditor>,
    pub(crate) selected_project: Option<Uuid>,
}

impl Default for Model {
    fn default() -> Self {
        Self::new(FetchApi::default())
    }
}

impl Model {
    pub fn new(api: FetchApi) -> Self {
        Self {
            api,
            store: Store::new(),
            current_view: View::Dashboard,
            task_editor: None,
            project_editor: None,
            selected_project: None,
        }
    }

    /// Clears everything owned by the screen being left: open modals and the
    /// selected board.
    fn reset_screen_state(&mut self) {
        self.task_editor = None;
        self.project_editor = None;
        self.selected_project = None;
    }
}

impl Application for Model {
    type MSG = Msg;

    fn init(&mut self) -> Cmd<Msg> {
        Cmd::new(async { Msg::Refresh })
    }

    fn update(&mut self, msg: Msg) -> Cmd<Msg> {
        match msg {
            Msg::SetView(view) => {
                if view != self.current_view {
                    self.reset_screen_state();
                    self.current_view = view;
                }
                Cmd::none()
            }
            Msg::Refresh => {
                let ticket = self.store.begin_refresh();
                let api = self.api.clone();
                Cmd::new(async move { Msg::Refreshed(ticket, load_snapshot(&api).await) })
            }
            Msg::Refreshed(ticket, result) => {
                self.store.apply_refresh(ticket, result);
                Cmd::none()
            }
            Msg::Mutate(mutation) => {
                let api = self.api.clone();
                Cmd::new(async move {
                    // failures are logged by `send`; refresh either way
                    let _ = mutation.send(&api).await;
                    Msg::Refresh
                })
            }
            Msg::NewTask => {
                self.task_editor = Some(TaskEditor::create());
                Cmd::none()
            }
            Msg::NewProjectTask => {
                if let Some(project) = self.selected_project {
                    self.task_editor = Some(TaskEditor::create_in(project));
                }
                Cmd::none()
            }
            Msg::EditTask(id) => {
                if let Some(task) = self.store.task(id) {
                    self.task_editor = Some(TaskEditor::edit(task));
                }
                Cmd::none()
            }
            Msg::SetTaskField(field, value) => {
                if let Some(editor) = self.task_editor.as_mut() {
                    editor.form.set_field(field, value);
                }
                Cmd::none()
            }
            Msg::SubmitTask => {
                let Some(editor) = self.task_editor.as_ref() else {
                    return Cmd::none();
                };
                match editor.submit() {
                    Ok(mutation) => {
                        self.task_editor = None;
                        self.update(Msg::Mutate(mutation))
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "task form not submitted");
                        Cmd::none()
                    }
                }
            }
            Msg::CloseTaskModal => {
                self.task_editor = None;
                Cmd::none()
            }
            Msg::ChangeStatus(id, raw) => match raw.parse::<TaskStatus>() {
                Ok(status) => self.update(Msg::Mutate(Mutation::UpdateTask(
                    id,
                    UpdateTaskRequest::status(status),
                ))),
                Err(err) => {
                    tracing::warn!(id = %id, error = %err, "ignoring status change");
                    Cmd::none()
                }
            },
            Msg::DeleteTask(id) => self.update(Msg::Mutate(Mutation::DeleteTask(id))),
            Msg::SelectProject(id) => {
                self.selected_project = Some(id);
                Cmd::none()
            }
            Msg::BackToProjects => {
                self.selected_project = None;
                self.task_editor = None;
                Cmd::none()
            }
            Msg::NewProject => {
                self.project_editor = Some(ProjectEditor::create());
                Cmd::none()
            }
            Msg::EditProject(id) => {
                if let Some(project) = self.store.project(id) {
                    self.project_editor = Some(ProjectEditor::edit(project));
                }
                Cmd::none()
            }
            Msg::SetProjectField(field, value) => {
                if let Some(editor) = self.project_editor.as_mut() {
                    editor.form.set_field(field, value);
                }
                Cmd::none()
            }
            Msg::SubmitProject => {
                let Some(editor) = self.project_editor.as_ref() else {
                    return Cmd::none();
                };
                match editor.submit() {
                    Ok(mutation) => {
                        self.project_editor = None;
                        self.update(Msg::Mutate(mutation))
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "project form not submitted");
                        Cmd::none()
                    }
                }
            }
            Msg::CloseProjectModal => {
                self.project_editor = None;
                Cmd::none()
            }
            Msg::DeleteProject(id) => {
                if self.selected_project == Some(id) {
                    self.selected_project = None;
                }
                self.update(Msg::Mutate(Mutation::DeleteProject(id)))
            }
        }
    }

    fn view(&self) -> Node<Msg> {
        div(
            [class("min-h-screen bg-gradient-to-br from-purple-50 to-indigo-50")],
            [
                self.view_navigation(),
                div(
                    [class("max-w-7xl mx-auto py-6 px-4 sm:px-6 lg:px-8")],
                    [if self.store.loading() {
                        self.view_loading()
                    } else {
                        match self.current_view {
                            View::Dashboard => self.view_dashboard(),
                            View::Tasks => self.view_task_list(),
                            View::Projects => self.view_projects(),
                        }
                    }],
                ),
            ],
        )
    }
}

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_tracing::set_as_global_default();
    tracing::info!("starting TodoMaster frontend");
    Program::mount_to_body(Model::default());
}
