use client::{
    views::{board_columns, BoardColumn, ProjectProgress},
    ProjectEditor, ProjectField,
};
use sauron::{
    html::{attributes, attributes::*, *},
    prelude::*,
};
use shared::{Project, Task};

use crate::{
    widgets::{
        badge, modal, priority_class, status_select, CARD, DELETE_LINK, EDIT_LINK, INPUT_CLASS,
        PRIMARY_BUTTON,
    },
    Model, Msg,
};

impl Model {
    /// Gallery of projects, or the board of the selected one. A selection
    /// whose project vanished on refresh falls back to the gallery.
    pub(crate) fn view_projects(&self) -> Node<Msg> {
        match self.selected_project.and_then(|id| self.store.project(id)) {
            Some(project) => self.view_board(project),
            None => self.view_gallery(),
        }
    }

    fn view_gallery(&self) -> Node<Msg> {
        let projects = self.store.projects();

        div(
            [class("space-y-6")],
            [
                div(
                    [class("flex justify-between items-center")],
                    [
                        div(
                            [],
                            [
                                h2(
                                    [class("text-3xl font-bold text-gray-900")],
                                    [text("Projects")],
                                ),
                                p(
                                    [class("text-gray-600 mt-2")],
                                    [text("Organize your work into projects")],
                                ),
                            ],
                        ),
                        button(
                            [on_click(|_| Msg::NewProject), class(PRIMARY_BUTTON)],
                            [text("New Project")],
                        ),
                    ],
                ),
                if projects.is_empty() {
                    div(
                        [class("text-center py-12 text-gray-500")],
                        [p([class("text-lg")], [text("No projects yet")])],
                    )
                } else {
                    div(
                        [class("grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-6")],
                        projects.iter().map(|project| self.project_card(project)),
                    )
                },
                match &self.project_editor {
                    Some(editor) => view_project_modal(editor),
                    None => span([], []),
                },
            ],
        )
    }

    fn project_card(&self, project: &Project) -> Node<Msg> {
        let id = project.id;
        let progress = ProjectProgress::of(self.store.tasks(), id);

        div(
            [
                key(id.to_string()),
                class(format!("{CARD} p-6 hover:shadow-xl transition-shadow")),
            ],
            [
                div(
                    [class("flex items-center justify-between mb-4")],
                    [
                        div(
                            [
                                class("flex items-center space-x-3 cursor-pointer"),
                                on_click(move |_| Msg::SelectProject(id)),
                            ],
                            [
                                div(
                                    [
                                        class("w-4 h-4 rounded-full"),
                                        attributes::styles([(
                                            "background-color",
                                            project.color.clone(),
                                        )]),
                                    ],
                                    [],
                                ),
                                h3(
                                    [class("text-lg font-semibold text-gray-900")],
                                    [text(&project.name)],
                                ),
                            ],
                        ),
                        div(
                            [class("flex space-x-2")],
                            [
                                button(
                                    [on_click(move |_| Msg::EditProject(id)), class(EDIT_LINK)],
                                    [text("Edit")],
                                ),
                                button(
                                    [
                                        on_click(move |_| Msg::DeleteProject(id)),
                                        class(DELETE_LINK),
                                    ],
                                    [text("Delete")],
                                ),
                            ],
                        ),
                    ],
                ),
                p(
                    [class("text-gray-600 text-sm mb-4")],
                    [text(project.description.as_deref().unwrap_or_default())],
                ),
                div(
                    [class("flex justify-between text-sm text-gray-500 mb-2")],
                    [
                        span([], [text(format!("{} tasks", progress.total))]),
                        span(
                            [],
                            [text(format!("{}/{} done", progress.done, progress.total))],
                        ),
                    ],
                ),
                div(
                    [class("w-full bg-gray-200 rounded-full h-2")],
                    [div(
                        [
                            class(
                                "bg-gradient-to-r from-purple-500 to-indigo-600 h-2 \
                                 rounded-full transition-all duration-500",
                            ),
                            attributes::styles([("width", format!("{:.0}%", progress.percent()))]),
                        ],
                        [],
                    )],
                ),
            ],
        )
    }

    fn view_board(&self, project: &Project) -> Node<Msg> {
        div(
            [class("space-y-6")],
            [
                div(
                    [class("flex justify-between items-center")],
                    [
                        div(
                            [class("flex items-center space-x-4")],
                            [
                                button(
                                    [
                                        on_click(|_| Msg::BackToProjects),
                                        class("text-purple-600 hover:text-purple-800 font-medium"),
                                    ],
                                    [text("← Back to Projects")],
                                ),
                                div(
                                    [],
                                    [
                                        h2(
                                            [class("text-3xl font-bold text-gray-900")],
                                            [text(&project.name)],
                                        ),
                                        p(
                                            [class("text-gray-600 mt-1")],
                                            [text(
                                                project.description.as_deref().unwrap_or_default(),
                                            )],
                                        ),
                                    ],
                                ),
                            ],
                        ),
                        button(
                            [on_click(|_| Msg::NewProjectTask), class(PRIMARY_BUTTON)],
                            [text("Add Task")],
                        ),
                    ],
                ),
                div(
                    [class("grid grid-cols-1 md:grid-cols-3 gap-6")],
                    board_columns(self.store.tasks(), project.id).map(board_column),
                ),
                match &self.task_editor {
                    Some(editor) => self.view_task_modal(editor),
                    None => span([], []),
                },
            ],
        )
    }
}

fn board_column(column: BoardColumn<'_>) -> Node<Msg> {
    div(
        [key(column.status.as_str()), class(format!("{CARD} p-4"))],
        [
            div(
                [class("flex items-center justify-between mb-4")],
                [
                    h3(
                        [class("font-semibold text-gray-900")],
                        [text(column.status.label())],
                    ),
                    span(
                        [class(
                            "bg-gray-100 text-gray-600 px-2 py-1 rounded-full text-xs font-medium",
                        )],
                        [text(column.tasks.len().to_string())],
                    ),
                ],
            ),
            div(
                [class("space-y-3 min-h-32")],
                column.tasks.into_iter().map(board_card),
            ),
        ],
    )
}

fn board_card(task: &Task) -> Node<Msg> {
    let id = task.id;
    div(
        [
            key(id.to_string()),
            class("bg-gray-50 rounded-xl p-4 border border-gray-200"),
        ],
        [
            h4([class("font-medium text-gray-900")], [text(&task.title)]),
            match task.description.as_deref() {
                Some(description) if !description.is_empty() => {
                    p([class("text-sm text-gray-600 mt-1")], [text(description)])
                }
                _ => span([], []),
            },
            div(
                [class("flex items-center justify-between mt-3")],
                [
                    badge(task.priority.label(), priority_class(task.priority)),
                    div(
                        [class("flex items-center space-x-2")],
                        [
                            status_select(id, task.status),
                            button(
                                [on_click(move |_| Msg::DeleteTask(id)), class(DELETE_LINK)],
                                [text("Delete")],
                            ),
                        ],
                    ),
                ],
            ),
        ],
    )
}

fn view_project_modal(editor: &ProjectEditor) -> Node<Msg> {
    let form = &editor.form;
    let (heading, submit_label) = match editor.editing {
        Some(_) => ("Edit Project", "Update"),
        None => ("Create New Project", "Create"),
    };

    modal(
        heading,
        vec![
            input(
                [
                    r#type("text"),
                    placeholder("Project name"),
                    value(&form.name),
                    on_input(|event| Msg::SetProjectField(ProjectField::Name, event.value())),
                    class(INPUT_CLASS),
                ],
                [],
            ),
            textarea(
                [
                    placeholder("Description"),
                    value(&form.description),
                    on_input(|event| {
                        Msg::SetProjectField(ProjectField::Description, event.value())
                    }),
                    class(format!("{INPUT_CLASS} h-24")),
                ],
                [],
            ),
        ],
        submit_label,
        Msg::CloseProjectModal,
        Msg::SubmitProject,
    )
}
