use client::{forms::format_form_date, views::independent_tasks, TaskEditor, TaskField};
use sauron::{
    html::{attributes::*, *},
    prelude::*,
};
use shared::Task;

use crate::{
    widgets::{
        badge, modal, priority_class, priority_select, status_class, status_select, CARD,
        DELETE_LINK, EDIT_LINK, INPUT_CLASS, PRIMARY_BUTTON,
    },
    Model, Msg,
};

impl Model {
    pub(crate) fn view_task_list(&self) -> Node<Msg> {
        let tasks = independent_tasks(self.store.tasks());

        div(
            [class("space-y-6")],
            [
                div(
                    [class("flex justify-between items-center")],
                    [
                        div(
                            [],
                            [
                                h2([class("text-3xl font-bold text-gray-900")], [text("Tasks")]),
                                p(
                                    [class("text-gray-600 mt-2")],
                                    [text("Tasks that don't belong to any project")],
                                ),
                            ],
                        ),
                        button(
                            [on_click(|_| Msg::NewTask), class(PRIMARY_BUTTON)],
                            [text("Add Task")],
                        ),
                    ],
                ),
                if tasks.is_empty() {
                    div(
                        [class("text-center py-12 text-gray-500")],
                        [p([class("text-lg")], [text("No independent tasks yet")])],
                    )
                } else {
                    div([class("grid gap-4")], tasks.into_iter().map(task_card))
                },
                match &self.task_editor {
                    Some(editor) => self.view_task_modal(editor),
                    None => span([], []),
                },
            ],
        )
    }

    /// Full task form. On the board the project is fixed, so only the
    /// basic fields are shown there.
    pub(crate) fn view_task_modal(&self, editor: &TaskEditor) -> Node<Msg> {
        let form = &editor.form;
        let (heading, submit_label) = match editor.editing {
            Some(_) => ("Edit Task", "Update"),
            None => ("Create New Task", "Create"),
        };

        let mut fields = vec![
            input(
                [
                    r#type("text"),
                    placeholder("Task title"),
                    value(&form.title),
                    on_input(|event| Msg::SetTaskField(TaskField::Title, event.value())),
                    class(INPUT_CLASS),
                ],
                [],
            ),
            textarea(
                [
                    placeholder("Description"),
                    value(&form.description),
                    on_input(|event| Msg::SetTaskField(TaskField::Description, event.value())),
                    class(format!("{INPUT_CLASS} h-24")),
                ],
                [],
            ),
            priority_select(form.priority, |raw| {
                Msg::SetTaskField(TaskField::Priority, raw)
            }),
        ];

        if self.selected_project.is_none() {
            fields.push(input(
                [
                    r#type("date"),
                    value(&form.due_date),
                    on_input(|event| Msg::SetTaskField(TaskField::DueDate, event.value())),
                    class(INPUT_CLASS),
                ],
                [],
            ));
            fields.push(self.project_select(&form.project_id));
        }

        modal(
            heading,
            fields,
            submit_label,
            Msg::CloseTaskModal,
            Msg::SubmitTask,
        )
    }

    fn project_select(&self, current: &str) -> Node<Msg> {
        let none = option(
            [value(""), selected(current.is_empty())],
            [text("No Project (Independent Task)")],
        );
        let projects = self.store.projects().iter().map(|project| {
            let id = project.id.to_string();
            option([selected(id == current), value(id)], [text(&project.name)])
        });

        select(
            [
                class(INPUT_CLASS),
                on_change(|event| Msg::SetTaskField(TaskField::Project, event.value())),
            ],
            std::iter::once(none).chain(projects),
        )
    }
}

fn task_card(task: &Task) -> Node<Msg> {
    let id = task.id;
    let mut badges = vec![
        badge(task.priority.label(), priority_class(task.priority)),
        badge(task.status.label(), status_class(task.status)),
    ];
    if let Some(due) = &task.due_date {
        badges.push(span(
            [class("text-xs text-gray-500")],
            [text(format!("Due {}", format_form_date(due)))],
        ));
    }

    div(
        [
            key(id.to_string()),
            class(format!("{CARD} p-6 hover:shadow-xl transition-shadow")),
        ],
        [div(
            [class("flex justify-between items-start")],
            [
                div(
                    [class("flex-1")],
                    [
                        h3(
                            [class("text-lg font-semibold text-gray-900")],
                            [text(&task.title)],
                        ),
                        match task.description.as_deref() {
                            Some(description) if !description.is_empty() => {
                                p([class("text-gray-600 mt-1")], [text(description)])
                            }
                            _ => span([], []),
                        },
                        div([class("flex items-center space-x-3 mt-3")], badges),
                    ],
                ),
                div(
                    [class("flex items-center space-x-2")],
                    [
                        status_select(id, task.status),
                        button(
                            [on_click(move |_| Msg::EditTask(id)), class(EDIT_LINK)],
                            [text("Edit")],
                        ),
                        button(
                            [on_click(move |_| Msg::DeleteTask(id)), class(DELETE_LINK)],
                            [text("Delete")],
                        ),
                    ],
                ),
            ],
        )],
    )
}
