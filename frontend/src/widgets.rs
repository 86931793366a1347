use client::View;
use sauron::{
    html::{attributes::*, *},
    prelude::*,
};
use shared::{TaskPriority, TaskStatus};
use uuid::Uuid;

use crate::{Model, Msg};

const FOCUS_RING: &str = "focus:ring-2 focus:ring-purple-500 focus:border-transparent";
const GRADIENT: &str = "bg-gradient-to-r from-purple-500 to-indigo-600 text-white \
                        hover:from-purple-600 hover:to-indigo-700";

pub(crate) const INPUT_CLASS: &str = "w-full px-4 py-2 border border-gray-300 rounded-lg \
                                      focus:ring-2 focus:ring-purple-500 \
                                      focus:border-transparent";
pub(crate) const PRIMARY_BUTTON: &str = "bg-gradient-to-r from-purple-500 to-indigo-600 \
                                         text-white px-6 py-2 rounded-xl \
                                         hover:from-purple-600 hover:to-indigo-700 \
                                         transition-all duration-200 shadow-lg \
                                         hover:shadow-xl";
pub(crate) const CARD: &str = "bg-white rounded-2xl shadow-lg border border-purple-100";
pub(crate) const EDIT_LINK: &str = "text-purple-600 hover:text-purple-800 text-sm font-medium";
pub(crate) const DELETE_LINK: &str = "text-red-600 hover:text-red-800 text-sm font-medium";

pub(crate) fn priority_class(priority: TaskPriority) -> &'static str {
    match priority {
        TaskPriority::High => "bg-red-100 text-red-800",
        TaskPriority::Medium => "bg-yellow-100 text-yellow-800",
        TaskPriority::Low => "bg-green-100 text-green-800",
    }
}

pub(crate) fn status_class(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Done => "bg-green-100 text-green-800",
        TaskStatus::InProgress => "bg-blue-100 text-blue-800",
        TaskStatus::Todo => "bg-purple-100 text-purple-800",
    }
}

pub(crate) fn badge(label: &str, color_class: &str) -> Node<Msg> {
    span(
        [class(format!(
            "px-3 py-1 rounded-full text-xs font-medium {color_class}"
        ))],
        [text(label)],
    )
}

/// Status dropdown; picking an entry sends the status-only update.
pub(crate) fn status_select(task_id: Uuid, current: TaskStatus) -> Node<Msg> {
    select(
        [
            class(format!("text-sm border rounded-lg px-2 py-1 {FOCUS_RING}")),
            on_change(move |event| Msg::ChangeStatus(task_id, event.value())),
        ],
        TaskStatus::ALL.map(|status| {
            option(
                [value(status.as_str()), selected(status == current)],
                [text(status.label())],
            )
        }),
    )
}

pub(crate) fn priority_select(current: TaskPriority, on_pick: fn(String) -> Msg) -> Node<Msg> {
    select(
        [
            class(INPUT_CLASS),
            on_change(move |event| on_pick(event.value())),
        ],
        TaskPriority::ALL.map(|priority| {
            option(
                [value(priority.as_str()), selected(priority == current)],
                [text(priority.label())],
            )
        }),
    )
}

/// Centered overlay holding a form. `on_cancel` and `on_submit` are the two
/// footer buttons.
pub(crate) fn modal(
    heading: &str,
    fields: Vec<Node<Msg>>,
    submit_label: &str,
    on_cancel: Msg,
    on_submit: Msg,
) -> Node<Msg> {
    div(
        [class(
            "fixed inset-0 bg-black bg-opacity-50 flex items-center justify-center z-50",
        )],
        [div(
            [class("bg-white rounded-2xl shadow-xl p-6 w-full max-w-md mx-4")],
            [
                h3(
                    [class("text-lg font-semibold text-gray-900 mb-4")],
                    [text(heading)],
                ),
                div([class("space-y-4")], fields),
                div(
                    [class("flex justify-end space-x-3 mt-4")],
                    [
                        button(
                            [
                                r#type("button"),
                                on_click(move |_| on_cancel.clone()),
                                class(
                                    "px-4 py-2 text-gray-600 border border-gray-300 \
                                     rounded-lg hover:bg-gray-50",
                                ),
                            ],
                            [text("Cancel")],
                        ),
                        button(
                            [
                                r#type("button"),
                                on_click(move |_| on_submit.clone()),
                                class(format!("px-4 py-2 rounded-lg {GRADIENT}")),
                            ],
                            [text(submit_label)],
                        ),
                    ],
                ),
            ],
        )],
    )
}

impl Model {
    pub(crate) fn view_navigation(&self) -> Node<Msg> {
        nav(
            [class("bg-white shadow-lg border-b border-purple-100")],
            [div(
                [class("max-w-7xl mx-auto px-4 sm:px-6 lg:px-8")],
                [div(
                    [class("flex justify-between h-16")],
                    [
                        div(
                            [class("flex items-center")],
                            [h1(
                                [class(
                                    "text-2xl font-bold bg-gradient-to-r from-purple-600 \
                                     to-indigo-600 bg-clip-text text-transparent",
                                )],
                                [text("TodoMaster")],
                            )],
                        ),
                        div(
                            [class("flex items-center space-x-8")],
                            View::ALL.map(|view| self.nav_item(view)),
                        ),
                    ],
                )],
            )],
        )
    }

    fn nav_item(&self, view: View) -> Node<Msg> {
        let is_active = self.current_view == view;
        button(
            [
                on_click(move |_| Msg::SetView(view)),
                class(format!(
                    "nav-item {}",
                    if is_active { "nav-item-active" } else { "nav-item-inactive" }
                )),
            ],
            [text(view.label())],
        )
    }

    pub(crate) fn view_loading(&self) -> Node<Msg> {
        div(
            [class("flex items-center justify-center h-64")],
            [div(
                [class(
                    "animate-spin rounded-full h-32 w-32 border-b-2 border-purple-600",
                )],
                [],
            )],
        )
    }
}
