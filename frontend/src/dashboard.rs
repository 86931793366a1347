use client::views::DashboardCounters;
use sauron::{
    html::{attributes::*, *},
    prelude::*,
};

use crate::{Model, Msg};

impl Model {
    pub(crate) fn view_dashboard(&self) -> Node<Msg> {
        let counters = DashboardCounters::from(self.store.stats());
        tracing::trace!(?counters, "dashboard");

        div([class("space-y-6")], [
            div([], [
                h2([class("text-3xl font-bold text-gray-900")], [text("Dashboard")]),
                p([class("text-gray-600 mt-2")], [text("Overview of your tasks and projects")]),
            ]),
            div([class("grid grid-cols-1 md:grid-cols-2 lg:grid-cols-4 gap-6")], [
                stat_card("Total Tasks", counters.total_tasks, "from-purple-500 to-indigo-600"),
                stat_card("Completed", counters.completed, "from-green-500 to-emerald-600"),
                stat_card("Pending", counters.pending, "from-yellow-500 to-orange-600"),
                stat_card("Projects", counters.projects, "from-blue-500 to-cyan-600"),
            ]),
        ])
    }
}

fn stat_card(label: &str, count: u64, gradient: &str) -> Node<Msg> {
    div([class("bg-white rounded-2xl shadow-lg p-6 border border-purple-100")], [
        div([class("flex items-center justify-between")], [
            div([], [
                p([class("text-sm font-medium text-gray-600")], [text(label)]),
                p([class("text-3xl font-bold text-gray-900 mt-1")], [text(count.to_string())]),
            ]),
            div([class(format!("w-12 h-12 rounded-xl bg-gradient-to-r {gradient}"))], []),
        ]),
    ])
}
