//! Read-only projections of the store that the screens render.

use shared::{Stats, Task, TaskStatus};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Dashboard,
    Tasks,
    Projects,
}

impl View {
    pub const ALL: [View; 3] = [View::Dashboard, View::Tasks, View::Projects];

    pub fn label(&self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::Tasks => "Tasks",
            View::Projects => "Projects",
        }
    }
}

/// Tasks that belong to no project. Project tasks only show up on their
/// project's board.
pub fn independent_tasks(tasks: &[Task]) -> Vec<&Task> {
    tasks.iter().filter(|t| t.is_independent()).collect()
}

pub fn project_tasks(tasks: &[Task], project: Uuid) -> Vec<&Task> {
    tasks.iter().filter(|t| t.project_id == Some(project)).collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoardColumn<'a> {
    pub status: TaskStatus,
    pub tasks: Vec<&'a Task>,
}

/// The three Kanban columns of a project, in `todo`, `in_progress`, `done`
/// order.
pub fn board_columns(tasks: &[Task], project: Uuid) -> [BoardColumn<'_>; 3] {
    let scoped = project_tasks(tasks, project);
    TaskStatus::ALL.map(|status| BoardColumn {
        status,
        tasks: scoped.iter().copied().filter(|t| t.status == status).collect(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProjectProgress {
    pub total: usize,
    pub done: usize,
}

impl ProjectProgress {
    pub fn of(tasks: &[Task], project: Uuid) -> Self {
        let scoped = project_tasks(tasks, project);
        Self {
            total: scoped.len(),
            done: scoped.iter().filter(|t| t.status == TaskStatus::Done).count(),
        }
    }

    /// `done / total`, or 0 for a project without tasks.
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.done as f64 / self.total as f64).clamp(0.0, 1.0)
    }

    pub fn percent(&self) -> f64 {
        self.ratio() * 100.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardCounters {
    pub total_tasks: u64,
    pub completed: u64,
    pub pending: u64,
    pub projects: u64,
}

impl From<&Stats> for DashboardCounters {
    fn from(stats: &Stats) -> Self {
        Self {
            total_tasks: stats.tasks.total,
            completed: stats.tasks.completed,
            pending: stats.tasks.pending,
            projects: stats.projects.total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::CreateTaskRequest;

    fn task(title: &str, status: TaskStatus, project: Option<Uuid>) -> Task {
        let mut task = Task::new(CreateTaskRequest {
            title: title.to_string(),
            project_id: project,
            ..CreateTaskRequest::default()
        });
        task.status = status;
        task
    }

    #[test]
    fn default_view_is_dashboard() {
        assert_eq!(View::default(), View::Dashboard);
    }

    #[test]
    fn task_list_shows_only_independent_tasks() {
        let project = Uuid::new_v4();
        let tasks = vec![
            task("a", TaskStatus::Todo, None),
            task("b", TaskStatus::Done, Some(project)),
            task("c", TaskStatus::InProgress, None),
        ];
        let shown: Vec<_> = independent_tasks(&tasks).iter().map(|t| t.title.as_str()).collect();
        assert_eq!(shown, ["a", "c"]);
    }

    #[test]
    fn every_project_task_lands_in_exactly_its_status_column() {
        let project = Uuid::new_v4();
        let other = Uuid::new_v4();
        let tasks = vec![
            task("todo", TaskStatus::Todo, Some(project)),
            task("doing", TaskStatus::InProgress, Some(project)),
            task("done", TaskStatus::Done, Some(project)),
            task("done too", TaskStatus::Done, Some(project)),
            task("elsewhere", TaskStatus::Todo, Some(other)),
            task("loose", TaskStatus::Todo, None),
        ];

        let columns = board_columns(&tasks, project);
        let statuses: Vec<_> = columns.iter().map(|c| c.status).collect();
        assert_eq!(statuses, TaskStatus::ALL);

        for t in tasks.iter().filter(|t| t.project_id == Some(project)) {
            let hits: Vec<_> = columns
                .iter()
                .filter(|c| c.tasks.iter().any(|shown| shown.id == t.id))
                .collect();
            assert_eq!(hits.len(), 1, "{} appears once", t.title);
            assert_eq!(hits[0].status, t.status);
        }
        let total: usize = columns.iter().map(|c| c.tasks.len()).sum();
        assert_eq!(total, 4);
    }

    #[test]
    fn progress_is_zero_without_tasks_and_bounded() {
        let project = Uuid::new_v4();
        assert_eq!(ProjectProgress::of(&[], project).ratio(), 0.0);

        let tasks = vec![
            task("a", TaskStatus::Done, Some(project)),
            task("b", TaskStatus::Todo, Some(project)),
            task("c", TaskStatus::Done, Some(project)),
            task("d", TaskStatus::InProgress, Some(project)),
        ];
        let progress = ProjectProgress::of(&tasks, project);
        assert_eq!(progress, ProjectProgress { total: 4, done: 2 });
        assert_eq!(progress.ratio(), 0.5);
        assert_eq!(progress.percent(), 50.0);

        let all_done = vec![task("x", TaskStatus::Done, Some(project))];
        assert_eq!(ProjectProgress::of(&all_done, project).ratio(), 1.0);
    }

    #[test]
    fn dashboard_reads_stats_with_zero_defaults() {
        let counters = DashboardCounters::from(&Stats::default());
        assert_eq!(counters, DashboardCounters::default());
    }
}
