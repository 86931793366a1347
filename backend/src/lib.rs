//! REST backend for TodoMaster: tasks, projects and dashboard stats under
//! `/api`, plus the compiled frontend as a static fallback.

use axum::{
    routing::get,
    Router,
};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

pub mod config;
pub mod error;
pub mod handlers;
pub mod storage;


use handlers::{projects, tasks};
pub use storage::Storage;

fn api_router() -> Router<Storage> {
    Router::new()
        .route("/", get(handlers::root))
        .route("/stats", get(handlers::get_stats))
        .route("/tasks", get(tasks::list_tasks).post(tasks::create_task))
        .route(
            "/tasks/:id",
            get(tasks::get_task)
                .put(tasks::update_task)
                .delete(tasks::delete_task),
        )
        .route(
            "/projects",
            get(projects::list_projects).post(projects::create_project),
        )
        .route(
            "/projects/:id",
            get(projects::get_project)
                .put(projects::update_project)
                .delete(projects::delete_project),
        )
        .route("/projects/:id/tasks", get(projects::project_tasks))
}

pub fn create_app(storage: Storage, static_dir: Option<&str>) -> Router {
    let app = Router::new().nest("/api", api_router());
    let app = match static_dir {
        Some(dir) => app.fallback_service(ServeDir::new(dir)),
        None => app,
    };

    app.layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(storage)
}
