//! The TodoMaster data-sync contract: API seam, client state and the
//! projections the screens are drawn from. Nothing here depends on the
//! browser, so the whole protocol runs under native tests.

pub mod api;
pub mod error;
pub mod forms;
pub mod store;
pub mod views;

#[cfg(test)]
mod fake;

pub use api::{ApiRoutes, TodoApi};
pub use error::{ApiError, FormError};
pub use forms::{ProjectEditor, ProjectField, ProjectForm, TaskEditor, TaskField, TaskForm};
pub use store::{load_snapshot, Mutation, RefreshOutcome, RefreshTicket, Snapshot, Store};
pub use views::View;
