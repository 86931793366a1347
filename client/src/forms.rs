//! Modal form state. Fields hold exactly what the inputs show; conversion to
//! request bodies happens on submit.

use chrono::{DateTime, NaiveDate, Utc};
use shared::{
    CreateProjectRequest, CreateTaskRequest, Project, Task, TaskPriority, UpdateProjectRequest,
    UpdateTaskRequest, DEFAULT_PROJECT_COLOR,
};
use uuid::Uuid;

use crate::{error::FormError, store::Mutation};

/// `YYYY-MM-DD` from a date input to UTC midnight. An empty input means no
/// due date.
pub fn parse_form_date(raw: &str) -> Result<Option<DateTime<Utc>>, FormError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| FormError::InvalidDueDate)?;
    Ok(date.and_hms_opt(0, 0, 0).map(|midnight| midnight.and_utc()))
}

/// UTC calendar date of a wire timestamp, as a date input expects it.
pub fn format_form_date(value: &DateTime<Utc>) -> String {
    value.date_naive().format("%Y-%m-%d").to_string()
}

fn parse_project(raw: &str) -> Result<Option<Uuid>, FormError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    Uuid::parse_str(raw)
        .map(Some)
        .map_err(|_| FormError::InvalidProject)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskField {
    Title,
    Description,
    Priority,
    DueDate,
    Project,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    pub priority: TaskPriority,
    pub due_date: String,
    /// Empty for an independent task.
    pub project_id: String,
}

impl Default for TaskForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            priority: TaskPriority::Medium,
            due_date: String::new(),
            project_id: String::new(),
        }
    }
}

impl TaskForm {
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
            priority: task.priority,
            due_date: task.due_date.as_ref().map(format_form_date).unwrap_or_default(),
            project_id: task.project_id.map(|id| id.to_string()).unwrap_or_default(),
        }
    }

    /// Blank form whose tasks land in `project`.
    pub fn for_project(project: Uuid) -> Self {
        Self {
            project_id: project.to_string(),
            ..Self::default()
        }
    }

    /// Writes an input's raw value into the form. An unrecognised priority
    /// leaves the previous one in place.
    pub fn set_field(&mut self, field: TaskField, value: String) {
        match field {
            TaskField::Title => self.title = value,
            TaskField::Description => self.description = value,
            TaskField::Priority => {
                if let Ok(priority) = value.parse::<TaskPriority>() {
                    self.priority = priority;
                }
            }
            TaskField::DueDate => self.due_date = value,
            TaskField::Project => self.project_id = value,
        }
    }

    fn validate_title(&self) -> Result<(), FormError> {
        if self.title.trim().is_empty() {
            return Err(FormError::TitleRequired);
        }
        Ok(())
    }

    pub fn to_create_request(&self) -> Result<CreateTaskRequest, FormError> {
        self.validate_title()?;
        Ok(CreateTaskRequest {
            title: self.title.clone(),
            description: Some(self.description.clone()),
            priority: self.priority,
            due_date: parse_form_date(&self.due_date)?,
            project_id: parse_project(&self.project_id)?,
        })
    }

    /// Every editable field is sent; the project assignment is not
    /// updatable server-side and is left out.
    pub fn to_update_request(&self) -> Result<UpdateTaskRequest, FormError> {
        self.validate_title()?;
        Ok(UpdateTaskRequest {
            title: Some(self.title.clone()),
            description: Some(self.description.clone()),
            status: None,
            priority: Some(self.priority),
            due_date: parse_form_date(&self.due_date)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectField {
    Name,
    Description,
    Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectForm {
    pub name: String,
    pub description: String,
    pub color: String,
}

impl Default for ProjectForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            color: DEFAULT_PROJECT_COLOR.to_string(),
        }
    }
}

impl ProjectForm {
    pub fn from_project(project: &Project) -> Self {
        Self {
            name: project.name.clone(),
            description: project.description.clone().unwrap_or_default(),
            color: project.color.clone(),
        }
    }

    pub fn set_field(&mut self, field: ProjectField, value: String) {
        match field {
            ProjectField::Name => self.name = value,
            ProjectField::Description => self.description = value,
            ProjectField::Color => self.color = value,
        }
    }

    fn validate_name(&self) -> Result<(), FormError> {
        if self.name.trim().is_empty() {
            return Err(FormError::NameRequired);
        }
        Ok(())
    }

    pub fn to_create_request(&self) -> Result<CreateProjectRequest, FormError> {
        self.validate_name()?;
        Ok(CreateProjectRequest {
            name: self.name.clone(),
            description: Some(self.description.clone()),
            color: self.color.clone(),
        })
    }

    pub fn to_update_request(&self) -> Result<UpdateProjectRequest, FormError> {
        self.validate_name()?;
        Ok(UpdateProjectRequest {
            name: Some(self.name.clone()),
            description: Some(self.description.clone()),
            color: Some(self.color.clone()),
        })
    }
}

/// An open task modal: a form plus the task being edited, if any.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskEditor {
    pub editing: Option<Uuid>,
    pub form: TaskForm,
}

impl TaskEditor {
    pub fn create() -> Self {
        Self::default()
    }

    pub fn create_in(project: Uuid) -> Self {
        Self {
            editing: None,
            form: TaskForm::for_project(project),
        }
    }

    pub fn edit(task: &Task) -> Self {
        Self {
            editing: Some(task.id),
            form: TaskForm::from_task(task),
        }
    }

    pub fn submit(&self) -> Result<Mutation, FormError> {
        match self.editing {
            Some(id) => Ok(Mutation::UpdateTask(id, self.form.to_update_request()?)),
            None => Ok(Mutation::CreateTask(self.form.to_create_request()?)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectEditor {
    pub editing: Option<Uuid>,
    pub form: ProjectForm,
}

impl ProjectEditor {
    pub fn create() -> Self {
        Self::default()
    }

    pub fn edit(project: &Project) -> Self {
        Self {
            editing: Some(project.id),
            form: ProjectForm::from_project(project),
        }
    }

    pub fn submit(&self) -> Result<Mutation, FormError> {
        match self.editing {
            Some(id) => Ok(Mutation::UpdateProject(id, self.form.to_update_request()?)),
            None => Ok(Mutation::CreateProject(self.form.to_create_request()?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{timestamp, TaskStatus};

    #[test]
    fn due_date_round_trips_through_the_wire() {
        let form = TaskForm {
            title: "Taxes".to_string(),
            due_date: "2024-03-15".to_string(),
            ..TaskForm::default()
        };
        let request = form.to_create_request().unwrap();
        let wire = serde_json::to_value(&request).unwrap();
        assert_eq!(wire["due_date"], "2024-03-15T00:00:00.000Z");

        let mut task = Task::new(request);
        task.status = TaskStatus::InProgress;
        assert_eq!(TaskForm::from_task(&task).due_date, "2024-03-15");
    }

    #[test]
    fn late_evening_timestamp_keeps_utc_date() {
        let stamp = timestamp::parse("2024-03-15T23:59:59.999Z").unwrap();
        assert_eq!(format_form_date(&stamp), "2024-03-15");
    }

    #[test]
    fn blank_due_date_is_none() {
        assert_eq!(parse_form_date(""), Ok(None));
        assert_eq!(parse_form_date("15/03/2024"), Err(FormError::InvalidDueDate));
    }

    #[test]
    fn title_is_required() {
        let form = TaskForm {
            title: "   ".to_string(),
            ..TaskForm::default()
        };
        assert_eq!(form.to_create_request(), Err(FormError::TitleRequired));
        assert_eq!(form.to_update_request(), Err(FormError::TitleRequired));
    }

    #[test]
    fn empty_project_selection_is_independent() {
        let form = TaskForm {
            title: "Loose".to_string(),
            ..TaskForm::default()
        };
        assert_eq!(form.to_create_request().unwrap().project_id, None);
    }

    #[test]
    fn board_form_sets_open_project() {
        let project = Uuid::new_v4();
        let mut editor = TaskEditor::create_in(project);
        editor.form.title = "Column work".to_string();
        match editor.submit().unwrap() {
            Mutation::CreateTask(request) => assert_eq!(request.project_id, Some(project)),
            other => panic!("unexpected mutation {other:?}"),
        }
    }

    #[test]
    fn editing_submits_update_for_that_task() {
        let task = Task::new(CreateTaskRequest {
            title: "Old".to_string(),
            ..CreateTaskRequest::default()
        });
        let mut editor = TaskEditor::edit(&task);
        editor.form.title = "New".to_string();
        editor.form.priority = TaskPriority::Low;

        let Mutation::UpdateTask(id, update) = editor.submit().unwrap() else {
            panic!("expected update");
        };
        assert_eq!(id, task.id);
        assert_eq!(update.title.as_deref(), Some("New"));
        assert_eq!(update.priority, Some(TaskPriority::Low));
        assert_eq!(update.status, None);
    }

    #[test]
    fn set_field_mirrors_inputs() {
        let mut form = TaskForm::default();
        form.set_field(TaskField::Title, "Call plumber".to_string());
        form.set_field(TaskField::Priority, "high".to_string());
        form.set_field(TaskField::Priority, "urgent".to_string());
        form.set_field(TaskField::DueDate, "2024-03-15".to_string());
        assert_eq!(form.title, "Call plumber");
        assert_eq!(form.priority, TaskPriority::High);
        assert_eq!(form.due_date, "2024-03-15");

        let mut project = ProjectForm::default();
        project.set_field(ProjectField::Color, "#10B981".to_string());
        assert_eq!(project.color, "#10B981");
    }

    #[test]
    fn project_form_requires_name_and_keeps_color() {
        let mut editor = ProjectEditor::create();
        assert_eq!(editor.submit(), Err(FormError::NameRequired));

        editor.form.name = "Renovation".to_string();
        let Mutation::CreateProject(request) = editor.submit().unwrap() else {
            panic!("expected create");
        };
        assert_eq!(request.color, DEFAULT_PROJECT_COLOR);
    }
}
