use thiserror::Error;

/// Outcome of a failed call against the TodoMaster REST API.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),
    #[error("server responded with status {status}: {body}")]
    Server { status: u16, body: String },
    #[error("failed to decode response: {0}")]
    Decode(String),
    #[error("failed to encode request: {0}")]
    Encode(String),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Server { status: 404, .. })
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormError {
    #[error("title is required")]
    TitleRequired,
    #[error("project name is required")]
    NameRequired,
    #[error("due date must be formatted as YYYY-MM-DD")]
    InvalidDueDate,
    #[error("unknown project")]
    InvalidProject,
}
