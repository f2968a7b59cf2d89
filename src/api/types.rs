use serde::{Deserialize, Serialize};

/// An item of the deployed task table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub task_id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateTaskRequest<'a> {
    pub description: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreateTaskResponse {
    pub task_id: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateTaskRequest {
    pub completed: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: Option<String>,
    pub message: Option<String>,
}
