use std::time::{SystemTime, UNIX_EPOCH};

use super::ApiError;
use super::types::{CreateTaskRequest, CreateTaskResponse, ErrorBody, Task, UpdateTaskRequest};

#[derive(Debug, Clone)]
pub struct TaskApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl TaskApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(ApiError::Network)?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    pub fn api_base(&self) -> &str {
        &self.base_url
    }

    pub async fn list_tasks(&self) -> Result<Vec<Task>, ApiError> {
        let url = format!("{}/tasks", self.base_url);
        let response = self.client.get(&url).send().await?;
        let response = check_status(response).await?;

        response.json().await.map_err(|e| ApiError::Decode {
            what: "task list".to_string(),
            message: e.to_string(),
        })
    }

    pub async fn create_task(&self, description: &str) -> Result<String, ApiError> {
        let url = format!("{}/tasks", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&CreateTaskRequest { description })
            .send()
            .await?;
        let response = check_status(response).await?;

        let created: CreateTaskResponse = response.json().await.map_err(|e| ApiError::Decode {
            what: "created task".to_string(),
            message: e.to_string(),
        })?;
        Ok(created.task_id)
    }

    pub async fn set_completed(&self, task_id: &str, completed: bool) -> Result<(), ApiError> {
        let url = format!("{}/tasks/{}", self.base_url, task_id);
        let response = self
            .client
            .put(&url)
            .json(&UpdateTaskRequest { completed })
            .send()
            .await?;
        check_status(response).await.map(drop)
    }

    pub async fn delete_task(&self, task_id: &str) -> Result<(), ApiError> {
        let url = format!("{}/tasks/{}", self.base_url, task_id);
        let response = self.client.delete(&url).send().await?;
        check_status(response).await.map(drop)
    }

    /// Create, list, complete, and delete one task. Returns the task id used.
    pub async fn smoke_test(&self) -> Result<String, ApiError> {
        let nonce = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        let description = format!("tfprobe smoke {nonce}");

        let task_id = self.create_task(&description).await?;
        tracing::info!(task_id = %task_id, "smoke task created");

        let checks = self.exercise_task(&task_id, &description).await;
        let cleanup = self.delete_task(&task_id).await;

        match (checks, cleanup) {
            (Ok(()), Ok(())) => {}
            (Ok(()), Err(e)) => return Err(e),
            (Err(e), Ok(())) => return Err(e),
            (Err(e), Err(cleanup)) => {
                tracing::warn!(
                    task_id = %task_id,
                    error = %cleanup,
                    "smoke task cleanup failed, task may be left behind"
                );
                return Err(e);
            }
        }

        if self.list_tasks().await?.iter().any(|t| t.task_id == task_id) {
            return Err(ApiError::Smoke(format!(
                "task {task_id} still listed after delete"
            )));
        }

        tracing::info!(task_id = %task_id, "smoke test passed");
        Ok(task_id)
    }

    async fn exercise_task(&self, task_id: &str, description: &str) -> Result<(), ApiError> {
        let listed = self.find_task(task_id).await?;
        if listed.description != description {
            return Err(ApiError::Smoke(format!(
                "task {task_id} listed with description '{}'",
                listed.description
            )));
        }

        self.set_completed(task_id, true).await?;
        if !self.find_task(task_id).await?.completed {
            return Err(ApiError::Smoke(format!(
                "task {task_id} not marked completed after update"
            )));
        }
        Ok(())
    }

    async fn find_task(&self, task_id: &str) -> Result<Task, ApiError> {
        self.list_tasks()
            .await?
            .into_iter()
            .find(|t| t.task_id == task_id)
            .ok_or_else(|| ApiError::Smoke(format!("task {task_id} not listed")))
    }
}

/// Runs [`TaskApiClient::smoke_test`] from a blocking thread, e.g. a
/// `run_check_with` verifier driven on `spawn_blocking`.
///
/// Must not be called from an async context; `block_on` panics there.
pub fn smoke_test_blocking(
    handle: &tokio::runtime::Handle,
    endpoint: &str,
) -> Result<String, ApiError> {
    let client = TaskApiClient::new(endpoint)?;
    handle.block_on(client.smoke_test())
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .ok()
        .and_then(|body| body.error.or(body.message))
        .unwrap_or(text);

    Err(ApiError::Api {
        status: status.as_u16(),
        message,
    })
}
