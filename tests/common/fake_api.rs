use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use wiremock::matchers::path_regex;
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

/// In-memory stand-in for the deployed task lambda.
struct FakeTaskApi {
    tasks: Mutex<Vec<serde_json::Value>>,
    next_id: AtomicUsize,
    ignore_updates: bool,
}

impl FakeTaskApi {
    fn new(ignore_updates: bool) -> Self {
        Self {
            tasks: Mutex::new(Vec::new()),
            next_id: AtomicUsize::new(1),
            ignore_updates,
        }
    }
}

impl Respond for FakeTaskApi {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let route = request.url.path().to_string();
        let mut tasks = self.tasks.lock().unwrap();
        let body: serde_json::Value =
            serde_json::from_slice(&request.body).unwrap_or(serde_json::json!({}));

        match (request.method.as_str(), route.as_str()) {
            ("POST", "/tasks") => match body.get("description").and_then(|d| d.as_str()) {
                Some(description) if !description.is_empty() => {
                    let task_id = format!("t-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
                    tasks.push(serde_json::json!({
                        "task_id": task_id,
                        "description": description,
                        "completed": false
                    }));
                    ResponseTemplate::new(200).set_body_json(serde_json::json!({"task_id": task_id}))
                }
                _ => ResponseTemplate::new(400)
                    .set_body_json(serde_json::json!({"error": "Missing 'description' in request"})),
            },
            ("GET", "/tasks") => ResponseTemplate::new(200).set_body_json(tasks.clone()),
            ("PUT", r) if r.starts_with("/tasks/") => {
                let task_id = r.trim_start_matches("/tasks/");
                let completed = body.get("completed").and_then(|c| c.as_bool()).unwrap_or(false);
                if !self.ignore_updates {
                    for task in tasks.iter_mut() {
                        if task["task_id"] == task_id {
                            task["completed"] = serde_json::json!(completed);
                        }
                    }
                }
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"message": "Task updated"}))
            }
            ("DELETE", r) if r.starts_with("/tasks/") => {
                let task_id = r.trim_start_matches("/tasks/");
                tasks.retain(|t| t["task_id"] != task_id);
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"message": "Task deleted"}))
            }
            _ => ResponseTemplate::new(404).set_body_json(serde_json::json!({"error": "Route not found"})),
        }
    }
}

pub async fn fake_server(ignore_updates: bool) -> MockServer {
    let mock_server = MockServer::start().await;
    Mock::given(path_regex("^/tasks"))
        .respond_with(FakeTaskApi::new(ignore_updates))
        .mount(&mock_server)
        .await;
    mock_server
}
