use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::command::ApiCall;
use super::error::ClientError;
use super::model::{BoardTask, RawTask};
use crate::auth::{LoginRequest, RegisterRequest};
use crate::models::{TaskInput, User};

/// HTTP client for the `/api/v1` API.
///
/// Keeps a cookie jar, so the session cookie set by `login` rides along on every
/// later request made through the same client.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

#[derive(Deserialize)]
struct TaskList {
    #[serde(default)]
    tasks: Vec<RawTask>,
}

#[derive(Deserialize)]
struct TaskEnvelope {
    task: RawTask,
}

#[derive(Deserialize)]
struct LoginBody {
    user: User,
}

impl ApiClient {
    /// `base_url` is the API root, e.g. `http://127.0.0.1:5000/api/v1`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().cookie_store(true).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<(), ClientError> {
        let response = self.http.post(self.url("/register")).json(request).send().await?;
        check(response).await.map(|_| ())
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<User, ClientError> {
        let response = self
            .http
            .post(self.url("/login"))
            .json(&LoginRequest::new(email, password))
            .send()
            .await?;
        let body: LoginBody = read(response).await?;
        Ok(body.user)
    }

    pub async fn logout(&self) -> Result<(), ClientError> {
        let response = self.http.post(self.url("/logout")).send().await?;
        check(response).await.map(|_| ())
    }

    /// The caller's tasks, normalized, newest first.
    pub async fn list_tasks(&self) -> Result<Vec<BoardTask>, ClientError> {
        let response = self.http.get(self.url("/tasks")).send().await?;
        let body: TaskList = read(response).await?;
        Ok(body.tasks.into_iter().map(BoardTask::from).collect())
    }

    pub async fn get_task(&self, id: &str) -> Result<BoardTask, ClientError> {
        let response = self.http.get(self.url(&format!("/tasks/{}", id))).send().await?;
        let body: TaskEnvelope = read(response).await?;
        Ok(body.task.into())
    }

    pub async fn create_task(&self, input: &TaskInput) -> Result<BoardTask, ClientError> {
        let response = self.http.post(self.url("/tasks")).json(input).send().await?;
        let body: TaskEnvelope = read(response).await?;
        Ok(body.task.into())
    }

    pub async fn update_task(&self, id: &str, input: &TaskInput) -> Result<BoardTask, ClientError> {
        let response = self
            .http
            .put(self.url(&format!("/tasks/{}", id)))
            .json(input)
            .send()
            .await?;
        let body: TaskEnvelope = read(response).await?;
        Ok(body.task.into())
    }

    pub async fn delete_task(&self, id: &str) -> Result<(), ClientError> {
        let response = self
            .http
            .delete(self.url(&format!("/tasks/{}", id)))
            .send()
            .await?;
        check(response).await.map(|_| ())
    }

    /// Performs one planned call. Returns the fresh task list for `ListTasks`.
    pub async fn execute(&self, call: &ApiCall) -> Result<Option<Vec<BoardTask>>, ClientError> {
        match call {
            ApiCall::ListTasks => self.list_tasks().await.map(Some),
            ApiCall::CreateTask(input) => self.create_task(input).await.map(|_| None),
            ApiCall::UpdateTask { id, input } => self.update_task(id, input).await.map(|_| None),
            ApiCall::DeleteTask { id } => self.delete_task(id).await.map(|_| None),
        }
    }
}

/// Turns an error status into `ClientError::Api` carrying the server's message.
async fn check(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let text = response.text().await.unwrap_or_default();
    Err(api_error(status, &text))
}

async fn read<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    Ok(check(response).await?.json::<T>().await?)
}

fn api_error(status: StatusCode, body: &str) -> ClientError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error.or(b.message))
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        });
    ClientError::Api {
        status: status.as_u16(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_prefers_server_message() {
        assert_eq!(
            api_error(StatusCode::FORBIDDEN, r#"{"error":"Forbidden"}"#),
            ClientError::Api {
                status: 403,
                message: "Forbidden".into()
            }
        );
        assert_eq!(
            api_error(StatusCode::BAD_GATEWAY, "<html>"),
            ClientError::Api {
                status: 502,
                message: "Bad Gateway".into()
            }
        );
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = ApiClient::new("http://localhost:5000/api/v1/").unwrap();
        assert_eq!(client.url("/tasks"), "http://localhost:5000/api/v1/tasks");
    }
}
