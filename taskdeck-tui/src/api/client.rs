use anyhow::{Context, Result};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::api::dev_backend::DevBackend;
use crate::api::dto::{AuthRequest, AuthResponse, ErrorBody};
use crate::api::error::ApiError;
use crate::session::Session;
use crate::types::{Credentials, Task, TaskFields};

type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    session: Session,
    dev_backend: Option<DevBackend>,
}

impl ApiClient {
    pub fn new(base_url: &str, session: Session) -> Result<Self> {
        // Trailing slash so relative joins keep any path prefix of the base.
        let normalized = format!("{}/", base_url.trim_end_matches('/'));
        let base_url =
            Url::parse(&normalized).with_context(|| format!("Invalid API URL: {}", base_url))?;

        Ok(Self {
            client: build_http_client()?,
            base_url,
            session,
            dev_backend: None,
        })
    }

    /// Client that answers every call from an in-process [`DevBackend`].
    pub fn dev(session: Session, backend: DevBackend) -> Result<Self> {
        Ok(Self {
            client: build_http_client()?,
            base_url: Url::parse("http://localhost/")?,
            session,
            dev_backend: Some(backend),
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    fn endpoint(&self, path: &str) -> ApiResult<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::InvalidUrl {
                path: path.to_string(),
                reason: e.to_string(),
            })
    }

    /// Start a request, attaching the bearer token when the session has one.
    fn request(&self, method: Method, path: &str) -> ApiResult<RequestBuilder> {
        let request = self.client.request(method, self.endpoint(path)?);
        Ok(match self.session.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        })
    }

    async fn send(&self, request: RequestBuilder, call_name: &str) -> ApiResult<Response> {
        debug!(call = call_name, "sending request");
        let response = request.send().await.map_err(|source| ApiError::Transport {
            call: call_name.to_string(),
            source,
        })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            warn!(call = call_name, "request was not authorized");
            return Err(ApiError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let error = rejection(call_name, status, &body);
            debug!(call = call_name, %status, error = %error, "request rejected");
            return Err(error);
        }

        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        call_name: &str,
    ) -> ApiResult<T> {
        let response = self.send(request, call_name).await?;
        response.json::<T>().await.map_err(|source| ApiError::Decode {
            call: call_name.to_string(),
            source,
        })
    }

    async fn send_without_body(&self, request: RequestBuilder, call_name: &str) -> ApiResult<()> {
        let response = self.send(request, call_name).await?;
        let _ = response.bytes().await;
        Ok(())
    }

    async fn authenticate(
        &self,
        path: &str,
        call_name: &str,
        credentials: &Credentials,
    ) -> ApiResult<String> {
        let response: AuthResponse = self
            .get_json(
                self.request(Method::POST, path)?.json(&AuthRequest {
                    email: &credentials.email,
                    password: &credentials.password,
                }),
                call_name,
            )
            .await?;

        if response.token.is_empty() {
            return Err(ApiError::MissingToken {
                call: call_name.to_string(),
            });
        }
        Ok(response.token)
    }

    /// Exchange credentials for a bearer token. The caller installs it.
    pub async fn login(&self, credentials: &Credentials) -> ApiResult<String> {
        if let Some(dev) = &self.dev_backend {
            return dev.login(credentials);
        }

        self.authenticate("/auth/login", "POST /auth/login", credentials)
            .await
    }

    pub async fn register(&self, credentials: &Credentials) -> ApiResult<String> {
        if let Some(dev) = &self.dev_backend {
            return dev.register(credentials);
        }

        self.authenticate("/auth/register", "POST /auth/register", credentials)
            .await
    }

    pub async fn list_tasks(&self) -> ApiResult<Vec<Task>> {
        if let Some(dev) = &self.dev_backend {
            return dev.list_tasks(self.session.token());
        }

        let rows: Vec<serde_json::Value> = self
            .get_json(self.request(Method::GET, "/tasks")?, "GET /tasks")
            .await?;
        Ok(decode_task_rows(rows))
    }

    pub async fn create_task(&self, fields: &TaskFields) -> ApiResult<()> {
        if let Some(dev) = &self.dev_backend {
            return dev.create_task(self.session.token(), fields).map(|_| ());
        }

        self.send_without_body(
            self.request(Method::POST, "/tasks")?.json(fields),
            "POST /tasks",
        )
        .await
    }

    pub async fn update_task(&self, id: &str, fields: &TaskFields) -> ApiResult<()> {
        if let Some(dev) = &self.dev_backend {
            return dev
                .update_task(self.session.token(), id, fields)
                .map(|_| ());
        }

        self.send_without_body(
            self.request(Method::PUT, &task_path(id))?.json(fields),
            "PUT /tasks/:id",
        )
        .await
    }

    pub async fn delete_task(&self, id: &str) -> ApiResult<()> {
        if let Some(dev) = &self.dev_backend {
            return dev.delete_task(self.session.token(), id);
        }

        self.send_without_body(
            self.request(Method::DELETE, &task_path(id))?,
            "DELETE /tasks/:id",
        )
        .await
    }
}

fn build_http_client() -> Result<Client> {
    Client::builder()
        .user_agent(concat!("taskdeck/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")
}

fn task_path(id: &str) -> String {
    format!("/tasks/{}", urlencoding::encode(id))
}

/// Decode rows one at a time so a single malformed record does not hide the
/// rest of the list.
fn decode_task_rows(rows: Vec<serde_json::Value>) -> Vec<Task> {
    rows.into_iter()
        .filter_map(|row| {
            let id = row
                .get("_id")
                .or_else(|| row.get("id"))
                .map(|v| v.to_string())
                .unwrap_or_default();
            match serde_json::from_value::<Task>(row) {
                Ok(task) => Some(task),
                Err(e) => {
                    warn!(%id, error = %e, "skipping malformed task row");
                    None
                }
            }
        })
        .collect()
}

/// Turn a non-success response into an error, preferring the server's own message.
fn rejection(call_name: &str, status: StatusCode, body: &str) -> ApiError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| format!("{} returned {}", call_name, status));
    ApiError::rejected(status.as_u16(), message)
}
