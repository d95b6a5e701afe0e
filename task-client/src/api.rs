use async_trait::async_trait;
use insight_core::{ClientConfig, CoreError, TaskAck, TaskApiError, TaskRequest, TaskStatus};
use reqwest::{Client, Method, Response};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};
use url::Url;

pub const START_TASK_PATH: &str = "start-task";
pub const TASK_STATUS_PATH: &str = "task-status";

/// Backend operations the page drives.
///
/// The backend tracks a single "current" task, so neither call carries an
/// identifier: `task_status` always describes whatever was started last.
#[async_trait]
pub trait TaskApi: Send + Sync {
    async fn start_task(&self, request: &TaskRequest) -> Result<TaskAck, CoreError>;

    async fn task_status(&self) -> Result<TaskStatus, CoreError>;
}

#[derive(Debug, Clone)]
pub struct HttpTaskApi {
    http_client: Client,
    base_url: Url,
}

impl HttpTaskApi {
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, CoreError> {
        let http_client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            base_url: with_trailing_slash(base_url),
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, CoreError> {
        Self::new(config.server_url()?, config.request_timeout())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn endpoint(&self, path: &str) -> Result<Url, CoreError> {
        self.base_url.join(path).map_err(|_| {
            CoreError::TaskApi(TaskApiError::InvalidEndpoint {
                url: format!("{}{}", self.base_url, path),
            })
        })
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&TaskRequest>,
    ) -> Result<Response, CoreError> {
        let url = self.endpoint(path)?;
        let start_time = Instant::now();

        let mut request_builder = self.http_client.request(method.clone(), url);
        if let Some(body) = body {
            request_builder = request_builder.json(body);
        }

        debug!("Sending {} /{}", method, path);
        match request_builder.send().await {
            Ok(response) => {
                debug!(
                    "Response {} for {} /{} in {:?}",
                    response.status(),
                    method,
                    path,
                    start_time.elapsed()
                );
                Ok(response)
            }
            Err(e) => {
                error!("Network error for {} /{}: {}", method, path, e);
                if e.is_timeout() {
                    Err(CoreError::TaskApi(TaskApiError::RequestTimeout))
                } else {
                    Err(CoreError::Network(e))
                }
            }
        }
    }
}

#[async_trait]
impl TaskApi for HttpTaskApi {
    async fn start_task(&self, request: &TaskRequest) -> Result<TaskAck, CoreError> {
        info!(
            "Starting task for keyword '{}' ({} blocked keywords)",
            request.keyword,
            request.blocked_keywords.as_ref().map_or(0, Vec::len)
        );

        let response = self
            .send(Method::POST, START_TASK_PATH, Some(request))
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Task start rejected with status {}", status);
            return Err(CoreError::TaskApi(TaskApiError::StartRejected {
                status_code: status.as_u16(),
            }));
        }

        let ack: TaskAck = response.json().await.map_err(|e| {
            error!("Failed to parse task start response: {}", e);
            CoreError::TaskApi(TaskApiError::InvalidResponse {
                details: "Failed to parse task start response".to_string(),
            })
        })?;

        info!("Backend accepted task: {}", ack.message);
        Ok(ack)
    }

    async fn task_status(&self) -> Result<TaskStatus, CoreError> {
        let response = self.send(Method::GET, TASK_STATUS_PATH, None).await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Task status query failed with status {}", status);
            return Err(CoreError::TaskApi(TaskApiError::StatusUnavailable {
                status_code: status.as_u16(),
            }));
        }

        let task_status: TaskStatus = response.json().await.map_err(|e| {
            error!("Failed to parse task status: {}", e);
            CoreError::TaskApi(TaskApiError::InvalidResponse {
                details: "Failed to parse task status".to_string(),
            })
        })?;

        debug!(
            "Task status: '{}' at {}%",
            task_status.status, task_status.progress
        );
        Ok(task_status)
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
