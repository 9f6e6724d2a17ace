//! REST client for the Volun user and moderation endpoints.
//!
//! The [`ModerationApi`] trait is the seam the session gate and the workspace
//! depend on; [`RestModerationApi`] is the production implementation.

use async_trait::async_trait;
use log::debug;
use thiserror::Error;

use crate::BusinessConfig;
use crate::http::{Client, Response};
use crate::models::{ModerationActionRecord, Profile, SuspensionPatch, UserRecord};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("{0}")]
    Network(String),
    /// Non-2xx status. `body` is the response text, which the API uses as its
    /// error detail.
    #[error("API returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("failed to decode response: {0}")]
    Decode(String),
    #[error("failed to encode request: {0}")]
    Encode(String),
}

impl ApiError {
    /// The text shown to a moderator: the server's own message when it sent one.
    pub fn detail(&self) -> &str {
        match self {
            Self::Status { body, .. } if !body.trim().is_empty() => body.as_str(),
            Self::Status { .. } => "sem detalhes",
            Self::Network(msg) | Self::Decode(msg) | Self::Encode(msg) => msg.as_str(),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[async_trait]
pub trait ModerationApi: Send + Sync {
    /// GET `/usuarios/{id}`
    async fn get_profile(&self, user_id: &str) -> ApiResult<Profile>;

    /// GET `/usuarios/`
    async fn list_users(&self) -> ApiResult<Vec<UserRecord>>;

    /// PUT `/usuarios/{id}` with `{ "userSuspenso": suspended }`
    async fn set_suspended(&self, user_id: &str, suspended: bool) -> ApiResult<()>;

    /// DELETE `/usuarios/{id}`
    async fn delete_user(&self, user_id: &str) -> ApiResult<()>;

    /// POST `/acoes-moderacao`
    async fn record_action(&self, record: &ModerationActionRecord) -> ApiResult<()>;
}

#[derive(Debug, Clone)]
pub struct RestModerationApi {
    config: BusinessConfig,
    client: Client,
}

impl RestModerationApi {
    pub fn new(config: BusinessConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    fn user_url(&self, user_id: &str) -> String {
        self.config.api_url(&format!("usuarios/{user_id}"))
    }
}

fn network(e: impl ToString) -> ApiError {
    ApiError::Network(e.to_string())
}

fn ensure_success(response: Response) -> ApiResult<Response> {
    if response.is_success() {
        Ok(response)
    } else {
        Err(ApiError::Status {
            status: response.status,
            body: response.text(),
        })
    }
}

#[async_trait]
impl ModerationApi for RestModerationApi {
    async fn get_profile(&self, user_id: &str) -> ApiResult<Profile> {
        let url = self.user_url(user_id);
        debug!("GET {url}");

        let response = self.client.get(&url).send().await.map_err(network)?;
        ensure_success(response)?
            .json()
            .map_err(|e| ApiError::Decode(format!("Failed to parse Profile: {e}")))
    }

    async fn list_users(&self) -> ApiResult<Vec<UserRecord>> {
        let url = self.config.api_url("usuarios/");
        debug!("GET {url}");

        let response = self.client.get(&url).send().await.map_err(network)?;
        ensure_success(response)?
            .json()
            .map_err(|e| ApiError::Decode(format!("Failed to parse user list: {e}")))
    }

    async fn set_suspended(&self, user_id: &str, suspended: bool) -> ApiResult<()> {
        let url = self.user_url(user_id);
        debug!("PUT {url} userSuspenso={suspended}");

        let request = self
            .client
            .put(&url)
            .json(&SuspensionPatch { suspended })
            .map_err(|e| ApiError::Encode(e.to_string()))?;

        ensure_success(request.send().await.map_err(network)?)?;
        Ok(())
    }

    async fn delete_user(&self, user_id: &str) -> ApiResult<()> {
        let url = self.user_url(user_id);
        debug!("DELETE {url}");

        ensure_success(self.client.delete(&url).send().await.map_err(network)?)?;
        Ok(())
    }

    async fn record_action(&self, record: &ModerationActionRecord) -> ApiResult<()> {
        let url = self.config.api_url("acoes-moderacao");
        debug!("POST {url} acao={}", record.action);

        let request = self
            .client
            .post(&url)
            .json(record)
            .map_err(|e| ApiError::Encode(e.to_string()))?;

        ensure_success(request.send().await.map_err(network)?)?;
        Ok(())
    }
}
