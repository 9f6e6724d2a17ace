//! Identity provider seam and the Identity Toolkit implementation.
//!
//! Sign-in exchanges an email/password pair for a principal. The active
//! session lives only in memory; [`IdentityProvider::sign_out`] drops it.

use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ustr::Ustr;

use crate::BusinessConfig;
use crate::http::Client;

/// An authenticated identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// Provider-assigned unique id. Also the key of the user's profile.
    pub uid: Ustr,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    /// The provider refused the credentials; carries the provider's reason.
    #[error("{0}")]
    Rejected(String),
    #[error("identity provider unreachable: {0}")]
    Network(String),
    #[error("identity provider returned status {0}")]
    Status(u16),
    #[error("unexpected identity provider response: {0}")]
    Decode(String),
    #[error("identity provider API key is not configured")]
    MissingApiKey,
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Principal, IdentityError>;

    /// Ends the active session, if any. Idempotent.
    async fn sign_out(&self) -> Result<(), IdentityError>;

    fn current_principal(&self) -> Option<Principal>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SignInRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInResponse {
    local_id: String,
    #[serde(default)]
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Email/password sign-in over the Identity Toolkit REST API.
pub struct FirebaseIdentity {
    config: BusinessConfig,
    client: Client,
    session: RwLock<Option<Principal>>,
}

impl FirebaseIdentity {
    pub fn new(config: BusinessConfig) -> Self {
        Self {
            config,
            client: Client::new(),
            session: RwLock::new(None),
        }
    }

    fn sign_in_url(&self) -> String {
        format!(
            "{}/v1/accounts:signInWithPassword",
            self.config.identity_base_url
        )
    }

    fn replace_session(&self, session: Option<Principal>) {
        *self.session.write().unwrap_or_else(PoisonError::into_inner) = session;
    }
}

/// Pulls the provider's reason out of an error body, if it has one.
fn rejection_reason(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ErrorEnvelope>(body)
        .ok()
        .map(|envelope| envelope.error.message)
}

#[async_trait]
impl IdentityProvider for FirebaseIdentity {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Principal, IdentityError> {
        let api_key = self
            .config
            .identity_api_key()
            .ok_or(IdentityError::MissingApiKey)?;

        let request = self
            .client
            .post(self.sign_in_url())
            .query("key", api_key)
            .json(&SignInRequest {
                email,
                password,
                return_secure_token: true,
            })
            .map_err(|e| IdentityError::Decode(e.to_string()))?;

        let response = request
            .send()
            .await
            .map_err(|e| IdentityError::Network(e.to_string()))?;

        if !response.is_success() {
            return Err(match rejection_reason(&response.body) {
                Some(reason) if response.status < 500 => {
                    info!("Identity provider rejected sign-in: {reason}");
                    IdentityError::Rejected(reason)
                }
                _ => {
                    warn!("Identity provider returned status {}", response.status);
                    IdentityError::Status(response.status)
                }
            });
        }

        let body: SignInResponse = response
            .json()
            .map_err(|e| IdentityError::Decode(e.to_string()))?;

        let principal = Principal {
            uid: Ustr::from(&body.local_id),
            email: body.email.unwrap_or_else(|| email.to_owned()),
        };

        info!("Signed in principal {}", principal.uid);
        self.replace_session(Some(principal.clone()));

        Ok(principal)
    }

    async fn sign_out(&self) -> Result<(), IdentityError> {
        if let Some(principal) = self.current_principal() {
            info!("Signing out principal {}", principal.uid);
        }
        self.replace_session(None);
        Ok(())
    }

    fn current_principal(&self) -> Option<Principal> {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
