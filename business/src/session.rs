//! Session gate: credential validation, sign-in and moderator verification.
//!
//! ## Flow
//!
//! 1. Validates the email/password pair locally (no network on failure)
//! 2. Sets status to `Authenticating`; a second login while this holds is refused
//! 3. Signs in against the identity provider
//! 4. Fetches `/usuarios/{uid}` and checks `isModerator`
//! 5. On any failure after step 3, signs the principal out again
//! 6. Sets status to `Authenticated` or `Failed` and returns the outcome
//!
//! The returned [`ModeratorSession`] is the only thing the workspace needs to
//! know about who is acting.

use std::fmt;
use std::sync::{Arc, LazyLock};

use log::{error, info, warn};
use regex::Regex;
use thiserror::Error;
use tokio::sync::watch;
use ustr::Ustr;

use crate::api::ModerationApi;
use crate::identity::{IdentityProvider, Principal};

pub const MIN_PASSWORD_LEN: usize = 6;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern is valid"));

/// Credentials typed into the login form.
#[derive(Default, Clone, PartialEq, Eq)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

impl LoginInput {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for LoginInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginInput")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Por favor, preencha todos os campos.")]
    MissingFields,
    #[error("Por favor, insira um email válido.")]
    InvalidEmail,
    #[error("A senha deve ter pelo menos 6 caracteres.")]
    PasswordTooShort,
}

/// Checks run before any network call, in this order.
pub fn validate_credentials(input: &LoginInput) -> Result<(), ValidationError> {
    if input.email.is_empty() || input.password.is_empty() {
        return Err(ValidationError::MissingFields);
    }
    if !EMAIL_RE.is_match(&input.email) {
        return Err(ValidationError::InvalidEmail);
    }
    if input.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GateError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The identity provider refused or could not be reached.
    #[error("Falha no login: {0}")]
    Authentication(String),
    /// The profile check failed without a clear answer.
    #[error("Falha no login: Erro ao verificar permissões.")]
    Verification,
    #[error("Você não possui privilégios de moderação.")]
    NotModerator,
    #[error("Login em andamento.")]
    InProgress,
}

/// The verified moderator, passed explicitly to the workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeratorSession {
    pub moderator_id: Ustr,
    pub email: String,
}

impl From<Principal> for ModeratorSession {
    fn from(principal: Principal) -> Self {
        Self {
            moderator_id: principal.uid,
            email: principal.email,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthStatus {
    #[default]
    NotAuthenticated,
    /// A login call is running. Doubles as the loading flag.
    Authenticating,
    Authenticated(ModeratorSession),
    Failed(String),
}

impl AuthStatus {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Authenticating)
    }

    pub fn moderator_id(&self) -> Option<Ustr> {
        match self {
            Self::Authenticated(session) => Some(session.moderator_id),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Failed(msg) => Some(msg.as_str()),
            _ => None,
        }
    }
}

pub struct SessionGate {
    identity: Arc<dyn IdentityProvider>,
    api: Arc<dyn ModerationApi>,
    status: watch::Sender<AuthStatus>,
}

impl SessionGate {
    pub fn new(identity: Arc<dyn IdentityProvider>, api: Arc<dyn ModerationApi>) -> Self {
        let (status, _) = watch::channel(AuthStatus::default());
        Self {
            identity,
            api,
            status,
        }
    }

    pub fn status(&self) -> AuthStatus {
        self.status.borrow().clone()
    }

    /// Observe status changes, e.g. to render a spinner while loading.
    pub fn subscribe(&self) -> watch::Receiver<AuthStatus> {
        self.status.subscribe()
    }

    pub async fn login(&self, input: &LoginInput) -> Result<ModeratorSession, GateError> {
        if let Err(err) = validate_credentials(input) {
            info!("Login rejected locally: {err}");
            self.status.send_if_modified(|status| {
                if status.is_loading() {
                    return false;
                }
                *status = AuthStatus::Failed(err.to_string());
                true
            });
            return Err(err.into());
        }

        let started = self.status.send_if_modified(|status| {
            if status.is_loading() {
                return false;
            }
            *status = AuthStatus::Authenticating;
            true
        });
        if !started {
            warn!("Login requested while another login is running");
            return Err(GateError::InProgress);
        }

        let result = self.authenticate(input).await;
        match &result {
            Ok(session) => {
                info!("Moderator {} verified", session.moderator_id);
                self.status
                    .send_replace(AuthStatus::Authenticated(session.clone()));
            }
            Err(err) => {
                self.status.send_replace(AuthStatus::Failed(err.to_string()));
            }
        }
        result
    }

    async fn authenticate(&self, input: &LoginInput) -> Result<ModeratorSession, GateError> {
        info!("Signing in {}", input.email);

        let principal = self
            .identity
            .sign_in(&input.email, &input.password)
            .await
            .map_err(|e| GateError::Authentication(e.to_string()))?;

        let profile = match self.api.get_profile(principal.uid.as_str()).await {
            Ok(profile) => profile,
            Err(e) => {
                warn!("Moderator check for {} failed: {e}", principal.uid);
                self.reverse_sign_in(&principal).await;
                return Err(GateError::Verification);
            }
        };

        if !profile.is_moderator {
            info!("{} is not a moderator", principal.uid);
            self.reverse_sign_in(&principal).await;
            return Err(GateError::NotModerator);
        }

        Ok(principal.into())
    }

    async fn reverse_sign_in(&self, principal: &Principal) {
        if let Err(e) = self.identity.sign_out().await {
            error!("Failed to sign out {} after rejection: {e}", principal.uid);
        }
    }

    /// Ends the moderator's session.
    pub async fn logout(&self) {
        if let Err(e) = self.identity.sign_out().await {
            error!("Sign-out failed: {e}");
        }
        self.status.send_replace(AuthStatus::NotAuthenticated);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_fields_rejected_first() {
        assert_eq!(
            validate_credentials(&LoginInput::new("", "")),
            Err(ValidationError::MissingFields)
        );
        assert_eq!(
            validate_credentials(&LoginInput::new("not-an-email", "")),
            Err(ValidationError::MissingFields)
        );
    }

    #[test]
    fn test_email_shape() {
        for email in ["ana", "ana@", "ana@volun", "@volun.org", "ana @volun"] {
            assert_eq!(
                validate_credentials(&LoginInput::new(email, "123456")),
                Err(ValidationError::InvalidEmail),
                "{email} should be rejected"
            );
        }
        assert!(validate_credentials(&LoginInput::new("ana@volun.org", "123456")).is_ok());
    }

    #[test]
    fn test_password_length() {
        assert_eq!(
            validate_credentials(&LoginInput::new("ana@volun.org", "12345")),
            Err(ValidationError::PasswordTooShort)
        );
        // Counted in characters, not bytes.
        assert_eq!(
            validate_credentials(&LoginInput::new("ana@volun.org", "çãéíõ")),
            Err(ValidationError::PasswordTooShort)
        );
        assert!(validate_credentials(&LoginInput::new("ana@volun.org", "çãéíõú")).is_ok());
    }

    #[test]
    fn test_validation_messages_are_localized() {
        assert_eq!(
            GateError::from(ValidationError::InvalidEmail).to_string(),
            "Por favor, insira um email válido."
        );
        assert_eq!(
            GateError::Authentication("INVALID_LOGIN_CREDENTIALS".to_owned()).to_string(),
            "Falha no login: INVALID_LOGIN_CREDENTIALS"
        );
    }

    #[test]
    fn test_login_input_debug_redacts_password() {
        let rendered = format!("{:?}", LoginInput::new("ana@volun.org", "hunter22"));
        assert!(rendered.contains("ana@volun.org"));
        assert!(!rendered.contains("hunter22"));
    }

    #[test]
    fn test_auth_status_accessors() {
        let status = AuthStatus::Authenticated(ModeratorSession {
            moderator_id: Ustr::from("mod-1"),
            email: "mod@volun.org".to_owned(),
        });
        assert!(status.is_authenticated());
        assert!(!status.is_loading());
        assert_eq!(status.moderator_id(), Some(Ustr::from("mod-1")));

        let status = AuthStatus::Failed("x".to_owned());
        assert_eq!(status.error_message(), Some("x"));
        assert!(status.moderator_id().is_none());
        assert!(AuthStatus::Authenticating.is_loading());
    }
}
