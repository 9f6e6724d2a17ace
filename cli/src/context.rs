//! Service wiring and the interactive sign-in shared by every command.

use std::io::IsTerminal as _;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use inquire::{Password, PasswordDisplayMode, Text};
use tracing::{info, instrument, warn};
use volun_business::{
    BusinessConfig, FirebaseIdentity, GateError, IdentityProvider, LoginInput, ModerationApi,
    ModerationWorkspace, ModeratorSession, RestModerationApi, SessionGate,
};

use crate::config::StoredConfig;
use crate::output::Output;

/// Everything a command needs, built once from the resolved configuration.
pub struct CliContext {
    pub api: Arc<dyn ModerationApi>,
    pub gate: SessionGate,
    file_config: StoredConfig,
    email: Option<String>,
    password: Option<String>,
}

impl CliContext {
    pub fn new(
        business: BusinessConfig,
        file_config: StoredConfig,
        email: Option<String>,
        password: Option<String>,
    ) -> Self {
        let api: Arc<dyn ModerationApi> = Arc::new(RestModerationApi::new(business.clone()));
        let identity: Arc<dyn IdentityProvider> = Arc::new(FirebaseIdentity::new(business));

        Self {
            gate: SessionGate::new(identity, Arc::clone(&api)),
            api,
            file_config,
            email,
            password,
        }
    }

    fn prompt_email(&self, retry: Option<&str>) -> Result<String> {
        if retry.is_none()
            && let Some(email) = &self.email
        {
            return Ok(email.clone());
        }

        let mut prompt = Text::new("Email:").with_help_message("Email da conta de moderador");
        if let Some(last) = retry.or(self.file_config.config.last_email.as_deref()) {
            prompt = prompt.with_initial_value(last);
        }
        prompt.prompt().context("Failed to read email")
    }

    fn prompt_password(&self) -> Result<String> {
        if let Some(password) = &self.password {
            return Ok(password.clone());
        }

        Password::new("Senha:")
            .with_display_mode(PasswordDisplayMode::Masked)
            .without_confirmation()
            .prompt()
            .context("Failed to read password")
    }

    /// Whether a failed login can be retried by prompting again.
    fn can_retry(&self) -> bool {
        self.password.is_none() && std::io::stdin().is_terminal()
    }

    /// Runs the session gate until a moderator is verified.
    ///
    /// Interactive terminals get another attempt after each failure; with
    /// credentials from flags or the environment the first failure is final.
    #[instrument(skip_all, name = "sign_in")]
    pub async fn sign_in(&mut self, out: &Output) -> Result<ModeratorSession> {
        let mut retry: Option<String> = None;
        loop {
            let email = self.prompt_email(retry.as_deref())?;
            let password = self.prompt_password()?;

            out.dim("Entrando...");
            match self.gate.login(&LoginInput::new(email.trim(), password)).await {
                Ok(session) => {
                    self.remember(&session.email);
                    return Ok(session);
                }
                Err(e) if self.can_retry() && e != GateError::InProgress => {
                    out.error(&e);
                    out.newline();
                    retry = Some(email);
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn remember(&mut self, email: &str) {
        if let Err(e) = self.file_config.remember_email(email) {
            warn!("Could not save config: {e:#}");
        }
    }

    /// Signs in and loads the user list.
    #[instrument(skip_all, name = "open_workspace")]
    pub async fn open_workspace(&mut self, out: &Output) -> Result<ModerationWorkspace> {
        let session = self.sign_in(out).await?;
        info!("Opening workspace for {}", session.moderator_id);

        let mut workspace = ModerationWorkspace::new(Arc::clone(&self.api), session);
        workspace.load().await?;
        Ok(workspace)
    }

    pub async fn shutdown(&self) {
        self.gate.logout().await;
    }
}
