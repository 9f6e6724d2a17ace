//! Moderation workspace: the loaded user list and the per-action pipeline.
//!
//! Every action runs the same steps:
//!
//! 1. Ask the moderator (confirmation, or a text dialog for warnings)
//! 2. Issue the remote mutation; on failure stop here, local state untouched
//! 3. Reconcile the local list through [`crate::reducers`]
//! 4. Write an audit record, best effort
//! 5. Report the outcome, with a notice for suspend/reactivate/delete
//!
//! Actions take `&mut self`, so two of them can never interleave on one
//! workspace.

use std::mem;
use std::sync::Arc;

use log::{error, info};
use thiserror::Error;
use ustr::Ustr;

use crate::api::{ApiError, ModerationApi};
use crate::audit::{AuditOutcome, AuditTrail, describe};
use crate::models::{ModerationActionKind, UserRecord};
use crate::reducers::{UsersAction, reduce};
use crate::session::ModeratorSession;

/// Moderator interaction needed mid-pipeline.
pub trait Prompter {
    /// Blocking yes/no question.
    fn confirm(&self, message: &str) -> bool;

    /// Free-text dialog. `None` means the moderator cancelled.
    fn input(&self, title: &str) -> Option<String>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Loading,
    Ready,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The moderator backed out before anything was sent.
    Cancelled,
    Completed {
        kind: ModerationActionKind,
        target: Ustr,
        /// Success message for the moderator. Warnings have none.
        notice: Option<String>,
        audit: AuditOutcome,
    },
}

impl ActionOutcome {
    pub fn notice(&self) -> Option<&str> {
        match self {
            Self::Completed { notice, .. } => notice.as_deref(),
            Self::Cancelled => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkspaceError {
    #[error("Erro ao buscar os usuários")]
    LoadFailed(#[source] ApiError),
    #[error("A lista de usuários não está carregada.")]
    NotLoaded,
    #[error("Usuário {0} não encontrado.")]
    UnknownUser(Ustr),
    #[error("Erro ao {} usuário: {detail}", .kind.verb())]
    Mutation {
        kind: ModerationActionKind,
        detail: String,
    },
    #[error("Por favor, insira uma advertência.")]
    EmptyWarning,
}

fn mutation_error(kind: ModerationActionKind, err: &ApiError) -> WorkspaceError {
    WorkspaceError::Mutation {
        kind,
        detail: err.detail().to_owned(),
    }
}

pub fn confirmation_message(kind: ModerationActionKind, user: &UserRecord) -> String {
    format!("Tem certeza que deseja {} o usuário {}?", kind.verb(), user.name)
}

pub fn warning_dialog_title(user: &UserRecord) -> String {
    format!("Advertir Usuário: {}", user.name)
}

fn success_notice(kind: ModerationActionKind, user: &UserRecord) -> String {
    format!("Usuário {} foi {} com sucesso.", user.name, kind.participle())
}

pub struct ModerationWorkspace {
    api: Arc<dyn ModerationApi>,
    session: ModeratorSession,
    audit: AuditTrail,
    users: Vec<UserRecord>,
    load_state: LoadState,
}

impl ModerationWorkspace {
    pub fn new(api: Arc<dyn ModerationApi>, session: ModeratorSession) -> Self {
        let audit = AuditTrail::new(Arc::clone(&api), session.moderator_id);
        Self {
            api,
            session,
            audit,
            users: Vec::new(),
            load_state: LoadState::Loading,
        }
    }

    pub fn session(&self) -> &ModeratorSession {
        &self.session
    }

    pub fn users(&self) -> &[UserRecord] {
        &self.users
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn user(&self, id: &str) -> Option<&UserRecord> {
        self.users.iter().find(|u| u.id.as_str() == id)
    }

    /// Fetches the full user list. A failed fetch drops any rows from an
    /// earlier load, so nothing actionable is left on screen.
    pub async fn load(&mut self) -> Result<usize, WorkspaceError> {
        self.load_state = LoadState::Loading;
        info!("Loading users for moderator {}", self.session.moderator_id);

        match self.api.list_users().await {
            Ok(users) => {
                info!("Loaded {} users", users.len());
                self.users = users;
                self.load_state = LoadState::Ready;
                Ok(self.users.len())
            }
            Err(e) => {
                error!("Failed to load users: {e}");
                let err = WorkspaceError::LoadFailed(e);
                self.users.clear();
                self.load_state = LoadState::Failed(err.to_string());
                Err(err)
            }
        }
    }

    fn target(&self, id: &str) -> Result<UserRecord, WorkspaceError> {
        if self.load_state != LoadState::Ready {
            return Err(WorkspaceError::NotLoaded);
        }
        self.user(id)
            .cloned()
            .ok_or_else(|| WorkspaceError::UnknownUser(Ustr::from(id)))
    }

    fn apply(&mut self, action: UsersAction) {
        self.users = reduce(mem::take(&mut self.users), action);
    }

    /// Suspends an active user or reactivates a suspended one.
    pub async fn toggle_suspension(
        &mut self,
        id: &str,
        prompter: &dyn Prompter,
    ) -> Result<ActionOutcome, WorkspaceError> {
        let user = self.target(id)?;
        let kind = user.toggle_kind();

        if !prompter.confirm(&confirmation_message(kind, &user)) {
            return Ok(ActionOutcome::Cancelled);
        }

        let suspended = !user.suspended;
        self.api
            .set_suspended(user.id.as_str(), suspended)
            .await
            .map_err(|e| {
                error!("Erro ao {kind} usuário {}: {e}", user.id);
                mutation_error(kind, &e)
            })?;

        self.apply(UsersAction::SetSuspended {
            id: user.id,
            suspended,
        });

        self.finish(kind, &user, None).await
    }

    /// Permanently removes a user.
    pub async fn delete(
        &mut self,
        id: &str,
        prompter: &dyn Prompter,
    ) -> Result<ActionOutcome, WorkspaceError> {
        let user = self.target(id)?;
        let kind = ModerationActionKind::Delete;

        if !prompter.confirm(&confirmation_message(kind, &user)) {
            return Ok(ActionOutcome::Cancelled);
        }

        self.api.delete_user(user.id.as_str()).await.map_err(|e| {
            error!("Erro ao excluir usuário {}: {e}", user.id);
            mutation_error(kind, &e)
        })?;

        self.apply(UsersAction::Remove { id: user.id });

        self.finish(kind, &user, None).await
    }

    /// Records a warning. The user record itself is not modified.
    pub async fn warn(
        &mut self,
        id: &str,
        prompter: &dyn Prompter,
    ) -> Result<ActionOutcome, WorkspaceError> {
        let user = self.target(id)?;

        let Some(text) = prompter.input(&warning_dialog_title(&user)) else {
            return Ok(ActionOutcome::Cancelled);
        };
        if text.trim().is_empty() {
            return Err(WorkspaceError::EmptyWarning);
        }

        self.finish(ModerationActionKind::Warn, &user, Some(&text))
            .await
    }

    async fn finish(
        &self,
        kind: ModerationActionKind,
        user: &UserRecord,
        warning: Option<&str>,
    ) -> Result<ActionOutcome, WorkspaceError> {
        let record = self.audit.entry(kind, user, describe(kind, user, warning));
        let audit = self.audit.write(&record).await;

        info!(
            "Moderator {} applied {kind} to {}",
            self.session.moderator_id, user.id
        );

        let notice = match kind {
            ModerationActionKind::Warn => None,
            _ => Some(success_notice(kind, user)),
        };

        Ok(ActionOutcome::Completed {
            kind,
            target: user.id,
            notice,
            audit,
        })
    }
}
