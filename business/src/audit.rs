//! Best-effort audit trail for moderation actions.
//!
//! A failed audit write is logged under the `audit` target and reported back as
//! [`AuditOutcome::Dropped`]; it is never an error for the caller.

use std::sync::Arc;

use chrono::Utc;
use log::{error, info};
use ustr::Ustr;

use crate::api::ModerationApi;
use crate::models::{ModerationActionKind, ModerationActionRecord, UserRecord};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditOutcome {
    Recorded,
    Dropped(String),
}

impl AuditOutcome {
    pub fn is_recorded(&self) -> bool {
        matches!(self, Self::Recorded)
    }
}

/// Audit description for a user-targeted action.
pub fn describe(kind: ModerationActionKind, user: &UserRecord, warning: Option<&str>) -> String {
    match kind {
        ModerationActionKind::Warn => {
            format!("Advertência aplicada: {}", warning.unwrap_or_default())
        }
        _ => format!("Usuário {} {}", user.name, kind.participle()),
    }
}

#[derive(Clone)]
pub struct AuditTrail {
    api: Arc<dyn ModerationApi>,
    moderator_id: Ustr,
}

impl AuditTrail {
    pub fn new(api: Arc<dyn ModerationApi>, moderator_id: Ustr) -> Self {
        Self { api, moderator_id }
    }

    /// Builds the record for `kind` on `target`, stamped now.
    pub fn entry(
        &self,
        kind: ModerationActionKind,
        target: &UserRecord,
        description: impl Into<String>,
    ) -> ModerationActionRecord {
        ModerationActionRecord::new(self.moderator_id, target.id, kind, description, Utc::now())
    }

    pub async fn write(&self, record: &ModerationActionRecord) -> AuditOutcome {
        match self.api.record_action(record).await {
            Ok(()) => {
                info!(
                    target: "audit",
                    "moderator={} action={} target={} recorded",
                    record.moderator_id, record.action, record.target_id
                );
                AuditOutcome::Recorded
            }
            Err(e) => {
                error!(
                    target: "audit",
                    "Erro ao registrar ação: moderator={} action={} target={}: {e}",
                    record.moderator_id, record.action, record.target_id
                );
                AuditOutcome::Dropped(e.to_string())
            }
        }
    }
}
