//! Wire types for the `/usuarios` and `/acoes-moderacao` resources.
//!
//! Field names follow the API's Portuguese JSON keys; the Rust side uses
//! English names and `serde(rename)`.

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use ustr::Ustr;

/// Fixed `alvo_tipo` for every action this console records.
pub const TARGET_TYPE_USER: &str = "usuario";

/// A user account as returned by `GET /usuarios/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(rename = "_id")]
    pub id: Ustr,
    #[serde(rename = "nome", default)]
    pub name: String,
    #[serde(rename = "sobrenome", default)]
    pub surname: String,
    /// Area code. The API has served both strings and numbers here.
    #[serde(rename = "ddd", default, deserialize_with = "string_or_number")]
    pub area_code: String,
    #[serde(rename = "telefone", default, deserialize_with = "string_or_number")]
    pub phone: String,
    #[serde(rename = "data_nascimento", default)]
    pub birth_date: String,
    #[serde(rename = "userSuspenso", default)]
    pub suspended: bool,
}

impl UserRecord {
    pub fn status_label(&self) -> &'static str {
        if self.suspended { "Suspenso" } else { "Ativo" }
    }

    /// The action the suspend/reactivate toggle would perform on this row.
    pub fn toggle_kind(&self) -> ModerationActionKind {
        if self.suspended {
            ModerationActionKind::Reactivate
        } else {
            ModerationActionKind::Suspend
        }
    }
}

/// The subset of `GET /usuarios/{id}` the session gate reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Profile {
    #[serde(rename = "isModerator", default)]
    pub is_moderator: bool,
}

/// Body of `PUT /usuarios/{id}` when toggling suspension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SuspensionPatch {
    #[serde(rename = "userSuspenso")]
    pub suspended: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModerationActionKind {
    #[serde(rename = "suspender")]
    Suspend,
    #[serde(rename = "reativar")]
    Reactivate,
    #[serde(rename = "advertir")]
    Warn,
    #[serde(rename = "excluir")]
    Delete,
}

impl ModerationActionKind {
    /// Infinitive used on the wire and in prompts ("suspender", "excluir", ...).
    pub fn verb(self) -> &'static str {
        match self {
            Self::Suspend => "suspender",
            Self::Reactivate => "reativar",
            Self::Warn => "advertir",
            Self::Delete => "excluir",
        }
    }

    /// Past participle used in audit descriptions and notices.
    pub fn participle(self) -> &'static str {
        match self {
            Self::Suspend => "suspenso",
            Self::Reactivate => "reativado",
            Self::Warn => "advertido",
            Self::Delete => "excluído",
        }
    }
}

impl fmt::Display for ModerationActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.verb())
    }
}

/// Body of `POST /acoes-moderacao`. Write-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModerationActionRecord {
    #[serde(rename = "moderador_id")]
    pub moderator_id: Ustr,
    #[serde(rename = "alvo_tipo")]
    pub target_type: String,
    #[serde(rename = "alvo_id")]
    pub target_id: Ustr,
    #[serde(rename = "acao")]
    pub action: ModerationActionKind,
    #[serde(rename = "descricao")]
    pub description: String,
    /// RFC 3339, UTC, millisecond precision.
    #[serde(rename = "data")]
    pub timestamp: String,
}

impl ModerationActionRecord {
    pub fn new(
        moderator_id: Ustr,
        target_id: Ustr,
        action: ModerationActionKind,
        description: impl Into<String>,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            moderator_id,
            target_type: TARGET_TYPE_USER.to_owned(),
            target_id,
            action,
            description: description.into(),
            timestamp: at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
        Null(()),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
        Raw::Null(()) => String::new(),
    })
}
