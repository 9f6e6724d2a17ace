//! Domain layer of the Volun moderation console.
//!
//! The [`SessionGate`] turns an email/password pair into a verified
//! [`ModeratorSession`]; the [`ModerationWorkspace`] takes that session, loads
//! the user list and runs moderation actions against the REST API.

pub mod api;
pub mod audit;
pub mod config;
pub mod http;
pub mod identity;
pub mod models;
pub mod reducers;
pub mod session;
pub mod workspace;

#[cfg(test)]
mod test_utils;

pub use api::{ApiError, ApiResult, ModerationApi, RestModerationApi};
pub use audit::{AuditOutcome, AuditTrail};
pub use config::BusinessConfig;
pub use identity::{FirebaseIdentity, IdentityError, IdentityProvider, Principal};
pub use models::{
    ModerationActionKind, ModerationActionRecord, Profile, TARGET_TYPE_USER, UserRecord,
};
pub use reducers::UsersAction;
pub use session::{
    AuthStatus, GateError, LoginInput, ModeratorSession, SessionGate, ValidationError,
    validate_credentials,
};
pub use workspace::{ActionOutcome, LoadState, ModerationWorkspace, Prompter, WorkspaceError};
