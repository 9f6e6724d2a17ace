//! One-shot moderation commands: `suspend`, `warn` and `delete`.

use anyhow::Result;
use tracing::instrument;
use volun_business::{ActionOutcome, ModerationWorkspace, Prompter, WorkspaceError};

use crate::context::CliContext;
use crate::output::Output;
use crate::prompt::TerminalPrompter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ToggleSuspension,
    Warn,
    Delete,
}

/// Runs one pipeline on `id`.
pub async fn perform(
    workspace: &mut ModerationWorkspace,
    action: Action,
    id: &str,
    prompter: &dyn Prompter,
) -> Result<ActionOutcome, WorkspaceError> {
    match action {
        Action::ToggleSuspension => workspace.toggle_suspension(id, prompter).await,
        Action::Warn => workspace.warn(id, prompter).await,
        Action::Delete => workspace.delete(id, prompter).await,
    }
}

/// Prints the outcome. Returns `false` when the action failed.
pub fn report(out: &Output, result: &Result<ActionOutcome, WorkspaceError>) -> bool {
    match result {
        Ok(ActionOutcome::Cancelled) => {
            out.dim("Ação cancelada.");
            true
        }
        Ok(outcome) => {
            if let Some(notice) = outcome.notice() {
                out.success(notice);
            }
            true
        }
        Err(WorkspaceError::EmptyWarning) => {
            out.warning(WorkspaceError::EmptyWarning);
            false
        }
        Err(e) => {
            out.error(e);
            false
        }
    }
}

async fn run_single(
    mut ctx: CliContext,
    action: Action,
    id: &str,
    prompter: &TerminalPrompter,
) -> Result<()> {
    let out = Output::new();

    let mut workspace = match ctx.open_workspace(&out).await {
        Ok(workspace) => workspace,
        Err(e) => {
            out.error(format!("{e:#}"));
            ctx.shutdown().await;
            std::process::exit(1);
        }
    };

    let result = perform(&mut workspace, action, id, prompter).await;
    let ok = report(&out, &result);

    ctx.shutdown().await;
    if !ok {
        std::process::exit(1);
    }
    Ok(())
}

#[instrument(skip_all, name = "suspend", fields(id = %id))]
pub async fn run_suspend(ctx: CliContext, id: String) -> Result<()> {
    run_single(ctx, Action::ToggleSuspension, &id, &TerminalPrompter::new()).await
}

#[instrument(skip_all, name = "warn", fields(id = %id))]
pub async fn run_warn(ctx: CliContext, id: String, message: Option<String>) -> Result<()> {
    run_single(ctx, Action::Warn, &id, &TerminalPrompter::with_message(message)).await
}

#[instrument(skip_all, name = "delete", fields(id = %id))]
pub async fn run_delete(ctx: CliContext, id: String) -> Result<()> {
    run_single(ctx, Action::Delete, &id, &TerminalPrompter::new()).await
}
