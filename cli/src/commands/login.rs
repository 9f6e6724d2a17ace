//! Login command implementation.

use anyhow::Result;
use tracing::{info, instrument};

use crate::context::CliContext;
use crate::output::Output;

/// Runs the session gate only and reports who was verified.
#[instrument(skip_all, name = "login")]
pub async fn run_login(mut ctx: CliContext) -> Result<()> {
    let out = Output::new();

    out.header("Volun · Login de moderador");
    out.newline();

    let session = match ctx.sign_in(&out).await {
        Ok(session) => session,
        Err(e) => {
            out.error(format!("{e:#}"));
            std::process::exit(1);
        }
    };

    info!("Logged in as moderator {}", session.moderator_id);
    out.newline();
    out.success(format!("Bem-vindo, {}", session.email));
    out.labeled_indent("ID do moderador", session.moderator_id, 2);

    ctx.shutdown().await;
    Ok(())
}
