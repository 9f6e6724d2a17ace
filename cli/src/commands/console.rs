//! Interactive console: pick a user, pick an action, repeat.

use std::fmt;

use anyhow::{Context as _, Result};
use inquire::Select;
use tracing::{info, instrument};
use volun_business::{ModerationWorkspace, UserRecord};

use crate::commands::act::{Action, perform, report};
use crate::commands::users::print_users;
use crate::context::CliContext;
use crate::output::Output;
use crate::prompt::TerminalPrompter;

enum MenuEntry {
    User(UserRecord),
    List,
    Reload,
    Quit,
}

impl fmt::Display for MenuEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User(user) => write!(
                f,
                "{} {} [{}] ({})",
                user.name,
                user.surname,
                user.status_label(),
                user.id
            ),
            Self::List => f.write_str("📋 Mostrar tabela"),
            Self::Reload => f.write_str("🔄 Recarregar lista"),
            Self::Quit => f.write_str("🚪 Sair"),
        }
    }
}

struct ActionEntry {
    action: Option<Action>,
    label: &'static str,
}

impl fmt::Display for ActionEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label)
    }
}

/// Actions offered for `user`; the toggle is labelled by its current state.
fn action_entries(user: &UserRecord) -> Vec<ActionEntry> {
    vec![
        ActionEntry {
            action: Some(Action::ToggleSuspension),
            label: if user.suspended { "Reativar" } else { "Suspender" },
        },
        ActionEntry {
            action: Some(Action::Warn),
            label: "Advertir",
        },
        ActionEntry {
            action: Some(Action::Delete),
            label: "Excluir",
        },
        ActionEntry {
            action: None,
            label: "Voltar",
        },
    ]
}

fn menu(workspace: &ModerationWorkspace) -> Vec<MenuEntry> {
    let mut entries: Vec<MenuEntry> = workspace
        .users()
        .iter()
        .cloned()
        .map(MenuEntry::User)
        .collect();
    entries.extend([MenuEntry::List, MenuEntry::Reload, MenuEntry::Quit]);
    entries
}

#[instrument(skip_all, name = "console")]
pub async fn run_console(mut ctx: CliContext) -> Result<()> {
    let out = Output::new();

    out.header("Volun · Painel de moderação");
    out.newline();

    let mut workspace = match ctx.open_workspace(&out).await {
        Ok(workspace) => workspace,
        Err(e) => {
            out.error(format!("{e:#}"));
            ctx.shutdown().await;
            std::process::exit(1);
        }
    };

    out.newline();
    out.info(format!(
        "Moderador {} · {} usuário(s) carregado(s)",
        workspace.session().email,
        workspace.users().len()
    ));

    let prompter = TerminalPrompter::new();
    loop {
        out.newline();
        let selection = Select::new("Usuário:", menu(&workspace))
            .with_page_size(12)
            .with_help_message("Setas para navegar, digite para filtrar, Esc para sair")
            .prompt_skippable()
            .context("Failed to read selection")?;

        let user = match selection {
            Some(MenuEntry::User(user)) => user,
            Some(MenuEntry::List) => {
                print_users(&out, workspace.users());
                continue;
            }
            Some(MenuEntry::Reload) => {
                match workspace.load().await {
                    Ok(count) => out.info(format!("{count} usuário(s) carregado(s)")),
                    Err(e) => out.error(e),
                }
                continue;
            }
            Some(MenuEntry::Quit) | None => break,
        };

        let choice = Select::new(&format!("Ação para {}:", user.name), action_entries(&user))
            .prompt_skippable()
            .context("Failed to read action")?;

        let Some(ActionEntry {
            action: Some(action),
            ..
        }) = choice
        else {
            continue;
        };

        let result = perform(&mut workspace, action, user.id.as_str(), &prompter).await;
        report(&out, &result);
    }

    info!("Console closed");
    ctx.shutdown().await;
    out.dim("Sessão encerrada.");
    Ok(())
}
