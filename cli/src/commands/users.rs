//! Users command: prints the full user list.

use anyhow::Result;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use tracing::instrument;
use volun_business::UserRecord;

use crate::context::CliContext;
use crate::output::Output;

#[derive(Tabled)]
pub struct UserRow {
    #[tabled(rename = "Nome")]
    name: String,
    #[tabled(rename = "Sobrenome")]
    surname: String,
    #[tabled(rename = "DDD")]
    area_code: String,
    #[tabled(rename = "Telefone")]
    phone: String,
    #[tabled(rename = "Data de Nascimento")]
    birth_date: String,
    #[tabled(rename = "Status")]
    status: &'static str,
    #[tabled(rename = "ID")]
    id: String,
}

impl From<&UserRecord> for UserRow {
    fn from(user: &UserRecord) -> Self {
        Self {
            name: user.name.clone(),
            surname: user.surname.clone(),
            area_code: user.area_code.clone(),
            phone: user.phone.clone(),
            birth_date: user.birth_date.clone(),
            status: user.status_label(),
            id: user.id.to_string(),
        }
    }
}

pub fn users_table(users: &[UserRecord]) -> String {
    let mut table = Table::new(users.iter().map(UserRow::from));
    table.with(Style::rounded());
    table.to_string()
}

pub fn print_users(out: &Output, users: &[UserRecord]) {
    if users.is_empty() {
        out.dim("Nenhum usuário encontrado.");
        return;
    }
    out.print(users_table(users));
    out.count("Total", users.len());
}

#[instrument(skip_all, name = "users")]
pub async fn run_users(mut ctx: CliContext) -> Result<()> {
    let out = Output::new();

    let workspace = match ctx.open_workspace(&out).await {
        Ok(workspace) => workspace,
        Err(e) => {
            out.error(format!("{e:#}"));
            ctx.shutdown().await;
            std::process::exit(1);
        }
    };

    out.newline();
    print_users(&out, workspace.users());

    ctx.shutdown().await;
    Ok(())
}
