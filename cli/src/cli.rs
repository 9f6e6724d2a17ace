use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "volun-mod")]
#[command(about = "Moderation console for Volun", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Base URL of the Volun REST API
    #[arg(long, global = true, env = "VOLUN_API_BASE_URL")]
    pub api_url: Option<String>,

    /// Moderator email (prompted for when missing)
    #[arg(long, global = true, env = "VOLUN_EMAIL")]
    pub email: Option<String>,

    /// Moderator password; the masked prompt is used when unset
    #[arg(long, global = true, env = "VOLUN_PASSWORD", hide = true, hide_env_values = true)]
    pub password: Option<String>,

    /// Show timing/latency information
    #[arg(long, global = true)]
    pub timing: bool,

    /// Enable verbose debug output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and check moderator privileges
    Login,
    /// List every user account
    Users,
    /// Suspend an active user, or reactivate a suspended one
    Suspend {
        /// User ID
        id: String,
    },
    /// Send a warning to a user
    Warn {
        /// User ID
        id: String,

        /// Warning text (prompted for when missing)
        #[arg(long, short = 'm')]
        message: Option<String>,
    },
    /// Permanently delete a user
    Delete {
        /// User ID
        id: String,
    },
    /// Interactive moderation console (default)
    Console,
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
