//! Command implementations for the moderation console.
//!
//! Each subcommand is implemented in its own module.

pub mod act;
pub mod completions;
pub mod console;
pub mod login;
pub mod users;

pub use act::{run_delete, run_suspend, run_warn};
pub use completions::generate_completions;
pub use console::run_console;
pub use login::run_login;
pub use users::run_users;
