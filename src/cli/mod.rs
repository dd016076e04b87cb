//! Interactive shell over the jar store. Holds no state of its own beyond the
//! loaded configuration.

pub mod commands;
pub mod format;
pub mod help;
pub mod info_screen;
pub mod io;
pub mod output;
mod shell;
pub mod shell_context;

pub use shell::{run_cli, SCRIPT_ENV};
pub use shell_context::{CliError, CliMode, CommandError, ShellContext};
