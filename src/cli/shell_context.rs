use std::io;

use dialoguer::theme::ColorfulTheme;
use strsim::levenshtein;
use thiserror::Error;
use tracing::debug;

use crate::cli::commands::{self, CommandDefinition, CommandRegistry};
use crate::cli::io as cli_io;
use crate::cli::output::{self, OutputPreferences};
use crate::config::{Config, ConfigError, ConfigManager};
use crate::core::JarStore;
use crate::domain::{is_index_selector, normalize_name};
use crate::errors::JarError;
use crate::storage::JsonFileStorage;

const SUGGESTION_DISTANCE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Jar(#[from] JarError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

/// Errors that end the shell.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Jar(#[from] JarError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Readline(#[from] rustyline::error::ReadlineError),
}

/// State shared by every command handler for the lifetime of the shell.
pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub store: JarStore,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub theme: ColorfulTheme,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        Self::with_config_manager(mode, ConfigManager::new()?)
    }

    pub fn with_config_manager(
        mode: CliMode,
        config_manager: ConfigManager,
    ) -> Result<Self, CliError> {
        let config = config_manager.load()?;
        output::set_preferences(OutputPreferences {
            color_enabled: config.ui_color_enabled,
        });
        let data_dir = config.resolve_data_dir(config_manager.base_dir());
        debug!(data_dir = %data_dir.display(), "opening jar storage");
        let store = JarStore::new(Box::new(JsonFileStorage::new(data_dir)?));
        Ok(Self {
            mode,
            registry: CommandRegistry::new(commands::all_definitions()),
            store,
            config_manager,
            config,
            theme: ColorfulTheme::default(),
            running: true,
        })
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub fn command(&self, name: &str) -> Option<&CommandDefinition> {
        self.registry.get(name)
    }

    /// Resolves a jar argument: `@N` selects the N-th jar of `list`, anything
    /// else is taken as a name.
    pub fn resolve_jar(&self, selector: &str) -> Result<String, CommandError> {
        let trimmed = selector.trim();
        if is_index_selector(trimmed) {
            let raw = &trimmed[1..];
            let names = self.store.list()?;
            let index: usize = raw.parse().map_err(|_| {
                CommandError::InvalidArguments(format!("invalid jar number `{}`", selector))
            })?;
            return index
                .checked_sub(1)
                .and_then(|idx| names.get(idx))
                .cloned()
                .ok_or_else(|| {
                    CommandError::InvalidArguments(format!(
                        "no jar number {} (there are {})",
                        index,
                        names.len()
                    ))
                });
        }
        Ok(normalize_name(selector)?)
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        let Some(handler) = self.registry.get(command).map(|def| def.handler) else {
            self.suggest_command(raw);
            return Ok(LoopControl::Continue);
        };
        match handler(self, args) {
            Ok(()) => Ok(LoopControl::Continue),
            Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
            Err(err) => Err(err),
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let needle = input.to_lowercase();
        let best = self
            .registry
            .names()
            .map(|name| (levenshtein(name, &needle), name))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, name)) = best {
            if distance <= SUGGESTION_DISTANCE {
                cli_io::print_hint(format!("Did you mean `{}`?", name));
            }
        }
    }

    pub(crate) fn confirm(&self, prompt: &str) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, prompt, false)
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(message);
                cli_io::print_hint("Use `help <command>` for usage details.");
            }
            CommandError::Jar(err @ JarError::NotFound(_)) => {
                cli_io::print_error(err);
                cli_io::print_hint("Use `list` to see existing jars.");
            }
            CommandError::Jar(err @ JarError::DuplicateName(_)) => {
                cli_io::print_error(err);
                cli_io::print_hint("Pick another name or `delete` the existing jar first.");
            }
            other => cli_io::print_error(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn context() -> (ShellContext, TempDir) {
        let dir = TempDir::new().expect("tempdir");
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");
        let ctx = ShellContext::with_config_manager(CliMode::Script, manager).expect("context");
        (ctx, dir)
    }

    #[test]
    fn resolve_jar_by_index_and_name() {
        let (ctx, _dir) = context();
        ctx.store.create("Bike", 10).unwrap();
        ctx.store.create("Amp", 10).unwrap();

        assert_eq!(ctx.resolve_jar("@1").unwrap(), "Amp");
        assert_eq!(ctx.resolve_jar("@2").unwrap(), "Bike");
        assert_eq!(ctx.resolve_jar(" Bike ").unwrap(), "Bike");
        assert_eq!(ctx.resolve_jar("@home").unwrap(), "@home");
        assert!(matches!(
            ctx.resolve_jar("@0"),
            Err(CommandError::InvalidArguments(_))
        ));
        assert!(matches!(
            ctx.resolve_jar("@3"),
            Err(CommandError::InvalidArguments(_))
        ));
    }

    #[test]
    fn new_rejects_names_that_look_like_selectors() {
        let (mut ctx, _dir) = context();
        let err = ctx.dispatch("new", "new", &["@1", "10"]).unwrap_err();
        assert!(matches!(err, CommandError::Jar(JarError::InvalidInput(_))));
        ctx.dispatch("new", "new", &["Bike", "10"]).unwrap();
        let err = ctx.dispatch("rename", "rename", &["Bike", "@2"]).unwrap_err();
        assert!(matches!(err, CommandError::Jar(JarError::InvalidInput(_))));
        assert_eq!(ctx.store.list().unwrap(), vec!["Bike"]);
    }

    #[test]
    fn dispatch_runs_commands_and_exit() {
        let (mut ctx, _dir) = context();
        let control = ctx.dispatch("new", "new", &["Laptop", "1000000"]).unwrap();
        assert_eq!(control, LoopControl::Continue);
        ctx.dispatch("deposit", "deposit", &["@1", "500,000"]).unwrap();
        assert_eq!(ctx.store.read("Laptop").unwrap().current, 500_000);

        assert_eq!(
            ctx.dispatch("exit", "exit", &[]).unwrap(),
            LoopControl::Exit
        );
    }

    #[test]
    fn unknown_command_is_not_an_error() {
        let (mut ctx, _dir) = context();
        assert_eq!(
            ctx.dispatch("lsit", "lsit", &[]).unwrap(),
            LoopControl::Continue
        );
    }

    #[test]
    fn invalid_amount_never_reaches_store() {
        let (mut ctx, _dir) = context();
        ctx.dispatch("new", "new", &["Trip", "100"]).unwrap();
        let err = ctx.dispatch("deposit", "deposit", &["Trip", "ten"]).unwrap_err();
        assert!(matches!(err, CommandError::Jar(JarError::InvalidInput(_))));
        assert_eq!(ctx.store.read("Trip").unwrap().current, 0);
    }
}
