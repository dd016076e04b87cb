use crate::cli::commands::CommandDefinition;
use crate::cli::help;
use crate::cli::info_screen;
use crate::cli::io;
use crate::cli::output::{self, section as output_section, OutputPreferences};
use crate::cli::shell_context::{CommandError, CommandResult, ShellContext};
use crate::config::Config;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new("info", "Show the live information panel", "info", cmd_info),
        CommandDefinition::new(
            "config",
            "Show or change a setting",
            "config [<key> <value>]",
            cmd_config,
        ),
        CommandDefinition::new(
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        ),
        CommandDefinition::new("exit", "Exit the shell", "exit", cmd_exit),
    ]
}

fn cmd_info(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    info_screen::run(context)
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => {
            output_section("Configuration");
            for key in Config::KEYS {
                io::print_info(format!("  {:<16} {}", key, context.config.get(key)?));
            }
            io::print_hint(format!(
                "Stored in {}",
                context.config_manager.config_path().display()
            ));
            Ok(())
        }
        [key] => {
            io::print_info(format!("{} = {}", key, context.config.get(key)?));
            Ok(())
        }
        [key, value] => {
            let mut updated = context.config.clone();
            updated.set(key, value)?;
            context.config_manager.save(&updated)?;
            context.config = updated;
            output::set_preferences(OutputPreferences {
                color_enabled: context.config.ui_color_enabled,
            });
            io::print_success(format!("{} set to {}.", key, context.config.get(key)?));
            if *key == "data_dir" {
                io::print_hint("The new data directory is used from the next start.");
            }
            Ok(())
        }
        _ => Err(CommandError::InvalidArguments(
            "usage: config [<key> <value>]".into(),
        )),
    }
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first() {
        match context.command(&name.to_lowercase()) {
            Some(command) => help::print_command(command),
            None => context.suggest_command(name),
        }
        return Ok(());
    }

    help::print_overview(&context.registry);
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
