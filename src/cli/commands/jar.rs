use crate::cli::commands::CommandDefinition;
use crate::cli::format;
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::shell_context::{CommandError, CommandResult, ShellContext};
use crate::core::metrics;
use crate::domain::{parse_amount, SavingsJar};
use crate::errors::JarError;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new("new", "Create a savings jar", "new <name> <target>", cmd_new),
        CommandDefinition::new("list", "List every jar with its progress", "list", cmd_list),
        CommandDefinition::new("show", "Show one jar in detail", "show <jar>", cmd_show),
        CommandDefinition::new(
            "deposit",
            "Add money to a jar",
            "deposit <jar> <amount>",
            cmd_deposit,
        ),
        CommandDefinition::new(
            "withdraw",
            "Take money out of a jar (never below zero)",
            "withdraw <jar> <amount>",
            cmd_withdraw,
        ),
        CommandDefinition::new(
            "rename",
            "Give a jar a new name",
            "rename <jar> <new-name>",
            cmd_rename,
        ),
        CommandDefinition::new(
            "target",
            "Change the goal amount of a jar",
            "target <jar> <amount>",
            cmd_target,
        ),
        CommandDefinition::new(
            "delete",
            "Delete a jar permanently",
            "delete <jar> [--yes]",
            cmd_delete,
        ),
    ]
}

fn expect_args<'a>(
    args: &[&'a str],
    count: usize,
    usage: &str,
) -> Result<Vec<&'a str>, CommandError> {
    if args.len() == count {
        Ok(args.to_vec())
    } else {
        Err(CommandError::InvalidArguments(format!("usage: {}", usage)))
    }
}

fn cmd_new(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let args = expect_args(args, 2, "new <name> <target>")?;
    let target = parse_amount(args[1])?;
    let jar = context.store.create(args[0], target)?;
    io::print_success(format!(
        "Jar `{}` created with a target of {}.",
        jar.name,
        format::money(&context.config.currency_symbol, jar.target)
    ));
    Ok(())
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let rows = context.store.overview()?;
    if rows.is_empty() {
        io::print_warning("No savings jars yet.");
        io::print_hint("Create one with `new <name> <target>`.");
        return Ok(());
    }
    output_section("Savings jars");
    for line in format::overview_table(&context.config.currency_symbol, &rows) {
        io::print_info(line);
    }
    Ok(())
}

fn cmd_show(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let args = expect_args(args, 1, "show <jar>")?;
    let name = context.resolve_jar(args[0])?;
    let jar = context.store.read(&name)?;
    print_detail(context, &jar);
    Ok(())
}

fn cmd_deposit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let args = expect_args(args, 2, "deposit <jar> <amount>")?;
    let name = context.resolve_jar(args[0])?;
    let amount = parse_amount(args[1])?;
    let jar = context.store.deposit(&name, amount)?;
    io::print_success(format!(
        "Saved {} into `{}`.",
        format::money(&context.config.currency_symbol, amount),
        jar.name
    ));
    print_progress(context, &jar);
    Ok(())
}

fn cmd_withdraw(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let args = expect_args(args, 2, "withdraw <jar> <amount>")?;
    let name = context.resolve_jar(args[0])?;
    let amount = parse_amount(args[1])?;
    let before = context.store.read(&name)?.current;
    let jar = context.store.withdraw(&name, amount)?;
    io::print_success(format!(
        "Took {} out of `{}`.",
        format::money(&context.config.currency_symbol, before.saturating_sub(jar.current)),
        jar.name
    ));
    if amount > before {
        io::print_warning("Withdrawal exceeded the balance; the jar is now empty.");
    }
    print_progress(context, &jar);
    Ok(())
}

fn cmd_rename(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let args = expect_args(args, 2, "rename <jar> <new-name>")?;
    let name = context.resolve_jar(args[0])?;
    let jar = context.store.rename(&name, args[1])?;
    io::print_success(format!("Jar `{}` renamed to `{}`.", name, jar.name));
    Ok(())
}

fn cmd_target(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let args = expect_args(args, 2, "target <jar> <amount>")?;
    let name = context.resolve_jar(args[0])?;
    let target = parse_amount(args[1])?;
    let jar = context.store.retarget(&name, target)?;
    io::print_success(format!(
        "Target of `{}` set to {}.",
        jar.name,
        format::money(&context.config.currency_symbol, jar.target)
    ));
    print_progress(context, &jar);
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (selector, assume_yes) = match args {
        [selector] => (*selector, false),
        [selector, "--yes"] | ["--yes", selector] => (*selector, true),
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: delete <jar> [--yes]".into(),
            ))
        }
    };
    let name = context.resolve_jar(selector)?;
    if !context.store.exists(&name)? {
        return Err(JarError::NotFound(name).into());
    }
    if !assume_yes && !context.confirm(&format!("Delete jar `{}` permanently?", name))? {
        io::print_info("Nothing deleted.");
        return Ok(());
    }
    context.store.delete(&name)?;
    io::print_success(format!("Jar `{}` deleted.", name));
    Ok(())
}

fn print_progress(context: &ShellContext, jar: &SavingsJar) {
    let symbol = &context.config.currency_symbol;
    io::print_info(format!(
        "  {} / {}  {}",
        format::money(symbol, jar.current),
        format::money(symbol, jar.target),
        format::progress_bar(metrics::progress_percent(jar))
    ));
    if metrics::is_complete(jar) {
        io::print_success(format!(
            "`{}` reached its goal ({}).",
            jar.name,
            metrics::days_to_completion(jar)
        ));
    }
}

fn print_detail(context: &ShellContext, jar: &SavingsJar) {
    let symbol = &context.config.currency_symbol;
    output_section(format!("Jar: {}", jar.name));
    io::print_info(format!(
        "  Saved       : {} / {}",
        format::money(symbol, jar.current),
        format::money(symbol, jar.target)
    ));
    io::print_info(format!(
        "  Remaining   : {}",
        format::money(symbol, jar.remaining())
    ));
    io::print_info(format!(
        "  Progress    : {} {}",
        format::progress_bar(metrics::progress_percent(jar)),
        format::status_glyph(metrics::is_complete(jar))
    ));
    io::print_info(format!(
        "  Days to goal: {}",
        metrics::days_to_completion(jar)
    ));
    io::print_info(format!(
        "  Created     : {}",
        format::display_timestamp(&jar.created_at)
    ));
    io::print_info(format!(
        "  Updated     : {}",
        format::display_timestamp(&jar.updated_at)
    ));
}
