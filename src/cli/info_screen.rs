//! Live information panel, refreshed until a key listener cancels it.

use std::{
    io::{self, Write},
    thread,
    time::{Duration, Instant},
};

use chrono::NaiveDateTime;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use tracing::warn;

use crate::cli::format;
use crate::cli::io as cli_io;
use crate::cli::shell_context::{CliMode, CommandResult, ShellContext};
use crate::core::{CancellationToken, Clock, JarOverview, SystemClock};

const POLL_INTERVAL: Duration = Duration::from_millis(50);
const WAIT_STEP: Duration = Duration::from_millis(10);
const FOOTER: &str = "Press Enter to return...";

/// Aggregate figures shown in the jar panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoSummary {
    pub jars: usize,
    pub complete: usize,
    pub saved: u64,
    pub symbol: String,
}

impl InfoSummary {
    pub fn from_rows(rows: &[JarOverview], symbol: &str) -> Self {
        Self {
            jars: rows.len(),
            complete: rows.iter().filter(|row| row.complete).count(),
            saved: rows
                .iter()
                .fold(0u64, |total, row| total.saturating_add(row.jar.current)),
            symbol: symbol.to_string(),
        }
    }
}

/// Bordered panel: `╭─ title ─╮`, one `│ line │` per body line, `╰──╯`.
pub fn panel(title: &str, body: &[String]) -> Vec<String> {
    let inner = body
        .iter()
        .map(|line| line.chars().count())
        .chain(std::iter::once(title.chars().count() + 2))
        .max()
        .unwrap_or(0);
    let mut lines = Vec::with_capacity(body.len() + 2);
    let title_len = title.chars().count() + 2;
    lines.push(format!(
        "╭─ {} {}╮",
        title,
        "─".repeat(inner + 1 - title_len)
    ));
    for line in body {
        let pad = inner - line.chars().count();
        lines.push(format!("│ {}{} │", line, " ".repeat(pad)));
    }
    lines.push(format!("╰{}╯", "─".repeat(inner + 2)));
    lines
}

pub fn info_lines(now: NaiveDateTime, summary: &InfoSummary) -> Vec<String> {
    let mut lines = Vec::new();
    lines.extend(panel(
        "Time",
        &[
            format!("Date: {}", now.format("%Y-%m-%d")),
            format!("Time: {}", now.format("%H:%M:%S%.3f")),
        ],
    ));
    lines.push(String::new());
    lines.extend(panel(
        "About",
        &[
            "- Keeps your personal savings jars on this machine.".to_string(),
            "- Create, edit, list and delete jars from the shell.".to_string(),
            "- Every change is saved to disk immediately.".to_string(),
            "- Days to goal are counted when a target is reached.".to_string(),
        ],
    ));
    lines.push(String::new());
    lines.extend(panel(
        "Jars",
        &[
            format!("Jars     : {}", summary.jars),
            format!("Completed: {}", summary.complete),
            format!("Saved    : {}", format::money(&summary.symbol, summary.saved)),
            format!("Version  : {}", env!("CARGO_PKG_VERSION")),
        ],
    ));
    lines
}

/// Shows the info panel. Interactive mode refreshes it until Enter, Esc, `q`
/// or Ctrl-C; script mode prints it once.
pub fn run(context: &ShellContext) -> CommandResult {
    let rows = context.store.overview()?;
    let summary = InfoSummary::from_rows(&rows, &context.config.currency_symbol);
    let clock = SystemClock;

    if context.mode == CliMode::Script {
        for line in info_lines(clock.now(), &summary) {
            cli_io::print_info(line);
        }
        return Ok(());
    }

    let refresh = Duration::from_millis(context.config.refresh_millis);
    let token = CancellationToken::new();
    let listener = spawn_key_listener(token.clone());
    let result = live_loop(&token, refresh, &clock, &summary);
    token.cancel();
    if listener.join().is_err() {
        warn!("key listener thread panicked");
    }
    result.map_err(Into::into)
}

fn live_loop(
    token: &CancellationToken,
    refresh: Duration,
    clock: &dyn Clock,
    summary: &InfoSummary,
) -> io::Result<()> {
    let mut stdout = io::stdout();
    let _guard = TerminalGuard::enter(&mut stdout)?;
    while !token.is_cancelled() {
        queue!(stdout, MoveTo(0, 0), Clear(ClearType::All))?;
        for line in info_lines(clock.now(), summary) {
            write!(stdout, "{}\r\n", line)?;
        }
        write!(stdout, "\r\n{}\r\n", FOOTER)?;
        stdout.flush()?;
        wait_cancellable(token, refresh);
    }
    Ok(())
}

/// Sleeps for `total` in small steps, returning early once cancelled.
/// Reports whether the token was cancelled.
pub fn wait_cancellable(token: &CancellationToken, total: Duration) -> bool {
    let deadline = Instant::now() + total;
    while !token.is_cancelled() {
        let now = Instant::now();
        if now >= deadline {
            return false;
        }
        thread::sleep(WAIT_STEP.min(deadline - now));
    }
    true
}

fn spawn_key_listener(token: CancellationToken) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        while !token.is_cancelled() {
            match event::poll(POLL_INTERVAL) {
                Ok(true) => {
                    if let Ok(Event::Key(key)) = event::read() {
                        if is_exit_key(&key) {
                            token.cancel();
                        }
                    }
                }
                Ok(false) => {}
                Err(err) => {
                    warn!(%err, "key listener stopped");
                    token.cancel();
                }
            }
        }
    })
}

fn is_exit_key(key: &KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    match key.code {
        KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q') => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Raw mode plus alternate screen for the lifetime of the guard.
struct TerminalGuard;

impl TerminalGuard {
    fn enter(stdout: &mut io::Stdout) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        if let Err(err) = execute!(stdout, EnterAlternateScreen, Hide) {
            let _ = terminal::disable_raw_mode();
            return Err(err);
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}
