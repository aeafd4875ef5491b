//! Interactive terminal dashboard (`sumview dash`).
//!
//! Reads one command per line, applies it to the session, and re-renders the
//! whole dashboard after every command.

use std::io::{BufRead, Write};

use anyhow::{Context, Result, bail};
use colored::Colorize;

use crate::app::{App, Event};
use crate::render;

/// One parsed line of dashboard input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Apply(Vec<Event>),
    Help,
    Quit,
}

const HELP: &str = "\
Commands:
  mode <local|remote|manage>   switch view (aliases: api, storage)
  date <YYYY-MM-DD>            select a date in the current view
  analysis <on|off>            toggle the analysis panel
  days <N>                     set the retention input (N >= 1)
  export                       trigger a remote export
  cleanup [N]                  trigger a remote cleanup
  refresh                      re-render
  help                         show this help
  quit                         exit";

/// Parse one input line. Blank lines refresh.
pub fn parse_command(line: &str) -> Result<Command> {
    let mut parts = line.split_whitespace();
    let Some(head) = parts.next() else {
        return Ok(Command::Apply(vec![Event::Refresh]));
    };
    let arg = parts.next();
    if parts.next().is_some() {
        bail!("too many arguments for '{head}'");
    }

    let command = match (head.to_ascii_lowercase().as_str(), arg) {
        ("mode", Some(mode)) => Command::Apply(vec![Event::SelectMode(mode.parse()?)]),
        ("date", Some(date)) => Command::Apply(vec![Event::SelectDate(date.to_string())]),
        ("analysis", Some(flag)) => Command::Apply(vec![Event::ShowAnalysis(parse_flag(flag)?)]),
        ("days", Some(days)) => Command::Apply(vec![Event::SetDaysToKeep(parse_days(days)?)]),
        ("export", None) => Command::Apply(vec![Event::Export]),
        ("cleanup", None) => Command::Apply(vec![Event::Cleanup]),
        ("cleanup", Some(days)) => Command::Apply(vec![
            Event::SetDaysToKeep(parse_days(days)?),
            Event::Cleanup,
        ]),
        ("refresh", None) => Command::Apply(vec![Event::Refresh]),
        ("help" | "?", None) => Command::Help,
        ("quit" | "exit" | "q", None) => Command::Quit,
        ("mode" | "date" | "analysis" | "days", None) => bail!("'{head}' needs a value"),
        (other, _) => bail!("unknown command '{other}' (type 'help')"),
    };
    Ok(command)
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "on" | "true" | "1" | "yes" => Ok(true),
        "off" | "false" | "0" | "no" => Ok(false),
        other => bail!("expected on or off, got '{other}'"),
    }
}

fn parse_days(value: &str) -> Result<u32> {
    let days: u32 = value
        .parse()
        .with_context(|| format!("'{value}' is not a number of days"))?;
    if days < 1 {
        bail!("days to keep must be at least 1");
    }
    Ok(days)
}

fn prompt(app: &App) -> String {
    format!("{}{} ", app.state.mode.to_string().cyan(), ">".bold())
}

fn draw<W: Write>(app: &App, output: &mut W) -> Result<()> {
    match app.render() {
        Ok(page) => write!(output, "{}", render::to_terminal(&page))?,
        Err(e) => {
            app.activity().record_failure("render", &format!("{e:#}"));
            writeln!(output, "{}", format!("✖ Render failed: {e:#}").red())?;
        }
    }
    Ok(())
}

/// Run the dashboard until `quit` or end of input.
pub fn run_loop<R: BufRead, W: Write>(app: &mut App, input: R, mut output: W) -> Result<()> {
    draw(app, &mut output)?;
    write!(output, "{}", prompt(app))?;
    output.flush()?;

    for line in input.lines() {
        let line = line.context("failed to read dashboard input")?;
        match parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => writeln!(output, "{HELP}")?,
            Ok(Command::Apply(events)) => {
                for event in events {
                    app.handle(event);
                }
                draw(app, &mut output)?;
            }
            Err(e) => writeln!(output, "{}", format!("✖ {e:#}").red())?,
        }
        write!(output, "{}", prompt(app))?;
        output.flush()?;
    }

    writeln!(output)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
