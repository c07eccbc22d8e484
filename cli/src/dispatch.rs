//! Command grammar
//!
//! A line is `<command> <label...>`. Labels may contain spaces, either
//! unquoted (`start Deep Work`) or quoted (`start "Deep Work"`).

use clap::{Args, Parser, Subcommand};
use std::io::Write;

use crate::CliContext;
use crate::commands;

#[derive(Parser, Debug)]
#[command(name = "tempo", about = "Named stopwatches")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct LabelArg {
    /// Timer name
    #[arg(required = true, num_args = 1..)]
    words: Vec<String>,
}

impl LabelArg {
    pub fn label(&self) -> String {
        self.words.join(" ")
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Create and start a new timer
    Start(LabelArg),
    /// Pause a running timer
    Stop(LabelArg),
    /// Resume a stopped timer
    Restart(LabelArg),
    /// Show one timer
    Status(LabelArg),
    /// Show every timer
    List,
    /// Delete a timer
    Remove(LabelArg),
    /// Show the active settings
    Config,
    /// Stop all timers and quit
    Exit,
}

pub fn parse(line: &str) -> Result<Option<Commands>, String> {
    let mut args = shlex::split(line).ok_or("error: Invalid quoting")?;
    args.insert(0, "tempo".to_string());
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;
    Ok(cli.command)
}

/// Run one line. Returns `Ok(true)` when the loop should end.
pub async fn respond(line: &str, ctx: &CliContext) -> Result<bool, String> {
    let output = match parse(line)? {
        Some(Commands::Start(arg)) => commands::start(&arg.label(), ctx).await,
        Some(Commands::Stop(arg)) => commands::stop(&arg.label(), ctx).await,
        Some(Commands::Restart(arg)) => commands::restart(&arg.label(), ctx).await,
        Some(Commands::Status(arg)) => commands::status(&arg.label(), ctx).await,
        Some(Commands::Remove(arg)) => commands::remove(&arg.label(), ctx).await,
        Some(Commands::List) => Ok(commands::list(ctx).await),
        Some(Commands::Config) => Ok(commands::show_settings(ctx)),
        Some(Commands::Exit) => {
            println!("{}", commands::exit(ctx).await);
            return Ok(true);
        }
        None => return Ok(false),
    };

    let text = output.map_err(|e| format!("{e}\n"))?;
    writeln!(std::io::stdout(), "{text}").map_err(|e| e.to_string())?;
    Ok(false)
}
