//! # CLI Layer
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr, stdin)
//! - Handles argument parsing
//! - Installs the logging subscriber
//! - Formats output for human consumption
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: shell arguments into [`Cli`] via clap
//! 2. **Context Setup**: configuration, data directory and stores via
//!    [`initialize`]
//! 3. **Dispatch**: the interactive session or a one-shot command
//! 4. **Output Formatting**: [`CmdResult`] into colored text (see `render`)

use super::render::{render_details, render_result};
use super::session::{run_session, StdioPrompter};
use super::setup::{Cli, Commands};
use anyhow::Context;
use clap::Parser;
use rolodexapp::commands::{keys, CmdResult, Command, Params};
use rolodexapp::init::{initialize, RolodexContext};
use std::io::{self, IsTerminal};
use tracing_subscriber::EnvFilter;

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if !io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let mut ctx = initialize(cli.data.clone()).context("could not open the rolodex")?;

    match cli.command.unwrap_or(Commands::Session) {
        Commands::Session => handle_session(&mut ctx),
        Commands::All => {
            print_result(Command::All, &ctx.api.all_contacts());
            Ok(())
        }
        Commands::Birthdays { days } => {
            let mut params = Params::new();
            if let Some(days) = days {
                params.insert(keys::DAYS, &days.to_string());
            }
            print_result(Command::Birthdays, &ctx.api.birthdays(&params)?);
            Ok(())
        }
        Commands::Notes { sort, tag } => {
            let mut params = Params::new().with(keys::SORT, sort.as_str());
            if let Some(tag) = tag {
                params.insert(keys::TAG, &tag);
            }
            print_result(Command::ShowNotes, &ctx.api.show_notes(&params)?);
            Ok(())
        }
        Commands::Config => {
            handle_config(&ctx);
            Ok(())
        }
    }
}

/// Logs go to stderr. `RUST_LOG` wins; otherwise `warn`, or `debug` with `-v`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn handle_session(ctx: &mut RolodexContext) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut prompter = StdioPrompter::new(stdin.lock(), io::stdout());
    let mut out = io::stdout();
    run_session(&mut ctx.api, &mut prompter, &mut out)
}

fn handle_config(ctx: &RolodexContext) {
    let mut rows = ctx.config.entries();
    rows.push((
        "config file".to_string(),
        ctx.config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none)".to_string()),
    ));
    rows.push((
        "data directory".to_string(),
        ctx.data_dir.display().to_string(),
    ));
    print!("{}", render_details(&rows));
}

fn print_result(command: Command, result: &CmdResult) {
    print!("{}", render_result(command, result));
}
