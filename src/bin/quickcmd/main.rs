//! quickcmd entrypoint: parse the CLI, load the store, dispatch one operation.
//!
//! Every invocation reads the store fresh and writes it back only when an
//! operation changed it. Failures print one `Error:` line and exit non-zero;
//! a declined confirmation is a normal exit.

mod config;

use anyhow::Result;
use clap::Parser;
use quickcmd::config::AppConfig;
use quickcmd::confirm::TerminalConfirm;
use quickcmd::ops::{self, Outcome};
use quickcmd::store::CommandStore;
use quickcmd::telemetry::init_tracing;
use quickcmd::{init_logging, log_debug, log_file_path};
use std::io::{self, Write};
use std::process::ExitCode;

use crate::config::{Cli, CliCommand};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log_debug(&format!("failed: {err:#}"));
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let mut cli = Cli::parse();
    let command = cli.resolve_command().unwrap_or_else(|err| err.exit());
    cli.app.validate()?;
    init_logging(&cli.app);
    init_tracing(&cli.app);
    log_debug("=== quickcmd started ===");
    log_debug(&format!("Log file: {:?}", log_file_path()));

    let store = match command {
        CliCommand::Version => {
            println!("quickcmd version {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        _ => cli.app.command_store()?,
    };
    log_debug(&format!("store: {}", store.path().display()));
    dispatch(command, &store, &cli.app)
}

fn dispatch(command: CliCommand, store: &CommandStore, app: &AppConfig) -> Result<()> {
    let mut stdout = io::stdout();
    match command {
        CliCommand::List => {
            let set = ops::list_commands(store)?;
            ops::write_listing(&set, &mut stdout)?;
        }
        CliCommand::Add { handle, command } => {
            let text = command.join(" ");
            let record = ops::add_command(store, &text, handle)?;
            writeln!(stdout, "Added quick command #{}:", record.handle)?;
            writeln!(stdout, "  {}", record.text)?;
        }
        CliCommand::Remove { handle } => {
            if let Outcome::Done(record) = ops::remove_command(store, handle, &mut TerminalConfirm)? {
                writeln!(stdout, "Command #{} removed.", record.handle)?;
            }
        }
        CliCommand::Run { handle } => {
            let shell = app.run_shell()?;
            ops::run_command(store, handle, &shell, &mut TerminalConfirm)?;
        }
        CliCommand::ChangeHandle { current, new, swap } => {
            ops::change_command_handle(store, current, new, swap)?;
            if swap {
                writeln!(stdout, "Swapped command handles #{current} and #{new}.")?;
            } else {
                writeln!(stdout, "Updated command handle from #{current} to #{new}.")?;
            }
        }
        CliCommand::Version => {}
    }
    Ok(())
}
