mod cli;

use clap::error::ErrorKind;
use clap::CommandFactory;

pub(crate) use cli::{Cli, CliCommand};

impl Cli {
    /// A bare handle means `run`; no arguments at all means `list`.
    /// A bare handle next to a subcommand is a usage error.
    pub(crate) fn resolve_command(&self) -> Result<CliCommand, clap::Error> {
        match (&self.command, self.handle) {
            (Some(_), Some(handle)) => Err(Cli::command().error(
                ErrorKind::ArgumentConflict,
                format!("the handle '{handle}' cannot be combined with a subcommand"),
            )),
            (Some(command), None) => Ok(command.clone()),
            (None, Some(handle)) => Ok(CliCommand::Run { handle }),
            (None, None) => Ok(CliCommand::List),
        }
    }
}
