use clap::{Parser, Subcommand};
use quickcmd::config::AppConfig;

#[derive(Debug, Parser, Clone)]
#[command(
    name = "quickcmd",
    about = "A small tool to manage custom quick terminal commands.",
    long_about = "A small tool to manage custom quick terminal commands.\n\n\
Store your own shell commands under numeric handles, list them, and run one \
again with `quickcmd <HANDLE>`. Pair it with a short shell alias for quick access.",
    author,
    version
)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub(crate) app: AppConfig,

    /// Handle of a saved command to run (shorthand for `run <HANDLE>`)
    #[arg(value_name = "HANDLE", allow_negative_numbers = true)]
    pub(crate) handle: Option<i64>,

    #[command(subcommand)]
    pub(crate) command: Option<CliCommand>,
}

#[derive(Debug, Subcommand, Clone, PartialEq, Eq)]
pub(crate) enum CliCommand {
    /// List all saved quick commands with their handles
    List,

    /// Add a new quick command
    Add {
        /// Handle to assign (must be unused and greater than 0); defaults to the next free one
        #[arg(long, value_name = "N", allow_negative_numbers = true)]
        handle: Option<i64>,

        /// The shell command to save; multiple words are joined with spaces
        #[arg(
            value_name = "COMMAND",
            required = true,
            num_args = 1..,
            trailing_var_arg = true,
            allow_hyphen_values = true
        )]
        command: Vec<String>,
    },

    /// Remove a quick command by its handle
    Remove {
        /// Handle of the command to remove
        #[arg(allow_negative_numbers = true)]
        handle: i64,
    },

    /// Run a saved quick command by its handle
    Run {
        /// Handle of the command to run
        #[arg(allow_negative_numbers = true)]
        handle: i64,
    },

    /// Change the handle of an existing quick command
    ChangeHandle {
        /// Current handle of the command
        #[arg(allow_negative_numbers = true)]
        current: i64,

        /// New handle to assign; must be unique and greater than 0
        #[arg(allow_negative_numbers = true)]
        new: i64,

        /// Exchange handles with the command already using the new handle
        #[arg(long, default_value_t = false)]
        swap: bool,
    },

    /// Show the quickcmd version
    Version,
}
