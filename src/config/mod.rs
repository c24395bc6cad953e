//! Command-line configuration shared by every subcommand.

mod defaults;
mod validation;

use clap::Parser;
use std::path::PathBuf;

use defaults::default_shell;
pub use defaults::{SHELL_ENV, STORE_DIR_ENV, STORE_FILE_ENV};

/// Global options. Validated values keep the store path and shell well-formed.
#[derive(Debug, Parser, Clone)]
#[command(about = "quickcmd", author, version)]
pub struct AppConfig {
    /// Directory holding the command store (default: ~/.quick_terminal_commands)
    #[arg(long = "store-dir", env = STORE_DIR_ENV, global = true, value_name = "DIR")]
    pub store_dir: Option<PathBuf>,

    /// File name of the command store inside the store directory
    #[arg(long = "store-file", env = STORE_FILE_ENV, global = true, value_name = "NAME")]
    pub store_file: Option<String>,

    /// Shell used to run stored commands (invoked as `<shell> -lc <command>`)
    #[arg(long = "shell", env = SHELL_ENV, global = true, default_value_t = default_shell())]
    pub shell: String,

    /// Enable file logging (debug)
    #[arg(long = "logs", env = "QUICKCMD_LOGS", global = true, default_value_t = false)]
    pub logs: bool,

    /// Disable all file logging (overrides --logs and log env vars)
    #[arg(long = "no-logs", env = "QUICKCMD_NO_LOGS", global = true, default_value_t = false)]
    pub no_logs: bool,

    /// Allow logging stored command text (debug log only)
    #[arg(
        long = "log-content",
        env = "QUICKCMD_LOG_CONTENT",
        global = true,
        default_value_t = false
    )]
    pub log_content: bool,
}

impl AppConfig {
    pub fn logging_enabled(&self) -> bool {
        self.logs && !self.no_logs
    }
}
