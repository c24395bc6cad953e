//! Hands a stored command to the user's shell with the terminal's stdio.

use crate::error::{QuickError, QuickResult};
use std::os::unix::process::ExitStatusExt;
use std::process::{Command, ExitStatus, Stdio};

/// Run `<shell> -lc <text>` and wait for it. The text is passed verbatim so
/// aliases, functions, and expansions from the login profile apply.
pub fn run_in_shell(shell: &str, text: &str) -> QuickResult<()> {
    crate::log_debug(&format!("spawning {shell} -lc"));
    crate::log_debug_content(&format!("command text: {text}"));

    let status = Command::new(shell)
        .arg("-lc")
        .arg(text)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|source| QuickError::Launch {
            shell: shell.to_string(),
            source,
        })?;

    if status.success() {
        return Ok(());
    }
    let code = exit_code(status);
    tracing::info!(shell, status = code, "command failed");
    Err(QuickError::NonZeroExit { status: code })
}

/// Exit code, with death-by-signal reported as `128 + signal` like shells do.
fn exit_code(status: ExitStatus) -> i32 {
    status
        .code()
        .or_else(|| status.signal().map(|signal| 128 + signal))
        .unwrap_or(1)
}
