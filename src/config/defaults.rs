use std::env;

/// Environment variable that overrides the store directory.
pub const STORE_DIR_ENV: &str = "QUICKCMD_HOME";
pub const STORE_FILE_ENV: &str = "QUICKCMD_STORE_FILE";
pub const SHELL_ENV: &str = "QUICKCMD_SHELL";

const FALLBACK_SHELL: &str = if cfg!(target_os = "macos") {
    "/bin/zsh"
} else {
    "/bin/sh"
};

/// The user's login shell, so stored commands see their aliases and functions.
pub(super) fn default_shell() -> String {
    env::var("SHELL")
        .ok()
        .map(|shell| shell.trim().to_string())
        .filter(|shell| !shell.is_empty())
        .unwrap_or_else(|| FALLBACK_SHELL.to_string())
}
