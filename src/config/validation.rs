use super::AppConfig;
use crate::store::{default_store_filename, CommandStore, STORE_DIR_NAME};
use anyhow::{anyhow, bail, Context, Result};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

impl AppConfig {
    /// Check the store location. The shell is only checked by [`Self::run_shell`]
    /// since nothing but `run` spawns it.
    pub fn validate(&mut self) -> Result<()> {
        if let Some(name) = &self.store_file {
            let trimmed = name.trim();
            if trimmed.is_empty() || trimmed == "." || trimmed == ".." {
                bail!("--store-file must be a plain file name, got '{name}'");
            }
            if trimmed.contains('/') || trimmed.contains(std::path::MAIN_SEPARATOR) {
                bail!("--store-file must not contain a path separator, got '{name}'");
            }
            self.store_file = Some(trimmed.to_string());
        }

        if let Some(dir) = &self.store_dir {
            if dir.as_os_str().is_empty() {
                bail!("--store-dir cannot be empty");
            }
            if let Ok(metadata) = fs::metadata(dir) {
                if !metadata.is_dir() {
                    bail!("--store-dir '{}' exists but is not a directory", dir.display());
                }
            }
        }
        Ok(())
    }

    /// Directory holding the store: `--store-dir`, else `$HOME/.quick_terminal_commands`.
    pub fn store_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.store_dir {
            return Ok(dir.clone());
        }
        let home = env::var_os("HOME")
            .filter(|home| !home.is_empty())
            .ok_or_else(|| anyhow!("HOME is not set; pass --store-dir"))?;
        Ok(Path::new(&home).join(STORE_DIR_NAME))
    }

    /// Normalized shell path for `run`.
    pub fn run_shell(&self) -> Result<String> {
        sanitize_shell(&self.shell)
    }

    pub fn command_store(&self) -> Result<CommandStore> {
        let dir = self.store_dir()?;
        let filename = self
            .store_file
            .as_deref()
            .unwrap_or(default_store_filename());
        Ok(CommandStore::in_dir(&dir, filename))
    }
}

/// Allow a bare shell name (resolved through PATH) or an executable file path.
pub(super) fn sanitize_shell(value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        bail!("--shell cannot be empty");
    }
    if trimmed.chars().any(char::is_control) {
        bail!("--shell must not contain control characters");
    }

    let path = Path::new(trimmed);
    if !(path.is_absolute() || trimmed.contains(std::path::MAIN_SEPARATOR)) {
        if trimmed.contains(char::is_whitespace) {
            bail!("--shell must be a single program name or path, got '{trimmed}'");
        }
        return Ok(trimmed.to_string());
    }

    let metadata = fs::metadata(path)
        .with_context(|| format!("failed to inspect --shell '{trimmed}'"))?;
    if !metadata.is_file() {
        bail!("--shell '{trimmed}' is not a file");
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = metadata.permissions().mode();
        if mode & 0o111 == 0 {
            bail!("--shell '{trimmed}' exists but is not executable (mode {mode:o})");
        }
    }
    Ok(trimmed.to_string())
}
