//! Handle-indexed command collection and the JSON file that persists it.
//!
//! The collection is loaded whole at the start of an invocation and written
//! back whole (temp file + rename) when a mutation succeeds.

#[cfg(test)]
mod tests;

use crate::error::{QuickError, QuickResult};
use crate::log_debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Store file used by release builds.
pub const RELEASE_STORE_FILENAME: &str = "quick_terminal_commands.json";
/// Store file used by debug and test builds so scratch data stays separate.
pub const DEBUG_STORE_FILENAME: &str = "quick_terminal_commands.debug.json";
/// Per-user directory (under `$HOME`) holding the store file.
pub const STORE_DIR_NAME: &str = ".quick_terminal_commands";

pub fn default_store_filename() -> &'static str {
    if cfg!(debug_assertions) {
        DEBUG_STORE_FILENAME
    } else {
        RELEASE_STORE_FILENAME
    }
}

/// On-disk shape of one stored command. Keys serialize as `command`, `id`
/// (alphabetical) to keep the file diff-friendly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRecord {
    #[serde(rename = "command")]
    pub text: String,
    #[serde(rename = "id")]
    pub handle: i64,
}

impl CommandRecord {
    pub fn new(handle: i64, text: impl Into<String>) -> Self {
        Self {
            handle,
            text: text.into(),
        }
    }
}

/// Commands keyed by handle. Iteration is always in ascending handle order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandSet {
    records: BTreeMap<i64, String>,
}

impl CommandSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection, rejecting non-positive or duplicate handles.
    pub fn from_records(records: impl IntoIterator<Item = CommandRecord>) -> Result<Self, String> {
        let mut set = Self::new();
        for record in records {
            if record.handle <= 0 {
                return Err(format!("handle {} is not greater than 0", record.handle));
            }
            if set.records.insert(record.handle, record.text).is_some() {
                return Err(format!("handle {} appears more than once", record.handle));
            }
        }
        Ok(set)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, handle: i64) -> bool {
        self.records.contains_key(&handle)
    }

    pub fn get(&self, handle: i64) -> Option<&str> {
        self.records.get(&handle).map(String::as_str)
    }

    /// One past the largest handle in use, or 1 for an empty collection.
    /// `None` once `i64::MAX` is taken.
    pub fn next_handle(&self) -> Option<i64> {
        match self.records.keys().next_back() {
            Some(max) => max.checked_add(1),
            None => Some(1),
        }
    }

    pub fn max_handle(&self) -> Option<i64> {
        self.records.keys().next_back().copied()
    }

    /// Lazily walk `(handle, text)` pairs in ascending handle order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, &str)> + '_ {
        self.records
            .iter()
            .map(|(handle, text)| (*handle, text.as_str()))
    }

    pub fn to_records(&self) -> Vec<CommandRecord> {
        self.iter()
            .map(|(handle, text)| CommandRecord::new(handle, text))
            .collect()
    }

    pub(crate) fn insert(&mut self, handle: i64, text: String) -> Option<String> {
        self.records.insert(handle, text)
    }

    pub(crate) fn remove(&mut self, handle: i64) -> Option<String> {
        self.records.remove(&handle)
    }
}

/// Location of the persisted collection. Passed explicitly to every operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandStore {
    path: PathBuf,
}

impl CommandStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn in_dir(dir: &Path, filename: &str) -> Self {
        Self::new(dir.join(filename))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the collection. Missing or blank files yield an empty collection.
    pub fn load(&self) -> QuickResult<CommandSet> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log_debug(&format!("store {} absent; starting empty", self.path.display()));
                return Ok(CommandSet::new());
            }
            Err(err) => return Err(QuickError::io("read", &self.path, err)),
        };
        if data.iter().all(u8::is_ascii_whitespace) {
            return Ok(CommandSet::new());
        }
        let records: Vec<CommandRecord> =
            serde_json::from_slice(&data).map_err(|err| QuickError::corrupt(&self.path, err))?;
        let set =
            CommandSet::from_records(records).map_err(|reason| QuickError::corrupt(&self.path, reason))?;
        tracing::debug!(path = %self.path.display(), count = set.len(), "store loaded");
        Ok(set)
    }

    /// Replace the file with the serialized collection via temp file + rename.
    pub fn save(&self, set: &CommandSet) -> QuickResult<()> {
        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|err| QuickError::io("create directory", dir, err))?;
        }
        let mut body = serde_json::to_string_pretty(&set.to_records())
            .map_err(|err| QuickError::io("serialize", &self.path, io::Error::other(err)))?;
        body.push('\n');

        let tmp_path = temp_path_for(&self.path);
        if let Err(err) = write_synced(&tmp_path, body.as_bytes()) {
            let _ = fs::remove_file(&tmp_path);
            return Err(QuickError::io("write", &tmp_path, err));
        }
        if let Err(err) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(QuickError::io("replace", &self.path, err));
        }
        tracing::debug!(path = %self.path.display(), count = set.len(), "store saved");
        Ok(())
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "store".to_string());
    path.with_file_name(format!(".{name}.tmp.{}", std::process::id()))
}

fn write_synced(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}
