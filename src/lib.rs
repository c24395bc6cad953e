//! Store shell commands under small integer handles and re-run them by handle.
//!
//! The library holds the command store, the handle mutation rules, and the
//! raw-terminal confirm widget; `src/bin/quickcmd` wires them to the CLI.

mod app;
pub mod config;
pub mod confirm;
pub mod error;
pub mod keys;
mod lock;
pub mod ops;
pub mod shell;
pub mod store;
pub mod telemetry;
pub mod terminal_restore;

pub use app::*;
pub use error::{QuickError, QuickResult};
pub(crate) use lock::lock_or_recover;
