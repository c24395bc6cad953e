//! Add/remove/change-handle/run/list on top of the command store.
//!
//! The `apply_*` functions mutate an in-memory [`CommandSet`] and never touch
//! disk; the `*_command` flows load the store, ask for confirmation where the
//! operation is destructive, apply, and persist.


use crate::confirm::{Confirm, ConfirmPrompt};
use crate::error::{QuickError, QuickResult};
use crate::shell::run_in_shell;
use crate::store::{CommandRecord, CommandSet, CommandStore};
use std::io::{self, Write};

fn ensure_positive(handle: i64) -> QuickResult<()> {
    if handle <= 0 {
        return Err(QuickError::InvalidHandle { handle });
    }
    Ok(())
}

/// Insert `text` under `handle`, or under the next free handle when none is given.
pub fn apply_add(set: &mut CommandSet, text: &str, handle: Option<i64>) -> QuickResult<i64> {
    if text.trim().is_empty() {
        return Err(QuickError::EmptyCommand);
    }
    let handle = match handle {
        Some(handle) => {
            ensure_positive(handle)?;
            handle
        }
        None => set.next_handle().ok_or_else(|| QuickError::HandlesExhausted {
            max: set.max_handle().unwrap_or_default(),
        })?,
    };
    if set.contains(handle) {
        return Err(QuickError::DuplicateHandle { handle });
    }
    set.insert(handle, text.to_string());
    Ok(handle)
}

pub fn apply_remove(set: &mut CommandSet, handle: i64) -> QuickResult<String> {
    set.remove(handle).ok_or(QuickError::NotFound { handle })
}

/// Move `current` to `new`, or exchange the two records when `swap` is set.
pub fn apply_change_handle(
    set: &mut CommandSet,
    current: i64,
    new: i64,
    swap: bool,
) -> QuickResult<()> {
    ensure_positive(current)?;
    ensure_positive(new)?;
    if current == new {
        return Err(QuickError::SameHandle);
    }
    if !set.contains(current) {
        return Err(QuickError::NotFound { handle: current });
    }

    if swap {
        if !set.contains(new) {
            return Err(QuickError::NotFound { handle: new });
        }
        let current_text = apply_remove(set, current)?;
        let new_text = apply_remove(set, new)?;
        set.insert(new, current_text);
        set.insert(current, new_text);
        return Ok(());
    }

    if set.contains(new) {
        return Err(QuickError::DuplicateHandle { handle: new });
    }
    let text = apply_remove(set, current)?;
    set.insert(new, text);
    Ok(())
}

fn lookup(set: &CommandSet, handle: i64) -> QuickResult<String> {
    set.get(handle)
        .map(str::to_string)
        .ok_or(QuickError::NotFound { handle })
}

fn ask(confirm: &mut impl Confirm, prompt: &ConfirmPrompt) -> QuickResult<bool> {
    confirm
        .confirm(prompt)
        .map_err(|err| QuickError::io("read confirmation from", "<stdin>", err))
}

/// Whether a confirmed operation went ahead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Done(CommandRecord),
    Declined,
}

pub fn add_command(store: &CommandStore, text: &str, handle: Option<i64>) -> QuickResult<CommandRecord> {
    let mut set = store.load()?;
    let handle = apply_add(&mut set, text, handle)?;
    store.save(&set)?;
    tracing::info!(handle, "command added");
    crate::log_debug_content(&format!("added #{handle}: {text}"));
    Ok(CommandRecord::new(handle, text))
}

pub fn remove_command(
    store: &CommandStore,
    handle: i64,
    confirm: &mut impl Confirm,
) -> QuickResult<Outcome> {
    let mut set = store.load()?;
    let text = lookup(&set, handle)?;
    let prompt = ConfirmPrompt::new(
        vec![
            format!("You are about to remove command #{handle}:"),
            format!("  {text}"),
        ],
        "Remove",
    )
    .with_cancel_message("Removal cancelled.");
    if !ask(confirm, &prompt)? {
        tracing::info!(handle, "removal declined");
        return Ok(Outcome::Declined);
    }
    apply_remove(&mut set, handle)?;
    store.save(&set)?;
    tracing::info!(handle, "command removed");
    Ok(Outcome::Done(CommandRecord::new(handle, text)))
}

pub fn change_command_handle(
    store: &CommandStore,
    current: i64,
    new: i64,
    swap: bool,
) -> QuickResult<()> {
    let mut set = store.load()?;
    apply_change_handle(&mut set, current, new, swap)?;
    store.save(&set)?;
    tracing::info!(current, new, swap, "command handle changed");
    Ok(())
}

/// Confirm, then run the stored text in `shell`. A non-zero exit is an error.
pub fn run_command(
    store: &CommandStore,
    handle: i64,
    shell: &str,
    confirm: &mut impl Confirm,
) -> QuickResult<Outcome> {
    let set = store.load()?;
    let text = lookup(&set, handle)?;
    let prompt = ConfirmPrompt::new(
        vec![format!("About to run command #{handle}:"), format!("  {text}")],
        "Run",
    )
    .with_cancel_message("Run cancelled.");
    if !ask(confirm, &prompt)? {
        tracing::info!(handle, "run declined");
        return Ok(Outcome::Declined);
    }
    tracing::info!(handle, shell, "running command");
    run_in_shell(shell, &text)?;
    Ok(Outcome::Done(CommandRecord::new(handle, text)))
}

pub fn list_commands(store: &CommandStore) -> QuickResult<CommandSet> {
    store.load()
}

pub fn write_listing(set: &CommandSet, out: &mut impl Write) -> io::Result<()> {
    if set.is_empty() {
        return writeln!(out, "No quick commands have been added yet.");
    }
    writeln!(out, "Saved quick commands:")?;
    for (handle, text) in set.iter() {
        writeln!(out, "  {handle}: {text}")?;
    }
    Ok(())
}
