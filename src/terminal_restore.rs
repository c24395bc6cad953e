//! Scoped raw-mode input for single-keystroke reads.
//!
//! Raw here means canonical line buffering and echo are off, `VMIN=1` and
//! `VTIME=0`; output processing is left alone so `\n` still returns the
//! carriage. The saved attributes live in a static so the panic hook can put
//! the terminal back even when the guard never gets to drop.

use crate::lock_or_recover;
use crossterm::{cursor, execute};
use std::{
    io::{self, Write},
    os::unix::io::RawFd,
    panic,
    sync::{
        atomic::{AtomicBool, Ordering},
        Mutex, OnceLock,
    },
};

static SAVED_TERMIOS: Mutex<Option<(RawFd, libc::termios)>> = Mutex::new(None);
static CURSOR_HIDDEN: AtomicBool = AtomicBool::new(false);
static PANIC_HOOK_INSTALLED: OnceLock<()> = OnceLock::new();

/// RAII guard that restores the captured terminal attributes on drop (and on panic via a shared hook).
pub struct RawModeGuard {
    _private: (),
}

impl RawModeGuard {
    /// Switch stdin into raw mode.
    pub fn enter() -> io::Result<Self> {
        Self::enter_fd(libc::STDIN_FILENO)
    }

    pub fn enter_fd(fd: RawFd) -> io::Result<Self> {
        install_terminal_panic_hook();

        // SAFETY: termios is plain old data; tcgetattr fully initializes it on success.
        let mut original: libc::termios = unsafe { std::mem::zeroed() };
        if unsafe { libc::tcgetattr(fd, &mut original) } != 0 {
            return Err(io::Error::last_os_error());
        }

        let mut raw = original;
        raw.c_lflag &= !(libc::ICANON | libc::ECHO);
        raw.c_cc[libc::VMIN] = 1;
        raw.c_cc[libc::VTIME] = 0;

        // Record before switching so a failure between the two calls still restores.
        *lock_or_recover(&SAVED_TERMIOS, "raw mode enter") = Some((fd, original));
        // SAFETY: `raw` is a valid termios derived from the current attributes.
        if unsafe { libc::tcsetattr(fd, libc::TCSANOW, &raw) } != 0 {
            let err = io::Error::last_os_error();
            restore_terminal();
            return Err(err);
        }
        crate::log_debug("raw mode enabled");
        Ok(Self { _private: () })
    }

    pub fn hide_cursor(&self, out: &mut impl Write) -> io::Result<()> {
        execute!(out, cursor::Hide)?;
        CURSOR_HIDDEN.store(true, Ordering::SeqCst);
        Ok(())
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        restore_terminal();
    }
}

/// Run `body` with stdin in raw mode; attributes are restored however `body` exits.
pub fn with_raw_mode<T>(body: impl FnOnce(&RawModeGuard) -> T) -> io::Result<T> {
    let guard = RawModeGuard::enter()?;
    let result = body(&guard);
    drop(guard);
    Ok(result)
}

/// Idempotent: only the first call after entering raw mode touches the terminal.
pub fn restore_terminal() {
    let saved = lock_or_recover(&SAVED_TERMIOS, "terminal restore").take();
    if let Some((fd, original)) = saved {
        // SAFETY: `original` was filled by tcgetattr for this descriptor.
        unsafe {
            libc::tcsetattr(fd, libc::TCSANOW, &original);
        }
        crate::log_debug("raw mode restored");
    }
    if CURSOR_HIDDEN.swap(false, Ordering::SeqCst) {
        let mut stdout = io::stdout();
        let _ = execute!(stdout, cursor::Show);
        let _ = stdout.flush();
    }
}

#[cfg(test)]
fn raw_mode_active() -> bool {
    lock_or_recover(&SAVED_TERMIOS, "raw mode query").is_some()
}

pub fn install_terminal_panic_hook() {
    PANIC_HOOK_INSTALLED.get_or_init(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            restore_terminal();
            crate::log_panic(info);
            previous(info);
        }));
    });
}
