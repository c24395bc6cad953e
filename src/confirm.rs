//! Two-option confirm selector (`> Run` / `  Cancel`) driven by arrow keys.
//!
//! On a tty the options are redrawn in place while stdin is in raw mode.
//! When stdin or stdout is not a terminal the prompt degrades to a single
//! line read: an empty line confirms, anything else cancels.

use crate::keys::{Key, KeyReader, RawStdin};
use crate::terminal_restore::with_raw_mode;
use crossterm::{
    cursor::MoveToPreviousLine,
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use std::io::{self, BufRead, IsTerminal, Write};

const OPTION_COUNT: usize = 2;

/// Text shown by one confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmPrompt {
    pub message_lines: Vec<String>,
    pub primary_label: String,
    pub cancel_label: String,
    pub cancel_message: String,
}

impl ConfirmPrompt {
    pub fn new(message_lines: Vec<String>, primary_label: impl Into<String>) -> Self {
        Self {
            message_lines,
            primary_label: primary_label.into(),
            cancel_label: "Cancel".to_string(),
            cancel_message: "Cancelled.".to_string(),
        }
    }

    pub fn with_cancel_message(mut self, message: impl Into<String>) -> Self {
        self.cancel_message = message.into();
        self
    }

    fn labels(&self) -> [&str; OPTION_COUNT] {
        [self.primary_label.as_str(), self.cancel_label.as_str()]
    }

    /// Ask on the process's own stdin/stdout.
    pub fn ask(&self) -> io::Result<bool> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        if !(stdin.is_terminal() && stdout.is_terminal()) {
            crate::log_debug("confirm: non-interactive fallback");
            return confirm_by_line(self, &mut stdin.lock(), &mut stdout.lock());
        }
        with_raw_mode(|guard| {
            let mut out = stdout.lock();
            let _ = guard.hide_cursor(&mut out);
            select(self, KeyReader::new(RawStdin), &mut out)
        })?
    }
}

/// Seam between operations that need a yes/no answer and whoever provides it.
pub trait Confirm {
    fn confirm(&mut self, prompt: &ConfirmPrompt) -> io::Result<bool>;
}

/// Asks the user through the terminal widget.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&mut self, prompt: &ConfirmPrompt) -> io::Result<bool> {
        prompt.ask()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorState {
    Selecting(usize),
    Confirmed(bool),
}

/// Output side effect of one transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    Redraw,
    Finished,
    Cancelled,
}

impl SelectorState {
    pub fn start() -> Self {
        SelectorState::Selecting(0)
    }

    /// Advance on one key; `None` means the input stream ended.
    pub fn step(self, key: Option<Key>) -> (SelectorState, Effect) {
        let SelectorState::Selecting(index) = self else {
            return (self, Effect::None);
        };
        match key {
            Some(Key::Left | Key::Up) => {
                (SelectorState::Selecting(index.saturating_sub(1)), Effect::Redraw)
            }
            Some(Key::Right | Key::Down) => (
                SelectorState::Selecting((index + 1).min(OPTION_COUNT - 1)),
                Effect::Redraw,
            ),
            Some(Key::Enter) => (SelectorState::Confirmed(index == 0), Effect::Finished),
            Some(Key::Escape) | None => (SelectorState::Confirmed(false), Effect::Cancelled),
            Some(Key::Other) => (self, Effect::None),
        }
    }
}

/// Rewrite the option block; the cursor must sit on the line just below it.
pub fn render_options(out: &mut impl Write, prompt: &ConfirmPrompt, selected: usize) -> io::Result<()> {
    queue!(out, MoveToPreviousLine(OPTION_COUNT as u16))?;
    for (idx, label) in prompt.labels().iter().enumerate() {
        queue!(out, Clear(ClearType::UntilNewLine))?;
        if idx == selected {
            queue!(
                out,
                SetForegroundColor(Color::Cyan),
                SetAttribute(Attribute::Bold),
                Print(format!("> {label}")),
                SetAttribute(Attribute::Reset),
                ResetColor
            )?;
        } else {
            queue!(out, Print(format!("  {label}")))?;
        }
        queue!(out, Print("\n"))?;
    }
    out.flush()
}

/// Interactive selection over an already-decoded key stream.
pub fn select(
    prompt: &ConfirmPrompt,
    keys: impl IntoIterator<Item = Key>,
    out: &mut impl Write,
) -> io::Result<bool> {
    for line in &prompt.message_lines {
        writeln!(out, "{line}")?;
    }
    for _ in 0..OPTION_COUNT {
        writeln!(out)?;
    }

    let mut state = SelectorState::start();
    render_options(out, prompt, 0)?;

    let mut keys = keys.into_iter();
    loop {
        let (next, effect) = state.step(keys.next());
        state = next;
        match effect {
            Effect::None => {}
            Effect::Redraw => {
                if let SelectorState::Selecting(index) = state {
                    render_options(out, prompt, index)?;
                }
            }
            Effect::Finished => writeln!(out)?,
            Effect::Cancelled => writeln!(out, "\n{}", prompt.cancel_message)?,
        }
        if let SelectorState::Confirmed(confirmed) = state {
            out.flush()?;
            return Ok(confirmed);
        }
    }
}

/// Line-based fallback for pipes and scripts. End of input counts as an empty line.
pub fn confirm_by_line(
    prompt: &ConfirmPrompt,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> io::Result<bool> {
    for line in &prompt.message_lines {
        writeln!(out, "{line}")?;
    }
    writeln!(
        out,
        "Press Enter to {}, or type anything else then Enter to cancel:",
        prompt.primary_label.to_lowercase()
    )?;
    out.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    if !answer.trim().is_empty() {
        writeln!(out, "{}", prompt.cancel_message)?;
        out.flush()?;
        return Ok(false);
    }
    Ok(true)
}
