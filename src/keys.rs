//! Key decoding for single-keystroke reads so the confirm widget stays free of I/O.

use std::io::{self, Read};

const ESC: u8 = 0x1b;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Escape,
    Up,
    Down,
    Left,
    Right,
    Other,
}

#[inline]
fn map_arrow_final(byte: u8) -> Option<Key> {
    match byte {
        b'A' => Some(Key::Up),
        b'B' => Some(Key::Down),
        b'C' => Some(Key::Right),
        b'D' => Some(Key::Left),
        _ => None,
    }
}

/// Classify the bytes returned by one raw-mode read.
pub fn decode_key(bytes: &[u8]) -> Key {
    match bytes {
        [b'\r'] | [b'\n'] => Key::Enter,
        [ESC] => Key::Escape,
        // CSI (`ESC [`) or application-cursor (`ESC O`) arrow.
        [ESC, b'[' | b'O', last, ..] => map_arrow_final(*last).unwrap_or(Key::Other),
        _ => Key::Other,
    }
}

/// Unbuffered stdin so each `read` maps to exactly one `read(2)` on the tty.
pub struct RawStdin;

impl Read for RawStdin {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        // SAFETY: the pointer and length describe `buf`, which outlives the call.
        let count = unsafe { libc::read(libc::STDIN_FILENO, buf.as_mut_ptr().cast(), buf.len()) };
        if count < 0 {
            Err(io::Error::last_os_error())
        } else {
            Ok(count as usize)
        }
    }
}

/// Reads one keystroke per `read` call, the way a terminal in raw mode with
/// `VMIN=1` delivers them.
pub struct KeyReader<R> {
    inner: R,
}

impl<R: Read> KeyReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// `Ok(None)` once the stream is closed.
    pub fn read_key(&mut self) -> io::Result<Option<Key>> {
        let mut buf = [0u8; 3];
        loop {
            match self.inner.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(count) => return Ok(Some(decode_key(&buf[..count]))),
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            }
        }
    }
}

impl<R: Read> Iterator for KeyReader<R> {
    type Item = Key;

    /// Read errors end the key stream just like a closed descriptor.
    fn next(&mut self) -> Option<Key> {
        match self.read_key() {
            Ok(key) => key,
            Err(err) => {
                crate::log_debug(&format!("key read failed: {err}"));
                None
            }
        }
    }
}
