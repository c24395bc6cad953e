use std::sync::{Mutex, MutexGuard};

/// A panic while holding one of our statics must not take logging or
/// terminal restore down with it.
pub(crate) fn lock_or_recover<'a, T>(lock: &'a Mutex<T>, context: &str) -> MutexGuard<'a, T> {
    match lock.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            eprintln!("quickcmd: lock poisoned in {context}; recovering");
            poisoned.into_inner()
        }
    }
}
