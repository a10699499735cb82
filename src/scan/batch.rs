//! Coalesces bursts of change events into one batch

use crossbeam_channel::{Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

/// Quiet period collected after the first event of a burst
pub const DEFAULT_BATCH_WINDOW: Duration = Duration::from_millis(150);

/// Block until an event arrives, then keep collecting for `window`.
///
/// Returns `None` once every sender is gone and nothing is pending.
pub fn next_batch<T>(rx: &Receiver<T>, window: Duration) -> Option<Vec<T>> {
    let first = rx.recv().ok()?;
    let mut batch = vec![first];
    let deadline = Instant::now() + window;
    loop {
        match rx.recv_deadline(deadline) {
            Ok(event) => batch.push(event),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => break,
        }
    }
    Some(batch)
}
