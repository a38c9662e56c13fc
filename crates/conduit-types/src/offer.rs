use tokio::sync::mpsc;

use crate::cancel::CancelToken;

/// Non-blocking send used by every producer that writes to a bounded
/// channel. Attempts the send; if the channel is full, returns `false`
/// without blocking. This is the *only* mechanism allowed to write to the
/// event sink or the parser-out channel — producers must never do a naked
/// blocking `send().await`.
pub fn offer<T>(tx: &mpsc::Sender<T>, value: T) -> bool {
    tx.try_send(value).is_ok()
}

/// Context-aware variant: returns `false` without attempting the send if
/// the token is already cancelled.
pub fn offer_cancellable<T>(tx: &mpsc::Sender<T>, value: T, cancel: &CancelToken) -> bool {
    if cancel.is_cancelled() {
        return false;
    }
    offer(tx, value)
}

/// Tracks dropped-on-full sends for a single producer and decides when a
/// diagnostic should be emitted: the first drop, then every hundredth
/// thereafter. The threshold is a heuristic and is exposed as a
/// constructor argument so callers can tune it.
#[derive(Debug, Default)]
pub struct DropCounter {
    dropped: u64,
    every: u64,
}

impl DropCounter {
    pub fn new(every: u64) -> Self {
        Self { dropped: 0, every: every.max(1) }
    }

    /// Record a drop; returns `true` if this drop should produce a
    /// diagnostic (first drop, or a multiple of `every`).
    pub fn record(&mut self) -> bool {
        self.dropped += 1;
        self.dropped == 1 || self.dropped % self.every == 0
    }

    pub fn count(&self) -> u64 {
        self.dropped
    }
}
