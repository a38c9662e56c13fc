use tokio::sync::watch;

/// Cooperative cancellation signal threaded through the parser and the
/// subprocess lifecycle as a single context value. Built on
/// `tokio::sync::watch` rather than `tokio_util::sync::CancellationToken`
/// to avoid pulling in a crate the rest of the workspace has no other use
/// for.
#[derive(Clone)]
pub struct CancelToken {
    rx: watch::Receiver<bool>,
}

/// The half that triggers cancellation. Dropping it does not cancel;
/// call `cancel()` explicitly.
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

pub fn cancel_pair() -> (CancelHandle, CancelToken) {
    let (tx, rx) = watch::channel(false);
    (CancelHandle { tx }, CancelToken { rx })
}

impl CancelHandle {
    pub fn cancel(&self) {
        let _ = self.tx.send(true);
    }
}

impl CancelToken {
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once cancellation has been signalled. Safe to poll from
    /// a `tokio::select!` alongside other suspension points.
    pub async fn cancelled(&mut self) {
        let _ = self.rx.wait_for(|v| *v).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn cancellation_is_observable_after_signal() {
        let (handle, mut token) = cancel_pair();
        assert!(!token.is_cancelled());
        handle.cancel();
        token.cancelled().await;
        assert!(token.is_cancelled());
    }
}
