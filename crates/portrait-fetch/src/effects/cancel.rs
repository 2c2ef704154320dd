use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;

/// Cooperative cancellation signal shared between a caller and a fetch.
///
/// Clones observe the same signal. Once cancelled it stays cancelled.
#[derive(Clone, Debug)]
pub struct Cancellation {
    tx: Arc<watch::Sender<bool>>,
    rx: watch::Receiver<bool>,
}

impl Default for Cancellation {
    fn default() -> Self {
        Self::new()
    }
}

impl Cancellation {
    pub fn new() -> Self {
        let (tx, rx) = watch::channel(false);
        Self { tx: Arc::new(tx), rx }
    }

    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once [`cancel`](Self::cancel) has been called on any clone.
    pub async fn cancelled(&self) {
        let mut rx = self.rx.clone();
        loop {
            if *rx.borrow_and_update() {
                return;
            }
            if rx.changed().await.is_err() {
                // sender gone: nobody can cancel any more
                futures_util::future::pending::<()>().await;
            }
        }
    }

    /// Drive `fut` to completion unless cancelled first.
    ///
    /// On cancellation `fut` is dropped at its current suspension point and
    /// `None` is returned. A signal already raised wins over a ready future.
    pub async fn run<F: Future>(&self, fut: F) -> Option<F::Output> {
        tokio::select! {
            biased;
            _ = self.cancelled() => None,
            out = fut => Some(out),
        }
    }
}
