//! Cancellation and timeouts for outbound calls
//!
//! A `CancelToken` is handed to every network-bound operation. Dropping the
//! paired `CancelHandle` without calling `cancel()` never cancels.

use crate::error::{Error, Result};
use std::future::Future;
use std::time::Duration;
use tokio::sync::watch;

/// Caller side of a cancellation pair
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    /// Signal cancellation to every token cloned from this pair
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }
}

/// Operation side of a cancellation pair
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    rx: Option<watch::Receiver<bool>>,
}

impl CancelToken {
    /// Create a linked handle/token pair
    pub fn pair() -> (CancelHandle, CancelToken) {
        let (tx, rx) = watch::channel(false);
        (CancelHandle { tx }, CancelToken { rx: Some(rx) })
    }

    /// A token that is never cancelled
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_cancelled(&self) -> bool {
        self.rx.as_ref().is_some_and(|rx| *rx.borrow())
    }

    /// Resolve once cancellation is signalled; pend forever otherwise
    pub async fn cancelled(&self) {
        let Some(rx) = &self.rx else {
            return std::future::pending().await;
        };
        let mut rx = rx.clone();
        loop {
            if *rx.borrow_and_update() {
                return;
            }
            if rx.changed().await.is_err() {
                return std::future::pending().await;
            }
        }
    }
}

/// Run `fut` under a timeout and a cancellation token
///
/// Cancellation wins over completion when both are ready. A timeout is
/// reported through `on_timeout` so callers pick the matching error kind.
pub async fn guarded<T, F, E>(
    fut: F,
    timeout: Duration,
    cancel: &CancelToken,
    on_timeout: E,
) -> Result<T>
where
    F: Future<Output = Result<T>>,
    E: FnOnce() -> Error,
{
    if cancel.is_cancelled() {
        return Err(Error::Cancelled);
    }

    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(Error::Cancelled),
        res = tokio::time::timeout(timeout, fut) => match res {
            Ok(inner) => inner,
            Err(_) => Err(on_timeout()),
        },
    }
}
