//! Publish-subscribe value cell.
//!
//! [`ObservableCell`] holds one value and fans every update out to any number
//! of [`Subscription`]s. A subscription first yields the value current at the
//! time it was created, then every later `set` in order. It backs both the
//! shared current page and the loading flag.

use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::{RecvError, TryRecvError};

const CHANNEL_CAPACITY: usize = 64;

#[derive(Debug)]
struct Shared<T> {
    value: RwLock<T>,
    tx: broadcast::Sender<T>,
}

/// Single value with multi-subscriber change notification.
///
/// Clones share the same value and subscribers.
#[derive(Debug)]
pub struct ObservableCell<T> {
    inner: Arc<Shared<T>>,
}

impl<T> Clone for ObservableCell<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone> ObservableCell<T> {
    pub fn new(initial: T) -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            inner: Arc::new(Shared {
                value: RwLock::new(initial),
                tx,
            }),
        }
    }

    /// Snapshot of the current value.
    pub fn get(&self) -> T {
        self.inner.value.read().clone()
    }

    /// Replace the value and notify every subscriber, even if the value did not change.
    pub fn set(&self, value: T) {
        let mut guard = self.inner.value.write();
        *guard = value.clone();
        // No subscribers is not an error.
        let _ = self.inner.tx.send(value);
    }

    /// Live sequence: the current value first, then every later update.
    pub fn subscribe(&self) -> Subscription<T> {
        // Holding the read lock keeps a concurrent `set` from landing between
        // the snapshot and the channel subscription.
        let guard = self.inner.value.read();
        let rx = self.inner.tx.subscribe();
        Subscription {
            initial: Some(T::clone(&guard)),
            rx,
        }
    }
}

impl<T: Clone + PartialEq> ObservableCell<T> {
    /// Set and notify only when the value differs. Returns whether it changed.
    pub fn set_if_changed(&self, value: T) -> bool {
        let mut guard = self.inner.value.write();
        if *guard == value {
            return false;
        }
        *guard = value.clone();
        let _ = self.inner.tx.send(value);
        true
    }
}

/// Receiving end of an [`ObservableCell`].
#[derive(Debug)]
pub struct Subscription<T> {
    initial: Option<T>,
    rx: broadcast::Receiver<T>,
}

impl<T: Clone> Subscription<T> {
    /// Wait for the next value. `None` once every cell handle is gone.
    pub async fn next(&mut self) -> Option<T> {
        if let Some(v) = self.initial.take() {
            return Some(v);
        }
        loop {
            match self.rx.recv().await {
                Ok(v) => return Some(v),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "subscription lagged, skipping ahead");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Next value if one is already queued.
    pub fn try_next(&mut self) -> Option<T> {
        if let Some(v) = self.initial.take() {
            return Some(v);
        }
        loop {
            match self.rx.try_recv() {
                Ok(v) => return Some(v),
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "subscription lagged, skipping ahead");
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return None,
            }
        }
    }

    /// Drain everything queued and keep only the newest value.
    pub fn drain_latest(&mut self) -> Option<T> {
        let mut last = None;
        while let Some(v) = self.try_next() {
            last = Some(v);
        }
        last
    }
}
