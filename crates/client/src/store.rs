//! Application-wide state shared between views.
//!
//! The only shared value is the unread-message counter. It has exactly one
//! writer (the fetch completion path) and any number of readers, so it is a
//! `watch` channel rather than a lock.

use tokio::sync::watch;

use crate::api::ApiClient;
use crate::error::ClientError;

/// Write half of the unread-message counter. Not `Clone`: one writer only.
#[derive(Debug)]
pub struct UnreadCounter {
    tx: watch::Sender<u64>,
}

/// Read half of the unread-message counter.
#[derive(Debug, Clone)]
pub struct UnreadSubscription {
    rx: watch::Receiver<u64>,
}

impl UnreadCounter {
    pub fn new(initial: u64) -> (Self, UnreadSubscription) {
        let (tx, rx) = watch::channel(initial);
        (Self { tx }, UnreadSubscription { rx })
    }

    /// Publish a new count. Readers are only woken when the value changes.
    pub fn set(&self, count: u64) {
        self.tx.send_if_modified(|current| {
            if *current == count {
                false
            } else {
                *current = count;
                true
            }
        });
    }

    pub fn get(&self) -> u64 {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> UnreadSubscription {
        UnreadSubscription {
            rx: self.tx.subscribe(),
        }
    }
}

impl UnreadSubscription {
    pub fn get(&self) -> u64 {
        *self.rx.borrow()
    }

    /// Wait for the next published change. Returns `None` once the writer is gone.
    pub async fn changed(&mut self) -> Option<u64> {
        self.rx.changed().await.ok()?;
        Some(*self.rx.borrow_and_update())
    }
}

/// Application store owned by the shell and handed to views.
#[derive(Debug)]
pub struct AppStore {
    unread: UnreadCounter,
    readers: UnreadSubscription,
}

impl Default for AppStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AppStore {
    pub fn new() -> Self {
        let (unread, readers) = UnreadCounter::new(0);
        Self { unread, readers }
    }

    pub fn unread_count(&self) -> u64 {
        self.unread.get()
    }

    pub fn subscribe_unread(&self) -> UnreadSubscription {
        self.readers.clone()
    }

    /// Fetch the unread count and publish it.
    ///
    /// On failure the previously published value is kept.
    pub async fn refresh_unread(&self, api: &ApiClient) -> Result<u64, ClientError> {
        match api.unread_message_count().await {
            Ok(count) => {
                self.unread.set(count);
                tracing::debug!(count, "unread count refreshed");
                Ok(count)
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to refresh unread count");
                Err(err)
            }
        }
    }
}
