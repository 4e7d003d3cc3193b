//! Change notifications for store subscribers
//!
//! Each subscriber owns the receiving end of a channel. The store sends one
//! [`StoreChange`] per mutation; subscribers re-read the store snapshot
//! rather than polling.

use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Mutex;

use log::debug;

use crate::models::EntryId;

/// What changed in the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreChange {
    /// Entries were (re)loaded from disk
    Loaded { count: usize },
    Added(EntryId),
    Deleted(Vec<EntryId>),
    Updated(EntryId),
}

/// Fan-out of changes to every live subscriber
#[derive(Default)]
pub struct Subscribers {
    senders: Mutex<Vec<Sender<StoreChange>>>,
}

impl Subscribers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new subscriber
    pub fn subscribe(&self) -> Receiver<StoreChange> {
        let (tx, rx) = channel();
        if let Ok(mut senders) = self.senders.lock() {
            senders.push(tx);
        }
        rx
    }

    /// Send a change to all subscribers, dropping any whose receiver is gone
    pub fn notify(&self, change: StoreChange) {
        let Ok(mut senders) = self.senders.lock() else {
            return;
        };

        let before = senders.len();
        senders.retain(|tx| tx.send(change.clone()).is_ok());

        let pruned = before - senders.len();
        if pruned > 0 {
            debug!("Dropped {} closed store subscriber(s)", pruned);
        }
    }

    pub fn count(&self) -> usize {
        self.senders.lock().map(|s| s.len()).unwrap_or(0)
    }
}
