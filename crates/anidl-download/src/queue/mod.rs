//! Producer/consumer hand-off queue.
//!
//! # Design
//!
//! - FIFO, unbounded, one producer and one consumer
//! - `push` is synchronous and never blocks
//! - `pop` waits on a `Notify` instead of polling
//! - The producer closes the queue when it is done; a closed and drained
//!   queue makes `pop` return `None`
//!
//! The lock is a std `Mutex` and is never held across an await.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::Notify;

use anidl_core::ResolvedItem;

#[derive(Debug, Default)]
struct QueueState {
    items: VecDeque<ResolvedItem>,
    closed: bool,
}

/// Ordered channel of resolved download links.
#[derive(Debug, Default)]
pub struct DownloadQueue {
    state: Mutex<QueueState>,
    notify: Notify,
}

impl DownloadQueue {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, QueueState> {
        // Every critical section leaves the state consistent, so a poisoned
        // lock is still usable.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append an item and wake the consumer.
    ///
    /// Items pushed after `close` are dropped.
    pub fn push(&self, item: ResolvedItem) {
        {
            let mut state = self.lock();
            if state.closed {
                tracing::warn!(episode = item.episode, "Dropping item pushed to closed queue");
                return;
            }
            state.items.push_back(item);
        }
        self.notify.notify_one();
    }

    /// Mark the queue as finished. Items already queued can still be popped.
    pub fn close(&self) {
        self.lock().closed = true;
        self.notify.notify_waiters();
    }

    /// Remove the oldest item, waiting until one is available.
    ///
    /// Returns `None` once the queue is closed and empty.
    pub async fn pop(&self) -> Option<ResolvedItem> {
        loop {
            let notified = self.notify.notified();
            tokio::pin!(notified);
            // Register before checking so a push or close between the check
            // and the await is not missed.
            notified.as_mut().enable();

            {
                let mut state = self.lock();
                if let Some(item) = state.items.pop_front() {
                    return Some(item);
                }
                if state.closed {
                    return None;
                }
            }

            notified.await;
        }
    }

    pub fn len(&self) -> usize {
        self.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().items.is_empty()
    }
}
