//! Multicast relays behind the hub status streams
//!
//! Each hub registers one callback per lifecycle notification with its
//! connection; the relay fans the resulting events out to any number of
//! subscribers. Events are buffered so a late subscriber still observes
//! everything published since the relay was created.

use std::sync::{Mutex, MutexGuard};
use std::task::{Context, Poll};
use tokio::sync::mpsc;

pub(crate) struct Relay<T> {
    inner: Mutex<RelayInner<T>>,
}

struct RelayInner<T> {
    history: Vec<T>,
    subscribers: Vec<mpsc::UnboundedSender<T>>,
}

impl<T: Clone> Relay<T> {
    pub(crate) fn new() -> Self {
        Self {
            inner: Mutex::new(RelayInner {
                history: Vec::new(),
                subscribers: Vec::new(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, RelayInner<T>> {
        // A poisoned relay still holds consistent data; keep delivering.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Record the event and deliver it to every live subscriber
    pub(crate) fn publish(&self, event: T) {
        let mut inner = self.lock();
        inner.history.push(event.clone());
        inner
            .subscribers
            .retain(|tx| tx.send(event.clone()).is_ok());
    }

    /// Open a stream that replays the history, then follows live events
    pub(crate) fn subscribe(&self) -> StatusStream<T> {
        let mut inner = self.lock();
        let (tx, rx) = mpsc::unbounded_channel();
        for event in &inner.history {
            let _ = tx.send(event.clone());
        }
        inner.subscribers.push(tx);
        StatusStream { rx }
    }
}

/// A subscription to one of the hub's lifecycle status streams
///
/// Yields every event published since the hub was created, then live
/// events as they arrive. The stream never completes while its hub is
/// alive.
pub struct StatusStream<T> {
    rx: mpsc::UnboundedReceiver<T>,
}

impl<T> StatusStream<T> {
    /// Receive the next status event
    ///
    /// Returns `None` once the hub has been dropped and all buffered
    /// events were consumed.
    pub async fn recv(&mut self) -> Option<T> {
        self.rx.recv().await
    }
}

impl<T> futures::Stream for StatusStream<T> {
    type Item = T;

    fn poll_next(mut self: std::pin::Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<T>> {
        self.rx.poll_recv(cx)
    }
}
