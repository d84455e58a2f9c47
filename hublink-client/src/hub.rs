//! Hub lifecycle wrapper
//!
//! `HubBase` owns the underlying connection exclusively and adds the two
//! behaviors every hub call relies on:
//!
//! - **Readiness gating**: outbound calls wait for the connection's first
//!   successful start. The gate opens once; calls issued after readiness
//!   pass straight through, including while the connection library is
//!   reconnecting on its own.
//! - **Status streams**: close, reconnecting and reconnected notifications
//!   become multicast streams. One callback is registered with the
//!   connection per notification kind, shared by all subscribers, with
//!   events replayed to late subscribers.
//!
//! # Lifecycle
//!
//! ```text
//! Pending --connect(), start ok--> Ready --disconnect()--> Closed
//!    |                               |
//!    +--start fails: closed event,   +--disconnect() also reachable
//!       stays Pending, retryable        from Pending; gated calls fail
//! ```
//!
//! `connect` never reports its outcome directly: establishment failures
//! are published on the closed stream. Once `disconnect` completes the
//! lifecycle is terminal; calls still waiting on the gate fail with
//! [`Error::ConnectionClosed`], as does everything issued afterwards.

use crate::relay::{Relay, StatusStream};
use crate::stream::EventStream;
use hublink_core::{Error, HubConnection, Result};
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Readiness {
    Pending,
    Ready,
    Closed,
}

/// Lifecycle wrapper around one hub connection
///
/// Created by the factory; reached through the [`Hub`](crate::Hub) façade.
pub struct HubBase {
    connection: Arc<dyn HubConnection>,
    ready: Arc<watch::Sender<Readiness>>,
    starting: Arc<AtomicBool>,
    closed_events: Arc<Relay<Option<String>>>,
    reconnecting_events: Arc<Relay<Option<String>>>,
    reconnected_events: Arc<Relay<Option<String>>>,
}

impl HubBase {
    /// Wrap a connection, taking exclusive ownership of it
    pub fn new(connection: Arc<dyn HubConnection>) -> Arc<Self> {
        let (ready, _) = watch::channel(Readiness::Pending);

        let closed_events = Arc::new(Relay::new());
        let reconnecting_events = Arc::new(Relay::new());
        let reconnected_events = Arc::new(Relay::new());

        // One registration per notification kind, shared by all subscribers.
        let relay = Arc::clone(&closed_events);
        connection.on_close(Box::new(move |error| relay.publish(error)));
        let relay = Arc::clone(&reconnecting_events);
        connection.on_reconnecting(Box::new(move |error| relay.publish(error)));
        let relay = Arc::clone(&reconnected_events);
        connection.on_reconnected(Box::new(move |connection_id| relay.publish(connection_id)));

        Arc::new(Self {
            connection,
            ready: Arc::new(ready),
            starting: Arc::new(AtomicBool::new(false)),
            closed_events,
            reconnecting_events,
            reconnected_events,
        })
    }

    /// Begin establishing the connection
    ///
    /// Returns immediately. On success every gated call is released, once.
    /// On failure the error is published on the closed stream and the hub
    /// stays pending, so `connect` may be called again. Calling while a
    /// start is in flight, or after the hub is ready or closed, is a no-op.
    pub fn connect(&self) {
        if *self.ready.borrow() != Readiness::Pending {
            return;
        }
        if self.starting.swap(true, Ordering::SeqCst) {
            return;
        }

        let connection = Arc::clone(&self.connection);
        let ready = Arc::clone(&self.ready);
        let starting = Arc::clone(&self.starting);
        let closed_events = Arc::clone(&self.closed_events);
        tokio::spawn(async move {
            tracing::debug!(url = %connection.base_url(), "starting hub connection");
            match connection.start().await {
                Ok(()) => {
                    tracing::info!(url = %connection.base_url(), "hub connection started");
                    // Leave a terminal state untouched if disconnect won the race.
                    ready.send_if_modified(|state| {
                        if *state == Readiness::Pending {
                            *state = Readiness::Ready;
                            true
                        } else {
                            false
                        }
                    });
                }
                Err(e) => {
                    tracing::warn!(url = %connection.base_url(), error = %e, "hub connection failed to start");
                    closed_events.publish(Some(e.to_string()));
                    starting.store(false, Ordering::SeqCst);
                }
            }
        });
    }

    /// Begin a graceful shutdown
    ///
    /// Returns immediately. Once the underlying stop completes the
    /// lifecycle is terminal: calls waiting on the gate fail with
    /// [`Error::ConnectionClosed`], and so does every later call.
    pub fn disconnect(&self) {
        let connection = Arc::clone(&self.connection);
        let ready = Arc::clone(&self.ready);
        tokio::spawn(async move {
            tracing::debug!(url = %connection.base_url(), "stopping hub connection");
            if let Err(e) = connection.stop().await {
                tracing::warn!(url = %connection.base_url(), error = %e, "error while stopping hub connection");
            }
            ready.send_replace(Readiness::Closed);
        });
    }

    /// Whether the first successful start has completed
    pub fn is_ready(&self) -> bool {
        *self.ready.borrow() == Readiness::Ready
    }

    /// The URL the underlying connection targets
    pub fn base_url(&self) -> String {
        self.connection.base_url()
    }

    /// Fire-and-forget invocation, gated on first readiness
    pub async fn send_core(&self, method: &str, args: Vec<Value>) -> Result<()> {
        self.await_ready().await?;
        tracing::debug!(method, "dispatching send");
        self.connection.send(method, args).await
    }

    /// Request/response invocation, gated on first readiness
    pub async fn invoke_core(&self, method: &str, args: Vec<Value>) -> Result<Value> {
        self.await_ready().await?;
        tracing::debug!(method, "dispatching invoke");
        self.connection.invoke(method, args).await
    }

    /// Subscribe to a server-to-client method
    ///
    /// Registers with the connection immediately, without waiting for
    /// readiness. Every call registers an independent handler; dropping
    /// the stream removes only its own.
    pub fn listen_core(&self, method: &str) -> EventStream {
        EventStream::register(Arc::clone(&self.connection), method)
    }

    /// Stream of close notifications (establishment failures included)
    pub fn closed(&self) -> StatusStream<Option<String>> {
        self.closed_events.subscribe()
    }

    /// Stream of reconnecting notifications
    pub fn reconnecting(&self) -> StatusStream<Option<String>> {
        self.reconnecting_events.subscribe()
    }

    /// Stream of reconnected notifications, carrying the new connection id
    pub fn reconnected(&self) -> StatusStream<Option<String>> {
        self.reconnected_events.subscribe()
    }

    /// Wait for the first successful start
    ///
    /// Resolves immediately once the hub has been ready, even if the
    /// connection is currently reconnecting; there is no re-gating.
    async fn await_ready(&self) -> Result<()> {
        let mut rx = self.ready.subscribe();
        loop {
            match *rx.borrow_and_update() {
                Readiness::Ready => return Ok(()),
                Readiness::Closed => return Err(Error::ConnectionClosed),
                Readiness::Pending => {}
            }
            if rx.changed().await.is_err() {
                return Err(Error::ConnectionClosed);
            }
        }
    }
}
