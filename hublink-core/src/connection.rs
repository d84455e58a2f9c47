//! The external connection contract
//!
//! hublink does not implement a hub connection; it wraps one. These traits
//! describe exactly what the façade layer requires from the connection
//! library that does own the transport, the wire protocol and the
//! reconnect loop.
//!
//! # Contract
//!
//! - [`HubConnection`] is the live connection: start/stop, outbound
//!   send/invoke, inbound event handlers and the three lifecycle callbacks
//!   (close, reconnecting, reconnected).
//! - [`ConnectionBuilder`] manufactures connections for a target URL. A
//!   malformed URL or a transport construction failure is reported
//!   synchronously from [`ConnectionBuilder::build`], not deferred to
//!   start time.
//!
//! Event handlers are registered per call: `on` returns a [`HandlerId`]
//! and `off` removes exactly the handler with that id, so independent
//! registrations for the same method never interfere.

use crate::config::{ConnectionOptions, LogLevel};
use crate::error::Result;
use crate::retry::RetryPolicy;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Callback invoked with the arguments of a server-to-client event
pub type EventCallback = Box<dyn Fn(Vec<Value>) + Send + Sync>;

/// Callback invoked on a lifecycle transition
///
/// Carries the error message for close/reconnecting notifications, or the
/// new connection id for reconnected notifications. `None` when the
/// underlying library reports the transition without a payload.
pub type LifecycleCallback = Box<dyn Fn(Option<String>) + Send + Sync>;

/// Identity of a registered event handler
///
/// Returned by [`HubConnection::on`] and consumed by
/// [`HubConnection::off`]. Ids are only meaningful to the connection that
/// issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

impl HandlerId {
    /// Create an id from a raw value (for connection implementations)
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw value of this id
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// A live hub connection supplied by an external library
///
/// One connection belongs to exactly one hub façade; the façade never
/// shares it and never exposes it.
#[async_trait]
pub trait HubConnection: Send + Sync {
    /// The URL this connection targets
    fn base_url(&self) -> String;

    /// Establish the connection
    async fn start(&self) -> Result<()>;

    /// Gracefully shut the connection down
    async fn stop(&self) -> Result<()>;

    /// Fire-and-forget invocation of a hub method
    async fn send(&self, method: &str, args: Vec<Value>) -> Result<()>;

    /// Request/response invocation of a hub method
    async fn invoke(&self, method: &str, args: Vec<Value>) -> Result<Value>;

    /// Register a handler for a server-to-client event
    fn on(&self, method: &str, handler: EventCallback) -> HandlerId;

    /// Remove a previously registered handler
    fn off(&self, method: &str, handler: HandlerId);

    /// Register a callback for connection close
    fn on_close(&self, callback: LifecycleCallback);

    /// Register a callback for the start of a reconnect cycle
    fn on_reconnecting(&self, callback: LifecycleCallback);

    /// Register a callback for a completed reconnect
    fn on_reconnected(&self, callback: LifecycleCallback);
}

/// Manufactures hub connections for a target URL
pub trait ConnectionBuilder: Send + Sync {
    /// Build a connection for `url` with the supplied options
    ///
    /// Construction failures (malformed URL, unsupported transport) are
    /// returned here, synchronously.
    fn build(
        &self,
        url: &str,
        options: &ConnectionOptions,
        retry_policy: Arc<dyn RetryPolicy>,
        log_level: LogLevel,
    ) -> Result<Arc<dyn HubConnection>>;
}
