//! Event streams over server-to-client hub methods
//!
//! [`EventStream`] is one subscription to one wire method: creating it
//! registers a dedicated callback with the underlying connection, and
//! dropping it removes exactly that callback. Two streams for the same
//! method are fully independent.
//!
//! [`TypedEventStream`] layers serde decoding on top: a single callback
//! argument deserializes directly, multiple arguments deserialize as an
//! array (tuples work naturally).

use hublink_core::{Error, HandlerId, HubConnection, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::sync::mpsc;

/// A subscription to a server-to-client hub method
///
/// Yields the raw argument list of each invocation. Never completes on its
/// own; dropping the stream deregisters its callback.
pub struct EventStream {
    rx: mpsc::UnboundedReceiver<Vec<Value>>,
    connection: Arc<dyn HubConnection>,
    method: String,
    handler: HandlerId,
}

impl EventStream {
    /// Register a callback for `method` and return the stream of its calls
    pub(crate) fn register(connection: Arc<dyn HubConnection>, method: &str) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let handler = connection.on(
            method,
            Box::new(move |args| {
                let _ = tx.send(args);
            }),
        );
        tracing::debug!(method, "registered event handler");

        Self {
            rx,
            connection,
            method: method.to_string(),
            handler,
        }
    }

    /// The wire method this stream is subscribed to
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Receive the next event's argument list
    pub async fn recv(&mut self) -> Option<Vec<Value>> {
        self.rx.recv().await
    }
}

impl futures::Stream for EventStream {
    type Item = Vec<Value>;

    fn poll_next(
        mut self: std::pin::Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Vec<Value>>> {
        self.rx.poll_recv(cx)
    }
}

impl Drop for EventStream {
    fn drop(&mut self) {
        self.connection.off(&self.method, self.handler);
        tracing::debug!(method = %self.method, "removed event handler");
    }
}

/// An [`EventStream`] with serde decoding of each event
pub struct TypedEventStream<T> {
    inner: EventStream,
    _marker: PhantomData<fn() -> T>,
}

impl<T: DeserializeOwned> TypedEventStream<T> {
    pub(crate) fn new(inner: EventStream) -> Self {
        Self {
            inner,
            _marker: PhantomData,
        }
    }

    /// The wire method this stream is subscribed to
    pub fn method(&self) -> &str {
        self.inner.method()
    }

    /// Receive and decode the next event
    ///
    /// Decode failures are yielded as `Err` items; the stream keeps
    /// producing afterwards.
    pub async fn recv(&mut self) -> Option<Result<T>> {
        self.inner.recv().await.map(decode_event)
    }
}

impl<T: DeserializeOwned> futures::Stream for TypedEventStream<T> {
    type Item = Result<T>;

    fn poll_next(
        mut self: std::pin::Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<T>>> {
        match std::pin::Pin::new(&mut self.inner).poll_next(cx) {
            Poll::Ready(Some(args)) => Poll::Ready(Some(decode_event(args))),
            Poll::Ready(None) => Poll::Ready(None),
            Poll::Pending => Poll::Pending,
        }
    }
}

fn decode_event<T: DeserializeOwned>(mut args: Vec<Value>) -> Result<T> {
    let value = match args.len() {
        0 => Value::Null,
        1 => args.remove(0),
        _ => Value::Array(args),
    };
    serde_json::from_value(value).map_err(|e| Error::Serialization(e.to_string()))
}
