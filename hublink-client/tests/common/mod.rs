//! Common test utilities for hublink-client integration tests
//!
//! This module provides a scripted in-memory connection and builder so the
//! façade layer can be exercised without any real connection library.

use async_trait::async_trait;
use hublink_core::{
    ConnectionBuilder, ConnectionOptions, Error, EventCallback, HandlerId, HubConnection,
    LifecycleCallback, LogLevel, Result, RetryPolicy,
};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Install a test subscriber so failures show the hub's tracing output
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// One outbound call observed by the mock connection
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    Send { method: String, args: Vec<Value> },
    Invoke { method: String, args: Vec<Value> },
}

enum StartBehavior {
    /// `start` resolves immediately
    Immediate,
    /// `start` waits until `release_start` is called
    Manual,
    /// The first `start` fails with this message, later ones succeed
    FailFirst(String),
}

/// Scripted in-memory hub connection
///
/// Records every outbound call, lets tests fire inbound events and
/// lifecycle notifications, and can hold `start` open to observe gating.
pub struct MockConnection {
    base_url: String,
    start_behavior: StartBehavior,
    start_gate: Notify,
    start_calls: AtomicUsize,
    stop_calls: AtomicUsize,
    calls: Mutex<Vec<RecordedCall>>,
    invoke_results: Mutex<HashMap<String, std::result::Result<Value, String>>>,
    handlers: Mutex<HashMap<String, Vec<(HandlerId, EventCallback)>>>,
    next_handler: AtomicU64,
    close_callbacks: Mutex<Vec<LifecycleCallback>>,
    reconnecting_callbacks: Mutex<Vec<LifecycleCallback>>,
    reconnected_callbacks: Mutex<Vec<LifecycleCallback>>,
}

impl MockConnection {
    pub fn new(base_url: impl Into<String>) -> Arc<Self> {
        Self::with_behavior(base_url, StartBehavior::Immediate)
    }

    pub fn with_manual_start(base_url: impl Into<String>) -> Arc<Self> {
        Self::with_behavior(base_url, StartBehavior::Manual)
    }

    pub fn with_failing_first_start(
        base_url: impl Into<String>,
        message: impl Into<String>,
    ) -> Arc<Self> {
        Self::with_behavior(base_url, StartBehavior::FailFirst(message.into()))
    }

    fn with_behavior(base_url: impl Into<String>, start_behavior: StartBehavior) -> Arc<Self> {
        Arc::new(Self {
            base_url: base_url.into(),
            start_behavior,
            start_gate: Notify::new(),
            start_calls: AtomicUsize::new(0),
            stop_calls: AtomicUsize::new(0),
            calls: Mutex::new(Vec::new()),
            invoke_results: Mutex::new(HashMap::new()),
            handlers: Mutex::new(HashMap::new()),
            next_handler: AtomicU64::new(0),
            close_callbacks: Mutex::new(Vec::new()),
            reconnecting_callbacks: Mutex::new(Vec::new()),
            reconnected_callbacks: Mutex::new(Vec::new()),
        })
    }

    /// Let a pending manual `start` complete
    pub fn release_start(&self) {
        self.start_gate.notify_one();
    }

    /// Script the result of `invoke` for a wire method
    pub fn set_invoke_result(&self, method: &str, result: std::result::Result<Value, String>) {
        self.invoke_results
            .lock()
            .unwrap()
            .insert(method.to_string(), result);
    }

    pub fn recorded_calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn start_count(&self) -> usize {
        self.start_calls.load(Ordering::SeqCst)
    }

    pub fn stop_count(&self) -> usize {
        self.stop_calls.load(Ordering::SeqCst)
    }

    pub fn handler_count(&self, method: &str) -> usize {
        self.handlers
            .lock()
            .unwrap()
            .get(method)
            .map_or(0, Vec::len)
    }

    pub fn close_callback_count(&self) -> usize {
        self.close_callbacks.lock().unwrap().len()
    }

    /// Deliver a server-to-client event to every registered handler
    pub fn fire_event(&self, method: &str, args: Vec<Value>) {
        let handlers = self.handlers.lock().unwrap();
        for (_, handler) in handlers.get(method).into_iter().flatten() {
            handler(args.clone());
        }
    }

    pub fn fire_close(&self, error: Option<String>) {
        for callback in self.close_callbacks.lock().unwrap().iter() {
            callback(error.clone());
        }
    }

    pub fn fire_reconnecting(&self, error: Option<String>) {
        for callback in self.reconnecting_callbacks.lock().unwrap().iter() {
            callback(error.clone());
        }
    }

    pub fn fire_reconnected(&self, connection_id: Option<String>) {
        for callback in self.reconnected_callbacks.lock().unwrap().iter() {
            callback(connection_id.clone());
        }
    }
}

#[async_trait]
impl HubConnection for MockConnection {
    fn base_url(&self) -> String {
        self.base_url.clone()
    }

    async fn start(&self) -> Result<()> {
        let attempt = self.start_calls.fetch_add(1, Ordering::SeqCst);
        match &self.start_behavior {
            StartBehavior::Immediate => Ok(()),
            StartBehavior::Manual => {
                self.start_gate.notified().await;
                Ok(())
            }
            StartBehavior::FailFirst(message) => {
                if attempt == 0 {
                    Err(Error::Transport(message.clone()))
                } else {
                    Ok(())
                }
            }
        }
    }

    async fn stop(&self) -> Result<()> {
        self.stop_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn send(&self, method: &str, args: Vec<Value>) -> Result<()> {
        self.calls.lock().unwrap().push(RecordedCall::Send {
            method: method.to_string(),
            args,
        });
        Ok(())
    }

    async fn invoke(&self, method: &str, args: Vec<Value>) -> Result<Value> {
        self.calls.lock().unwrap().push(RecordedCall::Invoke {
            method: method.to_string(),
            args,
        });
        match self.invoke_results.lock().unwrap().get(method) {
            Some(Ok(value)) => Ok(value.clone()),
            Some(Err(message)) => Err(Error::Remote(message.clone())),
            None => Ok(Value::Null),
        }
    }

    fn on(&self, method: &str, handler: EventCallback) -> HandlerId {
        let id = HandlerId::new(self.next_handler.fetch_add(1, Ordering::SeqCst));
        self.handlers
            .lock()
            .unwrap()
            .entry(method.to_string())
            .or_default()
            .push((id, handler));
        id
    }

    fn off(&self, method: &str, handler: HandlerId) {
        if let Some(handlers) = self.handlers.lock().unwrap().get_mut(method) {
            handlers.retain(|(id, _)| *id != handler);
        }
    }

    fn on_close(&self, callback: LifecycleCallback) {
        self.close_callbacks.lock().unwrap().push(callback);
    }

    fn on_reconnecting(&self, callback: LifecycleCallback) {
        self.reconnecting_callbacks.lock().unwrap().push(callback);
    }

    fn on_reconnected(&self, callback: LifecycleCallback) {
        self.reconnected_callbacks.lock().unwrap().push(callback);
    }
}

/// Builder producing [`MockConnection`]s, with optional scripted failure
#[derive(Default)]
pub struct MockConnectionBuilder {
    fail_with: Option<String>,
    manual_start: bool,
    connections: Mutex<Vec<Arc<MockConnection>>>,
}

impl MockConnectionBuilder {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Every `build` call fails synchronously with this message
    pub fn failing(message: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            fail_with: Some(message.into()),
            ..Self::default()
        })
    }

    /// Built connections hold `start` open until released
    pub fn with_manual_start() -> Arc<Self> {
        Arc::new(Self {
            manual_start: true,
            ..Self::default()
        })
    }

    pub fn connections(&self) -> Vec<Arc<MockConnection>> {
        self.connections.lock().unwrap().clone()
    }

    /// The most recently built connection
    pub fn last_connection(&self) -> Arc<MockConnection> {
        self.connections
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no connection was built")
    }
}

impl ConnectionBuilder for MockConnectionBuilder {
    fn build(
        &self,
        url: &str,
        _options: &ConnectionOptions,
        _retry_policy: Arc<dyn RetryPolicy>,
        _log_level: LogLevel,
    ) -> Result<Arc<dyn HubConnection>> {
        if let Some(message) = &self.fail_with {
            return Err(Error::InvalidConfiguration(message.clone()));
        }

        let connection = if self.manual_start {
            MockConnection::with_manual_start(url)
        } else {
            MockConnection::new(url)
        };
        self.connections.lock().unwrap().push(Arc::clone(&connection));
        Ok(connection as Arc<dyn HubConnection>)
    }
}
