//! Chat-style demo against an in-memory loopback connection
//!
//! hublink owns no transport, so this demo supplies the smallest possible
//! connection: a loopback that answers `Add` invocations locally and echoes
//! every send back to the registered event handlers. It shows the pieces a
//! real application would use:
//!
//! - creating a hub through the factory
//! - readiness gating (a call issued before `connect` waits for the start)
//! - the naming policy (logical `add` dispatches wire name `Add`)
//! - event streams and the closed status stream
//!
//! Run it with:
//! ```bash
//! cargo run --example loopback_chat
//! ```

use async_trait::async_trait;
use hublink::{HubConfiguration, HubFactory};
use hublink_core::{
    ConnectionBuilder, ConnectionOptions, Error, EventCallback, HandlerId, HubConnection,
    LifecycleCallback, LogLevel, Result, RetryPolicy,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// In-memory connection: sends loop back to event handlers, `Add` invokes
/// are answered locally.
struct LoopbackConnection {
    base_url: String,
    handlers: Mutex<HashMap<String, Vec<(HandlerId, EventCallback)>>>,
    next_handler: AtomicU64,
    close_callbacks: Mutex<Vec<LifecycleCallback>>,
}

impl LoopbackConnection {
    fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            handlers: Mutex::new(HashMap::new()),
            next_handler: AtomicU64::new(0),
            close_callbacks: Mutex::new(Vec::new()),
        }
    }

    fn fire(&self, method: &str, args: Vec<Value>) {
        let handlers = self.handlers.lock().unwrap();
        for (_, handler) in handlers.get(method).into_iter().flatten() {
            handler(args.clone());
        }
    }
}

#[async_trait]
impl HubConnection for LoopbackConnection {
    fn base_url(&self) -> String {
        self.base_url.clone()
    }

    async fn start(&self) -> Result<()> {
        // Pretend the handshake takes a moment so gating is observable.
        tokio::time::sleep(Duration::from_millis(300)).await;
        Ok(())
    }

    async fn stop(&self) -> Result<()> {
        for callback in self.close_callbacks.lock().unwrap().iter() {
            callback(None);
        }
        Ok(())
    }

    async fn send(&self, method: &str, args: Vec<Value>) -> Result<()> {
        println!("  [loopback] send {} {:?}", method, args);
        self.fire(method, args);
        Ok(())
    }

    async fn invoke(&self, method: &str, args: Vec<Value>) -> Result<Value> {
        println!("  [loopback] invoke {} {:?}", method, args);
        match method {
            "Add" => {
                let sum: i64 = args.iter().filter_map(Value::as_i64).sum();
                Ok(json!(sum))
            }
            other => Err(Error::Remote(format!("unknown hub method: {}", other))),
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

    fn on_reconnecting(&self, _callback: LifecycleCallback) {}

    fn on_reconnected(&self, _callback: LifecycleCallback) {}
}

struct LoopbackBuilder;

impl ConnectionBuilder for LoopbackBuilder {
    fn build(
        &self,
        url: &str,
        _options: &ConnectionOptions,
        _retry_policy: Arc<dyn RetryPolicy>,
        _log_level: LogLevel,
    ) -> Result<Arc<dyn HubConnection>> {
        Ok(Arc::new(LoopbackConnection::new(url)))
    }
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    println!("=== Loopback Chat Demo ===\n");

    let config = HubConfiguration::new()
        .with_base_url("https://loopback.local")
        .with_log_level(LogLevel::Information);
    let factory = HubFactory::new(config, Arc::new(LoopbackBuilder));

    let hub = Arc::new(factory.create_hub("chatHub")?);
    println!("Hub created for {}\n", hub.base_url());

    // Subscriptions register immediately, before any connect.
    let mut messages = hub.listen.stream::<(String, String)>("messagePosted");

    // This call parks on the readiness gate until the start completes.
    println!("Invoking add(2, 40) before connect...");
    let gated = tokio::spawn({
        let hub = Arc::clone(&hub);
        async move { hub.invoke.call::<_, i64>("add", (2, 40)).await }
    });

    tokio::time::sleep(Duration::from_millis(100)).await;
    println!("Still waiting: the hub has not connected yet\n");

    println!("Connecting...");
    hub.connect();

    let total = gated.await??;
    println!("add(2, 40) = {} (dispatched after the start)\n", total);

    println!("Posting a chat message...");
    hub.send.call("messagePosted", ("alice", "hello hub")).await?;
    if let Some(event) = messages.recv().await {
        let (user, text) = event?;
        println!("Received event: {} says {:?}\n", user, text);
    }

    let mut closed = hub.closed();
    println!("Disconnecting...");
    hub.disconnect();
    closed.recv().await;
    println!("Closed stream reported the shutdown");

    Ok(())
}
