//! Registry demo: one façade per logical binding
//!
//! The registry memoizes hubs by identifier: the first resolution creates
//! the hub through the factory, every later one returns the identical
//! instance. `release` hands lifecycle control back to the caller.
//!
//! Run it with:
//! ```bash
//! cargo run --example shared_hub
//! ```

use async_trait::async_trait;
use hublink::{HubConfiguration, HubFactory, HubRegistry};
use hublink_core::{
    ConnectionBuilder, ConnectionOptions, EventCallback, HandlerId, HubConnection,
    LifecycleCallback, LogLevel, Result, RetryPolicy,
};
use serde_json::Value;
use std::sync::Arc;

/// Minimal connection that answers every invoke with its own target URL
struct EchoConnection {
    base_url: String,
}

#[async_trait]
impl HubConnection for EchoConnection {
    fn base_url(&self) -> String {
        self.base_url.clone()
    }

    async fn start(&self) -> Result<()> {
        Ok(())
    }

    async fn stop(&self) -> Result<()> {
        Ok(())
    }

    async fn send(&self, _method: &str, _args: Vec<Value>) -> Result<()> {
        Ok(())
    }

    async fn invoke(&self, method: &str, _args: Vec<Value>) -> Result<Value> {
        Ok(Value::String(format!("{} -> {}", self.base_url, method)))
    }

    fn on(&self, _method: &str, _handler: EventCallback) -> HandlerId {
        HandlerId::new(0)
    }

    fn off(&self, _method: &str, _handler: HandlerId) {}

    fn on_close(&self, _callback: LifecycleCallback) {}

    fn on_reconnecting(&self, _callback: LifecycleCallback) {}

    fn on_reconnected(&self, _callback: LifecycleCallback) {}
}

struct EchoBuilder;

impl ConnectionBuilder for EchoBuilder {
    fn build(
        &self,
        url: &str,
        _options: &ConnectionOptions,
        _retry_policy: Arc<dyn RetryPolicy>,
        _log_level: LogLevel,
    ) -> Result<Arc<dyn HubConnection>> {
        Ok(Arc::new(EchoConnection {
            base_url: url.to_string(),
        }))
    }
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    println!("=== Shared Hub Demo ===\n");

    let config = HubConfiguration::new().with_base_url("https://markets.example.com");
    let registry = HubRegistry::new(HubFactory::new(config, Arc::new(EchoBuilder)));

    registry.bind("quotes", "quoteHub");
    registry.bind("trades", "tradeHub");

    // Resolving the same identifier twice yields the identical façade.
    let quotes = registry.resolve("quotes")?;
    let again = registry.resolve("quotes")?;
    println!("quotes resolved twice, same instance: {}", Arc::ptr_eq(&quotes, &again));

    // Different bindings get independent hubs with their own targets.
    let trades = registry.resolve("trades")?;
    println!("quotes target: {}", quotes.base_url());
    println!("trades target: {}\n", trades.base_url());

    quotes.connect();
    let answer: String = quotes.invoke.call("latestPrice", ("ACME",)).await?;
    println!("invoke answered by: {}\n", answer);

    // Releasing evicts the cached façade; the next resolve starts fresh.
    registry.release("quotes");
    let fresh = registry.resolve("quotes")?;
    println!("fresh instance after release: {}", !Arc::ptr_eq(&quotes, &fresh));

    Ok(())
}
