//! Reactive façade over an externally supplied hub connection
//!
//! This crate turns a raw hub connection into an ergonomic, stream-based
//! hub object. It owns none of the networking: the connection arrives
//! through the traits in `hublink-core`, and this crate adds the behavior
//! callers actually program against.
//!
//! # Core Features
//!
//! - **Readiness gating**: send/invoke calls issued before the connection's
//!   first successful start wait for it; nothing reaches the wire early
//! - **Call namespaces**: `send`, `invoke` and `listen` take method names
//!   as strings, translated by the configured naming policy
//! - **Status streams**: close, reconnecting and reconnected notifications
//!   as multicast streams with replay for late subscribers
//! - **Factory and registry**: per-call independent hubs, or one shared
//!   façade per logical binding
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use hublink_client::HubFactory;
//! use hublink_core::{ConnectionBuilder, HubConfiguration};
//! use std::sync::Arc;
//!
//! # async fn example(connection_builder: Arc<dyn ConnectionBuilder>) -> hublink_core::Result<()> {
//! let config = HubConfiguration::new().with_base_url("https://example.com");
//! let factory = HubFactory::new(config, connection_builder);
//!
//! let hub = factory.create_hub("chat")?;
//! hub.connect();
//!
//! // Waits for the connection to become ready, then dispatches "SendMessage".
//! hub.send.call("sendMessage", ("hello",)).await?;
//!
//! let mut closed = hub.closed();
//! tokio::spawn(async move {
//!     if let Some(error) = closed.recv().await {
//!         eprintln!("connection closed: {:?}", error);
//!     }
//! });
//! # Ok(())
//! # }
//! ```

mod factory;
mod hub;
mod proxy;
mod registry;
mod relay;
mod stream;

pub use factory::HubFactory;
pub use hub::HubBase;
pub use proxy::{Hub, InvocationArgs, InvokeProxy, ListenProxy, SendProxy};
pub use registry::HubRegistry;
pub use relay::StatusStream;
pub use stream::{EventStream, TypedEventStream};
