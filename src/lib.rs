//! hublink - reactive hub bindings over an external connection library
//!
//! This is the main convenience crate that re-exports the hublink
//! sub-crates. Use it if you want a single dependency providing the whole
//! façade layer.
//!
//! # Architecture
//!
//! hublink is organized into modular crates:
//!
//! - **hublink-core**: naming/retry policies, configuration, error types
//!   and the traits an external connection library implements
//! - **hublink-client**: the lifecycle wrapper, call namespaces, status
//!   streams, factory and registry
//!
//! The split mirrors the boundary of the design: everything that moves
//! bytes lives on the far side of `hublink_core::HubConnection`; everything
//! callers program against lives in `hublink-client`.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use hublink::{HubConfiguration, HubFactory};
//! use hublink_core::ConnectionBuilder;
//! use serde::Deserialize;
//! use std::sync::Arc;
//!
//! #[derive(Deserialize)]
//! struct Ack { accepted: bool }
//!
//! # fn connection_builder() -> Arc<dyn ConnectionBuilder> { unimplemented!() }
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = HubConfiguration::new().with_base_url("https://example.com");
//!     let factory = HubFactory::new(config, connection_builder());
//!
//!     let hub = factory.create_hub("chat")?;
//!     hub.connect();
//!
//!     // Dispatches "PostMessage" once the connection is ready.
//!     let ack: Ack = hub.invoke.call("postMessage", ("hello",)).await?;
//!     println!("accepted: {}", ack.accepted);
//!
//!     let raw: serde_json::Value = hub.invoke.call("history", ()).await?;
//!     println!("{}", raw);
//!     Ok(())
//! }
//! ```
//!
//! # Shared Hubs
//!
//! ```rust,no_run
//! use hublink::{HubConfiguration, HubFactory, HubRegistry};
//! use hublink_core::ConnectionBuilder;
//! use std::sync::Arc;
//!
//! # fn connection_builder() -> Arc<dyn ConnectionBuilder> { unimplemented!() }
//! # fn example() -> hublink::Result<()> {
//! let config = HubConfiguration::new().with_base_url("https://example.com");
//! let registry = HubRegistry::new(HubFactory::new(config, connection_builder()));
//!
//! registry.bind("chat", "chatHub");
//!
//! // Both resolutions return the same façade instance.
//! let hub = registry.resolve("chat")?;
//! let same = registry.resolve("chat")?;
//! assert!(Arc::ptr_eq(&hub, &same));
//! # Ok(())
//! # }
//! ```

// Re-export the sub-crates under short module names
pub use hublink_client as client;
pub use hublink_core as core;

// Convenience re-exports of the most commonly used types
pub use hublink_client::{Hub, HubFactory, HubRegistry};
pub use hublink_core::{Error, HubConfiguration, Result};
