//! Core policies, configuration and the connection contract for hublink
//!
//! This crate provides the foundation for the hublink façade layer:
//!
//! - **Naming**: policies that translate logical method names to wire names
//! - **Retry**: policies that pace the underlying connection's reconnect attempts
//! - **Configuration**: the hub configuration surface with its defaults
//! - **Connection contract**: the traits an external hub connection library
//!   implements to plug into the façade
//! - **Error handling**: the error taxonomy shared by all hublink crates
//!
//! # Overview
//!
//! hublink itself owns no transport and no wire protocol. Everything that
//! actually moves bytes lives behind the [`HubConnection`] trait, and
//! connections are manufactured through a [`ConnectionBuilder`]. This crate
//! defines those seams along with the pure policy types that parameterize
//! them; the `hublink-client` crate builds the lifecycle wrapper, call
//! namespaces and registry on top.
//!
//! # Example
//!
//! ```rust
//! use hublink_core::{CapitalizeFirst, DelayTable, MethodNamingPolicy, RetryPolicy};
//!
//! let naming = CapitalizeFirst;
//! assert_eq!(naming.transform("myMethod"), "MyMethod");
//!
//! let retry = DelayTable::default();
//! assert!(retry.next_delay(0).is_some());
//! assert!(retry.next_delay(4).is_none());
//! ```

pub mod config;
pub mod connection;
pub mod error;
pub mod naming;
pub mod retry;

// Re-export the most commonly used types for convenience
pub use config::{ConnectionOptions, HubConfiguration, LogLevel, TransportKind};
pub use connection::{
    ConnectionBuilder, EventCallback, HandlerId, HubConnection, LifecycleCallback,
};
pub use error::{Error, Result};
pub use naming::{CapitalizeFirst, MethodNamingPolicy};
pub use retry::{DelayTable, ExponentialBackoff, NoRetry, RetryPolicy};
