//! Error types for hublink
//!
//! The façade layer performs no recovery of its own: underlying connection
//! errors are passed through untransformed, and the variants here only sort
//! them into the places callers observe them.
//!
//! # Error Categories
//!
//! - **Construction errors**: `InvalidConfiguration`, surfaced synchronously
//!   from factory calls
//! - **Transport errors**: `Transport`, raised by the external connection
//! - **Lifecycle errors**: `ConnectionClosed`, returned to calls gated on a
//!   connection that closed before becoming ready
//! - **Invocation errors**: `Remote`, a failure reported by the remote hub
//! - **Processing errors**: `Serialization`
//! - **Registry errors**: `UnboundHub`

use thiserror::Error;

/// Result type for hublink operations
///
/// Convenience alias used throughout the hublink crates.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type shared by the hublink crates
///
/// The enum is `Clone` so a single failure can be fanned out to every
/// caller waiting on the same connection.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Invalid configuration handed to a factory
    ///
    /// Covers malformed base URLs and transport construction failures, both
    /// of which surface synchronously from hub creation rather than at
    /// connect time.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Error raised by the underlying connection
    ///
    /// Transport-level failures from the external connection library,
    /// passed through without transformation.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The connection closed before or while the call was waiting
    ///
    /// Returned to gated calls when the hub is disconnected before its
    /// first successful start, and to any call issued after the lifecycle
    /// became terminal.
    #[error("Connection closed")]
    ConnectionClosed,

    /// The remote hub reported an invocation failure
    #[error("Remote error: {0}")]
    Remote(String),

    /// Argument or result conversion failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The registry has no binding for the requested identifier
    #[error("No hub bound for identifier: {0}")]
    UnboundHub(String),
}
