//! Hub configuration surface
//!
//! [`HubConfiguration`] collects everything a factory needs to manufacture
//! hubs: the base URL, logging verbosity, retry policy, transport options
//! and the method naming policy. Every field has a default, so a
//! configuration can start from `HubConfiguration::default()` and override
//! only what differs. Once handed to a factory the configuration is not
//! mutated again.
//!
//! [`ConnectionOptions`] is deliberately opaque to this layer: it is passed
//! to the external connection builder untouched.

use crate::naming::{CapitalizeFirst, MethodNamingPolicy};
use crate::retry::{DelayTable, RetryPolicy};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Logging verbosity forwarded to the external connection builder
///
/// Levels are ordered from most to least verbose; `None` disables logging.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum LogLevel {
    Trace,
    Debug,
    Information,
    Warning,
    Error,
    Critical,
    #[default]
    None,
}

/// Transport preference for the underlying connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransportKind {
    WebSockets,
    ServerSentEvents,
    LongPolling,
}

/// Opaque transport options handed to the connection builder
///
/// hublink never interprets these; they parameterize whatever connection
/// library sits behind the [`ConnectionBuilder`](crate::ConnectionBuilder).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConnectionOptions {
    /// Preferred transport, or `None` to let the connection negotiate
    pub transport: Option<TransportKind>,
    /// Skip the negotiation step and connect directly
    pub skip_negotiation: bool,
    /// Extra headers sent with the connection handshake
    pub headers: HashMap<String, String>,
    /// Bearer token attached to outgoing requests
    pub access_token: Option<String>,
}

impl ConnectionOptions {
    /// Set the preferred transport
    pub fn with_transport(mut self, transport: TransportKind) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Skip the negotiation step
    pub fn with_skip_negotiation(mut self) -> Self {
        self.skip_negotiation = true;
        self
    }

    /// Add a handshake header
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Set the bearer token
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }
}

/// Configuration for a hub factory
///
/// Defaults: empty base URL, silent logging, the standard delay table
/// (`0ms, 2s, 10s, 30s, stop`), empty connection options and the
/// capitalize-first naming policy.
#[derive(Clone)]
pub struct HubConfiguration {
    /// Base URL the hub name is appended to
    pub base_url: String,
    /// Logging verbosity for the underlying connection
    pub log_level: LogLevel,
    /// Reconnect pacing policy for the underlying connection
    pub retry_policy: Arc<dyn RetryPolicy>,
    /// Transport options for the underlying connection
    pub connection_options: ConnectionOptions,
    /// Logical-to-wire method name translation
    pub naming_policy: Arc<dyn MethodNamingPolicy>,
}

impl Default for HubConfiguration {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            log_level: LogLevel::None,
            retry_policy: Arc::new(DelayTable::default()),
            connection_options: ConnectionOptions::default(),
            naming_policy: Arc::new(CapitalizeFirst),
        }
    }
}

impl HubConfiguration {
    /// Create a configuration with every option at its default
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the logging verbosity
    pub fn with_log_level(mut self, log_level: LogLevel) -> Self {
        self.log_level = log_level;
        self
    }

    /// Set a custom retry policy
    pub fn with_retry_policy(mut self, policy: Arc<dyn RetryPolicy>) -> Self {
        self.retry_policy = policy;
        self
    }

    /// Set the retry policy from a plain sequence of delays
    ///
    /// The trailing stop entry is implied, as with [`DelayTable`].
    pub fn with_retry_delays(mut self, delays: Vec<Duration>) -> Self {
        self.retry_policy = Arc::new(DelayTable::from(delays));
        self
    }

    /// Set the transport options
    pub fn with_connection_options(mut self, options: ConnectionOptions) -> Self {
        self.connection_options = options;
        self
    }

    /// Set a custom naming policy
    pub fn with_naming_policy(mut self, policy: Arc<dyn MethodNamingPolicy>) -> Self {
        self.naming_policy = policy;
        self
    }
}

impl fmt::Debug for HubConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HubConfiguration")
            .field("base_url", &self.base_url)
            .field("log_level", &self.log_level)
            .field("connection_options", &self.connection_options)
            .finish_non_exhaustive()
    }
}
