//! Hub factory
//!
//! Builds a connection for `{base_url}/{hub_name}` through the configured
//! [`ConnectionBuilder`] and wraps it into a [`Hub`] façade. Connections
//! between hubs of the same name are **not shared**: every `create_hub`
//! call yields an independent connection.

use crate::proxy::Hub;
use hublink_core::{ConnectionBuilder, HubConfiguration, Result};
use std::sync::Arc;

/// Creates hub façades from a fixed configuration
pub struct HubFactory {
    config: HubConfiguration,
    builder: Arc<dyn ConnectionBuilder>,
}

impl HubFactory {
    /// Create a factory from a configuration and a connection builder
    ///
    /// The configuration's defaults stand in for anything the caller did
    /// not override.
    pub fn new(config: HubConfiguration, builder: Arc<dyn ConnectionBuilder>) -> Self {
        Self { config, builder }
    }

    /// Create a façade for the hub at `{base_url}/{hub_name}`
    ///
    /// Construction failures from the connection builder (malformed URL,
    /// unsupported transport) are returned synchronously; nothing is
    /// deferred to connect time.
    pub fn create_hub(&self, hub_name: &str) -> Result<Hub> {
        let url = format!("{}/{}", self.config.base_url, hub_name);
        tracing::debug!(%url, "building hub connection");

        let connection = self.builder.build(
            &url,
            &self.config.connection_options,
            Arc::clone(&self.config.retry_policy),
            self.config.log_level,
        )?;

        Ok(Hub::new(connection, Arc::clone(&self.config.naming_policy)))
    }

    /// The configuration this factory was created with
    pub fn config(&self) -> &HubConfiguration {
        &self.config
    }
}
