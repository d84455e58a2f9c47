//! The hub façade and its call namespaces
//!
//! A [`Hub`] bundles the lifecycle wrapper with three namespaces that take
//! method names as strings, open-ended and unknown at compile time:
//!
//! - `hub.send` — fire-and-forget commands
//! - `hub.invoke` — request/response commands
//! - `hub.listen` — server-to-client event streams
//!
//! Each namespace runs the logical method name through the configured
//! naming policy before delegating to the wrapper, and forwards arguments
//! unchanged. Arguments are plain serde values: pass a tuple of
//! serializable values (arity 0 to 8), a prebuilt `Vec<Value>`, or `()`
//! for no arguments.
//!
//! # Example
//!
//! ```rust,no_run
//! # async fn example(hub: hublink_client::Hub) -> hublink_core::Result<()> {
//! hub.connect();
//!
//! let total: i64 = hub.invoke.call("addNumbers", (2, 40)).await?;
//! println!("2 + 40 = {}", total);
//! hub.send.call("notify", ("done",)).await?;
//!
//! let mut events = hub.listen.stream::<String>("statusChanged");
//! while let Some(event) = events.recv().await {
//!     println!("status: {}", event?);
//! }
//! # Ok(())
//! # }
//! ```

use crate::hub::HubBase;
use crate::relay::StatusStream;
use crate::stream::{EventStream, TypedEventStream};
use hublink_core::{Error, HubConnection, MethodNamingPolicy, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Argument lists accepted by the call namespaces
///
/// Implemented for tuples of serializable values up to arity 8, for `()`
/// (no arguments) and for a prebuilt `Vec<Value>`.
pub trait InvocationArgs {
    /// Convert into the positional argument list sent to the hub
    fn into_args(self) -> Result<Vec<Value>>;
}

impl InvocationArgs for Vec<Value> {
    fn into_args(self) -> Result<Vec<Value>> {
        Ok(self)
    }
}

impl InvocationArgs for () {
    fn into_args(self) -> Result<Vec<Value>> {
        Ok(Vec::new())
    }
}

macro_rules! impl_invocation_args {
    ($($name:ident => $index:tt),+) => {
        impl<$($name: Serialize),+> InvocationArgs for ($($name,)+) {
            fn into_args(self) -> Result<Vec<Value>> {
                Ok(vec![$(
                    serde_json::to_value(&self.$index)
                        .map_err(|e| Error::Serialization(e.to_string()))?
                ),+])
            }
        }
    };
}

impl_invocation_args!(A0 => 0);
impl_invocation_args!(A0 => 0, A1 => 1);
impl_invocation_args!(A0 => 0, A1 => 1, A2 => 2);
impl_invocation_args!(A0 => 0, A1 => 1, A2 => 2, A3 => 3);
impl_invocation_args!(A0 => 0, A1 => 1, A2 => 2, A3 => 3, A4 => 4);
impl_invocation_args!(A0 => 0, A1 => 1, A2 => 2, A3 => 3, A4 => 4, A5 => 5);
impl_invocation_args!(A0 => 0, A1 => 1, A2 => 2, A3 => 3, A4 => 4, A5 => 5, A6 => 6);
impl_invocation_args!(A0 => 0, A1 => 1, A2 => 2, A3 => 3, A4 => 4, A5 => 5, A6 => 6, A7 => 7);

/// Fire-and-forget command namespace
#[derive(Clone)]
pub struct SendProxy {
    base: Arc<HubBase>,
    naming: Arc<dyn MethodNamingPolicy>,
}

impl SendProxy {
    /// Send `method` with `args`, waiting only for local delivery
    pub async fn call<A: InvocationArgs>(&self, method: &str, args: A) -> Result<()> {
        let wire = self.naming.transform(method);
        self.base.send_core(&wire, args.into_args()?).await
    }
}

/// Request/response command namespace
#[derive(Clone)]
pub struct InvokeProxy {
    base: Arc<HubBase>,
    naming: Arc<dyn MethodNamingPolicy>,
}

impl InvokeProxy {
    /// Invoke `method` with `args` and decode the remote result
    pub async fn call<A, T>(&self, method: &str, args: A) -> Result<T>
    where
        A: InvocationArgs,
        T: DeserializeOwned,
    {
        let wire = self.naming.transform(method);
        let result = self.base.invoke_core(&wire, args.into_args()?).await?;
        serde_json::from_value(result).map_err(|e| Error::Serialization(e.to_string()))
    }
}

/// Server-to-client event namespace
#[derive(Clone)]
pub struct ListenProxy {
    base: Arc<HubBase>,
    naming: Arc<dyn MethodNamingPolicy>,
}

impl ListenProxy {
    /// Subscribe to `method`, decoding each event as `T`
    pub fn stream<T: DeserializeOwned>(&self, method: &str) -> TypedEventStream<T> {
        TypedEventStream::new(self.raw(method))
    }

    /// Subscribe to `method` without decoding
    pub fn raw(&self, method: &str) -> EventStream {
        self.base.listen_core(&self.naming.transform(method))
    }
}

/// The façade handed to callers: lifecycle controls plus call namespaces
///
/// One façade owns one connection; façades created separately never share
/// one, even for the same hub name.
pub struct Hub {
    base: Arc<HubBase>,
    /// Fire-and-forget commands
    pub send: SendProxy,
    /// Request/response commands
    pub invoke: InvokeProxy,
    /// Server-to-client events
    pub listen: ListenProxy,
}

impl Hub {
    pub(crate) fn new(
        connection: Arc<dyn HubConnection>,
        naming: Arc<dyn MethodNamingPolicy>,
    ) -> Self {
        let base = HubBase::new(connection);
        Self {
            send: SendProxy {
                base: Arc::clone(&base),
                naming: Arc::clone(&naming),
            },
            invoke: InvokeProxy {
                base: Arc::clone(&base),
                naming: Arc::clone(&naming),
            },
            listen: ListenProxy {
                base: Arc::clone(&base),
                naming,
            },
            base,
        }
    }

    /// Begin establishing the connection; see [`HubBase::connect`]
    pub fn connect(&self) {
        self.base.connect();
    }

    /// Begin a graceful shutdown; see [`HubBase::disconnect`]
    pub fn disconnect(&self) {
        self.base.disconnect();
    }

    /// Whether the first successful start has completed
    pub fn is_ready(&self) -> bool {
        self.base.is_ready()
    }

    /// The URL the underlying connection targets
    pub fn base_url(&self) -> String {
        self.base.base_url()
    }

    /// Stream of close notifications
    pub fn closed(&self) -> StatusStream<Option<String>> {
        self.base.closed()
    }

    /// Stream of reconnecting notifications
    pub fn reconnecting(&self) -> StatusStream<Option<String>> {
        self.base.reconnecting()
    }

    /// Stream of reconnected notifications
    pub fn reconnected(&self) -> StatusStream<Option<String>> {
        self.base.reconnected()
    }

    /// The lifecycle wrapper, for callers that work with wire names directly
    pub fn base(&self) -> &Arc<HubBase> {
        &self.base
    }
}
