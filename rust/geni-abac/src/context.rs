use std::{collections::BTreeMap, fmt::Debug, sync::Arc};

use crate::{Aggregate, Method};

/// Argument carrying the URN of the slice a call operates on.
pub const SLICE_URN_ARGUMENT: &str = "slice_urn";

/// Argument carrying the request RSpec.
pub const RSPEC_ARGUMENT: &str = "rspec";

/// Everything known about one inbound call, built once by the dispatch layer
/// and read-only thereafter.
#[derive(Clone)]
pub struct CallContext {
    method: Method,
    caller: String,
    credentials: Vec<String>,
    arguments: BTreeMap<String, String>,
    options: BTreeMap<String, serde_json::Value>,
    aggregate: Arc<dyn Aggregate>,
}

impl CallContext {
    /// Start building the context of a call to `method` made by `caller`
    /// against `aggregate`.
    pub fn builder(
        method: Method,
        caller: impl Into<String>,
        aggregate: Arc<dyn Aggregate>,
    ) -> CallContextBuilder {
        CallContextBuilder(CallContext {
            method,
            caller: caller.into(),
            credentials: Vec::new(),
            arguments: BTreeMap::new(),
            options: BTreeMap::new(),
            aggregate,
        })
    }

    pub fn method(&self) -> Method {
        self.method
    }

    /// The caller identity as presented by the transport.
    pub fn caller(&self) -> &str {
        &self.caller
    }

    /// Credentials in the order they were presented.
    pub fn credentials(&self) -> &[String] {
        &self.credentials
    }

    pub fn argument(&self, name: &str) -> Option<&str> {
        self.arguments.get(name).map(String::as_str)
    }

    pub fn arguments(&self) -> &BTreeMap<String, String> {
        &self.arguments
    }

    pub fn options(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.options
    }

    pub fn aggregate(&self) -> &dyn Aggregate {
        self.aggregate.as_ref()
    }
}

impl Debug for CallContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallContext")
            .field("method", &self.method)
            .field("caller", &self.caller)
            .field("credentials", &self.credentials.len())
            .field("arguments", &self.arguments.keys().collect::<Vec<_>>())
            .field("options", &self.options)
            .field("aggregate", &self.aggregate.own_urn().to_string())
            .finish()
    }
}

/// Builder for [`CallContext`].
pub struct CallContextBuilder(CallContext);

impl CallContextBuilder {
    /// Append a presented credential.
    pub fn credential(mut self, credential: impl Into<String>) -> Self {
        self.0.credentials.push(credential.into());
        self
    }

    /// Append several presented credentials, keeping their order.
    pub fn credentials<I>(mut self, credentials: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.0
            .credentials
            .extend(credentials.into_iter().map(Into::into));
        self
    }

    /// Set a call argument, replacing any previous value.
    pub fn argument(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.arguments.insert(name.into(), value.into());
        self
    }

    /// Set a call option, replacing any previous value.
    pub fn option(mut self, name: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.0.options.insert(name.into(), value.into());
        self
    }

    pub fn build(self) -> CallContext {
        self.0
    }
}

/// How an authorized call ended, handed to result hooks.
#[derive(Debug, Clone, PartialEq)]
pub enum CallOutcome {
    /// The method returned this value.
    Success(serde_json::Value),
    /// The method failed with this message.
    Failure(String),
}
