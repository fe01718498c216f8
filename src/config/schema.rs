//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the router.
//! All types derive Serde traits for deserialization from config files.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Root configuration for the resource router.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// Listener configuration (bind address, body limits).
    pub listener: ListenerConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Reserved method-override field names.
    pub overrides: OverrideConfig,

    /// Route tree, in declaration order.
    pub routes: Vec<RouteConfig>,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Maximum request body size in bytes.
    pub max_body_size: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            max_body_size: 2 * 1024 * 1024, // 2MB
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Names of the fields clients use to override the transport method.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OverrideConfig {
    /// Override header name.
    pub header: String,

    /// Override query parameter name.
    pub query_param: String,
}

impl Default for OverrideConfig {
    fn default() -> Self {
        Self {
            header: "X-HTTP-Method-Override".to_string(),
            query_param: "__method".to_string(),
        }
    }
}

/// A node of the route tree.
///
/// A node with `routes` is a group; a node with a `mask` is a resource.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct RouteConfig {
    /// Route identifier for logging.
    pub name: String,

    /// Path mask, e.g. `/items/<id>`.
    #[serde(default)]
    pub mask: Option<String>,

    /// Host header to match (exact match).
    #[serde(default)]
    pub host: Option<String>,

    /// Verb -> action identifier.
    #[serde(default)]
    pub actions: BTreeMap<String, String>,

    /// Nested nodes of a group.
    #[serde(default)]
    pub routes: Vec<RouteConfig>,
}

impl RouteConfig {
    pub fn is_group(&self) -> bool {
        !self.routes.is_empty()
    }
}
