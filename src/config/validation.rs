//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check route tree shape (groups vs. resources)
//! - Validate masks, verbs, override field names and bind address
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system
//! - Resources without actions are accepted; negotiation skips them

use std::net::SocketAddr;

use axum::http::HeaderName;
use thiserror::Error;

use crate::config::schema::{RouteConfig, RouterConfig};
use crate::routing::matcher::{PathPattern, PatternError};
use crate::routing::method::MethodFlag;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid bind address: {0}")]
    InvalidBindAddress(String),

    #[error("invalid override header name: {0}")]
    InvalidOverrideHeader(String),

    #[error("override query parameter must not be empty")]
    EmptyOverrideParam,

    #[error("route '{0}' must declare either a mask or nested routes")]
    RouteShape(String),

    #[error("route '{route}': {source}")]
    InvalidMask {
        route: String,
        #[source]
        source: PatternError,
    },

    #[error("route '{route}': unsupported method {method}")]
    UnknownMethod { route: String, method: String },
}

/// Validate the whole configuration, collecting every error.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if HeaderName::from_bytes(config.overrides.header.as_bytes()).is_err() {
        errors.push(ValidationError::InvalidOverrideHeader(
            config.overrides.header.clone(),
        ));
    }

    if config.overrides.query_param.is_empty() {
        errors.push(ValidationError::EmptyOverrideParam);
    }

    for route in &config.routes {
        validate_route(route, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_route(route: &RouteConfig, errors: &mut Vec<ValidationError>) {
    match (&route.mask, route.is_group()) {
        (Some(mask), false) => {
            if let Err(source) = PathPattern::parse(mask) {
                errors.push(ValidationError::InvalidMask {
                    route: route.name.clone(),
                    source,
                });
            }
            for method in route.actions.keys() {
                if method.parse::<MethodFlag>().is_err() {
                    errors.push(ValidationError::UnknownMethod {
                        route: route.name.clone(),
                        method: method.clone(),
                    });
                }
            }
        }
        (None, true) if route.actions.is_empty() && route.host.is_none() => {
            for child in &route.routes {
                validate_route(child, errors);
            }
        }
        _ => errors.push(ValidationError::RouteShape(route.name.clone())),
    }
}
