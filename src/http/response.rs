//! Response rendering for routed requests.
//!
//! # Responsibilities
//! - Describe a matched route as JSON
//! - Provide a response that writes nothing
//!
//! # Design Decisions
//! - Routing failures render themselves (`RoutingError: IntoResponse`)
//! - HEAD requests are answered with `NullResponse`

use std::collections::BTreeMap;

use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::routing::RouteMatch;

/// A response that sends nothing: no body, no headers of its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullResponse;

impl IntoResponse for NullResponse {
    fn into_response(self) -> Response {
        Response::default()
    }
}

/// JSON body describing the route and action selected for a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, serde::Deserialize)]
pub struct MatchSummary {
    pub route: String,
    pub action: String,
    pub method: String,
    pub params: BTreeMap<String, String>,
}

impl From<&RouteMatch<'_>> for MatchSummary {
    fn from(matched: &RouteMatch<'_>) -> Self {
        Self {
            route: matched.route.name().to_string(),
            action: matched.action.to_string(),
            method: matched.method.to_string(),
            params: matched.params.clone(),
        }
    }
}

impl IntoResponse for MatchSummary {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
