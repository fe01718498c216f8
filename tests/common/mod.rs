//! Shared builders for integration tests.

use std::sync::Arc;

use resource_router::routing::matcher::PathPattern;
use resource_router::routing::{MethodFlag, MethodOverride, ResourceRoute};
use resource_router::Request;

/// A resource at `mask` whose actions are named after the route and verb.
pub fn resource(name: &str, mask: &str, methods: &[MethodFlag]) -> ResourceRoute {
    methods.iter().fold(
        ResourceRoute::new(
            name,
            PathPattern::parse(mask).expect("valid mask"),
            Arc::new(MethodOverride::default()),
        ),
        |route, flag| route.with_action(*flag, format!("{}:{}", name, flag)),
    )
}

/// A request against `http://example.com` + `path_and_query`.
pub fn request(method: &str, path_and_query: &str) -> Request {
    Request::new(method, &format!("http://example.com{}", path_and_query)).expect("valid url")
}
