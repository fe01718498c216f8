//! Request dispatch: primary routing with method negotiation as fallback.

use std::sync::Arc;

use crate::error::RoutingError;
use crate::http::request::Request;
use crate::routing::negotiator::MethodNegotiator;
use crate::routing::route::RouteMatch;
use crate::routing::router::RouteList;

/// Resolves requests against a shared, immutable route tree.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    tree: Arc<RouteList>,
    negotiator: MethodNegotiator,
}

impl Dispatcher {
    pub fn new(tree: Arc<RouteList>, negotiator: MethodNegotiator) -> Self {
        Self { tree, negotiator }
    }

    pub fn tree(&self) -> &RouteList {
        &self.tree
    }

    /// Route `request`, distinguishing "wrong method" from "no such path".
    pub fn dispatch(&self, request: &Request) -> Result<RouteMatch<'_>, RoutingError> {
        if let Some(matched) = self.tree.match_request(request) {
            return Ok(matched);
        }

        self.negotiator.negotiate(&self.tree, request)?;

        Err(RoutingError::NotFound {
            path: request.path().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::matcher::PathPattern;
    use crate::routing::method::MethodFlag;
    use crate::routing::route::{MethodOverride, ResourceRoute};

    fn dispatcher() -> Dispatcher {
        let items = ResourceRoute::new(
            "items",
            PathPattern::parse("/items").unwrap(),
            Arc::new(MethodOverride::default()),
        )
        .with_action(MethodFlag::Get, "Items:list")
        .with_action(MethodFlag::Post, "Items:create");

        Dispatcher::new(
            Arc::new(RouteList::new("root").with(items)),
            MethodNegotiator::default(),
        )
    }

    fn req(method: &str, url: &str) -> Request {
        Request::new(method, url).unwrap()
    }

    #[test]
    fn test_matched() {
        let dispatcher = dispatcher();
        let request = req("POST", "http://example.com/items");
        let matched = dispatcher.dispatch(&request).unwrap();
        assert_eq!(matched.action.as_str(), "Items:create");
    }

    #[test]
    fn test_override_reaches_primary_routing() {
        let dispatcher = dispatcher();
        let request = req("DELETE", "http://example.com/items?__method=GET");
        let matched = dispatcher.dispatch(&request).unwrap();
        assert_eq!(matched.method, MethodFlag::Get);
    }

    #[test]
    fn test_method_not_allowed() {
        let dispatcher = dispatcher();
        let err = dispatcher
            .dispatch(&req("PUT", "http://example.com/items"))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Method not supported. Available methods: GET, POST"
        );
    }

    #[test]
    fn test_not_found() {
        let dispatcher = dispatcher();
        let err = dispatcher
            .dispatch(&req("GET", "http://example.com/missing"))
            .unwrap_err();
        assert_eq!(
            err,
            RoutingError::NotFound {
                path: "/missing".into()
            }
        );
    }
}
