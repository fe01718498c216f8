//! Resource routes (leaf nodes of the route tree).
//!
//! # Responsibilities
//! - Own a path matcher and the verb -> action dictionary of one resource
//! - Resolve the effective method of a request, honouring method overrides
//! - Answer primary routing for a single endpoint
//!
//! # Design Decisions
//! - A route accepts a verb iff the verb is a key of its action dictionary
//! - Override header wins over the override query parameter
//! - Unsupported verbs resolve to `None` and never match

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use axum::http::HeaderName;

use crate::http::request::Request;
use crate::routing::matcher::{Matcher, Params};
use crate::routing::method::MethodFlag;

/// Default header clients use to declare an intended verb.
pub const HEADER_OVERRIDE: &str = "x-http-method-override";

/// Default query parameter clients use to declare an intended verb.
pub const PARAM_OVERRIDE: &str = "__method";

/// Opaque identifier of the action that serves a verb on a route.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActionId(String);

impl ActionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ActionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ActionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Names of the reserved method-override fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodOverride {
    pub header: HeaderName,
    pub query_param: String,
}

impl MethodOverride {
    pub fn new(header: HeaderName, query_param: impl Into<String>) -> Self {
        Self {
            header,
            query_param: query_param.into(),
        }
    }

    /// Intended verb declared by the client, if any.
    fn declared<'a>(&self, req: &'a Request) -> Option<&'a str> {
        req.headers()
            .get(&self.header)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.trim().is_empty())
            .or_else(|| {
                req.query_param(&self.query_param)
                    .filter(|v| !v.trim().is_empty())
            })
    }
}

impl Default for MethodOverride {
    fn default() -> Self {
        Self {
            header: HeaderName::from_static(HEADER_OVERRIDE),
            query_param: PARAM_OVERRIDE.to_string(),
        }
    }
}

/// Result of primary routing.
#[derive(Debug, Clone)]
pub struct RouteMatch<'a> {
    pub route: &'a ResourceRoute,
    pub action: &'a ActionId,
    pub method: MethodFlag,
    pub params: Params,
}

/// A single resource endpoint.
#[derive(Debug)]
pub struct ResourceRoute {
    name: String,
    matcher: Box<dyn Matcher>,
    actions: BTreeMap<MethodFlag, ActionId>,
    overrides: Arc<MethodOverride>,
}

impl ResourceRoute {
    pub fn new(
        name: impl Into<String>,
        matcher: impl Matcher + 'static,
        overrides: Arc<MethodOverride>,
    ) -> Self {
        Self {
            name: name.into(),
            matcher: Box::new(matcher),
            actions: BTreeMap::new(),
            overrides,
        }
    }

    /// Register the action serving `flag`. Re-registering a verb replaces its action.
    pub fn with_action(mut self, flag: MethodFlag, action: impl Into<ActionId>) -> Self {
        self.actions.insert(flag, action.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn overrides(&self) -> &MethodOverride {
        &self.overrides
    }

    pub fn accepts_method(&self, flag: MethodFlag) -> bool {
        self.actions.contains_key(&flag)
    }

    /// Every accepted verb and its action, in flag order.
    pub fn action_dictionary(&self) -> &BTreeMap<MethodFlag, ActionId> {
        &self.actions
    }

    /// Effective method of `req`: override header, then override parameter,
    /// then the transport method.
    pub fn resolve_method(&self, req: &Request) -> Option<MethodFlag> {
        self.overrides
            .declared(req)
            .unwrap_or(req.method())
            .parse()
            .ok()
    }

    /// Structural match only; the method is not considered.
    pub fn matches(&self, req: &Request) -> bool {
        self.matcher.matches(req)
    }

    pub fn match_request(&self, req: &Request) -> Option<RouteMatch<'_>> {
        let method = self.resolve_method(req)?;
        let action = self.actions.get(&method)?;
        let params = self.matcher.captures(req)?;
        Some(RouteMatch {
            route: self,
            action,
            method,
            params,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::matcher::PathPattern;

    fn items() -> ResourceRoute {
        ResourceRoute::new(
            "items",
            PathPattern::parse("/items/<id>").unwrap(),
            Arc::new(MethodOverride::default()),
        )
        .with_action(MethodFlag::Get, "Items:read")
        .with_action(MethodFlag::Put, "Items:update")
    }

    #[test]
    fn test_accepts_only_declared_methods() {
        let route = items();
        assert!(route.accepts_method(MethodFlag::Get));
        assert!(route.accepts_method(MethodFlag::Put));
        assert!(!route.accepts_method(MethodFlag::Delete));
        for flag in MethodFlag::ALL {
            assert_eq!(
                route.accepts_method(flag),
                route.action_dictionary().contains_key(&flag)
            );
        }
    }

    #[test]
    fn test_resolve_method_from_transport() {
        let route = items();
        let req = Request::new("delete", "http://example.com/items/1").unwrap();
        assert_eq!(route.resolve_method(&req), Some(MethodFlag::Delete));

        let req = Request::new("PATCH", "http://example.com/items/1").unwrap();
        assert_eq!(route.resolve_method(&req), None);
    }

    #[test]
    fn test_override_header_wins_over_param() {
        let route = items();
        let req = Request::new("POST", "http://example.com/items/1?__method=DELETE")
            .unwrap()
            .with_header("X-HTTP-Method-Override", "put")
            .unwrap();
        assert_eq!(route.resolve_method(&req), Some(MethodFlag::Put));

        let req = Request::new("POST", "http://example.com/items/1?__method=DELETE").unwrap();
        assert_eq!(route.resolve_method(&req), Some(MethodFlag::Delete));
    }

    #[test]
    fn test_custom_override_names() {
        let overrides = MethodOverride::new(HeaderName::from_static("x-verb"), "_verb");
        let route = ResourceRoute::new(
            "items",
            PathPattern::parse("/items").unwrap(),
            Arc::new(overrides),
        );
        let req = Request::new("POST", "http://example.com/items?_verb=PUT&__method=GET").unwrap();
        assert_eq!(route.resolve_method(&req), Some(MethodFlag::Put));
    }

    #[test]
    fn test_match_request() {
        let route = items();
        let req = Request::new("POST", "http://example.com/items/9?__method=PUT").unwrap();
        let matched = route.match_request(&req).unwrap();
        assert_eq!(matched.action.as_str(), "Items:update");
        assert_eq!(matched.method, MethodFlag::Put);
        assert_eq!(matched.params.get("id").map(String::as_str), Some("9"));

        let req = Request::new("DELETE", "http://example.com/items/9").unwrap();
        assert!(route.match_request(&req).is_none());
        assert!(route.matches(&req));
    }
}
