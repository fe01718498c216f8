//! Method negotiation for requests that failed primary routing.
//!
//! # Algorithm
//! ```text
//! for node in tree (pre-order, depth-first, document order):
//!     Composite → recurse before the next sibling
//!     Resource  → pick the first accepted flag in method-table order
//!               → build one probe carrying that verb (override fields stripped)
//!               → probe resolves to an accepted verb AND path matches
//!                   → MethodNotAllowed { every accepted verb }
//! no node matched → no decision (caller answers 404)
//! ```
//!
//! # Design Decisions
//! - One probe per route: the probe only locates the route serving the path,
//!   the error then lists all of that route's verbs
//! - First path match in document order wins; verbs of later routes are never merged
//! - Routes without actions are skipped
//! - The tree is never mutated; probes live for a single match attempt

use crate::error::MethodNotAllowed;
use crate::http::request::Request;
use crate::observability::metrics;
use crate::routing::method::MethodTable;
use crate::routing::probe::build_probe;
use crate::routing::route::ResourceRoute;
use crate::routing::router::{RouteList, RouteNode};

/// Discovers which verbs the route serving a request's path would accept.
#[derive(Debug, Clone, Default)]
pub struct MethodNegotiator {
    methods: MethodTable,
}

impl MethodNegotiator {
    pub fn new(methods: MethodTable) -> Self {
        Self { methods }
    }

    pub fn methods(&self) -> &MethodTable {
        &self.methods
    }

    /// Walk `tree` looking for a route whose path matches `request`.
    ///
    /// Returns `Ok(())` when no route would serve the path, and
    /// `Err(MethodNotAllowed)` naming the accepted verbs of the first route that would.
    pub fn negotiate(&self, tree: &RouteList, request: &Request) -> Result<(), MethodNotAllowed> {
        let result = self.check_available_methods(tree, request);
        match &result {
            Ok(()) => metrics::record_negotiation("no_decision"),
            Err(e) => {
                tracing::debug!(
                    path = %request.path(),
                    method = %request.method(),
                    allowed = %e.allow_header_value(),
                    "Method not allowed"
                );
                metrics::record_negotiation("method_not_allowed");
            }
        }
        result
    }

    fn check_available_methods(
        &self,
        tree: &RouteList,
        request: &Request,
    ) -> Result<(), MethodNotAllowed> {
        for node in tree {
            match node {
                RouteNode::Composite(list) => self.check_available_methods(list, request)?,
                RouteNode::Resource(route) => self.check_route(route, request)?,
            }
        }
        Ok(())
    }

    fn check_route(
        &self,
        route: &ResourceRoute,
        request: &Request,
    ) -> Result<(), MethodNotAllowed> {
        let Some((flag, _)) = self
            .methods
            .entries()
            .find(|(flag, _)| route.accepts_method(*flag))
        else {
            tracing::trace!(route = %route.name(), "Skipping route without actions");
            return Ok(());
        };

        // Candidate requests carry the canonical verb; table names are only reported.
        let probe = build_probe(request, flag.as_str(), route.overrides());
        tracing::trace!(route = %route.name(), probe_method = %flag, "Probing route");

        let allowed: Vec<String> = route
            .action_dictionary()
            .keys()
            .map(|flag| self.methods.name(*flag).unwrap_or(flag.as_str()).to_string())
            .collect();

        let serves_path = route
            .resolve_method(&probe)
            .is_some_and(|method| route.accepts_method(method))
            && route.matches(&probe);

        if serves_path {
            return Err(MethodNotAllowed::new(allowed));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::routing::matcher::PathPattern;
    use crate::routing::method::MethodFlag;
    use crate::routing::route::MethodOverride;

    fn resource(mask: &str, methods: &[MethodFlag]) -> ResourceRoute {
        methods.iter().fold(
            ResourceRoute::new(
                mask,
                PathPattern::parse(mask).unwrap(),
                Arc::new(MethodOverride::default()),
            ),
            |route, flag| route.with_action(*flag, flag.as_str()),
        )
    }

    fn req(method: &str, path: &str) -> Request {
        Request::new(method, &format!("http://example.com{}", path)).unwrap()
    }

    #[test]
    fn test_reports_all_accepted_methods() {
        let tree = RouteList::new("root").with(resource(
            "/items",
            &[MethodFlag::Head, MethodFlag::Post, MethodFlag::Get],
        ));

        let err = MethodNegotiator::default()
            .negotiate(&tree, &req("DELETE", "/items"))
            .unwrap_err();
        assert_eq!(err.allowed_methods(), ["GET", "POST", "HEAD"]);
    }

    #[test]
    fn test_no_decision_for_unknown_path() {
        let tree = RouteList::new("root").with(resource("/items", &[MethodFlag::Get]));
        assert!(MethodNegotiator::default()
            .negotiate(&tree, &req("GET", "/other"))
            .is_ok());
    }

    #[test]
    fn test_empty_tree() {
        assert!(MethodNegotiator::default()
            .negotiate(&RouteList::new("root"), &req("GET", "/"))
            .is_ok());
    }

    #[test]
    fn test_override_header_is_stripped_from_probe() {
        let tree = RouteList::new("root").with(resource("/items", &[MethodFlag::Put]));
        let request = req("POST", "/items")
            .with_header("X-HTTP-Method-Override", "DELETE")
            .unwrap();

        let err = MethodNegotiator::default()
            .negotiate(&tree, &request)
            .unwrap_err();
        assert_eq!(err.allowed_methods(), ["PUT"]);
    }

    #[test]
    fn test_custom_table_controls_order_and_names() {
        // A table without GET cannot pick GET as the representative verb,
        // so a GET-only route is never probed.
        let table = MethodTable::new([(MethodFlag::Post, "post"), (MethodFlag::Put, "put")]);
        let negotiator = MethodNegotiator::new(table);

        let get_only = RouteList::new("root").with(resource("/items", &[MethodFlag::Get]));
        assert!(negotiator.negotiate(&get_only, &req("DELETE", "/items")).is_ok());

        let mixed = RouteList::new("root")
            .with(resource("/items", &[MethodFlag::Get, MethodFlag::Put]));
        let err = negotiator.negotiate(&mixed, &req("DELETE", "/items")).unwrap_err();
        // Verbs missing from the table fall back to their canonical names.
        assert_eq!(err.allowed_methods(), ["GET", "put"]);
    }

    #[test]
    fn test_non_canonical_table_names() {
        let negotiator = MethodNegotiator::new(MethodTable::new([(MethodFlag::Get, "FETCH")]));
        let tree = RouteList::new("root").with(resource("/items", &[MethodFlag::Get]));

        let err = negotiator.negotiate(&tree, &req("DELETE", "/items")).unwrap_err();
        assert_eq!(err.allowed_methods(), ["FETCH"]);
        assert!(negotiator.negotiate(&tree, &req("DELETE", "/other")).is_ok());
    }
}
