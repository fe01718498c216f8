//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (url, query, headers, method)
//!     → router.rs (route lookup, depth-first)
//!     → route.rs (resolve method incl. overrides, evaluate matcher)
//!     → Return: RouteMatch or NoMatch
//!
//! On NoMatch:
//!     → negotiator.rs (walk tree, probe each resource once)
//!     → probe.rs (copy request, strip override fields, set candidate verb)
//!     → Return: MethodNotAllowed(allowed verbs) or no decision (404)
//!
//! Route Compilation (at startup):
//!     RouteConfig[]
//!     → Compile matchers (masks, hosts)
//!     → Freeze as immutable RouteList
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex in hot path (segment matching only)
//! - Deterministic: same input always matches same route
//! - First match wins (document order)

pub mod dispatcher;
pub mod matcher;
pub mod method;
pub mod negotiator;
pub mod probe;
pub mod route;
pub mod router;

pub use dispatcher::Dispatcher;
pub use method::{MethodFlag, MethodTable};
pub use negotiator::MethodNegotiator;
pub use route::{ActionId, MethodOverride, ResourceRoute, RouteMatch};
pub use router::{RouteList, RouteNode};
