//! Route tree and primary route lookup.
//!
//! # Responsibilities
//! - Store resource routes and nested groups in declaration order
//! - Look up the route serving a request
//! - Build the tree from configuration
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Nodes are an explicit enum; children are owned by value
//! - Depth-first, first match wins (document order)
//! - Explicit NoMatch (`None`) rather than silent default

use std::sync::Arc;

use axum::http::HeaderName;

use crate::config::schema::{OverrideConfig, RouteConfig, RouterConfig};
use crate::config::validation::ValidationError;
use crate::http::request::Request;
use crate::routing::matcher::{AndMatcher, HostMatcher, Matcher, PathPattern};
use crate::routing::method::MethodFlag;
use crate::routing::route::{MethodOverride, ResourceRoute, RouteMatch};

/// A node of the route tree.
#[derive(Debug)]
pub enum RouteNode {
    Composite(RouteList),
    Resource(ResourceRoute),
}

impl From<RouteList> for RouteNode {
    fn from(list: RouteList) -> Self {
        RouteNode::Composite(list)
    }
}

impl From<ResourceRoute> for RouteNode {
    fn from(route: ResourceRoute) -> Self {
        RouteNode::Resource(route)
    }
}

/// An ordered group of route nodes.
#[derive(Debug, Default)]
pub struct RouteList {
    name: String,
    children: Vec<RouteNode>,
}

impl RouteList {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn push(&mut self, node: impl Into<RouteNode>) {
        self.children.push(node.into());
    }

    /// Builder form of [`push`](Self::push).
    pub fn with(mut self, node: impl Into<RouteNode>) -> Self {
        self.push(node);
        self
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RouteNode> {
        self.children.iter()
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Find the first resource, in document order, that serves `req`.
    pub fn match_request(&self, req: &Request) -> Option<RouteMatch<'_>> {
        self.iter().find_map(|node| match node {
            RouteNode::Composite(list) => list.match_request(req),
            RouteNode::Resource(route) => route.match_request(req),
        })
    }

    /// Build the route tree described by a validated configuration.
    pub fn from_config(config: &RouterConfig) -> Result<Self, ValidationError> {
        let overrides = Arc::new(build_overrides(&config.overrides)?);
        let mut root = RouteList::new("root");
        for route in &config.routes {
            root.push(build_node(route, &overrides)?);
        }

        tracing::debug!(routes = root.len(), "Route tree built");
        Ok(root)
    }
}

impl<'a> IntoIterator for &'a RouteList {
    type Item = &'a RouteNode;
    type IntoIter = std::slice::Iter<'a, RouteNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn build_overrides(config: &OverrideConfig) -> Result<MethodOverride, ValidationError> {
    if config.query_param.is_empty() {
        return Err(ValidationError::EmptyOverrideParam);
    }
    let header = HeaderName::from_bytes(config.header.as_bytes())
        .map_err(|_| ValidationError::InvalidOverrideHeader(config.header.clone()))?;
    Ok(MethodOverride::new(header, config.query_param.clone()))
}

fn build_node(
    config: &RouteConfig,
    overrides: &Arc<MethodOverride>,
) -> Result<RouteNode, ValidationError> {
    let mask = match (&config.mask, config.is_group()) {
        (None, true) if config.host.is_none() && config.actions.is_empty() => {
            let mut list = RouteList::new(config.name.clone());
            for child in &config.routes {
                list.push(build_node(child, overrides)?);
            }
            return Ok(list.into());
        }
        (Some(mask), false) => mask,
        _ => return Err(ValidationError::RouteShape(config.name.clone())),
    };

    let pattern = PathPattern::parse(mask).map_err(|source| ValidationError::InvalidMask {
        route: config.name.clone(),
        source,
    })?;
    let mut route = match &config.host {
        Some(host) => {
            let matchers: Vec<Box<dyn Matcher>> =
                vec![Box::new(HostMatcher::new(host.clone())), Box::new(pattern)];
            ResourceRoute::new(config.name.clone(), AndMatcher::new(matchers), overrides.clone())
        }
        None => ResourceRoute::new(config.name.clone(), pattern, overrides.clone()),
    };

    for (method, action) in &config.actions {
        let flag: MethodFlag = method.parse().map_err(|_| ValidationError::UnknownMethod {
            route: config.name.clone(),
            method: method.clone(),
        })?;
        route = route.with_action(flag, action.clone());
    }

    if route.action_dictionary().is_empty() {
        tracing::warn!(route = %config.name, "Resource route declares no actions");
    }

    Ok(route.into())
}
