use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::{json, Value};

use resource_router::config::{load_config, RouterConfig};
use resource_router::http::{MatchSummary, Request};
use resource_router::routing::{Dispatcher, MethodNegotiator, RouteList, RouteNode};
use resource_router::RoutingError;

#[derive(Parser)]
#[command(name = "router-cli")]
#[command(about = "Inspect a route configuration offline", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Route a request and print the decision
    Check {
        /// Transport method, e.g. DELETE
        method: String,
        /// Absolute request URL
        url: String,
        /// Request header as `Name: value` (repeatable)
        #[arg(short = 'H', long = "header")]
        headers: Vec<String>,
        /// Form field as `key=value` (repeatable)
        #[arg(short = 'd', long = "data")]
        data: Vec<String>,
    },
    /// Print the route tree
    Routes,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RouterConfig::default(),
    };
    let tree = RouteList::from_config(&config)?;

    let output = match cli.command {
        Commands::Check {
            method,
            url,
            headers,
            data,
        } => {
            let mut request = Request::new(method, &url)?;
            for header in &headers {
                let (name, value) = header
                    .split_once(':')
                    .ok_or_else(|| format!("header must be `Name: value`: {}", header))?;
                request = request.with_header(name.trim(), value.trim())?;
            }
            for field in &data {
                let (key, value) = field
                    .split_once('=')
                    .ok_or_else(|| format!("data must be `key=value`: {}", field))?;
                request = request.with_post(key, value);
            }

            let dispatcher = Dispatcher::new(tree.into(), MethodNegotiator::default());
            decision(&dispatcher, &request)
        }
        Commands::Routes => Value::Array(tree.iter().map(describe).collect()),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn decision(dispatcher: &Dispatcher, request: &Request) -> Value {
    match dispatcher.dispatch(request) {
        Ok(matched) => json!({
            "outcome": "matched",
            "status": 200,
            "match": MatchSummary::from(&matched),
        }),
        Err(RoutingError::MethodNotAllowed(e)) => json!({
            "outcome": "method_not_allowed",
            "status": e.status().as_u16(),
            "allowed_methods": e.allowed_methods(),
            "message": e.to_string(),
        }),
        Err(e @ RoutingError::NotFound { .. }) => json!({
            "outcome": "not_found",
            "status": e.status().as_u16(),
            "message": e.to_string(),
        }),
    }
}

fn describe(node: &RouteNode) -> Value {
    match node {
        RouteNode::Composite(list) => json!({
            "group": list.name(),
            "routes": list.iter().map(describe).collect::<Vec<_>>(),
        }),
        RouteNode::Resource(route) => json!({
            "resource": route.name(),
            "actions": route
                .action_dictionary()
                .iter()
                .map(|(flag, action)| (flag.to_string(), Value::from(action.as_str())))
                .collect::<serde_json::Map<_, _>>(),
        }),
    }
}
