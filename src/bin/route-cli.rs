use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::json;

use hookroute::config::load_routes;
use hookroute::routing::{DispatchOutcome, Dispatcher, MethodTag, RouteRegistry};

#[derive(Parser)]
#[command(name = "route-cli")]
#[command(about = "Inspect and exercise a declarative route table", long_about = None)]
struct Cli {
    /// Path to the routes TOML file.
    #[arg(short, long)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Dispatch one synthetic request against the table
    Dispatch {
        #[arg(short, long, default_value = "GET")]
        method: String,

        #[arg(short, long)]
        path: String,

        /// Raw query string, e.g. "foo=bar&q=page"
        #[arg(short, long, default_value = "")]
        query: String,
    },
    /// List the registered routes
    Routes,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hookroute=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let config = load_routes(&cli.config)?;
    let mut registry: RouteRegistry<serde_json::Value> = RouteRegistry::new();
    config.apply_to(&mut registry);

    match cli.command {
        Commands::Dispatch {
            method,
            path,
            query,
        } => {
            let method = MethodTag::parse(&method)?;
            let params = parse_query(&query);

            let dispatcher = Dispatcher::new(&registry);
            let outcome = match dispatcher.dispatch(method, &path, &params) {
                DispatchOutcome::Handled(value) => json!({
                    "outcome": "handled",
                    "value": value,
                }),
                DispatchOutcome::Redirect { target, status } => json!({
                    "outcome": "redirect",
                    "target": target,
                    "status": status,
                }),
                DispatchOutcome::NoMatch => json!({ "outcome": "no_match" }),
            };
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
        Commands::Routes => {
            let routes: Vec<_> = registry
                .iter()
                .map(|route| {
                    json!({
                        "method": route.method.as_str(),
                        "template": route.template,
                        "redirect": route.is_redirect(),
                        "rules": route.rules,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&routes)?);
        }
    }

    Ok(())
}

/// Split a raw query string into a parameter map. Repeated keys keep the
/// last value.
fn parse_query(query: &str) -> BTreeMap<String, String> {
    url::form_urlencoded::parse(query.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}
