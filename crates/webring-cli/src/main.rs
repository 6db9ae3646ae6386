//! # Webring CLI Entry Point
//!
//! Loads the member list and index template, starts the optional liveness
//! probe and serves the ring over HTTP.
//!
//! ## Usage
//!
//! ```bash
//! # Serve with defaults (members.csv, index.html, static/, :8080)
//! webring
//!
//! # Identify the visitor by ?member= instead of the Referer header
//! webring -m ring.csv -i index.html -r query
//!
//! # Require a real ring and skip the startup probe
//! webring --min-members 2 --skip-health-check
//! ```

use anyhow::Result;
use argh::FromArgs;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use webring_common::{load_members, Registry};
use webring_navigator::{HealthCheckConfig, HealthChecker, ResolutionStrategy};
use webring_server::{HttpServer, Template, WebringContext};

const DEFAULT_BIND: &str = "0.0.0.0:8080";
const BIND_ENV: &str = "WEBRING_BIND";

#[derive(FromArgs)]
/// Webring - serve an index page and next/previous/random redirects around a ring of sites
struct Cli {
    /// csv file containing members of the webring
    ///
    /// The first row is a header and is skipped. Each following row holds
    /// at least a name and a URL.
    #[argh(option, short = 'm', default = "\"members.csv\".into()")]
    members: String,

    /// directory containing favicon, badges and other static resources
    ///
    /// Served under /static/.
    #[argh(option, short = 's', long = "static", default = "\"static/\".into()")]
    static_dir: String,

    /// template file for the webring home page
    #[argh(option, short = 'i', default = "\"index.html\".into()")]
    index: String,

    /// address to bind the HTTP server to
    ///
    /// Falls back to the WEBRING_BIND environment variable, then 0.0.0.0:8080.
    #[argh(option, short = 'b')]
    bind: Option<String>,

    /// how to find the visitor's current member: "referrer" or "query"
    ///
    /// "referrer" reads the Referer header; "query" reads ?member=.
    #[argh(option, short = 'r', default = "ResolutionStrategy::Referrer")]
    resolution: ResolutionStrategy,

    /// minimum number of members required to start
    ///
    /// Use 2 to refuse to serve a ring of one.
    #[argh(option, long = "min-members", default = "1")]
    min_members: usize,

    /// timeout for each member liveness check in milliseconds
    #[argh(option, long = "health-check-timeout", default = "5000")]
    health_check_timeout_ms: u64,

    /// do not probe member sites at startup
    #[argh(switch, long = "skip-health-check")]
    skip_health_check: bool,
}

impl Cli {
    /// Priority: CLI flag > env var > default.
    fn bind_addr(&self) -> String {
        self.bind
            .clone()
            .or_else(|| std::env::var(BIND_ENV).ok())
            .unwrap_or_else(|| DEFAULT_BIND.to_string())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli: Cli = argh::from_env();

    // Set default log level to INFO, but allow RUST_LOG env var to override
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    run(cli).await
}

async fn run(cli: Cli) -> Result<()> {
    let bind = cli.bind_addr();
    let addr: SocketAddr = bind
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid bind address {}: {}", bind, e))?;

    let members = load_members(&cli.members)
        .map_err(|e| anyhow::anyhow!("Failed to load members from {}: {}", cli.members, e))?;
    tracing::info!("Members: {}", members.len());

    let registry = Arc::new(Registry::with_min_members(members, cli.min_members)?);
    let template = Template::load(&cli.index)?;

    let health_config = HealthCheckConfig {
        timeout: Duration::from_millis(cli.health_check_timeout_ms),
        enabled: !cli.skip_health_check,
    };
    // The health check only logs; serving starts without waiting for it.
    let _health_check = HealthChecker::start(Arc::clone(&registry), health_config)?;

    if !Path::new(&cli.static_dir).is_dir() {
        tracing::warn!("Static directory {} does not exist", cli.static_dir);
    }

    let context = WebringContext::new(registry, cli.resolution, template);
    let server = HttpServer::new(Arc::new(context)).with_static_dir(&cli.static_dir);
    server.run(addr).await?;

    Ok(())
}
