use clap::{Parser, Subcommand};
use ferrous_route_domain::CliOverrides;
use ferrous_route_infrastructure::ResolverGraph;
use std::net::IpAddr;
use tracing::{error, info};

mod bootstrap;
mod query;

#[derive(Parser)]
#[command(name = "ferrous-route")]
#[command(version = "0.1.0")]
#[command(about = "Ferrous Route - rule-based DNS query dispatcher")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    /// Resolver or router that receives queries first
    #[arg(long)]
    root: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate the configuration and print the routing table
    Check,

    /// Resolve a single query through the configured routers
    Query {
        name: String,

        #[arg(default_value = "A")]
        record_type: String,

        #[arg(long, default_value = "IN")]
        class: String,

        /// Client address the query appears to come from
        #[arg(long, default_value = "127.0.0.1")]
        source: IpAddr,

        /// Print router counters as JSON afterwards
        #[arg(long)]
        metrics: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        log_level: cli.log_level.clone(),
        json_logs: cli.json_logs.then_some(true),
        root: cli.root.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!("Starting Ferrous Route v{}", env!("CARGO_PKG_VERSION"));

    let graph = ResolverGraph::build(&config).map_err(|e| {
        error!(error = %e, "Invalid routing configuration");
        anyhow::anyhow!(e)
    })?;

    match cli.command {
        Command::Check => {
            for router in graph.routers() {
                println!("router {}", router.id());
                for rule in router.rules() {
                    println!("  {} -> {}", rule, rule.target_name());
                }
            }
            println!("root {}", config.root);
            Ok(())
        }
        Command::Query {
            name,
            record_type,
            class,
            source,
            metrics,
        } => {
            let args = query::QueryArgs {
                name,
                record_type,
                class,
                source,
                metrics,
            };
            query::run(&graph, args).await
        }
    }
}
