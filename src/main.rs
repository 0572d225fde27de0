use std::net::IpAddr;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sip_planner::cli::{render_comparison, render_plan, render_suggestions};
use sip_planner::config::{DEFAULT_PORT, PlanDefaults, ServerConfig};
use sip_planner::log::init_logging;
use sip_planner::{InstrumentCatalog, ProjectionInput};

#[derive(Parser)]
#[command(
    name = "sip-planner",
    version,
    about = "SIP contribution planner and savings instrument comparison"
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the JSON API
    Serve {
        #[arg(long, env = "SIP_PLANNER_HOST", default_value = "0.0.0.0")]
        host: IpAddr,
        #[arg(long, env = "SIP_PLANNER_PORT", default_value_t = DEFAULT_PORT)]
        port: u16,
    },
    /// Monthly contribution needed to reach a target, with yearly growth
    Plan {
        #[arg(long, default_value_t = PlanDefaults::default().target_amount)]
        target: f64,
        #[arg(long, default_value_t = PlanDefaults::default().years)]
        years: u32,
        #[arg(
            long,
            default_value_t = PlanDefaults::default().annual_rate_percent,
            help = "Expected annual return in percent, e.g. 12"
        )]
        rate: f64,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Instruments suited to a one-off amount
    Suggest {
        #[arg(long, allow_negative_numbers = true)]
        amount: f64,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Compare every instrument and provider
    Instruments {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = run(cli.command).await;
    if let Err(e) = &result {
        tracing::error!(error = %e, "sip-planner failed");
    }
    result
}

async fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Serve { host, port } => {
            let config = ServerConfig { host, port };
            sip_planner::api::run_http_server(config, PlanDefaults::default())
                .await
                .with_context(|| format!("HTTP server on {} failed", config.socket_addr()))
        }
        Commands::Plan {
            target,
            years,
            rate,
            json,
        } => {
            let input = ProjectionInput {
                target_amount: target,
                years,
                annual_rate_percent: rate,
            };
            let summary = sip_planner::plan(input).context("cannot build plan")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("{}", render_plan(&input, &summary));
            }
            Ok(())
        }
        Commands::Suggest { amount, json } => {
            let recommendation = sip_planner::suggest_instruments(amount);
            if json {
                println!("{}", serde_json::to_string_pretty(&recommendation)?);
            } else {
                println!("{}", render_suggestions(amount, &recommendation));
            }
            Ok(())
        }
        Commands::Instruments { json } => {
            let catalog = InstrumentCatalog::standard();
            if json {
                println!("{}", serde_json::to_string_pretty(catalog.list_all())?);
            } else {
                println!("{}", render_comparison(&catalog.comparison_rows()));
            }
            Ok(())
        }
    }
}
