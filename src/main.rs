use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

use carpcheck::carp::parse_carp_status;
use carpcheck::config::{Config, DEFAULT_CONFIG_PATH};
use carpcheck::{FailoverCheck, NodeRole, SystemRunner};

/// Exit status when the check raised at least one alert
const EXIT_ALERTS: u8 = 2;

#[derive(Parser)]
#[command(name = "carpcheck")]
#[command(about = "Verify CARP failover interfaces on a two-node HA pair")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the critical interface check once and report alerts
    Check {
        /// Path to carpcheck.toml config file
        #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,
        /// Node this host is in the pair (A or B), overrides the config
        #[arg(short, long)]
        node: Option<NodeRole>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the CARP state of every critical interface
    Status {
        /// Path to carpcheck.toml config file
        #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,
    },
    /// Parse captured ifconfig output and print the CARP state found
    Parse {
        /// File holding ifconfig output (reads stdin when omitted)
        file: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(Level::WARN.into())
                .from_env_lossy(),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check { config, node, json } => {
            let mut cfg = Config::from_file(&config)?;
            if let Some(node) = node {
                cfg.failover.node = node;
            }
            info!(path = %config.display(), node = %cfg.failover.node, "Loaded configuration");

            let check = FailoverCheck::from_config(&cfg, Arc::new(SystemRunner));
            let report = check.run_report().await;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else if report.alerts.is_empty() {
                println!("All critical failover interfaces are healthy.");
            } else {
                for alert in &report.alerts {
                    println!("{}", alert);
                }
            }

            if !report.alerts.is_empty() {
                return Ok(ExitCode::from(EXIT_ALERTS));
            }
        }
        Commands::Status { config } => {
            let cfg = Config::from_file(&config)?;
            let check = FailoverCheck::from_config(&cfg, Arc::new(SystemRunner));

            println!("Node {} (failover licensed: {})", cfg.failover.node, cfg.failover.licensed);
            let states = check.interface_states().await;
            if states.is_empty() {
                println!("No critical interfaces configured.");
            }
            for (iface, status) in states {
                match status {
                    Ok(status) => println!(
                        "  {:<16} {} (expected vhid {})",
                        iface.name, status, iface.vhid
                    ),
                    Err(e) => println!("  {:<16} not found ({})", iface.name, e),
                }
            }
        }
        Commands::Parse { file } => {
            let text = match file {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?,
                None => {
                    let mut buf = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buf)
                        .context("Failed to read stdin")?;
                    buf
                }
            };
            println!("{}", parse_carp_status(&text));
        }
    }

    Ok(ExitCode::SUCCESS)
}
