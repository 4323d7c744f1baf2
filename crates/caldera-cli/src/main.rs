use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use caldera_client::GatewayClient;

/// Log levels applied on top of `RUST_LOG` for the binary and the gateway client.
const DEFAULT_LOG_DIRECTIVES: [&str; 2] = ["caldera=info", "caldera_client=info"];

#[derive(Parser)]
#[command(name = "caldera", version, about = "Read and control a heating system through Caldera")]
struct Cli {
    /// Base URL of the Caldera gateway
    #[arg(long, env = "CALDERA_URL", default_value = "http://127.0.0.1:5000", global = true)]
    url: String,

    /// API key sent as a Bearer token (reads CALDERA_API_KEY if not provided)
    #[arg(long, env = "CALDERA_API_KEY", global = true)]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Hot-water gas consumption in m³ for a month (defaults to the current month)
    Consumption {
        /// Calendar year
        #[arg(long, requires = "month")]
        year: Option<i32>,

        /// Month, 1-12
        #[arg(long, requires = "year")]
        month: Option<u32>,
    },

    /// List zones with their positions
    Zones,

    /// Show temperatures and mode of one zone
    Zone {
        /// Zone position as listed by `zones`
        index: usize,
    },

    /// Show the flow temperature of a zone's heating circuit
    Flow {
        /// Zone position as listed by `zones`
        index: usize,
    },

    /// Change a zone's heating mode
    SetMode {
        /// Zone position as listed by `zones`
        index: usize,

        /// manual, off or time_controlled
        mode: String,
    },

    /// Set a zone's manual heating setpoint
    SetTemp {
        /// Zone position as listed by `zones`
        index: usize,

        /// Setpoint in °C
        #[arg(allow_negative_numbers = true)]
        temperature: f64,
    },

    /// Show the system water pressure
    Pressure,

    /// Dump everything the gateway reports about the system
    System,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    let mut filter = EnvFilter::from_default_env();
    for directive in DEFAULT_LOG_DIRECTIVES {
        filter = filter.add_directive(directive.parse()?);
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut client = GatewayClient::new(&cli.url)
        .with_context(|| format!("Invalid gateway URL: {}", cli.url))?;
    if let Some(key) = cli.api_key {
        client = client.with_api_key(key);
    }

    match cli.command {
        Commands::Consumption { year, month } => {
            let consumption = match (year, month) {
                (Some(year), Some(month)) => client.gas_consumption(year, month).await?,
                _ => client.current_month_gas_consumption().await?,
            };
            print_json(&consumption)?;
        }
        Commands::Zones => {
            let zones = client.zones().await?;
            if zones.zones.is_empty() {
                tracing::warn!("Gateway reported no zones");
            }
            print_json(&zones)?;
        }
        Commands::Zone { index } => print_json(&client.zone_info(index).await?)?,
        Commands::Flow { index } => print_json(&client.zone_flow_temperature(index).await?)?,
        Commands::SetMode { index, mode } => {
            let result = client.update_zone_mode(index, &mode).await?;
            tracing::info!("{}", result.message);
            print_json(&result)?;
        }
        Commands::SetTemp { index, temperature } => {
            let result = client.update_zone_temperature(index, temperature).await?;
            tracing::info!("{}", result.message);
            print_json(&result)?;
        }
        Commands::Pressure => print_json(&client.water_pressure().await?)?,
        Commands::System => print_json(&client.system_info().await?)?,
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
