//! # Inventory Monitor
//!
//! In-memory inventory query engine. One actor owns the product list and
//! answers six operations: list/search products, get one product, list
//! warehouses, compute KPIs with a trend series, update demand and transfer
//! stock.
//!
//! The binary speaks newline-delimited JSON: one request per stdin line, one
//! response per stdout line. Logs go to stderr.
//!
//! ```text
//! $ echo '{"op":"listProducts","status":"CRITICAL"}' | inventory_monitor
//! {"ok":[{"id":"P-1002",...,"status":"CRITICAL"},{"id":"P-1004",...}]}
//! ```

mod actors;
mod api;
mod app_system;
mod clients;
mod domain;
mod error;
mod kpi;
mod messages;
mod store;

#[cfg(test)]
mod mock_framework;

use tokio::io::BufReader;
use tracing::info;

use crate::app_system::{setup_tracing, Config, InventorySystem};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;

    // Setup tracing once for the entire application
    setup_tracing(config.log_format);

    info!(
        channel_capacity = config.channel_capacity,
        seed_path = ?config.seed_path,
        "Starting inventory monitor"
    );

    let system = InventorySystem::start(&config)?;

    let stdin = BufReader::new(tokio::io::stdin());
    let request_count = api::serve_lines(&system.inventory_client, stdin, tokio::io::stdout()).await?;

    info!(request_count, "Input closed");

    // Shutdown system gracefully
    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
