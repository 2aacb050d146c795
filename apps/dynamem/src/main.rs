//! DynaMem server binary.
//!
//! Serves an in-memory document store over the DynamoDB JSON protocol.
//!
//! # Configuration
//!
//! | Variable        | Default     | Description                              |
//! |-----------------|-------------|------------------------------------------|
//! | `DYNAMEM_HOST`  | `127.0.0.1` | Bind host                                |
//! | `DYNAMEM_PORT`  | `0`         | Bind port (`0` picks an ephemeral port)  |
//! | `DYNAMEM_SEED`  | unset       | JSON file with an array of tables to load |
//! | `LOG_LEVEL`     | `info`      | Log filter when `RUST_LOG` is unset      |

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use dynamem_model::input::LoadTableInput;
use dynamem_server::{MemoryServer, ServerConfig};

/// Server version reported in logs.
const VERSION: &str = env!("CARGO_PKG_VERSION");

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    Ok(())
}

/// Load every table described in the seed file into the server's store.
fn seed_tables(server: &MemoryServer, path: &Path) -> Result<()> {
    let raw = std::fs::read(path)
        .with_context(|| format!("failed to read seed file {}", path.display()))?;
    let tables: Vec<LoadTableInput> = serde_json::from_slice(&raw)
        .with_context(|| format!("invalid seed file {}", path.display()))?;

    for table in tables {
        let name = table.table_name.clone();
        server
            .store()
            .handle_load(table)
            .with_context(|| format!("failed to load table {name}"))?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::from_env()?;
    init_tracing(&config.log_level)?;

    let server = MemoryServer::new(config);
    if let Some(seed) = std::env::var_os("DYNAMEM_SEED") {
        seed_tables(&server, Path::new(&seed))?;
    }

    let endpoint = server.endpoint().await?;
    info!(%endpoint, version = VERSION, "starting DynaMem");
    println!("{endpoint}");

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for shutdown signal")?;
    info!("received shutdown signal");

    server.close().await;
    info!("all connections drained, exiting");
    Ok(())
}
