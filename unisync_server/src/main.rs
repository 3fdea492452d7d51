use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use unisync_core::config::ServiceConfig;
use unisync_core::models::UniversityFilter;
use unisync_server::cli::{Cli, Commands};
use unisync_server::server;

fn init_tracing() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt = tracing_subscriber::fmt::layer().json().with_target(true);
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt)
        .try_init()
        .map_err(|e| anyhow::anyhow!("tracing already initialized: {e}"))?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;
    let cli = Cli::parse();

    let cmd = cli.command.unwrap_or(Commands::Serve {
        host: "0.0.0.0".to_string(),
        port: 5000,
        data_dir: PathBuf::from(".unisync_dev"),
    });

    match cmd {
        Commands::Serve {
            host,
            port,
            data_dir,
        } => {
            let addr: SocketAddr = format!("{host}:{port}").parse()?;
            let cfg = ServiceConfig::from_env();
            cfg.validate()?;
            let state = server::build_state(&data_dir, &cfg).await?;
            server::serve(addr, state).await?;
        }
        Commands::Ingest { country, data_dir } => {
            let cfg = ServiceConfig::from_env();
            cfg.validate()?;
            let state = server::build_state(&data_dir, &cfg).await?;
            let report = state.ingest.sync_country(&country).await?;
            println!(
                "ingested {} universities for {country} ({} dropped)",
                report.stored, report.dropped
            );
            state.store.close().await;
        }
        Commands::Config => {
            let cfg = ServiceConfig::from_env();
            let out = serde_json::json!({
                "UNISYNC_SOURCE_BASE_URL": cfg.source_base_url,
                "UNISYNC_FETCH_TIMEOUT_MS": cfg.fetch_timeout_ms,
                "UNISYNC_DATA_DIR": std::env::var("UNISYNC_DATA_DIR").ok(),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Commands::Check { data_dir } => {
            let cfg = ServiceConfig::from_env();
            match server::build_state(&data_dir, &cfg).await {
                Ok(state) => {
                    match state.query.find_universities(&UniversityFilter::default()).await {
                        Ok(all) => println!("store: ok ({} records)", all.len()),
                        Err(e) => println!("store: error ({e})"),
                    }
                    state.store.close().await;
                }
                Err(e) => println!("store: error ({e})"),
            }
            println!("source: configured ({})", cfg.source_base_url);
        }
    }

    Ok(())
}
