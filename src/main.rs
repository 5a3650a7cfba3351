use std::fs::File;
use std::io;
use std::sync::Arc;

use clap::Parser;
use log::warn;
use operadoras::api::ApiClient;
use operadoras::core::config;
use operadoras::shell::{self, Command};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

#[derive(Parser)]
#[command(name = "operadoras", about = "Browse health-plan operators and their expenses")]
struct Args {
    /// Backend server URL (overrides config and OPERADORAS_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to operadoras.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("operadoras.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        warn!("{e}, falling back to defaults");
        eprintln!("Warning: {e}, using defaults");
        config::OperadorasConfig::default()
    });
    let resolved = config::resolve(&file_config, args.api_url.as_deref());

    let client = ApiClient::new(resolved.base_url, resolved.timeout)
        .map_err(|e| io::Error::other(e.to_string()))?;

    log::info!(
        "Operadoras starting up against {} (page size {})",
        client.base_url(),
        resolved.page_size
    );

    shell::run(args.command, Arc::new(client), resolved.page_size).await
}
