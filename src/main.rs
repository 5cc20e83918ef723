use clap::{Parser, Subcommand};
use shelfscan::config::{Config, DEFAULT_CONFIG_PATH};
use shelfscan_catalog::{ingest_barcode, CatalogClient};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "shelfscan", about = "Barcode lookup proxy for the inventory dashboard")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    #[command(subcommand)]
    cmd: Option<Cmd>,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Serve the lookup proxy (default)
    Serve,
    /// Resolve a barcode through the proxy and store it in the backend
    Ingest { barcode: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_file(&cli.config)?;

    match cli.cmd.unwrap_or(Cmd::Serve) {
        Cmd::Serve => shelfscan::run(config).await,
        Cmd::Ingest { barcode } => {
            shelfscan::logging::init(&config)?;
            let catalog = config
                .catalog
                .as_ref()
                .ok_or_else(|| anyhow::anyhow!("[catalog] section is required for ingest"))?;
            let client = CatalogClient::new(&catalog.backend_url, &catalog.proxy_url)?;

            let known = client.list_products(None).await?;
            let product = ingest_barcode(&client, &barcode, &known).await?;
            println!("{}", serde_json::to_string_pretty(&product)?);
            Ok(())
        }
    }
}
