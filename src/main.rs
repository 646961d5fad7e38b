//! catalog-xref - marketplace catalog to inventory cross-reference CLI

use anyhow::Result;
use catalog_xref::clipboard;
use catalog_xref::commands::{self, CompareCommand, InventoryCommand, MarketplaceCommand, PingCommand};
use catalog_xref::config::{Config, OutputFormat};
use catalog_xref::records::to_rows;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "catalog-xref",
    version,
    about = "Cross-reference Wildberries cards with MoySklad products and export TSV",
    long_about = "Fetches catalog cards from Wildberries, looks their vendor codes up in MoySklad, \
                  and prints tab-separated rows (also copied to the clipboard) for pasting into a spreadsheet."
)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    /// Proxy URL (e.g., socks5://host:port)
    #[arg(long, global = true, env = "XREF_PROXY")]
    proxy: Option<String>,

    /// Do not copy the TSV block to the clipboard
    #[arg(long, global = true)]
    no_clipboard: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct FetchArgs {
    /// Marketplace subject (category) ID
    #[arg(short, long)]
    subject: Option<u64>,

    /// Maximum number of cards to request
    #[arg(short, long)]
    limit: Option<u32>,
}

#[derive(clap::Args)]
struct LookupArgs {
    #[command(flatten)]
    fetch: FetchArgs,

    /// Inventory folder path filter (overrides MOYSKLAD_FILTER_PATH_NAME)
    #[arg(long)]
    path_name: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the marketplace API connection
    Ping,

    /// Export marketplace cards, one row per barcode
    #[command(alias = "wb")]
    Marketplace(FetchArgs),

    /// Look up marketplace articles in the inventory system
    #[command(alias = "ms")]
    Inventory(LookupArgs),

    /// Export marketplace rows merged with their inventory matches
    Compare {
        #[command(flatten)]
        lookup: LookupArgs,

        /// Compare articles case-insensitively
        #[arg(long)]
        ignore_case: bool,
    },
}

impl FetchArgs {
    fn apply(&self, config: &mut Config) {
        if let Some(subject) = self.subject {
            config.subject_id = subject;
        }
        if let Some(limit) = self.limit {
            config.card_limit = limit;
        }
    }
}

impl LookupArgs {
    fn apply(&self, config: &mut Config) {
        self.fetch.apply(config);
        if let Some(path_name) = &self.path_name {
            config.ms_path_name = Some(path_name.clone());
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    if clipboard::is_holder() {
        return clipboard::run_holder();
    }

    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    if let Some(format) = cli.format {
        config.format = format;
    }
    if let Some(proxy) = cli.proxy {
        config.proxy = Some(proxy);
    }
    if cli.no_clipboard {
        config.clipboard = false;
    }

    match cli.command {
        Commands::Ping => {
            let output = PingCommand::new(config).execute().await?;
            println!("{}", output);
        }

        Commands::Marketplace(args) => {
            args.apply(&mut config);
            let records = MarketplaceCommand::new(config.clone()).execute().await?;
            commands::present(&config, &to_rows(&records))?;
        }

        Commands::Inventory(args) => {
            args.apply(&mut config);
            let lookup = InventoryCommand::new(config.clone()).execute().await?;
            if !lookup.failed.is_empty() {
                eprintln!("Lookups failed for: {}", lookup.failed.join(", "));
            }
            commands::present(&config, &to_rows(&lookup.records))?;
        }

        Commands::Compare { lookup, ignore_case } => {
            lookup.apply(&mut config);
            let matched = CompareCommand::new(config.clone(), ignore_case).execute().await?;
            commands::present(&config, &to_rows(&matched))?;
        }
    }

    Ok(())
}
