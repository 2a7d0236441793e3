mod crawl;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "mapcrawl-cli")]
#[command(about = "Harvest deduplicated business listings from an infinite-scroll result feed")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Crawl a recorded result feed and print the deduplicated listings
    Crawl(CrawlArgs),
    /// Print the phone number the heuristic picks from a block of card text
    Phone { text: String },
}

#[derive(Debug, clap::Args)]
pub(crate) struct CrawlArgs {
    /// JSON fixture of recorded feed passes to replay
    #[arg(long)]
    pub fixture: PathBuf,

    /// Full search text; replaces --keyword/--country/--city
    #[arg(long, conflicts_with_all = ["keyword", "country", "city"])]
    pub query: Option<String>,

    /// Business keyword, e.g. "logistics"
    #[arg(long, required_unless_present = "query")]
    pub keyword: Option<String>,

    /// Country to search in
    #[arg(long, required_unless_present = "query")]
    pub country: Option<String>,

    /// Optional city within the country
    #[arg(long)]
    pub city: Option<String>,

    /// Stop after this many passes with an unchanged card count (3-10);
    /// defaults to `MAPCRAWL_MAX_STALL_PASSES`
    #[arg(long)]
    pub max_stall_passes: Option<u32>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Jsonl)]
    pub format: OutputFormat,

    /// Skip the settle wait and the randomized pause between passes
    #[arg(long, default_value_t = false)]
    pub no_pacing: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// One JSON object per listing, printed as each listing is found
    Jsonl,
    /// A single JSON array printed when the crawl ends
    Json,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = mapcrawl_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_ansi(config.ansi_logs())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Crawl(args) => crawl::run_crawl(&config, &args).await?,
        Commands::Phone { text } => println!("{}", mapcrawl_scraper::extract_phone(&text)),
    }

    Ok(())
}

#[cfg(test)]
mod tests;
