//! partscope command-line driver.
//!
//! Reads one part page (from disk or over HTTP), runs the extractor, and
//! writes the record as pretty JSON. Logs go to stderr.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use partscope_client::{Extractor, FetchClient, FetchConfig, PartExtractor};
use partscope_core::{AppConfig, SimilarPartsStrategy};
use tracing_subscriber::EnvFilter;

mod output;

#[derive(Parser, Debug)]
#[command(name = "partscope", version, about = "Extract structured product data from component detail pages")]
struct Cli {
    /// Similar-parts strategy (overrides PARTSCOPE_SIMILAR_PARTS_STRATEGY)
    #[arg(global = true, long, value_enum)]
    strategy: Option<StrategyArg>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract a record from a saved HTML page
    Extract {
        /// HTML file to read
        #[arg(short, long, default_value = "html/page_content.html")]
        input: PathBuf,
        /// Write JSON here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Download a part page and save the raw HTML
    Fetch {
        url: String,
        #[arg(short, long, default_value = "html/page_content.html")]
        output: PathBuf,
    },
    /// Download a part page and extract a record from it
    Scrape {
        url: String,
        /// Write JSON here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum StrategyArg {
    SerialNumberList,
    SpecMatrix,
}

impl From<StrategyArg> for SimilarPartsStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::SerialNumberList => SimilarPartsStrategy::SerialNumberList,
            StrategyArg::SpecMatrix => SimilarPartsStrategy::SpecMatrix,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load().context("loading configuration")?;

    let mut extractor = PartExtractor::from_config(&config);
    if let Some(strategy) = cli.strategy {
        extractor = extractor.with_strategy(strategy.into());
    }

    match cli.command {
        Commands::Extract { input, output } => {
            let html = output::read_html(&input).await?;
            let record = extractor.extract_html(&html);
            tracing::info!(input = %input.display(), empty = record.is_empty(), "extracted record");
            output::emit_json(&record, output.as_deref()).await?;
        }
        Commands::Fetch { url, output } => {
            let html = fetch_page(&config, &url).await?;
            output::write_file(&output, html.as_bytes()).await?;
            tracing::info!(%url, output = %output.display(), bytes = html.len(), "saved page");
        }
        Commands::Scrape { url, output } => {
            let html = fetch_page(&config, &url).await?;
            let record = extractor.extract_html(&html);
            tracing::info!(%url, empty = record.is_empty(), "extracted record");
            output::emit_json(&record, output.as_deref()).await?;
        }
    }

    Ok(())
}

async fn fetch_page(config: &AppConfig, url: &str) -> Result<String> {
    let client = FetchClient::new(FetchConfig::from_app(config))?;
    let response = client.fetch(url).await.with_context(|| format!("fetching {url}"))?;
    Ok(response.text())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_extract_defaults() {
        let cli = Cli::try_parse_from(["partscope", "extract"]).unwrap();
        match cli.command {
            Commands::Extract { input, output } => {
                assert_eq!(input, PathBuf::from("html/page_content.html"));
                assert!(output.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(cli.strategy.is_none());
    }

    #[test]
    fn test_strategy_flag() {
        let cli = Cli::try_parse_from(["partscope", "scrape", "example.com/p", "--strategy", "spec-matrix"]).unwrap();
        let strategy: SimilarPartsStrategy = cli.strategy.unwrap().into();
        assert_eq!(strategy, SimilarPartsStrategy::SpecMatrix);
    }
}
