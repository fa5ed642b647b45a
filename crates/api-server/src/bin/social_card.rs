//! Generate social cards from the command line.
//!
//! ```text
//! social-card AAPL
//! social-card AAPL --format reddit
//! social-card AAPL,MSFT,GOOGL --format discord --output cards.json
//! ```

use std::path::PathBuf;

use analysis_client::AnalysisClient;
use analysis_core::normalize_ticker;
use anyhow::Context;
use api_server::ServerConfig;
use clap::{Parser, ValueEnum};
use social_cards::{render, render_batch, Branding, CardData, CardFormat};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Json,
    Reddit,
    Discord,
}

impl From<FormatArg> for CardFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Json => CardFormat::Json,
            FormatArg::Reddit => CardFormat::Reddit,
            FormatArg::Discord => CardFormat::Discord,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "social-card", about = "Generate social media cards from stock analysis")]
struct Cli {
    /// Ticker symbol, or several separated by commas.
    tickers: String,

    #[arg(short, long, value_enum, default_value_t = FormatArg::Json)]
    format: FormatArg,

    /// Write the result to a file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Analysis API base URL. Defaults to SOCIAL_CARD_API_URL / ANALYSIS_API_URL.
    #[arg(long)]
    api_url: Option<String>,
}

fn parse_tickers(raw: &str) -> Vec<String> {
    raw.split(',').filter_map(normalize_ticker).collect()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ServerConfig::from_env()?;
    let api_url = cli.api_url.unwrap_or(config.social_card_api_url);
    let client = AnalysisClient::new(&api_url, config.upstream_timeout)?;
    let branding = Branding::new(config.site_domain);
    let format = CardFormat::from(cli.format);

    let tickers = parse_tickers(&cli.tickers);
    let output = match tickers.as_slice() {
        [] => anyhow::bail!("No ticker given"),
        [ticker] => {
            let analysis = client
                .fetch_analysis(ticker)
                .await
                .with_context(|| format!("Error analyzing {ticker}"))?;
            render(format, &CardData::from_analysis(&analysis), &branding).to_body()?
        }
        many => render_batch(&client, many, format, &branding).await?,
    };

    match cli.output {
        Some(path) => {
            std::fs::write(&path, &output)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Saved to {}", path.display());
        }
        None => println!("{output}"),
    }
    Ok(())
}
