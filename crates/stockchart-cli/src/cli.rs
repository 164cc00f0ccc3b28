//! CLI argument definitions for stockchart.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `chart` | Fetch one candlestick chart image |
//! | `related` | Fetch the related tickers for a symbol |
//! | `session` | Interactive session driven from stdin |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--timeout-ms` | transport default | Per-request timeout in ms |
//! | `--user-agent` | `stockchart/<version>` | User agent sent upstream |
//! | `--chart-endpoint` | stockscores chart page | Chart endpoint base URL |
//! | `--search-endpoint` | Yahoo finance search | Search endpoint base URL |
//!
//! # Examples
//!
//! ```bash
//! stockchart chart AAPL --preset weekly --out aapl.png
//! stockchart related TSLA
//! RUST_LOG=debug stockchart session --outbox ./outbox
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use stockchart_core::{CHART_ENDPOINT, SEARCH_ENDPOINT};

/// Stockchart - candlestick charts and related tickers from the terminal.
#[derive(Debug, Parser)]
#[command(
    name = "stockchart",
    author,
    version,
    about = "Fetch candlestick charts and related tickers for a stock symbol",
    long_about = "Stockchart fetches a rendered candlestick chart for a ticker, \
switches between preset time ranges, lists related tickers from a finance search \
API, and sends the displayed chart as a message attachment.\n\
\n\
Set RUST_LOG=debug to see fetch diagnostics."
)]
pub struct Cli {
    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Per-request timeout in milliseconds. Omit to keep the transport default.
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// User agent sent with every request.
    #[arg(long, global = true)]
    pub user_agent: Option<String>,

    /// Base URL of the chart-rendering endpoint.
    #[arg(long, global = true, default_value = CHART_ENDPOINT)]
    pub chart_endpoint: String,

    /// Base URL of the finance search endpoint.
    #[arg(long, global = true, default_value = SEARCH_ENDPOINT)]
    pub search_endpoint: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch one candlestick chart.
    ///
    /// Without --preset the 180-day daily view is used.
    ///
    /// # Examples
    ///
    ///   stockchart chart AAPL
    ///   stockchart chart TSLA --preset max --out tsla.png
    Chart(ChartArgs),

    /// Fetch the related tickers listed on the symbol's news.
    ///
    /// # Examples
    ///
    ///   stockchart related NVDA
    Related(RelatedArgs),

    /// Run an interactive session reading commands from stdin.
    ///
    /// Commands: search <TICKER>, daily, weekly, monthly, yearly, max,
    /// send, cancel, show, quit.
    Session(SessionArgs),
}

/// Arguments for the `chart` command.
#[derive(Debug, Args)]
pub struct ChartArgs {
    /// Ticker symbol, passed to the endpoint as typed.
    pub ticker: String,

    /// Time-range preset: daily, weekly, monthly, yearly or max.
    #[arg(long)]
    pub preset: Option<String>,

    /// Write the chart image to this file.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

/// Arguments for the `related` command.
#[derive(Debug, Args)]
pub struct RelatedArgs {
    /// Ticker symbol, passed to the endpoint as typed.
    pub ticker: String,
}

/// Arguments for the `session` command.
#[derive(Debug, Args)]
pub struct SessionArgs {
    /// Ticker loaded when the session starts.
    #[arg(long, default_value = "AAPL")]
    pub ticker: String,

    /// Directory that receives sent chart attachments.
    #[arg(long, default_value = "outbox")]
    pub outbox: PathBuf,
}
