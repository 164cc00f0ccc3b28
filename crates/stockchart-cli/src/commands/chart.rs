use std::io::Write;
use std::process::ExitCode;
use std::str::FromStr;
use std::sync::Arc;

use serde_json::json;
use stockchart_core::{
    ChartFetcher, HttpClient, Preset, SearchTerm, SessionConfig, TimeRangeSelection,
};

use crate::cli::ChartArgs;
use crate::error::CliError;
use crate::output;

use super::NO_UPDATE;

pub async fn run(
    args: &ChartArgs,
    config: &SessionConfig,
    http_client: Arc<dyn HttpClient>,
    pretty: bool,
    out: &mut impl Write,
) -> Result<ExitCode, CliError> {
    let selection = match args.preset.as_deref() {
        Some(name) => Preset::from_str(name)?.selection(),
        None => TimeRangeSelection::default(),
    };
    let term = SearchTerm::new(args.ticker.as_str());

    let fetcher = ChartFetcher::new(http_client, config.endpoints.chart.as_str())
        .with_timeout_ms(config.timeout_ms);
    let url = fetcher.url_for(&term, &selection);

    match fetcher.fetch(&term, &selection).await {
        Ok(chart) => {
            if let Some(path) = &args.out {
                std::fs::write(path, chart.bytes())?;
            }
            output::render(
                out,
                &output::chart_summary(&chart, &url, args.out.as_deref())?,
                pretty,
            )?;
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            log::debug!("{term} chart ({selection}) not fetched: {error}");
            output::render(
                out,
                &json!({
                    "ticker": term,
                    "selection": selection,
                    "url": url,
                    "chart": null,
                }),
                pretty,
            )?;
            Ok(ExitCode::from(NO_UPDATE))
        }
    }
}
