use std::io::Write;
use std::path::Path;

use serde_json::{json, Value};
use stockchart_core::{ChartImage, DisplayState};
use time::format_description::well_known::Rfc3339;

use crate::error::CliError;

pub fn render(out: &mut impl Write, value: &Value, pretty: bool) -> Result<(), CliError> {
    let payload = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    writeln!(out, "{payload}")?;
    Ok(())
}

pub fn chart_summary(chart: &ChartImage, url: &str, out: Option<&Path>) -> Result<Value, CliError> {
    let fetched_at = chart
        .fetched_at()
        .format(&Rfc3339)
        .map_err(|error| CliError::Command(error.to_string()))?;
    let (width, height) = chart.dimensions();

    Ok(json!({
        "ticker": chart.search_term(),
        "selection": chart.selection(),
        "url": url,
        "format": chart.extension(),
        "width": width,
        "height": height,
        "bytes": chart.bytes().len(),
        "fetched_at": fetched_at,
        "out": out.map(|path| path.display().to_string()),
    }))
}

/// One-line-per-slot rendering of the display, as the session prints it.
pub fn describe_state(state: &DisplayState) -> String {
    let chart = match &state.chart {
        Some(chart) => {
            let (width, height) = chart.dimensions();
            format!(
                "chart: {} {} {}x{} {}",
                chart.search_term(),
                chart.selection(),
                width,
                height,
                chart.extension()
            )
        }
        None => String::from("chart: (none)"),
    };
    let related = state
        .related_text
        .as_deref()
        .unwrap_or("Related Tickers: (none)");

    format!("[{}] {chart}\n{related}", state.revision)
}
