use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;

use stockchart_core::{
    latest_display_text, HttpClient, RelatedTickerFetcher, SearchTerm, SessionConfig,
};

use crate::cli::RelatedArgs;
use crate::error::CliError;

use super::NO_UPDATE;

/// Print the text the related-tickers slot would show. Nothing is printed
/// when the search yields no match.
pub async fn run(
    args: &RelatedArgs,
    config: &SessionConfig,
    http_client: Arc<dyn HttpClient>,
    out: &mut impl Write,
) -> Result<ExitCode, CliError> {
    let term = SearchTerm::new(args.ticker.as_str());
    let fetcher = RelatedTickerFetcher::new(http_client, config.endpoints.search.as_str())
        .with_timeout_ms(config.timeout_ms);

    let matches = match fetcher.fetch(&term).await {
        Ok(matches) => matches,
        Err(error) => {
            log::warn!("related tickers for {term} not fetched: {error}");
            Vec::new()
        }
    };

    match latest_display_text(&matches) {
        Some(text) => {
            writeln!(out, "{text}")?;
            Ok(ExitCode::SUCCESS)
        }
        None => Ok(ExitCode::from(NO_UPDATE)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StubHttpClient;
    use stockchart_core::HttpResponse;

    async fn related(body: &str) -> (ExitCode, String) {
        let client = Arc::new(
            StubHttpClient::default().respond("search?q=", Ok(HttpResponse::ok(body.as_bytes()))),
        );
        let mut out = Vec::new();
        let code = run(
            &RelatedArgs {
                ticker: String::from("AAPL"),
            },
            &SessionConfig::default(),
            client,
            &mut out,
        )
        .await
        .expect("command should complete");
        (code, String::from_utf8(out).expect("utf8"))
    }

    #[tokio::test]
    async fn prints_text_of_last_match() {
        let (code, printed) = related(
            r#"{"news":[{"relatedTickers":["AAPL"]},{"relatedTickers":["GOOG","META"]}]}"#,
        )
        .await;

        assert_eq!(code, ExitCode::SUCCESS);
        assert_eq!(printed, "Related Tickers:\nGOOG, META\n");
    }

    #[tokio::test]
    async fn prints_nothing_without_a_match() {
        let (code, printed) = related(r#"{"news":[{"title":"no tickers"}]}"#).await;
        assert_eq!(code, ExitCode::from(NO_UPDATE));
        assert!(printed.is_empty());

        let (code, printed) = related("Too Many Requests").await;
        assert_eq!(code, ExitCode::from(NO_UPDATE));
        assert!(printed.is_empty());
    }
}
