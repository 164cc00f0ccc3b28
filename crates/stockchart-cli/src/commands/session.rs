use std::io::Write;
use std::process::ExitCode;
use std::str::FromStr;
use std::sync::Arc;

use stockchart_core::{
    DirectoryOutbox, DisplayState, HttpClient, Preset, Session, SessionConfig, SessionEvent,
};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::cli::SessionArgs;
use crate::error::CliError;
use crate::output;

/// One parsed line of session input.
#[derive(Debug)]
enum Input {
    Event(SessionEvent),
    Cancel,
    Show,
    Quit,
}

pub async fn run(
    args: &SessionArgs,
    config: SessionConfig,
    http_client: Arc<dyn HttpClient>,
) -> Result<ExitCode, CliError> {
    let outbox = Arc::new(DirectoryOutbox::new(&args.outbox));
    let session = Session::new(
        config.with_initial_ticker(args.ticker.as_str()),
        http_client,
        outbox,
    );

    drive(
        session,
        BufReader::new(tokio::io::stdin()),
        &mut std::io::stdout(),
    )
    .await?;
    Ok(ExitCode::SUCCESS)
}

/// Feed `input` to the session line by line. Command replies go to `out`;
/// display changes are printed as the display context publishes them.
async fn drive<R>(mut session: Session, input: R, out: &mut impl Write) -> Result<(), CliError>
where
    R: AsyncBufRead + Unpin,
{
    let printer = spawn_printer(session.subscribe());
    session.handle(SessionEvent::Start);

    let mut lines = input.lines();
    let mut quit = false;
    while let Some(line) = lines.next_line().await? {
        match parse_line(&line) {
            Ok(Some(Input::Event(event))) => session.handle(event),
            Ok(Some(Input::Cancel)) => writeln!(out, "cancelled {} fetch(es)", session.cancel())?,
            Ok(Some(Input::Show)) => {
                writeln!(out, "{}", output::describe_state(&session.snapshot()))?
            }
            Ok(Some(Input::Quit)) => {
                quit = true;
                break;
            }
            Ok(None) => {}
            Err(error) => eprintln!("error: {error}"),
        }

        if let Some(style) = session.take_presentation_request() {
            writeln!(out, "presentation: {style:?}")?;
        }
    }

    // `quit` leaves without waiting on upstream; end of input lets pending
    // fetches land first.
    if quit {
        session.cancel();
    }
    session.settle().await;
    drop(session);
    if let Err(error) = printer.await {
        log::warn!("display printer stopped abnormally: {error}");
    }

    Ok(())
}

/// Print every display change as the display context publishes it.
fn spawn_printer(mut updates: watch::Receiver<DisplayState>) -> JoinHandle<()> {
    tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let state = updates.borrow_and_update().clone();
            println!("{}", output::describe_state(&state));
        }
    })
}

fn parse_line(line: &str) -> Result<Option<Input>, CliError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let (command, rest) = trimmed
        .split_once(char::is_whitespace)
        .map(|(command, rest)| (command, rest.trim()))
        .unwrap_or((trimmed, ""));

    let input = match command.to_ascii_lowercase().as_str() {
        "search" if rest.is_empty() => {
            return Err(CliError::Command(String::from("search needs a ticker")));
        }
        "search" => Input::Event(SessionEvent::Search(rest.to_owned())),
        "send" => Input::Event(SessionEvent::SendChart),
        "cancel" => Input::Cancel,
        "show" => Input::Show,
        "quit" | "exit" => Input::Quit,
        other => Input::Event(SessionEvent::Preset(Preset::from_str(other).map_err(
            |_| CliError::Command(format!("unknown command '{other}'")),
        )?)),
    };

    Ok(Some(input))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_lines_are_ignored() {
        assert!(parse_line("   ").expect("blank parses").is_none());
    }

    #[test]
    fn search_keeps_ticker_as_typed() {
        let input = parse_line("search  brk.b ").expect("parses");
        assert!(matches!(
            input,
            Some(Input::Event(SessionEvent::Search(ref ticker))) if ticker == "brk.b"
        ));
    }

    #[test]
    fn search_without_ticker_is_rejected() {
        assert!(parse_line("search").is_err());
    }

    #[test]
    fn preset_names_become_preset_events() {
        let input = parse_line("Weekly").expect("parses");
        assert!(matches!(
            input,
            Some(Input::Event(SessionEvent::Preset(Preset::Weekly)))
        ));
    }

    #[test]
    fn control_words_parse() {
        assert!(matches!(parse_line("send"), Ok(Some(Input::Event(SessionEvent::SendChart)))));
        assert!(matches!(parse_line("cancel"), Ok(Some(Input::Cancel))));
        assert!(matches!(parse_line("show"), Ok(Some(Input::Show))));
        assert!(matches!(parse_line("quit"), Ok(Some(Input::Quit))));
    }

    use crate::test_support::{png_bytes, StubHttpClient};
    use std::time::Duration;
    use stockchart_core::HttpResponse;

    fn session_with(client: StubHttpClient, outbox: &std::path::Path) -> Session {
        Session::new(
            SessionConfig::default(),
            Arc::new(client),
            Arc::new(DirectoryOutbox::new(outbox)),
        )
    }

    #[tokio::test]
    async fn quit_returns_while_fetches_are_stalled() {
        let dir = tempfile::tempdir().expect("tempdir");
        let session = session_with(
            StubHttpClient::default()
                .stall("chart.asp")
                .stall("search?q="),
            dir.path(),
        );
        let mut out = Vec::new();

        tokio::time::timeout(
            Duration::from_secs(2),
            drive(session, "quit\n".as_bytes(), &mut out),
        )
        .await
        .expect("quit must not wait on stalled fetches")
        .expect("session should end cleanly");
    }

    #[tokio::test]
    async fn send_requests_compact_presentation() {
        let dir = tempfile::tempdir().expect("tempdir");
        let session = session_with(
            StubHttpClient::default()
                .respond("chart.asp", Ok(HttpResponse::ok(png_bytes(4, 3)))),
            dir.path(),
        );
        let mut out = Vec::new();

        drive(session, "search MSFT\nsend\n".as_bytes(), &mut out)
            .await
            .expect("session should end cleanly");

        let printed = String::from_utf8(out).expect("utf8");
        assert_eq!(printed, "presentation: Compact\n");
    }

    #[tokio::test]
    async fn cancel_and_show_reply_on_output() {
        let dir = tempfile::tempdir().expect("tempdir");
        let session = session_with(StubHttpClient::default().stall("chart.asp"), dir.path());
        let mut out = Vec::new();

        drive(session, "cancel\nshow\nbogus\nquit\n".as_bytes(), &mut out)
            .await
            .expect("session should end cleanly");

        let printed = String::from_utf8(out).expect("utf8");
        let mut lines = printed.lines();
        assert!(lines
            .next()
            .is_some_and(|line| line.starts_with("cancelled ") && line.ends_with(" fetch(es)")));
        assert!(lines.next().is_some_and(|line| line.ends_with("chart: (none)")));
    }

    #[test]
    fn unknown_words_are_command_errors() {
        let error = parse_line("hourly").expect_err("must fail");
        assert!(error.to_string().contains("unknown command 'hourly'"));
    }
}
