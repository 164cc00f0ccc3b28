mod chart;
mod related;
mod session;

use std::process::ExitCode;
use std::sync::Arc;

use stockchart_core::{Endpoints, HttpClient, ReqwestHttpClient, SessionConfig};

use crate::cli::{Cli, Command};
use crate::error::CliError;

/// Exit code for a command that completed but left nothing to show.
pub const NO_UPDATE: u8 = 3;

pub async fn run(cli: &Cli) -> Result<ExitCode, CliError> {
    let http_client = http_client(cli)?;
    let config = session_config(cli);
    let mut stdout = std::io::stdout();

    match &cli.command {
        Command::Chart(args) => {
            chart::run(args, &config, http_client, cli.pretty, &mut stdout).await
        }
        Command::Related(args) => related::run(args, &config, http_client, &mut stdout).await,
        Command::Session(args) => session::run(args, config, http_client).await,
    }
}

fn http_client(cli: &Cli) -> Result<Arc<dyn HttpClient>, CliError> {
    let client = match cli.user_agent.as_deref() {
        Some(user_agent) => ReqwestHttpClient::with_user_agent(user_agent)
            .map_err(|error| CliError::Command(format!("invalid --user-agent: {error}")))?,
        None => ReqwestHttpClient::new(),
    };
    Ok(Arc::new(client))
}

fn session_config(cli: &Cli) -> SessionConfig {
    SessionConfig::default()
        .with_endpoints(Endpoints {
            chart: cli.chart_endpoint.clone(),
            search: cli.search_endpoint.clone(),
        })
        .with_timeout_ms(cli.timeout_ms)
}
