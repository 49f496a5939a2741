use clap::Parser;
use hacktoberfest_client::{BrowserAuthorizer, OAuthConfig, OctocrabClient, TokenCache};
use hacktoberfest_config::{AppConfig, LoadedConfig};
use std::process::ExitCode;

mod cli;
mod query;
mod report;

use cli::Cli;
use query::SearchQuery;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Load .env before the logger so RUST_LOG can come from it
    let dotenv = dotenvy::dotenv();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    match dotenv {
        Ok(path) => log::debug!("Loaded .env file from: {:?}", path),
        Err(_) => log::debug!(".env file not found, will rely on environment variables"),
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{:#}", err);
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let LoadedConfig { config, source } = AppConfig::load(cli.config.as_deref())?;
    if let Some(path) = source {
        println!("Using config file: {}", path.display());
    }

    let oauth = OAuthConfig::new(
        config.client_id.clone(),
        config.client_secret.clone(),
        config.callback_port,
    );
    let cache = TokenCache::new(hacktoberfest_config::token_path()?);
    let credential = cache.obtain(&BrowserAuthorizer::new(oauth)).await?;
    let client = OctocrabClient::from_credential(&credential)?;

    let query = SearchQuery::new(&config.author, &config.created).with_state(&cli.state);
    report::run_report(&client, &query, &mut std::io::stdout()).await?;

    Ok(())
}
