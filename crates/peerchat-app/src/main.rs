use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tokio::sync::mpsc;

use peerchat_api::{ChatApi, RestClient};
use peerchat_client::{ChatController, TokenStore};

mod cli;
mod repl;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if let Some(shell) = cli.generate {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
        return Ok(());
    }

    let token_path = match &cli.token_file {
        Some(path) => path.clone(),
        None => TokenStore::default_path().context("Failed to resolve the default token path")?,
    };

    let api: Arc<dyn ChatApi> = Arc::new(RestClient::new(&cli.server).with_verbose(cli.verbose));
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let controller = ChatController::new(api, TokenStore::at(token_path)).with_events(events_tx);

    repl::run(controller, events_rx, &cli.server).await
}
