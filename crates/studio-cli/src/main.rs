use clap::Parser;
use std::io::{self, Write};
use std::sync::Arc;

mod cli_args;
mod cli_command;
mod modules;
mod terminal;

use crate::cli_args::*;
use crate::cli_command::handle_command;
use crate::modules::system::{
    ensure_secure_addr, handle_config_command, load_config, open_token_store, resolve_addr,
    save_config,
};
use crate::terminal::{TerminalNavigator, TerminalNotifier};
use studio_client::{ApiClient, ApiError, AuthManager, ClientConfig, SessionGuard};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = load_config()?;
    init_logging(cli.verbose, config.debug)?;

    let command = match cli.command {
        Command::Config(args) => {
            handle_config_command(args, &mut config)?;
            save_config(&config)?;
            return Ok(());
        }
        command => command,
    };

    let addr = resolve_addr(cli.addr, &config);
    ensure_secure_addr(&addr, cli.insecure)?;
    let client = reqwest::Client::builder()
        .danger_accept_invalid_certs(cli.insecure)
        .build()?;
    let client_config = ClientConfig {
        api_base_url: addr,
        debug: config.debug,
    };
    let store = Arc::new(open_token_store(&config)?);
    let auth = AuthManager::new(
        ApiClient::new(client, &client_config, store),
        Box::new(TerminalNavigator),
    );

    let result = handle_command(command, &auth).await;
    if let Err(err) = &result {
        if let Some(api_err) = err.downcast_ref::<ApiError>() {
            SessionGuard::new(&auth, &TerminalNotifier)
                .handle_unhandled(api_err)
                .await?;
        }
    }
    result
}

fn init_logging(verbosity: u8, debug: bool) -> anyhow::Result<()> {
    let filter = match verbosity {
        _ if debug => "debug",
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(filter)?)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
    Ok(())
}

pub(crate) fn prompt_line(prompt: &str) -> anyhow::Result<String> {
    let mut input = String::new();
    print!("{prompt}");
    io::stdout().flush()?;
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

pub(crate) fn prompt_password(prompt: &str) -> anyhow::Result<String> {
    print!("{prompt}");
    io::stdout().flush()?;
    let password = rpassword::read_password()?;
    if password.trim().is_empty() {
        anyhow::bail!("password is required");
    }
    Ok(password)
}
