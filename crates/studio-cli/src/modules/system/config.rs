use std::fs;
use std::path::{Path, PathBuf};

use studio_client::{FileStorage, KeyringStorage, Storage, TokenStore, DEFAULT_API_BASE_URL};
use tracing::debug;

use super::types::{CliConfig, DurableStore};
use crate::cli_args::{ConfigArgs, ConfigCommand};

pub(crate) fn handle_config_command(
    args: ConfigArgs,
    config: &mut CliConfig,
) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => {
            println!("{}", serde_json::to_string_pretty(config)?);
        }
        ConfigCommand::SetAddr(args) => {
            let addr = args.addr.trim().trim_end_matches('/').to_string();
            if !addr.starts_with("http://") && !addr.starts_with("https://") {
                anyhow::bail!("address must start with http:// or https://");
            }
            config.addr = Some(addr);
        }
        ConfigCommand::SetDurableStore(args) => {
            config.durable_store = args.store;
        }
        ConfigCommand::SetDebug(args) => {
            config.debug = args.enabled;
        }
    }
    Ok(())
}

fn studio_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_err(|_| anyhow::anyhow!("HOME is not set"))?;
    Ok(Path::new(&home).join(".agent-studio"))
}

fn config_path() -> anyhow::Result<PathBuf> {
    Ok(studio_dir()?.join("config.json"))
}

pub(crate) fn load_config() -> anyhow::Result<CliConfig> {
    let path = config_path()?;
    if !path.exists() {
        return Ok(CliConfig::default());
    }
    let contents = fs::read_to_string(path)?;
    let config = serde_json::from_str(&contents)?;
    Ok(config)
}

pub(crate) fn save_config(config: &CliConfig) -> anyhow::Result<()> {
    let path = config_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let contents = serde_json::to_string_pretty(config)?;
    fs::write(path, contents)?;
    Ok(())
}

pub(crate) fn resolve_addr(addr_arg: Option<String>, config: &CliConfig) -> String {
    addr_arg
        .or_else(|| config.addr.clone())
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
}

pub(crate) fn ensure_secure_addr(addr: &str, allow_insecure: bool) -> anyhow::Result<()> {
    if addr.starts_with("http://") && !allow_insecure {
        anyhow::bail!("refusing to use http:// without --insecure");
    }
    Ok(())
}

pub(crate) fn open_token_store(config: &CliConfig) -> anyhow::Result<TokenStore> {
    let durable: Box<dyn Storage> = match config.durable_store {
        DurableStore::File => {
            let storage = FileStorage::durable_default()?;
            debug!(path = %storage.path().display(), "durable scope on disk");
            Box::new(storage)
        }
        DurableStore::Keyring => Box::new(KeyringStorage::default()),
    };
    let session = FileStorage::session_default();
    debug!(path = %session.path().display(), "session scope on disk");
    Ok(TokenStore::new(durable, Box::new(session)))
}
