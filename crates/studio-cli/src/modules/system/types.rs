use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Default, Debug)]
pub struct CliConfig {
    #[serde(default)]
    pub addr: Option<String>,
    #[serde(default)]
    pub durable_store: DurableStore,
    #[serde(default)]
    pub debug: bool,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DurableStore {
    /// Owner-only JSON file under `~/.agent-studio`. Works without a running
    /// secret service, e.g. on headless hosts.
    #[default]
    File,
    Keyring,
}
