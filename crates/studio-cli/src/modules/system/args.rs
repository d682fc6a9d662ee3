use clap::{ArgAction, Args, Subcommand};

use super::types::DurableStore;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    #[command(about = "Print the current configuration")]
    Show,
    #[command(about = "Set the default API base URL")]
    SetAddr(SetAddrArgs),
    #[command(about = "Choose where remembered tokens are kept")]
    SetDurableStore(SetDurableStoreArgs),
    #[command(about = "Toggle debug logging")]
    SetDebug(SetDebugArgs),
}

#[derive(Args)]
pub struct SetAddrArgs {
    #[arg(help = "API base URL")]
    pub addr: String,
}

#[derive(Args)]
pub struct SetDurableStoreArgs {
    #[arg(value_enum)]
    pub store: DurableStore,
}

#[derive(Args)]
pub struct SetDebugArgs {
    #[arg(action = ArgAction::Set)]
    pub enabled: bool,
}
