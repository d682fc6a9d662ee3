use clap::{ArgAction, Parser, Subcommand};

pub use crate::modules::auth::args::*;
pub use crate::modules::requests::args::*;
pub use crate::modules::system::args::*;

#[derive(Parser)]
#[command(name = "studio")]
#[command(about = "Agent Studio CLI", version)]
pub struct Cli {
    #[arg(long, env = "AGENT_STUDIO_ADDR", help = "API base URL (e.g. https://studio.example.com/api)")]
    pub addr: Option<String>,
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
    #[arg(long, help = "Allow http:// and invalid TLS certificates")]
    pub insecure: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    #[command(about = "Sign in and store the auth token")]
    Login(LoginArgs),
    #[command(about = "Sign out and clear local auth state")]
    Logout,
    #[command(about = "Print the signed-in user")]
    Whoami,
    #[command(about = "Report whether a token is stored and where")]
    Status,
    #[command(about = "Send a request to the API and print the response")]
    Request(RequestArgs),
    Config(ConfigArgs),
}
