use studio_client::AuthManager;

use crate::cli_args::*;
use crate::modules::auth::{handle_login, handle_logout, handle_status, handle_whoami};
use crate::modules::requests::handle_request;

pub(crate) async fn handle_command(command: Command, auth: &AuthManager) -> anyhow::Result<()> {
    match command {
        Command::Login(args) => handle_login(args, auth).await?,
        Command::Logout => handle_logout(auth).await?,
        Command::Whoami => handle_whoami(auth)?,
        Command::Status => handle_status(auth)?,
        Command::Request(args) => handle_request(args, auth).await?,
        Command::Config(_) => unreachable!(),
    }

    Ok(())
}
