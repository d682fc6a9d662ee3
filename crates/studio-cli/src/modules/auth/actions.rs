use studio_client::{AuthManager, Credentials, LoginOutcome, Scope};

use crate::cli_args::LoginArgs;
use crate::{prompt_line, prompt_password};

pub(crate) async fn handle_login(args: LoginArgs, auth: &AuthManager) -> anyhow::Result<()> {
    let email = match args.email {
        Some(email) => email,
        None => prompt_line("Email: ")?,
    };
    if email.trim().is_empty() {
        anyhow::bail!("email is required");
    }
    let password = match args.password {
        Some(password) => password,
        None => prompt_password("Password: ")?,
    };
    let credentials = Credentials {
        email,
        password,
        remember: args.remember,
    };

    match auth.login(&credentials).await {
        LoginOutcome::Success(user) => {
            println!("Logged in as {}", user.display_name());
            Ok(())
        }
        LoginOutcome::Failure(message) => anyhow::bail!("Login failed: {message}"),
    }
}

pub(crate) async fn handle_logout(auth: &AuthManager) -> anyhow::Result<()> {
    auth.logout().await?;
    println!("Logged out");
    Ok(())
}

pub(crate) fn handle_whoami(auth: &AuthManager) -> anyhow::Result<()> {
    let Some(user) = auth.current_user()? else {
        anyhow::bail!("not logged in; run `studio login`");
    };
    println!("{}", serde_json::to_string_pretty(&user)?);
    Ok(())
}

pub(crate) fn handle_status(auth: &AuthManager) -> anyhow::Result<()> {
    match auth.api().store().token_scope()? {
        Some(Scope::Durable) => println!("authenticated (remembered)"),
        Some(Scope::Session) => println!("authenticated (this session)"),
        None => println!("not authenticated"),
    }
    Ok(())
}
