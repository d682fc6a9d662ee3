use clap::Args;

#[derive(Args)]
pub struct LoginArgs {
    #[arg(long, help = "Account email (prompted when omitted)")]
    pub email: Option<String>,
    #[arg(long, env = "AGENT_STUDIO_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
    #[arg(long, help = "Keep the token across sessions")]
    pub remember: bool,
}
