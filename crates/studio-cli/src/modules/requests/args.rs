use clap::Args;

#[derive(Args)]
pub struct RequestArgs {
    #[arg(help = "HTTP method (GET, POST, PUT, PATCH, DELETE)")]
    pub method: String,
    #[arg(help = "Endpoint relative to the API base (e.g. /agents/list)")]
    pub endpoint: String,
    #[arg(long, help = "JSON request body")]
    pub data: Option<String>,
    #[arg(long = "header", value_name = "NAME:VALUE")]
    pub headers: Vec<String>,
    #[arg(long = "param", value_name = "KEY=VALUE")]
    pub params: Vec<String>,
}
