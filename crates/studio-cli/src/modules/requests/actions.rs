use reqwest::header::HeaderMap;
use studio_client::{AuthManager, RequestOptions};
use tracing::info;

use super::http::{append_params, parse_header, parse_param, print_response};
use crate::cli_args::RequestArgs;

pub(crate) async fn handle_request(args: RequestArgs, auth: &AuthManager) -> anyhow::Result<()> {
    let body = args
        .data
        .as_deref()
        .map(|data| serde_json::from_str::<serde_json::Value>(data))
        .transpose()
        .map_err(|err| anyhow::anyhow!("--data is not valid JSON: {err}"))?;

    let mut headers = HeaderMap::new();
    for raw in &args.headers {
        let (name, value) = parse_header(raw)?;
        headers.insert(name, value);
    }
    let params = args
        .params
        .iter()
        .map(|raw| parse_param(raw))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let mut endpoint = args.endpoint;
    if !endpoint.starts_with('/') {
        endpoint.insert(0, '/');
    }
    append_params(&mut endpoint, params);

    let response = auth
        .api()
        .request(&args.method, &endpoint, body, RequestOptions { headers })
        .await?;
    info!(status = response.status, endpoint = %endpoint, "request completed");
    print_response(&response)
}
