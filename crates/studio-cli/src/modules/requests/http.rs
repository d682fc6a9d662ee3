use reqwest::header::{HeaderName, HeaderValue};
use studio_client::{ApiResponse, ResponseBody};

pub(crate) fn parse_header(raw: &str) -> anyhow::Result<(HeaderName, HeaderValue)> {
    let Some((name, value)) = raw.split_once(':') else {
        anyhow::bail!("invalid header (expected NAME:VALUE): {raw}");
    };
    let name = HeaderName::from_bytes(name.trim().as_bytes())
        .map_err(|err| anyhow::anyhow!("invalid header name '{}': {err}", name.trim()))?;
    let value = HeaderValue::from_str(value.trim())?;
    Ok((name, value))
}

pub(crate) fn parse_param(raw: &str) -> anyhow::Result<(String, String)> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => anyhow::bail!("invalid query parameter (expected KEY=VALUE): {raw}"),
    }
}

pub(crate) fn append_params(url: &mut String, params: Vec<(String, String)>) {
    if params.is_empty() {
        return;
    }
    let query = params
        .into_iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(&key),
                urlencoding::encode(&value)
            )
        })
        .collect::<Vec<String>>()
        .join("&");
    url.push(if url.contains('?') { '&' } else { '?' });
    url.push_str(&query);
}

pub(crate) fn print_response(response: &ApiResponse) -> anyhow::Result<()> {
    match &response.data {
        ResponseBody::Json(value) => println!("{}", serde_json::to_string_pretty(value)?),
        ResponseBody::Text(text) if text.is_empty() => {}
        ResponseBody::Text(text) => println!("{text}"),
    }
    Ok(())
}
