use std::sync::Arc;
use std::time::Instant;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{ApiError, FALLBACK_ERROR_MESSAGE};
use crate::token_store::TokenStore;

const JSON_CONTENT_TYPE: &str = "application/json";

#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    Text(String),
}

impl ResponseBody {
    /// Message reported for a failed response: the JSON `error` field, then
    /// the payload itself, then a fixed fallback.
    pub fn error_message(&self) -> String {
        match self {
            ResponseBody::Json(value) => value
                .get("error")
                .filter(|error| is_truthy(error))
                .or(Some(value).filter(|value| is_truthy(value)))
                .map(value_text)
                .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string()),
            ResponseBody::Text(text) if !text.is_empty() => text.clone(),
            ResponseBody::Text(_) => FALLBACK_ERROR_MESSAGE.to_string(),
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().map_or(true, |n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub data: ResponseBody,
    pub status: u16,
}

impl ApiResponse {
    pub fn json<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        let value = match self.data {
            ResponseBody::Json(value) => value,
            ResponseBody::Text(text) => {
                return Err(ApiError::Decode {
                    message: format!("expected JSON, got text: {text}"),
                })
            }
        };
        serde_json::from_value(value).map_err(|err| ApiError::Decode {
            message: err.to_string(),
        })
    }
}

/// Per-call header overrides. They replace the defaults but never the
/// bearer header of a signed-in client.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub headers: HeaderMap,
}

impl RequestOptions {
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    debug: bool,
    store: Arc<TokenStore>,
}

impl ApiClient {
    pub fn new(http: reqwest::Client, config: &ClientConfig, store: Arc<TokenStore>) -> Self {
        Self {
            http,
            base_url: config.base_url().to_string(),
            debug: config.debug,
            store,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn store(&self) -> &TokenStore {
        &self.store
    }

    pub async fn request(
        &self,
        method: &str,
        endpoint: &str,
        body: Option<Value>,
        options: RequestOptions,
    ) -> Result<ApiResponse, ApiError> {
        let method =
            Method::from_bytes(method.to_ascii_uppercase().as_bytes()).map_err(ApiError::network)?;
        let url = format!("{}{}", self.base_url, endpoint);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        headers.extend(options.headers);
        if let Some(token) = self.store.token()? {
            let value =
                HeaderValue::from_str(&format!("Bearer {token}")).map_err(ApiError::network)?;
            headers.insert(AUTHORIZATION, value);
        }

        let mut builder = self.http.request(method.clone(), &url).headers(headers);
        if let Some(body) = body.filter(|_| carries_body(&method)) {
            let payload = serde_json::to_string(&body).map_err(ApiError::network)?;
            builder = builder.body(payload);
        }

        debug!(method = %method, url = %url, "http request");
        let start = Instant::now();
        let response = builder.send().await.map_err(ApiError::network)?;
        let status = response.status();
        debug!(
            method = %method,
            url = %url,
            status = %status,
            elapsed_ms = start.elapsed().as_millis(),
            "http response"
        );

        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map_or(false, |value| value.contains(JSON_CONTENT_TYPE));
        let text = response.text().await.map_err(ApiError::network)?;
        if self.debug {
            debug!(url = %url, body = %text, "http response body");
        }
        let data = if is_json {
            ResponseBody::Json(serde_json::from_str(&text).map_err(ApiError::network)?)
        } else {
            ResponseBody::Text(text)
        };

        if !status.is_success() {
            return Err(ApiError::Http {
                status: status.as_u16(),
                message: data.error_message(),
            });
        }

        Ok(ApiResponse {
            data,
            status: status.as_u16(),
        })
    }

    pub async fn get(&self, endpoint: &str) -> Result<ApiResponse, ApiError> {
        self.request("GET", endpoint, None, RequestOptions::default()).await
    }

    pub async fn post<T: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        data: Option<&T>,
    ) -> Result<ApiResponse, ApiError> {
        let body = data.map(to_body).transpose()?;
        self.request("POST", endpoint, body, RequestOptions::default()).await
    }

    pub async fn put<T: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        data: &T,
    ) -> Result<ApiResponse, ApiError> {
        let body = to_body(data)?;
        self.request("PUT", endpoint, Some(body), RequestOptions::default()).await
    }

    pub async fn patch<T: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        data: &T,
    ) -> Result<ApiResponse, ApiError> {
        let body = to_body(data)?;
        self.request("PATCH", endpoint, Some(body), RequestOptions::default()).await
    }

    pub async fn delete(&self, endpoint: &str) -> Result<ApiResponse, ApiError> {
        self.request("DELETE", endpoint, None, RequestOptions::default()).await
    }
}

fn carries_body(method: &Method) -> bool {
    matches!(*method, Method::POST | Method::PUT | Method::PATCH)
}

fn to_body<T: Serialize + ?Sized>(data: &T) -> Result<Value, ApiError> {
    serde_json::to_value(data).map_err(ApiError::network)
}
