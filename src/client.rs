use anyhow::Result;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Url;
use serde_json::Value;
use thiserror::Error;

use crate::config::{ClientConfig, QueryParams};

/// An HTTP client able to issue a GET request with query parameters.
///
/// The body must come back already decoded into JSON. Implementations decide
/// on timeouts, authentication and any other transport policy.
#[async_trait(?Send)]
pub trait HttpClient {
    async fn get(&self, endpoint: &str, params: &QueryParams) -> Result<Value>;
}

/// Errors raised by [`ReqwestClient`] on top of transport errors
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("Relative endpoint without a base URL: {0}")]
    InvalidEndpoint(String),
    #[error("Invalid header: {0}")]
    InvalidHeader(String),
    #[error("Failed to build HTTP client: {0}")]
    Build(String),
    #[error("Request failed with status {0}")]
    Status(u16),
    #[error("Expected a JSON object or array, found {0}")]
    UnexpectedPayload(&'static str),
}

/// [`HttpClient`] backed by `reqwest`, usable natively and in the browser.
#[derive(Debug, Clone, Default)]
pub struct ReqwestClient {
    client: reqwest::Client,
    base_url: Option<Url>,
}

impl ReqwestClient {
    /// A client without base URL or default headers
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a client with a base URL and default headers
    ///
    /// # Arguments
    ///
    /// * `config` - Base URL and headers to apply to every request
    ///
    /// # Returns
    ///
    /// * `Result<Self, FetchError>` - The client, or the first invalid setting
    pub fn from_config(config: &ClientConfig) -> Result<Self, FetchError> {
        let base_url = config
            .base_url
            .as_deref()
            .map(|base| {
                Url::parse(base).map_err(|_| FetchError::InvalidBaseUrl(base.to_string()))
            })
            .transpose()?;

        let mut headers = HeaderMap::new();
        for (name, value) in &config.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| FetchError::InvalidHeader(name.clone()))?;
            let header_value =
                HeaderValue::from_str(value).map_err(|_| FetchError::InvalidHeader(name.clone()))?;
            headers.insert(header_name, header_value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| FetchError::Build(e.to_string()))?;

        Ok(Self { client, base_url })
    }
}

#[async_trait(?Send)]
impl HttpClient for ReqwestClient {
    async fn get(&self, endpoint: &str, params: &QueryParams) -> Result<Value> {
        let url = resolve_url(self.base_url.as_ref(), endpoint)?;

        let response = self
            .client
            .get(url)
            .query(&encode_query(params))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()).into());
        }

        match response.json::<Value>().await? {
            body @ (Value::Object(_) | Value::Array(_)) => Ok(body),
            other => Err(FetchError::UnexpectedPayload(kind_of(&other)).into()),
        }
    }
}

/// Joins an endpoint onto the base URL.
///
/// Absolute endpoints win over the base. Otherwise exactly one `/` separates
/// the two halves.
///
/// # Arguments
///
/// * `base_url` - The client's base URL, if any
/// * `endpoint` - A path or an absolute URL
///
/// # Returns
///
/// * `Result<Url, FetchError>` - The URL to request
fn resolve_url(base_url: Option<&Url>, endpoint: &str) -> Result<Url, FetchError> {
    if let Ok(url) = Url::parse(endpoint) {
        return Ok(url);
    }

    let base = base_url.ok_or_else(|| FetchError::InvalidEndpoint(endpoint.to_string()))?;
    let joined = format!(
        "{}/{}",
        base.as_str().trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    );
    Url::parse(&joined).map_err(|_| FetchError::InvalidEndpoint(endpoint.to_string()))
}

/// Flattens JSON parameters into query string pairs.
///
/// Nulls are dropped, arrays repeat the key as `key[]` and nested objects are
/// sent as JSON text.
///
/// # Arguments
///
/// * `params` - The query parameters of a request
///
/// # Returns
///
/// * `Vec<(String, String)>` - Key/value pairs in key order
fn encode_query(params: &QueryParams) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for (key, value) in params {
        match value {
            Value::Null => {}
            Value::Array(items) => {
                let key = format!("{key}[]");
                pairs.extend(
                    items
                        .iter()
                        .filter(|item| !item.is_null())
                        .map(|item| (key.clone(), scalar_text(item))),
                );
            }
            other => pairs.push((key.clone(), scalar_text(other))),
        }
    }
    pairs
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
