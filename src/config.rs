use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

/// Query parameters appended to a request
pub type QueryParams = BTreeMap<String, Value>;

/// Errors in the per-request configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Endpoint must not be empty")]
    EmptyEndpoint,
}

/// Everything needed to issue one GET request.
///
/// A fresh snapshot is taken for every dispatch, so a request never sees
/// parameters change underneath it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestConfig {
    /// Path relative to the client's base URL, or an absolute URL
    pub endpoint: String,
    /// Parameters encoded into the query string
    #[serde(default)]
    pub query_params: QueryParams,
}

impl RequestConfig {
    pub fn new(
        endpoint: impl Into<String>,
        query_params: QueryParams,
    ) -> Result<Self, ConfigError> {
        let endpoint = endpoint.into();
        if endpoint.trim().is_empty() {
            return Err(ConfigError::EmptyEndpoint);
        }
        Ok(Self {
            endpoint,
            query_params,
        })
    }
}

/// Construction parameters for [`ReqwestClient`](crate::ReqwestClient)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Prefix for relative endpoints
    pub base_url: Option<String>,
    /// Headers sent with every request
    pub headers: BTreeMap<String, String>,
}

impl ClientConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}
