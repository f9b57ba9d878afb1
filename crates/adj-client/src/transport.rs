//! Shared HTTP plumbing: URL construction and status normalization.

use std::time::Duration;

use serde::de::DeserializeOwned;
use url::Url;

use crate::config::{ClientConfig, ConfigError};
use crate::error::ApiError;

/// Thin wrapper around a `reqwest::Client` bound to the backend base URL.
#[derive(Debug, Clone)]
pub(crate) struct Transport {
    http: reqwest::Client,
    base_url: Url,
}

impl Transport {
    pub(crate) fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        if config.base_url.cannot_be_a_base() {
            return Err(ConfigError::InvalidUrl(
                config.base_url.to_string(),
                "base URL cannot carry a path".into(),
            )
            .into());
        }
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build().map_err(|e| ApiError::Transport {
            endpoint: "client_init".into(),
            source: e,
        })?;
        Ok(Self {
            http,
            base_url: config.base_url.clone(),
        })
    }

    /// Append `segments` to the base URL path, keeping any base path prefix.
    ///
    /// Each segment is percent-encoded, so an identifier containing `/`,
    /// `?`, or `#` stays a single path segment. A trailing `""` segment
    /// produces a trailing slash.
    pub(crate) fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub(crate) fn get(&self, segments: &[&str]) -> reqwest::RequestBuilder {
        self.http.get(self.url(segments))
    }

    pub(crate) fn post(&self, segments: &[&str]) -> reqwest::RequestBuilder {
        self.http.post(self.url(segments))
    }

    /// Send `request` and decode a 2xx JSON body.
    ///
    /// Non-2xx responses become [`ApiError::Status`] carrying the raw body
    /// and, when the body is JSON, its decoded form.
    pub(crate) async fn execute<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let resp = request.send().await.map_err(|e| ApiError::Transport {
            endpoint: endpoint.to_string(),
            source: e,
        })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            let detail = serde_json::from_str(&body).ok();
            return Err(ApiError::Status {
                endpoint: endpoint.to_string(),
                status,
                body,
                detail,
            });
        }

        resp.json().await.map_err(|e| ApiError::Deserialization {
            endpoint: endpoint.to_string(),
            source: e,
        })
    }
}
