use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use serde::de::DeserializeOwned;
use yansi::Paint;

use crate::config::Config;
use crate::error::ApiError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Read-only client for the Clever Cloud product catalog.
///
/// Credentials come from the [`Config`] handed to [`CatalogClient::new`];
/// nothing is read from the environment here.
pub struct CatalogClient {
    client: reqwest::Client,
    config: Config,
    trace_requests: bool,
}

impl CatalogClient {
    pub fn new(config: Config) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.api_token))
            .map_err(|e| ApiError::InvalidToken(e.to_string()))?;
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("cc-plans-lister/", env!("CARGO_PKG_VERSION"))),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            client,
            config,
            trace_requests: false,
        })
    }

    /// Print each request as an equivalent curl command on stderr.
    pub fn with_request_trace(mut self, enabled: bool) -> Self {
        self.trace_requests = enabled;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.config.api_base_url
    }

    pub fn request_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.config.api_base_url, endpoint)
    }

    /// GET `endpoint` and decode its JSON body.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        let url = self.request_url(endpoint);
        if self.trace_requests {
            eprintln!("Request:\n{}", curl_line("GET", &url));
        }
        tracing::debug!(%url, "GET");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%url, status = status.as_u16(), "catalog request failed");
            return Err(ApiError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        tracing::debug!(%url, bytes = bytes.len(), "response received");

        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        })
    }
}

/// Render a request as a colorized curl command. The token is never shown.
pub fn curl_line(method: &str, url: &str) -> String {
    let parts = [
        Paint::new("curl").fg(yansi::Color::Green).bold().to_string(),
        format!("-X {}", Paint::new(method).fg(yansi::Color::Yellow).bold()),
        format!("'{}'", Paint::new(url).fg(yansi::Color::Cyan)),
        format!(
            "{} {}",
            Paint::new("-H").fg(yansi::Color::Magenta),
            Paint::new("'Authorization: Bearer ***'").fg(yansi::Color::Magenta)
        ),
    ];
    parts.join(" ")
}
