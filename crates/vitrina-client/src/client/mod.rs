//! HTTP client for the storefront API.

mod admin;
mod storefront;

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;

use vitrina_core::AppConfig;

use crate::error::ClientError;

/// Client for the storefront REST API.
///
/// Non-2xx responses are mapped to typed errors: 404 to
/// [`ClientError::NotFound`], 401/403 to [`ClientError::Unauthorized`], and
/// everything else to [`ClientError::UnexpectedStatus`]. Nothing is retried;
/// a failed call is reported once and the caller decides whether to try again.
pub struct ApiClient {
    client: Client,
    base_url: Url,
    admin_token: Option<String>,
}

impl ApiClient {
    /// Creates a client rooted at `base_url` (e.g. `https://api.example.com`
    /// or `https://example.com/api`). Endpoint paths such as `v1/products`
    /// are appended to it.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ClientError::InvalidBaseUrl`] if
    /// `base_url` is not an absolute http(s) URL.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Normalise to exactly one trailing slash so endpoint segments are
        // appended to the base path instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| ClientError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() || !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: "expected an absolute http(s) URL".to_owned(),
            });
        }

        Ok(Self {
            client,
            base_url: parsed,
            admin_token: None,
        })
    }

    /// Creates a client from application config, including the admin token
    /// when one is configured.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ClientError> {
        let client = Self::new(
            &config.api_base_url,
            config.request_timeout_secs,
            &config.user_agent,
        )?;
        Ok(match &config.admin_token {
            Some(token) => client.with_admin_token(token.clone()),
            None => client,
        })
    }

    /// Sets the bearer token used for `/v1/admin/...` endpoints.
    #[must_use]
    pub fn with_admin_token(mut self, token: impl Into<String>) -> Self {
        self.admin_token = Some(token.into());
        self
    }

    /// Builds `<base>/<segments...>`, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // The base was checked to be a hierarchical URL in `new`, so this
        // cannot fail.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Sends `request` and maps non-2xx statuses to typed errors.
    async fn send(&self, request: RequestBuilder, url: &Url) -> Result<Response, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        tracing::debug!(url = %url, status = status.as_u16(), "storefront API response");

        match status {
            StatusCode::NOT_FOUND => Err(ClientError::NotFound {
                url: url.to_string(),
            }),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ClientError::Unauthorized {
                status: status.as_u16(),
                url: url.to_string(),
            }),
            s if !s.is_success() => Err(ClientError::UnexpectedStatus {
                status: s.as_u16(),
                url: url.to_string(),
            }),
            _ => Ok(response),
        }
    }

    /// Sends `request` and parses the 2xx body as `T`.
    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        url: &Url,
        context: &str,
    ) -> Result<T, ClientError> {
        let response = self.send(request, url).await?;
        let body = response.text().await?;
        serde_json::from_str::<T>(&body).map_err(|e| ClientError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
