use thiserror::Error;

/// Failures talking to the storefront API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("not found: {url}")]
    NotFound { url: String },

    /// 401 or 403 from an admin endpoint.
    #[error("unauthorized ({status}) for {url}")]
    Unauthorized { status: u16, url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid API base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    #[error("admin token is not configured (set VITRINA_ADMIN_TOKEN)")]
    MissingAdminToken,
}
