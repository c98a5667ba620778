use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can abort a rehydration run.
///
/// Missing posts are not errors: they are logged and skipped by the
/// reconciler.
#[derive(Debug, Error)]
pub enum RehydrateError {
    /// Credential source missing, unreadable or incomplete
    #[error("configuration error: {0}")]
    Config(String),

    /// Token endpoint answered with something other than 200
    #[error("received HTTP status {status} when requesting bearer token: {body}")]
    AuthTransport { status: StatusCode, body: String },

    /// Token endpoint handed out a token that is not a bearer token
    #[error("received OAuth token of wrong type ({})", .0.as_deref().unwrap_or("none"))]
    AuthType(Option<String>),

    #[error("token response did not contain an access_token")]
    MissingAccessToken,

    /// Lookup endpoint answered with a non-success status
    #[error("received HTTP status {status} from lookup endpoint: {body}")]
    Lookup { status: StatusCode, body: String },

    #[error("malformed response from {endpoint}: {source}")]
    MalformedResponse {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("lookup response contained a post without an integer id")]
    MissingPostId,

    /// Malformed input record; serde_json reports line and column
    #[error("failed to decode input record: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for RehydrateError {
    fn from(err: config::ConfigError) -> Self {
        RehydrateError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RehydrateError>;
