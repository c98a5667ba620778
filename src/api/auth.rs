use crate::api::transport::Transport;
use crate::api::Endpoints;
use crate::error::{RehydrateError, Result};
use base64::Engine;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Deserialize;
use std::fmt;
use tracing::debug;

/// Characters left alone by URI component encoding
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const TOKEN_REQUEST_BODY: &str = "grant_type=client_credentials";

/// Application-only bearer token, valid for the whole run
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(access_token: impl Into<String>) -> Self {
        BearerToken(access_token.into())
    }

    /// Value for the `Authorization` header of lookup requests
    pub fn authorization(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(..)")
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token_type: Option<String>,
    access_token: Option<String>,
}

/// `Basic` authorization value for the token request: key and secret are
/// percent-encoded separately, joined by a colon and base64-encoded.
pub fn basic_credentials(consumer_key: &str, consumer_secret: &str) -> String {
    let joined = format!(
        "{}:{}",
        utf8_percent_encode(consumer_key, URI_COMPONENT),
        utf8_percent_encode(consumer_secret, URI_COMPONENT)
    );
    format!(
        "Basic {}",
        base64::engine::general_purpose::STANDARD.encode(joined)
    )
}

/// Exchange the application key and secret for a bearer token.
///
/// Makes exactly one request. Any non-200 answer or a token of another
/// type is fatal.
pub fn acquire_token<T: Transport + ?Sized>(
    transport: &T,
    endpoints: &Endpoints,
    consumer_key: &str,
    consumer_secret: &str,
) -> Result<BearerToken> {
    debug!(url = %endpoints.token_url, "requesting bearer token");

    let response = transport.post_form(
        &endpoints.token_url,
        &basic_credentials(consumer_key, consumer_secret),
        TOKEN_REQUEST_BODY,
    )?;

    if response.status != reqwest::StatusCode::OK {
        return Err(RehydrateError::AuthTransport {
            status: response.status,
            body: response.body,
        });
    }

    let token: TokenResponse = serde_json::from_str(&response.body).map_err(|source| {
        RehydrateError::MalformedResponse {
            endpoint: "token endpoint",
            source,
        }
    })?;

    if token.token_type.as_deref() != Some("bearer") {
        return Err(RehydrateError::AuthType(token.token_type));
    }

    token
        .access_token
        .map(BearerToken::new)
        .ok_or(RehydrateError::MissingAccessToken)
}
