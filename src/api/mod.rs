//! Remote API access: bearer token exchange and batched post lookup.

pub mod transport;
pub mod auth;
pub mod lookup;

pub use transport::{HttpResponse, HttpTransport, Transport, FORM_CONTENT_TYPE};
pub use auth::{acquire_token, basic_credentials, BearerToken};
pub use lookup::{lookup_body, lookup_posts};

pub const API_BASE: &str = "https://api.twitter.com";

/// URLs of the two endpoints the tool calls
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub token_url: String,
    pub lookup_url: String,
}

impl Endpoints {
    pub fn new(api_base: &str) -> Self {
        let base = api_base.trim_end_matches('/');
        Endpoints {
            token_url: format!("{}/oauth2/token", base),
            lookup_url: format!("{}/1.1/statuses/lookup.json", base),
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Endpoints::new(API_BASE)
    }
}
