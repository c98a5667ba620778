use crate::api::auth::BearerToken;
use crate::api::transport::Transport;
use crate::api::Endpoints;
use crate::error::{RehydrateError, Result};
use crate::hydrate::DehydratedRecord;
use serde_json::Value;
use tracing::debug;

/// Form body for one lookup call: the batch ids, comma-joined in batch
/// order, preceded by `tweet_mode=extended` unless in compatibility mode.
pub fn lookup_body(batch: &[DehydratedRecord], compat_mode: bool) -> String {
    let ids = batch
        .iter()
        .map(|record| record.id.to_string())
        .collect::<Vec<_>>()
        .join(",");

    if compat_mode {
        format!("id={}", ids)
    } else {
        format!("tweet_mode=extended&id={}", ids)
    }
}

/// Fetch the full posts for one batch.
///
/// The response comes back in arbitrary order and omits posts that no
/// longer exist or are not visible; callers match by id.
pub fn lookup_posts<T: Transport + ?Sized>(
    transport: &T,
    endpoints: &Endpoints,
    token: &BearerToken,
    batch: &[DehydratedRecord],
    compat_mode: bool,
) -> Result<Vec<Value>> {
    let response = transport.post_form(
        &endpoints.lookup_url,
        &token.authorization(),
        &lookup_body(batch, compat_mode),
    )?;

    if !response.status.is_success() {
        return Err(RehydrateError::Lookup {
            status: response.status,
            body: response.body,
        });
    }

    let posts: Vec<Value> = serde_json::from_str(&response.body).map_err(|source| {
        RehydrateError::MalformedResponse {
            endpoint: "lookup endpoint",
            source,
        }
    })?;

    debug!(requested = batch.len(), returned = posts.len(), "lookup complete");
    Ok(posts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::transport::HttpResponse;
    use reqwest::StatusCode;
    use serde_json::json;
    use std::cell::RefCell;

    struct LookupEndpoint {
        response: HttpResponse,
        requests: RefCell<Vec<(String, String, String)>>,
    }

    impl LookupEndpoint {
        fn new(status: StatusCode, body: &str) -> Self {
            LookupEndpoint {
                response: HttpResponse::new(status, body),
                requests: RefCell::new(Vec::new()),
            }
        }
    }

    impl Transport for LookupEndpoint {
        fn post_form(&self, url: &str, authorization: &str, body: &str) -> Result<HttpResponse> {
            self.requests
                .borrow_mut()
                .push((url.to_string(), authorization.to_string(), body.to_string()));
            Ok(self.response.clone())
        }
    }

    fn batch(ids: &[u64]) -> Vec<DehydratedRecord> {
        ids.iter().copied().map(DehydratedRecord::new).collect()
    }

    #[test]
    fn test_lookup_body() {
        assert_eq!(lookup_body(&batch(&[3, 1, 2]), false), "tweet_mode=extended&id=3,1,2");
        assert_eq!(lookup_body(&batch(&[3, 1, 2]), true), "id=3,1,2");
        assert_eq!(lookup_body(&batch(&[42]), true), "id=42");
    }

    #[test]
    fn test_lookup_request() {
        let transport = LookupEndpoint::new(StatusCode::OK, r#"[{"id": 2}, {"id": 1}]"#);
        let endpoints = Endpoints::new("https://api.example.com/");

        let posts = lookup_posts(
            &transport,
            &endpoints,
            &BearerToken::new("tok"),
            &batch(&[1, 2, 3]),
            false,
        )
        .unwrap();

        assert_eq!(posts, vec![json!({"id": 2}), json!({"id": 1})]);

        let requests = transport.requests.borrow();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].0, "https://api.example.com/1.1/statuses/lookup.json");
        assert_eq!(requests[0].1, "Bearer tok");
        assert_eq!(requests[0].2, "tweet_mode=extended&id=1,2,3");
    }

    #[test]
    fn test_error_status() {
        let transport = LookupEndpoint::new(StatusCode::TOO_MANY_REQUESTS, "rate limited");
        let err = lookup_posts(
            &transport,
            &Endpoints::default(),
            &BearerToken::new("tok"),
            &batch(&[1]),
            false,
        )
        .unwrap_err();

        assert!(matches!(err, RehydrateError::Lookup { ref body, .. } if body == "rate limited"));
    }

    #[test]
    fn test_malformed_body() {
        let transport = LookupEndpoint::new(StatusCode::OK, r#"{"errors": []}"#);
        let err = lookup_posts(
            &transport,
            &Endpoints::default(),
            &BearerToken::new("tok"),
            &batch(&[1]),
            true,
        )
        .unwrap_err();

        assert!(matches!(err, RehydrateError::MalformedResponse { .. }));
    }
}
