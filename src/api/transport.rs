use crate::error::Result;
use reqwest::blocking::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use std::time::Duration;

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded;charset=UTF-8";

/// Status and body of an HTTP response
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        HttpResponse {
            status,
            body: body.into(),
        }
    }
}

/// Blocking request/response function used to reach the remote API.
///
/// Both endpoints the tool talks to take a form-encoded POST with an
/// `Authorization` header, so that is the only shape supported.
pub trait Transport {
    fn post_form(&self, url: &str, authorization: &str, body: &str) -> Result<HttpResponse>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn post_form(&self, url: &str, authorization: &str, body: &str) -> Result<HttpResponse> {
        (**self).post_form(url, authorization, body)
    }
}

/// [`Transport`] backed by a blocking reqwest client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: Client,
}

impl HttpTransport {
    /// `None` disables the request timeout entirely.
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(HttpTransport { http })
    }
}

impl Transport for HttpTransport {
    fn post_form(&self, url: &str, authorization: &str, body: &str) -> Result<HttpResponse> {
        let response = self
            .http
            .post(url)
            .header(AUTHORIZATION, authorization)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(body.to_owned())
            .send()?;

        let status = response.status();
        let body = response.text()?;
        Ok(HttpResponse { status, body })
    }
}
