// src/page/fetch.rs
// =============================================================================
// This module downloads pages for the crawler.
//
// The crawler never talks to reqwest directly. It only knows the Transport
// trait: "give me a URL, I give you the page text or a FetchError". This lets
// the crawl engine be tested with in-memory pages, and keeps every network
// failure local to the page that caused it.
//
// Key functionality:
// - One shared reqwest Client (connection pooling)
// - 10 second timeout per request, at most 5 redirects
// - Only http:// and https:// are fetched
// - Non-2xx responses are failures
//
// Rust concepts:
// - Traits: A shared interface with more than one implementation
// - async-trait: Async methods in traits that can live behind Arc<dyn ...>
// - thiserror: Deriving std::error::Error for our own enum
// =============================================================================

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;
use url::Url;

// Identifies us to the servers we crawl
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

// Why a single page could not be fetched
//
// None of these stop the crawl; the page is simply skipped.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Only http and https URLs can be fetched
    #[error("unsupported scheme `{0}`")]
    UnsupportedScheme(String),
    /// The server answered, but not with 2xx
    #[error("HTTP {0}")]
    Status(StatusCode),
    /// The request took longer than the per-request timeout
    #[error("request timed out")]
    Timeout,
    /// DNS failure, refused connection, TLS handshake failure...
    #[error("connection failed: {0}")]
    Connect(String),
    /// Anything else reqwest reports (bad body, redirect loop, ...)
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
}

// Anything that can turn a URL into page text
//
// Send + Sync is required because one transport is shared by all workers.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<String, FetchError>;
}

// The real network transport, built on reqwest
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    // Creates the transport with its shared HTTP client
    //
    // Returns: Err only if the TLS backend cannot be initialised
    pub fn new() -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10)) // 10 second timeout per request
            .redirect(reqwest::redirect::Policy::limited(5)) // Follow up to 5 redirects
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        if !matches!(url.scheme(), "http" | "https") {
            return Err(FetchError::UnsupportedScheme(url.scheme().to_string()));
        }

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(categorize_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        // text() decodes using the charset from Content-Type, defaulting to
        // UTF-8; invalid sequences become U+FFFD instead of failing the page
        response.text().await.map_err(categorize_error)
    }
}

// Sorts reqwest errors into the cases worth telling apart in the logs
fn categorize_error(error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout
    } else if error.is_connect() {
        FetchError::Connect(error.to_string())
    } else {
        FetchError::Http(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_fetch_returns_page_text() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/index.html"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<p>0xFF -></p>"))
            .mount(&server)
            .await;

        let transport = HttpTransport::new().unwrap();
        let url = Url::parse(&format!("{}/index.html", server.uri())).unwrap();
        let body = transport.fetch(&url).await.unwrap();

        assert_eq!(body, "<p>0xFF -></p>");
    }

    #[tokio::test]
    async fn test_fetch_not_found_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let transport = HttpTransport::new().unwrap();
        let url = Url::parse(&format!("{}/missing", server.uri())).unwrap();
        let result = transport.fetch(&url).await;

        assert!(matches!(result, Err(FetchError::Status(status)) if status == StatusCode::NOT_FOUND));
    }

    #[tokio::test]
    async fn test_fetch_rejects_other_schemes() {
        let transport = HttpTransport::new().unwrap();
        let url = Url::parse("ftp://example.com/file.txt").unwrap();
        let result = transport.fetch(&url).await;

        match result {
            Err(FetchError::UnsupportedScheme(scheme)) => assert_eq!(scheme, "ftp"),
            other => panic!("expected UnsupportedScheme, got {:?}", other),
        }
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(FetchError::Status(StatusCode::GONE).to_string(), "HTTP 410 Gone");
        assert_eq!(FetchError::Timeout.to_string(), "request timed out");
    }
}
