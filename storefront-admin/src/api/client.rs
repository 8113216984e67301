//! HTTP client for the storefront admin API

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::ApiError;

/// Client for the storefront admin REST API.
///
/// This client is cheap to clone (uses `Arc` internally). Paths are given as
/// segments, which are percent-encoded onto the base URL.
///
/// # Example
///
/// ```ignore
/// let client = AdminClient::builder()
///     .url("https://shop.example.com/api/admin")
///     .token("secret")
///     .timeout(Duration::from_secs(30))
///     .build()?;
///
/// let banners: Vec<Banner> = client.get(&["banners"]).await?;
/// ```
#[derive(Clone)]
pub struct AdminClient {
    inner: Arc<AdminClientInner>,
}

struct AdminClientInner {
    base_url: Url,
    token: Option<String>,
    http_client: Client,
    timeout: Option<Duration>,
}

impl AdminClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> AdminClientBuilder<Missing> {
        AdminClientBuilder::new()
    }

    /// Returns the base URL of the API.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Resolves path segments against the base URL.
    pub fn url(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.inner.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// `GET` and decode a JSON body.
    pub async fn get<R: DeserializeOwned>(&self, segments: &[&str]) -> Result<R, ApiError> {
        let body = self.send(self.request(Method::GET, segments)?).await?;
        decode(&body)
    }

    /// `POST` a JSON body and decode the response.
    pub async fn post<B, R>(&self, segments: &[&str], body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = self
            .send(self.request(Method::POST, segments)?.json(body))
            .await?;
        decode(&body)
    }

    /// `PUT` a JSON body and decode the response.
    pub async fn put<B, R>(&self, segments: &[&str], body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = self
            .send(self.request(Method::PUT, segments)?.json(body))
            .await?;
        decode(&body)
    }

    /// `PATCH` without a body and decode the response.
    pub async fn patch<R: DeserializeOwned>(&self, segments: &[&str]) -> Result<R, ApiError> {
        let body = self.send(self.request(Method::PATCH, segments)?).await?;
        decode(&body)
    }

    /// `DELETE`, ignoring any response body.
    pub async fn delete(&self, segments: &[&str]) -> Result<(), ApiError> {
        self.send(self.request(Method::DELETE, segments)?).await?;
        Ok(())
    }

    fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder, ApiError> {
        let url = self.url(segments)?;
        log::debug!("{} {}", method, url);

        let mut request = self
            .inner
            .http_client
            .request(method, url)
            .header(ACCEPT, "application/json");
        if let Some(token) = &self.inner.token {
            request = request.bearer_auth(token);
        }
        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }
        Ok(request)
    }

    async fn send(&self, request: RequestBuilder) -> Result<String, ApiError> {
        let response = request.send().await.map_err(|e| self.transport_error(e))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        if status.is_success() {
            Ok(body)
        } else {
            log::warn!("Request failed with {}: {}", status, body);
            Err(ApiError::http(status.as_u16(), error_message(status, &body)))
        }
    }

    fn transport_error(&self, error: reqwest::Error) -> ApiError {
        if error.is_timeout() {
            ApiError::Timeout(self.inner.timeout.unwrap_or_default())
        } else {
            ApiError::Network(error)
        }
    }
}

fn decode<R: DeserializeOwned>(body: &str) -> Result<R, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::parse_with_body(e.to_string(), body))
}

/// Picks the most useful message from an error response.
///
/// Prefers a JSON `message` or `error` field, then the raw body, then the
/// status reason.
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "error"] {
            if let Some(message) = value.get(key).and_then(|v| v.as_str()) {
                return message.to_string();
            }
        }
    }
    let body = body.trim();
    if !body.is_empty() {
        return body.to_string();
    }
    status
        .canonical_reason()
        .unwrap_or("Unknown error")
        .to_string()
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing an [`AdminClient`].
///
/// Uses the typestate pattern so `build` is only available once the base URL
/// has been set.
pub struct AdminClientBuilder<U> {
    url: U,
    token: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
}

impl AdminClientBuilder<Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            url: Missing,
            token: None,
            timeout: None,
            connect_timeout: None,
            http_client: None,
        }
    }

    /// Sets the API base URL.
    pub fn url(self, url: impl Into<String>) -> AdminClientBuilder<Set<String>> {
        AdminClientBuilder {
            url: Set(url.into()),
            token: self.token,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
        }
    }
}

impl Default for AdminClientBuilder<Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U> AdminClientBuilder<U> {
    /// Sets the bearer token sent with every request.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl AdminClientBuilder<Set<String>> {
    /// Builds the [`AdminClient`].
    ///
    /// Fails if the URL is not an absolute http(s) URL.
    pub fn build(self) -> Result<AdminClient, ApiError> {
        let base_url = Url::parse(&self.url.0)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", self.url.0, e)))?;
        if !matches!(base_url.scheme(), "http" | "https") || base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(self.url.0));
        }

        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = Client::builder();
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                builder.build()?
            }
        };

        Ok(AdminClient {
            inner: Arc::new(AdminClientInner {
                base_url,
                token: self.token,
                http_client,
                timeout: self.timeout,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(url: &str) -> AdminClient {
        AdminClient::builder().url(url).build().unwrap()
    }

    #[test]
    fn test_url_joins_segments() {
        let c = client("https://shop.example.com/api/admin");
        assert_eq!(
            c.url(&["banners", "b1", "toggle"]).unwrap().as_str(),
            "https://shop.example.com/api/admin/banners/b1/toggle"
        );
        let c = client("https://shop.example.com/api/admin/");
        assert_eq!(
            c.url(&["banners"]).unwrap().as_str(),
            "https://shop.example.com/api/admin/banners"
        );
    }

    #[test]
    fn test_url_encodes_ids() {
        let c = client("http://localhost:8080");
        assert_eq!(
            c.url(&["products", "a b/c"]).unwrap().as_str(),
            "http://localhost:8080/products/a%20b%2Fc"
        );
    }

    #[test]
    fn test_rejects_bad_urls() {
        assert!(matches!(
            AdminClient::builder().url("not a url").build(),
            Err(ApiError::InvalidUrl(_))
        ));
        assert!(matches!(
            AdminClient::builder().url("ftp://example.com").build(),
            Err(ApiError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_error_message() {
        assert_eq!(
            error_message(StatusCode::BAD_REQUEST, r#"{"message": "Code already exists"}"#),
            "Code already exists"
        );
        assert_eq!(
            error_message(StatusCode::BAD_GATEWAY, "upstream down\n"),
            "upstream down"
        );
        assert_eq!(error_message(StatusCode::NOT_FOUND, ""), "Not Found");
    }
}
