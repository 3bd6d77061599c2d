//! HTTP transport
//!
//! The [`Transport`] trait is the seam between the [`Twitter`](crate::Twitter)
//! client and the network. It sends a GET or POST with a set of string
//! parameters and hands back the raw response body. Implementations must
//! classify failures (see [`classify_status`]) before returning them: the
//! client's control flow depends on telling a 403 apart from a 404 or a
//! dropped connection.
//!
//! [`HttpTransport`] is the production implementation, built on `reqwest`
//! with HTTP basic authentication. Swap it out for another authentication
//! scheme, or for a scripted transport in tests.

use crate::error::{classify_status, Result, TwitterError};
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

// =============================================================================
// Request Types
// =============================================================================

/// HTTP method used by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// GET request; parameters go in the query string
    Get,
    /// POST request; parameters go URL-encoded in the body
    Post,
}

impl HttpMethod {
    /// Method name as sent on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// Ordered string parameters for a request
///
/// Keys are unique: setting an existing key replaces its value in place, so
/// the original insertion order is kept. Values are URL-encoded by the
/// transport, never by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    pairs: Vec<(String, String)>,
}

impl Params {
    /// Create an empty parameter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter, replacing any previous value for the key
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.pairs.push((key, value)),
        }
    }

    /// Builder form of [`Params::set`]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Get a parameter value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    /// Number of parameters
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether there are no parameters
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterate over `(key, value)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The pairs as a slice, ready for `reqwest`'s query/form encoders
    pub fn as_slice(&self) -> &[(String, String)] {
        &self.pairs
    }
}

/// Username and password for HTTP basic authentication
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Screen name of the authenticating user
    pub username: String,
    /// Account password
    pub password: String,
}

impl Credentials {
    /// Create credentials
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Whether both halves are present
    pub fn can_authenticate(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

// =============================================================================
// Transport Trait
// =============================================================================

/// Capability interface for talking to the API over HTTP
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Whether this transport holds usable credentials
    fn can_authenticate(&self) -> bool;

    /// Send a GET request, appending `params` as the query string
    ///
    /// When `authenticate` is false no credentials are sent, even if
    /// configured.
    async fn get(&self, uri: &str, params: &Params, authenticate: bool) -> Result<String>;

    /// Send a POST request with `params` URL-encoded in the body
    async fn post(&self, uri: &str, params: &Params, authenticate: bool) -> Result<String>;
}

// =============================================================================
// Client Configuration
// =============================================================================

/// Default I/O deadline for one round trip
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for [`HttpTransport`]
#[derive(Debug, Clone)]
pub struct HttpTransportConfig {
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
    /// Credentials for authenticated requests
    pub credentials: Option<Credentials>,
    /// Custom headers to include in all requests
    pub default_headers: HashMap<String, String>,
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("fringuello/{}", env!("CARGO_PKG_VERSION")),
            credentials: None,
            default_headers: HashMap::new(),
        }
    }
}

impl HttpTransportConfig {
    /// Create a config with default settings and no credentials
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the credentials
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.credentials = Some(Credentials::new(username, password));
        self
    }

    /// Add a default header
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }
}

// =============================================================================
// HTTP Transport Implementation
// =============================================================================

/// `reqwest`-backed transport using HTTP basic authentication
///
/// # Examples
/// ```
/// use twitter_client::transport::{HttpTransport, HttpTransportConfig, Transport};
///
/// let config = HttpTransportConfig::new().with_credentials("alice", "secret");
/// let transport = HttpTransport::new(config).unwrap();
/// assert!(transport.can_authenticate());
/// ```
#[derive(Debug, Clone)]
pub struct HttpTransport {
    /// HTTP client
    client: ReqwestClient,
    /// Configuration
    config: HttpTransportConfig,
}

impl HttpTransport {
    /// Create a new transport
    pub fn new(config: HttpTransportConfig) -> Result<Self> {
        let client = ReqwestClient::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| TwitterError::transport("Failed to build HTTP client", e))?;

        Ok(Self { client, config })
    }

    /// Get the transport configuration
    pub fn config(&self) -> &HttpTransportConfig {
        &self.config
    }

    /// Execute a request and classify the outcome
    async fn execute_request(
        &self,
        method: HttpMethod,
        uri: &str,
        params: &Params,
        authenticate: bool,
    ) -> Result<String> {
        let mut req = match method {
            HttpMethod::Get => self.client.get(uri).query(params.as_slice()),
            HttpMethod::Post => self.client.post(uri).form(params.as_slice()),
        };

        for (key, value) in &self.config.default_headers {
            req = req.header(key, value);
        }

        if authenticate {
            match &self.config.credentials {
                Some(creds) if creds.can_authenticate() => {
                    req = req.basic_auth(&creds.username, Some(&creds.password));
                }
                _ => warn!(uri, "authentication requested but no credentials configured"),
            }
        }

        debug!(
            method = method.as_str(),
            uri,
            params = params.len(),
            authenticate,
            "sending request"
        );

        let response = req.send().await.map_err(|e| {
            TwitterError::transport(format!("An error occurred accessing page {uri}"), e)
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            TwitterError::transport(format!("Failed to read response from {uri}"), e)
        })?;

        if !status.is_success() {
            let error = classify_status(status.as_u16(), &body, uri);
            debug!(status = status.as_u16(), kind = ?error.kind(), uri, "request failed");
            return Err(error);
        }

        Ok(body)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    fn can_authenticate(&self) -> bool {
        self.config.credentials.as_ref().is_some_and(Credentials::can_authenticate)
    }

    async fn get(&self, uri: &str, params: &Params, authenticate: bool) -> Result<String> {
        self.execute_request(HttpMethod::Get, uri, params, authenticate).await
    }

    async fn post(&self, uri: &str, params: &Params, authenticate: bool) -> Result<String> {
        self.execute_request(HttpMethod::Post, uri, params, authenticate).await
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_keep_insertion_order() {
        let params = Params::new().with("status", "hi").with("source", "app").with("page", "1");
        let keys: Vec<&str> = params.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["status", "source", "page"]);
    }

    #[test]
    fn test_params_set_replaces_in_place() {
        let mut params = Params::new().with("since_id", "5").with("page", "1");
        params.set("since_id", "9");
        assert_eq!(params.len(), 2);
        assert_eq!(params.get("since_id"), Some("9"));
        assert_eq!(params.iter().next(), Some(("since_id", "9")));
    }

    #[test]
    fn test_params_empty() {
        let params = Params::new();
        assert!(params.is_empty());
        assert_eq!(params.get("a"), None);
        assert!(!Params::new().with("a", "1").is_empty());
    }

    #[test]
    fn test_credentials_can_authenticate() {
        assert!(Credentials::new("alice", "secret").can_authenticate());
        assert!(!Credentials::new("alice", "").can_authenticate());
        assert!(!Credentials::new("", "secret").can_authenticate());
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let debug = format!("{:?}", Credentials::new("alice", "hunter2"));
        assert!(debug.contains("alice"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_config_default() {
        let config = HttpTransportConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert!(config.user_agent.starts_with("fringuello/"));
        assert!(config.credentials.is_none());
    }

    #[test]
    fn test_config_builder() {
        let config = HttpTransportConfig::new()
            .with_timeout(Duration::from_secs(60))
            .with_user_agent("CustomAgent/1.0")
            .with_credentials("alice", "secret")
            .with_header("X-Custom", "value");

        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.user_agent, "CustomAgent/1.0");
        assert_eq!(config.credentials, Some(Credentials::new("alice", "secret")));
        assert_eq!(config.default_headers.get("X-Custom"), Some(&"value".to_string()));
    }

    #[test]
    fn test_transport_can_authenticate() {
        let anonymous = HttpTransport::new(HttpTransportConfig::new()).unwrap();
        assert!(!anonymous.can_authenticate());

        let half =
            HttpTransport::new(HttpTransportConfig::new().with_credentials("alice", "")).unwrap();
        assert!(!half.can_authenticate());

        let full =
            HttpTransport::new(HttpTransportConfig::new().with_credentials("alice", "pw")).unwrap();
        assert!(full.can_authenticate());
        assert_eq!(full.config().credentials.as_ref().unwrap().username, "alice");
    }

    #[test]
    fn test_http_method_as_str() {
        assert_eq!(HttpMethod::Get.as_str(), "GET");
        assert_eq!(HttpMethod::Post.as_str(), "POST");
    }
}
