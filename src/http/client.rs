//! Graph API client core
//!
//! Turns a logical call into an authenticated HTTP exchange:
//! - Resolves endpoints against `{base_url}/{api_version}/`
//! - Attaches the access token to every request
//! - Classifies error envelopes into typed failures
//! - Retries rate-limited calls after the server's `Retry-After`

use super::envelope::interpret;
use super::retry::RetryPolicy;
use super::throttle::Throttle;
use crate::config::{ClientConfig, Credentials};
use crate::error::Result;
use crate::types::{Method, ParamValue, Params};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

/// Name of the query parameter carrying the access token
pub const ACCESS_TOKEN_PARAM: &str = "access_token";

/// A logical request before authentication is applied
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApiRequest {
    /// HTTP verb
    pub method: Method,
    /// Relative path or fully-qualified URL
    pub endpoint: String,
    /// Query parameters
    pub query: Params,
    /// Form body parameters (POST only; DELETE sends them as query)
    pub body: Params,
}

impl ApiRequest {
    /// Create a request for the given method and endpoint
    pub fn new(method: Method, endpoint: impl Into<String>) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            query: Params::new(),
            body: Params::new(),
        }
    }

    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(Method::GET, endpoint)
    }

    pub fn post(endpoint: impl Into<String>) -> Self {
        Self::new(Method::POST, endpoint)
    }

    pub fn delete(endpoint: impl Into<String>) -> Self {
        Self::new(Method::DELETE, endpoint)
    }

    /// Replace the query parameters
    #[must_use]
    pub fn with_query(mut self, query: Params) -> Self {
        self.query = query;
        self
    }

    /// Replace the body parameters
    #[must_use]
    pub fn with_body(mut self, body: Params) -> Self {
        self.body = body;
        self
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.query.insert(key, value);
        self
    }

    /// Add a body parameter
    #[must_use]
    pub fn form(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.body.insert(key, value);
        self
    }
}

/// Client for the ThreatExchange Graph API
///
/// One pooled connection set is shared by every call. The client is
/// `Send + Sync`; independent calls and traversals may run concurrently.
pub struct ThreatExchangeClient {
    http: Client,
    credentials: Credentials,
    config: ClientConfig,
    retry: RetryPolicy,
    throttle: Option<Throttle>,
}

impl ThreatExchangeClient {
    /// Create a client with default configuration
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_config(credentials, ClientConfig::default())
    }

    /// Create a client with custom configuration
    pub fn with_config(credentials: Credentials, config: ClientConfig) -> Result<Self> {
        credentials.validate()?;
        config.validate()?;

        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        let retry = RetryPolicy::new(config.retry_on_rate_limit, config.max_retries);
        let throttle = config.throttle.as_ref().map(Throttle::new);

        Ok(Self {
            http,
            credentials,
            config,
            retry,
            throttle,
        })
    }

    /// Release the connection pool
    ///
    /// Dropping the client has the same effect; this makes the release
    /// point explicit.
    pub fn close(self) {
        debug!("Closing ThreatExchange client");
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// `{base_url}/{api_version}`
    pub fn base_api_url(&self) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.api_version.trim_matches('/')
        )
    }

    /// Resolve an endpoint to an absolute URL
    pub fn build_url(&self, endpoint: &str) -> String {
        if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            return endpoint.to_string();
        }
        format!("{}/{}", self.base_api_url(), endpoint.trim_start_matches('/'))
    }

    /// Make a GET request
    pub async fn get(&self, endpoint: &str, params: Params) -> Result<Value> {
        self.execute(&ApiRequest::get(endpoint).with_query(params))
            .await
    }

    /// Make a POST request with form parameters
    pub async fn post(&self, endpoint: &str, data: Params) -> Result<Value> {
        self.execute(&ApiRequest::post(endpoint).with_body(data))
            .await
    }

    /// Make a DELETE request
    pub async fn delete(&self, endpoint: &str, params: Params) -> Result<Value> {
        self.execute(&ApiRequest::delete(endpoint).with_query(params))
            .await
    }

    /// Execute a logical call, retrying rate-limited attempts
    ///
    /// The retry budget is local to this call. Each attempt gets a fresh
    /// timeout window. The wait between attempts suspends the caller.
    pub async fn execute(&self, request: &ApiRequest) -> Result<Value> {
        let mut retry_count = 0;

        loop {
            match self.send(request).await {
                Err(err) => match self.retry.backoff(retry_count, &err) {
                    Some(wait) => {
                        warn!(
                            "Rate limited ({}), retry {}/{}, waiting {}s",
                            err,
                            retry_count + 1,
                            self.retry.max_retries,
                            wait.as_secs()
                        );
                        tokio::time::sleep(wait).await;
                        retry_count += 1;
                    }
                    None => return Err(err),
                },
                ok => return ok,
            }
        }
    }

    /// Perform one HTTP attempt and interpret the response
    async fn send(&self, request: &ApiRequest) -> Result<Value> {
        self.acquire_permit().await;

        let url = self.build_url(&request.endpoint);
        let mut params = request.query.clone();
        params.insert(ACCESS_TOKEN_PARAM, self.credentials.access_token());

        let mut req = self
            .http
            .request(request.method.into(), &url)
            .timeout(self.config.timeout);

        req = match request.method {
            Method::GET => req.query(&params.to_pairs()),
            Method::POST => {
                let mut form = params;
                form.merge(&request.body);
                req.query(&[(ACCESS_TOKEN_PARAM, self.credentials.access_token())])
                    .form(&form.to_pairs())
            }
            Method::DELETE => {
                params.merge(&request.body);
                params.insert(ACCESS_TOKEN_PARAM, self.credentials.access_token());
                req.query(&params.to_pairs())
            }
        };

        debug!("{} {}", request.method, url);
        let response = req.send().await?;
        interpret(response).await
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    /// Wait on the client-side throttle, if one is configured
    pub(crate) async fn acquire_permit(&self) {
        if let Some(ref throttle) = self.throttle {
            throttle.acquire().await;
        }
    }

    /// Check whether client-side throttling is enabled
    pub fn has_throttle(&self) -> bool {
        self.throttle.is_some()
    }
}

impl std::fmt::Debug for ThreatExchangeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThreatExchangeClient")
            .field("credentials", &self.credentials)
            .field("config", &self.config)
            .field("has_throttle", &self.throttle.is_some())
            .finish_non_exhaustive()
    }
}
