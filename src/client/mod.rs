//! Client construction and the chained call surface.
//!
//! This module provides the [`Client`] struct plus its [`ClientBuilder`],
//! wrapping `reqwest::Client` with the fixed Skroutz hosts, a uniform
//! request timeout, and the eagerly-started token exchange.

mod call;
mod executor;

pub use call::CallBuilder;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::auth::{Credentials, TokenObserver, TokenProvider};
use crate::error::{ApiError, AuthError, ClientError};

/// Default API host.
const DEFAULT_API_BASE: &str = "https://api.skroutz.gr";
/// Default OAuth2 token endpoint.
const DEFAULT_TOKEN_URL: &str = "https://www.skroutz.gr/oauth2/token";
/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Fixed `Accept` header naming the vendor media type and API version.
pub(crate) const ACCEPT_MEDIA_TYPE: &str = "application/vnd.skroutz+json; version=3.1";
/// User-Agent string for the client.
pub(crate) const USER_AGENT: &str = concat!("skroutz-client/", env!("CARGO_PKG_VERSION"));

/// Builder for configuring a [`Client`].
pub struct ClientBuilder {
    credentials: Credentials,
    api_base: Option<Url>,
    token_url: Option<Url>,
    timeout: Duration,
    on_token: Option<TokenObserver>,
}

impl ClientBuilder {
    fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            api_base: None,
            token_url: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            on_token: None,
        }
    }

    /// Sets the request timeout, applied uniformly by the transport.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Overrides the API host requests are issued against.
    pub fn api_base(mut self, url: Url) -> Self {
        self.api_base = Some(url);
        self
    }

    /// Overrides the OAuth2 token endpoint.
    pub fn token_url(mut self, url: Url) -> Self {
        self.token_url = Some(url);
        self
    }

    /// Registers an observer invoked exactly once with the memoized token
    /// exchange outcome.
    ///
    /// Purely an observability hook; fetches await the memoized value
    /// directly and never depend on it.
    pub fn on_token(
        mut self,
        observer: impl FnOnce(&Result<String, AuthError>) + Send + 'static,
    ) -> Self {
        self.on_token = Some(Box::new(observer));
        self
    }

    /// Builds the [`Client`] and starts the token exchange.
    ///
    /// The exchange is fire-and-forget: when a Tokio runtime is already
    /// running it begins immediately in the background; otherwise the first
    /// `fetch()` triggers it. Either way the outcome is memoized and shared.
    ///
    /// ## Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn build(self) -> Result<Client, ApiError> {
        let api_base = match self.api_base {
            Some(url) => url,
            None => parse_fixed_url(DEFAULT_API_BASE)?,
        };
        let token_url = match self.token_url {
            Some(url) => url,
            None => parse_fixed_url(DEFAULT_TOKEN_URL)?,
        };

        let http = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(ClientError::Request)?;

        let inner = Arc::new(ClientInner {
            api_base,
            tokens: TokenProvider::new(http.clone(), token_url, self.credentials, self.on_token),
            http,
        });

        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            let eager = Arc::clone(&inner);
            handle.spawn(async move {
                let _ = eager.tokens.token().await;
            });
        }

        Ok(Client { inner })
    }
}

impl fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("credentials", &self.credentials)
            .field("api_base", &self.api_base)
            .field("token_url", &self.token_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

pub(crate) struct ClientInner {
    pub(crate) http: reqwest::Client,
    pub(crate) api_base: Url,
    pub(crate) tokens: TokenProvider,
}

/// Async client for the Skroutz REST API.
///
/// Construction validates credentials and fires the one-shot token
/// exchange; [`call()`](Client::call) starts a chainable call.
///
/// ## Examples
///
/// ```rust,ignore
/// use skroutz_client::{Client, Credentials};
///
/// let client = Client::new(Credentials::new("id", "secret")?)?;
/// let sku = client
///     .call()
///     .segment_with("Sku", 9783)
///     .fetch()
///     .await?;
/// ```
#[derive(Clone)]
pub struct Client {
    pub(crate) inner: Arc<ClientInner>,
}

impl Client {
    /// Creates a new client with default settings.
    pub fn new(credentials: Credentials) -> Result<Self, ApiError> {
        Self::builder(credentials).build()
    }

    /// Creates a new builder for configuring a client.
    pub fn builder(credentials: Credentials) -> ClientBuilder {
        ClientBuilder::new(credentials)
    }

    /// Starts a fresh chainable call.
    pub fn call(&self) -> CallBuilder {
        CallBuilder::new(Arc::clone(&self.inner))
    }

    /// Returns the API host requests are issued against.
    pub fn api_base(&self) -> &Url {
        &self.inner.api_base
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("api_base", &self.inner.api_base)
            .finish_non_exhaustive()
    }
}

fn parse_fixed_url(raw: &'static str) -> Result<Url, ApiError> {
    Url::parse(raw)
        .map_err(|e| ClientError::Connection(format!("invalid base URL {raw:?}: {e}")).into())
}
