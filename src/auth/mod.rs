//! OAuth2 client-credentials authentication.
//!
//! The token exchange runs at most once per client instance. Its outcome,
//! success or failure, is memoized in a [`tokio::sync::OnceCell`], so any
//! number of concurrent fetches converge on a single POST to the token
//! endpoint and observe the same result. Tokens are never refreshed; their
//! lifetime is the client instance's lifetime.

use std::fmt;
use std::sync::Mutex;

use serde::Deserialize;
use tokio::sync::OnceCell;
use tracing::{debug, instrument, Span};
use url::Url;

use crate::error::{AuthError, ConfigError};

/// Environment variable holding the OAuth2 client id.
pub const ENV_CLIENT_ID: &str = "SKROUTZ_CLIENT_ID";
/// Environment variable holding the OAuth2 client secret.
pub const ENV_CLIENT_SECRET: &str = "SKROUTZ_CLIENT_SECRET";

/// OAuth2 client credentials.
///
/// Both fields must be non-empty; emptiness is a configuration error
/// caught at construction, before any network call.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    client_id: String,
    client_secret: String,
}

impl Credentials {
    /// Creates credentials from a client id and secret.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::MissingCredentials`] if either field is empty.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let client_id = client_id.into();
        let client_secret = client_secret.into();
        if client_id.is_empty() || client_secret.is_empty() {
            return Err(ConfigError::MissingCredentials);
        }
        Ok(Self {
            client_id,
            client_secret,
        })
    }

    /// Reads credentials from `SKROUTZ_CLIENT_ID` / `SKROUTZ_CLIENT_SECRET`.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] for an unset variable, or
    /// [`ConfigError::MissingCredentials`] for a set-but-empty one.
    pub fn from_env() -> Result<Self, ConfigError> {
        let client_id = std::env::var(ENV_CLIENT_ID).map_err(|_| ConfigError::MissingEnvVar {
            name: ENV_CLIENT_ID.to_string(),
        })?;
        let client_secret =
            std::env::var(ENV_CLIENT_SECRET).map_err(|_| ConfigError::MissingEnvVar {
                name: ENV_CLIENT_SECRET.to_string(),
            })?;
        Self::new(client_id, client_secret)
    }

    /// Returns the client id.
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub(crate) fn client_secret(&self) -> &str {
        &self.client_secret
    }
}

// The secret stays out of logs and error output.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Observer invoked once with the memoized exchange outcome.
pub(crate) type TokenObserver = Box<dyn FnOnce(&Result<String, AuthError>) + Send + 'static>;

/// One-shot, memoized token exchange.
pub(crate) struct TokenProvider {
    http: reqwest::Client,
    token_url: Url,
    credentials: Credentials,
    cell: OnceCell<Result<String, AuthError>>,
    observer: Mutex<Option<TokenObserver>>,
}

impl TokenProvider {
    pub(crate) fn new(
        http: reqwest::Client,
        token_url: Url,
        credentials: Credentials,
        observer: Option<TokenObserver>,
    ) -> Self {
        Self {
            http,
            token_url,
            credentials,
            cell: OnceCell::new(),
            observer: Mutex::new(observer),
        }
    }

    /// Returns the memoized token, performing the exchange on first use.
    ///
    /// Failures memoize too: once the exchange has failed, every later
    /// caller receives the same error without a new request.
    pub(crate) async fn token(&self) -> Result<String, AuthError> {
        self.cell
            .get_or_init(|| async {
                let outcome = self.exchange().await;
                let observer = self.observer.lock().ok().and_then(|mut slot| slot.take());
                if let Some(observer) = observer {
                    observer(&outcome);
                }
                outcome
            })
            .await
            .clone()
    }

    #[instrument(
        name = "token_exchange",
        skip(self),
        fields(
            http.method = "POST",
            http.url = %self.token_url,
            http.status_code = tracing::field::Empty,
        )
    )]
    async fn exchange(&self) -> Result<String, AuthError> {
        let form = [
            ("client_id", self.credentials.client_id()),
            ("client_secret", self.credentials.client_secret()),
            ("grant_type", "client_credentials"),
            ("scope", "public"),
        ];

        let response = self
            .http
            .post(self.token_url.clone())
            .form(&form)
            .send()
            .await
            .map_err(|e| AuthError::Transport {
                message: e.to_string(),
            })?;

        let status = response.status().as_u16();
        Span::current().record("http.status_code", status);

        if status == 401 {
            return Err(AuthError::InvalidCredentials);
        }
        if status != 200 {
            return Err(AuthError::UnexpectedStatus { status });
        }

        let raw = response.text().await.map_err(|e| AuthError::Transport {
            message: e.to_string(),
        })?;
        let payload: TokenResponse =
            serde_json::from_str(&raw).map_err(|e| AuthError::UnexpectedPayload {
                reason: e.to_string(),
            })?;

        debug!("token exchange complete");
        Ok(payload.access_token)
    }
}
