use super::{AuthError, ClientError, ConfigError, ValidationError};

/// Top-level error type for all client operations.
///
/// Wraps the layer-specific errors so callers can match on the failure
/// class without losing the underlying detail.
///
/// ## Examples
///
/// ```rust,ignore
/// match client.call().segment("Nonexistent").fetch().await {
///     Err(ApiError::Client(ClientError::UndefinedResource { name })) => {
///         eprintln!("unknown resource: {name}");
///     }
///     other => { /* ... */ }
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Credential or call-composition error; raised before any request.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Token exchange error; shared by every fetch on the client instance.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// HTTP client, transport, or status-classification error.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Response body decoding error.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
