/// Errors from the OAuth2 client-credentials exchange.
///
/// The exchange runs at most once per client instance and its outcome is
/// memoized, so this type is `Clone`: every fetch that depends on a failed
/// exchange receives the same value. Transport failures are captured as
/// their display text for the same reason.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// The token endpoint answered 401.
    #[error("error 401: invalid client credentials")]
    InvalidCredentials,

    /// The token endpoint answered something other than 200 or 401.
    #[error("unexpected HTTP response from token endpoint: {status}")]
    UnexpectedStatus {
        /// The status code the token endpoint returned.
        status: u16,
    },

    /// The token endpoint answered 200 but the body was not a JSON object
    /// carrying an `access_token` field.
    #[error("unexpected data from token endpoint: {reason}")]
    UnexpectedPayload {
        /// What the decoder rejected.
        reason: String,
    },

    /// The token request never completed.
    #[error("token request failed: {message}")]
    Transport {
        /// Display text of the underlying transport error.
        message: String,
    },
}
