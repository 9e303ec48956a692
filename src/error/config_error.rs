/// Credential and call-composition errors.
///
/// These fail fast: they are returned at the point of misuse, before any
/// request is issued, and are never retryable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// One or both credential fields were empty.
    #[error("wrong or missing credentials: client_id and client_secret must both be non-empty")]
    MissingCredentials,

    /// A credential environment variable was not set.
    #[error("environment variable {name} is not set")]
    MissingEnvVar {
        /// The variable that was looked up.
        name: String,
    },

    /// `params()` was called twice on one API call.
    #[error("multiple params() calls on one API call; pass a single parameter set")]
    ParamsAlreadySet,

    /// Both cache validators were set on one API call, or one of them twice.
    #[error("cache_etag() and cache_modified() are mutually exclusive; set one validator per API call")]
    ValidatorAlreadySet,
}
