/// HTTP client and status-classification errors for resource calls.
///
/// Each classified status carries a fixed message identifying the
/// condition; anything outside the classified set surfaces as
/// [`UnexpectedStatus`](ClientError::UnexpectedStatus) with the code.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// `fetch()` was called before any segment was added.
    #[error("fetch() called before any resource segment was added")]
    EmptyCall,

    /// The first segment does not name a registered resource.
    /// No request is issued.
    #[error("undefined resource {name:?} called")]
    UndefinedResource {
        /// The unrecognized first-segment name.
        name: String,
    },

    /// Request URL could not be assembled.
    #[error("invalid request URL: {0}")]
    Connection(String),

    /// A required parameter is missing or incorrect.
    #[error("error 400: bad request; a required parameter is missing or incorrect")]
    BadRequest,

    /// The bearer token was rejected.
    #[error("error 401: invalid client credentials")]
    InvalidCredentials,

    /// Access forbidden; usually the API rate limit.
    #[error("error 403: access forbidden; was the API rate limit reached?")]
    Forbidden,

    /// The resource does not exist.
    #[error("error 404: not found; the resource does not exist")]
    NotFound,

    /// Something is broken on the server side.
    #[error("error 500: internal server error")]
    InternalServerError,

    /// The requested action is not implemented.
    #[error("error 501: not implemented; the requested action is not implemented")]
    NotImplemented,

    /// A status outside the classified set.
    #[error("unexpected HTTP response code: {status}")]
    UnexpectedStatus {
        /// The status code the API returned.
        status: u16,
    },

    /// Transport-level failure, propagated from the HTTP client.
    #[error("transport error")]
    Request(#[from] reqwest::Error),
}
