/// Response body decoding errors.
///
/// Kept distinct from HTTP-level errors: a 200 with an undecodable body is
/// a different failure class than a classified status.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// The 200 response body was not valid JSON.
    #[error("invalid JSON in response body")]
    JsonParse(#[from] serde_json::Error),
}
