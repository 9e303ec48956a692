//! Layered error types for the Skroutz client.
//!
//! The error hierarchy is structured for actionable diagnostics:
//! - [`ApiError`] - Top-level error type for all client operations
//! - [`ConfigError`] - Credential and call-composition errors
//! - [`AuthError`] - Token exchange errors
//! - [`ClientError`] - HTTP client and status-classification errors
//! - [`ValidationError`] - Response body decoding errors

mod api_error;
mod auth_error;
mod client_error;
mod config_error;
mod validation_error;

pub use api_error::ApiError;
pub use auth_error::AuthError;
pub use client_error::ClientError;
pub use config_error::ConfigError;
pub use validation_error::ValidationError;
