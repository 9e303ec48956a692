//! Fluent async client for the Skroutz REST API (v3.1).
//!
//! Authenticates once per client instance via the OAuth2 client-credentials
//! grant, memoizing the outcome so every fetch shares one token exchange.
//! Calls are composed with a chainable builder: a resource, optional
//! sub-resources and path arguments, optional query parameters, and an
//! optional cache validator. Each composed call becomes exactly one
//! HTTP GET with a typed outcome.
//!
//! # Quick Start
//!
//! ```no_run
//! use skroutz_client::{ApiResponse, Client, Credentials};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), skroutz_client::ApiError> {
//!     // Construction starts the token exchange in the background.
//!     let client = Client::new(Credentials::new("client-id", "client-secret")?)?;
//!
//!     // GET /skus/9783/reviews?page=2
//!     let reviews = client
//!         .call()
//!         .segment_with("Sku", 9783)
//!         .segment("reviews")
//!         .params([("page", 2)])?
//!         .fetch()
//!         .await?;
//!
//!     if let ApiResponse::Fresh { body, cache } = reviews {
//!         println!("reviews: {body}");
//!         // Replay the validator on the next call for a cheap 304.
//!         let _etag = cache.etag;
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Conditional requests
//!
//! Pass a validator from an earlier response and match on
//! [`ApiResponse::NotModified`]:
//!
//! ```no_run
//! # async fn doc(client: skroutz_client::Client) -> Result<(), skroutz_client::ApiError> {
//! let response = client
//!     .call()
//!     .segment_with("Sku", 9783)
//!     .cache_etag("\"abc\"")?
//!     .fetch()
//!     .await?;
//! if response.is_not_modified() {
//!     // the cached copy is still valid
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Errors
//!
//! Failures surface as [`ApiError`], layered by class: configuration misuse
//! fails fast at the point of the call, token exchange failures are shared
//! by every fetch on the instance, and per-call HTTP outcomes are classified
//! into statically-worded errors. Nothing is retried internally.

mod auth;
mod client;
mod error;
mod plan;
mod resource;
mod response;

pub use auth::{Credentials, ENV_CLIENT_ID, ENV_CLIENT_SECRET};
pub use client::{CallBuilder, Client, ClientBuilder};
pub use error::{ApiError, AuthError, ClientError, ConfigError, ValidationError};
pub use resource::Resource;
pub use response::{ApiResponse, CacheInfo};
