//! Response handling module.
//!
//! This module provides the [`ApiResponse`] outcome type for composed calls
//! and the [`CacheInfo`] validators the API attaches to fresh bodies.

use serde_json::Value;

/// Cache validators returned by the API alongside a fresh body.
///
/// Feed these back into the builder's `cache_etag()` / `cache_modified()`
/// on a later call to get a cheap 304 when nothing changed. The client
/// never persists them; pass-through only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheInfo {
    /// Value of the `etag` response header, when present.
    pub etag: Option<String>,
    /// Value of the `last-modified` response header, when present.
    pub last_modified: Option<String>,
}

/// Outcome of one composed API call.
///
/// ## Examples
///
/// ```rust,ignore
/// match client.call().segment_with("Sku", 9783).fetch().await? {
///     ApiResponse::NotModified => println!("cached copy still valid"),
///     ApiResponse::Fresh { body, cache } => {
///         println!("sku: {body}");
///         if let Some(etag) = cache.etag {
///             // remember for the next conditional call
///         }
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    /// The server answered 304; the caller's cached copy is still valid.
    NotModified,
    /// A fresh 200 body plus any cache validators the server attached.
    Fresh {
        /// Decoded JSON response body.
        body: Value,
        /// Validators extracted from the response headers.
        cache: CacheInfo,
    },
}

impl ApiResponse {
    /// Returns `true` for the 304 outcome.
    pub fn is_not_modified(&self) -> bool {
        matches!(self, Self::NotModified)
    }

    /// Returns the decoded body, or `None` for the 304 outcome.
    pub fn body(&self) -> Option<&Value> {
        match self {
            Self::Fresh { body, .. } => Some(body),
            Self::NotModified => None,
        }
    }

    /// Returns the attached cache validators, or `None` for the 304 outcome.
    pub fn cache(&self) -> Option<&CacheInfo> {
        match self {
            Self::Fresh { cache, .. } => Some(cache),
            Self::NotModified => None,
        }
    }
}
