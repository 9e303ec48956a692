//! The chainable call builder.
//!
//! Every composed call is an ordered list of segments (a resource, then
//! sub-resources, each with an optional path argument), at most one query
//! parameter set, and at most one cache validator. `fetch()` snapshots the
//! accumulated state into an immutable [`CallPlan`] and resets the builder,
//! so one builder can be reused for any number of independent calls.

use std::future::Future;
use std::mem;
use std::sync::Arc;

use crate::client::{executor, ClientInner};
use crate::error::{ApiError, ConfigError};
use crate::plan::{CacheValidator, CallPlan, CallSegment};
use crate::response::ApiResponse;

/// Accumulates one composed API call.
///
/// Setters that can be misused (`params`, `cache_etag`, `cache_modified`)
/// fail fast at the point of misuse rather than at fetch time.
///
/// ## Examples
///
/// ```rust,ignore
/// let reviews = client
///     .call()
///     .segment_with("Sku", 9783)
///     .segment("reviews")
///     .params([("page", 2)])?
///     .fetch()
///     .await?;
/// ```
pub struct CallBuilder {
    inner: Arc<ClientInner>,
    pending: CallPlan,
}

impl std::fmt::Debug for CallBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallBuilder")
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

impl CallBuilder {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self {
            inner,
            pending: CallPlan::default(),
        }
    }

    /// Appends a path segment without an argument.
    ///
    /// The first segment must name a registered resource; this is checked
    /// when the plan executes, not here.
    pub fn segment(&mut self, name: impl Into<String>) -> &mut Self {
        self.pending.segments.push(CallSegment {
            name: name.into(),
            arg: None,
        });
        self
    }

    /// Appends a path segment with an argument (an id or slug).
    pub fn segment_with(&mut self, name: impl Into<String>, arg: impl ToString) -> &mut Self {
        self.pending.segments.push(CallSegment {
            name: name.into(),
            arg: Some(arg.to_string()),
        });
        self
    }

    /// Sets the query parameters for this call. Pairs keep insertion order.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::ParamsAlreadySet`] on a second call before
    /// `fetch()`.
    pub fn params<K, V>(
        &mut self,
        pairs: impl IntoIterator<Item = (K, V)>,
    ) -> Result<&mut Self, ApiError>
    where
        K: Into<String>,
        V: ToString,
    {
        if self.pending.params.is_some() {
            return Err(ConfigError::ParamsAlreadySet.into());
        }
        self.pending.params = Some(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.to_string()))
                .collect(),
        );
        Ok(self)
    }

    /// Sets an ETag validator, sent as `If-None-Match`.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::ValidatorAlreadySet`] if any validator is
    /// already set on this call.
    pub fn cache_etag(&mut self, etag: impl Into<String>) -> Result<&mut Self, ApiError> {
        if self.pending.validator.is_some() {
            return Err(ConfigError::ValidatorAlreadySet.into());
        }
        self.pending.validator = Some(CacheValidator::Etag(etag.into()));
        Ok(self)
    }

    /// Sets a Last-Modified validator, sent as `If-Modified-Since`.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::ValidatorAlreadySet`] if any validator is
    /// already set on this call.
    pub fn cache_modified(
        &mut self,
        last_modified: impl Into<String>,
    ) -> Result<&mut Self, ApiError> {
        if self.pending.validator.is_some() {
            return Err(ConfigError::ValidatorAlreadySet.into());
        }
        self.pending.validator = Some(CacheValidator::LastModified(last_modified.into()));
        Ok(self)
    }

    /// Submits the composed call as one HTTP GET.
    ///
    /// The pending state is snapshotted and cleared synchronously, before
    /// the returned future first suspends: the in-flight plan is a private
    /// copy, and the builder is immediately reusable for a new, independent
    /// call. The future awaits the client's memoized token, then executes
    /// the plan.
    pub fn fetch(&mut self) -> impl Future<Output = Result<ApiResponse, ApiError>> + Send + 'static {
        let plan = mem::take(&mut self.pending);
        let inner = Arc::clone(&self.inner);
        async move {
            let token = inner.tokens.token().await?;
            executor::execute(&inner, &plan, &token).await
        }
    }

    #[cfg(test)]
    pub(crate) fn pending(&self) -> &CallPlan {
        &self.pending
    }
}

// --- Unit Tests ---
