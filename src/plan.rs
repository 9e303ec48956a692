use url::form_urlencoded;

use crate::error::ClientError;
use crate::resource::Resource;

/// One step of a chained call: a segment name and an optional path argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSegment {
    /// Resource or sub-resource name.
    pub name: String,
    /// Optional path argument (an id or slug), appended after the name.
    pub arg: Option<String>,
}

/// Cache validator for conditional requests.
/// At most one per call; the two kinds are mutually exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheValidator {
    /// Sent as `If-None-Match`.
    Etag(String),
    /// Sent as `If-Modified-Since`.
    LastModified(String),
}

/// Immutable snapshot of one composed call.
///
/// Captured from the builder's pending state when `fetch()` is invoked and
/// reduced to exactly one HTTP request. The snapshot is a private copy:
/// chaining further calls on the builder cannot touch an in-flight plan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallPlan {
    pub(crate) segments: Vec<CallSegment>,
    pub(crate) params: Option<Vec<(String, String)>>,
    pub(crate) validator: Option<CacheValidator>,
}

impl CallPlan {
    /// Builds the request path (and query string) for this plan.
    ///
    /// The first segment must name a registered [`Resource`]; its base path
    /// starts the URL. The first segment's argument and every subsequent
    /// segment are appended as `component/`, so each appended component ends
    /// with a trailing `/`. When query parameters are present the trailing
    /// `/` is dropped and replaced by the encoded query string.
    pub(crate) fn request_path(&self) -> Result<String, ClientError> {
        let (first, rest) = match self.segments.split_first() {
            Some(split) => split,
            None => return Err(ClientError::EmptyCall),
        };
        let resource = Resource::resolve(&first.name).ok_or_else(|| {
            ClientError::UndefinedResource {
                name: first.name.clone(),
            }
        })?;

        let mut path = resource.base_path().to_string();
        if let Some(arg) = &first.arg {
            path.push('/');
            path.push_str(arg);
            path.push('/');
        }
        for segment in rest {
            if !path.ends_with('/') {
                path.push('/');
            }
            path.push_str(&segment.name);
            path.push('/');
            if let Some(arg) = &segment.arg {
                path.push_str(arg);
                path.push('/');
            }
        }

        if let Some(params) = &self.params {
            let query = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(params.iter().map(|(k, v)| (k.as_str(), v.as_str())))
                .finish();
            if path.ends_with('/') {
                path.pop();
            }
            path.push('?');
            path.push_str(&query);
        }

        Ok(path)
    }
}

// --- Unit Tests ---
