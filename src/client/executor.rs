//! Request execution with tracing instrumentation.
//!
//! Reduces an immutable [`CallPlan`] plus a bearer token to exactly one
//! HTTP GET and classifies the response into a typed outcome.

use reqwest::header::{HeaderMap, ACCEPT, ETAG, IF_MODIFIED_SINCE, IF_NONE_MATCH, LAST_MODIFIED};
use tracing::{instrument, Span};

use crate::client::{ClientInner, ACCEPT_MEDIA_TYPE};
use crate::error::{ApiError, ClientError, ValidationError};
use crate::plan::{CacheValidator, CallPlan};
use crate::response::{ApiResponse, CacheInfo};

/// Executes one snapshot against the API.
///
/// The plan's first segment is validated against the resource registry
/// before anything goes on the wire; an unknown name never issues a
/// request.
#[instrument(
    name = "api_request",
    skip(inner, plan, token),
    fields(
        http.method = "GET",
        http.url = tracing::field::Empty,
        http.status_code = tracing::field::Empty,
        otel.kind = "client",
        otel.status_code = tracing::field::Empty,
    )
)]
pub(crate) async fn execute(
    inner: &ClientInner,
    plan: &CallPlan,
    token: &str,
) -> Result<ApiResponse, ApiError> {
    let path = plan.request_path()?;
    let url = inner
        .api_base
        .join(&path)
        .map_err(|e| ClientError::Connection(format!("invalid URL: {e}")))?;

    Span::current().record("http.url", url.as_str());

    let mut request = inner
        .http
        .get(url)
        .header(ACCEPT, ACCEPT_MEDIA_TYPE)
        .bearer_auth(token);
    match &plan.validator {
        Some(CacheValidator::Etag(etag)) => {
            request = request.header(IF_NONE_MATCH, etag);
        }
        Some(CacheValidator::LastModified(stamp)) => {
            request = request.header(IF_MODIFIED_SINCE, stamp);
        }
        None => {}
    }

    let response = request.send().await.map_err(ClientError::Request)?;
    let status = response.status().as_u16();
    Span::current().record("http.status_code", status);

    match status {
        200 => {
            Span::current().record("otel.status_code", "OK");
            let cache = cache_info(response.headers());
            let raw = response.text().await.map_err(ClientError::Request)?;
            let body = serde_json::from_str(&raw).map_err(ValidationError::JsonParse)?;
            Ok(ApiResponse::Fresh { body, cache })
        }
        304 => {
            Span::current().record("otel.status_code", "OK");
            Ok(ApiResponse::NotModified)
        }
        status => {
            let otel_status = if (500..600).contains(&status) {
                "ERROR"
            } else {
                "UNSET"
            };
            Span::current().record("otel.status_code", otel_status);
            Err(classify_status(status).into())
        }
    }
}

/// Maps a non-200/304 status to its classified error.
fn classify_status(status: u16) -> ClientError {
    match status {
        400 => ClientError::BadRequest,
        401 => ClientError::InvalidCredentials,
        403 => ClientError::Forbidden,
        404 => ClientError::NotFound,
        500 => ClientError::InternalServerError,
        501 => ClientError::NotImplemented,
        status => ClientError::UnexpectedStatus { status },
    }
}

fn cache_info(headers: &HeaderMap) -> CacheInfo {
    let header_text = |name| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
    };
    CacheInfo {
        etag: header_text(ETAG),
        last_modified: header_text(LAST_MODIFIED),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Credentials;
    use crate::client::Client;
    use crate::plan::CallSegment;
    use url::Url;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(server: &MockServer) -> Client {
        let base = Url::parse(&server.uri()).unwrap();
        let token_url = Url::parse(&format!("{}/oauth2/token", server.uri())).unwrap();
        Client::builder(Credentials::new("id", "secret").unwrap())
            .api_base(base)
            .token_url(token_url)
            .build()
            .unwrap()
    }

    fn plan(segments: &[(&str, Option<&str>)]) -> CallPlan {
        CallPlan {
            segments: segments
                .iter()
                .map(|(name, arg)| CallSegment {
                    name: name.to_string(),
                    arg: arg.map(str::to_string),
                })
                .collect(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_fresh_body_with_cache_headers() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/skus/9783/"))
            .and(header("accept", ACCEPT_MEDIA_TYPE))
            .and(header("authorization", "Bearer test-token"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "sku": { "id": 9783 } }))
                    .insert_header("etag", "\"abc\"")
                    .insert_header("last-modified", "Tue, 25 May 2021 07:28:00 GMT"),
            )
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let plan = plan(&[("Sku", Some("9783"))]);
        let response = execute(&client.inner, &plan, "test-token").await.unwrap();

        match response {
            ApiResponse::Fresh { body, cache } => {
                assert_eq!(body["sku"]["id"], 9783);
                assert_eq!(cache.etag.as_deref(), Some("\"abc\""));
                assert_eq!(
                    cache.last_modified.as_deref(),
                    Some("Tue, 25 May 2021 07:28:00 GMT")
                );
            }
            other => panic!("expected fresh body, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_cache_headers_leave_info_empty() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/categories"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "categories": [] })),
            )
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let plan = plan(&[("Category", None)]);
        let response = execute(&client.inner, &plan, "test-token").await.unwrap();

        let cache = response.cache().unwrap();
        assert_eq!(cache.etag, None);
        assert_eq!(cache.last_modified, None);
    }

    #[tokio::test]
    async fn test_etag_validator_sent_and_304_classified() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/skus/9783/"))
            .and(header("if-none-match", "\"abc\""))
            .respond_with(ResponseTemplate::new(304))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let mut plan = plan(&[("Sku", Some("9783"))]);
        plan.validator = Some(CacheValidator::Etag("\"abc\"".to_string()));

        let response = execute(&client.inner, &plan, "test-token").await.unwrap();
        assert!(response.is_not_modified());
    }

    #[tokio::test]
    async fn test_last_modified_validator_sent() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/shops/452/"))
            .and(header("if-modified-since", "Tue, 25 May 2021 07:28:00 GMT"))
            .respond_with(ResponseTemplate::new(304))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let mut plan = plan(&[("Shop", Some("452"))]);
        plan.validator = Some(CacheValidator::LastModified(
            "Tue, 25 May 2021 07:28:00 GMT".to_string(),
        ));

        let response = execute(&client.inner, &plan, "test-token").await.unwrap();
        assert!(response.is_not_modified());
    }

    #[tokio::test]
    async fn test_query_params_reach_the_wire() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "tuner cd"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "results": [] })),
            )
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let mut plan = plan(&[("Search", None)]);
        plan.params = Some(vec![("q".to_string(), "tuner cd".to_string())]);

        let response = execute(&client.inner, &plan, "test-token").await.unwrap();
        assert!(!response.is_not_modified());
    }

    #[tokio::test]
    async fn test_undefined_resource_issues_no_request() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let plan = plan(&[("Warehouse", Some("1"))]);

        let err = execute(&client.inner, &plan, "test-token").await.unwrap_err();
        assert!(matches!(
            err,
            ApiError::Client(ClientError::UndefinedResource { name }) if name == "Warehouse"
        ));
    }

    #[tokio::test]
    async fn test_http_error_400() {
        assert_classified(400, |e| matches!(e, ClientError::BadRequest)).await;
    }

    #[tokio::test]
    async fn test_http_error_401() {
        assert_classified(401, |e| matches!(e, ClientError::InvalidCredentials)).await;
    }

    #[tokio::test]
    async fn test_http_error_403() {
        assert_classified(403, |e| matches!(e, ClientError::Forbidden)).await;
    }

    #[tokio::test]
    async fn test_http_error_404() {
        assert_classified(404, |e| matches!(e, ClientError::NotFound)).await;
    }

    #[tokio::test]
    async fn test_http_error_500() {
        assert_classified(500, |e| matches!(e, ClientError::InternalServerError)).await;
    }

    #[tokio::test]
    async fn test_http_error_501() {
        assert_classified(501, |e| matches!(e, ClientError::NotImplemented)).await;
    }

    #[tokio::test]
    async fn test_unexpected_status_carries_code() {
        assert_classified(418, |e| {
            matches!(e, ClientError::UnexpectedStatus { status: 418 })
        })
        .await;
    }

    async fn assert_classified(status: u16, check: fn(&ClientError) -> bool) {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/flags"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let plan = plan(&[("Flag", None)]);

        match execute(&client.inner, &plan, "test-token").await {
            Err(ApiError::Client(e)) if check(&e) => {}
            other => panic!("status {status} misclassified: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_json_is_a_decode_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/manufacturers"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not valid json"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let plan = plan(&[("Manufacturer", None)]);

        let err = execute(&client.inner, &plan, "test-token").await.unwrap_err();
        assert!(matches!(
            err,
            ApiError::Validation(ValidationError::JsonParse(_))
        ));
    }
}
