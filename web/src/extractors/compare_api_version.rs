use crate::extractors::RejectionType;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use service::config::ApiVersion;

/// Rejects any request whose `x-version` header does not name a currently
/// supported API version.
pub(crate) struct CompareApiVersion(pub &'static str);

#[async_trait]
impl<S> FromRequestParts<S> for CompareApiVersion
where
    S: Send + Sync,
{
    type Rejection = RejectionType;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts.headers.get(ApiVersion::field_name()).ok_or((
            StatusCode::BAD_REQUEST,
            format!("Missing {} header", ApiVersion::field_name()),
        ))?;

        let requested = header.to_str().map_err(|_| {
            (
                StatusCode::BAD_REQUEST,
                format!("Invalid {} header", ApiVersion::field_name()),
            )
        })?;

        let supported = ApiVersion::versions()
            .into_iter()
            .find(|version| *version == requested)
            .ok_or((
                StatusCode::BAD_REQUEST,
                format!("Unsupported API version: {requested}"),
            ))?;

        Ok(CompareApiVersion(supported))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, response::IntoResponse, routing::get, Router};
    use tower::ServiceExt;

    async fn versioned_handler(CompareApiVersion(_v): CompareApiVersion) -> impl IntoResponse {
        StatusCode::OK
    }

    fn test_app() -> Router {
        Router::new().route("/versioned", get(versioned_handler))
    }

    #[tokio::test]
    async fn accepts_a_supported_version() {
        let request = Request::builder()
            .uri("/versioned")
            .header(ApiVersion::field_name(), ApiVersion::default_version())
            .body(Body::empty())
            .unwrap();

        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn rejects_a_missing_version_header() {
        let request = Request::builder()
            .uri("/versioned")
            .body(Body::empty())
            .unwrap();

        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn rejects_an_unsupported_version() {
        let request = Request::builder()
            .uri("/versioned")
            .header(ApiVersion::field_name(), "0.0.1")
            .body(Body::empty())
            .unwrap();

        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
