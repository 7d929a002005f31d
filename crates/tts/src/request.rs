use axum::{
    Json,
    body::Body,
    response::{IntoResponse, Response},
};
use educalm_core::ErrorBody;
use http::StatusCode;
use serde::de::DeserializeOwned;

/// Body limit for synthesis requests (1 MiB)
const BODY_LIMIT_BYTES: usize = 1 << 20;

/// Extractor for JSON request bodies
///
/// Rejections use the same `{"detail": ...}` body as every other error.
pub struct JsonPayload<T>(pub T);

impl<S, T: DeserializeOwned> axum::extract::FromRequest<S> for JsonPayload<T>
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(request: http::Request<Body>, _state: &S) -> Result<Self, Self::Rejection> {
        let (parts, body) = request.into_parts();

        if !is_json(&parts.headers) {
            return Err(reject(
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "Unsupported Content-Type, expected: 'Content-Type: application/json'",
            ));
        }

        let bytes = axum::body::to_bytes(body, BODY_LIMIT_BYTES).await.map_err(|err| {
            if std::error::Error::source(&err).is_some_and(|source| source.is::<http_body_util::LengthLimitError>()) {
                reject(
                    StatusCode::PAYLOAD_TOO_LARGE,
                    format!("Request body is too large, limit is {BODY_LIMIT_BYTES} bytes"),
                )
            } else {
                reject(StatusCode::BAD_REQUEST, format!("Failed to read request body: {err}"))
            }
        })?;

        serde_json::from_slice::<T>(&bytes).map(Self).map_err(|e| {
            reject(
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("Failed to parse request body: {e}"),
            )
        })
    }
}

/// `application/json`, with or without parameters such as `charset`
fn is_json(headers: &http::HeaderMap) -> bool {
    headers
        .get(http::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
}

fn reject(status: StatusCode, detail: impl Into<String>) -> Response {
    (status, Json(ErrorBody::new(detail))).into_response()
}
