use axum::{
    body::{Body, Bytes},
    http::{HeaderValue, Request, StatusCode, header},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use tracing::debug;

use crate::core::http::response_envelope::ApiError;

const REQUEST_ID: &str = "X-Request-Id";

async fn take_body(res: Response) -> (axum::http::response::Parts, Bytes) {
    let (parts, body) = res.into_parts();
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .unwrap_or_default();
    (parts, bytes)
}

fn hint_from_serde_msg(msg: &str) -> Option<&'static str> {
    if msg.contains("missing field") {
        Some("A required field is missing from the JSON body.")
    } else if msg.contains("expected a map") || msg.contains("expected struct") {
        Some("Expected a JSON object here (e.g. { \"field\": \"value\" }).")
    } else if msg.contains("Content-Type") {
        Some("Send the body with `Content-Type: application/json`.")
    } else {
        None
    }
}

fn ensure_request_id(parts: &mut axum::http::response::Parts) -> String {
    if let Some(v) = parts.headers.get(REQUEST_ID).and_then(|h| h.to_str().ok()) {
        if !v.trim().is_empty() {
            return v.to_string();
        }
    }
    let nanos = Utc::now()
        .timestamp_nanos_opt()
        .unwrap_or_else(|| Utc::now().timestamp_micros() * 1000);
    let id = format!("req-{nanos}");
    if let Ok(v) = HeaderValue::from_str(&id) {
        parts.headers.insert(REQUEST_ID, v);
    }
    id
}

/// Bodies we produced ourselves already carry `{"error": ...}`.
fn is_api_error(bytes: &[u8]) -> bool {
    serde_json::from_slice::<ApiError>(bytes).is_ok()
}

/// Rewrites extractor rejections (400/422 plain text) into the JSON error
/// shape. Other responses pass through untouched.
pub async fn json_error_mapper(req: Request<Body>, next: Next) -> Response {
    let res = next.run(req).await;
    let status = res.status();

    if !(status == StatusCode::BAD_REQUEST || status == StatusCode::UNPROCESSABLE_ENTITY) {
        return res;
    }

    let (mut parts, bytes) = take_body(res).await;
    let req_id = ensure_request_id(&mut parts);
    if is_api_error(&bytes) {
        return Response::from_parts(parts, Body::from(bytes));
    }

    let original = String::from_utf8_lossy(&bytes);
    debug!(%req_id, %status, rejection = %original.trim(), "mapping request rejection");

    let mut envelope = ApiError::new("Invalid request body").with_details(original.trim());
    if let Some(hint) = hint_from_serde_msg(&original) {
        envelope.error = format!("Invalid request body. {hint}");
    }

    let body = match serde_json::to_vec(&envelope) {
        Ok(v) => v,
        Err(_) => bytes.to_vec(),
    };

    parts.headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    parts.headers.remove(header::CONTENT_LENGTH);

    Response::from_parts(parts, Body::from(body))
}
