use axum::Json;
use serde_json::{Value, json};

/// Handler: GET /health
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::routes::test_support::{app, get, send};

    #[tokio::test]
    async fn reports_ok() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body) = send(app(dir.path()), get("/health")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({"status": "ok"}));
    }
}
