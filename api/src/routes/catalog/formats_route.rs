//! GET /api/formats — target format menu for an upload.

use axum::{Json, extract::Query};
use file_advisor::{FileCategory, FormatOption, classify, common_formats};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct FormatsQuery {
    /// MIME type as reported by the browser.
    #[serde(rename = "type", default)]
    pub mime_type: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct FormatsResponse {
    pub category: FileCategory,
    pub formats: Vec<FormatOption>,
}

/// Handler: GET /api/formats?type=image/heic&name=photo.HEIC
pub async fn formats(Query(q): Query<FormatsQuery>) -> Json<FormatsResponse> {
    Json(FormatsResponse {
        category: classify(&q.name, &q.mime_type).category,
        formats: common_formats(&q.mime_type, &q.name),
    })
}
