//! GET /api/units — selectable units grouped by category.

use axum::Json;
use formula_store::{CatalogGroup, unit_catalog};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct UnitsResponse {
    pub categories: Vec<CatalogGroup>,
}

pub async fn units() -> Json<UnitsResponse> {
    Json(UnitsResponse {
        categories: unit_catalog(),
    })
}
