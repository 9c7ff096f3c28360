//! POST /api/unit-selection — advances the from/to unit picker.
//!
//! Stateless: the caller keeps the returned state. Never calls a provider.

use axum::Json;
use formula_store::{Category, SelectionOutcome, unit_catalog};
use tracing::{debug, instrument};

use crate::{
    error_handler::{AppError, AppResult},
    routes::unit_selection::{
        unit_selection_request::UnitSelectionRequest,
        unit_selection_response::UnitSelectionResponse,
    },
};

fn is_catalog_unit(category: Category, unit: &str) -> bool {
    unit_catalog()
        .iter()
        .any(|g| g.category == category && g.units.iter().any(|u| *u == unit))
}

/// Handler: POST /api/unit-selection
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:3000/api/unit-selection \
///   -H 'content-type: application/json' \
///   -d '{"category":"length","unit":"Kilometers"}'
/// ```
#[instrument(name = "unit_selection_route", skip_all, fields(category = %body.category))]
pub async fn unit_selection(
    Json(body): Json<UnitSelectionRequest>,
) -> AppResult<Json<UnitSelectionResponse>> {
    let category: Category = body
        .category
        .parse()
        .map_err(|e: formula_store::FormulaError| AppError::BadRequest(e.to_string()))?;

    let unit = body.unit.trim();
    if !is_catalog_unit(category, unit) {
        return Err(AppError::BadRequest(format!(
            "unknown unit {unit:?} for category {category}"
        )));
    }

    let response = match body.state.select(category, unit) {
        SelectionOutcome::Advanced(state) => UnitSelectionResponse {
            prompt: state.prompt(),
            conversion_context: state.conversion_context(),
            state,
            message: None,
        },
        SelectionOutcome::Mismatch { message, state } => {
            debug!(%message, "unit pick rejected");
            UnitSelectionResponse {
                prompt: state.prompt(),
                conversion_context: None,
                state,
                message: Some(message),
            }
        }
    };

    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::routes::test_support::{app, post_json, send};

    const URI: &str = "/api/unit-selection";

    #[tokio::test]
    async fn two_picks_produce_a_conversion_context() {
        let dir = tempfile::tempdir().unwrap();

        let (status, first) = send(
            app(dir.path()),
            post_json(URI, r#"{"category":"length","unit":"Kilometers"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(first["state"]["step"], "awaiting_to");
        assert_eq!(first["prompt"], "Converting from Kilometers. Select TO unit");

        let next = json!({"state": first["state"], "category": "Length", "unit": "Miles"});
        let (status, second) = send(app(dir.path()), post_json(URI, &next.to_string())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(second["state"]["step"], "ready");
        assert_eq!(
            second["conversionContext"],
            json!({"from": "Kilometers", "to": "Miles", "category": "Length"})
        );
        assert!(second.get("message").is_none());
    }

    #[tokio::test]
    async fn cross_category_pick_resets() {
        let dir = tempfile::tempdir().unwrap();
        let body = json!({
            "state": {"step": "awaiting_to", "from": {"category": "mass", "name": "Kilograms"}},
            "category": "length",
            "unit": "Meters"
        });
        let (status, out) = send(app(dir.path()), post_json(URI, &body.to_string())).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(out["state"]["step"], "awaiting_from");
        assert_eq!(
            out["message"],
            "You can only convert between units in the same category. \
             You selected Kilograms (Mass/Weight) and Meters (Length)."
        );
        assert!(out.get("conversionContext").is_none());
    }

    #[tokio::test]
    async fn unknown_category_or_unit_is_bad_request() {
        let dir = tempfile::tempdir().unwrap();
        let (status, out) = send(
            app(dir.path()),
            post_json(URI, r#"{"category":"colour","unit":"Red"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(out["error"], "unknown category: colour");

        let (status, _) = send(
            app(dir.path()),
            post_json(URI, r#"{"category":"length","unit":"Parsecs"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
