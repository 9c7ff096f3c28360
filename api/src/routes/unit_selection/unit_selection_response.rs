use formula_store::{ConversionContext, UnitSelection};
use serde::Serialize;

/// Response payload for /api/unit-selection.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitSelectionResponse {
    /// State to send with the next pick.
    pub state: UnitSelection,
    /// What the assistant asks next.
    pub prompt: String,
    /// Present once both units are chosen; pass it as `conversionContext`
    /// to /api/conversion-chat.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversion_context: Option<ConversionContext>,
    /// Set when the pick was rejected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
