use formula_store::UnitSelection;
use serde::Deserialize;

/// Request payload for /api/unit-selection.
///
/// The client echoes back the `state` it got from the previous call; a
/// missing state starts a new selection.
#[derive(Debug, Deserialize)]
pub struct UnitSelectionRequest {
    #[serde(default)]
    pub state: UnitSelection,
    /// Category of the picked unit, e.g. `length` or `Mass/Weight`.
    pub category: String,
    /// Unit label as listed by /api/units.
    pub unit: String,
}
