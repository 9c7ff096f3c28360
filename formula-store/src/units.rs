//! Selectable unit catalog and the two-step from/to selection flow.
//!
//! The server holds no session: callers send the current [`UnitSelection`]
//! with each pick and store the returned state themselves.

use serde::{Deserialize, Serialize};

use crate::category::Category;

/// A resolved unit pair awaiting a numeric value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionContext {
    pub from: String,
    pub to: String,
    /// Category label, e.g. `Length` or `Mass/Weight`.
    pub category: String,
}

/// One catalog group as rendered by clients.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogGroup {
    pub category: Category,
    pub label: &'static str,
    pub units: &'static [&'static str],
}

/// Unit labels offered for selection, grouped by category.
pub fn unit_catalog() -> Vec<CatalogGroup> {
    Category::ALL
        .into_iter()
        .map(|category| CatalogGroup {
            category,
            label: category.display_name(),
            units: catalog_units(category),
        })
        .collect()
}

fn catalog_units(category: Category) -> &'static [&'static str] {
    match category {
        Category::Length => &[
            "Kilometers",
            "Meters",
            "Decimeters",
            "Centimeters",
            "Millimeters",
            "Micrometers",
            "Picometers",
            "Nautical Miles",
            "Miles",
            "Furlongs",
            "Fathoms",
            "Yards",
            "Feet",
            "Inches",
            "Chinese Units",
        ],
        Category::Temperature => &["Celsius", "Fahrenheit", "Kelvin", "Rankine", "Reaumur"],
        Category::Mass => &[
            "Metric Tons",
            "Kilograms",
            "Grams",
            "Milligrams",
            "Micrograms",
            "Pounds",
            "Ounces",
            "Carats",
            "Grains",
            "Stone",
            "Long Tons",
            "Short Tons",
            "Hundredweight",
            "Chinese Units",
        ],
        Category::Area => &[
            "Square Kilometers",
            "Hectares",
            "Ares",
            "Square Meters",
            "Square Decimeters",
            "Square Centimeters",
            "Square Millimeters",
            "Square Miles",
            "Acres",
            "Square Yards",
            "Square Feet",
            "Square Inches",
        ],
        Category::Volume => &[
            "Cubic Meters",
            "Cubic Kilometers",
            "Cubic Centimeters",
            "Cubic Millimeters",
            "Liters",
            "Milliliters",
            "Gallons",
            "Quarts",
            "Pints",
            "Cups",
            "Fluid Ounces",
            "Tablespoons",
            "Teaspoons",
            "Cubic Inches",
            "Cubic Feet",
            "Cubic Yards",
        ],
        Category::Time => &[
            "Years",
            "Months",
            "Weeks",
            "Days",
            "Hours",
            "Minutes",
            "Seconds",
            "Milliseconds",
            "Microseconds",
            "Nanoseconds",
        ],
        Category::Speed => &[
            "Meters per Second",
            "Kilometers per Hour",
            "Miles per Hour",
            "Knots",
            "Feet per Second",
            "Mach",
        ],
        Category::Data => &[
            "Bits",
            "Bytes",
            "Kilobytes",
            "Megabytes",
            "Gigabytes",
            "Terabytes",
            "Petabytes",
            "Exabytes",
            "Zettabytes",
        ],
    }
}

/// A unit picked by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedUnit {
    pub category: Category,
    pub name: String,
}

/// Where the user is in the from/to flow.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum UnitSelection {
    #[default]
    AwaitingFrom,
    AwaitingTo {
        from: SelectedUnit,
    },
    Ready {
        from: SelectedUnit,
        to: SelectedUnit,
    },
}

/// Result of applying one pick to a selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// The pick was accepted.
    Advanced(UnitSelection),
    /// The "to" unit belongs to another category; the selection was reset.
    Mismatch {
        message: String,
        state: UnitSelection,
    },
}

impl UnitSelection {
    /// Applies a pick. A pick while `Ready` starts a new selection.
    pub fn select(self, category: Category, unit: impl Into<String>) -> SelectionOutcome {
        let picked = SelectedUnit {
            category,
            name: unit.into(),
        };

        match self {
            UnitSelection::AwaitingFrom | UnitSelection::Ready { .. } => {
                SelectionOutcome::Advanced(UnitSelection::AwaitingTo { from: picked })
            }
            UnitSelection::AwaitingTo { from } if from.category == picked.category => {
                SelectionOutcome::Advanced(UnitSelection::Ready { from, to: picked })
            }
            UnitSelection::AwaitingTo { from } => SelectionOutcome::Mismatch {
                message: format!(
                    "You can only convert between units in the same category. You selected {} ({}) and {} ({}).",
                    from.name, from.category, picked.name, picked.category
                ),
                state: UnitSelection::AwaitingFrom,
            },
        }
    }

    /// The conversion context once both units are chosen.
    pub fn conversion_context(&self) -> Option<ConversionContext> {
        match self {
            UnitSelection::Ready { from, to } => Some(ConversionContext {
                from: from.name.clone(),
                to: to.name.clone(),
                category: from.category.display_name().to_string(),
            }),
            _ => None,
        }
    }

    /// What the assistant should say next for this state.
    pub fn prompt(&self) -> String {
        match self {
            UnitSelection::AwaitingFrom => "Select FROM unit".to_string(),
            UnitSelection::AwaitingTo { from } => {
                format!("Converting from {}. Select TO unit", from.name)
            }
            UnitSelection::Ready { from, to } => format!(
                "I'll help you convert from {} to {}. What value would you like to convert?",
                from.name, to.name
            ),
        }
    }
}
