//! The eight fixed conversion domains and their keyword tables.
//!
//! Two lists per category:
//! - **keywords** — coarse terms used to pick the best formula document;
//! - **unit patterns** — finer unit names used to slice the chosen document.
//!
//! Both lists are plain data. Matching is case-insensitive substring
//! containment; there is no stemming or tokenization.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::FormulaError;

/// A conversion domain backed by one formula document on disk.
///
/// Variants are declared in canonical order; classification ties are
/// resolved in favour of the earlier variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Length,
    Temperature,
    Mass,
    Area,
    Volume,
    Time,
    Speed,
    Data,
}

/// A canonical unit name plus abbreviations that also count as a mention.
///
/// The section extractor searches document lines for [`UnitPattern::name`]
/// only; aliases exist so that `km` in a query still selects `kilometer`.
#[derive(Debug, Clone, Copy)]
pub struct UnitPattern {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
}

impl UnitPattern {
    const fn plain(name: &'static str) -> Self {
        Self { name, aliases: &[] }
    }

    const fn with(name: &'static str, aliases: &'static [&'static str]) -> Self {
        Self { name, aliases }
    }

    /// True if the unit name or one of its aliases occurs in `lower_query`.
    ///
    /// `lower_query` must already be lowercased.
    pub fn is_mentioned_in(&self, lower_query: &str) -> bool {
        lower_query.contains(self.name) || self.aliases.iter().any(|a| lower_query.contains(a))
    }
}

impl Category {
    /// All categories in canonical order.
    pub const ALL: [Category; 8] = [
        Category::Length,
        Category::Temperature,
        Category::Mass,
        Category::Area,
        Category::Volume,
        Category::Time,
        Category::Speed,
        Category::Data,
    ];

    /// File name of the backing formula document.
    pub fn file_name(self) -> &'static str {
        match self {
            Category::Length => "length.txt",
            Category::Temperature => "temperature.txt",
            Category::Mass => "mass.txt",
            Category::Area => "area.txt",
            Category::Volume => "volume.txt",
            Category::Time => "time.txt",
            Category::Speed => "speed.txt",
            Category::Data => "data.txt",
        }
    }

    /// Label shown to users and sent back in conversion contexts.
    pub fn display_name(self) -> &'static str {
        match self {
            Category::Length => "Length",
            Category::Temperature => "Temperature",
            Category::Mass => "Mass/Weight",
            Category::Area => "Area",
            Category::Volume => "Volume",
            Category::Time => "Time",
            Category::Speed => "Speed",
            Category::Data => "Data Storage",
        }
    }

    /// Lowercase name used on the wire.
    pub fn as_wire_name(self) -> &'static str {
        self.file_name().trim_end_matches(".txt")
    }

    /// Reverse of [`Category::file_name`].
    pub fn from_file_name(name: &str) -> Option<Category> {
        Self::ALL.into_iter().find(|c| c.file_name() == name)
    }

    /// Resolves a caller-supplied category label.
    ///
    /// Order: exact display name, case-insensitive display name, then a
    /// loose keyword match on the lowercased label.
    pub fn resolve(label: &str) -> Option<Category> {
        let label = label.trim();
        if let Some(c) = Self::ALL.into_iter().find(|c| c.display_name() == label) {
            return Some(c);
        }

        let lower = label.to_lowercase();
        if let Some(c) = Self::ALL
            .into_iter()
            .find(|c| c.display_name().to_lowercase() == lower)
        {
            return Some(c);
        }

        let has = |needle: &str| lower.contains(needle);
        if has("length") || has("distance") {
            Some(Category::Length)
        } else if has("temp") {
            Some(Category::Temperature)
        } else if has("mass") || has("weight") {
            Some(Category::Mass)
        } else if has("area") {
            Some(Category::Area)
        } else if has("volume") {
            Some(Category::Volume)
        } else if has("speed") {
            Some(Category::Speed)
        } else if has("time") {
            Some(Category::Time)
        } else if has("data") || has("storage") {
            Some(Category::Data)
        } else {
            None
        }
    }

    /// Coarse keywords used to score documents against a query.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Category::Length => &[
                "length", "meter", "kilometer", "mile", "foot", "feet", "inch", "yards", "cm",
                "mm", "km", "distance",
            ],
            Category::Temperature => &[
                "temperature",
                "celsius",
                "fahrenheit",
                "kelvin",
                "degree",
                "hot",
                "cold",
                "°c",
                "°f",
                "heat",
            ],
            Category::Mass => &[
                "mass", "weight", "kilogram", "gram", "pound", "ounce", "ton", "kg", "g", "lb",
                "heavy",
            ],
            Category::Area => &[
                "area",
                "square",
                "acres",
                "hectare",
                "km²",
                "m²",
                "ft²",
                "square feet",
                "square meters",
                "land",
                "surface",
            ],
            Category::Volume => &[
                "volume", "liter", "gallon", "quart", "pint", "cup", "fluid", "cubic", "l", "ml",
                "m³", "cm³", "mm³", "capacity",
            ],
            Category::Time => &[
                "time",
                "second",
                "minute",
                "hour",
                "day",
                "week",
                "month",
                "year",
                "millisecond",
                "microsecond",
                "nanosecond",
                "duration",
            ],
            Category::Speed => &[
                "speed",
                "velocity",
                "mph",
                "kph",
                "km/h",
                "m/s",
                "knot",
                "mach",
                "fast",
                "slow",
                "per hour",
                "per second",
            ],
            Category::Data => &[
                "data", "byte", "bit", "kilobyte", "megabyte", "gigabyte", "terabyte", "petabyte",
                "storage", "memory", "kb", "mb", "gb", "tb",
            ],
        }
    }

    /// Fine-grained unit names used for section extraction.
    pub fn unit_patterns(self) -> &'static [UnitPattern] {
        const LENGTH: &[UnitPattern] = &[
            UnitPattern::with("kilometer", &["km"]),
            UnitPattern::plain("meter"),
            UnitPattern::with("centimeter", &["cm"]),
            UnitPattern::with("millimeter", &["mm"]),
            UnitPattern::plain("mile"),
            UnitPattern::with("foot", &["ft"]),
            UnitPattern::plain("feet"),
            UnitPattern::plain("inch"),
            UnitPattern::with("yard", &["yd"]),
            UnitPattern::plain("parsec"),
            UnitPattern::plain("light year"),
            UnitPattern::plain("nautical mile"),
        ];
        const TEMPERATURE: &[UnitPattern] = &[
            UnitPattern::with("celsius", &["°c"]),
            UnitPattern::with("fahrenheit", &["°f"]),
            UnitPattern::plain("kelvin"),
            UnitPattern::plain("rankine"),
            UnitPattern::plain("reaumur"),
        ];
        const MASS: &[UnitPattern] = &[
            UnitPattern::with("kilogram", &["kg"]),
            UnitPattern::plain("gram"),
            UnitPattern::with("pound", &["lb"]),
            UnitPattern::with("ounce", &["oz"]),
            UnitPattern::plain("ton"),
            UnitPattern::plain("tonne"),
            UnitPattern::plain("stone"),
            UnitPattern::plain("carat"),
        ];
        const AREA: &[UnitPattern] = &[
            UnitPattern::plain("square kilometer"),
            UnitPattern::plain("square meter"),
            UnitPattern::plain("square mile"),
            UnitPattern::plain("acre"),
            UnitPattern::plain("hectare"),
            UnitPattern::plain("ha"),
            UnitPattern::plain("km²"),
            UnitPattern::plain("m²"),
            UnitPattern::plain("ft²"),
            UnitPattern::plain("square feet"),
            UnitPattern::plain("square inch"),
        ];
        const VOLUME: &[UnitPattern] = &[
            UnitPattern::plain("cubic meter"),
            UnitPattern::plain("cubic kilometer"),
            UnitPattern::plain("cubic centimeter"),
            UnitPattern::plain("cubic millimeter"),
            UnitPattern::plain("liter"),
            UnitPattern::with("milliliter", &["ml"]),
            UnitPattern::plain("gallon"),
            UnitPattern::plain("quart"),
            UnitPattern::plain("pint"),
            UnitPattern::plain("cup"),
            UnitPattern::plain("fluid ounce"),
            UnitPattern::plain("tablespoon"),
            UnitPattern::plain("teaspoon"),
            UnitPattern::plain("cubic inch"),
            UnitPattern::plain("cubic foot"),
            UnitPattern::plain("cubic yard"),
        ];
        const TIME: &[UnitPattern] = &[
            UnitPattern::plain("year"),
            UnitPattern::plain("month"),
            UnitPattern::plain("week"),
            UnitPattern::plain("day"),
            UnitPattern::plain("hour"),
            UnitPattern::plain("minute"),
            UnitPattern::plain("second"),
            UnitPattern::plain("millisecond"),
            UnitPattern::plain("microsecond"),
            UnitPattern::plain("nanosecond"),
            UnitPattern::plain("picosecond"),
        ];
        const SPEED: &[UnitPattern] = &[
            UnitPattern::plain("meter per second"),
            UnitPattern::plain("kilometer per hour"),
            UnitPattern::plain("mile per hour"),
            UnitPattern::plain("feet per second"),
            UnitPattern::plain("knot"),
            UnitPattern::plain("mach"),
            UnitPattern::plain("m/s"),
            UnitPattern::plain("km/h"),
            UnitPattern::plain("mph"),
            UnitPattern::plain("ft/s"),
        ];
        const DATA: &[UnitPattern] = &[
            UnitPattern::plain("bit"),
            UnitPattern::plain("byte"),
            UnitPattern::with("kilobyte", &["kb"]),
            UnitPattern::plain("kibibyte"),
            UnitPattern::with("megabyte", &["mb"]),
            UnitPattern::plain("mebibyte"),
            UnitPattern::with("gigabyte", &["gb"]),
            UnitPattern::plain("gibibyte"),
            UnitPattern::with("terabyte", &["tb"]),
            UnitPattern::plain("tebibyte"),
            UnitPattern::plain("petabyte"),
            UnitPattern::plain("pebibyte"),
            UnitPattern::plain("exabyte"),
            UnitPattern::plain("exbibyte"),
            UnitPattern::plain("zettabyte"),
            UnitPattern::plain("zebibyte"),
            UnitPattern::plain("yottabyte"),
            UnitPattern::plain("yobibyte"),
        ];

        match self {
            Category::Length => LENGTH,
            Category::Temperature => TEMPERATURE,
            Category::Mass => MASS,
            Category::Area => AREA,
            Category::Volume => VOLUME,
            Category::Time => TIME,
            Category::Speed => SPEED,
            Category::Data => DATA,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Category {
    type Err = FormulaError;

    /// Accepts wire names (`mass`) as well as any label [`Category::resolve`] knows.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_wire_name().eq_ignore_ascii_case(s.trim()))
            .or_else(|| Self::resolve(s))
            .ok_or_else(|| FormulaError::UnknownCategory(s.to_string()))
    }
}
