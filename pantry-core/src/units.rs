//! Unit standardization, classification, and conversion.
//!
//! Units belong to one of three culinary types (mass, volume, length), each
//! with a fixed table of scale factors against a base unit: grams for mass,
//! milliliters for volume, centimeters for length (US legal definitions).
//! Cross-type conversion between mass and volume goes through an
//! ingredient-specific density when one is known.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::density::find_density;
use crate::error::UnitError;

/// Synonym table mapping spelled-out and variant unit names to their
/// standardized codes. Units absent from the table pass through unchanged.
static SYNONYMS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("tablespoon", "tbsp"),
        ("tablespoons", "tbsp"),
        ("teaspoon", "tsp"),
        ("teaspoons", "tsp"),
        ("c", "cup"),
        ("cups", "cup"),
        ("fluid ounce", "fl oz"),
        ("fluid ounces", "fl oz"),
        ("pint", "pt"),
        ("pints", "pt"),
        ("quart", "qt"),
        ("quarts", "qt"),
        ("gallon", "gal"),
        ("gallons", "gal"),
        ("milliliter", "ml"),
        ("millilitre", "ml"),
        ("milliliters", "ml"),
        ("millilitres", "ml"),
        ("liter", "l"),
        ("litre", "l"),
        ("liters", "l"),
        ("litres", "l"),
        ("gram", "g"),
        ("grams", "g"),
        ("milligram", "mg"),
        ("milligrams", "mg"),
        ("kilogram", "kg"),
        ("kilograms", "kg"),
        ("ounce", "oz"),
        ("ounces", "oz"),
        ("pound", "lb"),
        ("pounds", "lb"),
        ("lbs", "lb"),
        ("inch", "in"),
        ("inches", "in"),
        ("centimeter", "cm"),
        ("centimetre", "cm"),
        ("centimeters", "cm"),
        ("centimetres", "cm"),
        ("millimeter", "mm"),
        ("millimetre", "mm"),
        ("meter", "m"),
        ("metre", "m"),
    ])
});

/// The culinary type of a standardized unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitType {
    Mass,
    Volume,
    Length,
}

impl UnitType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitType::Mass => "mass",
            UnitType::Volume => "volume",
            UnitType::Length => "length",
        }
    }
}

/// Scale of a standardized unit against its type's base unit
/// (grams, milliliters, or centimeters).
fn base_scale(unit: &str) -> Option<(UnitType, f64)> {
    let scaled = match unit {
        // Mass, in grams
        "mg" => (UnitType::Mass, 0.001),
        "g" => (UnitType::Mass, 1.0),
        "oz" => (UnitType::Mass, 28.375),
        "lb" => (UnitType::Mass, 454.0),
        "kg" => (UnitType::Mass, 1000.0),
        "ton" => (UnitType::Mass, 908_000.0),
        // Volume, in milliliters
        "ml" => (UnitType::Volume, 1.0),
        "tsp" => (UnitType::Volume, 5.0),
        "tbsp" => (UnitType::Volume, 15.0),
        "fl oz" => (UnitType::Volume, 30.0),
        "cup" => (UnitType::Volume, 240.0),
        "pt" => (UnitType::Volume, 480.0),
        "qt" => (UnitType::Volume, 960.0),
        "l" => (UnitType::Volume, 1000.0),
        "gal" => (UnitType::Volume, 3840.0),
        // Length, in centimeters
        "mm" => (UnitType::Length, 0.1),
        "cm" => (UnitType::Length, 1.0),
        "in" => (UnitType::Length, 2.54),
        "m" => (UnitType::Length, 100.0),
        _ => return None,
    };
    Some(scaled)
}

/// Standardize a unit via the synonym table. Idempotent: the table's values
/// are never themselves keys.
pub fn standardize(unit: &str) -> String {
    match SYNONYMS.get(unit) {
        Some(standard) => (*standard).to_string(),
        None => unit.to_string(),
    }
}

/// Classify a standardized unit. Unrecognized units have no type.
pub fn unit_type(unit: &str) -> Option<UnitType> {
    base_scale(unit).map(|(t, _)| t)
}

/// Conversion factor from `from` to `to`, i.e. the number of `to` units in
/// one `from` unit.
///
/// Both units are standardized first. Units of the same type convert through
/// their base scales; a mass/volume pair converts through the density of
/// `ingredient` when one is known. Length never bridges to mass or volume.
pub fn conversion_factor(
    from: &str,
    to: &str,
    ingredient: Option<&str>,
) -> Result<f64, UnitError> {
    let from = standardize(from);
    let to = standardize(to);

    let (from_type, from_scale) =
        base_scale(&from).ok_or_else(|| UnitError::UnknownUnit(from.clone()))?;
    let (to_type, to_scale) = base_scale(&to).ok_or_else(|| UnitError::UnknownUnit(to.clone()))?;

    if from_type == to_type {
        return Ok(from_scale / to_scale);
    }

    let incompatible = || UnitError::Incompatible {
        from: from.clone(),
        to: to.clone(),
    };
    let density = ingredient
        .and_then(find_density)
        .ok_or_else(|| incompatible())?;

    // Density is grams per milliliter, so it bridges the two base units.
    match (from_type, to_type) {
        (UnitType::Mass, UnitType::Volume) => Ok(from_scale / (to_scale * density)),
        (UnitType::Volume, UnitType::Mass) => Ok((from_scale * density) / to_scale),
        _ => Err(incompatible()),
    }
}
