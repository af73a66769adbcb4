//! Structured ingredient quantities.
//!
//! An [`Ingredient`] holds a parsed quantity of a named item along with the
//! raw strings it was parsed from, so display output can stay close to the
//! source text while the numeric fields stay arithmetically combinable.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{MergeError, ParseError};
use crate::numeric::parse_numeric;
use crate::units::{conversion_factor, standardize};

/// A quantity of a named item, parsed from one ingredient line.
///
/// `unit` is always the standardized form of `raw_unit`; `raw_unit` and
/// `raw_quantity` preserve the original tokens for display. `text` is the
/// verbatim source line when one exists. At least one of `name` and `text`
/// is always set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: Option<String>,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub raw_unit: Option<String>,
    pub raw_quantity: Option<String>,
    pub text: Option<String>,
}

impl Ingredient {
    /// Build an ingredient from raw tagged substrings.
    ///
    /// The quantity string is parsed with the numeric-literal parser and an
    /// unparseable quantity surfaces as [`ParseError`] rather than being
    /// coerced. A unit with no explicit quantity implies a quantity of 1.
    pub fn from_raw(
        name: Option<&str>,
        raw_quantity: Option<&str>,
        raw_unit: Option<&str>,
        text: Option<&str>,
    ) -> Result<Ingredient, ParseError> {
        if name.is_none() && text.is_none() {
            return Err(ParseError::MissingName);
        }

        let unit = raw_unit.map(|u| standardize(u));
        let (quantity, raw_quantity) = match raw_quantity {
            Some(q) => (Some(parse_numeric(q, None)?), Some(q.to_string())),
            None if unit.is_some() => (Some(1.0), Some("1".to_string())),
            None => (None, None),
        };

        Ok(Ingredient {
            name: name.map(str::to_string),
            quantity,
            unit,
            raw_unit: raw_unit.map(str::to_string),
            raw_quantity,
            text: text.map(str::to_string),
        })
    }

    /// Build an ingredient from an already-numeric quantity.
    pub fn with_quantity(name: &str, quantity: f64, unit: Option<&str>) -> Ingredient {
        debug_assert!(quantity >= 0.0);
        Ingredient {
            name: Some(name.to_string()),
            quantity: Some(quantity),
            unit: unit.map(|u| standardize(u)),
            raw_unit: unit.map(str::to_string),
            raw_quantity: Some(format!("{quantity}")),
            text: None,
        }
    }

    /// Add another ingredient's quantity to this one.
    ///
    /// Requires matching names and quantities on both sides. With no units
    /// the quantities sum directly; otherwise the sum is expressed in
    /// whichever unit avoids a shrinking multiplier (the conversion factor
    /// below 1 converts the other way), which keeps rounding error small.
    /// Returns a new ingredient; neither input is mutated.
    pub fn add_ingredient(&self, other: &Ingredient) -> Result<Ingredient, MergeError> {
        let name = match (self.name.as_deref(), other.name.as_deref()) {
            (Some(a), Some(b)) if a == b => a,
            _ => {
                return Err(MergeError::NameMismatch {
                    left: self.name.clone(),
                    right: other.name.clone(),
                })
            }
        };
        let (q1, q2) = match (self.quantity, other.quantity) {
            (Some(q1), Some(q2)) => (q1, q2),
            _ => return Err(MergeError::MissingQuantity(self.name.clone())),
        };

        match (self.unit.as_deref(), other.unit.as_deref()) {
            (None, None) => Ok(Ingredient::with_quantity(name, q1 + q2, None)),
            (Some(u1), Some(u2)) => {
                let factor = conversion_factor(u1, u2, Some(name))?;
                if factor < 1.0 {
                    Ok(Ingredient::with_quantity(name, q2 + factor * q1, Some(u2)))
                } else {
                    Ok(Ingredient::with_quantity(name, q1 + q2 / factor, Some(u1)))
                }
            }
            (left, right) => Err(MergeError::UnitMismatch {
                left: left.map(str::to_string),
                right: right.map(str::to_string),
            }),
        }
    }

    /// Add a plain numeric amount, keeping the unit.
    pub fn add_scalar(&self, amount: f64) -> Result<Ingredient, MergeError> {
        debug_assert!(amount >= 0.0);
        let name = self
            .name
            .as_deref()
            .ok_or_else(|| MergeError::NameMismatch {
                left: None,
                right: None,
            })?;
        let quantity = self
            .quantity
            .ok_or_else(|| MergeError::MissingQuantity(self.name.clone()))?;
        Ok(Ingredient::with_quantity(
            name,
            quantity + amount,
            self.unit.as_deref(),
        ))
    }

    /// Conversion factor from this ingredient's unit to `unit`, or `None`
    /// when the conversion is unavailable. Incompatibility is a reportable,
    /// non-fatal outcome, so it is logged rather than propagated.
    fn factor_to(&self, unit: &str) -> Option<f64> {
        let from = self.unit.as_deref()?;
        match conversion_factor(from, unit, self.name.as_deref()) {
            Ok(factor) => Some(factor),
            Err(err) => {
                warn!(%err, from, to = unit, "unit conversion unavailable");
                None
            }
        }
    }

    /// A copy of this ingredient converted to `unit`, or `None` when the
    /// units are incompatible or required fields are missing.
    pub fn converted_to(&self, unit: &str) -> Option<Ingredient> {
        let factor = self.factor_to(unit)?;
        let name = self.name.as_deref()?;
        let quantity = self.quantity?;
        Some(Ingredient::with_quantity(name, factor * quantity, Some(unit)))
    }

    /// Convert this ingredient to `unit` in place, updating quantity, unit,
    /// and the raw display fields together. Returns whether the conversion
    /// was applied.
    pub fn convert_in_place(&mut self, unit: &str) -> bool {
        let Some(factor) = self.factor_to(unit) else {
            return false;
        };
        let Some(quantity) = self.quantity else {
            return false;
        };

        let converted = factor * quantity;
        self.quantity = Some(converted);
        self.raw_quantity = Some(format!("{converted}"));
        self.unit = Some(standardize(unit));
        self.raw_unit = Some(unit.to_string());
        true
    }
}

/// Equality on the structured fields only: name, quantity, and unit.
impl PartialEq for Ingredient {
    fn eq(&self, other: &Ingredient) -> bool {
        self.name == other.name && self.quantity == other.quantity && self.unit == other.unit
    }
}

/// The verbatim source line when one is stored, otherwise
/// "<raw_quantity> <raw_unit> <name>" with absent parts omitted.
impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(text) = &self.text {
            return f.write_str(text);
        }

        let mut parts: Vec<&str> = Vec::new();
        if let Some(quantity) = &self.raw_quantity {
            parts.push(quantity);
        }
        if let Some(unit) = &self.raw_unit {
            parts.push(unit);
        }
        if let Some(name) = &self.name {
            parts.push(name);
        }
        f.write_str(&parts.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_from_raw_parses_quantity() {
        let ingredient =
            Ingredient::from_raw(Some("flour"), Some("1 1/2"), Some("cups"), None).unwrap();
        assert_close(ingredient.quantity.unwrap(), 1.5);
        assert_eq!(ingredient.unit.as_deref(), Some("cup"));
        assert_eq!(ingredient.raw_unit.as_deref(), Some("cups"));
        assert_eq!(ingredient.raw_quantity.as_deref(), Some("1 1/2"));
    }

    #[test]
    fn test_from_raw_unit_implies_quantity_of_one() {
        let ingredient = Ingredient::from_raw(Some("butter"), None, Some("cup"), None).unwrap();
        assert_close(ingredient.quantity.unwrap(), 1.0);
        // The implied quantity renders the way computed quantities do,
        // with no trailing ".0".
        assert_eq!(ingredient.raw_quantity.as_deref(), Some("1"));
        assert_eq!(ingredient.to_string(), "1 cup butter");
    }

    #[test]
    fn test_from_raw_no_quantity_no_unit() {
        let ingredient = Ingredient::from_raw(Some("salt"), None, None, None).unwrap();
        assert_eq!(ingredient.quantity, None);
        assert_eq!(ingredient.unit, None);
    }

    #[test]
    fn test_from_raw_requires_name_or_text() {
        assert_eq!(
            Ingredient::from_raw(None, Some("2"), Some("cup"), None),
            Err(ParseError::MissingName)
        );
        assert!(Ingredient::from_raw(None, None, None, Some("2 cups flour")).is_ok());
    }

    #[test]
    fn test_from_raw_rejects_bad_quantity() {
        let result = Ingredient::from_raw(Some("flour"), Some("a few"), Some("cup"), None);
        assert!(matches!(result, Err(ParseError::UnparseableNumeric(_))));
    }

    #[test]
    fn test_equality_ignores_raw_fields() {
        let a = Ingredient::from_raw(Some("flour"), Some("1/2"), Some("cups"), Some("x")).unwrap();
        let b = Ingredient::with_quantity("flour", 0.5, Some("cup"));
        assert_eq!(a, b);
        assert_ne!(a, Ingredient::with_quantity("flour", 0.5, Some("g")));
    }

    #[test]
    fn test_display_prefers_verbatim_text() {
        let ingredient =
            Ingredient::from_raw(Some("flour"), Some("2"), Some("cups"), Some("2 cups flour"))
                .unwrap();
        assert_eq!(ingredient.to_string(), "2 cups flour");
    }

    #[test]
    fn test_display_formats_raw_parts() {
        let ingredient = Ingredient::from_raw(Some("flour"), Some("2"), Some("cups"), None).unwrap();
        assert_eq!(ingredient.to_string(), "2 cups flour");

        let bare = Ingredient::from_raw(Some("salt"), None, None, None).unwrap();
        assert_eq!(bare.to_string(), "salt");
    }

    #[test]
    fn test_add_same_unit() {
        let a = Ingredient::with_quantity("flour", 1.0, Some("cup"));
        let b = Ingredient::with_quantity("flour", 1.0, Some("cup"));
        let sum = a.add_ingredient(&b).unwrap();
        assert_close(sum.quantity.unwrap(), 2.0);
        assert_eq!(sum.unit.as_deref(), Some("cup"));
    }

    #[test]
    fn test_add_prefers_larger_unit() {
        // tbsp -> cup is a shrinking factor, so the sum lands in cups.
        let tbsp = Ingredient::with_quantity("sugar", 2.0, Some("tbsp"));
        let cup = Ingredient::with_quantity("sugar", 0.5, Some("cup"));

        let sum = tbsp.add_ingredient(&cup).unwrap();
        assert_close(sum.quantity.unwrap(), 0.625);
        assert_eq!(sum.unit.as_deref(), Some("cup"));

        // The other direction converts the incoming tbsp into cups instead.
        let sum = cup.add_ingredient(&tbsp).unwrap();
        assert_close(sum.quantity.unwrap(), 0.625);
        assert_eq!(sum.unit.as_deref(), Some("cup"));
    }

    #[test]
    fn test_add_unitless() {
        let a = Ingredient::with_quantity("egg", 2.0, None);
        let b = Ingredient::with_quantity("egg", 3.0, None);
        let sum = a.add_ingredient(&b).unwrap();
        assert_close(sum.quantity.unwrap(), 5.0);
        assert_eq!(sum.unit, None);
    }

    #[test]
    fn test_add_through_density() {
        let grams = Ingredient::with_quantity("flour", 140.0, Some("g"));
        let cups = Ingredient::with_quantity("flour", 1.0, Some("cup"));
        let sum = grams.add_ingredient(&cups).unwrap();
        // 140g of flour is one cup; factor g->cup is 1/140 < 1.
        assert_close(sum.quantity.unwrap(), 2.0);
        assert_eq!(sum.unit.as_deref(), Some("cup"));
    }

    #[test]
    fn test_add_name_mismatch() {
        let a = Ingredient::with_quantity("flour", 1.0, Some("cup"));
        let b = Ingredient::with_quantity("sugar", 1.0, Some("cup"));
        assert!(matches!(
            a.add_ingredient(&b),
            Err(MergeError::NameMismatch { .. })
        ));
    }

    #[test]
    fn test_add_missing_quantity() {
        let a = Ingredient::with_quantity("salt", 1.0, None);
        let b = Ingredient::from_raw(Some("salt"), None, None, None).unwrap();
        assert!(matches!(
            a.add_ingredient(&b),
            Err(MergeError::MissingQuantity(_))
        ));
    }

    #[test]
    fn test_add_one_sided_unit() {
        let a = Ingredient::with_quantity("salt", 1.0, Some("tsp"));
        let b = Ingredient::with_quantity("salt", 1.0, None);
        assert!(matches!(
            a.add_ingredient(&b),
            Err(MergeError::UnitMismatch { .. })
        ));
    }

    #[test]
    fn test_add_incompatible_units() {
        let a = Ingredient::with_quantity("salt", 1.0, Some("cup"));
        let b = Ingredient::with_quantity("salt", 1.0, Some("g"));
        assert!(matches!(a.add_ingredient(&b), Err(MergeError::Unit(_))));
    }

    #[test]
    fn test_add_scalar() {
        let a = Ingredient::with_quantity("flour", 1.5, Some("cup"));
        let sum = a.add_scalar(0.5).unwrap();
        assert_close(sum.quantity.unwrap(), 2.0);
        assert_eq!(sum.unit.as_deref(), Some("cup"));
    }

    #[test]
    fn test_converted_to() {
        let cups = Ingredient::with_quantity("water", 2.0, Some("cup"));
        let ml = cups.converted_to("ml").unwrap();
        assert_close(ml.quantity.unwrap(), 480.0);
        assert_eq!(ml.unit.as_deref(), Some("ml"));
        // The original is untouched.
        assert_close(cups.quantity.unwrap(), 2.0);
    }

    #[test]
    fn test_converted_to_incompatible_is_none() {
        let salt = Ingredient::with_quantity("salt", 1.0, Some("cup"));
        assert!(salt.converted_to("g").is_none());
    }

    #[test]
    fn test_convert_in_place_updates_raw_fields() {
        let mut flour = Ingredient::with_quantity("flour", 1.0, Some("cup"));
        assert!(flour.convert_in_place("g"));
        assert_close(flour.quantity.unwrap(), 140.0);
        assert_eq!(flour.unit.as_deref(), Some("g"));
        assert_eq!(flour.raw_unit.as_deref(), Some("g"));
        // The raw display quantity tracks the converted value.
        let raw: f64 = flour.raw_quantity.as_deref().unwrap().parse().unwrap();
        assert_close(raw, 140.0);
    }

    #[test]
    fn test_convert_in_place_failure_leaves_fields() {
        let mut salt = Ingredient::with_quantity("salt", 1.0, Some("cup"));
        assert!(!salt.convert_in_place("g"));
        assert_eq!(salt.unit.as_deref(), Some("cup"));
        assert_close(salt.quantity.unwrap(), 1.0);
    }
}
