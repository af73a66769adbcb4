//! Ingredient density lookup for mass/volume conversion.
//!
//! Densities are stored as grams per US cup (240 ml by the legal definition
//! used in the volume table) and exposed as grams per milliliter. Data is
//! embedded at compile time from `data/density.json`, which holds canonical
//! ingredient entries plus an alias map for common alternate names.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::Deserialize;

/// Milliliters per US cup, matching the volume conversion table.
pub const ML_PER_CUP: f64 = 240.0;

#[derive(Deserialize)]
struct DensityFile {
    /// Canonical ingredient name -> grams per cup.
    ingredients: HashMap<String, f64>,
    /// Alternate name -> canonical name.
    aliases: HashMap<String, String>,
}

static DENSITY_JSON: &str = include_str!("data/density.json");

static DATA: LazyLock<DensityFile> =
    LazyLock::new(|| serde_json::from_str(DENSITY_JSON).expect("density.json should be valid JSON"));

/// Density of an ingredient in grams per milliliter, if known.
///
/// Lookup is an exact match on the lowercased, trimmed name, first against
/// the canonical entries and then through the alias map.
pub fn find_density(name: &str) -> Option<f64> {
    let key = name.trim().to_lowercase();
    let grams_per_cup = DATA.ingredients.get(&key).copied().or_else(|| {
        DATA.aliases
            .get(&key)
            .and_then(|canonical| DATA.ingredients.get(canonical))
            .copied()
    })?;
    Some(grams_per_cup / ML_PER_CUP)
}
