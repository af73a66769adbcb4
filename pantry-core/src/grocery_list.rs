//! Grocery list aggregation across recipes.
//!
//! Merges ingredients by name into a consolidated list. Same-named
//! ingredients whose quantities cannot be combined (unit mismatch with no
//! density bridge, missing quantity) are kept as a second bucket under a
//! `*`-suffixed fallback key instead of being dropped, so no ingredient is
//! ever silently lost.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::ingredient::Ingredient;

/// A consolidated grocery list: entry key to aggregated ingredient.
///
/// The key is the ingredient name (or the verbatim line for nameless
/// ingredients), with `<key>*` marking an entry that could not be merged
/// into the same-named bucket.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroceryList {
    entries: HashMap<String, Ingredient>,
}

impl GroceryList {
    /// Merge ingredients in input order into a consolidated list.
    ///
    /// The first ingredient under a key is inserted as-is; later ones are
    /// added to the existing entry. A failed addition goes under the
    /// fallback key rather than failing the aggregation.
    pub fn merge<I>(ingredients: I) -> GroceryList
    where
        I: IntoIterator<Item = Ingredient>,
    {
        let mut entries: HashMap<String, Ingredient> = HashMap::new();

        for ingredient in ingredients {
            let key = entry_key(&ingredient);
            match entries.get(&key) {
                None => {
                    entries.insert(key, ingredient);
                }
                Some(existing) => match existing.add_ingredient(&ingredient) {
                    Ok(combined) => {
                        entries.insert(key, combined);
                    }
                    Err(err) => {
                        warn!(%err, key, "keeping unmergeable ingredient as a separate entry");
                        entries.insert(format!("{key}*"), ingredient);
                    }
                },
            }
        }

        GroceryList { entries }
    }

    pub fn get(&self, key: &str) -> Option<&Ingredient> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Ingredient)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Serialize as newline-separated display strings, one per aggregated
    /// ingredient. The contract leaves ordering unspecified; entries are
    /// sorted by key so output is deterministic.
    pub fn to_text(&self) -> String {
        let mut keys: Vec<&String> = self.entries.keys().collect();
        keys.sort();
        let lines: Vec<String> = keys
            .iter()
            .filter_map(|key| self.entries.get(*key))
            .map(|ingredient| ingredient.to_string())
            .collect();
        lines.join("\n")
    }
}

/// The map key for an ingredient: its name, or the verbatim line for a
/// nameless one (the construction invariant guarantees one of the two).
fn entry_key(ingredient: &Ingredient) -> String {
    ingredient
        .name
        .clone()
        .or_else(|| ingredient.text.clone())
        .unwrap_or_default()
}
