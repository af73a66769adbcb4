//! Core logic for turning tagged recipe text into a combinable grocery list.
//!
//! Scraping, tokenization, and the sequence-labeling model are external
//! collaborators; this crate owns everything after them: numeric-literal
//! parsing, unit standardization and conversion (including density-based
//! mass/volume bridging), the BILUO tag codec, the [`Ingredient`] quantity
//! model, and grocery-list aggregation.

pub mod biluo;
pub mod density;
pub mod error;
pub mod features;
pub mod grocery_list;
pub mod ingredient;
pub mod numeric;
pub mod recipe;
pub mod units;

pub use biluo::{decode, encode, Biluo, LabeledSpan, TaggedToken};
pub use density::find_density;
pub use error::{MergeError, ParseError, UnitError};
pub use features::{create_features, is_symbol, Token, TokenFeatures};
pub use grocery_list::GroceryList;
pub use ingredient::Ingredient;
pub use numeric::{find_numeric, is_numeric, parse_numeric, NumericMatch};
pub use recipe::{ingredient_from_spans, Recipe, TaggedLine};
pub use units::{conversion_factor, standardize, unit_type, UnitType};
