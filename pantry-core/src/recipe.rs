//! Recipe assembly from tagged ingredient lines.
//!
//! Scraping and sequence labeling are external collaborators; their output
//! arrives here as lines of text with BILUO-tagged tokens. This module
//! decodes the tags and turns each line into an [`Ingredient`].

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::biluo::{decode, LabeledSpan, TaggedToken};
use crate::error::ParseError;
use crate::ingredient::Ingredient;

/// Labels assigned by the tagging model.
pub const LABEL_INGREDIENT: &str = "Ingredient";
pub const LABEL_QUANTITY: &str = "Quantity";
pub const LABEL_UNIT: &str = "Unit";

/// One ingredient line with its model-predicted token tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggedLine {
    pub text: String,
    pub tokens: Vec<TaggedToken>,
}

/// Build an ingredient from a source line and its decoded labeled spans.
///
/// The first span of each label supplies the name, raw quantity, and raw
/// unit substrings; the verbatim line is kept for display. Spans with
/// offsets that fall outside the line are skipped.
pub fn ingredient_from_spans(
    line: &str,
    spans: &[LabeledSpan],
) -> Result<Ingredient, ParseError> {
    let mut name = None;
    let mut quantity = None;
    let mut unit = None;

    for span in spans {
        let Some(slice) = line.get(span.start..span.end) else {
            continue;
        };
        match span.label.as_str() {
            LABEL_INGREDIENT if name.is_none() => name = Some(slice),
            LABEL_QUANTITY if quantity.is_none() => quantity = Some(slice),
            LABEL_UNIT if unit.is_none() => unit = Some(slice),
            _ => {}
        }
    }

    Ingredient::from_raw(name, quantity, unit, Some(line))
}

/// A recipe with its ingredients parsed from tagged lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub title: String,
    pub source: String,
    pub servings: Option<String>,
    pub instructions: Vec<String>,
    pub ingredients: Vec<Ingredient>,
}

impl Recipe {
    /// Build a recipe from tagged ingredient lines.
    ///
    /// A line whose quantity cannot be parsed is skipped with a notice;
    /// the rest of the recipe survives.
    pub fn from_tagged_lines(
        title: impl Into<String>,
        source: impl Into<String>,
        servings: Option<String>,
        instructions: Vec<String>,
        lines: &[TaggedLine],
    ) -> Recipe {
        let ingredients = lines
            .iter()
            .filter_map(|line| {
                let spans = decode(&line.tokens);
                match ingredient_from_spans(&line.text, &spans) {
                    Ok(ingredient) => Some(ingredient),
                    Err(err) => {
                        warn!(%err, line = %line.text, "skipping unparseable ingredient line");
                        None
                    }
                }
            })
            .collect();

        Recipe {
            title: title.into(),
            source: source.into(),
            servings,
            instructions,
            ingredients,
        }
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = "-".repeat(20);

        writeln!(f, "{}", self.title)?;
        writeln!(f, "(Source: {})", self.source)?;
        writeln!(f, "\n{sep}\n")?;

        writeln!(f, "Ingredients:\n")?;
        for ingredient in &self.ingredients {
            writeln!(f, "{ingredient}")?;
        }
        writeln!(f, "\n{sep}\n")?;

        writeln!(f, "Instructions:")?;
        for (n, line) in self.instructions.iter().enumerate() {
            writeln!(f, "\n{}. {}", n + 1, line)?;
        }

        Ok(())
    }
}
