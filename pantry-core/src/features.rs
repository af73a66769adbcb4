//! CRF feature extraction from an externally tokenized line.
//!
//! Tokenization, part-of-speech tagging, and the sequence model itself are
//! external collaborators. This module owns the last self-contained step on
//! the way in: turning a token stream into per-token feature records for
//! the model, which is where [`is_numeric`] is consumed as a flag. Lexical
//! attributes (entity, pos, tag, dependency) are opaque pass-throughs.

use serde::{Deserialize, Serialize};

use crate::numeric::is_numeric;

/// Punctuation-like tokens treated as symbols by the feature set.
const SYMBOLS: &[&str] = &[
    ",", ".", "(", ")", ": ", ";", "/", "\"", "'", "!", "@", "#", "$", "&", "-", "+", "?",
];

pub fn is_symbol(s: &str) -> bool {
    SYMBOLS.contains(&s)
}

/// A token produced by the external tokenizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    pub start: usize,
    pub end: usize,
    pub is_punct: bool,
    pub is_title: bool,
    pub entity: String,
    pub pos: String,
    pub tag: String,
    pub dep: String,
}

/// Per-token feature record handed to the sequence-labeling model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenFeatures {
    pub token: String,
    pub length: usize,
    pub is_numeric: bool,
    pub is_punctuation: bool,
    pub is_title: bool,
    pub is_parenthetical: bool,
    pub entity: String,
    pub pos: String,
    pub tag: String,
    pub dependency: String,
}

/// Build the feature sequence for a tokenized line.
///
/// Tracks whether the current token sits inside parentheses; the flag flips
/// after the bracket token itself, so "(" and ")" are not themselves marked
/// parenthetical on entry.
pub fn create_features(tokens: &[Token]) -> Vec<TokenFeatures> {
    let mut seq = Vec::with_capacity(tokens.len());
    let mut is_parenthetical = false;

    for token in tokens {
        seq.push(TokenFeatures {
            token: token.text.to_lowercase(),
            length: token.text.chars().count(),
            is_numeric: is_numeric(&token.text),
            is_punctuation: token.is_punct,
            is_title: token.is_title,
            is_parenthetical,
            entity: token.entity.clone(),
            pos: token.pos.clone(),
            tag: token.tag.clone(),
            dependency: token.dep.clone(),
        });

        if token.text == "(" {
            is_parenthetical = true;
        }
        if token.text == ")" {
            is_parenthetical = false;
        }
    }

    seq
}
