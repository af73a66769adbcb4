//! Numeric literal parsing for recipe quantities.
//!
//! Recognizes the numeric forms that show up in ingredient lines: integers,
//! decimals, ASCII fractions ("1/2"), vulgar fraction glyphs ("½"),
//! superscript/subscript fractions ("¹⁄₃"), and mixed fractions ("1 1/2",
//! "1½"). Each grammar is a separately compiled pattern so the overlapping
//! fraction forms stay testable in isolation.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ParseError;

const INTEGER: &str = "[0-9]+";
const DECIMAL: &str = r"[0-9]+\.[0-9]+";
/// ASCII fractions, accepting both the solidus and the unicode fraction slash.
const ASCII_FRACTION: &str = "[0-9]+[⁄/][0-9]+";
/// Single-glyph vulgar fractions (½, ⅓, ...).
const VULGAR: &str = "[½⅓⅔¼¾⅕⅖⅗⅘⅙⅚⅐⅛⅜⅝⅞⅑⅒]";
/// Multi-glyph unicode fractions: superscript digits over subscript digits.
const UNICODE_FRACTION: &str = "[¹²³⁴⁵⁶⁷⁸⁹]+[⁄/][₁₂₃₄₅₆₇₈₉]+";

/// Scan patterns anchored at the current position, in precedence order.
/// Mixed forms come first so "1 1/2" is never split into "1" and "1/2".
static SCAN_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        format!("^[0-9]+\\s+(?:{ASCII_FRACTION})"),
        format!("^[0-9]+\\s*(?:{VULGAR}|{UNICODE_FRACTION})"),
        format!("^(?:{ASCII_FRACTION})"),
        format!("^{VULGAR}"),
        format!("^(?:{UNICODE_FRACTION})"),
        format!("^{DECIMAL}"),
        format!("^{INTEGER}"),
    ]
    .iter()
    .map(|p| Regex::new(p).expect("Invalid numeric scan regex"))
    .collect()
});

static MIXED_ASCII_FULL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("^([0-9]+)\\s+({ASCII_FRACTION})$")).expect("Invalid mixed fraction regex")
});

static MIXED_UNICODE_FULL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("^([0-9]+)\\s*({VULGAR}|{UNICODE_FRACTION})$"))
        .expect("Invalid mixed fraction regex")
});

static ASCII_FRACTION_FULL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("^([0-9]+)[⁄/]([0-9]+)$").expect("Invalid fraction regex")
});

static UNICODE_FRACTION_FULL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("^([¹²³⁴⁵⁶⁷⁸⁹]+)[⁄/]([₁₂₃₄₅₆₇₈₉]+)$").expect("Invalid fraction regex")
});

static NUMBER_FULL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+(\.[0-9]+)?$").expect("Invalid number regex"));

/// f64 carries no more usable decimal digits than this; larger requested
/// precisions are clamped so the scale factor stays finite.
const MAX_PRECISION: u32 = 15;

/// Numerator/denominator for a single vulgar fraction glyph.
fn vulgar_value(c: char) -> Option<(u64, u64)> {
    let pair = match c {
        '½' => (1, 2),
        '⅓' => (1, 3),
        '⅔' => (2, 3),
        '¼' => (1, 4),
        '¾' => (3, 4),
        '⅕' => (1, 5),
        '⅖' => (2, 5),
        '⅗' => (3, 5),
        '⅘' => (4, 5),
        '⅙' => (1, 6),
        '⅚' => (5, 6),
        '⅐' => (1, 7),
        '⅛' => (1, 8),
        '⅜' => (3, 8),
        '⅝' => (5, 8),
        '⅞' => (7, 8),
        '⅑' => (1, 9),
        '⅒' => (1, 10),
        _ => return None,
    };
    Some(pair)
}

fn superscript_digit(c: char) -> Option<char> {
    "¹²³⁴⁵⁶⁷⁸⁹"
        .chars()
        .position(|s| s == c)
        .and_then(|i| char::from_digit(i as u32 + 1, 10))
}

fn subscript_digit(c: char) -> Option<char> {
    "₁₂₃₄₅₆₇₈₉"
        .chars()
        .position(|s| s == c)
        .and_then(|i| char::from_digit(i as u32 + 1, 10))
}

fn unparseable(s: &str) -> ParseError {
    ParseError::UnparseableNumeric(s.to_string())
}

fn fraction(numerator: u64, denominator: u64, source: &str) -> Result<f64, ParseError> {
    if denominator == 0 {
        return Err(unparseable(source));
    }
    Ok(numerator as f64 / denominator as f64)
}

/// Parse a numeric literal into a non-negative float.
///
/// Mixed fractions contribute their integer part on top of the fraction
/// value; plain fractions are numerator over denominator. When `precision`
/// is given, the fractional component is rounded half-up at that many
/// decimal places (exact halves always round up, matching the NYT Cooking
/// training data) before the integer part is added. Literals matching none
/// of the grammars fail with [`ParseError`]; callers must not coerce.
pub fn parse_numeric(s: &str, precision: Option<u32>) -> Result<f64, ParseError> {
    let mut whole = 0.0;
    let mut body = s;

    if let Some(caps) = MIXED_ASCII_FULL
        .captures(s)
        .or_else(|| MIXED_UNICODE_FULL.captures(s))
    {
        whole = caps[1].parse().map_err(|_| unparseable(s))?;
        body = caps.get(2).map_or(body, |m| m.as_str());
    }

    let x = if NUMBER_FULL.is_match(body) {
        body.parse::<f64>().map_err(|_| unparseable(s))?
    } else if let Some(caps) = ASCII_FRACTION_FULL.captures(body) {
        let n = caps[1].parse().map_err(|_| unparseable(s))?;
        let d = caps[2].parse().map_err(|_| unparseable(s))?;
        fraction(n, d, s)?
    } else if let Some((n, d)) = single_vulgar(body) {
        fraction(n, d, s)?
    } else if let Some(caps) = UNICODE_FRACTION_FULL.captures(body) {
        let n: String = caps[1]
            .chars()
            .filter_map(superscript_digit)
            .collect();
        let d: String = caps[2].chars().filter_map(subscript_digit).collect();
        let n = n.parse().map_err(|_| unparseable(s))?;
        let d = d.parse().map_err(|_| unparseable(s))?;
        fraction(n, d, s)?
    } else {
        return Err(unparseable(s));
    };

    match precision {
        Some(p) => {
            let scale = 10f64.powi(p.min(MAX_PRECISION) as i32);
            Ok(whole + (x * scale + 0.5).floor() / scale)
        }
        None => Ok(whole + x),
    }
}

/// The vulgar-fraction value of `s` if it is exactly one glyph.
fn single_vulgar(s: &str) -> Option<(u64, u64)> {
    let mut chars = s.chars();
    let value = vulgar_value(chars.next()?)?;
    if chars.next().is_some() {
        return None;
    }
    Some(value)
}

/// A numeric literal found while scanning free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumericMatch<'a> {
    pub text: &'a str,
    pub start: usize,
    pub end: usize,
}

/// Lazy left-to-right scan over all non-overlapping numeric literals in `s`.
///
/// At each position the grammars are tried in precedence order, so mixed
/// fractions win over their integer prefix. Each call starts a fresh scan.
pub fn find_numeric(s: &str) -> NumericMatches<'_> {
    NumericMatches {
        haystack: s,
        pos: 0,
    }
}

/// Whether any substring of `s` is a numeric literal.
///
/// Used as a token-level feature flag, so this is a search rather than a
/// full-match test.
pub fn is_numeric(s: &str) -> bool {
    find_numeric(s).next().is_some()
}

/// Iterator returned by [`find_numeric`].
#[derive(Debug, Clone)]
pub struct NumericMatches<'a> {
    haystack: &'a str,
    pos: usize,
}

impl<'a> Iterator for NumericMatches<'a> {
    type Item = NumericMatch<'a>;

    fn next(&mut self) -> Option<NumericMatch<'a>> {
        let hay = self.haystack;
        let mut i = self.pos;
        while i < hay.len() {
            if hay.is_char_boundary(i) {
                for pattern in SCAN_PATTERNS.iter() {
                    if let Some(m) = pattern.find(&hay[i..]) {
                        let (start, end) = (i, i + m.end());
                        self.pos = end;
                        return Some(NumericMatch {
                            text: &hay[start..end],
                            start,
                            end,
                        });
                    }
                }
            }
            i += 1;
        }
        self.pos = hay.len();
        None
    }
}
