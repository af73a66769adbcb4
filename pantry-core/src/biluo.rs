//! BILUO tag codec for per-token label sequences.
//!
//! BILUO marks each token of an entity span:
//! - **B**egin: first token of a multi-token entity
//! - **I**n: inner token of a multi-token entity
//! - **L**ast: final token of a multi-token entity
//! - **U**nit: single-token entity
//! - **O**ut: non-entity token
//!
//! [`encode`] turns a plain label sequence (empty string meaning no label)
//! into BILUO-prefixed tags for training. [`decode`] joins tagged,
//! offset-annotated tokens back into merged spans. Tag sequences come from a
//! statistical model and are expected to be occasionally inconsistent, so
//! decoding tolerates malformed runs by dropping them instead of erroring.

use serde::{Deserialize, Serialize};

/// A BILUO position marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Biluo {
    #[serde(rename = "B")]
    Begin,
    #[serde(rename = "I")]
    In,
    #[serde(rename = "L")]
    Last,
    #[serde(rename = "U")]
    Unit,
    #[serde(rename = "O")]
    Out,
}

impl Biluo {
    pub fn as_str(&self) -> &'static str {
        match self {
            Biluo::Begin => "B",
            Biluo::In => "I",
            Biluo::Last => "L",
            Biluo::Unit => "U",
            Biluo::Out => "O",
        }
    }

    pub fn from_str(s: &str) -> Option<Biluo> {
        match s {
            "B" => Some(Biluo::Begin),
            "I" => Some(Biluo::In),
            "L" => Some(Biluo::Last),
            "U" => Some(Biluo::Unit),
            "O" => Some(Biluo::Out),
            _ => None,
        }
    }
}

/// A token with offsets and a predicted BILUO-tagged label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedToken {
    pub label: String,
    pub start: usize,
    pub end: usize,
    pub tag: Biluo,
}

/// A merged labeled span with exclusive end offset into the source line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledSpan {
    pub label: String,
    pub start: usize,
    pub end: usize,
}

impl LabeledSpan {
    pub fn new(label: impl Into<String>, start: usize, end: usize) -> LabeledSpan {
        LabeledSpan {
            label: label.into(),
            start,
            end,
        }
    }
}

/// Prepend BILUO markers to a label sequence.
///
/// An empty label encodes to "O"; a labeled token encodes to
/// "<marker>-<label>" with the marker chosen by comparing the label to its
/// neighbors. The first token can only resolve to B, U, or O and the last
/// to L, U, or O.
pub fn encode<S: AsRef<str>>(labels: &[S]) -> Vec<String> {
    let n = labels.len();
    let label = |i: usize| labels[i].as_ref();

    if n == 0 {
        return Vec::new();
    }
    if n == 1 {
        return vec![if label(0).is_empty() {
            "O".to_string()
        } else {
            format!("U-{}", label(0))
        }];
    }

    let mut tagged = Vec::with_capacity(n);

    if label(0).is_empty() {
        tagged.push("O".to_string());
    } else if label(0) == label(1) {
        tagged.push(format!("B-{}", label(0)));
    } else {
        tagged.push(format!("U-{}", label(0)));
    }

    for i in 1..n - 1 {
        if label(i).is_empty() {
            tagged.push("O".to_string());
            continue;
        }
        let prv = label(i) == label(i - 1);
        let nxt = label(i) == label(i + 1);
        let marker = match (prv, nxt) {
            (false, true) => Biluo::Begin,
            (true, true) => Biluo::In,
            (true, false) => Biluo::Last,
            (false, false) => Biluo::Unit,
        };
        tagged.push(format!("{}-{}", marker.as_str(), label(i)));
    }

    if label(n - 1).is_empty() {
        tagged.push("O".to_string());
    } else if label(n - 1) == label(n - 2) {
        tagged.push(format!("L-{}", label(n - 1)));
    } else {
        tagged.push(format!("U-{}", label(n - 1)));
    }

    tagged
}

/// Join BILUO-tagged tokens into merged labeled spans.
///
/// Runs a small state machine with at most one open span. U emits a
/// single-token span; B opens a span (silently discarding any unterminated
/// one); I continues an open span only when the labels match; L emits the
/// open span through the current token's end offset when the labels match.
/// Any inconsistent tag drops the open span without emitting, and a span
/// still open at the end of input is dropped. Never errors.
pub fn decode(tokens: &[TaggedToken]) -> Vec<LabeledSpan> {
    let mut joined = Vec::new();
    let mut open: Option<(&str, usize)> = None;

    for token in tokens {
        match token.tag {
            Biluo::Unit => {
                joined.push(LabeledSpan::new(token.label.clone(), token.start, token.end));
                open = None;
            }
            Biluo::Begin => {
                open = Some((token.label.as_str(), token.start));
            }
            Biluo::In => {
                if open.map_or(true, |(label, _)| label != token.label) {
                    open = None;
                }
            }
            Biluo::Last => {
                if let Some((label, start)) = open {
                    if label == token.label {
                        joined.push(LabeledSpan::new(label, start, token.end));
                    }
                }
                open = None;
            }
            Biluo::Out => {
                open = None;
            }
        }
    }

    joined
}
