use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("unparseable numeric literal: {0:?}")]
    UnparseableNumeric(String),

    #[error("ingredient requires a name or display text")]
    MissingName,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum UnitError {
    #[error("unknown unit: {0:?}")]
    UnknownUnit(String),

    #[error("incompatible unit types or unknown density: {from:?} -> {to:?}")]
    Incompatible { from: String, to: String },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MergeError {
    #[error("ingredient name mismatch: {left:?} vs {right:?}")]
    NameMismatch {
        left: Option<String>,
        right: Option<String>,
    },

    #[error("cannot add an ingredient without a quantity: {0:?}")]
    MissingQuantity(Option<String>),

    #[error("only one side of the addition has a unit: {left:?} vs {right:?}")]
    UnitMismatch {
        left: Option<String>,
        right: Option<String>,
    },

    #[error(transparent)]
    Unit(#[from] UnitError),
}
