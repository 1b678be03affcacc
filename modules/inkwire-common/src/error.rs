use thiserror::Error;

/// Entity parsing failure. Only raised for fields a record cannot exist
/// without (numeric identifiers); everything else degrades to a default.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("field {field} is not {expected}: got {got}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
        got: String,
    },
}
