use thiserror::Error;

/// A control value (month/year label, granularity, timestamp) that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind}: {input:?}")]
pub struct ParseError {
    pub kind: &'static str,
    pub input: String,
}

impl ParseError {
    pub fn new(kind: &'static str, input: &str) -> Self {
        Self {
            kind,
            input: input.to_string(),
        }
    }
}
