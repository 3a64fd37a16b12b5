use thiserror::Error;

/// Why a tree could not be turned into a sample string.
///
/// Every variant carries the `offset` of the node at fault.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GenerateError {
    #[error("no candidate character remains for the inverted charset at offset {offset}")]
    ExhaustedPool { offset: usize },
    #[error("charset at offset {offset} has no members")]
    EmptyCharset { offset: usize },
    #[error("expected a quantifier at offset {offset}, found `{found}`")]
    NotAQuantifier { offset: usize, found: &'static str },
    #[error("quantifier at offset {offset} has bounds {min}..={max}")]
    InvalidBounds { offset: usize, min: i64, max: i64 },
    #[error("range endpoint at offset {offset} must be one character, got {got:?}")]
    InvalidRangeEndpoint { offset: usize, got: String },
    #[error("range at offset {offset} runs backwards from {start:?} to {end:?}")]
    BackwardsRange { offset: usize, start: char, end: char },
    #[error("`{code}` at offset {offset} is not a base-{radix} number")]
    InvalidCode {
        offset: usize,
        code: String,
        radix: u32,
    },
    #[error("code point {value:#x} at offset {offset} is not a character")]
    InvalidCodePoint { offset: usize, value: u32 },
    #[error("unknown control character `\\c{code}` at offset {offset}")]
    UnknownControl { offset: usize, code: char },
    #[error("pattern nesting at offset {offset} exceeds the depth limit of {limit}")]
    TooDeep { offset: usize, limit: usize },
}
