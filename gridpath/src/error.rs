use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("malformed vertex label {0:?}, expected \"(x, y)\"")]
    MalformedLabel(String),
    /// The parent chain kept by a search is broken. Indicates a bug in the
    /// search itself, never bad user input.
    #[error("search state invariant violated: {0}")]
    InvariantViolation(String),
}
