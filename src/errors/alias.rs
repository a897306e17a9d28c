use thiserror::Error;

/// Failures of the alias encoder/decoder.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AliasError {
    /// Only store-assigned ids (1, 2, 3, ...) can be encoded.
    #[error("Cannot encode non-positive id {0}")]
    InvalidEncodingInput(i64),

    /// The string is not the canonical encoding of any positive id.
    #[error("Malformed alias '{0}'")]
    MalformedAlias(String),
}
