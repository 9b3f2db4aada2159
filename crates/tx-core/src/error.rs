use thiserror::Error;

/// Programmer-error surface for this crate: malformed numeric text handed to a
/// constructor, or a caller mixing up wide/byte forms. Syntax errors from user
/// input never come through here — see [`crate::diag`] for those.
#[derive(Debug, Error)]
pub enum TxCoreError {
    #[error("not a valid number literal: {0:?}")]
    InvalidNumberLiteral(String),
    #[error("byte slice too short to detect byte order (need at least 2 bytes, got {0})")]
    ShortByteOrderSample(usize),
}

pub type Result<T> = std::result::Result<T, TxCoreError>;
