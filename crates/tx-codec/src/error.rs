use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("unknown codepage name: {0:?}")]
    UnknownCodepage(String),
}

pub type Result<T> = std::result::Result<T, CodecError>;
