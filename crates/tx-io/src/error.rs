use thiserror::Error;

#[derive(Debug, Error)]
pub enum IoError {
    #[error("I/O error reading/writing {source_name}: {cause}")]
    Stream { source_name: String, cause: std::io::Error },
    #[error("invalid byte sequence from {source_name} at byte offset {at}")]
    Decode { source_name: String, at: usize },
}

pub type Result<T> = std::result::Result<T, IoError>;
