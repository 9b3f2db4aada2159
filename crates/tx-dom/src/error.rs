//! Programmer-error surface of the DOM: the misuse cases a caller can hit
//! while building or mutating a document by hand.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomError {
    #[error("value originates from a different document")]
    ForeignValue,
    #[error("a value is already attached to a parent")]
    AlreadyHasParent,
    #[error("duplicate member name {0:?}")]
    DuplicateMember(String),
    #[error("document already has a root value")]
    RootAlreadySet,
    #[error("not a valid literal 'false', 'true', or 'null': {0:?}")]
    InvalidLiteralText(String),
    #[error("text {0:?} does not match the requested number subtype")]
    InvalidNumberText(String),
    #[error("value is not an object")]
    NotAnObject,
    #[error("value is not an array")]
    NotAnArray,
}

pub type Result<T> = std::result::Result<T, DomError>;
