pub mod bom;
pub mod diag;
pub mod error;
pub mod numlit;
pub mod position;

pub use error::{Result, TxCoreError};

/// The library's internal text representation: a sequence of UTF-16 code
/// units, not necessarily well-formed (a lone surrogate may occur, exactly as
/// the source format allows). `String`/`char` cannot hold that, so the core
/// works over `u16` code units throughout, wrapped by `widestring` for the
/// owned/borrowed split `std::string`/`std::str` already gives native text.
pub type WString = widestring::U16String;
pub type WStr = widestring::U16Str;

pub use bom::ByteOrder;
