pub mod ansi;
pub mod error;
pub mod state;
pub mod traits;
pub mod utf16;
pub mod utf8;

pub use ansi::AnsiCodec;
pub use error::{CodecError, Result};
pub use state::{Codepage, HeaderMode, HeaderPolicy, CodecState, Phase};
pub use traits::{Codec, ConvResult};
pub use utf16::{Utf16Codec, Utf16Mode};
pub use utf8::Utf8Codec;

/// Resolves a codepage name. Only the three enumerated codepages are
/// supported by this core's hand-rolled tables; `by-name` lookups beyond
/// them are rejected rather than silently falling back (see DESIGN.md).
pub fn codepage_by_name(name: &str) -> Result<Codepage> {
    match name.to_ascii_lowercase().as_str() {
        "cp1250" | "windows-1250" => Ok(Codepage::Cp1250),
        "cp1251" | "windows-1251" => Ok(Codepage::Cp1251),
        "cp1252" | "windows-1252" => Ok(Codepage::Cp1252),
        other => Err(CodecError::UnknownCodepage(other.to_string())),
    }
}
