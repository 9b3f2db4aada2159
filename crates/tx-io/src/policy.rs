//! Text I/O policy: which encoding a reader/writer decodes or produces. One
//! enum rather than a class-per-encoding hierarchy, since the set of
//! encodings is closed.

use tx_codec::{Codepage, HeaderMode, HeaderPolicy, Utf16Mode};
use tx_core::ByteOrder;

pub const DEFAULT_MAX_TEXT_BUF_SIZE: usize = 1024;

#[derive(Debug, Clone, Copy)]
pub enum Encoding {
    /// Pass-through: bytes/wide-chars are not transformed at all.
    Plain,
    Ansi { page: Codepage, headers: HeaderPolicy },
    Utf8 { headers: HeaderPolicy },
    Utf16 { mode: Utf16Mode },
}

/// Builder-style configuration, constructed with `new`/`with_*` rather than a
/// derive-heavy config framework.
#[derive(Debug, Clone, Copy)]
pub struct Policy {
    max_text_buf_size: usize,
    encoding: Encoding,
}

impl Default for Policy {
    fn default() -> Self {
        Self { max_text_buf_size: DEFAULT_MAX_TEXT_BUF_SIZE, encoding: Encoding::Plain }
    }
}

impl Policy {
    pub fn new(encoding: Encoding) -> Self {
        Self { encoding, ..Self::default() }
    }

    pub fn plain() -> Self {
        Self::new(Encoding::Plain)
    }

    pub fn utf8(headers: HeaderMode) -> Self {
        Self::new(Encoding::Utf8 { headers: HeaderPolicy { headers } })
    }

    pub fn utf16(headers: HeaderMode, byte_order: Option<ByteOrder>) -> Self {
        Self::new(Encoding::Utf16 { mode: Utf16Mode { headers: HeaderPolicy { headers }, byte_order } })
    }

    pub fn ansi(page: Codepage, headers: HeaderMode) -> Self {
        Self::new(Encoding::Ansi { page, headers: HeaderPolicy { headers } })
    }

    pub fn with_max_text_buf_size(mut self, value: usize) -> Self {
        self.max_text_buf_size = value;
        self
    }

    pub fn max_text_buf_size(&self) -> usize {
        self.max_text_buf_size
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }
}
