//! Codec mode and per-stream conversion state.

use tx_core::ByteOrder;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderMode {
    Consume,
    Generate,
}

/// A codec's configuration. Each concrete codec (UTF-8, UTF-16, ANSI) wraps
/// this with its own extra knobs; this carries the one every codec shares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderPolicy {
    pub headers: HeaderMode,
}

impl Default for HeaderPolicy {
    fn default() -> Self {
        Self { headers: HeaderMode::Consume }
    }
}

impl HeaderPolicy {
    pub fn consume_header(&self) -> bool {
        self.headers == HeaderMode::Consume
    }

    pub fn generate_header(&self) -> bool {
        self.headers == HeaderMode::Generate
    }
}

/// Two-phase flag threaded across successive calls on the same logical
/// stream: whether the header (BOM) has already been consumed or emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Initial,
    PassedOnceOrMore,
}

/// Per-stream codec state: the two-phase flag, and (UTF-16 only) the byte
/// order discovered on the first chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecState {
    pub phase: Phase,
    pub byte_order: ByteOrder,
}

impl CodecState {
    pub fn new(default_order: ByteOrder) -> Self {
        Self { phase: Phase::Initial, byte_order: default_order }
    }

    pub fn is_initial(&self) -> bool {
        self.phase == Phase::Initial
    }

    pub fn mark_passed(&mut self) {
        tracing::debug!(byte_order = ?self.byte_order, "codec state leaving initial phase");
        self.phase = Phase::PassedOnceOrMore;
    }
}

impl Default for CodecState {
    fn default() -> Self {
        Self::new(ByteOrder::platform())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codepage {
    Cp1250,
    Cp1251,
    Cp1252,
}
