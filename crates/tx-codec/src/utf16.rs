//! UTF-16 (LE/BE, with auto-detection) <-> wide codec.

use crate::state::{CodecState, HeaderPolicy};
use crate::traits::{Codec, ConvResult};
use tx_core::{bom, ByteOrder};

#[derive(Debug, Clone, Copy)]
pub struct Utf16Mode {
    pub headers: HeaderPolicy,
    /// `None` means "auto-detect on first chunk".
    pub byte_order: Option<ByteOrder>,
}

impl Default for Utf16Mode {
    fn default() -> Self {
        Self { headers: HeaderPolicy::default(), byte_order: None }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Utf16Codec {
    pub mode: Utf16Mode,
}

impl Utf16Codec {
    pub fn new(mode: Utf16Mode) -> Self {
        Self { mode }
    }

    fn read_unit(bytes: &[u8], order: ByteOrder) -> u16 {
        match order {
            ByteOrder::LittleEndian => (bytes[1] as u16) << 8 | bytes[0] as u16,
            ByteOrder::BigEndian => (bytes[0] as u16) << 8 | bytes[1] as u16,
        }
    }
}

impl Codec for Utf16Codec {
    fn decode(&self, state: &mut CodecState, input: &[u8], output: &mut [u16]) -> ConvResult {
        let mut next1 = 0usize;
        let mut next2 = 0usize;
        while input.len() - next1 >= 2 && next2 < output.len() {
            if state.is_initial() {
                state.byte_order = self.mode.byte_order.unwrap_or(state.byte_order);
                state.mark_passed();
                if self.mode.byte_order.is_none() {
                    if let Some(detected) = bom::try_detect_byte_order(&input[next1..]) {
                        tracing::debug!(?detected, "auto-detected utf-16 byte order from bom");
                        state.byte_order = detected;
                    } else {
                        tracing::warn!("no bom present, assuming platform byte order for utf-16 input");
                    }
                }
                let c2 = Self::read_unit(&input[next1..], state.byte_order);
                if self.mode.headers.generate_header() {
                    if next2 >= output.len() {
                        break;
                    }
                    output[next2] = bom::BOM_CODEPOINT;
                    next2 += 1;
                }
                next1 += 2;
                if bom::is_bom(c2) {
                    continue;
                }
                if next2 >= output.len() {
                    next1 -= 2;
                    break;
                }
                output[next2] = c2;
                next2 += 1;
            } else {
                let c2 = Self::read_unit(&input[next1..], state.byte_order);
                output[next2] = c2;
                next2 += 1;
                next1 += 2;
            }
        }
        if next1 < input.len() {
            ConvResult::Partial { consumed: next1, produced: next2 }
        } else {
            ConvResult::Ok { consumed: next1, produced: next2 }
        }
    }

    fn encode(&self, state: &mut CodecState, input: &[u16], output: &mut [u8]) -> ConvResult {
        let order = self.mode.byte_order.unwrap_or(ByteOrder::platform());
        let mut next1 = 0usize;
        let mut next2 = 0usize;

        if state.is_initial() {
            state.byte_order = order;
            state.mark_passed();
            if self.mode.headers.generate_header() {
                if output.len() < 2 {
                    return ConvResult::Partial { consumed: 0, produced: 0 };
                }
                let bytes = match order {
                    ByteOrder::LittleEndian => bom::BOM_UTF16_LE,
                    ByteOrder::BigEndian => bom::BOM_UTF16_BE,
                };
                output[..2].copy_from_slice(&bytes);
                next2 += 2;
            }
        }

        let put = |out: &mut [u8], at: usize, c2: u16| {
            match order {
                ByteOrder::LittleEndian => {
                    out[at] = (c2 & 0xFF) as u8;
                    out[at + 1] = (c2 >> 8) as u8;
                }
                ByteOrder::BigEndian => {
                    out[at] = (c2 >> 8) as u8;
                    out[at + 1] = (c2 & 0xFF) as u8;
                }
            }
        };

        while next1 < input.len() && output.len() - next2 >= 2 {
            let c2 = input[next1];
            if bom::is_bom(c2) {
                next1 += 1;
                continue;
            }
            put(output, next2, c2);
            next2 += 2;
            next1 += 1;
        }
        if next1 < input.len() {
            ConvResult::Partial { consumed: next1, produced: next2 }
        } else {
            ConvResult::Ok { consumed: next1, produced: next2 }
        }
    }
}
