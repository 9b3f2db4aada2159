//! UTF-8 <-> wide codec.

use crate::state::{CodecState, HeaderPolicy};
use crate::traits::{Codec, ConvResult};
use tx_core::bom;

const CHK_SEQ1: u8 = 0x80;
const CHK_SEQ2: u8 = 0xC0;
const CHK_SEQ3: u8 = 0xE0;
const CHK_SEQ4: u8 = 0xF0;
const CHK_SEQ5: u8 = 0xF8;
const CHK_SEQ6: u8 = 0xFC;

const CODE_POINT1: u32 = 0x80;
const CODE_POINT2: u32 = 0x800;
const CODE_POINT3: u32 = 0x10000;
const CODE_POINT4: u32 = 0x200000;
const CODE_POINT5: u32 = 0x4000000;

#[derive(Debug, Clone, Copy, Default)]
pub struct Utf8Codec {
    pub policy: HeaderPolicy,
}

impl Utf8Codec {
    pub fn new(policy: HeaderPolicy) -> Self {
        Self { policy }
    }

    /// Sequence length implied by the leading byte's high bits. Accepts the
    /// full classic 1-6 byte range for compatibility, though RFC 3629 caps
    /// sequences at 4 bytes.
    fn seq_len(c1: u8) -> (usize, u32) {
        if c1 < CHK_SEQ1 {
            (1, c1 as u32)
        } else if c1 < CHK_SEQ3 {
            (2, (c1 & 0x1F) as u32)
        } else if c1 < CHK_SEQ4 {
            (3, (c1 & 0x0F) as u32)
        } else if c1 < CHK_SEQ5 {
            (4, (c1 & 0x07) as u32)
        } else if c1 < CHK_SEQ6 {
            (5, (c1 & 0x03) as u32)
        } else {
            (6, (c1 & 0x03) as u32)
        }
    }
}

impl Codec for Utf8Codec {
    fn decode(&self, state: &mut CodecState, input: &[u8], output: &mut [u16]) -> ConvResult {
        let mut next1 = 0usize;
        let mut next2 = 0usize;
        while next1 < input.len() && next2 < output.len() {
            let char_start = next1;
            let c1 = input[next1];
            if c1 >= CHK_SEQ1 && c1 < CHK_SEQ2 {
                // 0x80-0xBF can never open a sequence.
                return ConvResult::Error { consumed: next1 + 1, produced: next2, at: next1 };
            }
            let (n, mut c2) = Self::seq_len(c1);
            if n == 1 {
                next1 += 1;
            } else {
                if input.len() - next1 < n {
                    break; // incomplete trailing sequence: wait for more input
                }
                let mut cursor = next1 + 1;
                let mut ok = true;
                for _ in 1..n {
                    let cb = input[cursor];
                    cursor += 1;
                    if cb < CHK_SEQ1 || cb >= CHK_SEQ2 {
                        ok = false;
                        break;
                    }
                    c2 = (c2 << 6) | (cb & 0x3F) as u32;
                }
                if !ok {
                    return ConvResult::Error { consumed: cursor, produced: next2, at: char_start };
                }
                next1 = cursor;
            }

            if state.is_initial() {
                state.mark_passed();
                if c2 == bom::BOM_CODEPOINT as u32 {
                    tracing::debug!(consume = self.policy.consume_header(), "utf-8 bom found at start of input");
                    if !self.policy.consume_header() {
                        output[next2] = bom::BOM_CODEPOINT;
                        next2 += 1;
                    }
                    continue;
                } else if self.policy.generate_header() {
                    if next2 >= output.len() {
                        next1 = char_start;
                        break;
                    }
                    output[next2] = bom::BOM_CODEPOINT;
                    next2 += 1;
                    if next2 >= output.len() {
                        next1 = char_start;
                        break;
                    }
                }
            }

            if c2 > bom::MAX_CHAR {
                return ConvResult::Error { consumed: next1, produced: next2, at: char_start };
            }
            if bom::is_surrogate_pair_codepoint(c2) {
                if output.len() - next2 < 2 {
                    next1 = char_start;
                    break;
                }
                let (high, low) = bom::to_surrogate_pair(c2).expect("checked above");
                output[next2] = high;
                output[next2 + 1] = low;
                next2 += 2;
            } else {
                output[next2] = c2 as u16;
                next2 += 1;
            }
        }
        if next1 < input.len() {
            ConvResult::Partial { consumed: next1, produced: next2 }
        } else {
            ConvResult::Ok { consumed: next1, produced: next2 }
        }
    }

    fn encode(&self, state: &mut CodecState, input: &[u16], output: &mut [u8]) -> ConvResult {
        let mut next1 = 0usize;
        let mut next2 = 0usize;

        if state.is_initial() && self.policy.generate_header() {
            if output.len() < bom::BOM_UTF8.len() {
                return ConvResult::Partial { consumed: 0, produced: 0 };
            }
            output[..3].copy_from_slice(&bom::BOM_UTF8);
            next2 += 3;
        }
        if state.is_initial() {
            state.mark_passed();
        }

        while next1 < input.len() && next2 < output.len() {
            let char_start = next1;
            let mut c1 = input[next1] as u32;
            if bom::is_high_surrogate(input[next1]) && next1 + 1 < input.len() {
                if let Some(combined) = bom::from_surrogate_pair(input[next1], input[next1 + 1]) {
                    c1 = combined;
                    next1 += 1;
                }
            }
            if c1 > bom::MAX_CHAR {
                return ConvResult::Error { consumed: next1 + 1, produced: next2, at: char_start };
            }

            let (n, lead_bits): (usize, u8) = if c1 < CODE_POINT1 {
                (1, 0)
            } else if c1 < CODE_POINT2 {
                (2, CHK_SEQ2)
            } else if c1 < CODE_POINT3 {
                (3, CHK_SEQ3)
            } else if c1 < CODE_POINT4 {
                (4, CHK_SEQ4)
            } else if c1 < CODE_POINT5 {
                (5, CHK_SEQ5)
            } else {
                (6, CHK_SEQ6)
            };
            if output.len() - next2 < n {
                next1 = char_start;
                break;
            }
            if n == 1 {
                output[next2] = c1 as u8;
            } else {
                let shift = 6 * (n - 1);
                output[next2] = lead_bits | ((c1 >> shift) as u8);
                for i in 1..n {
                    let s = shift - 6 * i;
                    output[next2 + i] = CHK_SEQ1 | (((c1 >> s) & 0x3F) as u8);
                }
            }
            next2 += n;
            next1 += 1;
        }
        if next1 < input.len() {
            ConvResult::Partial { consumed: next1, produced: next2 }
        } else {
            ConvResult::Ok { consumed: next1, produced: next2 }
        }
    }
}
