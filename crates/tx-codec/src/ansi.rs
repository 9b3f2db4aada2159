//! Single-byte codepage <-> wide codec. Hand-rolls 256-entry lookup tables
//! for the three enumerated codepages rather than deferring to a generic
//! decoding crate, since the BOM/state contract these codecs must honour
//! isn't something such a crate exposes (see DESIGN.md).

use crate::state::{Codepage, CodecState, HeaderPolicy};
use crate::traits::{Codec, ConvResult};
use tx_core::bom;

/// Bytes 0x80..=0xFF mapped to their Unicode code point; 0x00..=0x7F is
/// always plain ASCII for all three codepages.
#[rustfmt::skip]
const CP1252_HIGH: [u16; 128] = [
    0x20AC, 0x0081, 0x201A, 0x0192, 0x201E, 0x2026, 0x2020, 0x2021,
    0x02C6, 0x2030, 0x0160, 0x2039, 0x0152, 0x008D, 0x017D, 0x008F,
    0x0090, 0x2018, 0x2019, 0x201C, 0x201D, 0x2022, 0x2013, 0x2014,
    0x02DC, 0x2122, 0x0161, 0x203A, 0x0153, 0x009D, 0x017E, 0x0178,
    0x00A0, 0x00A1, 0x00A2, 0x00A3, 0x00A4, 0x00A5, 0x00A6, 0x00A7,
    0x00A8, 0x00A9, 0x00AA, 0x00AB, 0x00AC, 0x00AD, 0x00AE, 0x00AF,
    0x00B0, 0x00B1, 0x00B2, 0x00B3, 0x00B4, 0x00B5, 0x00B6, 0x00B7,
    0x00B8, 0x00B9, 0x00BA, 0x00BB, 0x00BC, 0x00BD, 0x00BE, 0x00BF,
    0x00C0, 0x00C1, 0x00C2, 0x00C3, 0x00C4, 0x00C5, 0x00C6, 0x00C7,
    0x00C8, 0x00C9, 0x00CA, 0x00CB, 0x00CC, 0x00CD, 0x00CE, 0x00CF,
    0x00D0, 0x00D1, 0x00D2, 0x00D3, 0x00D4, 0x00D5, 0x00D6, 0x00D7,
    0x00D8, 0x00D9, 0x00DA, 0x00DB, 0x00DC, 0x00DD, 0x00DE, 0x00DF,
    0x00E0, 0x00E1, 0x00E2, 0x00E3, 0x00E4, 0x00E5, 0x00E6, 0x00E7,
    0x00E8, 0x00E9, 0x00EA, 0x00EB, 0x00EC, 0x00ED, 0x00EE, 0x00EF,
    0x00F0, 0x00F1, 0x00F2, 0x00F3, 0x00F4, 0x00F5, 0x00F6, 0x00F7,
    0x00F8, 0x00F9, 0x00FA, 0x00FB, 0x00FC, 0x00FD, 0x00FE, 0x00FF,
];

#[rustfmt::skip]
const CP1250_HIGH: [u16; 128] = [
    0x20AC, 0x0081, 0x201A, 0x0083, 0x201E, 0x2026, 0x2020, 0x2021,
    0x0088, 0x2030, 0x0160, 0x2039, 0x015A, 0x0164, 0x017D, 0x0179,
    0x0090, 0x2018, 0x2019, 0x201C, 0x201D, 0x2022, 0x2013, 0x2014,
    0x0098, 0x2122, 0x0161, 0x203A, 0x015B, 0x0165, 0x017E, 0x017A,
    0x00A0, 0x02C7, 0x02D8, 0x0141, 0x00A4, 0x0104, 0x00A6, 0x00A7,
    0x00A8, 0x00A9, 0x015E, 0x00AB, 0x00AC, 0x00AD, 0x00AE, 0x017B,
    0x00B0, 0x00B1, 0x02DB, 0x0142, 0x00B4, 0x00B5, 0x00B6, 0x00B7,
    0x00B8, 0x0105, 0x015F, 0x00BB, 0x013D, 0x02DD, 0x013E, 0x017C,
    0x0154, 0x00C1, 0x00C2, 0x0102, 0x00C4, 0x0139, 0x0106, 0x00C7,
    0x010C, 0x00C9, 0x0118, 0x00CB, 0x011A, 0x00CD, 0x00CE, 0x010E,
    0x0110, 0x0143, 0x0147, 0x00D3, 0x00D4, 0x0150, 0x00D6, 0x00D7,
    0x0158, 0x016E, 0x00DA, 0x0170, 0x00DC, 0x00DD, 0x0162, 0x00DF,
    0x0155, 0x00E1, 0x00E2, 0x0103, 0x00E4, 0x013A, 0x0107, 0x00E7,
    0x010D, 0x00E9, 0x0119, 0x00EB, 0x011B, 0x00ED, 0x00EE, 0x010F,
    0x0111, 0x0144, 0x0148, 0x00F3, 0x00F4, 0x0151, 0x00F6, 0x00F7,
    0x0159, 0x016F, 0x00FA, 0x0171, 0x00FC, 0x00FD, 0x0163, 0x02D9,
];

#[rustfmt::skip]
const CP1251_HIGH: [u16; 128] = [
    0x0402, 0x0403, 0x201A, 0x0453, 0x201E, 0x2026, 0x2020, 0x2021,
    0x20AC, 0x2030, 0x0409, 0x2039, 0x040A, 0x040C, 0x040B, 0x040F,
    0x0452, 0x2018, 0x2019, 0x201C, 0x201D, 0x2022, 0x2013, 0x2014,
    0x0098, 0x2122, 0x0459, 0x203A, 0x045A, 0x045C, 0x045B, 0x045F,
    0x00A0, 0x040E, 0x045E, 0x0408, 0x00A4, 0x0490, 0x00A6, 0x00A7,
    0x0401, 0x00A9, 0x0404, 0x00AB, 0x00AC, 0x00AD, 0x00AE, 0x0407,
    0x00B0, 0x00B1, 0x0406, 0x0456, 0x0491, 0x00B5, 0x00B6, 0x00B7,
    0x0451, 0x2116, 0x0454, 0x00BB, 0x0458, 0x0405, 0x0455, 0x0457,
    0x0410, 0x0411, 0x0412, 0x0413, 0x0414, 0x0415, 0x0416, 0x0417,
    0x0418, 0x0419, 0x041A, 0x041B, 0x041C, 0x041D, 0x041E, 0x041F,
    0x0420, 0x0421, 0x0422, 0x0423, 0x0424, 0x0425, 0x0426, 0x0427,
    0x0428, 0x0429, 0x042A, 0x042B, 0x042C, 0x042D, 0x042E, 0x042F,
    0x0430, 0x0431, 0x0432, 0x0433, 0x0434, 0x0435, 0x0436, 0x0437,
    0x0438, 0x0439, 0x043A, 0x043B, 0x043C, 0x043D, 0x043E, 0x043F,
    0x0440, 0x0441, 0x0442, 0x0443, 0x0444, 0x0445, 0x0446, 0x0447,
    0x0448, 0x0449, 0x044A, 0x044B, 0x044C, 0x044D, 0x044E, 0x044F,
];

fn high_table(page: Codepage) -> &'static [u16; 128] {
    match page {
        Codepage::Cp1250 => &CP1250_HIGH,
        Codepage::Cp1251 => &CP1251_HIGH,
        Codepage::Cp1252 => &CP1252_HIGH,
    }
}

fn byte_to_wide(page: Codepage, b: u8) -> u16 {
    if b < 0x80 {
        b as u16
    } else {
        high_table(page)[(b - 0x80) as usize]
    }
}

fn wide_to_byte(page: Codepage, c: u16) -> Option<u8> {
    if c < 0x80 {
        return Some(c as u8);
    }
    high_table(page).iter().position(|&x| x == c).map(|i| (i + 0x80) as u8)
}

#[derive(Debug, Clone, Copy)]
pub struct AnsiCodec {
    pub page: Codepage,
    pub headers: HeaderPolicy,
}

impl AnsiCodec {
    pub fn new(page: Codepage, headers: HeaderPolicy) -> Self {
        Self { page, headers }
    }
}

impl Codec for AnsiCodec {
    fn decode(&self, state: &mut CodecState, input: &[u8], output: &mut [u16]) -> ConvResult {
        let mut next1 = 0usize;
        let mut next2 = 0usize;
        if state.is_initial() {
            state.mark_passed();
            if self.headers.generate_header() {
                if next2 >= output.len() {
                    return ConvResult::Partial { consumed: 0, produced: 0 };
                }
                output[next2] = bom::BOM_CODEPOINT;
                next2 += 1;
            }
        }
        while next1 < input.len() && next2 < output.len() {
            output[next2] = byte_to_wide(self.page, input[next1]);
            next1 += 1;
            next2 += 1;
        }
        if next1 < input.len() {
            ConvResult::Partial { consumed: next1, produced: next2 }
        } else {
            ConvResult::Ok { consumed: next1, produced: next2 }
        }
    }

    fn encode(&self, state: &mut CodecState, input: &[u16], output: &mut [u8]) -> ConvResult {
        if state.is_initial() {
            state.mark_passed();
        }
        let mut next1 = 0usize;
        let mut next2 = 0usize;
        while next1 < input.len() && next2 < output.len() {
            let c = input[next1];
            if bom::is_bom(c) {
                // BOM is only meaningful on the wide side; dropped once on the way out.
                next1 += 1;
                continue;
            }
            match wide_to_byte(self.page, c) {
                Some(b) => {
                    output[next2] = b;
                    next2 += 1;
                    next1 += 1;
                }
                None => return ConvResult::Error { consumed: next1 + 1, produced: next2, at: next1 },
            }
        }
        if next1 < input.len() {
            ConvResult::Partial { consumed: next1, produced: next2 }
        } else {
            ConvResult::Ok { consumed: next1, produced: next2 }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::HeaderMode;
    use tx_core::ByteOrder;

    #[test]
    fn cp1252_ascii_round_trips() {
        let codec = AnsiCodec::new(Codepage::Cp1252, HeaderPolicy { headers: HeaderMode::Consume });
        let mut st = CodecState::new(ByteOrder::platform());
        let decoded = codec.decode_all(&mut st, b"Hello");
        assert_eq!(decoded, "Hello".encode_utf16().collect::<Vec<_>>());
    }

    #[test]
    fn cp1252_euro_sign_maps_to_0x80() {
        let codec = AnsiCodec::new(Codepage::Cp1252, HeaderPolicy { headers: HeaderMode::Consume });
        let mut st = CodecState::new(ByteOrder::platform());
        let decoded = codec.decode_all(&mut st, &[0x80]);
        assert_eq!(decoded, vec![0x20AC]);
        let mut st2 = CodecState::new(ByteOrder::platform());
        let encoded = codec.encode_all(&mut st2, &[0x20AC]);
        assert_eq!(encoded, vec![0x80]);
    }

    #[test]
    fn cp1251_cyrillic_round_trips() {
        let codec = AnsiCodec::new(Codepage::Cp1251, HeaderPolicy { headers: HeaderMode::Consume });
        let mut st = CodecState::new(ByteOrder::platform());
        let bytes = [0xC0, 0xE0]; // А, а
        let decoded = codec.decode_all(&mut st, &bytes);
        assert_eq!(decoded, vec![0x0410, 0x0430]);
    }

    #[test]
    fn generate_header_prepends_bom_on_decode() {
        let codec = AnsiCodec::new(Codepage::Cp1252, HeaderPolicy { headers: HeaderMode::Generate });
        let mut st = CodecState::new(ByteOrder::platform());
        let decoded = codec.decode_all(&mut st, b"A");
        assert_eq!(decoded, vec![bom::BOM_CODEPOINT, 'A' as u16]);
    }
}
