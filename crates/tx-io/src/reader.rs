//! Buffered wide-character reader. Designed for use by a lexer/parser:
//! sequential `next_char`, with unconsuming `peek`/`is_next_char` lookahead.

use crate::buffer::TextBuffer;
use crate::error::{IoError, Result};
use crate::policy::{Encoding, Policy};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tx_codec::{AnsiCodec, Codec, CodecState, Utf16Codec, Utf8Codec};
use tx_core::ByteOrder;

enum Source {
    Byte {
        reader: Box<dyn Read>,
        codec: Box<dyn Codec>,
        state: CodecState,
    },
    Wide {
        data: Vec<u16>,
        pos: usize,
    },
}

fn make_codec(encoding: Encoding) -> Box<dyn Codec> {
    match encoding {
        Encoding::Plain => unreachable!("plain encoding never builds a byte codec"),
        Encoding::Utf8 { headers } => Box::new(Utf8Codec::new(headers)),
        Encoding::Utf16 { mode } => Box::new(Utf16Codec::new(mode)),
        Encoding::Ansi { page, headers } => Box::new(AnsiCodec::new(page, headers)),
    }
}

/// Reads wide characters sequentially from a byte stream or file (decoded
/// through the policy's codec) or directly from pre-decoded wide text.
pub struct TextReader {
    source: Source,
    buffer: TextBuffer,
    policy: Policy,
    source_name: String,
    count: u64,
}

impl TextReader {
    /// Constructs a reader over an arbitrary byte stream, decoded per `policy`.
    pub fn from_reader(reader: impl Read + 'static, policy: Policy, source_name: impl Into<String>) -> Self {
        let source_name = source_name.into();
        tracing::debug!(%source_name, ?policy, "opening text reader");
        let codec = make_codec(policy.encoding());
        Self {
            source: Source::Byte { reader: Box::new(reader), codec, state: CodecState::new(ByteOrder::platform()) },
            buffer: TextBuffer::new(),
            policy,
            source_name,
            count: 0,
        }
    }

    /// Opens `path` in binary mode and reads it through `policy`'s codec.
    pub fn from_path(path: impl AsRef<Path>, policy: Policy) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|cause| IoError::Stream { source_name: path.display().to_string(), cause })?;
        Ok(Self::from_reader(file, policy, path.display().to_string()))
    }

    /// Constructs a reader directly over already-decoded wide text, matching
    /// the `plain` policy's pass-through semantics.
    pub fn from_wide(data: impl Into<Vec<u16>>, source_name: impl Into<String>) -> Self {
        Self {
            source: Source::Wide { data: data.into(), pos: 0 },
            buffer: TextBuffer::new(),
            policy: Policy::plain(),
            source_name: source_name.into(),
            count: 0,
        }
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn set_source_name(&mut self, value: impl Into<String>) {
        self.source_name = value.into();
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    fn refill(&mut self) -> Result<()> {
        let chunk = self.policy.max_text_buf_size();
        match &mut self.source {
            Source::Byte { reader, codec, state } => {
                let mut bytes = vec![0u8; chunk.max(1)];
                let n = reader
                    .read(&mut bytes)
                    .map_err(|cause| IoError::Stream { source_name: self.source_name.clone(), cause })?;
                if n == 0 {
                    return Ok(());
                }
                bytes.truncate(n);
                let decoded = codec.decode_all(state, &bytes);
                tracing::trace!(bytes_read = n, units_decoded = decoded.len(), "refilled text buffer");
                self.buffer.push_back_slice(&decoded);
            }
            Source::Wide { data, pos } => {
                let end = (*pos + chunk).min(data.len());
                self.buffer.push_back_slice(&data[*pos..end]);
                *pos = end;
            }
        }
        Ok(())
    }

    fn ensure_buffered(&mut self, n: usize) -> Result<()> {
        while self.buffer.len() < n && !self.source_exhausted() {
            let before = self.buffer.len();
            self.refill()?;
            if self.buffer.len() == before {
                break;
            }
        }
        Ok(())
    }

    fn source_exhausted(&self) -> bool {
        matches!(&self.source, Source::Wide { data, pos } if *pos >= data.len())
    }

    /// Yields the next wide character, or `None` at end of stream.
    pub fn next_char(&mut self) -> Result<Option<u16>> {
        self.ensure_buffered(1)?;
        let c = self.buffer.pop_front();
        if c.is_some() {
            self.count += 1;
        }
        Ok(c)
    }

    pub fn peek(&mut self) -> Result<Option<u16>> {
        self.ensure_buffered(1)?;
        Ok(self.buffer.front())
    }

    pub fn is_next_char(&mut self, wc: u16) -> Result<bool> {
        Ok(self.peek()?.map(|c| c == wc).unwrap_or(false))
    }

    pub fn is_next_char_one_of(&mut self, wchars: &[u16]) -> Result<bool> {
        Ok(self.peek()?.map(|c| wchars.contains(&c)).unwrap_or(false))
    }

    pub fn eof(&mut self) -> Result<bool> {
        Ok(self.peek()?.is_none())
    }

    /// Drains the remainder of the stream into a wide string.
    pub fn read_all(&mut self) -> Result<Vec<u16>> {
        let mut out = Vec::new();
        while let Some(c) = self.next_char()? {
            out.push(c);
        }
        Ok(out)
    }
}
