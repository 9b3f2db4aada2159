//! Wide-character writer.

use crate::error::{IoError, Result};
use crate::policy::{Encoding, Policy};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tx_codec::{AnsiCodec, Codec, CodecState, Utf16Codec, Utf8Codec};
use tx_core::ByteOrder;

enum Sink {
    Byte { writer: Box<dyn Write>, codec: Box<dyn Codec>, state: CodecState },
    Wide { data: Vec<u16> },
}

fn make_codec(encoding: Encoding) -> Box<dyn Codec> {
    match encoding {
        Encoding::Plain => unreachable!("plain encoding never builds a byte codec"),
        Encoding::Utf8 { headers } => Box::new(Utf8Codec::new(headers)),
        Encoding::Utf16 { mode } => Box::new(Utf16Codec::new(mode)),
        Encoding::Ansi { page, headers } => Box::new(AnsiCodec::new(page, headers)),
    }
}

/// Writes wide text to a byte sink (encoded per policy) or to an in-memory
/// wide buffer (`plain`). Flushes the underlying sink when dropped.
pub struct TextWriter {
    sink: Sink,
    source_name: String,
}

impl TextWriter {
    pub fn from_writer(writer: impl Write + 'static, policy: Policy, source_name: impl Into<String>) -> Self {
        let source_name = source_name.into();
        tracing::debug!(%source_name, ?policy, "opening text writer");
        match policy.encoding() {
            Encoding::Plain => Self { sink: Sink::Wide { data: Vec::new() }, source_name },
            encoding => Self {
                sink: Sink::Byte { writer: Box::new(writer), codec: make_codec(encoding), state: CodecState::new(ByteOrder::platform()) },
                source_name,
            },
        }
    }

    pub fn from_path(path: impl AsRef<Path>, policy: Policy) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|cause| IoError::Stream { source_name: path.display().to_string(), cause })?;
        Ok(Self::from_writer(file, policy, path.display().to_string()))
    }

    /// An in-memory writer accumulating already-wide text, matching `plain`
    /// output with no backing byte sink.
    pub fn in_memory_wide() -> Self {
        Self { sink: Sink::Wide { data: Vec::new() }, source_name: "<memory>".to_string() }
    }

    pub fn write(&mut self, ws: &[u16]) -> Result<&mut Self> {
        match &mut self.sink {
            Sink::Byte { writer, codec, state } => {
                let bytes = codec.encode_all(state, ws);
                writer
                    .write_all(&bytes)
                    .map_err(|cause| IoError::Stream { source_name: self.source_name.clone(), cause })?;
            }
            Sink::Wide { data } => data.extend_from_slice(ws),
        }
        Ok(self)
    }

    pub fn write_endl(&mut self) -> Result<&mut Self> {
        self.write(&[b'\n' as u16])
    }

    /// Only meaningful for `plain`/in-memory writers: the accumulated wide text.
    pub fn into_wide(self) -> Vec<u16> {
        match self.sink {
            Sink::Wide { data } => data,
            Sink::Byte { .. } => Vec::new(),
        }
    }

    pub fn flush(&mut self) -> Result<()> {
        if let Sink::Byte { writer, .. } = &mut self.sink {
            writer.flush().map_err(|cause| IoError::Stream { source_name: self.source_name.clone(), cause })?;
        }
        Ok(())
    }
}

impl Drop for TextWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tx_codec::HeaderMode;

    #[test]
    fn plain_writer_accumulates_wide_text() {
        let mut w = TextWriter::in_memory_wide();
        w.write(&"AB".encode_utf16().collect::<Vec<_>>()).unwrap();
        w.write_endl().unwrap();
        let out = w.into_wide();
        assert_eq!(out, vec!['A' as u16, 'B' as u16, '\n' as u16]);
    }

    #[test]
    fn file_round_trip_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        {
            let policy = Policy::utf8(HeaderMode::Consume);
            let mut w = TextWriter::from_path(&path, policy).unwrap();
            w.write(&"hello".encode_utf16().collect::<Vec<_>>()).unwrap();
        }
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "hello");
    }
}
