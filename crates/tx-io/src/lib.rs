pub mod buffer;
pub mod error;
pub mod policy;
pub mod reader;
pub mod writer;

pub use error::{IoError, Result};
pub use policy::{Encoding, Policy, DEFAULT_MAX_TEXT_BUF_SIZE};
pub use reader::TextReader;
pub use writer::TextWriter;
