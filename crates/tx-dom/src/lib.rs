pub mod document;
pub mod error;
pub mod handler;
pub mod parser;
pub mod path;
pub mod value;

pub use document::Document;
pub use error::{DomError, Result};
pub use handler::DomHandler;
pub use parser::{parse_to_dom, parse_to_dom_collecting};
pub use path::DomPath;
pub use value::{Member, NumSubtype, ValueId, ValueKind};
