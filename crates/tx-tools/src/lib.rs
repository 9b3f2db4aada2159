pub mod diff;
pub mod generator;
pub mod iter;
pub mod writer;

pub use diff::{diff, DiffItem, DiffKind, DiffOptions};
pub use generator::{generate, CharRange, GeneratorOptions};
pub use iter::DomIter;
pub use writer::DomWriter;
