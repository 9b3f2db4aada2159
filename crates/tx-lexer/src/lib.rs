pub mod errkind;
pub mod jsontext;
pub mod lexer;
pub mod token;

pub use errkind::ErrKind;
pub use jsontext::{is_unescaped, to_escaped, to_unescaped};
pub use lexer::{LexError, Lexer, Result};
pub use token::{Lexeme, Token};
