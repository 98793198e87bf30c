//! Tokenization of EDIFACT wire text
//!
//! The tokenizer consumes the UNA header on construction; the four control
//! characters it declares become the delimiter alphabet for the rest of
//! the stream.

pub mod tokenizer;
pub mod tokens;

pub use tokenizer::Tokenizer;
pub use tokens::{Token, TokenKind};
