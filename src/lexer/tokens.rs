//! Token types produced by the tokenizer

use crate::ast::position::Position;

/// What a token is. Separator tokens carry the concrete character the
/// header declared for them; text tokens carry unescaped content.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TokenKind {
    Text(String),
    SegmentSeparator(char),
    ElementSeparator(char),
    ComponentSeparator(char),
    Eof,
}

impl TokenKind {
    pub fn is_eof(&self) -> bool {
        matches!(self, TokenKind::Eof)
    }

    /// Human-readable rendering for "unexpected token" diagnostics.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Text(value) => value.clone(),
            TokenKind::SegmentSeparator(c)
            | TokenKind::ElementSeparator(c)
            | TokenKind::ComponentSeparator(c) => c.to_string(),
            TokenKind::Eof => "<end of input>".to_string(),
        }
    }
}

/// A positioned token. The position is where the token's first character
/// began in the source.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Token {
    pub pos: Position,
    pub kind: TokenKind,
}

impl Token {
    pub fn new(pos: Position, kind: TokenKind) -> Self {
        Self { pos, kind }
    }
}
