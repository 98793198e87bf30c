//! Header-aware, escape-resolving tokenizer

use crate::ast::position::Position;
use crate::config::{DelimiterConfig, UNA_HEADER_LEN};
use crate::error::ParseError;
use crate::lexer::tokens::{Token, TokenKind};
use std::iter::Peekable;
use std::str::Chars;

/// Produces a stream of positioned tokens from EDIFACT wire text.
///
/// Construction consumes the 9-character UNA header and adopts the
/// delimiter set it declares. Escape resolution happens here: a release
/// character makes the following character literal text, so downstream
/// stages never see escapes. Reading past the end keeps returning EOF
/// tokens.
#[derive(Debug)]
pub struct Tokenizer<'a> {
    chars: Peekable<Chars<'a>>,
    delimiters: DelimiterConfig,

    text_buf: String,
    /// Where the pending (or next) token started.
    token_pos: Position,
    /// Where the next unconsumed character sits.
    next_pos: Position,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Result<Self, ParseError> {
        let mut tokenizer = Self {
            chars: input.chars().peekable(),
            delimiters: DelimiterConfig::default(),
            text_buf: String::new(),
            token_pos: Position::new(1, 1),
            next_pos: Position::new(1, 1),
        };
        tokenizer.parse_una_header()?;
        Ok(tokenizer)
    }

    /// The delimiter set declared by the UNA header.
    pub fn delimiters(&self) -> &DelimiterConfig {
        &self.delimiters
    }

    /// The position of the next token to be read.
    pub fn next_pos(&self) -> Position {
        self.next_pos
    }

    /// Read the next token from the input.
    pub fn read(&mut self) -> Result<Token, ParseError> {
        loop {
            let c = match self.peek() {
                Some(c) => c,
                None => {
                    return Ok(if self.text_buf.is_empty() {
                        Token::new(self.next_pos, TokenKind::Eof)
                    } else {
                        self.text_token()
                    });
                }
            };

            if c == self.delimiters.segment_separator {
                return Ok(self.separator_token(TokenKind::SegmentSeparator(c)));
            } else if c == self.delimiters.element_separator {
                return Ok(self.separator_token(TokenKind::ElementSeparator(c)));
            } else if c == self.delimiters.component_separator {
                return Ok(self.separator_token(TokenKind::ComponentSeparator(c)));
            } else if c == self.delimiters.escape_character {
                self.read_char();
                match self.read_char() {
                    Some(escaped) => self.text_buf.push(escaped),
                    None => {
                        return Err(ParseError::UnexpectedEndOfInput { pos: self.next_pos });
                    }
                }
            } else {
                self.read_char();
                self.text_buf.push(c);
            }
        }
    }

    /// Read all remaining tokens, up to and including the EOF token.
    pub fn read_remaining(&mut self) -> Result<Vec<Token>, ParseError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.read()?;
            let done = token.kind.is_eof();
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    fn parse_una_header(&mut self) -> Result<(), ParseError> {
        let start = self.token_pos;
        let mut header = String::with_capacity(UNA_HEADER_LEN);
        for _ in 0..UNA_HEADER_LEN {
            match self.read_char() {
                Some(c) => header.push(c),
                None => break,
            }
        }

        match DelimiterConfig::from_una_header(&header) {
            Some(delimiters) => {
                self.delimiters = delimiters;
                self.token_pos = self.next_pos;
                Ok(())
            }
            None => Err(ParseError::InvalidUnaHeader { pos: start, header }),
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn read_char(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.next_pos.line += 1;
            self.next_pos.column = 1;
        } else {
            self.next_pos.column += 1;
        }
        Some(c)
    }

    /// Emit the pending text buffer if non-empty, else consume the
    /// delimiter and emit its token. The delimiter stays put in the first
    /// case and is re-examined by the next read.
    fn separator_token(&mut self, kind: TokenKind) -> Token {
        if self.text_buf.is_empty() {
            let pos = self.token_pos;
            self.read_char();
            self.token_pos = self.next_pos;
            Token::new(pos, kind)
        } else {
            self.text_token()
        }
    }

    fn text_token(&mut self) -> Token {
        let text = std::mem::take(&mut self.text_buf);
        let pos = self.token_pos;
        self.token_pos = self.next_pos;
        Token::new(pos, TokenKind::Text(text))
    }
}
