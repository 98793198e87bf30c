//! Assembly of tokens into segments

use crate::ast::nodes::{Component, Element, Segment};
use crate::ast::position::Position;
use crate::error::ParseError;
use crate::lexer::tokenizer::Tokenizer;
use crate::lexer::tokens::{Token, TokenKind};
use crate::parser::source::SegmentSource;

/// Lookahead classification of the next token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lookahead {
    Text,
    SegmentSeparator,
    ElementSeparator,
    ComponentSeparator,
    Eof,
}

/// Builds complete segments from a tokenizer with one-token lookahead.
///
/// The token grammar consumed per segment is
/// `text (element_separator component*)* segment_separator`, where each
/// component run is zero or more text or component-separator tokens.
/// Missing text between separators is an explicit empty component, not an
/// absent one.
pub struct SegmentStream<'a> {
    tokens: Tokenizer<'a>,
    peeked: Option<Token>,
}

impl<'a> SegmentStream<'a> {
    pub fn new(tokens: Tokenizer<'a>) -> Self {
        Self {
            tokens,
            peeked: None,
        }
    }

    /// Tokenize `input` and assemble its segments.
    pub fn from_str(input: &'a str) -> Result<Self, ParseError> {
        Ok(Self::new(Tokenizer::new(input)?))
    }

    /// The delimiter set declared by the input's UNA header.
    pub fn delimiters(&self) -> &crate::config::DelimiterConfig {
        self.tokens.delimiters()
    }

    /// Read the next complete segment, or `None` at end of input.
    pub fn read(&mut self) -> Result<Option<Segment>, ParseError> {
        let (_, look) = self.peek_kind()?;
        if look == Lookahead::Eof {
            return Ok(None);
        }

        let token = self.advance()?;
        let (pos, name) = match token.kind {
            TokenKind::Text(name) => (token.pos, name),
            kind => {
                return Err(ParseError::UnexpectedToken {
                    pos: token.pos,
                    actual: kind.describe(),
                    expected: vec!["<text>".to_string()],
                });
            }
        };
        let mut segment = Segment::new(pos, name);

        loop {
            let (pos, look) = self.peek_kind()?;
            match look {
                Lookahead::SegmentSeparator => {
                    self.advance()?;
                    return Ok(Some(segment));
                }
                Lookahead::ElementSeparator => {
                    let separator = self.advance()?;
                    segment.push(self.read_element(separator)?);
                }
                Lookahead::Eof => {
                    return Err(ParseError::UnexpectedEndOfInput { pos });
                }
                Lookahead::Text | Lookahead::ComponentSeparator => {
                    let expected = vec![
                        self.tokens.delimiters().element_separator.to_string(),
                        self.tokens.delimiters().segment_separator.to_string(),
                    ];
                    let token = self.advance()?;
                    return Err(ParseError::UnexpectedToken {
                        pos: token.pos,
                        actual: token.kind.describe(),
                        expected,
                    });
                }
            }
        }
    }

    /// Read all remaining segments.
    pub fn read_remaining(&mut self) -> Result<Vec<Segment>, ParseError> {
        let mut segments = Vec::new();
        while let Some(segment) = self.read()? {
            segments.push(segment);
        }
        Ok(segments)
    }

    /// Where the next segment would start.
    pub fn next_pos(&self) -> Position {
        self.peeked
            .as_ref()
            .map(|t| t.pos)
            .unwrap_or_else(|| self.tokens.next_pos())
    }

    /// Components run until something other than text or a component
    /// separator shows up. An empty component is synthesized whenever two
    /// separators (or a separator and the element's end) are adjacent.
    fn read_element(&mut self, separator: Token) -> Result<Element, ParseError> {
        let mut element = Element::new(separator.pos);
        let mut after_separator = true;

        loop {
            let (pos, look) = self.peek_kind()?;
            match look {
                Lookahead::Text => {
                    let token = self.advance()?;
                    if let TokenKind::Text(text) = token.kind {
                        element.push(Component::new(token.pos, text));
                    }
                    after_separator = false;
                }
                Lookahead::ComponentSeparator => {
                    if after_separator {
                        element.push(Component::new(pos, ""));
                    }
                    self.advance()?;
                    after_separator = true;
                }
                _ => {
                    if after_separator {
                        element.push(Component::new(pos, ""));
                    }
                    return Ok(element);
                }
            }
        }
    }

    fn peek_kind(&mut self) -> Result<(Position, Lookahead), ParseError> {
        let token = self.peek()?;
        let look = match token.kind {
            TokenKind::Text(_) => Lookahead::Text,
            TokenKind::SegmentSeparator(_) => Lookahead::SegmentSeparator,
            TokenKind::ElementSeparator(_) => Lookahead::ElementSeparator,
            TokenKind::ComponentSeparator(_) => Lookahead::ComponentSeparator,
            TokenKind::Eof => Lookahead::Eof,
        };
        Ok((token.pos, look))
    }

    fn peek(&mut self) -> Result<&Token, ParseError> {
        let token = match self.peeked.take() {
            Some(token) => token,
            None => self.tokens.read()?,
        };
        Ok(self.peeked.insert(token))
    }

    fn advance(&mut self) -> Result<Token, ParseError> {
        match self.peeked.take() {
            Some(token) => Ok(token),
            None => self.tokens.read(),
        }
    }
}

impl SegmentSource for SegmentStream<'_> {
    fn read(&mut self) -> Result<Option<Segment>, ParseError> {
        SegmentStream::read(self)
    }

    fn next_pos(&self) -> Position {
        SegmentStream::next_pos(self)
    }
}
