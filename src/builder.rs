//! Programmatic construction of segments with faithful source positions
//!
//! The builder produces segments positioned exactly as the tokenizer would
//! report them after serializing and re-reading the document. Column
//! arithmetic therefore counts the wire form: separators, and text with
//! its release characters applied.

use crate::ast::nodes::{Component, Element, Segment};
use crate::ast::position::Position;
use crate::config::{DelimiterConfig, UNA_HEADER_LEN};
use crate::error::ParseError;
use crate::parser::source::SegmentSource;
use std::collections::VecDeque;
use std::fmt;

/// Misuse of the builder API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// `element` was called before any `segment`.
    NoSegment,
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::NoSegment => write!(f, "No segment started"),
        }
    }
}

impl std::error::Error for BuildError {}

/// Builds segments one at a time, tracking the position every node would
/// have in the serialized document.
#[derive(Debug, Clone)]
pub struct SegmentBuilder {
    config: DelimiterConfig,
    line: u32,
    column: u32,
    segments: VecDeque<Segment>,
}

impl SegmentBuilder {
    pub fn new() -> Self {
        Self::with_config(DelimiterConfig::default())
    }

    pub fn with_config(config: DelimiterConfig) -> Self {
        // The first segment starts right after the 9-character UNA header;
        // a newline segment separator ends the header line itself.
        let (line, column) = if config.segment_separator == '\n' {
            (2, 1)
        } else {
            (1, UNA_HEADER_LEN as u32 + 1)
        };
        Self {
            config,
            line,
            column,
            segments: VecDeque::new(),
        }
    }

    pub fn config(&self) -> &DelimiterConfig {
        &self.config
    }

    /// Start a new segment.
    pub fn segment(&mut self, name: &str) {
        if !self.segments.is_empty() {
            // Step past the previous segment's terminator
            if self.config.segment_separator == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        let pos = Position::new(self.line, self.column);
        self.column += name.chars().count() as u32;
        self.segments.push_back(Segment::new(pos, name));
    }

    /// Append an element to the current segment. The element's position is
    /// that of its separator; component columns advance by the escaped
    /// wire length of each text.
    pub fn element(&mut self, components: &[&str]) -> Result<(), BuildError> {
        if self.segments.is_empty() {
            return Err(BuildError::NoSegment);
        }
        let mut element = Element::new(Position::new(self.line, self.column));
        for text in components {
            self.column += 1;
            element.push(Component::new(Position::new(self.line, self.column), *text));
            self.column += self.config.escape(text).chars().count() as u32;
        }
        if let Some(segment) = self.segments.back_mut() {
            segment.push(element);
        }
        Ok(())
    }

    /// Serialize everything built so far, UNA header included.
    pub fn to_edifact(&self) -> String {
        let mut out = self.config.una_header();
        for segment in &self.segments {
            out.push_str(&segment.to_edifact(&self.config));
        }
        out
    }
}

impl Default for SegmentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SegmentSource for SegmentBuilder {
    fn read(&mut self) -> Result<Option<Segment>, ParseError> {
        Ok(self.segments.pop_front())
    }
}
