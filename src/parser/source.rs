//! The segment-source seam between assembly and structural parsing
//!
//! Anything that can hand out segments in order can feed the structural
//! parser or the envelope validator: the wire-text [`SegmentStream`],
//! an in-memory queue, or a [`SegmentBuilder`](crate::builder::SegmentBuilder).

use crate::ast::nodes::Segment;
use crate::ast::position::Position;
use crate::error::ParseError;
use std::collections::VecDeque;

/// An ordered stream of segments.
pub trait SegmentSource {
    /// The next segment, or `None` once the stream is exhausted.
    fn read(&mut self) -> Result<Option<Segment>, ParseError>;

    /// Drain the stream to exhaustion.
    fn read_remaining(&mut self) -> Result<Vec<Segment>, ParseError> {
        let mut segments = Vec::new();
        while let Some(segment) = self.read()? {
            segments.push(segment);
        }
        Ok(segments)
    }

    /// The position of the next segment, where the source knows it.
    fn next_pos(&self) -> Position {
        Position::EOF
    }
}

/// A segment source backed by already-assembled segments.
#[derive(Debug, Clone, Default)]
pub struct SegmentQueue {
    segments: VecDeque<Segment>,
}

impl SegmentQueue {
    pub fn new(segments: impl IntoIterator<Item = Segment>) -> Self {
        Self {
            segments: segments.into_iter().collect(),
        }
    }
}

impl SegmentSource for SegmentQueue {
    fn read(&mut self) -> Result<Option<Segment>, ParseError> {
        Ok(self.segments.pop_front())
    }

    fn next_pos(&self) -> Position {
        self.segments
            .front()
            .map(|s| s.pos)
            .unwrap_or(Position::EOF)
    }
}
