//! Error types for parsing, validation and specification loading
//!
//! Every parse-time failure carries the position where it was detected;
//! errors raised at end of input use [`Position::EOF`]. Parsing is
//! fail-fast: the only internal recovery is the structural parser's retry
//! across same-named grammar candidates.

use crate::ast::position::Position;
use std::fmt;

/// Errors raised while tokenizing, assembling or validating a document.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The 9-character UNA header was missing, truncated, or declared
    /// duplicate control characters.
    InvalidUnaHeader { pos: Position, header: String },
    /// The input ended mid-token, mid-escape or mid-segment.
    UnexpectedEndOfInput { pos: Position },
    /// A delimiter appeared where assembly forbids it. `expected` names
    /// the tokens that would have been legal.
    UnexpectedToken {
        pos: Position,
        actual: String,
        expected: Vec<String>,
    },
    /// A component's text failed its datatype spec.
    InvalidValue {
        pos: Position,
        text: String,
        expected: String,
    },
    /// A non-optional component spec had no component to validate.
    /// The position is the element's.
    MissingComponent { pos: Position, expected: String },
    /// A non-optional element spec had no element to validate.
    /// The position is just past the segment name.
    MissingElement { pos: Position, expected: String },
    /// A segment's name matched none of the structurally legal candidates.
    InvalidSegment {
        pos: Position,
        name: String,
        expected: Vec<String>,
    },
    /// The input ended while a mandatory grammar node was unsatisfied.
    UnexpectedEndOfMessage { expected: Vec<String> },
    /// An envelope read expected a segment with a fixed name.
    UnexpectedSegment {
        pos: Position,
        expected: String,
        actual: String,
    },
    /// A segment followed the interchange trailer.
    TrailingSegment { pos: Position, name: String },
    /// The UNT segment count disagrees with the message body.
    SegmentCountMismatch {
        pos: Position,
        declared: u64,
        actual: u64,
    },
    /// UNH and UNT message references disagree.
    MessageReferenceMismatch {
        pos: Position,
        unh: String,
        unt: String,
    },
    /// UNB and UNZ interchange control references disagree.
    ControlReferenceMismatch {
        pos: Position,
        unb: String,
        unz: String,
    },
}

impl ParseError {
    /// The position where the error was detected.
    pub fn pos(&self) -> Position {
        match self {
            ParseError::InvalidUnaHeader { pos, .. }
            | ParseError::UnexpectedEndOfInput { pos }
            | ParseError::UnexpectedToken { pos, .. }
            | ParseError::InvalidValue { pos, .. }
            | ParseError::MissingComponent { pos, .. }
            | ParseError::MissingElement { pos, .. }
            | ParseError::InvalidSegment { pos, .. }
            | ParseError::UnexpectedSegment { pos, .. }
            | ParseError::TrailingSegment { pos, .. }
            | ParseError::SegmentCountMismatch { pos, .. }
            | ParseError::MessageReferenceMismatch { pos, .. }
            | ParseError::ControlReferenceMismatch { pos, .. } => *pos,
            ParseError::UnexpectedEndOfMessage { .. } => Position::EOF,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::InvalidUnaHeader { pos, header } => {
                write!(f, "Invalid UNA header at position {}. Got {:?}.", pos, header)
            }
            ParseError::UnexpectedEndOfInput { pos } => {
                write!(f, "Unexpected end of input at position {}.", pos)
            }
            ParseError::UnexpectedToken {
                pos,
                actual,
                expected,
            } => {
                write!(f, "Unexpected {:?} at position {}.", actual, pos)?;
                if !expected.is_empty() {
                    write!(f, " Expected one of {:?}.", expected)?;
                }
                Ok(())
            }
            ParseError::InvalidValue {
                pos,
                text,
                expected,
            } => {
                write!(
                    f,
                    "Position {}: Invalid value {:?}. Expected {:?}",
                    pos, text, expected
                )
            }
            ParseError::MissingComponent { pos, expected } => {
                write!(
                    f,
                    "Missing component at position {}, expected {:?}",
                    pos, expected
                )
            }
            ParseError::MissingElement { pos, expected } => {
                write!(
                    f,
                    "Missing element at position {}, expected {}",
                    pos, expected
                )
            }
            ParseError::InvalidSegment {
                pos,
                name,
                expected,
            } => {
                write!(
                    f,
                    "Position {}: Invalid segment {:?}. Expected one of {:?}",
                    pos, name, expected
                )
            }
            ParseError::UnexpectedEndOfMessage { expected } => {
                write!(f, "Unexpected end of input. Expected one of {:?}", expected)
            }
            ParseError::UnexpectedSegment {
                expected, actual, ..
            } => {
                write!(f, "Expected {} segment, got {}", expected, actual)
            }
            ParseError::TrailingSegment { name, .. } => {
                write!(f, "Expected end of interchange, but got {}", name)
            }
            ParseError::SegmentCountMismatch {
                declared, actual, ..
            } => {
                write!(
                    f,
                    "Segment count does not match: UNT:{} != Actual:{}",
                    declared, actual
                )
            }
            ParseError::MessageReferenceMismatch { unh, unt, .. } => {
                write!(
                    f,
                    "Message control numbers do not match: UNH:{} != UNT:{}",
                    unh, unt
                )
            }
            ParseError::ControlReferenceMismatch { unb, unz, .. } => {
                write!(
                    f,
                    "Interchange control references do not match: UNB:{} != UNZ:{}",
                    unb, unz
                )
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Errors raised while compiling a message specification. These surface at
/// load time; an accepted specification never fails structurally during
/// validation.
#[derive(Debug, Clone, PartialEq)]
pub enum SpecificationError {
    /// A component datatype definition had an unrecognized shape.
    Component { spec: String, message: String },
    /// An element definition had an unrecognized shape.
    Element { spec: String, message: String },
    /// A grammar node violated a tree invariant.
    Node { name: String, message: String },
    /// The specification document itself did not deserialize.
    Format { message: String },
}

impl fmt::Display for SpecificationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecificationError::Component { spec, message } => {
                write!(
                    f,
                    "Invalid component specification: {}: {:?}",
                    message, spec
                )
            }
            SpecificationError::Element { spec, message } => {
                write!(f, "Invalid element specification: {}: {:?}", message, spec)
            }
            SpecificationError::Node { name, message } => {
                write!(f, "Invalid specification for {}: {}", name, message)
            }
            SpecificationError::Format { message } => {
                write!(f, "Invalid specification document: {}", message)
            }
        }
    }
}

impl std::error::Error for SpecificationError {}
