//! Positional segment specifications

use crate::ast::nodes::Segment;
use crate::ast::position::Position;
use crate::error::ParseError;
use crate::spec::element_spec::ElementSpec;

/// The expected shape of one segment: its name and the ordered element
/// specs. Elements beyond the specified count pass through unvalidated.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentSpec {
    pub name: String,
    pub elements: Vec<ElementSpec>,
}

impl SegmentSpec {
    pub fn new(name: impl Into<String>, elements: Vec<ElementSpec>) -> Self {
        Self {
            name: name.into(),
            elements,
        }
    }

    /// Validate name and elements.
    pub fn validate(&self, segment: &Segment) -> Result<(), ParseError> {
        if segment.name != self.name {
            return Err(ParseError::UnexpectedSegment {
                pos: segment.pos,
                expected: self.name.clone(),
                actual: segment.name.clone(),
            });
        }
        self.validate_elements(segment)
    }

    /// Validate only the elements (for callers that already matched the
    /// name). A missing mandatory element reports the position just past
    /// the segment name, where the element would have started.
    pub fn validate_elements(&self, segment: &Segment) -> Result<(), ParseError> {
        for (i, spec) in self.elements.iter().enumerate() {
            match segment.elements.get(i) {
                Some(element) => spec.validate(element)?,
                None => {
                    if !spec.optional {
                        let pos = Position::new(
                            segment.pos.line,
                            segment.pos.column + segment.name.chars().count() as u32,
                        );
                        return Err(ParseError::MissingElement {
                            pos,
                            expected: spec.to_string(),
                        });
                    }
                }
            }
        }
        Ok(())
    }
}
