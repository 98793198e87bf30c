//! Interchange envelope reading and validation
//!
//! An interchange is `UNB (UNH body* UNT)* UNZ`. The service segments are
//! validated against fixed specs; message bodies are collected verbatim
//! and can be parsed into a tree later with a message specification. The
//! envelope cross-checks are the UNT segment count, the UNH/UNT message
//! reference pair and the UNB/UNZ control reference pair.

use crate::ast::nodes::{Segment, SegmentGroup};
use crate::ast::position::Position;
use crate::config::DelimiterConfig;
use crate::error::ParseError;
use crate::parser::source::{SegmentQueue, SegmentSource};
use crate::parser::tree_builder::TreeBuilder;
use crate::spec::component_spec::ComponentSpec;
use crate::spec::element_spec::ElementSpec;
use crate::spec::message_spec::MessageSpec;
use crate::spec::segment_spec::SegmentSpec;
use once_cell::sync::Lazy;

fn code(text: &str) -> ComponentSpec {
    match ComponentSpec::parse(text) {
        Ok(spec) => spec,
        // The service segment codes below are all well-formed
        Err(_) => ComponentSpec::Literal(text.to_string()),
    }
}

fn optional(text: &str) -> ComponentSpec {
    ComponentSpec::Optional(Box::new(code(text)))
}

static UNB_SPEC: Lazy<SegmentSpec> = Lazy::new(|| {
    SegmentSpec::new(
        "UNB",
        vec![
            ElementSpec::new(vec![code("a4"), code("n1")]),
            ElementSpec::new(vec![code("an..35"), optional("an..4"), optional("an..14")]),
            ElementSpec::new(vec![code("an..35"), optional("an..4"), optional("an..14")]),
            ElementSpec::new(vec![code("n6"), code("n4")]),
            ElementSpec::new(vec![code("an..14")]),
            ElementSpec::optional(vec![code("an..14"), optional("an2")]),
            ElementSpec::optional(vec![code("an..14")]),
            ElementSpec::optional(vec![code("a1")]),
            ElementSpec::optional(vec![code("n1")]),
            ElementSpec::optional(vec![code("an..35")]),
            ElementSpec::optional(vec![code("n1")]),
        ],
    )
});

static UNZ_SPEC: Lazy<SegmentSpec> = Lazy::new(|| {
    SegmentSpec::new(
        "UNZ",
        vec![
            ElementSpec::new(vec![code("n..6")]),
            ElementSpec::new(vec![code("an..14")]),
        ],
    )
});

static UNH_SPEC: Lazy<SegmentSpec> = Lazy::new(|| {
    SegmentSpec::new(
        "UNH",
        vec![
            ElementSpec::new(vec![code("an..14")]),
            ElementSpec::new(vec![
                code("an..6"),
                code("an..3"),
                code("an..3"),
                code("an..2"),
                optional("an..6"),
            ]),
            ElementSpec::optional(vec![code("an..35")]),
            ElementSpec::optional(vec![code("n..2"), optional("a1")]),
        ],
    )
});

static UNT_SPEC: Lazy<SegmentSpec> = Lazy::new(|| {
    SegmentSpec::new(
        "UNT",
        vec![
            ElementSpec::new(vec![code("n..6")]),
            ElementSpec::new(vec![code("an..14")]),
        ],
    )
});

/// One message of an interchange: the UNH/UNT pair and the raw body
/// segments in between.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub unh: Segment,
    pub segments: Vec<Segment>,
    pub unt: Segment,
}

impl Message {
    /// The UNH message reference number.
    pub fn reference(&self) -> &str {
        self.unh.component_text(0, 0)
    }

    /// Parse the body segments into a tree with a message specification.
    pub fn body_tree(&self, spec: &MessageSpec) -> Result<SegmentGroup, ParseError> {
        let queue = SegmentQueue::new(self.segments.iter().cloned());
        TreeBuilder::new(queue, spec).build()
    }

    pub fn to_edifact(&self, config: &DelimiterConfig) -> String {
        let mut out = self.unh.to_edifact(config);
        for segment in &self.segments {
            out.push_str(&segment.to_edifact(config));
        }
        out.push_str(&self.unt.to_edifact(config));
        out
    }
}

/// A validated interchange envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct Interchange {
    pub unb: Segment,
    pub messages: Vec<Message>,
    pub unz: Segment,
}

impl Interchange {
    /// Read and validate an interchange from a segment source.
    pub fn read<S: SegmentSource>(source: S) -> Result<Self, ParseError> {
        Reader {
            source,
            peeked: None,
        }
        .read_interchange()
    }

    /// The UNB interchange control reference.
    pub fn control_reference(&self) -> &str {
        self.unb.component_text(4, 0)
    }

    pub fn to_edifact(&self, config: &DelimiterConfig) -> String {
        let mut out = self.unb.to_edifact(config);
        for message in &self.messages {
            out.push_str(&message.to_edifact(config));
        }
        out.push_str(&self.unz.to_edifact(config));
        out
    }
}

struct Reader<S> {
    source: S,
    peeked: Option<Segment>,
}

impl<S: SegmentSource> Reader<S> {
    fn read_interchange(mut self) -> Result<Interchange, ParseError> {
        let unb = self.read_service(&UNB_SPEC)?;

        let mut messages = Vec::new();
        loop {
            let at_trailer = match self.peek()? {
                Some(segment) => segment.name == "UNZ",
                None => true,
            };
            if at_trailer {
                break;
            }
            messages.push(self.read_message()?);
        }

        let unz = self.read_service(&UNZ_SPEC)?;

        if let Some(segment) = self.peek()? {
            return Err(ParseError::TrailingSegment {
                pos: segment.pos,
                name: segment.name.clone(),
            });
        }

        let unb_reference = unb.component_text(4, 0);
        let unz_reference = unz.component_text(1, 0);
        if unb_reference != unz_reference {
            return Err(ParseError::ControlReferenceMismatch {
                pos: unz.pos,
                unb: unb_reference.to_string(),
                unz: unz_reference.to_string(),
            });
        }

        log::debug!(
            "read interchange {} with {} messages",
            unb_reference,
            messages.len()
        );
        Ok(Interchange {
            unb,
            messages,
            unz,
        })
    }

    fn read_message(&mut self) -> Result<Message, ParseError> {
        let unh = self.read_service(&UNH_SPEC)?;

        let mut segments = Vec::new();
        loop {
            let at_trailer = match self.peek()? {
                Some(segment) => segment.name == "UNT",
                None => true,
            };
            if at_trailer {
                break;
            }
            if let Some(segment) = self.next()? {
                segments.push(segment);
            }
        }

        let unt = self.read_service(&UNT_SPEC)?;

        let declared = unt.component_text(0, 0).parse::<u64>().unwrap_or(0);
        // UNH and UNT count towards the declared total
        let actual = segments.len() as u64 + 2;
        if declared != actual {
            return Err(ParseError::SegmentCountMismatch {
                pos: unt.pos,
                declared,
                actual,
            });
        }

        let unh_reference = unh.component_text(0, 0);
        let unt_reference = unt.component_text(1, 0);
        if unh_reference != unt_reference {
            return Err(ParseError::MessageReferenceMismatch {
                pos: unt.pos,
                unh: unh_reference.to_string(),
                unt: unt_reference.to_string(),
            });
        }

        Ok(Message {
            unh,
            segments,
            unt,
        })
    }

    fn read_service(&mut self, spec: &SegmentSpec) -> Result<Segment, ParseError> {
        let segment = match self.next()? {
            Some(segment) => segment,
            None => {
                return Err(ParseError::UnexpectedEndOfInput {
                    pos: self.next_pos(),
                })
            }
        };
        spec.validate(&segment)?;
        Ok(segment)
    }

    fn peek(&mut self) -> Result<Option<&Segment>, ParseError> {
        if self.peeked.is_none() {
            self.peeked = self.source.read()?;
        }
        Ok(self.peeked.as_ref())
    }

    fn next(&mut self) -> Result<Option<Segment>, ParseError> {
        match self.peeked.take() {
            Some(segment) => Ok(Some(segment)),
            None => self.source.read(),
        }
    }

    fn next_pos(&self) -> Position {
        self.peeked
            .as_ref()
            .map(|s| s.pos)
            .unwrap_or_else(|| self.source.next_pos())
    }
}
