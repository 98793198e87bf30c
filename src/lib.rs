//! # edifact
//!
//! A parser, validator and serializer for EDIFACT interchanges.
//!
//! The pipeline runs in four stages: the [`lexer`] turns raw input into
//! delimiter-aware tokens (resolving the UNA header and the release
//! character), the [`parser`] assembles tokens into segments and matches a
//! segment sequence against a compiled message specification, the [`spec`]
//! module holds the datatype and grammar specifications consulted during
//! matching, and the [`builder`] constructs segment trees directly for
//! serialization back to wire text.
//!
//! ## Testing
//!
//! Datatype semantics and the grammar traversal are covered by unit tests
//! beside the code; end-to-end behavior (tokenization, assembly, tree
//! building, envelope checks, round-trips) lives in `tests/`.

pub mod ast;
pub mod builder;
pub mod config;
pub mod error;
pub mod interchange;
pub mod lexer;
pub mod parser;
pub mod processor;
pub mod spec;

pub use ast::{Component, Element, Position, Segment, SegmentGroup, TreeNode};
pub use builder::{BuildError, SegmentBuilder};
pub use config::DelimiterConfig;
pub use error::{ParseError, SpecificationError};
pub use interchange::{Interchange, Message};
pub use lexer::{Token, TokenKind, Tokenizer};
pub use parser::{SegmentQueue, SegmentSource, SegmentStream, TreeBuilder};
pub use processor::ProcessError;
pub use spec::{ComponentSpec, ElementSpec, MessageSpec, SegmentSpec, SpecNodeDef};
