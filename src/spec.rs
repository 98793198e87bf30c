//! Message specifications: datatypes, element/segment shapes and the
//! grammar tree
//!
//! Specifications are compiled once, at load time, into closed enums and
//! an arena-backed tree; anything unrecognized is rejected with a
//! [`SpecificationError`](crate::error::SpecificationError) before any
//! document is parsed. Compiled specifications are immutable; per-parse
//! state (visit counts) lives with the structural parser.

pub mod component_spec;
pub mod def;
pub mod element_spec;
pub mod message_spec;
pub mod segment_spec;

pub use component_spec::ComponentSpec;
pub use def::{ComponentSpecDef, ElementSpecDef, SpecNodeDef};
pub use element_spec::ElementSpec;
pub use message_spec::{MessageSpec, NodeId, SpecNode, SpecNodeKind, VisitCounts};
pub use segment_spec::SegmentSpec;
