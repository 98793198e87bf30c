//! Data model for parsed EDIFACT documents
//!
//! Components, elements and segments are created once during assembly and
//! are immutable afterwards. Segment groups are produced by the structural
//! parser, one instance per matched repetition of a specification group.

pub mod nodes;
pub mod position;
pub mod treeviz;

pub use nodes::{Component, Element, Segment, SegmentGroup, TreeNode};
pub use position::Position;
