//! Segment assembly and specification-driven structural parsing

pub mod segment_stream;
pub mod source;
pub mod tree_builder;

pub use segment_stream::SegmentStream;
pub use source::{SegmentQueue, SegmentSource};
pub use tree_builder::TreeBuilder;
