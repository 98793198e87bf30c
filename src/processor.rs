//! High-level entry points over the pipeline
//!
//! String-based functions run one stage each (tokenize, assemble, build a
//! tree, read an envelope); the `*_file` variants add file IO, and
//! [`load_spec`] picks the specification format by file extension.

use crate::ast::nodes::{Segment, SegmentGroup};
use crate::error::{ParseError, SpecificationError};
use crate::interchange::Interchange;
use crate::lexer::tokenizer::Tokenizer;
use crate::lexer::tokens::Token;
use crate::parser::segment_stream::SegmentStream;
use crate::parser::tree_builder::TreeBuilder;
use crate::spec::message_spec::MessageSpec;
use std::fmt;
use std::path::Path;

/// Anything that can go wrong in the high-level entry points.
#[derive(Debug)]
pub enum ProcessError {
    Io(std::io::Error),
    Parse(ParseError),
    Spec(SpecificationError),
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessError::Io(err) => write!(f, "{}", err),
            ProcessError::Parse(err) => write!(f, "{}", err),
            ProcessError::Spec(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ProcessError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProcessError::Io(err) => Some(err),
            ProcessError::Parse(err) => Some(err),
            ProcessError::Spec(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ProcessError {
    fn from(err: std::io::Error) -> Self {
        ProcessError::Io(err)
    }
}

impl From<ParseError> for ProcessError {
    fn from(err: ParseError) -> Self {
        ProcessError::Parse(err)
    }
}

impl From<SpecificationError> for ProcessError {
    fn from(err: SpecificationError) -> Self {
        ProcessError::Spec(err)
    }
}

/// Tokenize wire text, EOF token included.
pub fn tokenize(input: &str) -> Result<Vec<Token>, ProcessError> {
    let mut tokenizer = Tokenizer::new(input)?;
    Ok(tokenizer.read_remaining()?)
}

/// Assemble wire text into flat segments.
pub fn read_segments(input: &str) -> Result<Vec<Segment>, ProcessError> {
    let mut stream = SegmentStream::from_str(input)?;
    Ok(stream.read_remaining()?)
}

/// Parse wire text into a tree under a message specification.
pub fn parse_message(input: &str, spec: &MessageSpec) -> Result<SegmentGroup, ProcessError> {
    let stream = SegmentStream::from_str(input)?;
    Ok(TreeBuilder::new(stream, spec).build()?)
}

/// Read and validate an interchange envelope from wire text.
pub fn read_interchange(input: &str) -> Result<Interchange, ProcessError> {
    let stream = SegmentStream::from_str(input)?;
    Ok(Interchange::read(stream)?)
}

/// Load and compile a message specification, YAML or JSON by extension.
pub fn load_spec(path: &Path) -> Result<MessageSpec, ProcessError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    match extension.as_str() {
        "yaml" | "yml" => {
            let input = std::fs::read_to_string(path)?;
            Ok(MessageSpec::from_yaml_str(&input)?)
        }
        "json" => {
            let input = std::fs::read_to_string(path)?;
            Ok(MessageSpec::from_json_str(&input)?)
        }
        other => Err(ProcessError::Spec(SpecificationError::Format {
            message: format!("unsupported specification format {:?}", other),
        })),
    }
}

pub fn tokenize_file(path: &Path) -> Result<Vec<Token>, ProcessError> {
    tokenize(&std::fs::read_to_string(path)?)
}

pub fn read_segments_file(path: &Path) -> Result<Vec<Segment>, ProcessError> {
    read_segments(&std::fs::read_to_string(path)?)
}

pub fn parse_message_file(path: &Path, spec: &MessageSpec) -> Result<SegmentGroup, ProcessError> {
    parse_message(&std::fs::read_to_string(path)?, spec)
}

pub fn read_interchange_file(path: &Path) -> Result<Interchange, ProcessError> {
    read_interchange(&std::fs::read_to_string(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_message() {
        let spec = MessageSpec::from_yaml_str(
            r#"
name: MSG
segments:
  - name: ABC
  - name: DEF
"#,
        )
        .unwrap();
        let tree = parse_message("UNA:+.? 'ABC+1'DEF+2'", &spec).unwrap();
        assert_eq!(tree.name, "MSG");
        assert_eq!(tree.segments().len(), 2);
    }

    #[test]
    fn test_load_spec_rejects_unknown_extension() {
        let err = load_spec(Path::new("message.txt")).unwrap_err();
        assert!(matches!(
            err,
            ProcessError::Spec(SpecificationError::Format { .. })
        ));
    }
}
