//! End-to-end structural parsing: wire text through tokenizer, segment
//! stream and tree builder.

use edifact::ast::{Position, SegmentGroup, TreeNode};
use edifact::parser::{SegmentStream, TreeBuilder};
use edifact::spec::MessageSpec;
use edifact::ParseError;

fn spec(yaml: &str) -> MessageSpec {
    MessageSpec::from_yaml_str(yaml).unwrap()
}

fn parse(input: &str, spec: &MessageSpec) -> Result<SegmentGroup, ParseError> {
    let wire = format!("UNA:+.? '{}", input);
    let stream = SegmentStream::from_str(&wire)?;
    TreeBuilder::new(stream, spec).build()
}

/// A compact rendering of the tree's structure, e.g. `MSG(ABC SG0(DEF))`.
fn shape(group: &SegmentGroup) -> String {
    let children: Vec<String> = group
        .children
        .iter()
        .map(|child| match child {
            TreeNode::Segment(segment) => segment.name.clone(),
            TreeNode::Group(group) => shape(group),
        })
        .collect();
    format!("{}({})", group.name, children.join(" "))
}

#[test]
fn test_single_segment_tree() {
    let spec = spec(
        r#"
name: MSG
segments:
  - name: ABC
"#,
    );
    let tree = parse("ABC'", &spec).unwrap();
    assert_eq!(shape(&tree), "MSG(ABC)");
}

#[test]
fn test_wrong_segment() {
    let spec = spec(
        r#"
name: MSG
segments:
  - name: ABC
"#,
    );
    let err = parse("DEF'", &spec).unwrap_err();
    assert_eq!(
        err.to_string(),
        r#"Position 1:10: Invalid segment "DEF". Expected one of ["ABC"]"#
    );
    assert_eq!(err.pos(), Position::new(1, 10));
}

#[test]
fn test_multiple_possible_segments() {
    let spec = spec(
        r#"
name: MSG
segments:
  - name: ABC
  - name: DEF
    min: 0
  - name: GHI
"#,
    );
    assert!(parse("ABC'GHI'", &spec).is_ok());
    assert!(parse("ABC'DEF'GHI'", &spec).is_ok());
}

#[test]
fn test_missing_segment() {
    let spec = spec(
        r#"
name: MSG
segments:
  - name: ABC
  - name: DEF
"#,
    );
    let err = parse("ABC'", &spec).unwrap_err();
    assert_eq!(
        err.to_string(),
        r#"Unexpected end of input. Expected one of ["DEF"]"#
    );
}

#[test]
fn test_optional_trailing_segments() {
    let spec = spec(
        r#"
name: MSG
segments:
  - name: ABC
  - name: DEF
    min: 0
  - name: GHI
    min: 0
"#,
    );
    let tree = parse("ABC'", &spec).unwrap();
    assert_eq!(shape(&tree), "MSG(ABC)");
}

#[test]
fn test_nested_tree() {
    let spec = spec(
        r#"
name: MSG
segments:
  - name: ABC
  - name: SG0
    segments:
      - name: DEF
"#,
    );
    let tree = parse("ABC'DEF'", &spec).unwrap();
    assert_eq!(shape(&tree), "MSG(ABC SG0(DEF))");
}

#[test]
fn test_nested_groups() {
    let spec = spec(
        r#"
name: MSG
segments:
  - name: ABC
  - name: SG0
    segments:
      - name: DEF
      - name: SG1
        segments:
          - name: GHI
"#,
    );
    let tree = parse("ABC'DEF'GHI'", &spec).unwrap();
    assert_eq!(shape(&tree), "MSG(ABC SG0(DEF SG1(GHI)))");
}

#[test]
fn test_repeating_groups() {
    let spec = spec(
        r#"
name: MSG
segments:
  - name: ABC
  - name: SG0
    max: 99
    segments:
      - name: DEF
      - name: GHI
"#,
    );
    let tree = parse("ABC'DEF'GHI'DEF'GHI'", &spec).unwrap();
    assert_eq!(shape(&tree), "MSG(ABC SG0(DEF GHI) SG0(DEF GHI))");
}

#[test]
fn test_segment_after_repeating_group() {
    let spec = spec(
        r#"
name: MSG
segments:
  - name: ABC
  - name: SG0
    max: 99
    segments:
      - name: DEF
      - name: GHI
  - name: JKL
"#,
    );
    let tree = parse("ABC'DEF'GHI'DEF'GHI'JKL'", &spec).unwrap();
    assert_eq!(shape(&tree), "MSG(ABC SG0(DEF GHI) SG0(DEF GHI) JKL)");
}

#[test]
fn test_double_nested_tree_at_end_of_group() {
    let spec = spec(
        r#"
name: MSG
segments:
  - name: ABC
  - name: SG0
    segments:
      - name: DEF
      - name: SG1
        segments:
          - name: GHI
  - name: JKL
"#,
    );
    let tree = parse("ABC'DEF'GHI'JKL'", &spec).unwrap();
    assert_eq!(shape(&tree), "MSG(ABC SG0(DEF SG1(GHI)) JKL)");
}

#[test]
fn test_element_validation_is_triggered() {
    let spec = spec(
        r#"
name: MSG
segments:
  - name: ABC
    elements:
      - ["1234"]
"#,
    );
    let err = parse("ABC+hello'", &spec).unwrap_err();
    assert_eq!(
        err.to_string(),
        r#"Position 1:14: Invalid value "hello". Expected "1234""#
    );
}

#[test]
fn test_same_named_candidates_are_tried_in_order() {
    let spec = spec(
        r#"
name: MSG
segments:
  - name: ABC
  - name: DEF
    min: 0
    elements:
      - ["A"]
  - name: DEF
    min: 0
    elements:
      - ["B"]
"#,
    );
    // The first candidate rejects "B"; the second accepts it
    let tree = parse("ABC'DEF+B'", &spec).unwrap();
    assert_eq!(shape(&tree), "MSG(ABC DEF)");

    assert!(parse("ABC'DEF+A'", &spec).is_ok());
    assert!(parse("ABC'DEF+A'DEF+B'", &spec).is_ok());

    // When every candidate rejects, the first rejection is reported
    let err = parse("ABC'DEF+C'", &spec).unwrap_err();
    assert_eq!(
        err.to_string(),
        r#"Position 1:18: Invalid value "C". Expected "A""#
    );
}

#[test]
fn test_failed_candidate_leaves_no_trace() {
    let spec = spec(
        r#"
name: MSG
segments:
  - name: ABC
  - name: DEF
    min: 0
    max: 2
    elements:
      - ["A"]
  - name: GHI
    min: 0
"#,
    );
    // DEF+X fails validation; the counters must still allow two DEF
    // repetitions afterwards
    let err = parse("ABC'DEF+X'", &spec).unwrap_err();
    assert!(matches!(err, ParseError::InvalidValue { .. }));
    assert!(parse("ABC'DEF+A'DEF+A'GHI'", &spec).is_ok());
}

#[test]
fn test_positions_survive_the_pipeline() {
    let spec = spec(
        r#"
name: MSG
segments:
  - name: ABC
"#,
    );
    let tree = parse("ABC+1:2:3'", &spec).unwrap();
    let segments = tree.segments();
    let abc = segments[0];
    assert_eq!(abc.pos, Position::new(1, 10));
    assert_eq!(abc.elements[0].pos, Position::new(1, 13));
    assert_eq!(abc.elements[0].components[0].pos, Position::new(1, 14));
    assert_eq!(abc.elements[0].components[1].pos, Position::new(1, 16));
    assert_eq!(abc.elements[0].components[2].pos, Position::new(1, 18));
}
