//! Specification-driven structural parsing
//!
//! The builder pulls assembled segments from a [`SegmentSource`] and files
//! each one under the grammar node it matches, opening and closing group
//! instances as the match moves through the specification tree. A segment
//! is validated against its candidate's element specs before any state
//! changes; a failed candidate leaves the tree and the visit counters
//! untouched, and the scan moves on to the next same-named candidate.

use crate::ast::nodes::{Segment, SegmentGroup, TreeNode};
use crate::error::ParseError;
use crate::parser::source::SegmentSource;
use crate::spec::message_spec::{MessageSpec, NodeId, SpecNodeKind, VisitCounts};

/// Builds a segment tree from a segment source and a compiled
/// specification.
pub struct TreeBuilder<'a, S> {
    source: S,
    spec: &'a MessageSpec,
}

impl<'a, S: SegmentSource> TreeBuilder<'a, S> {
    pub fn new(source: S, spec: &'a MessageSpec) -> Self {
        Self { source, spec }
    }

    /// Consume the source and build the tree. The returned group carries
    /// the specification root's name.
    pub fn build(mut self) -> Result<SegmentGroup, ParseError> {
        let mut visits = self.spec.new_visits();
        let mut reachable = self.spec.initial_reachable(&visits);
        // Open group instances, innermost last. The instance at depth d
        // holds children of grammar level d+1.
        let mut stack: Vec<SegmentGroup> = Vec::new();

        while let Some(segment) = self.source.read()? {
            let id = self.match_candidate(&segment, &reachable)?;
            log::trace!("segment {} matched node {:?}", segment.name, id);
            self.commit(id, segment, &mut visits, &mut stack);
            reachable = self.spec.reachable(id, &visits);
        }

        if reachable.iter().any(|&id| {
            let node = self.spec.node(id);
            node.min > visits[id]
        }) {
            return Err(ParseError::UnexpectedEndOfMessage {
                expected: self.spec.names(&reachable),
            });
        }

        close_to(&mut stack, 1);
        match stack.pop() {
            Some(tree) => {
                log::debug!("built tree {} with {} segments", tree.name, tree.segments().len());
                Ok(tree)
            }
            None => Err(ParseError::UnexpectedEndOfMessage {
                expected: self.spec.names(&reachable),
            }),
        }
    }

    /// Scan the reachable candidates in grammar order. The first
    /// same-named candidate whose element specs accept the segment wins;
    /// if all of them reject it, the first rejection is the error.
    fn match_candidate(
        &self,
        segment: &Segment,
        reachable: &[NodeId],
    ) -> Result<NodeId, ParseError> {
        let mut first_failure = None;
        for &id in reachable {
            let node = self.spec.node(id);
            let segment_spec = match &node.kind {
                SpecNodeKind::Segment(spec) => spec,
                SpecNodeKind::Group { .. } => continue,
            };
            if node.name != segment.name {
                continue;
            }
            match segment_spec.validate_elements(segment) {
                Ok(()) => return Ok(id),
                Err(err) => {
                    if first_failure.is_none() {
                        first_failure = Some(err);
                    }
                }
            }
        }
        Err(match first_failure {
            Some(err) => err,
            None => ParseError::InvalidSegment {
                pos: segment.pos,
                name: segment.name.clone(),
                expected: self.spec.names(reachable),
            },
        })
    }

    fn commit(
        &self,
        id: NodeId,
        segment: Segment,
        visits: &mut VisitCounts,
        stack: &mut Vec<SegmentGroup>,
    ) {
        let node = self.spec.node(id);
        close_to(stack, node.level);

        if node.index == 0 {
            // A first child starts a new repetition of its parent group
            close_to(stack, node.level - 1);
            if let Some(parent_id) = node.parent {
                let parent = self.spec.node(parent_id);
                stack.push(SegmentGroup::new(parent.name.clone()));
                visits[parent_id] += 1;
                // Sound because the first child is mandatory: every
                // repetition re-enters through it and resets the counters
                if let SpecNodeKind::Group { children } = &parent.kind {
                    for &child in children {
                        visits[child] = 0;
                    }
                }
            }
        }

        if let Some(group) = stack.last_mut() {
            group.push(TreeNode::Segment(segment));
        }
        visits[id] += 1;
    }
}

/// Merge open groups into their parents until at most `depth` remain.
/// The outermost group stays put.
fn close_to(stack: &mut Vec<SegmentGroup>, depth: usize) {
    while stack.len() > depth && stack.len() > 1 {
        if let Some(group) = stack.pop() {
            if let Some(parent) = stack.last_mut() {
                parent.push(TreeNode::Group(group));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::position::Position;
    use crate::parser::source::SegmentQueue;
    use crate::spec::message_spec::MessageSpec;

    fn segments(names: &[&str]) -> SegmentQueue {
        SegmentQueue::new(
            names
                .iter()
                .enumerate()
                .map(|(i, name)| Segment::new(Position::new(1 + i as u32, 1), *name))
                .collect::<Vec<_>>(),
        )
    }

    fn spec(yaml: &str) -> MessageSpec {
        MessageSpec::from_yaml_str(yaml).unwrap()
    }

    #[test]
    fn test_flat_sequence() {
        let spec = spec(
            r#"
name: MSG
segments:
  - name: ABC
  - name: DEF
"#,
        );
        let tree = TreeBuilder::new(segments(&["ABC", "DEF"]), &spec)
            .build()
            .unwrap();
        assert_eq!(tree.name, "MSG");
        let names: Vec<_> = tree.segments().iter().map(|s| s.name.clone()).collect();
        assert_eq!(names, vec!["ABC", "DEF"]);
    }

    #[test]
    fn test_missing_mandatory_segment() {
        let spec = spec(
            r#"
name: MSG
segments:
  - name: ABC
  - name: DEF
"#,
        );
        let err = TreeBuilder::new(segments(&["ABC"]), &spec)
            .build()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            r#"Unexpected end of input. Expected one of ["DEF"]"#
        );
    }

    #[test]
    fn test_group_repetition_creates_instances() {
        let spec = spec(
            r#"
name: MSG
segments:
  - name: ABC
  - name: SG0
    min: 0
    max: 9
    segments:
      - name: DEF
      - name: GHI
        min: 0
"#,
        );
        let tree = TreeBuilder::new(segments(&["ABC", "DEF", "GHI", "DEF"]), &spec)
            .build()
            .unwrap();
        assert_eq!(tree.children.len(), 3);
        assert_eq!(tree.children[0].name(), "ABC");
        assert_eq!(tree.children[1].name(), "SG0");
        assert_eq!(tree.children[2].name(), "SG0");
        match &tree.children[1] {
            TreeNode::Group(group) => {
                let names: Vec<_> = group.children.iter().map(|c| c.name()).collect();
                assert_eq!(names, vec!["DEF", "GHI"]);
            }
            TreeNode::Segment(_) => panic!("expected a group"),
        }
    }

    #[test]
    fn test_unmatched_segment_lists_candidates() {
        let spec = spec(
            r#"
name: MSG
segments:
  - name: ABC
  - name: DEF
"#,
        );
        let err = TreeBuilder::new(segments(&["ABC", "XXX"]), &spec)
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidSegment {
                pos: Position::new(2, 1),
                name: "XXX".to_string(),
                expected: vec!["DEF".to_string()],
            }
        );
    }
}
