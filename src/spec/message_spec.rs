//! The compiled message grammar: an arena of segment and group nodes
//!
//! A specification compiles once into an immutable tree. Per-parse state
//! (how often each node matched) lives in a separate [`VisitCounts`]
//! array keyed by [`NodeId`] and owned by the structural parser, so
//! several parses can share one compiled specification.
//!
//! Two invariants, enforced at compile time, carry the whole traversal:
//! the first child of any group is mandatory and unrepeatable
//! (min=1, max=1), and only the root may have a group as its first child.
//! Matching a first child is therefore a reliable signal that a new
//! repetition of its parent group has begun.

use crate::error::SpecificationError;
use crate::spec::def::SpecNodeDef;
use crate::spec::segment_spec::SegmentSpec;
use std::ops::{Index, IndexMut};

/// Stable index of a node in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Per-parse match counters, one per arena node.
#[derive(Debug, Clone)]
pub struct VisitCounts(Vec<u32>);

impl Index<NodeId> for VisitCounts {
    type Output = u32;

    fn index(&self, id: NodeId) -> &u32 {
        &self.0[id.0]
    }
}

impl IndexMut<NodeId> for VisitCounts {
    fn index_mut(&mut self, id: NodeId) -> &mut u32 {
        &mut self.0[id.0]
    }
}

/// What a grammar node is: a group of child nodes or a concrete segment.
#[derive(Debug, Clone, PartialEq)]
pub enum SpecNodeKind {
    Group { children: Vec<NodeId> },
    Segment(SegmentSpec),
}

/// One node of the compiled grammar tree.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecNode {
    pub name: String,
    pub min: u32,
    pub max: u32,
    pub parent: Option<NodeId>,
    /// Position among the parent's children.
    pub index: usize,
    /// Depth in the tree; the root is level 0.
    pub level: usize,
    pub kind: SpecNodeKind,
}

/// A compiled message specification.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageSpec {
    nodes: Vec<SpecNode>,
    root: NodeId,
}

impl MessageSpec {
    /// Compile a specification definition, rejecting shapes the traversal
    /// cannot support.
    pub fn compile(def: &SpecNodeDef) -> Result<Self, SpecificationError> {
        let mut nodes = Vec::new();
        let root = Self::add_node(&mut nodes, def, None, 0, 0)?;
        Ok(Self { nodes, root })
    }

    /// Compile a specification from its YAML form.
    pub fn from_yaml_str(input: &str) -> Result<Self, SpecificationError> {
        let def: SpecNodeDef =
            serde_yaml::from_str(input).map_err(|e| SpecificationError::Format {
                message: e.to_string(),
            })?;
        Self::compile(&def)
    }

    /// Compile a specification from its JSON form.
    pub fn from_json_str(input: &str) -> Result<Self, SpecificationError> {
        let def: SpecNodeDef =
            serde_json::from_str(input).map_err(|e| SpecificationError::Format {
                message: e.to_string(),
            })?;
        Self::compile(&def)
    }

    fn add_node(
        nodes: &mut Vec<SpecNode>,
        def: &SpecNodeDef,
        parent: Option<NodeId>,
        index: usize,
        level: usize,
    ) -> Result<NodeId, SpecificationError> {
        let min = def.min.unwrap_or(1);
        let max = def.max.unwrap_or(1);

        let invalid = |message: String| SpecificationError::Node {
            name: def.name.clone(),
            message,
        };

        if index == 0 && (min != 1 || max != 1) {
            return Err(invalid(format!(
                "First element of a group must be min=1 max=1 (got min={} max={})",
                min, max
            )));
        }
        if index == 0 && def.segments.is_some() && parent.is_some() {
            return Err(invalid(
                "First element of a group cannot be another group".to_string(),
            ));
        }
        if parent.is_none() && def.segments.is_none() {
            return Err(invalid("The root must be a group".to_string()));
        }
        if min > max {
            return Err(invalid(format!("min={} exceeds max={}", min, max)));
        }
        if max == 0 {
            return Err(invalid("max must be at least 1".to_string()));
        }
        if def.segments.is_some() && def.elements.is_some() {
            return Err(invalid(
                "A node cannot have both segments and elements".to_string(),
            ));
        }

        let id = NodeId(nodes.len());
        nodes.push(SpecNode {
            name: def.name.clone(),
            min,
            max,
            parent,
            index,
            level,
            kind: SpecNodeKind::Segment(SegmentSpec::new(def.name.clone(), Vec::new())),
        });

        match &def.segments {
            Some(child_defs) => {
                if child_defs.is_empty() {
                    return Err(invalid("A group needs at least one child".to_string()));
                }
                let mut children = Vec::with_capacity(child_defs.len());
                for (i, child_def) in child_defs.iter().enumerate() {
                    children.push(Self::add_node(nodes, child_def, Some(id), i, level + 1)?);
                }
                nodes[id.0].kind = SpecNodeKind::Group { children };
            }
            None => {
                let mut elements = Vec::new();
                for element_def in def.elements.iter().flatten() {
                    elements.push(element_def.compile()?);
                }
                nodes[id.0].kind =
                    SpecNodeKind::Segment(SegmentSpec::new(def.name.clone(), elements));
            }
        }

        Ok(id)
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &SpecNode {
        &self.nodes[id.0]
    }

    /// Fresh counters for one parse run.
    pub fn new_visits(&self) -> VisitCounts {
        VisitCounts(vec![0; self.nodes.len()])
    }

    /// The nodes that could legally match the first segment.
    pub fn initial_reachable(&self, visits: &VisitCounts) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.push_reachable(self.root, visits, &mut out);
        out
    }

    /// The nodes that could legally match the next segment, given that
    /// `id` was the last match.
    pub fn reachable(&self, id: NodeId, visits: &VisitCounts) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.push_reachable(id, visits, &mut out);
        out
    }

    pub fn names(&self, ids: &[NodeId]) -> Vec<String> {
        ids.iter().map(|&id| self.node(id).name.clone()).collect()
    }

    fn push_reachable(&self, id: NodeId, visits: &VisitCounts, out: &mut Vec<NodeId>) {
        let node = self.node(id);
        if visits[id] < node.max {
            match &node.kind {
                // Re-entering a group restarts at its mandatory first child
                SpecNodeKind::Group { children } => {
                    if let Some(&first) = children.first() {
                        self.push_reachable(first, visits, out);
                    }
                }
                SpecNodeKind::Segment(_) => out.push(id),
            }
            if visits[id] >= node.min {
                self.push_next_sibling(id, visits, out);
            }
        } else {
            self.push_next_sibling(id, visits, out);
        }
    }

    fn push_next_sibling(&self, id: NodeId, visits: &VisitCounts, out: &mut Vec<NodeId>) {
        let node = self.node(id);
        let parent_id = match node.parent {
            Some(parent_id) => parent_id,
            // The root has no siblings: end of message
            None => return,
        };
        let parent = self.node(parent_id);
        let children = match &parent.kind {
            SpecNodeKind::Group { children } => children,
            SpecNodeKind::Segment(_) => return,
        };

        if let Some(&sibling) = children.get(node.index + 1) {
            self.push_reachable(sibling, visits, out);
        } else {
            // Last child. A repeatable parent restarts at its first child
            // (pushed directly: its counters are stale until the new
            // repetition resets them); either way the walk continues past
            // the parent.
            if visits[parent_id] < parent.max {
                if let Some(&first) = children.first() {
                    out.push(first);
                }
            }
            self.push_next_sibling(parent_id, visits, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::def::SpecNodeDef;

    fn compile(yaml: &str) -> MessageSpec {
        MessageSpec::from_yaml_str(yaml).unwrap()
    }

    fn reachable_names(spec: &MessageSpec, visits: &VisitCounts) -> Vec<String> {
        spec.names(&spec.initial_reachable(visits))
    }

    #[test]
    fn test_initial_reachable_is_first_leaf() {
        let spec = compile(
            r#"
name: MSG
segments:
  - name: ABC
  - name: DEF
"#,
        );
        let visits = spec.new_visits();
        assert_eq!(reachable_names(&spec, &visits), vec!["ABC"]);
    }

    #[test]
    fn test_reachable_skips_optional_segments() {
        let spec = compile(
            r#"
name: MSG
segments:
  - name: ABC
  - name: DEF
    min: 0
  - name: GHI
"#,
        );
        let mut visits = spec.new_visits();
        let abc = spec.initial_reachable(&visits)[0];
        visits[abc] += 1;
        assert_eq!(
            spec.names(&spec.reachable(abc, &visits)),
            vec!["DEF", "GHI"]
        );
    }

    #[test]
    fn test_repeatable_group_offers_first_child_again() {
        let spec = compile(
            r#"
name: MSG
segments:
  - name: ABC
  - name: SG0
    min: 0
    max: 99
    segments:
      - name: DEF
      - name: GHI
"#,
        );
        let mut visits = spec.new_visits();
        let abc = spec.initial_reachable(&visits)[0];
        // Matching an index-0 node also counts a visit on its parent
        visits[spec.root()] += 1;
        visits[abc] += 1;

        let after_abc = spec.reachable(abc, &visits);
        assert_eq!(spec.names(&after_abc), vec!["DEF"]);

        let def = after_abc[0];
        let sg0 = spec.node(def).parent.unwrap();
        visits[sg0] += 1;
        visits[def] += 1;
        let ghi = spec.reachable(def, &visits)[0];
        assert_eq!(spec.node(ghi).name, "GHI");

        visits[ghi] += 1;
        // After a full repetition the group offers its first child again
        assert_eq!(spec.names(&spec.reachable(ghi, &visits)), vec!["DEF"]);
    }

    #[test]
    fn test_rejects_repeatable_first_child() {
        let err = MessageSpec::from_yaml_str(
            r#"
name: MSG
segments:
  - name: ABC
    min: 0
"#,
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid specification for ABC: First element of a group must be min=1 max=1 (got min=0 max=1)"
        );
    }

    #[test]
    fn test_rejects_group_as_first_child() {
        let err = MessageSpec::from_yaml_str(
            r#"
name: MSG
segments:
  - name: SG0
    segments:
      - name: ABC
"#,
        )
        .unwrap_err();
        assert!(matches!(err, SpecificationError::Node { name, .. } if name == "SG0"));
    }

    #[test]
    fn test_rejects_root_leaf() {
        let def = SpecNodeDef::segment("MSG");
        assert!(MessageSpec::compile(&def).is_err());
    }

    #[test]
    fn test_rejects_min_above_max() {
        let err = MessageSpec::from_yaml_str(
            r#"
name: MSG
segments:
  - name: ABC
  - name: DEF
    min: 3
    max: 2
"#,
        )
        .unwrap_err();
        assert!(matches!(err, SpecificationError::Node { name, .. } if name == "DEF"));
    }
}
