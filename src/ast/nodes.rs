//! Segment, element, component and group value types

use crate::ast::position::Position;
use crate::config::DelimiterConfig;

/// The smallest unit of text in a segment: raw, unescaped content plus the
/// position where it started in the source (for escaped text, the position
/// of the first release character).
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Component {
    pub pos: Position,
    pub text: String,
}

impl Component {
    pub fn new(pos: Position, text: impl Into<String>) -> Self {
        Self {
            pos,
            text: text.into(),
        }
    }

    /// Render the component as wire text, escaping every character that
    /// collides with the active delimiter set.
    pub fn to_edifact(&self, config: &DelimiterConfig) -> String {
        config.escape(&self.text)
    }
}

/// An ordered list of components, introduced by the element separator.
/// The element's position is that of its introducing separator.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Element {
    pub pos: Position,
    pub components: Vec<Component>,
}

impl Element {
    pub fn new(pos: Position) -> Self {
        Self {
            pos,
            components: Vec::new(),
        }
    }

    pub fn push(&mut self, component: Component) {
        self.components.push(component);
    }

    pub fn to_edifact(&self, config: &DelimiterConfig) -> String {
        let mut out = String::new();
        out.push(config.element_separator);
        for (i, component) in self.components.iter().enumerate() {
            if i > 0 {
                out.push(config.component_separator);
            }
            out.push_str(&component.to_edifact(config));
        }
        out
    }
}

/// A named record terminated by the segment separator.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Segment {
    pub pos: Position,
    pub name: String,
    pub elements: Vec<Element>,
}

impl Segment {
    pub fn new(pos: Position, name: impl Into<String>) -> Self {
        Self {
            pos,
            name: name.into(),
            elements: Vec::new(),
        }
    }

    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    /// Text of the component at `(element, component)`, or `""` when absent.
    /// Envelope checks read control references through this.
    pub fn component_text(&self, element: usize, component: usize) -> &str {
        self.elements
            .get(element)
            .and_then(|e| e.components.get(component))
            .map(|c| c.text.as_str())
            .unwrap_or("")
    }

    pub fn to_edifact(&self, config: &DelimiterConfig) -> String {
        let mut out = String::new();
        out.push_str(&self.name);
        for element in &self.elements {
            out.push_str(&element.to_edifact(config));
        }
        out.push(config.segment_separator);
        out
    }
}

/// A child of a segment group: either a plain segment or a nested group.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum TreeNode {
    Segment(Segment),
    Group(SegmentGroup),
}

impl TreeNode {
    pub fn name(&self) -> &str {
        match self {
            TreeNode::Segment(segment) => &segment.name,
            TreeNode::Group(group) => &group.name,
        }
    }

    pub fn pos(&self) -> Position {
        match self {
            TreeNode::Segment(segment) => segment.pos,
            TreeNode::Group(group) => group.pos(),
        }
    }

    pub fn to_edifact(&self, config: &DelimiterConfig) -> String {
        match self {
            TreeNode::Segment(segment) => segment.to_edifact(config),
            TreeNode::Group(group) => group.to_edifact(config),
        }
    }
}

/// One matched repetition instance of a specification group. Its position
/// is that of its first child.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SegmentGroup {
    pub name: String,
    pub children: Vec<TreeNode>,
}

impl SegmentGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    pub fn pos(&self) -> Position {
        self.children
            .first()
            .map(|child| child.pos())
            .unwrap_or(Position::EOF)
    }

    pub fn push(&mut self, child: TreeNode) {
        self.children.push(child);
    }

    /// All plain segments in this group, depth-first.
    pub fn segments(&self) -> Vec<&Segment> {
        let mut out = Vec::new();
        self.collect_segments(&mut out);
        out
    }

    fn collect_segments<'a>(&'a self, out: &mut Vec<&'a Segment>) {
        for child in &self.children {
            match child {
                TreeNode::Segment(segment) => out.push(segment),
                TreeNode::Group(group) => group.collect_segments(out),
            }
        }
    }

    pub fn to_edifact(&self, config: &DelimiterConfig) -> String {
        self.children
            .iter()
            .map(|child| child.to_edifact(config))
            .collect()
    }
}
