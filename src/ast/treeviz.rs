//! Treeviz formatter for parse trees

use crate::ast::nodes::{SegmentGroup, TreeNode};

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

/// Render a parse tree as an indented tree with box-drawing connectors.
pub fn to_treeviz_str(root: &SegmentGroup) -> String {
    let mut result = String::new();
    result.push_str(&format!("{}\n", root.name));
    for (i, child) in root.children.iter().enumerate() {
        let is_last = i == root.children.len() - 1;
        append_node(&mut result, child, "", is_last);
    }
    result
}

fn append_node(result: &mut String, node: &TreeNode, prefix: &str, is_last: bool) {
    let connector = if is_last { "└─" } else { "├─" };

    match node {
        TreeNode::Segment(segment) => {
            let values = segment
                .elements
                .iter()
                .flat_map(|e| e.components.iter())
                .map(|c| c.text.as_str())
                .collect::<Vec<_>>()
                .join(" ");
            let label = if values.is_empty() {
                segment.name.clone()
            } else {
                format!("{} {}", segment.name, truncate(&values, 30))
            };
            result.push_str(&format!("{}{} {}\n", prefix, connector, label));
        }
        TreeNode::Group(group) => {
            result.push_str(&format!("{}{} {}\n", prefix, connector, group.name));
            let new_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
            for (i, child) in group.children.iter().enumerate() {
                let child_is_last = i == group.children.len() - 1;
                append_node(result, child, &new_prefix, child_is_last);
            }
        }
    }
}
