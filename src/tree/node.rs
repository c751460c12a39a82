use std::fmt;

use serde::Serialize;

/// One node of a declaration tree: a label and its children in insertion order.
///
/// The root is labeled `Root`; its children are namespace nodes, their children type
/// nodes and below those member nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeNode {
    label: String,
    children: Vec<TreeNode>,
}

impl TreeNode {
    /// Create a node without children.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        TreeNode {
            label: label.into(),
            children: Vec::new(),
        }
    }

    /// The display text of this node.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The children in insertion order.
    #[must_use]
    pub fn children(&self) -> &[TreeNode] {
        &self.children
    }

    /// Append `child` and return a reference to it.
    pub fn push(&mut self, child: TreeNode) -> &mut TreeNode {
        let index = self.children.len();
        self.children.push(child);
        &mut self.children[index]
    }

    /// First direct child whose label equals `label`.
    #[must_use]
    pub fn find(&self, label: &str) -> Option<&TreeNode> {
        self.children.iter().find(|child| child.label == label)
    }

    /// Mutable access to the first direct child matching `predicate`.
    pub fn find_mut<F>(&mut self, predicate: F) -> Option<&mut TreeNode>
    where
        F: Fn(&TreeNode) -> bool,
    {
        self.children.iter_mut().find(|child| predicate(child))
    }

    /// Number of nodes in this subtree, including this one.
    #[must_use]
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(TreeNode::count).sum::<usize>()
    }

    /// A copy of this subtree cut below `depth` levels of children.
    ///
    /// A depth of zero keeps only this node.
    #[must_use]
    pub fn pruned(&self, depth: usize) -> TreeNode {
        TreeNode {
            label: self.label.clone(),
            children: match depth {
                0 => Vec::new(),
                _ => self
                    .children
                    .iter()
                    .map(|child| child.pruned(depth - 1))
                    .collect(),
            },
        }
    }

    /// A copy of this node keeping only the direct children `keep` accepts.
    #[must_use]
    pub fn retain_children<F>(&self, keep: F) -> TreeNode
    where
        F: Fn(&TreeNode) -> bool,
    {
        TreeNode {
            label: self.label.clone(),
            children: self
                .children
                .iter()
                .filter(|child| keep(child))
                .cloned()
                .collect(),
        }
    }

    fn write_indented(&self, f: &mut fmt::Formatter<'_>, level: usize) -> fmt::Result {
        writeln!(f, "{:indent$}{}", "", self.label, indent = level * 2)?;
        for child in &self.children {
            child.write_indented(f, level + 1)?;
        }
        Ok(())
    }
}

/// Renders the subtree one label per line, indented by two spaces per level.
impl fmt::Display for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_indented(f, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TreeNode {
        let mut root = TreeNode::new("Root");
        let namespace = root.push(TreeNode::new("namespace Demo"));
        let ty = namespace.push(TreeNode::new("public class Widget"));
        ty.push(TreeNode::new("public Int32 Size"));
        ty.push(TreeNode::new("public Void Draw()"));
        namespace.push(TreeNode::new("public enum Color"));
        root
    }

    #[test]
    fn structure() {
        let root = sample();
        assert_eq!(root.label(), "Root");
        assert_eq!(root.count(), 6);

        let namespace = root.find("namespace Demo").unwrap();
        let labels: Vec<&str> = namespace.children().iter().map(TreeNode::label).collect();
        assert_eq!(labels, ["public class Widget", "public enum Color"]);
        assert!(root.find("namespace Other").is_none());
    }

    #[test]
    fn pruning() {
        let root = sample();
        assert_eq!(root.pruned(0).count(), 1);
        assert_eq!(root.pruned(2).count(), 4);
        assert_eq!(root.pruned(10), root);

        let filtered = root.children()[0].retain_children(|child| child.label().contains("enum"));
        assert_eq!(filtered.children().len(), 1);
    }

    #[test]
    fn display() {
        let text = sample().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Root");
        assert_eq!(lines[1], "  namespace Demo");
        assert_eq!(lines[3], "      public Int32 Size");
        assert_eq!(lines[5], "    public enum Color");
    }
}
