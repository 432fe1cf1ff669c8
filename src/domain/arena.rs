use generational_arena::{Arena, Index};
use itertools::Itertools;
use std::fmt;
use termtree::Tree;
use tracing::instrument;

use crate::domain::dataset::Dataset;
use crate::domain::error::{DomainError, DomainResult};

/// Role of a node in the decision tree.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Split on `attribute`; one child per legal value, in declared value order
    Internal {
        attribute: String,
        children: Vec<Index>,
    },
    /// Leaf predicting `class`
    Terminal { class: String },
}

/// Tree node in the arena-based decision tree.
#[derive(Debug)]
pub struct TreeNode {
    pub kind: NodeKind,
    /// Index of parent node in the arena, None for the root
    pub parent: Option<Index>,
    /// Attribute value that selected this node's subset, None for the root
    pub filter_value: Option<String>,
    /// Subset of the training data that produced this node
    pub subset: Dataset,
}

impl TreeNode {
    /// Class name for terminal nodes, attribute name for internal nodes.
    pub fn label(&self) -> &str {
        match &self.kind {
            NodeKind::Internal { attribute, .. } => attribute,
            NodeKind::Terminal { class } => class,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.kind, NodeKind::Terminal { .. })
    }

    pub fn children(&self) -> &[Index] {
        match &self.kind {
            NodeKind::Internal { children, .. } => children,
            NodeKind::Terminal { .. } => &[],
        }
    }
}

impl fmt::Display for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(value) = &self.filter_value {
            write!(f, "[{}] ", value)?;
        }
        match &self.kind {
            NodeKind::Internal { attribute, .. } => write!(f, "{}?", attribute),
            NodeKind::Terminal { class } => write!(f, "=> {} ({})", class, self.subset.examples().len()),
        }
    }
}

/// Arena-based decision tree.
///
/// Nodes refer to their parent and children by arena index, giving O(1)
/// upward steps without shared ownership. Nodes are only ever appended.
#[derive(Debug)]
pub struct DecisionTree {
    arena: Arena<TreeNode>,
    root: Option<Index>,
}

impl Default for DecisionTree {
    fn default() -> Self {
        Self::new()
    }
}

impl DecisionTree {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    /// Append a fully populated node below `parent`.
    ///
    /// A node without parent becomes the root. Attaching below a terminal
    /// node is an invariant violation.
    #[instrument(level = "trace", skip(self, kind, subset))]
    pub(crate) fn insert_node(
        &mut self,
        kind: NodeKind,
        subset: Dataset,
        filter_value: Option<String>,
        parent: Option<Index>,
    ) -> DomainResult<Index> {
        if let Some(parent_idx) = parent {
            match self.arena.get(parent_idx).map(|p| &p.kind) {
                Some(NodeKind::Internal { .. }) => {}
                _ => {
                    return Err(DomainError::InvalidRecursion {
                        reason: "parent is not an internal node".to_string(),
                        path: self.path_of(parent_idx),
                    })
                }
            }
        } else if self.root.is_some() {
            return Err(DomainError::InvalidRecursion {
                reason: "tree already has a root".to_string(),
                path: "root".to_string(),
            });
        }

        let node_idx = self.arena.insert(TreeNode {
            kind,
            parent,
            filter_value,
            subset,
        });

        match parent {
            Some(parent_idx) => {
                if let Some(TreeNode {
                    kind: NodeKind::Internal { children, .. },
                    ..
                }) = self.arena.get_mut(parent_idx)
                {
                    children.push(node_idx);
                }
            }
            None => self.root = Some(node_idx),
        }

        Ok(node_idx)
    }

    pub fn get_node(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get(idx)
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn root_node(&self) -> Option<&TreeNode> {
        self.root.and_then(|idx| self.get_node(idx))
    }

    /// Walk parent links from `idx` until the root.
    pub fn root_of(&self, idx: Index) -> Option<Index> {
        let mut current = idx;
        loop {
            match self.get_node(current)?.parent {
                Some(parent) => current = parent,
                None => return Some(current),
            }
        }
    }

    /// Number of nodes reachable from the root.
    pub fn count_nodes(&self) -> usize {
        self.root.map_or(0, |root| self.count_from(root))
    }

    /// Number of nodes in the subtree rooted at `idx`, pre-order.
    pub fn count_from(&self, idx: Index) -> usize {
        match self.get_node(idx) {
            Some(node) => 1 + node.children().iter().map(|&c| self.count_from(c)).sum::<usize>(),
            None => 0,
        }
    }

    pub fn depth(&self) -> usize {
        fn depth_of(tree: &DecisionTree, idx: Index) -> usize {
            tree.get_node(idx).map_or(0, |node| {
                1 + node
                    .children()
                    .iter()
                    .map(|&c| depth_of(tree, c))
                    .max()
                    .unwrap_or(0)
            })
        }
        self.root.map_or(0, |root| depth_of(self, root))
    }

    /// Pre-order, left-to-right traversal.
    pub fn iter(&self) -> TreeIterator<'_> {
        TreeIterator::new(self)
    }

    /// Terminal nodes, left to right.
    pub fn leaves(&self) -> Vec<&TreeNode> {
        self.iter().map(|(_, n)| n).filter(|n| n.is_terminal()).collect()
    }

    /// Human-readable route from the root, e.g. `root > bp=high > age=<25`.
    pub fn path_of(&self, idx: Index) -> String {
        let mut steps = Vec::new();
        let mut current = Some(idx);
        while let Some(node_idx) = current {
            let Some(node) = self.get_node(node_idx) else {
                break;
            };
            if let (Some(value), Some(parent)) = (&node.filter_value, node.parent) {
                let attribute = self.get_node(parent).map(|p| p.label()).unwrap_or("?");
                steps.push(format!("{}={}", attribute, value));
            }
            current = node.parent;
        }
        steps.push("root".to_string());
        steps.iter().rev().join(" > ")
    }

    /// Classify an example whose values are aligned with the root dataset's
    /// attribute list.
    pub fn predict(&self, values: &[&str]) -> DomainResult<&str> {
        let root = self.root_node().ok_or(DomainError::EmptyTree)?;
        let attributes = root.subset.attributes();
        if values.len() != attributes.len() {
            return Err(DomainError::ExampleArity {
                expected: attributes.len(),
                found: values.len(),
            });
        }

        let mut node = root;
        loop {
            match &node.kind {
                NodeKind::Terminal { class } => return Ok(class.as_str()),
                NodeKind::Internal { attribute, children } => {
                    let value = root
                        .subset
                        .attribute_index(attribute)
                        .map(|i| values[i])
                        .ok_or_else(|| DomainError::MissingAttribute {
                            attribute: attribute.clone(),
                            value: String::new(),
                        })?;
                    node = children
                        .iter()
                        .filter_map(|&c| self.get_node(c))
                        .find(|c| c.filter_value.as_deref() == Some(value))
                        .ok_or_else(|| DomainError::UnknownValue {
                            attribute: attribute.clone(),
                            value: value.to_string(),
                        })?;
                }
            }
        }
    }

    /// Render for terminal display.
    pub fn to_tree_string(&self) -> Tree<String> {
        fn build(tree: &DecisionTree, idx: Index) -> Tree<String> {
            match tree.get_node(idx) {
                Some(node) => Tree::new(node.to_string())
                    .with_leaves(node.children().iter().map(|&c| build(tree, c))),
                None => Tree::new(String::new()),
            }
        }
        match self.root {
            Some(root) => build(self, root),
            None => Tree::new("Empty tree".to_string()),
        }
    }
}

pub struct TreeIterator<'a> {
    tree: &'a DecisionTree,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(tree: &'a DecisionTree) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = tree.root() {
            stack.push(root);
        }
        Self { tree, stack }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        let current_idx = self.stack.pop()?;
        let node = self.tree.get_node(current_idx)?;
        // Push children in reverse order for left-to-right traversal
        for &child in node.children().iter().rev() {
            self.stack.push(child);
        }
        Some((current_idx, node))
    }
}
