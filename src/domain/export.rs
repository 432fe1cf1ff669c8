//! Serializable, nested view of a decision tree.

use generational_arena::Index;
use serde::Serialize;

use crate::domain::arena::DecisionTree;
use crate::domain::dataset::Dataset;

/// Size and target distribution of the subset behind a node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubsetSummary {
    pub examples: usize,
    pub targets: Vec<String>,
    pub target_counts: Vec<usize>,
    pub entropy: f64,
}

impl From<&Dataset> for SubsetSummary {
    fn from(subset: &Dataset) -> Self {
        Self {
            examples: subset.examples().len(),
            targets: subset.targets().to_vec(),
            target_counts: subset.target_counts(),
            entropy: subset.target_entropy(),
        }
    }
}

/// One node with its ordered children; the filter value is empty at the root.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeExport {
    pub label: String,
    pub terminal: bool,
    pub filter_value: String,
    pub subset: SubsetSummary,
    pub children: Vec<TreeExport>,
}

impl TreeExport {
    /// Nested copy of `tree`, `None` for an empty tree.
    pub fn from_tree(tree: &DecisionTree) -> Option<Self> {
        tree.root().and_then(|root| Self::from_node(tree, root))
    }

    fn from_node(tree: &DecisionTree, idx: Index) -> Option<Self> {
        let node = tree.get_node(idx)?;
        Some(Self {
            label: node.label().to_string(),
            terminal: node.is_terminal(),
            filter_value: node.filter_value.clone().unwrap_or_default(),
            subset: SubsetSummary::from(&node.subset),
            children: node
                .children()
                .iter()
                .filter_map(|&c| Self::from_node(tree, c))
                .collect(),
        })
    }

    pub fn count_nodes(&self) -> usize {
        1 + self.children.iter().map(TreeExport::count_nodes).sum::<usize>()
    }
}
