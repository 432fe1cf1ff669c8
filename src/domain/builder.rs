//! ID3 tree induction.

use generational_arena::Index;
use tracing::instrument;

use crate::domain::aggregate::SubsetStats;
use crate::domain::arena::{DecisionTree, NodeKind};
use crate::domain::dataset::Dataset;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::observer::{BuildObserver, TracingObserver};

const ROOT_PATH: &str = "root";

/// Grows a decision tree by recursive information-gain splits.
pub struct TreeBuilder<O: BuildObserver = TracingObserver> {
    observer: O,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            observer: TracingObserver,
        }
    }
}

impl<O: BuildObserver> TreeBuilder<O> {
    pub fn with_observer(observer: O) -> Self {
        Self { observer }
    }

    pub fn into_observer(self) -> O {
        self.observer
    }

    /// Build a complete tree from `dataset`.
    ///
    /// Either the whole tree is returned or the first failure, with the path
    /// of the node being built.
    #[instrument(level = "debug", skip_all, fields(examples = dataset.examples().len()))]
    pub fn build(&mut self, dataset: &Dataset) -> DomainResult<DecisionTree> {
        let mut tree = DecisionTree::new();
        self.grow(&mut tree, dataset.clone(), None, None, ROOT_PATH)?;
        Ok(tree)
    }

    fn grow(
        &mut self,
        tree: &mut DecisionTree,
        subset: Dataset,
        filter_value: Option<String>,
        parent: Option<Index>,
        path: &str,
    ) -> DomainResult<Index> {
        if filter_value.is_some() && parent.is_none() {
            return Err(DomainError::InvalidRecursion {
                reason: "filter value given without a parent node".to_string(),
                path: path.to_string(),
            });
        }
        self.observer.node_entered(path, subset.examples().len());

        // 1) pure subset
        if subset.targets().len() == 1 && !subset.is_empty() {
            let class = subset.targets()[0].clone();
            return self.terminal(tree, class, subset, filter_value, parent, path);
        }

        // 2) nothing left to split on
        if !subset.is_empty() && subset.attributes().iter().all(|a| a.is_real()) {
            let class = subset
                .most_common_target()
                .map(str::to_string)
                .ok_or_else(|| DomainError::InvalidRecursion {
                    reason: "no target label among remaining examples".to_string(),
                    path: path.to_string(),
                })?;
            return self.terminal(tree, class, subset, filter_value, parent, path);
        }

        // 3) no examples matched the parent's split value
        if subset.is_empty() {
            let class = parent
                .and_then(|p| tree.get_node(p))
                .and_then(|p| p.subset.most_common_target())
                .map(str::to_string)
                .ok_or_else(|| DomainError::InvalidRecursion {
                    reason: "no examples and no parent to fall back on".to_string(),
                    path: path.to_string(),
                })?;
            return self.terminal(tree, class, subset, filter_value, parent, path);
        }

        let stats = SubsetStats::compute(&subset);
        let (attribute, gain) = stats
            .best_attribute()
            .map(|best| (best.name.clone(), best.gain))
            .ok_or_else(|| DomainError::InvalidRecursion {
                reason: "no attribute statistics for a splittable subset".to_string(),
                path: path.to_string(),
            })?;
        self.observer.attribute_chosen(path, &attribute, gain);

        let values = split_values(&subset, &attribute, path)?;
        let mut branches = Vec::with_capacity(values.len());
        for value in values {
            let child_path = format!("{} > {}={}", path, attribute, value);
            let child = subset
                .filter(&attribute, &value)
                .map_err(|source| DomainError::Branch {
                    path: child_path.clone(),
                    source: Box::new(source),
                })?;
            branches.push((value, child, child_path));
        }

        let node = tree.insert_node(
            NodeKind::Internal {
                attribute: attribute.clone(),
                children: Vec::new(),
            },
            subset,
            filter_value,
            parent,
        )?;
        for (value, child, child_path) in branches {
            self.grow(tree, child, Some(value), Some(node), &child_path)?;
        }

        self.observer.node_completed(path, &attribute, false);
        Ok(node)
    }

    fn terminal(
        &mut self,
        tree: &mut DecisionTree,
        class: String,
        subset: Dataset,
        filter_value: Option<String>,
        parent: Option<Index>,
        path: &str,
    ) -> DomainResult<Index> {
        self.observer.node_completed(path, &class, true);
        tree.insert_node(NodeKind::Terminal { class }, subset, filter_value, parent)
    }
}

/// Declared values of the attribute chosen for a split.
fn split_values(subset: &Dataset, attribute: &str, path: &str) -> DomainResult<Vec<String>> {
    subset
        .attribute_index(attribute)
        .map(|i| subset.attributes()[i].values().to_vec())
        .ok_or_else(|| DomainError::InvalidRecursion {
            reason: format!("chosen attribute {} is not in the subset", attribute),
            path: path.to_string(),
        })
}

/// Build a tree with the default tracing observer.
pub fn build_tree(dataset: &Dataset) -> DomainResult<DecisionTree> {
    TreeBuilder::new().build(dataset)
}
