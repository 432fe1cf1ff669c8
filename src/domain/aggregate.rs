//! Per-attribute statistics of a subset: value entropies and information gain.

use serde::Serialize;

use crate::domain::dataset::Dataset;
use crate::domain::stats::{entropy, gain, BranchMeasure};

/// Statistics for one value of an attribute.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueStats {
    pub value: String,
    /// Occurrences per target label, aligned with the subset's target list
    pub target_counts: Vec<usize>,
    pub occurrences: usize,
    pub entropy: f64,
}

/// Statistics for one enumerated attribute.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeStats {
    pub name: String,
    pub gain: f64,
    pub values: Vec<ValueStats>,
}

/// Target entropy of a subset together with the statistics of every
/// enumerated attribute, in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubsetStats {
    pub entropy: f64,
    pub attributes: Vec<AttributeStats>,
}

impl SubsetStats {
    /// Aggregate statistics for `subset`, skipping real-valued attributes.
    pub fn compute(subset: &Dataset) -> Self {
        let set_entropy = subset.target_entropy();
        let attributes = subset
            .attributes()
            .iter()
            .enumerate()
            .filter(|(_, a)| !a.is_real())
            .map(|(index, attribute)| {
                let mut table = vec![vec![0usize; subset.targets().len()]; attribute.values().len()];
                for example in subset.examples() {
                    let value = example
                        .nominal_value(index)
                        .and_then(|v| attribute.values().iter().position(|legal| legal == v));
                    let target = subset.target_index(&example.target);
                    if let (Some(v), Some(t)) = (value, target) {
                        table[v][t] += 1;
                    }
                }

                let values: Vec<ValueStats> = attribute
                    .values()
                    .iter()
                    .zip(table)
                    .map(|(value, target_counts)| ValueStats {
                        value: value.clone(),
                        occurrences: target_counts.iter().sum(),
                        entropy: entropy(&target_counts),
                        target_counts,
                    })
                    .collect();

                let branches: Vec<BranchMeasure> = values
                    .iter()
                    .map(|v| BranchMeasure {
                        entropy: v.entropy,
                        occurrences: v.occurrences,
                    })
                    .collect();

                AttributeStats {
                    name: attribute.name.clone(),
                    gain: gain(set_entropy, &branches),
                    values,
                }
            })
            .collect();

        Self {
            entropy: set_entropy,
            attributes,
        }
    }

    /// Attribute with the highest gain.
    ///
    /// Ties keep the attribute declared first, so a subset where every gain
    /// is zero splits on its first enumerated attribute. `None` when no
    /// enumerated attribute is left.
    pub fn best_attribute(&self) -> Option<&AttributeStats> {
        let mut best: Option<&AttributeStats> = None;
        for candidate in &self.attributes {
            match best {
                Some(current) if candidate.gain <= current.gain => {}
                _ => best = Some(candidate),
            }
        }
        best
    }

    pub fn attribute(&self, name: &str) -> Option<&AttributeStats> {
        self.attributes.iter().find(|a| a.name == name)
    }
}
