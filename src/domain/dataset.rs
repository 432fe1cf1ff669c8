//! Labeled table: targets, attribute definitions and examples.

use serde::Serialize;
use tracing::trace;

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::stats::entropy;

/// Whether an attribute takes enumerated values or real numbers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "values")]
pub enum AttributeKind {
    /// Legal values, in declaration order
    Enumerated(Vec<String>),
    Real,
}

/// Attribute column definition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeDef {
    pub name: String,
    pub kind: AttributeKind,
}

impl AttributeDef {
    pub fn enumerated<S: Into<String>>(name: S, values: &[&str]) -> Self {
        Self {
            name: name.into(),
            kind: AttributeKind::Enumerated(values.iter().map(|v| v.to_string()).collect()),
        }
    }

    pub fn real<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            kind: AttributeKind::Real,
        }
    }

    pub fn is_real(&self) -> bool {
        matches!(self.kind, AttributeKind::Real)
    }

    /// Legal values; empty for real-valued attributes.
    pub fn values(&self) -> &[String] {
        match &self.kind {
            AttributeKind::Enumerated(values) => values,
            AttributeKind::Real => &[],
        }
    }

    pub fn is_legal(&self, value: &str) -> bool {
        self.values().iter().any(|v| v == value)
    }
}

/// Attribute values of one example, aligned with the attribute list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExampleValues {
    Nominal(Vec<String>),
    Real(Vec<f64>),
}

impl ExampleValues {
    pub fn len(&self) -> usize {
        match self {
            ExampleValues::Nominal(values) => values.len(),
            ExampleValues::Real(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of the values with position `index` removed.
    fn without(&self, index: usize) -> Self {
        fn drop_at<T: Clone>(values: &[T], index: usize) -> Vec<T> {
            values
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != index)
                .map(|(_, v)| v.clone())
                .collect()
        }
        match self {
            ExampleValues::Nominal(values) => ExampleValues::Nominal(drop_at(values, index)),
            ExampleValues::Real(values) => ExampleValues::Real(drop_at(values, index)),
        }
    }
}

/// One training instance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Example {
    pub values: ExampleValues,
    pub target: String,
}

impl Example {
    pub fn nominal<S: Into<String>>(values: &[&str], target: S) -> Self {
        Self {
            values: ExampleValues::Nominal(values.iter().map(|v| v.to_string()).collect()),
            target: target.into(),
        }
    }

    /// Enumerated value at `index`, `None` for real examples.
    pub fn nominal_value(&self, index: usize) -> Option<&str> {
        match &self.values {
            ExampleValues::Nominal(values) => values.get(index).map(String::as_str),
            ExampleValues::Real(_) => None,
        }
    }
}

/// A labeled table of examples.
///
/// Values of `Dataset` are never mutated by the induction engine; filtering
/// produces a new, reduced dataset.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Dataset {
    targets: Vec<String>,
    attributes: Vec<AttributeDef>,
    examples: Vec<Example>,
}

impl Dataset {
    /// Assemble a dataset from already validated parts.
    pub fn new(targets: Vec<String>, attributes: Vec<AttributeDef>, examples: Vec<Example>) -> Self {
        Self {
            targets,
            attributes,
            examples,
        }
    }

    pub fn targets(&self) -> &[String] {
        &self.targets
    }

    pub fn attributes(&self) -> &[AttributeDef] {
        &self.attributes
    }

    pub fn examples(&self) -> &[Example] {
        &self.examples
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    pub fn attribute_index(&self, name: &str) -> Option<usize> {
        self.attributes.iter().position(|a| a.name == name)
    }

    pub fn target_index(&self, target: &str) -> Option<usize> {
        self.targets.iter().position(|t| t == target)
    }

    /// Occurrences per target label, in declared target order.
    pub fn target_counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.targets.len()];
        for example in &self.examples {
            if let Some(i) = self.target_index(&example.target) {
                counts[i] += 1;
            }
        }
        counts
    }

    /// Entropy of the target distribution of this subset.
    pub fn target_entropy(&self) -> f64 {
        entropy(&self.target_counts())
    }

    /// Most frequent target label.
    ///
    /// Scans in declared target order; on equal counts the first label wins.
    /// `None` when the dataset has no examples.
    pub fn most_common_target(&self) -> Option<&str> {
        let mut best: Option<(usize, usize)> = None;
        for (i, count) in self.target_counts().into_iter().enumerate() {
            if count == 0 {
                continue;
            }
            if best.map_or(true, |(_, highest)| count > highest) {
                best = Some((i, count));
            }
        }
        best.map(|(i, _)| self.targets[i].as_str())
    }

    /// Restrict to examples whose `attribute` equals `value` and project the
    /// attribute away.
    ///
    /// The target list of the result keeps only labels still present, in the
    /// original declared order.
    pub fn filter(&self, attribute: &str, value: &str) -> DomainResult<Dataset> {
        let index = self
            .attribute_index(attribute)
            .ok_or_else(|| DomainError::MissingAttribute {
                attribute: attribute.to_string(),
                value: value.to_string(),
            })?;
        if self.attributes[index].is_real() {
            return Err(DomainError::NotSplittable {
                attribute: attribute.to_string(),
            });
        }

        let examples: Vec<Example> = self
            .examples
            .iter()
            .filter(|e| e.nominal_value(index) == Some(value))
            .map(|e| Example {
                values: e.values.without(index),
                target: e.target.clone(),
            })
            .collect();

        let targets: Vec<String> = self
            .targets
            .iter()
            .filter(|t| examples.iter().any(|e| &e.target == *t))
            .cloned()
            .collect();

        let attributes: Vec<AttributeDef> = self
            .attributes
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, a)| a.clone())
            .collect();

        trace!(
            attribute,
            value,
            kept = examples.len(),
            of = self.examples.len(),
            "filtered subset"
        );

        Ok(Dataset {
            targets,
            attributes,
            examples,
        })
    }
}
