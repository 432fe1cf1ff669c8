//! Reader for the flat-text dataset description.
//!
//! Layout (blank lines ignored):
//! ```text
//! 2
//! yes,no
//! 1
//! bp,2,normal,high
//! 2
//! normal,yes
//! high,no
//! ```
//! Real-valued attributes are declared as `<name>,real`.

use std::collections::HashSet;

use crate::domain::dataset::{AttributeDef, AttributeKind, Dataset, Example, ExampleValues};
use crate::domain::error::ParseError;

/// Non-blank lines with their 1-based position.
struct Lines<'a> {
    inner: Vec<(usize, &'a str)>,
    pos: usize,
}

impl<'a> Lines<'a> {
    fn new(content: &'a str) -> Self {
        let inner = content
            .lines()
            .filter(|l| !l.trim().is_empty())
            .enumerate()
            .map(|(i, l)| (i + 1, l.trim_end_matches('\r')))
            .collect();
        Self { inner, pos: 0 }
    }

    fn next_line(&mut self, section: &'static str) -> Result<(usize, &'a str), ParseError> {
        let line = self
            .inner
            .get(self.pos)
            .copied()
            .ok_or(ParseError::MissingSection {
                line: self.pos + 1,
                section,
            })?;
        self.pos += 1;
        Ok(line)
    }
}

fn parse_count(line: usize, what: &'static str, value: &str) -> Result<usize, ParseError> {
    value.trim().parse::<usize>().map_err(|_| ParseError::InvalidCount {
        line,
        what,
        value: value.to_string(),
    })
}

/// Parse dataset text into a validated [`Dataset`].
pub fn parse_dataset(content: &str) -> Result<Dataset, ParseError> {
    let mut lines = Lines::new(content);

    let (line, raw) = lines.next_line("target count")?;
    let target_count = parse_count(line, "target", raw)?;
    let (line, raw) = lines.next_line("target list")?;
    let targets: Vec<String> = raw.split(',').map(str::to_string).collect();
    if targets.len() != target_count {
        return Err(ParseError::TargetCountMismatch {
            line,
            expected: target_count,
            found: targets.len(),
        });
    }
    let mut seen = HashSet::new();
    for target in &targets {
        if !seen.insert(target.as_str()) {
            return Err(ParseError::DuplicateTarget {
                line,
                target: target.clone(),
            });
        }
    }

    let (line, raw) = lines.next_line("attribute count")?;
    let attribute_count = parse_count(line, "attribute", raw)?;
    let mut attributes = Vec::with_capacity(attribute_count);
    for _ in 0..attribute_count {
        let (line, raw) = lines.next_line("attribute definition")?;
        let attribute = parse_attribute(line, raw)?;
        if attributes.iter().any(|a: &AttributeDef| a.name == attribute.name) {
            return Err(ParseError::DuplicateAttribute {
                line,
                attribute: attribute.name,
            });
        }
        attributes.push(attribute);
    }
    let real = attributes.iter().filter(|a| a.is_real()).count();
    if real > 0 && real < attributes.len() {
        let first_real = attributes.iter().find(|a| a.is_real()).map(|a| a.name.clone());
        return Err(ParseError::HybridExample {
            line,
            attribute: first_real.unwrap_or_default(),
        });
    }

    let (line, raw) = lines.next_line("example count")?;
    let example_count = parse_count(line, "example", raw)?;
    let mut examples = Vec::with_capacity(example_count);
    for _ in 0..example_count {
        let (line, raw) = lines.next_line("example")?;
        examples.push(parse_example(line, raw, &attributes, &targets)?);
    }

    Ok(Dataset::new(targets, attributes, examples))
}

fn parse_attribute(line: usize, raw: &str) -> Result<AttributeDef, ParseError> {
    let fields: Vec<&str> = raw.split(',').collect();
    if fields.len() < 2 {
        return Err(ParseError::MalformedAttribute { line });
    }
    let name = fields[0].to_string();
    if fields[1] == "real" {
        return Ok(AttributeDef {
            name,
            kind: AttributeKind::Real,
        });
    }
    let expected = parse_count(line, "attribute value", fields[1])?;
    let values: Vec<String> = fields[2..].iter().map(|v| v.to_string()).collect();
    if values.len() != expected {
        return Err(ParseError::ValueCountMismatch {
            line,
            attribute: name,
            expected,
            found: values.len(),
        });
    }
    Ok(AttributeDef {
        name,
        kind: AttributeKind::Enumerated(values),
    })
}

fn parse_example(
    line: usize,
    raw: &str,
    attributes: &[AttributeDef],
    targets: &[String],
) -> Result<Example, ParseError> {
    let fields: Vec<&str> = raw.split(',').collect();
    if fields.len() != attributes.len() + 1 {
        return Err(ParseError::FieldCountMismatch {
            line,
            expected: attributes.len(),
            found: fields.len(),
        });
    }
    let (target, values) = fields.split_last().ok_or(ParseError::FieldCountMismatch {
        line,
        expected: attributes.len(),
        found: 0,
    })?;
    if !targets.iter().any(|t| t == target) {
        return Err(ParseError::InvalidTarget {
            line,
            target: target.to_string(),
        });
    }

    let all_real = !attributes.is_empty() && attributes.iter().all(AttributeDef::is_real);
    let values = if all_real {
        let reals = values
            .iter()
            .zip(attributes)
            .map(|(v, a)| {
                v.trim().parse::<f64>().map_err(|_| ParseError::InvalidReal {
                    line,
                    attribute: a.name.clone(),
                    value: v.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        ExampleValues::Real(reals)
    } else {
        for (v, a) in values.iter().zip(attributes) {
            if !a.is_legal(v) {
                return Err(ParseError::InvalidValue {
                    line,
                    attribute: a.name.clone(),
                    value: v.to_string(),
                });
            }
        }
        ExampleValues::Nominal(values.iter().map(|v| v.to_string()).collect())
    };

    Ok(Example {
        values,
        target: target.to_string(),
    })
}
