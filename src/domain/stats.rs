//! Entropy and information gain over occurrence counts.

/// Entropy and size of one branch of a candidate split.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BranchMeasure {
    pub entropy: f64,
    pub occurrences: usize,
}

/// Shannon entropy in bits of a per-class count vector.
///
/// Any empty bucket short-circuits the whole result to `0.0`, not only that
/// bucket's term. An empty vector or a zero total is also `0.0`.
pub fn entropy(counts: &[usize]) -> f64 {
    if counts.is_empty() || counts.contains(&0) {
        return 0.0;
    }
    let total = counts.iter().sum::<usize>() as f64;
    counts
        .iter()
        .map(|&count| {
            let p = count as f64 / total;
            -p * p.log2()
        })
        .sum()
}

/// Information gain of a split: parent entropy minus the size-weighted
/// entropy of its branches.
///
/// Weights are relative to the summed branch occurrences. A split with no
/// occurrences at all yields the parent entropy unchanged.
pub fn gain(parent_entropy: f64, branches: &[BranchMeasure]) -> f64 {
    let total: usize = branches.iter().map(|b| b.occurrences).sum();
    if total == 0 {
        return parent_entropy;
    }
    let total = total as f64;
    let weighted: f64 = branches
        .iter()
        .map(|b| (b.occurrences as f64 / total) * b.entropy)
        .sum();
    parent_entropy - weighted
}
