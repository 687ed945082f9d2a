//! Set-difference computation.
//!
//! The core entry point is [`compute_unique`], which accepts two extracted
//! line sequences and produces [`UniqueLines`] for both sides.

use crate::diff::model::{DiffMode, UniqueLines};
use std::collections::{HashMap, HashSet};

/// Compute the lines unique to each side.
///
/// Both modes run in O(|A| + |B|) using a hash index keyed by line content.
///
/// - `Multiset`: for each distinct line, `count_a - count_b` occurrences
///   survive in `unique_a` (saturating at zero); the survivors are the
///   earliest occurrences in A. Symmetric for B.
/// - `Set`: every occurrence of a line absent from the whole other side
///   survives.
pub fn compute_unique(seq_a: &[String], seq_b: &[String], mode: DiffMode) -> UniqueLines {
    let (unique_a, unique_b) = match mode {
        DiffMode::Multiset => (multiset_unique(seq_a, seq_b), multiset_unique(seq_b, seq_a)),
        DiffMode::Set => (set_unique(seq_a, seq_b), set_unique(seq_b, seq_a)),
    };

    tracing::debug!(
        mode = %mode,
        a_len = seq_a.len(),
        b_len = seq_b.len(),
        unique_a_len = unique_a.len(),
        unique_b_len = unique_b.len(),
        "computed unique lines"
    );

    UniqueLines {
        mode,
        unique_a,
        unique_b,
    }
}

/// Reference presence-only difference of one side.
///
/// Scans the whole of `other` for every line of `this`: O(|this| * |other|).
/// Kept as the oracle the indexed [`DiffMode::Set`] path is checked against.
pub fn naive_unique(this: &[String], other: &[String]) -> Vec<String> {
    this.iter()
        .filter(|line| !other.iter().any(|o| o == *line))
        .cloned()
        .collect()
}

fn count_index(seq: &[String]) -> HashMap<&str, usize> {
    let mut counts: HashMap<&str, usize> = HashMap::with_capacity(seq.len());
    for line in seq {
        *counts.entry(line.as_str()).or_insert(0) += 1;
    }
    counts
}

fn multiset_unique(this: &[String], other: &[String]) -> Vec<String> {
    let this_counts = count_index(this);
    let other_counts = count_index(other);

    let mut surplus: HashMap<&str, usize> = this_counts
        .into_iter()
        .filter_map(|(line, n)| {
            let left = n.saturating_sub(other_counts.get(line).copied().unwrap_or(0));
            (left > 0).then_some((line, left))
        })
        .collect();

    let mut unique = Vec::new();
    for line in this {
        if let Some(left) = surplus.get_mut(line.as_str()) {
            if *left > 0 {
                *left -= 1;
                unique.push(line.clone());
            }
        }
    }
    unique
}

fn set_unique(this: &[String], other: &[String]) -> Vec<String> {
    let present: HashSet<&str> = other.iter().map(String::as_str).collect();
    this.iter()
        .filter(|line| !present.contains(line.as_str()))
        .cloned()
        .collect()
}
