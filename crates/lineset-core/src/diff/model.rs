//! Set-difference output types.

use serde::{Deserialize, Serialize};

/// How repeated lines are counted when taking the difference
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffMode {
    /// Per-line multiplicity: a line held twice in A and once in B leaves one
    /// copy unique to A
    #[default]
    Multiset,
    /// Presence only: a line survives iff it is absent from the whole other side
    Set,
}

impl std::str::FromStr for DiffMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "multiset" => Ok(DiffMode::Multiset),
            "set" => Ok(DiffMode::Set),
            other => Err(format!("unknown diff mode '{}'", other)),
        }
    }
}

impl std::fmt::Display for DiffMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiffMode::Multiset => write!(f, "multiset"),
            DiffMode::Set => write!(f, "set"),
        }
    }
}

/// Lines unique to each side of a comparison, in original order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniqueLines {
    /// Counting mode the result was computed with
    pub mode: DiffMode,
    /// Lines of A without a counterpart in B
    pub unique_a: Vec<String>,
    /// Lines of B without a counterpart in A
    pub unique_b: Vec<String>,
}

impl UniqueLines {
    /// True when neither side has anything unique
    pub fn is_reconciled(&self) -> bool {
        self.unique_a.is_empty() && self.unique_b.is_empty()
    }
}
