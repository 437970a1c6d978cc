use serde::Serialize;
use std::fmt::{self, Display};

///
/// Agreement between two bases.
///
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Comparison {
    Same,
    Different,
}

///
/// Compare two bases by literal equality.
///
/// Ambiguity codes are not expanded: `R` and `A` are different even though
/// `R` includes `A`.
///
pub fn compare(base_1: char, base_2: char) -> Comparison {
    if base_1 == base_2 {
        Comparison::Same
    } else {
        Comparison::Different
    }
}

impl Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Comparison::Same => write!(f, "the nucleotides given are the SAME"),
            Comparison::Different => write!(f, "the nucleotides given are DIFFERENT"),
        }
    }
}
