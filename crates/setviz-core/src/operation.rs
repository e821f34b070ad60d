use crate::element_set::{ElementSet, NamedSets};
use crate::{Error, SetCount};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Operation {
    #[default]
    Union,
    Intersection,
    Difference,
    #[serde(rename = "Symmetric Difference", alias = "SymmetricDifference")]
    SymmetricDifference,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Union,
        Operation::Intersection,
        Operation::Difference,
        Operation::SymmetricDifference,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Union => "Union",
            Self::Intersection => "Intersection",
            Self::Difference => "Difference",
            Self::SymmetricDifference => "Symmetric Difference",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Operation {
    type Err = Error;

    /// Accepts display names as well as `kebab-case`, `snake_case` and `CamelCase` spellings,
    /// ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match key.as_str() {
            "union" => Ok(Self::Union),
            "intersection" => Ok(Self::Intersection),
            "difference" => Ok(Self::Difference),
            "symmetricdifference" | "symdiff" | "xor" => Ok(Self::SymmetricDifference),
            _ => Err(Error::UnknownOperation {
                name: s.to_string(),
            }),
        }
    }
}

/// Computes the result set of `operation` over the first `count` of `sets`.
///
/// Union and intersection span every present set. Difference and symmetric difference only look
/// at sets A and B: with both present they yield `A \ B` and `(A ∪ B) \ (A ∩ B)`, with only A
/// present they yield A, otherwise nothing. Set C never affects them.
pub fn evaluate(sets: &NamedSets, count: SetCount, operation: Operation) -> ElementSet {
    let n = count.get();
    let present = move || (0..n).filter_map(move |i| sets.get(i));

    let result = match operation {
        Operation::Union => present().fold(ElementSet::new(), |acc, s| acc.union(s)),
        Operation::Intersection => {
            let mut it = present();
            match it.next() {
                Some(first) => it.fold(first.clone(), |acc, s| acc.intersection(s)),
                None => ElementSet::new(),
            }
        }
        Operation::Difference => match binary_operands(sets, n) {
            (Some(a), Some(b)) => a.difference(b),
            (Some(a), None) => a.clone(),
            _ => ElementSet::new(),
        },
        Operation::SymmetricDifference => match binary_operands(sets, n) {
            (Some(a), Some(b)) => a.union(b).difference(&a.intersection(b)),
            (Some(a), None) => a.clone(),
            _ => ElementSet::new(),
        },
    };

    tracing::debug!(
        operation = operation.display_name(),
        set_count = n,
        result_len = result.len(),
        "evaluated set operation"
    );
    result
}

fn binary_operands(sets: &NamedSets, n: usize) -> (Option<&ElementSet>, Option<&ElementSet>) {
    let a = if n >= 1 { sets.get(0) } else { None };
    let b = if n >= 2 { sets.get(1) } else { None };
    (a, b)
}
