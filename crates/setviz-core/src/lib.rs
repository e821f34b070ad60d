#![forbid(unsafe_code)]

//! Set normalization, Venn region partitioning and set operations (headless).
//!
//! Design goals:
//! - one pure entry point ([`compute`]) that rebuilds everything from raw input text
//! - total functions over normalized labels; the only errors are malformed requests
//! - deterministic iteration order (first insertion) so layouts and reports are reproducible

pub mod config;
pub mod element_set;
pub mod error;
pub mod operation;
pub mod region;
pub mod report;

pub use config::VennConfig;
pub use element_set::{ElementSet, MAX_SETS, NamedSet, NamedSets, set_name};
pub use error::{Error, Result};
pub use operation::{Operation, evaluate};
pub use region::{RegionKey, RegionMap, partition};
pub use report::render_report;

use serde::{Deserialize, Serialize};

/// Number of sets a Venn diagram is drawn for. Only the two canonical arrangements exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub enum SetCount {
    #[default]
    Two,
    Three,
}

impl SetCount {
    pub fn get(self) -> usize {
        match self {
            Self::Two => 2,
            Self::Three => 3,
        }
    }
}

impl TryFrom<usize> for SetCount {
    type Error = Error;

    fn try_from(count: usize) -> Result<Self> {
        match count {
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            count => Err(Error::UnsupportedSetCount { count }),
        }
    }
}

impl From<SetCount> for usize {
    fn from(count: SetCount) -> usize {
        count.get()
    }
}

/// Everything the input side supplies for one "calculate" action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateRequest {
    pub set_count: usize,
    pub operation: String,
    /// Raw comma-separated text per set, in `A, B, C` order.
    #[serde(rename = "sets", default)]
    pub raw_sets: Vec<String>,
}

impl CalculateRequest {
    pub fn new(
        set_count: usize,
        operation: impl Into<String>,
        raw_sets: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            set_count,
            operation: operation.into(),
            raw_sets: raw_sets.into_iter().map(Into::into).collect(),
        }
    }
}

/// The full outcome of one calculation. Recomputed from scratch on every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Calculation {
    pub set_count: SetCount,
    pub operation: Operation,
    pub sets: NamedSets,
    pub regions: RegionMap,
    pub result: ElementSet,
}

impl Calculation {
    pub fn report(&self) -> String {
        render_report(self)
    }
}

/// Normalizes the raw inputs, partitions them into regions and evaluates the operation.
///
/// Raw inputs past `set_count` are ignored; fewer inputs than `set_count` leave the remaining
/// sets absent.
pub fn compute(request: &CalculateRequest) -> Result<Calculation> {
    let set_count = SetCount::try_from(request.set_count)?;
    let operation: Operation = request.operation.parse()?;

    let n = set_count.get().min(request.raw_sets.len());
    let sets = NamedSets::from_raw(&request.raw_sets[..n])?;

    Ok(compute_sets(sets, set_count, operation))
}

/// Same as [`compute`] for already-normalized sets.
pub fn compute_sets(sets: NamedSets, set_count: SetCount, operation: Operation) -> Calculation {
    let sets = sets.truncated(set_count.get());
    let regions = partition(&sets, set_count);
    let result = evaluate(&sets, set_count, operation);

    tracing::debug!(
        set_count = set_count.get(),
        operation = operation.display_name(),
        regions = regions.non_empty().count(),
        "computed venn calculation"
    );

    Calculation {
        set_count,
        operation,
        sets,
        regions,
        result,
    }
}

#[cfg(test)]
mod tests;
