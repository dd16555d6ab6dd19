//! Batch drivers: validate a whole dataset, persist the verdicts, and screen
//! parcels against hazard polygons.
//!
//! Uses rayon for validation; polygons are independent so the work splits
//! freely and results are put back in source order afterwards.

mod intersect;

pub use intersect::{affected_parcels, AffectedParcel};

use rayon::prelude::*;

use crate::backend::GeometryBackend;
use crate::geometry::Polygon;
use crate::store::{StoreError, ValidityStore};
use crate::validation::{TopologyValidator, ValidationOutcome};

/// Outcome for the polygon at `index` in the source dataset
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedOutcome {
    pub index: usize,
    pub outcome: ValidationOutcome,
}

/// Validates every polygon, returning outcomes in source order
pub fn validate_batch<B: GeometryBackend>(
    polygons: &[Polygon],
    validator: &TopologyValidator<B>,
    parallel: bool,
) -> Vec<IndexedOutcome> {
    let validate = |(index, polygon): (usize, &Polygon)| IndexedOutcome {
        index,
        outcome: validator.validate(polygon),
    };

    let mut outcomes: Vec<IndexedOutcome> = if parallel {
        polygons.par_iter().enumerate().map(validate).collect()
    } else {
        polygons.iter().enumerate().map(validate).collect()
    };
    outcomes.sort_by_key(|o| o.index);
    outcomes
}

/// Upserts each outcome, keyed by its index. A failed write is logged and
/// returned; it does not stop the remaining writes.
///
/// Backend failures carry no verdict and are left unrecorded.
pub fn persist_outcomes(
    outcomes: &[IndexedOutcome],
    store: &mut dyn ValidityStore,
) -> Vec<(usize, StoreError)> {
    let mut failures = Vec::new();
    for o in outcomes {
        if o.outcome.is_backend_error() {
            tracing::warn!(index = o.index, "no verdict to store after backend failure");
            continue;
        }
        if let Err(e) = store.upsert(o.index as i64, !o.outcome.is_valid()) {
            tracing::warn!(index = o.index, error = %e, "failed to store validity");
            failures.push((o.index, e));
        }
    }
    failures
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchSummary {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
    /// Polygons the backend failed on; counted in neither `valid` nor `invalid`
    pub backend_errors: usize,
}

impl BatchSummary {
    pub fn from_outcomes(outcomes: &[IndexedOutcome]) -> Self {
        let mut summary = Self {
            total: outcomes.len(),
            ..Self::default()
        };
        for o in outcomes {
            if o.outcome.is_valid() {
                summary.valid += 1;
            } else if o.outcome.is_backend_error() {
                summary.backend_errors += 1;
            } else {
                summary.invalid += 1;
            }
        }
        summary
    }

    /// 1 when more than `max_invalid` polygons failed or any polygon hit a
    /// backend failure, else 0
    pub fn exit_code(&self, max_invalid: usize) -> i32 {
        if self.invalid > max_invalid || self.backend_errors > 0 {
            1
        } else {
            0
        }
    }
}
