//! Folding per-contract projections into one aggregate matrix.

use contango_core::Date;
use serde::{Deserialize, Serialize};

use crate::error::{CurveError, CurveResult};
use crate::matrix::AggregateMatrix;
use crate::prices::PriceTable;
use crate::projection::project;

/// Parameters for a combine pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombineParams {
    /// Number of contributing snapshots after which the pass stops.
    pub max_times: usize,
}

impl CombineParams {
    /// Default contribution cap.
    pub const DEFAULT_MAX_TIMES: usize = 12;

    /// Parameters with the given contribution cap.
    pub fn new(max_times: usize) -> Self {
        Self { max_times }
    }
}

impl Default for CombineParams {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_TIMES)
    }
}

/// Incremental combiner.
///
/// Snapshots are offered newest first; each is projected at its own nominal
/// date and summed into the aggregate until `max_times` of them have
/// contributed. Callers reading snapshots lazily stop as soon as
/// [`Combiner::is_full`] returns true.
#[derive(Debug, Clone)]
pub struct Combiner<'a> {
    delivery_dates: &'a [Date],
    params: CombineParams,
    aggregate: AggregateMatrix,
    contributions: usize,
    considered: usize,
}

impl<'a> Combiner<'a> {
    /// Creates a combiner over the ascending `delivery_dates`.
    pub fn new(delivery_dates: &'a [Date], params: CombineParams) -> Self {
        Self {
            delivery_dates,
            params,
            aggregate: AggregateMatrix::new(),
            contributions: 0,
            considered: 0,
        }
    }

    /// Returns true once `max_times` snapshots have contributed.
    pub fn is_full(&self) -> bool {
        self.contributions >= self.params.max_times
    }

    /// Number of snapshots that contributed so far.
    pub fn contributions(&self) -> usize {
        self.contributions
    }

    /// Number of snapshots offered so far.
    pub fn considered(&self) -> usize {
        self.considered
    }

    /// Projects `table` at `tdate` and adds it to the aggregate.
    ///
    /// Returns true if the snapshot contributed. Nothing is added once the
    /// combiner is full.
    pub fn offer(&mut self, tdate: Date, table: &PriceTable) -> bool {
        if self.is_full() {
            return false;
        }
        self.considered += 1;
        match project(self.delivery_dates, table, tdate) {
            Some(matrix) => {
                self.aggregate.accumulate(&matrix);
                self.contributions += 1;
                tracing::debug!(%tdate, rows = matrix.len(), "snapshot contributed");
                true
            }
            None => {
                tracing::debug!(%tdate, "snapshot made no contribution");
                false
            }
        }
    }

    /// Completes the pass.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::NoUsableSnapshots` if nothing contributed.
    pub fn finish(self) -> CurveResult<AggregateMatrix> {
        if self.contributions == 0 {
            return Err(CurveError::no_usable_snapshots(self.considered));
        }
        tracing::info!(
            contributions = self.contributions,
            considered = self.considered,
            rows = self.aggregate.len(),
            last = ?self.aggregate.last_date().map(|d| d.to_string()),
            "combine pass complete"
        );
        Ok(self.aggregate)
    }
}

/// Combines in-memory snapshots, each keyed by its nominal date.
///
/// Snapshots are taken newest first regardless of input order.
///
/// # Errors
///
/// Returns `CurveError::NoUsableSnapshots` if no snapshot contributes.
pub fn combine_snapshots<I>(
    delivery_dates: &[Date],
    snapshots: I,
    params: &CombineParams,
) -> CurveResult<AggregateMatrix>
where
    I: IntoIterator<Item = (Date, PriceTable)>,
{
    let mut snapshots: Vec<(Date, PriceTable)> = snapshots.into_iter().collect();
    snapshots.sort_by(|a, b| b.0.cmp(&a.0));

    let mut combiner = Combiner::new(delivery_dates, *params);
    for (tdate, table) in &snapshots {
        if combiner.is_full() {
            break;
        }
        combiner.offer(*tdate, table);
    }
    combiner.finish()
}
