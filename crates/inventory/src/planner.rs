//! Candidate selection for statistics windows.
//!
//! A candidate is any roll that was on stock at some instant of the window.
//! Output order is unspecified; the aggregation pass is order-independent.

use crate::predicate::{Clause, RollPredicate};
use crate::roll::Roll;
use crate::window::TimeWindow;

/// Predicate selecting rolls that overlap `window` (for the store).
pub fn overlap_predicate(window: TimeWindow) -> RollPredicate {
    RollPredicate::all().and(Clause::Overlaps(window))
}

/// In-memory selection of rolls that overlap `window`.
pub fn select_candidates<'a, I>(items: I, window: &TimeWindow) -> Vec<Roll>
where
    I: IntoIterator<Item = &'a Roll>,
{
    items
        .into_iter()
        .filter(|r| r.overlaps(window))
        .cloned()
        .collect()
}
