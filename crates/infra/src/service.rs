//! Roll service (application-level orchestration).
//!
//! Sits between the API layer and storage. It owns the operations the outside
//! world calls:
//!
//! ```text
//! create(length, weight)  -> validate -> store.insert
//! delete(id)              -> store.get -> mark_deleted -> store.update (once)
//! list(filter)            -> build_predicate -> store.find_all
//! statistics(start, end)  -> TimeWindow -> size check -> store.find_all(overlap) -> compute_statistics
//! ```
//!
//! All validation happens before the store is touched; a failed precondition
//! never produces a write or a partial report.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

use rollstock_core::{DomainError, Entity, RollId};
use rollstock_inventory::{
    DailySnapshot, Measure, NewRoll, ReportingZone, Roll, RollFilter, StatisticsReport,
    TimeWindow, build_predicate, compute_statistics, daily_snapshots, overlap_predicate,
};

use crate::clock::{Clock, SystemClock};
use crate::roll_store::{RollStore, StoreError};

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Caller-facing domain failure (invalid input/range, not found).
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Storage failed.
    #[error("store error: {0}")]
    Store(StoreError),
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::UnknownRoll(id) => {
                ServiceError::Domain(DomainError::not_found(format!("roll with id {id} not found")))
            }
            other => ServiceError::Store(other),
        }
    }
}

/// Widest statistics window accepted by default, in reporting-zone calendar days.
pub const DEFAULT_MAX_WINDOW_DAYS: u32 = 3_660;

pub struct RollService<S> {
    store: S,
    clock: Arc<dyn Clock>,
    zone: ReportingZone,
    max_window_days: u32,
}

impl<S> RollService<S> {
    pub fn new(store: S, zone: ReportingZone) -> Self {
        Self {
            store,
            clock: Arc::new(SystemClock),
            zone,
            max_window_days: DEFAULT_MAX_WINDOW_DAYS,
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_max_window_days(mut self, days: u32) -> Self {
        self.max_window_days = days;
        self
    }

    pub fn zone(&self) -> ReportingZone {
        self.zone
    }

    pub fn max_window_days(&self) -> u32 {
        self.max_window_days
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S> RollService<S>
where
    S: RollStore,
{
    /// Accept a new roll, stamped with the clock's current time.
    pub fn create(
        &self,
        length: Option<Decimal>,
        weight: Option<Decimal>,
    ) -> Result<Roll, ServiceError> {
        let length = Measure::required("length", length)?;
        let weight = Measure::required("weight", weight)?;

        let roll = self.store.insert(NewRoll::new(length, weight, self.clock.now()))?;
        tracing::debug!(
            roll_id = %roll.id(),
            length = %roll.length(),
            weight = %roll.weight(),
            "roll created"
        );
        Ok(roll)
    }

    /// Logically delete a roll.
    ///
    /// Idempotent: an already-deleted roll comes back unchanged and nothing is
    /// written.
    pub fn delete(&self, id: RollId) -> Result<Roll, ServiceError> {
        let mut roll = self.get(id)?;

        if !roll.mark_deleted(self.clock.now()) {
            tracing::warn!(roll_id = %id, "repeated delete of roll; returning it unchanged");
            return Ok(roll);
        }

        let saved = self.store.update(roll)?;
        tracing::debug!(roll_id = %id, "roll marked as deleted");
        Ok(saved)
    }

    pub fn get(&self, id: RollId) -> Result<Roll, ServiceError> {
        self.store
            .get(id)?
            .ok_or_else(|| DomainError::not_found(format!("roll with id {id} not found")).into())
    }

    /// Rolls matching `filter`, ascending by id.
    pub fn list(&self, filter: &RollFilter) -> Result<Vec<Roll>, ServiceError> {
        let predicate = build_predicate(filter)?;
        Ok(self.store.find_all(&predicate)?)
    }

    /// Statistics for rolls on stock at some instant of `[start, end]`.
    pub fn statistics(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<StatisticsReport, ServiceError> {
        let (window, candidates) = self.candidates(start, end)?;
        let report = compute_statistics(&candidates, &window, self.zone);
        tracing::debug!(
            %start,
            %end,
            added = report.added_count,
            deleted = report.deleted_count,
            "statistics computed"
        );
        Ok(report)
    }

    /// Per-day counts and weights behind the day fields of [`Self::statistics`].
    pub fn daily(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<DailySnapshot>, ServiceError> {
        let (window, candidates) = self.candidates(start, end)?;
        Ok(daily_snapshots(&candidates, &window, self.zone))
    }

    fn candidates(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<(TimeWindow, Vec<Roll>), ServiceError> {
        let window = TimeWindow::new(start, end)?;
        let days = self.zone.calendar_days(&window);
        if days > i64::from(self.max_window_days) {
            return Err(DomainError::invalid_range(format!(
                "window spans {days} days; at most {} allowed",
                self.max_window_days
            ))
            .into());
        }

        let candidates = self.store.find_all(&overlap_predicate(window))?;
        tracing::debug!(candidates = candidates.len(), "selected rolls on stock in window");
        Ok((window, candidates))
    }
}
