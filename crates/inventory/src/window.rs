//! Inclusive query windows.

use chrono::{DateTime, Utc};

use rollstock_core::{DomainError, DomainResult, ValueObject};

/// Inclusive time window `[start, end]`.
///
/// Construction guarantees `start <= end`, so every consumer of a window can
/// rely on it without re-checking.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct TimeWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> DomainResult<Self> {
        if start > end {
            return Err(DomainError::invalid_range(format!(
                "start ({start}) must not be after end ({end})"
            )));
        }
        Ok(Self { start, end })
    }

    /// Window known to be ordered by construction (e.g. a calendar day).
    pub(crate) fn spanning(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        self.start <= t && t <= self.end
    }
}

impl ValueObject for TimeWindow {}
