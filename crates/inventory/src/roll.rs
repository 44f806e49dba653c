use chrono::{DateTime, Utc};

use rollstock_core::{Entity, RollId};

use crate::measure::Measure;
use crate::window::TimeWindow;

/// A roll that has been accepted but not yet stored (no id assigned).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRoll {
    pub length: Measure,
    pub weight: Measure,
    pub add_time: DateTime<Utc>,
}

impl NewRoll {
    pub fn new(length: Measure, weight: Measure, add_time: DateTime<Utc>) -> Self {
        Self {
            length,
            weight,
            add_time,
        }
    }

    /// Attach the store-assigned identifier.
    pub fn into_roll(self, id: RollId) -> Roll {
        Roll::from_parts(id, self.length, self.weight, self.add_time, None)
    }
}

/// Entity: Roll.
///
/// Presence interval is `[add_time, delete_time]`, open-ended while
/// `delete_time` is `None`. Measurements never change after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roll {
    id: RollId,
    length: Measure,
    weight: Measure,
    add_time: DateTime<Utc>,
    delete_time: Option<DateTime<Utc>>,
}

impl Roll {
    /// Rehydrate a roll from stored values.
    ///
    /// No fix-up is applied: a stored `delete_time` earlier than `add_time`
    /// is kept as-is and queries see exactly what was stored.
    pub fn from_parts(
        id: RollId,
        length: Measure,
        weight: Measure,
        add_time: DateTime<Utc>,
        delete_time: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            length,
            weight,
            add_time,
            delete_time,
        }
    }

    pub fn id_typed(&self) -> RollId {
        self.id
    }

    pub fn length(&self) -> Measure {
        self.length
    }

    pub fn weight(&self) -> Measure {
        self.weight
    }

    pub fn add_time(&self) -> DateTime<Utc> {
        self.add_time
    }

    pub fn delete_time(&self) -> Option<DateTime<Utc>> {
        self.delete_time
    }

    pub fn is_deleted(&self) -> bool {
        self.delete_time.is_some()
    }

    /// On stock at instant `t`.
    pub fn present_at(&self, t: DateTime<Utc>) -> bool {
        self.add_time <= t && self.delete_time.is_none_or(|d| d >= t)
    }

    /// On stock at some instant of `window`.
    ///
    /// Every "was this roll there during ..." question goes through here:
    /// candidate selection, the overlap predicate clause and the per-day pass.
    pub fn overlaps(&self, window: &TimeWindow) -> bool {
        self.add_time <= window.end() && self.delete_time.is_none_or(|d| d >= window.start())
    }

    /// Logically delete the roll at `at`.
    ///
    /// Returns `false` (and changes nothing) if the roll was already deleted;
    /// a delete time is never moved once set.
    pub fn mark_deleted(&mut self, at: DateTime<Utc>) -> bool {
        if self.delete_time.is_some() {
            return false;
        }
        self.delete_time = Some(at);
        true
    }

    /// Whole seconds between add and delete, if deleted.
    pub fn life_span_seconds(&self) -> Option<i64> {
        self.delete_time.map(|d| (d - self.add_time).num_seconds())
    }
}

impl Entity for Roll {
    type Id = RollId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
