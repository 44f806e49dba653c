//! Predicates over rolls, as explicit clause lists.
//!
//! A predicate is data (inspectable, `Debug`, comparable) rather than an opaque
//! closure, so the store can evaluate it and tests can assert on its shape.

use chrono::{DateTime, Utc};

use rollstock_core::RollId;

use crate::measure::Measure;
use crate::roll::Roll;
use crate::window::TimeWindow;

/// Optional inclusive lower/upper bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds<T> {
    pub min: Option<T>,
    pub max: Option<T>,
}

impl<T: PartialOrd> Bounds<T> {
    pub fn new(min: Option<T>, max: Option<T>) -> Self {
        Self { min, max }
    }

    /// Neither bound is set.
    pub fn is_open(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    pub fn is_inverted(&self) -> bool {
        matches!((&self.min, &self.max), (Some(min), Some(max)) if min > max)
    }

    pub fn admits(&self, value: &T) -> bool {
        self.min.as_ref().is_none_or(|min| value >= min)
            && self.max.as_ref().is_none_or(|max| value <= max)
    }

    /// A missing value never satisfies a set bound.
    pub fn admits_opt(&self, value: Option<&T>) -> bool {
        match value {
            Some(v) => self.admits(v),
            None => self.is_open(),
        }
    }
}

impl<T> Default for Bounds<T> {
    fn default() -> Self {
        Self { min: None, max: None }
    }
}

/// One conjunct of a [`RollPredicate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause {
    Id(Bounds<RollId>),
    Length(Bounds<Measure>),
    Weight(Bounds<Measure>),
    AddTime(Bounds<DateTime<Utc>>),
    DeleteTime(Bounds<DateTime<Utc>>),
    /// Roll was on stock at some instant of the window.
    Overlaps(TimeWindow),
}

impl Clause {
    pub fn test(&self, roll: &Roll) -> bool {
        match self {
            Clause::Id(b) => b.admits(&roll.id_typed()),
            Clause::Length(b) => b.admits(&roll.length()),
            Clause::Weight(b) => b.admits(&roll.weight()),
            Clause::AddTime(b) => b.admits(&roll.add_time()),
            Clause::DeleteTime(b) => b.admits_opt(roll.delete_time().as_ref()),
            Clause::Overlaps(window) => roll.overlaps(window),
        }
    }
}

/// Conjunction of clauses. No clauses admits every roll.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RollPredicate {
    clauses: Vec<Clause>,
}

impl RollPredicate {
    /// The predicate admitting every roll.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn and(mut self, clause: Clause) -> Self {
        self.clauses.push(clause);
        self
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn test(&self, roll: &Roll) -> bool {
        self.clauses.iter().all(|c| c.test(roll))
    }
}
