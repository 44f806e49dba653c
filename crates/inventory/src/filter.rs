//! Listing filters: optional min/max bounds turned into a [`RollPredicate`].

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use rollstock_core::{DomainError, DomainResult, RollId};

use crate::measure::Measure;
use crate::predicate::{Bounds, Clause, RollPredicate};

/// Optional inclusive bounds for listing rolls. Every field is independent.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RollFilter {
    pub id_min: Option<u64>,
    pub id_max: Option<u64>,
    pub length_min: Option<Decimal>,
    pub length_max: Option<Decimal>,
    pub weight_min: Option<Decimal>,
    pub weight_max: Option<Decimal>,
    pub add_date_min: Option<DateTime<Utc>>,
    pub add_date_max: Option<DateTime<Utc>>,
    pub delete_date_min: Option<DateTime<Utc>>,
    pub delete_date_max: Option<DateTime<Utc>>,
}

/// Validated bounds, one set per field.
#[derive(Debug)]
struct CheckedBounds {
    id: Bounds<RollId>,
    length: Bounds<Measure>,
    weight: Bounds<Measure>,
    add_time: Bounds<DateTime<Utc>>,
    delete_time: Bounds<DateTime<Utc>>,
}

impl RollFilter {
    /// Reject malformed filters: non-positive bounds and inverted ranges.
    pub fn validate(&self) -> DomainResult<()> {
        self.check().map(|_| ())
    }

    fn check(&self) -> DomainResult<CheckedBounds> {
        for (name, id) in [("id_min", self.id_min), ("id_max", self.id_max)] {
            if id == Some(0) {
                return Err(DomainError::invalid_input(format!("{name} must be a positive number")));
            }
        }

        let bounds = CheckedBounds {
            id: Bounds::new(self.id_min.map(RollId::new), self.id_max.map(RollId::new)),
            length: Bounds::new(
                measure_bound("length_min", self.length_min)?,
                measure_bound("length_max", self.length_max)?,
            ),
            weight: Bounds::new(
                measure_bound("weight_min", self.weight_min)?,
                measure_bound("weight_max", self.weight_max)?,
            ),
            add_time: Bounds::new(self.add_date_min, self.add_date_max),
            delete_time: Bounds::new(self.delete_date_min, self.delete_date_max),
        };

        if bounds.id.is_inverted() {
            return Err(DomainError::invalid_input("id_min must not be greater than id_max"));
        }
        if bounds.length.is_inverted() {
            return Err(DomainError::invalid_input("length_min must not be greater than length_max"));
        }
        if bounds.weight.is_inverted() {
            return Err(DomainError::invalid_input("weight_min must not be greater than weight_max"));
        }
        if bounds.add_time.is_inverted() {
            return Err(DomainError::invalid_input("add_date_min must not be after add_date_max"));
        }
        if bounds.delete_time.is_inverted() {
            return Err(DomainError::invalid_input(
                "delete_date_min must not be after delete_date_max",
            ));
        }
        if let (Some(deleted), Some(added)) = (self.delete_date_min, self.add_date_min) {
            if deleted < added {
                return Err(DomainError::invalid_input(
                    "delete_date_min must not be before add_date_min",
                ));
            }
        }

        Ok(bounds)
    }
}

fn measure_bound(name: &str, value: Option<Decimal>) -> DomainResult<Option<Measure>> {
    value.map(|v| Measure::new(name, v)).transpose()
}

/// Conjunction of every bound set in `filter`; unset bounds add no clause.
///
/// Fails with `InvalidInput` for malformed filters instead of producing a
/// predicate that matches nothing.
pub fn build_predicate(filter: &RollFilter) -> DomainResult<RollPredicate> {
    let bounds = filter.check()?;

    let clauses = [
        (!bounds.id.is_open()).then_some(Clause::Id(bounds.id)),
        (!bounds.length.is_open()).then_some(Clause::Length(bounds.length)),
        (!bounds.weight.is_open()).then_some(Clause::Weight(bounds.weight)),
        (!bounds.add_time.is_open()).then_some(Clause::AddTime(bounds.add_time)),
        (!bounds.delete_time.is_open()).then_some(Clause::DeleteTime(bounds.delete_time)),
    ];

    Ok(clauses
        .into_iter()
        .flatten()
        .fold(RollPredicate::all(), RollPredicate::and))
}
