use std::sync::Arc;

use thiserror::Error;

use rollstock_core::RollId;
use rollstock_inventory::{NewRoll, Roll, RollPredicate};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Update targeted a roll the store has never seen.
    #[error("roll {0} does not exist")]
    UnknownRoll(RollId),

    /// The backing storage cannot serve the request (e.g. poisoned lock).
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Persistent collection of rolls.
///
/// Rolls are never physically removed; deletion is an `update` that sets the
/// delete time. Implementations assign ids on `insert`, monotonically from 1.
pub trait RollStore: Send + Sync {
    /// Persist a new roll, assigning the next id.
    fn insert(&self, roll: NewRoll) -> Result<Roll, StoreError>;

    fn get(&self, id: RollId) -> Result<Option<Roll>, StoreError>;

    /// Overwrite a previously inserted roll.
    fn update(&self, roll: Roll) -> Result<Roll, StoreError>;

    /// Every roll admitted by `predicate`, ascending by id.
    fn find_all(&self, predicate: &RollPredicate) -> Result<Vec<Roll>, StoreError>;
}

impl<S> RollStore for Arc<S>
where
    S: RollStore + ?Sized,
{
    fn insert(&self, roll: NewRoll) -> Result<Roll, StoreError> {
        (**self).insert(roll)
    }

    fn get(&self, id: RollId) -> Result<Option<Roll>, StoreError> {
        (**self).get(id)
    }

    fn update(&self, roll: Roll) -> Result<Roll, StoreError> {
        (**self).update(roll)
    }

    fn find_all(&self, predicate: &RollPredicate) -> Result<Vec<Roll>, StoreError> {
        (**self).find_all(predicate)
    }
}
