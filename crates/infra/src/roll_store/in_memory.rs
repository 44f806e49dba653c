use std::collections::BTreeMap;
use std::sync::RwLock;

use rollstock_core::{Entity, RollId};
use rollstock_inventory::{NewRoll, Roll, RollPredicate};

use super::r#trait::{RollStore, StoreError};

#[derive(Debug)]
struct Inner {
    rolls: BTreeMap<RollId, Roll>,
    next_id: RollId,
}

/// In-memory roll store.
///
/// Intended for tests/dev and single-process deployments. Each `find_all`
/// evaluates the predicate against a consistent snapshot under a read lock.
#[derive(Debug)]
pub struct InMemoryRollStore {
    inner: RwLock<Inner>,
}

impl InMemoryRollStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                rolls: BTreeMap::new(),
                next_id: RollId::new(1),
            }),
        }
    }

    /// Seed the store with already-identified rolls (e.g. historical data).
    ///
    /// Later inserts continue after the largest seeded id.
    pub fn from_rolls(rolls: impl IntoIterator<Item = Roll>) -> Self {
        let rolls: BTreeMap<RollId, Roll> = rolls.into_iter().map(|r| (*r.id(), r)).collect();
        let next_id = rolls
            .keys()
            .next_back()
            .map(|id| id.next())
            .unwrap_or(RollId::new(1));
        Self {
            inner: RwLock::new(Inner { rolls, next_id }),
        }
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        self.inner
            .read()
            .map(|i| i.rolls.len())
            .map_err(|_| poisoned())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        self.len().map(|n| n == 0)
    }
}

impl Default for InMemoryRollStore {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned() -> StoreError {
    StoreError::Unavailable("lock poisoned".to_string())
}

impl RollStore for InMemoryRollStore {
    fn insert(&self, roll: NewRoll) -> Result<Roll, StoreError> {
        let mut inner = self.inner.write().map_err(|_| poisoned())?;
        let id = inner.next_id;
        inner.next_id = id.next();

        let roll = roll.into_roll(id);
        inner.rolls.insert(id, roll.clone());
        Ok(roll)
    }

    fn get(&self, id: RollId) -> Result<Option<Roll>, StoreError> {
        let inner = self.inner.read().map_err(|_| poisoned())?;
        Ok(inner.rolls.get(&id).cloned())
    }

    fn update(&self, roll: Roll) -> Result<Roll, StoreError> {
        let mut inner = self.inner.write().map_err(|_| poisoned())?;
        match inner.rolls.get_mut(roll.id()) {
            Some(slot) => {
                *slot = roll.clone();
                Ok(roll)
            }
            None => Err(StoreError::UnknownRoll(*roll.id())),
        }
    }

    fn find_all(&self, predicate: &RollPredicate) -> Result<Vec<Roll>, StoreError> {
        let inner = self.inner.read().map_err(|_| poisoned())?;
        Ok(inner
            .rolls
            .values()
            .filter(|r| predicate.test(r))
            .cloned()
            .collect())
    }
}
