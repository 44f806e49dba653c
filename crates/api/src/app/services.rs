use std::sync::Arc;

use rollstock_infra::{Clock, InMemoryRollStore, RollService, RollStore};
use rollstock_inventory::ReportingZone;

/// Roll service over a type-erased store.
pub type SharedRollService = RollService<Arc<dyn RollStore>>;

/// Everything the handlers need, shared behind an `Arc`.
pub struct AppServices {
    rolls: SharedRollService,
}

impl AppServices {
    pub fn new(store: Arc<dyn RollStore>, zone: ReportingZone) -> Self {
        Self {
            rolls: RollService::new(store, zone),
        }
    }

    /// In-memory wiring (dev/test).
    pub fn in_memory(zone: ReportingZone) -> Self {
        Self::new(Arc::new(InMemoryRollStore::new()), zone)
    }

    pub fn with_clock(self, clock: Arc<dyn Clock>) -> Self {
        Self {
            rolls: self.rolls.with_clock(clock),
        }
    }

    /// Cap on statistics windows, in reporting-zone calendar days.
    pub fn with_max_window_days(self, days: u32) -> Self {
        Self {
            rolls: self.rolls.with_max_window_days(days),
        }
    }

    pub fn rolls(&self) -> &SharedRollService {
        &self.rolls
    }

    pub fn zone(&self) -> ReportingZone {
        self.rolls.zone()
    }
}
