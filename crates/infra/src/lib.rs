//! Infrastructure layer: storage, clock, configuration and the roll service.

pub mod clock;
pub mod config;
pub mod roll_store;
pub mod service;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{AppConfig, ConfigError};
pub use roll_store::{InMemoryRollStore, RollStore, StoreError};
pub use service::{RollService, ServiceError};
