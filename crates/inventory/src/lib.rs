//! Roll inventory domain module.
//!
//! This crate contains the interval model for rolls and the analytics built on
//! it, implemented purely as deterministic domain logic (no IO, no HTTP, no
//! storage). Callers hand in candidate sets; everything here is in-memory.

pub mod filter;
pub mod measure;
pub mod planner;
pub mod predicate;
pub mod roll;
pub mod statistics;
pub mod window;
pub mod zone;

pub use filter::{RollFilter, build_predicate};
pub use measure::Measure;
pub use planner::{overlap_predicate, select_candidates};
pub use predicate::{Bounds, Clause, RollPredicate};
pub use roll::{NewRoll, Roll};
pub use statistics::{DailySnapshot, StatisticsReport, compute_statistics, daily_snapshots};
pub use window::TimeWindow;
pub use zone::ReportingZone;
