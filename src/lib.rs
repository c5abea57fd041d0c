//! release-train - admission control for release PRs
//!
//! Discovers release pull requests waiting on `autorelease: pending`, filters
//! out the ones that must not be auto-merged, and promotes a bounded number of
//! them to `automerge` so at most a fixed number are ever in flight.

pub mod error;
pub mod platform;
pub mod train;
pub mod types;
