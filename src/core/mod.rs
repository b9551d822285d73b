//! Core logic - the partition store and the pure helpers around it.
//!
//! Nothing here knows about files, terminals or the binary; configuration is
//! handed in already parsed.

/// Default-value policy for new sectors
pub mod defaults;
/// Angle derivation and path generation
pub mod geometry;
/// Preset colors for new sectors
pub mod palette;
/// The budget-enforcing sector store
pub mod partition;
/// Allocation indicator color
pub mod progress;
/// Deferred task scheduling for the settle transition
pub mod settle;

pub use partition::PartitionStore;
