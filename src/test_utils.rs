//! Shared test utilities for the partition manager.
//!
//! Stores built here run on a `ManualScheduler`, so settle writes only land
//! when a test advances the clock.

use crate::{
    core::{PartitionStore, settle::ManualScheduler},
    entities::{NewSector, Sector},
};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Routes tracing output through the test harness; safe to call repeatedly.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// A bare sector record with a generated name and color.
pub fn sector(id: u32, percentage: f64) -> Sector {
    Sector {
        id,
        name: format!("Sector-{id}"),
        percentage,
        color: "#FF6384".to_string(),
    }
}

/// Store with the default three-sector seed.
pub fn seeded_store() -> (PartitionStore, Arc<ManualScheduler>) {
    let scheduler = Arc::new(ManualScheduler::new());
    (PartitionStore::new(Arc::clone(&scheduler) as _), scheduler)
}

/// Store with no sectors.
pub fn empty_store() -> (PartitionStore, Arc<ManualScheduler>) {
    let scheduler = Arc::new(ManualScheduler::new());
    (PartitionStore::empty(Arc::clone(&scheduler) as _), scheduler)
}

/// Store holding one sector per entry of `percentages`, ids from 1.
///
/// # Panics
/// If the percentages do not fit in the budget.
#[allow(clippy::expect_used)]
pub fn store_with(percentages: &[f64]) -> (PartitionStore, Arc<ManualScheduler>) {
    let (store, scheduler) = empty_store();
    for &percentage in percentages {
        store
            .add(NewSector::new("", percentage, ""))
            .expect("test percentages must fit the budget");
    }
    (store, scheduler)
}
