//! Partition store - owns the sectors and enforces the 100% budget.
//!
//! Every mutation either commits completely or leaves the collection as it
//! was. The store is an explicitly owned handle: clone an `Arc` of it to
//! share it between consumers, there is no global instance.
//!
//! A lone sector updated to exactly 100% is committed in two steps. The
//! update stores [`SETTLE_INTERMEDIATE_PERCENTAGE`] right away and schedules a
//! deferred write of 100 on the store's [`Scheduler`]. That write is not
//! cancelled by later mutations: it lands on whatever sector still carries
//! the id, and is skipped only if the sector is gone.

use crate::{
    config::AppConfig,
    core::{
        defaults::DefaultPolicy,
        geometry::{self, BUDGET_TOTAL, ChartGeometry, SectorPath},
        settle::Scheduler,
    },
    entities::{NewSector, Sector, SectorUpdate, SectorWithAngles},
    errors::{Error, Result, SectorId},
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Value a lone full sector holds until the deferred settle write lands.
pub const SETTLE_INTERMEDIATE_PERCENTAGE: f64 = 99.999;

/// Delay before the settle write lands.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(10);

/// The three 20% sectors a fresh chart starts with.
#[must_use]
pub fn default_sectors() -> Vec<Sector> {
    [(1, "#FF6384"), (2, "#36A2EB"), (3, "#FFCE56")]
        .into_iter()
        .map(|(id, color)| Sector {
            id,
            name: format!("Sector-{id}"),
            percentage: 20.0,
            color: color.to_string(),
        })
        .collect()
}

fn lock_sectors(sectors: &Mutex<Vec<Sector>>) -> MutexGuard<'_, Vec<Sector>> {
    sectors.lock().unwrap_or_else(PoisonError::into_inner)
}

fn total_of(sectors: &[Sector]) -> f64 {
    sectors.iter().map(|s| s.percentage).sum()
}

fn exceeds_budget(total: f64) -> bool {
    total > BUDGET_TOTAL
}

/// Total the collection would have with sector `id` set to `percentage`,
/// summed in collection order exactly as [`total_of`] will sum it afterwards.
fn total_with(sectors: &[Sector], id: SectorId, percentage: f64) -> f64 {
    sectors
        .iter()
        .map(|s| if s.id == id { percentage } else { s.percentage })
        .sum()
}

fn next_id(sectors: &[Sector]) -> SectorId {
    sectors.iter().map(|s| s.id).max().map_or(1, |max| max + 1)
}

fn validate_percentage(value: f64) -> Result<()> {
    if value.is_finite() && (0.0..=BUDGET_TOTAL).contains(&value) {
        Ok(())
    } else {
        Err(Error::InvalidPercentage { value })
    }
}

/// Ordered collection of sectors sharing a single 100% budget.
pub struct PartitionStore {
    sectors: Arc<Mutex<Vec<Sector>>>,
    defaults: DefaultPolicy,
    geometry: ChartGeometry,
    scheduler: Arc<dyn Scheduler>,
    settle_delay: Duration,
}

impl PartitionStore {
    /// Store seeded with [`default_sectors`].
    #[must_use]
    pub fn new(scheduler: Arc<dyn Scheduler>) -> Self {
        Self::from_sectors(default_sectors(), scheduler)
    }

    /// Store with no sectors at all.
    #[must_use]
    pub fn empty(scheduler: Arc<dyn Scheduler>) -> Self {
        Self::from_sectors(Vec::new(), scheduler)
    }

    fn from_sectors(sectors: Vec<Sector>, scheduler: Arc<dyn Scheduler>) -> Self {
        Self {
            sectors: Arc::new(Mutex::new(sectors)),
            defaults: DefaultPolicy::default(),
            geometry: ChartGeometry::default(),
            scheduler,
            settle_delay: DEFAULT_SETTLE_DELAY,
        }
    }

    /// Builds a store from loaded configuration.
    ///
    /// Configured seed sectors go through [`PartitionStore::add`] in order,
    /// so a seed that breaks the budget is reported as a configuration error.
    pub fn from_config(config: &AppConfig, scheduler: Arc<dyn Scheduler>) -> Result<Self> {
        let seeded = if config.sectors.is_some() {
            Vec::new()
        } else {
            default_sectors()
        };
        let store = Self::from_sectors(seeded, scheduler)
            .with_defaults(config.defaults.clone())
            .with_geometry(config.chart)
            .with_settle_delay(config.settle_delay());

        for (index, seed) in config.sectors.iter().flatten().enumerate() {
            store.add(seed.clone()).map_err(|e| Error::Config {
                message: format!("Invalid seed sector #{}: {e}", index + 1),
            })?;
        }

        info!(
            sectors = store.len(),
            total = store.total_percentage(),
            "Partition store ready"
        );
        Ok(store)
    }

    /// Replaces the default-value policy for new sectors.
    #[must_use]
    pub fn with_defaults(mut self, defaults: DefaultPolicy) -> Self {
        self.defaults = defaults;
        self
    }

    /// Replaces the chart geometry used by [`PartitionStore::sector_path`].
    #[must_use]
    pub fn with_geometry(mut self, geometry: ChartGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    /// Replaces the delay before a settle write lands.
    #[must_use]
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Sector>> {
        lock_sectors(&self.sectors)
    }

    /// Snapshot of the sectors in their current order.
    #[must_use]
    pub fn sectors(&self) -> Vec<Sector> {
        self.lock().clone()
    }

    /// Number of sectors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the chart has no sectors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Sum of all sector percentages.
    #[must_use]
    pub fn total_percentage(&self) -> f64 {
        total_of(&self.lock())
    }

    /// Unallocated budget, `100 - total`.
    #[must_use]
    pub fn remaining_percentage(&self) -> f64 {
        BUDGET_TOTAL - self.total_percentage()
    }

    /// Sectors placed on the circle in collection order.
    #[must_use]
    pub fn sectors_with_angles(&self) -> Vec<SectorWithAngles> {
        geometry::sectors_with_angles(&self.lock())
    }

    /// Chart geometry paths are drawn on.
    #[must_use]
    pub fn geometry(&self) -> &ChartGeometry {
        &self.geometry
    }

    /// Wedge path for `sector` on this store's chart geometry.
    #[must_use]
    pub fn sector_path(&self, sector: &SectorWithAngles) -> SectorPath {
        geometry::sector_path(sector, &self.geometry)
    }

    /// Looks up a sector; `None` for unknown ids.
    #[must_use]
    pub fn get_by_id(&self, id: SectorId) -> Option<Sector> {
        self.lock().iter().find(|s| s.id == id).cloned()
    }

    /// Whether a new sector of `percentage` would fit in the budget.
    #[must_use]
    pub fn can_add(&self, percentage: f64) -> bool {
        validate_percentage(percentage).is_ok()
            && !exceeds_budget(self.total_percentage() + percentage)
    }

    /// Whether sector `id` could be changed to `new_percentage`. False for
    /// unknown ids.
    #[must_use]
    pub fn can_update(&self, id: SectorId, new_percentage: f64) -> bool {
        if validate_percentage(new_percentage).is_err() {
            return false;
        }
        let sectors = self.lock();
        sectors.iter().any(|s| s.id == id)
            && !exceeds_budget(total_with(&sectors, id, new_percentage))
    }

    /// Largest percentage a new sector may take.
    #[must_use]
    pub fn max_allowed_for_new_sector(&self) -> f64 {
        self.remaining_percentage()
    }

    /// Largest percentage sector `id` may take, or 0 for unknown ids.
    #[must_use]
    pub fn max_allowed_for_sector(&self, id: SectorId) -> f64 {
        let sectors = self.lock();
        sectors
            .iter()
            .find(|s| s.id == id)
            .map_or(0.0, |sector| {
                BUDGET_TOTAL - (total_of(&sectors) - sector.percentage)
            })
    }

    /// Appends a new sector with the next free id.
    ///
    /// # Errors
    /// `InvalidPercentage` for a value outside `[0, 100]`, `BudgetExceeded`
    /// when the total would pass 100. The collection is unchanged on error.
    pub fn add(&self, input: NewSector) -> Result<Sector> {
        validate_percentage(input.percentage)?;

        let mut sectors = self.lock();
        let total = total_of(&sectors);
        if exceeds_budget(total + input.percentage) {
            let limit = (BUDGET_TOTAL - total).max(0.0);
            warn!(
                requested = input.percentage,
                remaining = limit,
                "Rejected new sector: budget exceeded"
            );
            return Err(Error::BudgetExceeded { limit });
        }

        let id = next_id(&sectors);
        let percentage = input.percentage;
        let (name, color) = self.defaults.resolve(id, input);
        let sector = Sector {
            id,
            name,
            percentage,
            color,
        };
        sectors.push(sector.clone());
        debug!(
            sector_id = id,
            percentage = sector.percentage,
            total = total + sector.percentage,
            "Added sector"
        );
        Ok(sector)
    }

    /// Changes the fields present in `updates`, keeping id and position.
    ///
    /// Returns the sector as committed. When a lone sector reaches 100% the
    /// returned percentage is [`SETTLE_INTERMEDIATE_PERCENTAGE`] and the exact
    /// value lands after the settle delay.
    ///
    /// # Errors
    /// `SectorNotFound`, `InvalidPercentage`, or `SectorBudgetExceeded`. The
    /// sector is unchanged on error.
    #[allow(clippy::float_cmp)] // the settle only triggers on an exact 100
    pub fn update(&self, id: SectorId, updates: SectorUpdate) -> Result<Sector> {
        let mut sectors = self.lock();
        let index = sectors
            .iter()
            .position(|s| s.id == id)
            .ok_or(Error::SectorNotFound { id })?;
        if let Some(percentage) = updates.percentage {
            validate_percentage(percentage)?;
        }

        let old = sectors[index].percentage;
        let new = updates.percentage.unwrap_or(old);
        if exceeds_budget(total_with(&sectors, id, new)) {
            let others = total_of(&sectors) - old;
            let limit = (BUDGET_TOTAL - others).max(0.0);
            warn!(
                sector_id = id,
                requested = new,
                maximum = limit,
                "Rejected sector update: budget exceeded"
            );
            return Err(Error::SectorBudgetExceeded { id, limit });
        }

        let mut updated = sectors[index].clone();
        updates.apply_to(&mut updated);
        // A sector already holding exactly 100 has nothing left to settle.
        let settle =
            sectors.len() == 1 && updated.percentage == BUDGET_TOTAL && old != BUDGET_TOTAL;
        if settle {
            updated.percentage = SETTLE_INTERMEDIATE_PERCENTAGE;
        }
        sectors[index] = updated.clone();
        drop(sectors);

        debug!(sector_id = id, percentage = updated.percentage, "Updated sector");
        if settle {
            self.schedule_settle(id);
        }
        Ok(updated)
    }

    /// Removes sector `id`, returning it. Unknown ids are ignored.
    pub fn delete(&self, id: SectorId) -> Option<Sector> {
        let mut sectors = self.lock();
        let index = sectors.iter().position(|s| s.id == id)?;
        let removed = sectors.remove(index);
        debug!(sector_id = id, remaining = sectors.len(), "Deleted sector");
        Some(removed)
    }

    fn schedule_settle(&self, id: SectorId) {
        debug!(sector_id = id, delay = ?self.settle_delay, "Scheduling full-circle settle");
        let sectors = Arc::downgrade(&self.sectors);
        self.scheduler
            .schedule(self.settle_delay, Box::new(move || settle_full_circle(&sectors, id)));
    }
}

fn settle_full_circle(sectors: &Weak<Mutex<Vec<Sector>>>, id: SectorId) {
    let Some(sectors) = sectors.upgrade() else {
        debug!(sector_id = id, "Store dropped before settle");
        return;
    };
    let mut sectors = lock_sectors(&sectors);
    let others: f64 = sectors
        .iter()
        .filter(|s| s.id != id)
        .map(|s| s.percentage)
        .sum();

    let Some(sector) = sectors.iter_mut().find(|s| s.id == id) else {
        warn!(sector_id = id, "Settle target no longer exists; nothing to write");
        return;
    };
    sector.percentage = BUDGET_TOTAL;
    if exceeds_budget(others + BUDGET_TOTAL) {
        // Deferred writes are unconditional; see module docs.
        warn!(
            sector_id = id,
            total = others + BUDGET_TOTAL,
            "Settle write pushed total above 100%"
        );
    }
    debug!(sector_id = id, "Settled sector at 100%");
}
