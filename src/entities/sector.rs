//! Sector entity - a named share of the 100% budget.
//!
//! `Sector` is what the store holds. `SectorWithAngles` is the derived,
//! order-dependent projection handed to renderers and is never stored.

use crate::errors::SectorId;
use serde::{Deserialize, Serialize};

/// A named claim on the budget, drawn with its own color.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sector {
    /// Unique identifier, assigned as max existing id + 1
    pub id: SectorId,
    /// Display label
    pub name: String,
    /// Share of the 100-unit budget, in `[0, 100]`
    pub percentage: f64,
    /// Display color token, usually `#RRGGBB`
    pub color: String,
}

/// Input for creating a sector. Empty `name` or `color` fall back to the
/// store's default policy.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NewSector {
    /// Display label; empty means a generated placeholder
    #[serde(default)]
    pub name: String,
    /// Requested share of the budget
    pub percentage: f64,
    /// Display color; empty means the fallback color
    #[serde(default)]
    pub color: String,
}

impl NewSector {
    /// Builds the input for [`crate::core::PartitionStore::add`].
    #[must_use]
    pub fn new(name: impl Into<String>, percentage: f64, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            percentage,
            color: color.into(),
        }
    }
}

/// Partial update; `None` fields keep their current value.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SectorUpdate {
    /// New display label
    pub name: Option<String>,
    /// New share of the budget
    pub percentage: Option<f64>,
    /// New display color
    pub color: Option<String>,
}

impl SectorUpdate {
    /// Update touching only the percentage.
    #[must_use]
    pub fn percentage(percentage: f64) -> Self {
        Self {
            percentage: Some(percentage),
            ..Self::default()
        }
    }

    /// Also replaces the name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Also replaces the color.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Applies the present fields onto `sector`, leaving its id untouched.
    pub(crate) fn apply_to(self, sector: &mut Sector) {
        if let Some(name) = self.name {
            sector.name = name;
        }
        if let Some(percentage) = self.percentage {
            sector.percentage = percentage;
        }
        if let Some(color) = self.color {
            sector.color = color;
        }
    }
}

/// A sector together with its place on the circle, in degrees.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SectorWithAngles {
    /// The stored sector
    #[serde(flatten)]
    pub sector: Sector,
    /// Running total before this sector
    pub start_angle: f64,
    /// Running total after this sector
    pub end_angle: f64,
    /// Angular span, `end_angle - start_angle`
    pub angle: f64,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;

    fn sample() -> Sector {
        Sector {
            id: 4,
            name: "Rent".to_string(),
            percentage: 30.0,
            color: "#36A2EB".to_string(),
        }
    }

    #[test]
    fn test_update_applies_only_present_fields() {
        let mut sector = sample();
        SectorUpdate::percentage(45.0).apply_to(&mut sector);
        assert_eq!(sector.id, 4);
        assert_eq!(sector.name, "Rent");
        assert_eq!(sector.percentage, 45.0);
        assert_eq!(sector.color, "#36A2EB");

        SectorUpdate::default()
            .with_name("Housing")
            .with_color("#000000")
            .apply_to(&mut sector);
        assert_eq!(sector.name, "Housing");
        assert_eq!(sector.percentage, 45.0);
        assert_eq!(sector.color, "#000000");
    }

    #[test]
    fn test_empty_update_is_noop() {
        let mut sector = sample();
        SectorUpdate::default().apply_to(&mut sector);
        assert_eq!(sector, sample());
    }
}
