//! Default-value policy applied when a sector is created.
//!
//! An empty name becomes `"{prefix}-{id}"` and an empty color becomes the
//! fallback color. Updates never go through this policy: an explicit empty
//! value on update is stored as given.

use crate::entities::NewSector;
use crate::errors::SectorId;
use serde::Deserialize;

/// Placeholder values for fields a caller left empty.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DefaultPolicy {
    /// Prefix of generated names, e.g. `Sector` gives `Sector-4`
    pub name_prefix: String,
    /// Color used when none was chosen
    pub fallback_color: String,
}

impl Default for DefaultPolicy {
    fn default() -> Self {
        Self {
            name_prefix: "Sector".to_string(),
            fallback_color: "#FF6384".to_string(),
        }
    }
}

impl DefaultPolicy {
    /// Generated name for sector `id`.
    #[must_use]
    pub fn placeholder_name(&self, id: SectorId) -> String {
        format!("{}-{id}", self.name_prefix)
    }

    /// Returns the name and color to store for a new sector with `id`.
    #[must_use]
    pub fn resolve(&self, id: SectorId, input: NewSector) -> (String, String) {
        let name = if input.name.trim().is_empty() {
            self.placeholder_name(id)
        } else {
            input.name
        };
        let color = if input.color.trim().is_empty() {
            self.fallback_color.clone()
        } else {
            input.color
        };
        (name, color)
    }
}
