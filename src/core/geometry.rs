//! Angle derivation and path generation for the pie renderer.
//!
//! Percentages map onto the circle against the fixed 100-unit budget, not the
//! current total, so unallocated budget shows up as an undrawn gap. A path
//! cannot describe a literal 360° arc (start and end points coincide), so a
//! lone 100% sector is reported as [`DRAWABLE_FULL_CIRCLE_DEGREES`].

use crate::entities::{Sector, SectorWithAngles};
use serde::Deserialize;
use std::fmt;

/// Size of the budget every percentage is measured against.
pub const BUDGET_TOTAL: f64 = 100.0;

/// Degrees in a whole turn.
pub const FULL_CIRCLE_DEGREES: f64 = 360.0;

/// Largest span drawn for a sector that owns the whole circle.
pub const DRAWABLE_FULL_CIRCLE_DEGREES: f64 = 359.9999;

/// Angular span of a sector holding `percentage` of the budget.
///
/// `sector_count` is the size of the collection the sector belongs to; the
/// full-circle substitution only applies when it is the only sector.
#[must_use]
#[allow(clippy::float_cmp)] // only an exact 100 is a full circle
pub fn sector_angle(percentage: f64, sector_count: usize) -> f64 {
    if sector_count == 1 && percentage == BUDGET_TOTAL {
        DRAWABLE_FULL_CIRCLE_DEGREES
    } else {
        percentage / BUDGET_TOTAL * FULL_CIRCLE_DEGREES
    }
}

/// Walks `sectors` in order and places each one after the previous.
#[must_use]
pub fn sectors_with_angles(sectors: &[Sector]) -> Vec<SectorWithAngles> {
    let count = sectors.len();
    let mut current_angle = 0.0;

    sectors
        .iter()
        .map(|sector| {
            let angle = sector_angle(sector.percentage, count);
            let start_angle = current_angle;
            let end_angle = current_angle + angle;
            current_angle = end_angle;

            SectorWithAngles {
                sector: sector.clone(),
                start_angle,
                end_angle,
                angle,
            }
        })
        .collect()
}

/// Where the chart sits in the drawing.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChartGeometry {
    /// Horizontal center
    pub center_x: f64,
    /// Vertical center
    pub center_y: f64,
    /// Rim radius
    pub radius: f64,
}

impl Default for ChartGeometry {
    fn default() -> Self {
        Self {
            center_x: 250.0,
            center_y: 250.0,
            radius: 200.0,
        }
    }
}

impl ChartGeometry {
    /// Point on the rim at `degrees`, measured clockwise from 12 o'clock.
    #[must_use]
    pub fn point_at(&self, degrees: f64) -> (f64, f64) {
        let radians = (degrees - 90.0).to_radians();
        (
            self.radius.mul_add(radians.cos(), self.center_x),
            self.radius.mul_add(radians.sin(), self.center_y),
        )
    }
}

/// One instruction of an SVG path.
#[derive(Debug, Clone, Copy, PartialEq)]
#[allow(missing_docs)] // coordinates follow SVG path naming
pub enum PathCommand {
    /// `M x y`
    MoveTo { x: f64, y: f64 },
    /// `L x y`
    LineTo { x: f64, y: f64 },
    /// `A rx ry rotation large_arc sweep x y`
    Arc {
        rx: f64,
        ry: f64,
        rotation: f64,
        large_arc: bool,
        sweep: bool,
        x: f64,
        y: f64,
    },
    /// `Z`
    Close,
}

impl fmt::Display for PathCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::MoveTo { x, y } => write!(f, "M {x} {y}"),
            Self::LineTo { x, y } => write!(f, "L {x} {y}"),
            Self::Arc {
                rx,
                ry,
                rotation,
                large_arc,
                sweep,
                x,
                y,
            } => write!(
                f,
                "A {rx} {ry} {rotation} {} {} {x} {y}",
                u8::from(large_arc),
                u8::from(sweep)
            ),
            Self::Close => f.write_str("Z"),
        }
    }
}

/// A closed wedge: center, out to the rim, along the arc, back.
#[derive(Debug, Clone, PartialEq)]
pub struct SectorPath {
    /// Instructions in drawing order
    pub commands: Vec<PathCommand>,
}

impl fmt::Display for SectorPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, command) in self.commands.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{command}")?;
        }
        Ok(())
    }
}

/// Builds the wedge path for `sector` on `geometry`.
#[must_use]
pub fn sector_path(sector: &SectorWithAngles, geometry: &ChartGeometry) -> SectorPath {
    let (x1, y1) = geometry.point_at(sector.start_angle);
    let (x2, y2) = geometry.point_at(sector.end_angle);

    SectorPath {
        commands: vec![
            PathCommand::MoveTo {
                x: geometry.center_x,
                y: geometry.center_y,
            },
            PathCommand::LineTo { x: x1, y: y1 },
            PathCommand::Arc {
                rx: geometry.radius,
                ry: geometry.radius,
                rotation: 0.0,
                large_arc: sector.angle > 180.0,
                sweep: true,
                x: x2,
                y: y2,
            },
            PathCommand::Close,
        ],
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::sector;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_angles_use_fixed_budget_denominator() {
        let sectors = vec![sector(1, 20.0), sector(2, 20.0), sector(3, 20.0)];
        let angles = sectors_with_angles(&sectors);

        assert_eq!(angles.len(), 3);
        assert!(close(angles[0].angle, 72.0));
        assert!(close(angles[0].start_angle, 0.0));
        assert!(close(angles[0].end_angle, 72.0));
        assert!(close(angles[1].start_angle, 72.0));
        assert!(close(angles[2].end_angle, 216.0));
    }

    #[test]
    fn test_single_full_sector_stays_drawable() {
        let angles = sectors_with_angles(&[sector(1, 100.0)]);
        assert_eq!(angles[0].angle, DRAWABLE_FULL_CIRCLE_DEGREES);
        assert!(angles[0].angle > 350.0);
        assert!(angles[0].angle < FULL_CIRCLE_DEGREES);
    }

    #[test]
    fn test_full_circle_rule_needs_a_single_sector() {
        let angles = sectors_with_angles(&[sector(1, 100.0), sector(2, 0.0)]);
        assert_eq!(angles[0].angle, FULL_CIRCLE_DEGREES);
        assert_eq!(angles[1].start_angle, FULL_CIRCLE_DEGREES);
        assert_eq!(angles[1].angle, 0.0);
    }

    #[test]
    fn test_empty_collection_has_no_angles() {
        assert!(sectors_with_angles(&[]).is_empty());
    }

    #[test]
    fn test_path_for_quarter_sector() {
        let angles = sectors_with_angles(&[sector(1, 25.0)]);
        let path = sector_path(&angles[0], &ChartGeometry::default());

        assert_eq!(path.commands.len(), 4);
        assert_eq!(path.commands[0], PathCommand::MoveTo { x: 250.0, y: 250.0 });
        match path.commands[1] {
            PathCommand::LineTo { x, y } => {
                assert!(close(x, 250.0));
                assert!(close(y, 50.0));
            }
            other => panic!("expected LineTo, got {other:?}"),
        }
        match path.commands[2] {
            PathCommand::Arc {
                large_arc, x, y, ..
            } => {
                assert!(!large_arc);
                assert!(close(x, 450.0));
                assert!(close(y, 250.0));
            }
            other => panic!("expected Arc, got {other:?}"),
        }
        assert_eq!(path.commands[3], PathCommand::Close);
    }

    #[test]
    fn test_large_arc_flag_above_half_circle() {
        let angles = sectors_with_angles(&[sector(1, 75.0)]);
        let rendered = sector_path(&angles[0], &ChartGeometry::default()).to_string();
        assert!(rendered.starts_with("M 250 250 L "));
        assert!(rendered.contains(" A 200 200 0 1 1 "));
        assert!(rendered.ends_with(" Z"));

        let half = sectors_with_angles(&[sector(1, 50.0)]);
        let rendered = sector_path(&half[0], &ChartGeometry::default()).to_string();
        assert!(rendered.contains(" A 200 200 0 0 1 "));
    }
}
