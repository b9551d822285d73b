//! Fill color for a budget allocation indicator.
//!
//! Goes from red at 0% through yellow at 50% to green at 100%.

use serde::Serialize;
use std::fmt;

/// An opaque RGB color, displayed as `rgb(r, g, b)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Color for an indicator filled to `percent`; input is clamped to `[0, 100]`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn allocation_color(percent: f64) -> Rgb {
    let percent = if percent.is_nan() {
        0.0
    } else {
        percent.clamp(0.0, 100.0)
    };
    // Both channels stay within 0..=255 after clamping.
    let channel = |t: f64| (t * 255.0).round() as u8;

    if percent <= 50.0 {
        Rgb {
            r: 255,
            g: channel(percent / 50.0),
            b: 0,
        }
    } else {
        Rgb {
            r: channel((100.0 - percent) / 50.0),
            g: 255,
            b: 0,
        }
    }
}
