//! Color presets handed out to newly created sectors.
//!
//! The cycler walks a fixed palette and wraps around, so adjacent sectors
//! created in a row never share a color.

/// Preset colors, in hand-out order.
pub const COLOR_PRESETS: [&str; 20] = [
    "#FF6384", "#36A2EB", "#FFCE56", "#4BC0C0", "#9966FF",
    "#FF9F40", "#C9CBCF", "#E7E9ED", "#8DD17E", "#F67019",
    "#F53794", "#537BC4", "#ACC236", "#166A8F", "#00A950",
    "#58595B", "#8549BA", "#FF6384", "#36A2EB", "#FFCE56",
];

/// Hands out preset colors round-robin.
#[derive(Debug, Clone, Default)]
pub struct ColorCycler {
    index: usize,
}

impl ColorCycler {
    /// Cycler starting at the first preset.
    #[must_use]
    pub const fn new() -> Self {
        Self { index: 0 }
    }

    /// Color the next call to [`ColorCycler::next_color`] will return.
    #[must_use]
    pub const fn peek(&self) -> &'static str {
        COLOR_PRESETS[self.index]
    }

    /// Returns the current preset and moves the pointer along.
    pub fn next_color(&mut self) -> &'static str {
        let color = COLOR_PRESETS[self.index];
        self.index = (self.index + 1) % COLOR_PRESETS.len();
        color
    }
}
