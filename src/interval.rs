//! Interval arithmetic for ray parameter ranges and color channels.
//!
//! Provides closed intervals [min, max] used for ray t-values and bounds checking.

/// Closed interval [min, max] for range checking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    /// Minimum value of the interval
    pub min: f32,
    /// Maximum value of the interval
    pub max: f32,
}

impl Interval {
    /// Forward ray parameters: everything strictly in front of the origin.
    pub const FORWARD: Interval = Interval {
        min: 0.0,
        max: f32::INFINITY,
    };

    /// Displayable channel intensities.
    pub const UNIT: Interval = Interval { min: 0.0, max: 1.0 };

    /// Create a new interval with given min and max values
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Interval with the same minimum and a tighter maximum.
    pub fn with_max(self, max: f32) -> Self {
        Self { min: self.min, max }
    }

    /// Check if the interval surrounds the given value (exclusive bounds)
    pub fn surrounds(&self, x: f32) -> bool {
        self.min < x && x < self.max
    }

    /// Clamp the given value to be within this interval's bounds
    pub fn clamp(&self, x: f32) -> f32 {
        x.clamp(self.min, self.max)
    }
}
