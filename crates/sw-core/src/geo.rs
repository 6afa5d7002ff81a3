//! Plane coordinates for agent positions.
//!
//! Positions are owned by the host's presentation/physics layer; the engine
//! only reads them.  `f32` matches what renderers hand over and is plenty for
//! screen-space distances.

/// A point on the 2-D simulation plane.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(self, other: Point) -> f32 {
        self.distance_squared(other).sqrt()
    }

    /// Squared Euclidean distance, for comparisons.
    #[inline]
    pub fn distance_squared(self, other: Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    /// `false` if either coordinate is NaN or infinite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Integer grid cell containing this point for square cells of side
    /// `cell_size`.
    ///
    /// Divides in `f64` so two points closer than `cell_size` never land more
    /// than one cell apart through rounding.  Coordinates beyond the `i32`
    /// cell range saturate.
    #[inline]
    pub fn cell(self, cell_size: f32) -> (i32, i32) {
        let c = cell_size as f64;
        (
            (self.x as f64 / c).floor() as i32,
            (self.y as f64 / c).floor() as i32,
        )
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}
