//! Selection rectangle in physical screen pixels.

/// Minimum selection edge in pixels; anything narrower is rejected before
/// capture. The boundary is inclusive: a 10x10 selection is accepted.
pub const MIN_SELECTION_PX: u32 = 10;

/// Normalized bounding box: `left <= right`, `top <= bottom`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Region {
    /// Build a normalized region from two corner points in any order.
    pub fn from_corners(a: (i32, i32), b: (i32, i32)) -> Self {
        Self {
            left: a.0.min(b.0),
            top: a.1.min(b.1),
            right: a.0.max(b.0),
            bottom: a.1.max(b.1),
        }
    }

    /// Build from drag start/end points in logical (scaled) coordinates.
    /// `pixels_per_point` converts to the physical pixels capture works in.
    pub fn from_drag_points(start: (f32, f32), end: (f32, f32), pixels_per_point: f32) -> Self {
        let scale = |v: f32| (v * pixels_per_point).round() as i32;
        Self::from_corners((scale(start.0), scale(start.1)), (scale(end.0), scale(end.1)))
    }

    pub fn width(&self) -> u32 {
        (self.right - self.left).max(0) as u32
    }

    pub fn height(&self) -> u32 {
        (self.bottom - self.top).max(0) as u32
    }

    /// Whether the selection meets the minimum size on both axes.
    pub fn is_selectable(&self) -> bool {
        self.width() >= MIN_SELECTION_PX && self.height() >= MIN_SELECTION_PX
    }
}
