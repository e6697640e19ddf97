//! Geometry
//!
//! Element boxes and document-relative rectangles.

/// Rectangle in document coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DomRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl DomRect {
    /// Create with dimensions
    pub fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Top edge (same as y)
    pub fn top(&self) -> f64 {
        self.y
    }

    /// Left edge (same as x)
    pub fn left(&self) -> f64 {
        self.x
    }

    /// Right edge
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Check if point is inside
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }
}

/// Laid-out box of an element.
///
/// Offsets are relative to the parent node; the host layout pass writes
/// them, the tree only sums them up.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ElementGeometry {
    pub offset_top: f64,
    pub offset_left: f64,
    pub width: f64,
    pub height: f64,
}

impl ElementGeometry {
    pub fn new(offset_left: f64, offset_top: f64, width: f64, height: f64) -> Self {
        Self { offset_top, offset_left, width, height }
    }
}
