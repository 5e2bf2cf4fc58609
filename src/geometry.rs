//! Geometry helpers shared by every entity: axis-aligned boxes and directions.
//!
//! World coordinates follow screen convention: x grows to the right, y grows
//! downward, origin at the top-left corner of the play area.

use glam::Vec2;

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Bounds { min, max }
    }

    /// Box of `size` centred on `center`.
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Bounds {
            min: center - half,
            max: center + half,
        }
    }

    /// The play area: `(0, 0)` to `(width, height)`.
    pub fn play_area(width: f32, height: f32) -> Self {
        Bounds {
            min: Vec2::ZERO,
            max: Vec2::new(width, height),
        }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Per-axis containment of `inner` inside `self`: `(horizontal, vertical)`.
    /// Edges touching the boundary still count as inside.
    pub fn contains_axes(&self, inner: &Bounds) -> (bool, bool) {
        let horizontal = inner.min.x >= self.min.x && inner.max.x <= self.max.x;
        let vertical = inner.min.y >= self.min.y && inner.max.y <= self.max.y;
        (horizontal, vertical)
    }

    /// True when `inner` lies fully inside `self` on both axes.
    pub fn contains(&self, inner: &Bounds) -> bool {
        self.contains_axes(inner) == (true, true)
    }

    /// Overlap test. Boxes that only share an edge do not intersect.
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}

/// Unit vector pointing from `from` toward `to`.
///
/// Returns `None` when the two points coincide.
pub fn direction(from: Vec2, to: Vec2) -> Option<Vec2> {
    (to - from).try_normalize()
}

/// Unit vector for an angle in degrees, measured counter-clockwise on screen
/// (so 90° points up, toward negative y).
pub fn unit_from_degrees(degrees: f32) -> Vec2 {
    let rad = degrees.to_radians();
    Vec2::new(rad.cos(), -rad.sin())
}

/// Extent of the axis-aligned box enclosing a `size` box rotated by `degrees`.
pub fn rotated_extent(size: Vec2, degrees: f32) -> Vec2 {
    let rad = degrees.to_radians();
    let (sin, cos) = (rad.sin().abs(), rad.cos().abs());
    Vec2::new(size.x * cos + size.y * sin, size.x * sin + size.y * cos)
}
