//! Geometric primitives for diagram layout.
//!
//! Table boxes, relationship lines and labels are all placed in a plain 2D
//! coordinate space that matches SVG:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! - [`Point`] - A coordinate in diagram space
//! - [`Size`] - Width and height of a box
//! - [`Bounds`] - An axis-aligned rectangle
//! - [`Insets`] - Padding on four sides

/// A 2D point in diagram coordinate space.
///
/// # Examples
///
/// ```
/// # use erd_core::geometry::Point;
/// let table = Point::new(10.0, 20.0);
/// let label = table.towards(Point::new(10.0, 52.0), 8.0);
///
/// assert_eq!(label.x(), 10.0);
/// assert_eq!(label.y(), 28.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn x(self) -> f32 {
        self.x
    }

    pub fn y(self) -> f32 {
        self.y
    }

    /// Adds another point component-wise.
    pub fn add_point(self, other: Point) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }

    /// Subtracts another point component-wise.
    pub fn sub_point(self, other: Point) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }

    /// Euclidean length of the vector from the origin to this point.
    pub fn hypot(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Multiplies both coordinates by `factor`.
    pub fn scale(self, factor: f32) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    /// Moves `distance` units from `self` towards `target`.
    ///
    /// Returns `self` unchanged when both points coincide.
    pub fn towards(self, target: Point, distance: f32) -> Self {
        let delta = target.sub_point(self);
        let length = delta.hypot();
        if length == 0.0 {
            return self;
        }
        self.add_point(delta.scale(distance / length))
    }
}

/// Width and height of an element.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn width(self) -> f32 {
        self.width
    }

    pub fn height(self) -> f32 {
        self.height
    }

    /// Grows the size by the given insets.
    pub fn add_padding(self, insets: Insets) -> Self {
        Self::new(
            self.width + insets.horizontal_sum(),
            self.height + insets.vertical_sum(),
        )
    }
}

/// An axis-aligned rectangle stored as its minimum and maximum corners.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Rectangle of `size` whose top-left corner is `top_left`.
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
        }
    }

    pub fn min_x(self) -> f32 {
        self.min_x
    }

    pub fn min_y(self) -> f32 {
        self.min_y
    }

    pub fn max_x(self) -> f32 {
        self.max_x
    }

    pub fn max_y(self) -> f32 {
        self.max_y
    }

    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    pub fn center(self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Whether the interiors of the two rectangles overlap.
    ///
    /// Rectangles that merely share an edge do not intersect.
    pub fn intersects(&self, other: &Self) -> bool {
        self.min_x < other.max_x
            && other.min_x < self.max_x
            && self.min_y < other.max_y
            && other.min_y < self.max_y
    }

    /// Point where the segment from the center towards `target` leaves the
    /// rectangle.
    ///
    /// Relationship lines start and end on table borders rather than at
    /// table centers. If `target` is the center itself, the center is
    /// returned.
    pub fn boundary_point_towards(&self, target: Point) -> Point {
        let center = self.center();
        let dx = target.x - center.x;
        let dy = target.y - center.y;

        if dx == 0.0 && dy == 0.0 {
            return center;
        }

        let half_width = self.width() / 2.0;
        let half_height = self.height() / 2.0;

        // Scale the direction vector so that it touches the nearest edge.
        let scale_x = if dx != 0.0 {
            half_width / dx.abs()
        } else {
            f32::INFINITY
        };
        let scale_y = if dy != 0.0 {
            half_height / dy.abs()
        } else {
            f32::INFINITY
        };
        let scale = scale_x.min(scale_y);

        Point::new(center.x + dx * scale, center.y + dy * scale)
    }
}

/// Spacing on each side of a box.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Insets {
    top: f32,
    right: f32,
    bottom: f32,
    left: f32,
}

impl Insets {
    pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Same value on every side.
    pub fn uniform(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn top(self) -> f32 {
        self.top
    }

    pub fn right(self) -> f32 {
        self.right
    }

    pub fn left(self) -> f32 {
        self.left
    }

    pub fn horizontal_sum(self) -> f32 {
        self.left + self.right
    }

    pub fn vertical_sum(self) -> f32 {
        self.top + self.bottom
    }
}
