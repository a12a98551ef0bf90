//! Geometry primitives shared by every layer of the engine
//!
//! Rectangles use a half-open convention for hit-testing: a point on the
//! right or bottom edge belongs to the neighbour, never to both.

/// 2D point
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// 2D size
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True when either dimension is zero or negative
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Per-edge spacing (margin or padding)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Insets {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Insets {
    pub const ZERO: Insets = Insets {
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
        left: 0.0,
    };

    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Same value on every edge
    pub const fn uniform(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Left + right
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    /// Top + bottom
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }

    /// Negative edges are clamped to zero
    pub fn non_negative(self) -> Self {
        Self {
            top: self.top.max(0.0),
            right: self.right.max(0.0),
            bottom: self.bottom.max(0.0),
            left: self.left.max(0.0),
        }
    }

    /// Edge-wise sum
    pub fn add(&self, other: &Insets) -> Self {
        Self {
            top: self.top + other.top,
            right: self.right + other.right,
            bottom: self.bottom + other.bottom,
            left: self.left + other.left,
        }
    }
}

/// 2D rectangle
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        origin: Point::ZERO,
        size: Size::ZERO,
    };

    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    pub fn x(&self) -> f32 {
        self.origin.x
    }

    pub fn y(&self) -> f32 {
        self.origin.y
    }

    pub fn width(&self) -> f32 {
        self.size.width
    }

    pub fn height(&self) -> f32 {
        self.size.height
    }

    pub fn right(&self) -> f32 {
        self.origin.x + self.size.width
    }

    pub fn bottom(&self) -> f32 {
        self.origin.y + self.size.height
    }

    pub fn is_empty(&self) -> bool {
        self.size.is_empty()
    }

    /// Half-open containment test used by hit-testing
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.origin.x
            && point.x < self.right()
            && point.y >= self.origin.y
            && point.y < self.bottom()
    }

    /// True when `other` lies entirely within this rect
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x() >= self.x()
            && other.y() >= self.y()
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Offset the rect by a delta
    pub fn offset(&self, dx: f32, dy: f32) -> Self {
        Rect {
            origin: Point::new(self.origin.x + dx, self.origin.y + dy),
            size: self.size,
        }
    }

    /// Shrink by per-edge insets.
    ///
    /// The result always stays inside `self`: oversized insets collapse the
    /// rect to zero width/height anchored on the far edge.
    pub fn shrink(&self, insets: Insets) -> Self {
        let insets = insets.non_negative();
        let x = (self.origin.x + insets.left).min(self.right());
        let y = (self.origin.y + insets.top).min(self.bottom());
        let width = (self.size.width - insets.horizontal()).max(0.0);
        let height = (self.size.height - insets.vertical()).max(0.0);
        Rect::new(x, y, width, height)
    }

    /// Overlapping region, or `None` when the rects are disjoint
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let x = self.x().max(other.x());
        let y = self.y().max(other.y());
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right <= x || bottom <= y {
            return None;
        }
        Some(Rect::new(x, y, right - x, bottom - y))
    }

    /// Component-wise linear interpolation
    pub fn lerp(&self, to: &Rect, t: f32) -> Rect {
        let mix = |a: f32, b: f32| a + (b - a) * t;
        Rect::new(
            mix(self.x(), to.x()),
            mix(self.y(), to.y()),
            mix(self.width(), to.width()),
            mix(self.height(), to.height()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shrink_keeps_containment() {
        let outer = Rect::new(10.0, 10.0, 300.0, 40.0);
        let inner = outer.shrink(Insets::uniform(10.0));
        let content = inner.shrink(Insets::uniform(5.0));

        assert_eq!(inner, Rect::new(20.0, 20.0, 280.0, 20.0));
        assert_eq!(content, Rect::new(25.0, 25.0, 270.0, 10.0));
        assert!(outer.contains_rect(&inner));
        assert!(inner.contains_rect(&content));
    }

    #[test]
    fn test_shrink_oversized_insets_collapse() {
        let outer = Rect::new(0.0, 0.0, 10.0, 10.0);
        let inner = outer.shrink(Insets::uniform(20.0));

        assert_eq!(inner.width(), 0.0);
        assert_eq!(inner.height(), 0.0);
        assert!(outer.contains_rect(&inner));
    }

    #[test]
    fn test_contains_is_half_open() {
        let r = Rect::new(0.0, 0.0, 100.0, 50.0);
        assert!(r.contains(Point::new(0.0, 0.0)));
        assert!(r.contains(Point::new(99.5, 49.5)));
        assert!(!r.contains(Point::new(100.0, 10.0)));
        assert!(!r.contains(Point::new(10.0, 50.0)));
    }

    #[test]
    fn test_intersection() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(50.0, 50.0, 100.0, 100.0);
        assert_eq!(a.intersection(&b), Some(Rect::new(50.0, 50.0, 50.0, 50.0)));
        assert_eq!(a.intersection(&Rect::new(200.0, 0.0, 10.0, 10.0)), None);
    }

    #[test]
    fn test_lerp() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 20.0, 30.0, 10.0);
        assert_eq!(a.lerp(&b, 0.5), Rect::new(5.0, 10.0, 20.0, 10.0));
    }
}
