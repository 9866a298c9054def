#![forbid(unsafe_code)]

//! Geometric primitives in CSS pixel space.

/// A point in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Both coordinates are finite numbers.
    #[inline]
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A width/height pair in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Create a new size.
    #[inline]
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Scale both dimensions by `factor`.
    #[inline]
    #[must_use]
    pub fn scaled(self, factor: f64) -> Self {
        Self::new(self.width * factor, self.height * factor)
    }
}

/// An axis-aligned rectangle, shaped like `DOMRect`.
///
/// Uses client coordinates (origin at the top-left of the browser viewport).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge.
    pub left: f64,
    /// Top edge.
    pub top: f64,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    #[must_use]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Bottom edge.
    #[inline]
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Size of the rectangle.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Center point in client coordinates.
    #[inline]
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(
            self.left + self.width / 2.0,
            self.top + self.height / 2.0,
        )
    }

    /// Convert a client-space point into this rectangle's local space.
    #[inline]
    #[must_use]
    pub fn to_local(&self, client: Point) -> Point {
        Point::new(client.x - self.left, client.y - self.top)
    }

    /// Every edge and extent is a finite number.
    #[inline]
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.left.is_finite()
            && self.top.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bottom_and_center() {
        let r = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(r.bottom(), 70.0);
        assert_eq!(r.center(), Point::new(60.0, 45.0));
    }

    #[test]
    fn to_local_subtracts_origin() {
        let r = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(r.to_local(Point::new(15.0, 25.0)), Point::new(5.0, 5.0));
    }

    #[test]
    fn finiteness() {
        assert!(Rect::new(0.0, 0.0, 800.0, 600.0).is_finite());
        assert!(!Rect::new(0.0, f64::NAN, 800.0, 600.0).is_finite());
        assert!(!Rect::new(0.0, 0.0, f64::INFINITY, 600.0).is_finite());
        assert!(Point::new(-3.0, 4.0).is_finite());
        assert!(!Point::new(f64::NEG_INFINITY, 0.0).is_finite());
    }

    #[test]
    fn size_scaling() {
        assert_eq!(Size::new(1200.0, 600.0).scaled(0.5), Size::new(600.0, 300.0));
    }
}
